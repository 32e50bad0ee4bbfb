//! Merging procedures declared with several input schemas.

use procli_ir::{FlagsSchema, ObjectShape, SchemaNode, Shape};

use crate::{
    coerce::CoercionPolicy,
    compiled::{CompiledProcedure, compile_schema},
    decode::Decoder,
    error::SchemaIncompatibility,
};

/// Merge several input schemas into one options-only procedure.
///
/// Every input is compiled first and all failures are reported together.
/// Inputs must not produce positional parameters. Plain objects are merged
/// into one object; anything else becomes an intersection.
pub fn merge_inputs(
    inputs: &[SchemaNode],
    policy: CoercionPolicy,
) -> Result<CompiledProcedure, SchemaIncompatibility> {
    let mut compiled = Vec::with_capacity(inputs.len());
    let mut errors = Vec::new();
    for input in inputs {
        match compile_schema(input, policy) {
            Ok(procedure) => compiled.push(procedure),
            Err(err) => errors.push(err),
        }
    }
    if !errors.is_empty() {
        return Err(SchemaIncompatibility::join(errors));
    }

    if compiled
        .iter()
        .any(|procedure| !procedure.positional_parameters.is_empty())
    {
        return Err(SchemaIncompatibility::multi_input_positionals());
    }

    let mut schemas: Vec<SchemaNode> = compiled
        .into_iter()
        .map(|procedure| procedure.flags_schema)
        .filter(|flags| !flags.is_empty())
        .map(FlagsSchema::into_node)
        .collect();

    let flags = if schemas.iter().all(is_plain_object) {
        tracing::debug!(inputs = schemas.len(), "merging plain object inputs");
        merge_plain_objects(schemas)
    } else {
        tracing::debug!(inputs = schemas.len(), "merging inputs as intersection");
        if schemas.len() == 1 {
            schemas.remove(0)
        } else {
            SchemaNode::all_of(schemas)
        }
    };

    Ok(CompiledProcedure::new(
        Vec::new(),
        FlagsSchema::new(flags),
        Decoder::Options,
        policy,
    ))
}

/// An object with no annotations and no additional properties.
fn is_plain_object(node: &SchemaNode) -> bool {
    matches!(&node.shape, Shape::Object(shape) if !shape.additional_properties)
        && !node.optional
        && node.default.is_none()
        && node.title.is_none()
        && node.description.is_none()
}

fn merge_plain_objects(schemas: Vec<SchemaNode>) -> SchemaNode {
    let mut merged = ObjectShape::new();
    for schema in schemas {
        let Shape::Object(shape) = schema.shape else {
            continue;
        };
        for (name, property) in shape.properties {
            merged.properties.insert(name, property);
        }
        for name in shape.required {
            if !merged.required.contains(&name) {
                merged.required.push(name);
            }
        }
    }
    SchemaNode::object(merged)
}
