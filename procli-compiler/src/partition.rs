//! Splitting a tuple input into positional parameters and a flags object.

use procli_ir::{FlagsSchema, PositionalParameter, SchemaNode, Shape};

use crate::{
    classify::{
        annotated_node, classify, has_additional_properties, is_optional, is_primitive,
        unwrap_optional,
    },
    decode::PositionalSlot,
    error::SchemaIncompatibility,
    naming,
};

/// Positional parameters and the trailing flags object of a tuple.
#[derive(Debug, Clone)]
pub(crate) struct Partition {
    pub parameters: Vec<PositionalParameter>,
    pub slots: Vec<PositionalSlot>,
    pub flags: Option<FlagsSchema>,
}

/// Partition the items of `tuple`.
///
/// Every item must be a primitive or an array of primitives, except the last,
/// which may be an object holding the flags. An array positional must be the
/// last positional.
pub(crate) fn partition(
    tuple: &SchemaNode,
    items: &[SchemaNode],
) -> Result<Partition, SchemaIncompatibility> {
    for item in items {
        if let Shape::Array { items: element } = &unwrap_optional(item).shape
            && element.accepts_null()
        {
            return Err(SchemaIncompatibility::nullable_array(unwrap_optional(item)));
        }
    }

    let candidate = items.iter().position(|item| !is_positional(item));
    let positional_count = match candidate {
        Some(index) if index + 1 != items.len() => {
            return Err(SchemaIncompatibility::non_primitive_positional(tuple));
        }
        Some(index) => match classify(&items[index]) {
            Ok(tail) if tail.is_object() => index,
            Err(err) if has_additional_properties(&items[index]) => return Err(err),
            _ => return Err(SchemaIncompatibility::non_object_tail(tuple)),
        },
        None => items.len(),
    };

    let positionals = &items[..positional_count];
    let mut parameters = Vec::with_capacity(positional_count);
    let mut slots = Vec::with_capacity(positional_count);

    for (position, item) in positionals.iter().enumerate() {
        let inner = unwrap_optional(item);
        let named = annotated_node(item);
        let required = !is_optional(item);

        let (name, schema, array) = match &inner.shape {
            Shape::Array { .. } if position + 1 != positional_count => {
                return Err(SchemaIncompatibility::array_not_last(tuple));
            }
            Shape::Array { items: element } => (
                naming::array_parameter_name(named, element, position),
                element.as_ref().clone(),
                true,
            ),
            _ => (naming::parameter_name(named, position), inner.clone(), false),
        };

        parameters.push(PositionalParameter {
            name: name.clone(),
            description: named.description.clone().unwrap_or_default(),
            ty: type_label(&schema),
            required,
            array,
        });
        slots.push(PositionalSlot {
            schema,
            array,
            required,
            label: name,
        });
    }

    Ok(Partition {
        parameters,
        slots,
        flags: candidate.map(|index| FlagsSchema::new(unwrap_optional(&items[index]).clone())),
    })
}

/// A primitive, or an array of primitives.
fn is_positional(item: &SchemaNode) -> bool {
    let inner = unwrap_optional(item);
    match &inner.shape {
        Shape::Array { items } => is_primitive(items),
        _ => is_primitive(inner),
    }
}

/// Accepted types joined for display, e.g. `string | number`.
pub(crate) fn type_label(node: &SchemaNode) -> String {
    node.accepted_types()
        .iter()
        .map(|ty| ty.as_str())
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use procli_ir::ObjectShape;

    use super::*;

    fn flags() -> SchemaNode {
        SchemaNode::object(ObjectShape::new().with_property("foo", SchemaNode::string(), true))
    }

    fn run(items: Vec<SchemaNode>) -> Result<Partition, SchemaIncompatibility> {
        let tuple = SchemaNode::tuple(items);
        let Shape::Tuple { items } = &tuple.shape else {
            unreachable!()
        };
        partition(&tuple, items)
    }

    #[test]
    fn test_trailing_object_becomes_flags() {
        let partition = run(vec![SchemaNode::string(), SchemaNode::number(), flags()]).unwrap();
        assert_eq!(partition.parameters.len(), 2);
        assert_eq!(partition.parameters[0].name, "parameter_1");
        assert_eq!(partition.parameters[1].ty, "number");
        assert!(partition.flags.is_some());
    }

    #[test]
    fn test_no_object_tail() {
        let partition = run(vec![SchemaNode::string(), SchemaNode::boolean()]).unwrap();
        assert_eq!(partition.parameters.len(), 2);
        assert!(partition.flags.is_none());
    }

    #[test]
    fn test_object_in_the_middle() {
        let err = run(vec![SchemaNode::string(), flags(), SchemaNode::string()]).unwrap_err();
        assert!(err
            .message()
            .ends_with("Positional parameters must be strings, numbers or booleans."));
    }

    #[test]
    fn test_non_object_tail() {
        let tail = SchemaNode::tuple([SchemaNode::string()]);
        let err = run(vec![SchemaNode::string(), tail]).unwrap_err();
        assert!(err.message().ends_with("The last type must accept object inputs."));
    }

    #[test]
    fn test_open_tail_reports_additional_properties() {
        let mut shape = ObjectShape::new();
        shape.additional_properties = true;
        let err = run(vec![SchemaNode::string(), SchemaNode::object(shape)]).unwrap_err();
        assert_eq!(
            err.message(),
            "Invalid input type: inputs with additional properties are not currently supported."
        );
    }

    #[test]
    fn test_optional_tail_is_unwrapped() {
        let partition = run(vec![
            SchemaNode::string(),
            SchemaNode::any_of([SchemaNode::never(), flags()]),
        ])
        .unwrap();
        let flags_schema = partition.flags.unwrap();
        assert_eq!(flags_schema.node(), &flags());
        assert!(flags_schema.to_json_schema().get("anyOf").is_none());
    }

    #[test]
    fn test_array_positional_must_be_last() {
        let err = run(vec![
            SchemaNode::array(SchemaNode::string()),
            SchemaNode::string(),
        ])
        .unwrap_err();
        assert!(err
            .message()
            .ends_with("Array positional parameters must be the last positional parameter."));

        let ok = run(vec![
            SchemaNode::string(),
            SchemaNode::array(SchemaNode::string()),
            flags(),
        ])
        .unwrap();
        assert!(ok.parameters[1].array);
        assert_eq!(ok.parameters[1].rendered(), "[parameter_2...]");
    }

    #[test]
    fn test_nullable_array_positional() {
        let element = SchemaNode::any_of([SchemaNode::string(), SchemaNode::null()]);
        let err = run(vec![SchemaNode::array(element)]).unwrap_err();
        assert!(err.message().contains("Nullable arrays are not supported."));
    }

    #[test]
    fn test_names_and_optionality() {
        let partition = run(vec![
            SchemaNode::string().with_title("first name"),
            SchemaNode::number().with_description("How many?").mark_optional(),
        ])
        .unwrap();
        let rendered: Vec<_> = partition.parameters.iter().map(|p| p.rendered()).collect();
        assert_eq!(rendered, vec!["<first name>", "[How many]"]);
        assert_eq!(partition.parameters[1].description, "How many?");
    }
}
