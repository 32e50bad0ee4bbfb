//! Compiling schemas into procedures.

use procli_ir::{DecodedArgv, FlagsSchema, PositionalParameter, SchemaNode};
use serde_json::Value;

use crate::{
    classify::{Classified, annotated_node, classify, is_primitive},
    coerce::CoercionPolicy,
    decode::{Decoder, PositionalSlot},
    error::{CliValidationError, SchemaIncompatibility},
    merge::merge_inputs,
    naming,
    partition::{partition, type_label},
};

/// The CLI surface of one procedure.
///
/// Built once, then shared read-only by every invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledProcedure {
    /// Positional parameters in declaration order.
    pub positional_parameters: Vec<PositionalParameter>,
    /// Schema of the named options.
    pub flags_schema: FlagsSchema,
    decoder: Decoder,
    policy: CoercionPolicy,
}

impl CompiledProcedure {
    pub(crate) fn new(
        positional_parameters: Vec<PositionalParameter>,
        flags_schema: FlagsSchema,
        decoder: Decoder,
        policy: CoercionPolicy,
    ) -> Self {
        Self {
            positional_parameters,
            flags_schema,
            decoder,
            policy,
        }
    }

    /// A procedure that takes no input.
    pub fn empty(policy: CoercionPolicy) -> Self {
        Self::new(Vec::new(), FlagsSchema::empty(), Decoder::Empty, policy)
    }

    /// Rebuild the call arguments the procedure expects from decoded argv.
    ///
    /// Pure: the same argv always yields the same value.
    pub fn get_pojo_input(&self, argv: &DecodedArgv) -> Result<Value, CliValidationError> {
        self.decoder.decode(argv, self.policy)
    }

    /// The coercion policy positional values are decoded with.
    pub fn policy(&self) -> CoercionPolicy {
        self.policy
    }

    /// Returns true if the procedure takes named options.
    pub fn has_flags(&self) -> bool {
        !self.flags_schema.is_empty()
    }

    /// Usage line fragment, e.g. `<name> [count] [options]`.
    pub fn usage(&self) -> String {
        let mut parts: Vec<String> = self
            .positional_parameters
            .iter()
            .map(PositionalParameter::rendered)
            .collect();
        if self.has_flags() {
            parts.push("[options]".to_string());
        }
        parts.join(" ")
    }
}

/// Compile the inputs of a procedure.
///
/// No inputs yields an empty procedure, more than one is merged.
pub fn compile_inputs(
    inputs: &[SchemaNode],
    policy: CoercionPolicy,
) -> Result<CompiledProcedure, SchemaIncompatibility> {
    match inputs {
        [] => Ok(CompiledProcedure::empty(policy)),
        [input] => compile_schema(input, policy),
        inputs => merge_inputs(inputs, policy),
    }
}

/// Compile a single input schema.
pub fn compile_schema(
    node: &SchemaNode,
    policy: CoercionPolicy,
) -> Result<CompiledProcedure, SchemaIncompatibility> {
    let classified = classify(node)?;
    tracing::debug!(shape = %node.type_display(), ?classified, "classified input");
    let named = annotated_node(node);

    match classified {
        Classified::Primitive { node, optional } => {
            let name = naming::primitive_input_name(named);
            let parameter = PositionalParameter {
                name: name.clone(),
                description: named.description.clone().unwrap_or_default(),
                ty: type_label(node),
                required: !optional,
                array: false,
            };
            let slot = PositionalSlot {
                schema: node.clone(),
                array: false,
                required: !optional,
                label: name,
            };
            Ok(CompiledProcedure::new(
                vec![parameter],
                FlagsSchema::empty(),
                Decoder::Scalar(slot),
                policy,
            ))
        }
        Classified::Array {
            node,
            element,
            optional,
        } => {
            if !is_primitive(element) {
                return Err(SchemaIncompatibility::non_primitive_array(node));
            }
            let name = naming::array_parameter_name(node, element, 0);
            let parameter = PositionalParameter {
                name: name.clone(),
                description: node
                    .description
                    .clone()
                    .or_else(|| element.description.clone())
                    .unwrap_or_default(),
                ty: type_label(element),
                required: !optional,
                array: true,
            };
            let slot = PositionalSlot {
                schema: element.clone(),
                array: true,
                required: !optional,
                label: name,
            };
            Ok(CompiledProcedure::new(
                vec![parameter],
                FlagsSchema::empty(),
                Decoder::Array(slot),
                policy,
            ))
        }
        Classified::Tuple { node, items, .. } => {
            let partition = partition(node, items)?;
            let trailing_flags = partition.flags.is_some();
            Ok(CompiledProcedure::new(
                partition.parameters,
                partition.flags.unwrap_or_default(),
                Decoder::Tuple {
                    slots: partition.slots,
                    trailing_flags,
                },
                policy,
            ))
        }
        Classified::Object { node } | Classified::UnionOfObjects { node } => {
            Ok(CompiledProcedure::new(
                Vec::new(),
                FlagsSchema::new(node.clone()),
                Decoder::Options,
                policy,
            ))
        }
    }
}
