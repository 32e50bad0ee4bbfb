//! Decode operation - turn command-line values into a call input.

use eyre::Result;
use procli_ir::{DecodedArgv, PositionalParameter, PositionalValue};
use procli_manifest::Manifest;
use serde_json::{Map, Value};

use super::compile_procedure;
use crate::reports::DecodeReport;

/// What the parser produced for one invocation.
pub enum DecodeInput {
    /// Raw positional tokens plus named options.
    Values {
        values: Vec<String>,
        options: Map<String, Value>,
    },
    /// An already grouped argv.
    Argv(DecodedArgv),
}

/// Execute the decode operation.
///
/// CLI validation failures are returned as a [`procli_compiler::CliValidationError`]
/// that callers can downcast to.
pub fn decode(manifest: &Manifest, name: &str, input: DecodeInput) -> Result<DecodeReport> {
    let compiled = compile_procedure(manifest, name)?;

    let argv = match input {
        DecodeInput::Argv(argv) => argv,
        DecodeInput::Values { values, options } => DecodedArgv {
            positional_values: group_positionals(&compiled.positional_parameters, values),
            options,
        },
    };
    tracing::debug!(procedure = name, ?argv, "decoding argv");

    let input = compiled.get_pojo_input(&argv)?;
    Ok(DecodeReport { input })
}

/// Group raw tokens by parameter.
///
/// An array parameter takes every remaining token. Tokens beyond the last
/// parameter are kept as extra slots.
pub fn group_positionals(
    parameters: &[PositionalParameter],
    values: Vec<String>,
) -> Vec<PositionalValue> {
    let mut tokens = values.into_iter();
    let mut grouped = Vec::with_capacity(parameters.len());

    for parameter in parameters {
        if parameter.array {
            grouped.push(PositionalValue::Many(tokens.by_ref().collect()));
        } else {
            grouped.push(match tokens.next() {
                Some(token) => PositionalValue::Single(token),
                None => PositionalValue::Missing,
            });
        }
    }
    grouped.extend(tokens.map(PositionalValue::Single));
    grouped
}
