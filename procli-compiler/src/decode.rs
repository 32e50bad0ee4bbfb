//! Reconstruction of call arguments from decoded argv.

use procli_ir::{DecodedArgv, PositionalValue, SchemaNode};
use serde_json::Value;

use crate::{
    coerce::{CoercionPolicy, coerce},
    error::CliValidationError,
};

/// One positional parameter as the decoder sees it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PositionalSlot {
    /// Schema values are coerced against (the element schema for arrays).
    pub schema: SchemaNode,
    pub array: bool,
    pub required: bool,
    /// Parameter name, for error messages.
    pub label: String,
}

/// How a compiled procedure rebuilds its call arguments.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Decoder {
    /// No inputs: the call receives `{}`.
    Empty,
    /// A bare scalar.
    Scalar(PositionalSlot),
    /// A bare array.
    Array(PositionalSlot),
    /// `[...positionals, flags?]`.
    Tuple {
        slots: Vec<PositionalSlot>,
        trailing_flags: bool,
    },
    /// The options object, as is.
    Options,
}

impl Decoder {
    pub(crate) fn decode(
        &self,
        argv: &DecodedArgv,
        policy: CoercionPolicy,
    ) -> Result<Value, CliValidationError> {
        match self {
            Decoder::Empty => {
                check_arity(argv, 0)?;
                Ok(Value::Object(Default::default()))
            }
            Decoder::Options => {
                check_arity(argv, 0)?;
                Ok(Value::Object(argv.options.clone()))
            }
            Decoder::Scalar(slot) | Decoder::Array(slot) => {
                check_arity(argv, 1)?;
                let value = positional(argv, 0);
                Ok(decode_slot(slot, 0, value, policy)?.unwrap_or(Value::Null))
            }
            Decoder::Tuple {
                slots,
                trailing_flags,
            } => {
                check_arity(argv, slots.len())?;

                // None marks an omitted optional scalar.
                let mut values = slots
                    .iter()
                    .enumerate()
                    .map(|(index, slot)| decode_slot(slot, index, positional(argv, index), policy))
                    .collect::<Result<Vec<_>, _>>()?;

                if !trailing_flags {
                    while matches!(values.last(), Some(None)) {
                        values.pop();
                    }
                }

                let mut args: Vec<Value> = values
                    .into_iter()
                    .map(|value| value.unwrap_or(Value::Null))
                    .collect();
                if *trailing_flags {
                    args.push(Value::Object(argv.options.clone()));
                }
                Ok(Value::Array(args))
            }
        }
    }
}

fn check_arity(argv: &DecodedArgv, expected: usize) -> Result<(), CliValidationError> {
    let actual = argv
        .positional_values
        .iter()
        .rposition(|value| !matches!(value, PositionalValue::Missing))
        .map_or(0, |last| last + 1);
    if actual > expected {
        return Err(CliValidationError::TooManyPositionals { expected, actual });
    }
    Ok(())
}

static MISSING: PositionalValue = PositionalValue::Missing;

fn positional(argv: &DecodedArgv, index: usize) -> &PositionalValue {
    argv.positional_values.get(index).unwrap_or(&MISSING)
}

/// Decode one slot. `Ok(None)` means an omitted optional scalar.
fn decode_slot(
    slot: &PositionalSlot,
    index: usize,
    value: &PositionalValue,
    policy: CoercionPolicy,
) -> Result<Option<Value>, CliValidationError> {
    let position = index + 1;
    match (value, slot.array) {
        (PositionalValue::Single(raw), false) => Ok(Some(coerce(&slot.schema, raw, policy))),
        (PositionalValue::Many(raws), true) => Ok(Some(Value::Array(
            raws.iter()
                .map(|raw| coerce(&slot.schema, raw, policy))
                .collect(),
        ))),
        (PositionalValue::Single(_), true) => Err(CliValidationError::ExpectedArray { position }),
        (PositionalValue::Many(_), false) => Err(CliValidationError::ExpectedSingle { position }),
        (PositionalValue::Missing, _) if slot.required => {
            Err(CliValidationError::MissingPositional {
                position,
                name: slot.label.clone(),
            })
        }
        (PositionalValue::Missing, true) => Ok(Some(Value::Array(Vec::new()))),
        (PositionalValue::Missing, false) => Ok(None),
    }
}
