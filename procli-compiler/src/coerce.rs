//! Best-effort string-to-value coercion for positional values.
//!
//! Coercion never validates. It only picks the most plausible JSON type for a
//! raw argument, leaving the verdict to the procedure's own schema.

use once_cell::sync::Lazy;
use procli_ir::{SchemaNode, TypeName};
use procli_manifest::CoercionConfig;
use regex::Regex;
use serde_json::{Number, Value};

static DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").unwrap());

/// Largest integer an IEEE double represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Knobs for [`coerce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoercionPolicy {
    /// When an integer is expected (and a string is not), forward a
    /// non-integral number such as `1.5` instead of the raw string, so the
    /// procedure's validator reports "expected integer" rather than a type
    /// mismatch.
    pub forward_non_integral: bool,
}

impl CoercionPolicy {
    /// Never forward values that cannot have the expected type.
    pub const STRICT: Self = Self {
        forward_non_integral: false,
    };
}

impl Default for CoercionPolicy {
    fn default() -> Self {
        Self {
            forward_non_integral: true,
        }
    }
}

impl From<CoercionConfig> for CoercionPolicy {
    fn from(config: CoercionConfig) -> Self {
        Self {
            forward_non_integral: config.forward_non_integral,
        }
    }
}

/// Coerce a raw argument to the type `node` accepts.
///
/// Conversions are tried in order (boolean, number, integer) and only for
/// types the node accepts. If none applies the raw string is returned
/// unchanged.
pub fn coerce(node: &SchemaNode, raw: &str, policy: CoercionPolicy) -> Value {
    let types = node.accepted_types();
    let accepts = |ty: TypeName| types.contains(&ty);

    if accepts(TypeName::Boolean) {
        match raw {
            "true" => return Value::Bool(true),
            "false" => return Value::Bool(false),
            _ => {}
        }
    }

    let parsed = parse_js_number(raw).filter(|n| n.is_finite());

    if accepts(TypeName::Number)
        && let Some(n) = parsed
    {
        return number_value(n);
    }

    if accepts(TypeName::Integer)
        && let Some(n) = parsed
    {
        if n.fract() == 0.0 {
            return number_value(n);
        }
        if policy.forward_non_integral && !accepts(TypeName::String) {
            tracing::trace!(raw, "forwarding non-integral number for integer parameter");
            return number_value(n);
        }
    }

    Value::String(raw.to_string())
}

/// Parse a string the way JavaScript's `Number()` does, except that blank
/// input is not a number.
///
/// Accepts surrounding whitespace, an optional sign, fractions, exponents,
/// `0x`/`0o`/`0b` prefixes and `Infinity`.
pub fn parse_js_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let prefixed = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)];
    for (prefix, radix) in prefixed {
        if let Some(digits) = s.strip_prefix(prefix) {
            return parse_radix(digits, radix);
        }
    }

    if DECIMAL.is_match(s) {
        s.parse::<f64>().ok()
    } else {
        None
    }
}

fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

/// Integral values within the exact range serialize as JSON integers.
fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Value::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map_or_else(|| Value::String(n.to_string()), Value::Number)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn lenient(node: &SchemaNode, raw: &str) -> Value {
        coerce(node, raw, CoercionPolicy::default())
    }

    #[test]
    fn test_parse_js_number() {
        assert_eq!(parse_js_number("123"), Some(123.0));
        assert_eq!(parse_js_number("  -1.5e2 "), Some(-150.0));
        assert_eq!(parse_js_number(".5"), Some(0.5));
        assert_eq!(parse_js_number("5."), Some(5.0));
        assert_eq!(parse_js_number("0x1F"), Some(31.0));
        assert_eq!(parse_js_number("0b101"), Some(5.0));
        assert_eq!(parse_js_number("0o17"), Some(15.0));
        assert_eq!(parse_js_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_js_number(""), None);
        assert_eq!(parse_js_number("   "), None);
        assert_eq!(parse_js_number("abc"), None);
        assert_eq!(parse_js_number("1_000"), None);
        assert_eq!(parse_js_number("0x"), None);
        assert_eq!(parse_js_number("-0x10"), None);
        assert_eq!(parse_js_number("inf"), None);
        assert_eq!(parse_js_number("NaN"), None);
    }

    #[test]
    fn test_boolean() {
        let node = SchemaNode::boolean();
        assert_eq!(lenient(&node, "true"), json!(true));
        assert_eq!(lenient(&node, "false"), json!(false));
        assert_eq!(lenient(&node, "True"), json!("True"));
        assert_eq!(lenient(&node, "1"), json!("1"));
    }

    #[test]
    fn test_number() {
        let node = SchemaNode::number();
        assert_eq!(lenient(&node, "123"), json!(123));
        assert_eq!(lenient(&node, "1.25"), json!(1.25));
        assert_eq!(lenient(&node, "abc"), json!("abc"));
        assert_eq!(lenient(&node, "Infinity"), json!("Infinity"));
        assert_eq!(lenient(&node, ""), json!(""));
    }

    #[test]
    fn test_integer_forwarding_policy() {
        let node = SchemaNode::integer();
        assert_eq!(lenient(&node, "42"), json!(42));
        assert_eq!(lenient(&node, "1.5"), json!(1.5));
        assert_eq!(coerce(&node, "1.5", CoercionPolicy::STRICT), json!("1.5"));
        assert_eq!(coerce(&node, "42", CoercionPolicy::STRICT), json!(42));
    }

    #[test]
    fn test_integer_or_string_keeps_non_integral_string() {
        let node = SchemaNode::any_of([SchemaNode::integer(), SchemaNode::string()]);
        assert_eq!(lenient(&node, "7"), json!(7));
        assert_eq!(lenient(&node, "1.5"), json!("1.5"));
    }

    #[test]
    fn test_string_is_untouched() {
        let node = SchemaNode::string();
        assert_eq!(lenient(&node, "123"), json!("123"));
        assert_eq!(lenient(&node, "true"), json!("true"));
    }

    #[test]
    fn test_union_prefers_typed_conversion() {
        let node = SchemaNode::any_of([
            SchemaNode::string(),
            SchemaNode::number(),
            SchemaNode::boolean(),
        ]);
        assert_eq!(lenient(&node, "12"), json!(12));
        assert_eq!(lenient(&node, "false"), json!(false));
        assert_eq!(lenient(&node, "hello"), json!("hello"));
    }

    #[test]
    fn test_literals_follow_their_value_type() {
        assert_eq!(lenient(&SchemaNode::literal(5), "5"), json!(5));
        assert_eq!(lenient(&SchemaNode::literal("5"), "5"), json!("5"));
        let node = SchemaNode::enumeration([json!(true), json!("auto")]);
        assert_eq!(lenient(&node, "true"), json!(true));
        assert_eq!(lenient(&node, "auto"), json!("auto"));
    }

    #[test]
    fn test_large_integers_stay_floats() {
        let node = SchemaNode::number();
        assert_eq!(lenient(&node, "1e300"), json!(1e300));
    }
}
