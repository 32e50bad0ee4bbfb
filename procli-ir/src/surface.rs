//! Compiled CLI surface types.
//!
//! These are what a CLI renderer or an interactive prompter consumes: an
//! ordered list of positional parameters, a flags schema, and the decoded
//! argv shape handed back to the compiled procedure.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{SchemaNode, Shape};

/// A CLI argument supplied by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionalParameter {
    /// Cleaned parameter name, without brackets.
    pub name: String,
    /// Description for help text (empty if none).
    pub description: String,
    /// Accepted types for display and parser selection (e.g. "string | number").
    #[serde(rename = "type")]
    pub ty: String,
    /// Whether a value must be supplied.
    pub required: bool,
    /// Whether the parameter collects all remaining values.
    pub array: bool,
}

impl PositionalParameter {
    /// Render the parameter for usage lines: `<name>`, `[name]` or `[name...]`.
    pub fn rendered(&self) -> String {
        if self.array {
            format!("[{}...]", self.name)
        } else if self.required {
            format!("<{}>", self.name)
        } else {
            format!("[{}]", self.name)
        }
    }
}

/// Object-shaped schema describing the named options of a procedure.
///
/// Either empty, a single object (or union of objects), or an intersection of
/// several object schemas produced by merging multiple inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FlagsSchema(SchemaNode);

/// One named option, flattened out of a [`FlagsSchema`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlagDescriptor<'a> {
    pub name: &'a str,
    pub schema: &'a SchemaNode,
    pub required: bool,
}

impl FlagsSchema {
    /// Wrap an object-shaped node.
    pub fn new(node: SchemaNode) -> Self {
        Self(node)
    }

    /// A flags schema with no options.
    pub fn empty() -> Self {
        Self(SchemaNode::any())
    }

    /// Returns true if there is no flags schema at all.
    pub fn is_empty(&self) -> bool {
        matches!(self.0.shape, Shape::Any)
    }

    /// Get the underlying node.
    pub fn node(&self) -> &SchemaNode {
        &self.0
    }

    /// Consume the schema, returning the underlying node.
    pub fn into_node(self) -> SchemaNode {
        self.0
    }

    /// All options across every branch, in first-declaration order.
    ///
    /// When two branches declare the same name, the last declaration's schema
    /// is reported.
    pub fn flags(&self) -> Vec<FlagDescriptor<'_>> {
        let mut properties = IndexMap::new();
        collect_properties(&self.0, &mut properties);
        properties
            .into_iter()
            .map(|(name, schema)| FlagDescriptor {
                name,
                schema,
                required: self.is_required(name),
            })
            .collect()
    }

    /// Look up a single option by name.
    pub fn flag(&self, name: &str) -> Option<FlagDescriptor<'_>> {
        self.flags().into_iter().find(|flag| flag.name == name)
    }

    /// Whether the named option is required.
    ///
    /// An intersection requires the option if any branch does, a union only if
    /// every branch does.
    pub fn is_required(&self, name: &str) -> bool {
        required_in(&self.0, name)
    }

    /// Render as a JSON Schema document.
    pub fn to_json_schema(&self) -> Value {
        self.0.to_json_schema()
    }
}

impl Default for FlagsSchema {
    fn default() -> Self {
        Self::empty()
    }
}

fn collect_properties<'a>(node: &'a SchemaNode, out: &mut IndexMap<&'a str, &'a SchemaNode>) {
    match &node.shape {
        Shape::Object(shape) => {
            for (name, property) in &shape.properties {
                out.insert(name.as_str(), property);
            }
        }
        Shape::AnyOf { variants } => variants.iter().for_each(|v| collect_properties(v, out)),
        Shape::AllOf { branches } => branches.iter().for_each(|b| collect_properties(b, out)),
        _ => {}
    }
}

fn required_in(node: &SchemaNode, name: &str) -> bool {
    match &node.shape {
        Shape::Object(shape) => shape.is_required(name),
        Shape::AllOf { branches } => branches.iter().any(|b| required_in(b, name)),
        Shape::AnyOf { variants } => {
            !variants.is_empty() && variants.iter().all(|v| required_in(v, name))
        }
        _ => false,
    }
}

/// One positional slot of decoded argv.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PositionalValue {
    Single(String),
    Many(Vec<String>),
    /// The parser saw no value for this slot.
    Missing,
}

/// Values produced by the argument parser for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedArgv {
    /// Positional values in parameter order.
    #[serde(default)]
    pub positional_values: Vec<PositionalValue>,
    /// Named option values.
    #[serde(default)]
    pub options: Map<String, Value>,
}

impl DecodedArgv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single positional value.
    pub fn positional(mut self, value: impl Into<String>) -> Self {
        self.positional_values
            .push(PositionalValue::Single(value.into()));
        self
    }

    /// Append a list of positional values for a variadic parameter.
    pub fn variadic<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.positional_values.push(PositionalValue::Many(
            values.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Append an empty slot.
    pub fn missing(mut self) -> Self {
        self.positional_values.push(PositionalValue::Missing);
        self
    }

    /// Set a named option.
    pub fn option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ObjectShape;

    fn positional(name: &str, required: bool, array: bool) -> PositionalParameter {
        PositionalParameter {
            name: name.into(),
            description: String::new(),
            ty: "string".into(),
            required,
            array,
        }
    }

    #[test]
    fn test_rendered() {
        assert_eq!(positional("file", true, false).rendered(), "<file>");
        assert_eq!(positional("file", false, false).rendered(), "[file]");
        assert_eq!(positional("files", true, true).rendered(), "[files...]");
        assert_eq!(positional("files", false, true).rendered(), "[files...]");
    }

    #[test]
    fn test_empty_flags() {
        let flags = FlagsSchema::empty();
        assert!(flags.is_empty());
        assert!(flags.flags().is_empty());
        assert_eq!(flags.to_json_schema(), json!({}));
    }

    #[test]
    fn test_flags_across_all_of_branches() {
        let flags = FlagsSchema::new(SchemaNode::all_of([
            SchemaNode::object(
                ObjectShape::new()
                    .with_property("bar", SchemaNode::string(), true)
                    .with_property("shared", SchemaNode::string(), false),
            ),
            SchemaNode::object(
                ObjectShape::new()
                    .with_property("baz", SchemaNode::number(), false)
                    .with_property("shared", SchemaNode::number(), true),
            ),
        ]));

        let flags = flags.flags();
        let names: Vec<_> = flags.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["bar", "shared", "baz"]);
        assert!(flags[0].required);
        assert!(flags[1].required);
        assert!(!flags[2].required);
        assert_eq!(flags[1].schema, &SchemaNode::number());
    }

    #[test]
    fn test_union_requires_flag_in_every_variant() {
        let flags = FlagsSchema::new(SchemaNode::any_of([
            SchemaNode::object(
                ObjectShape::new()
                    .with_property("id", SchemaNode::string(), true)
                    .with_property("name", SchemaNode::string(), true),
            ),
            SchemaNode::object(ObjectShape::new().with_property("id", SchemaNode::string(), true)),
        ]));
        assert!(flags.is_required("id"));
        assert!(!flags.is_required("name"));
        assert!(flags.flag("name").is_some());
        assert!(flags.flag("missing").is_none());
    }

    #[test]
    fn test_decoded_argv_from_json() {
        let argv: DecodedArgv = serde_json::from_value(json!({
            "positionalValues": ["hello", ["1", "2"], null],
            "options": { "foo": "bar" }
        }))
        .unwrap();

        assert_eq!(
            argv,
            DecodedArgv::new()
                .positional("hello")
                .variadic(["1", "2"])
                .missing()
                .option("foo", "bar")
        );
    }
}
