//! Structural schema IR.
//!
//! Every schema adapter lowers its vendor format into a [`SchemaNode`]. The
//! compiler never looks at anything else.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// One node of an input schema.
///
/// The node's structure lives in [`Shape`]; the remaining fields are
/// annotations that apply to whatever shape the node has.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// Structural shape of the node.
    #[serde(flatten)]
    pub shape: Shape,
    /// Explicit optional marker set by the adapter.
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
    /// Default value, which also makes the node optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Human-readable title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description for help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// The structural shape of a schema node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Accepts any value.
    Any,
    /// Accepts nothing. Used as the placeholder branch of optional wrappers.
    Never,
    Null,
    Boolean,
    Number,
    Integer,
    String,
    /// Exactly one value.
    Literal { value: Value },
    /// One of several values.
    Enum { values: Vec<Value> },
    /// Homogeneous list.
    Array { items: Box<SchemaNode> },
    /// Fixed-length ordered list.
    Tuple { items: Vec<SchemaNode> },
    Object(ObjectShape),
    /// Union over shapes.
    AnyOf { variants: Vec<SchemaNode> },
    /// Intersection of shapes.
    AllOf { branches: Vec<SchemaNode> },
}

/// Properties of an object-shaped node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectShape {
    /// Properties in declaration order.
    #[serde(default)]
    pub properties: IndexMap<String, SchemaNode>,
    /// Names of required properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Whether properties beyond `properties` are accepted.
    #[serde(default, skip_serializing_if = "is_false")]
    pub additional_properties: bool,
}

impl ObjectShape {
    /// Create an empty object shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property, optionally marking it required.
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        node: SchemaNode,
        required: bool,
    ) -> Self {
        let name = name.into();
        if required && !self.required.contains(&name) {
            self.required.push(name.clone());
        }
        self.properties.insert(name, node);
        self
    }

    /// Returns true if the named property is required.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

/// JSON type names accepted by a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeName {
    String,
    Number,
    Integer,
    Boolean,
    Null,
    Array,
    Object,
}

impl TypeName {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeName::String => "string",
            TypeName::Number => "number",
            TypeName::Integer => "integer",
            TypeName::Boolean => "boolean",
            TypeName::Null => "null",
            TypeName::Array => "array",
            TypeName::Object => "object",
        }
    }

    /// Returns true for string, number, integer and boolean.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            TypeName::String | TypeName::Number | TypeName::Integer | TypeName::Boolean
        )
    }

    /// The type a JSON value belongs to.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => TypeName::Null,
            Value::Bool(_) => TypeName::Boolean,
            Value::Number(_) => TypeName::Number,
            Value::String(_) => TypeName::String,
            Value::Array(_) => TypeName::Array,
            Value::Object(_) => TypeName::Object,
        }
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SchemaNode {
    /// Create a node with the given shape and no annotations.
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            optional: false,
            default: None,
            title: None,
            description: None,
        }
    }

    pub fn any() -> Self {
        Self::new(Shape::Any)
    }

    pub fn never() -> Self {
        Self::new(Shape::Never)
    }

    pub fn null() -> Self {
        Self::new(Shape::Null)
    }

    pub fn boolean() -> Self {
        Self::new(Shape::Boolean)
    }

    pub fn number() -> Self {
        Self::new(Shape::Number)
    }

    pub fn integer() -> Self {
        Self::new(Shape::Integer)
    }

    pub fn string() -> Self {
        Self::new(Shape::String)
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Self::new(Shape::Literal {
            value: value.into(),
        })
    }

    pub fn enumeration(values: impl IntoIterator<Item = Value>) -> Self {
        Self::new(Shape::Enum {
            values: values.into_iter().collect(),
        })
    }

    pub fn array(items: SchemaNode) -> Self {
        Self::new(Shape::Array {
            items: Box::new(items),
        })
    }

    pub fn tuple(items: impl IntoIterator<Item = SchemaNode>) -> Self {
        Self::new(Shape::Tuple {
            items: items.into_iter().collect(),
        })
    }

    pub fn object(shape: ObjectShape) -> Self {
        Self::new(Shape::Object(shape))
    }

    pub fn any_of(variants: impl IntoIterator<Item = SchemaNode>) -> Self {
        Self::new(Shape::AnyOf {
            variants: variants.into_iter().collect(),
        })
    }

    pub fn all_of(branches: impl IntoIterator<Item = SchemaNode>) -> Self {
        Self::new(Shape::AllOf {
            branches: branches.into_iter().collect(),
        })
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the default value.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Set the explicit optional marker.
    pub fn mark_optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// JSON types this node accepts, in first-seen order.
    ///
    /// `Any` and `Never` accept no nameable type and return an empty list.
    pub fn accepted_types(&self) -> Vec<TypeName> {
        let mut types = Vec::new();
        self.collect_types(&mut types);
        types
    }

    fn collect_types(&self, out: &mut Vec<TypeName>) {
        match &self.shape {
            Shape::Any | Shape::Never => {}
            Shape::Null => push_unique(out, TypeName::Null),
            Shape::Boolean => push_unique(out, TypeName::Boolean),
            Shape::Number => push_unique(out, TypeName::Number),
            Shape::Integer => push_unique(out, TypeName::Integer),
            Shape::String => push_unique(out, TypeName::String),
            Shape::Literal { value } => push_unique(out, TypeName::of(value)),
            Shape::Enum { values } => {
                for value in values {
                    push_unique(out, TypeName::of(value));
                }
            }
            Shape::Array { .. } | Shape::Tuple { .. } => push_unique(out, TypeName::Array),
            Shape::Object(_) => push_unique(out, TypeName::Object),
            Shape::AnyOf { variants } => {
                for variant in variants {
                    variant.collect_types(out);
                }
            }
            Shape::AllOf { branches } => {
                // Intersection of the branches that name at least one type.
                let sets: Vec<_> = branches
                    .iter()
                    .map(SchemaNode::accepted_types)
                    .filter(|set| !set.is_empty())
                    .collect();
                if let Some((first, rest)) = sets.split_first() {
                    for ty in first {
                        if rest.iter().all(|set| set.contains(ty)) {
                            push_unique(out, *ty);
                        }
                    }
                }
            }
        }
    }

    /// Returns true if null is an accepted value.
    pub fn accepts_null(&self) -> bool {
        self.accepted_types().contains(&TypeName::Null)
    }

    /// Short human-readable rendering of the node's type, used in messages.
    pub fn type_display(&self) -> String {
        match &self.shape {
            Shape::Any => "unknown".to_string(),
            Shape::Never => "never".to_string(),
            Shape::Literal { value } => value.to_string(),
            Shape::Enum { values } => values
                .iter()
                .map(Value::to_string)
                .collect::<Vec<_>>()
                .join(" | "),
            Shape::Array { items } => format!("Array<{}>", items.type_display()),
            Shape::Tuple { items } => format!(
                "[{}]",
                items
                    .iter()
                    .map(SchemaNode::type_display)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Shape::Object(_) => "object".to_string(),
            Shape::AnyOf { variants } => variants
                .iter()
                .map(SchemaNode::type_display)
                .collect::<Vec<_>>()
                .join(" | "),
            Shape::AllOf { branches } => branches
                .iter()
                .map(SchemaNode::type_display)
                .collect::<Vec<_>>()
                .join(" & "),
            Shape::Null | Shape::Boolean | Shape::Number | Shape::Integer | Shape::String => self
                .accepted_types()
                .first()
                .map(TypeName::to_string)
                .unwrap_or_default(),
        }
    }

    /// Render the node as a JSON Schema document.
    pub fn to_json_schema(&self) -> Value {
        let mut schema = match &self.shape {
            Shape::Any => Map::new(),
            Shape::Never => object(json!({ "not": {} })),
            Shape::Null | Shape::Boolean | Shape::Number | Shape::Integer | Shape::String => {
                object(json!({ "type": self.type_display() }))
            }
            Shape::Literal { value } => object(json!({ "const": value })),
            Shape::Enum { values } => object(json!({ "enum": values })),
            Shape::Array { items } => {
                object(json!({ "type": "array", "items": items.to_json_schema() }))
            }
            Shape::Tuple { items } => {
                let min_items = items.iter().take_while(|item| !item.optional).count();
                object(json!({
                    "type": "array",
                    "items": items.iter().map(SchemaNode::to_json_schema).collect::<Vec<_>>(),
                    "minItems": min_items,
                    "maxItems": items.len(),
                }))
            }
            Shape::Object(shape) => {
                let properties: Map<String, Value> = shape
                    .properties
                    .iter()
                    .map(|(name, node)| (name.clone(), node.to_json_schema()))
                    .collect();
                let mut schema = object(json!({ "type": "object", "properties": properties }));
                if !shape.required.is_empty() {
                    schema.insert("required".into(), json!(shape.required));
                }
                if shape.additional_properties {
                    schema.insert("additionalProperties".into(), Value::Bool(true));
                }
                schema
            }
            Shape::AnyOf { variants } => object(json!({
                "anyOf": variants.iter().map(SchemaNode::to_json_schema).collect::<Vec<_>>()
            })),
            Shape::AllOf { branches } => object(json!({
                "allOf": branches.iter().map(SchemaNode::to_json_schema).collect::<Vec<_>>()
            })),
        };

        if let Some(title) = &self.title {
            schema.insert("title".into(), Value::String(title.clone()));
        }
        if let Some(description) = &self.description {
            schema.insert("description".into(), Value::String(description.clone()));
        }
        if let Some(default) = &self.default {
            schema.insert("default".into(), default.clone());
        }
        Value::Object(schema)
    }
}

fn push_unique(out: &mut Vec<TypeName>, ty: TypeName) {
    if !out.contains(&ty) {
        out.push(ty);
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_types_union() {
        let node = SchemaNode::any_of([
            SchemaNode::string(),
            SchemaNode::number(),
            SchemaNode::string(),
        ]);
        assert_eq!(
            node.accepted_types(),
            vec![TypeName::String, TypeName::Number]
        );
    }

    #[test]
    fn test_accepted_types_literal_and_enum() {
        assert_eq!(
            SchemaNode::literal(5).accepted_types(),
            vec![TypeName::Number]
        );
        let node = SchemaNode::enumeration([json!("a"), json!(null)]);
        assert_eq!(
            node.accepted_types(),
            vec![TypeName::String, TypeName::Null]
        );
        assert!(node.accepts_null());
    }

    #[test]
    fn test_accepted_types_all_of_intersects() {
        let node = SchemaNode::all_of([
            SchemaNode::any_of([SchemaNode::string(), SchemaNode::number()]),
            SchemaNode::number(),
            SchemaNode::any(),
        ]);
        assert_eq!(node.accepted_types(), vec![TypeName::Number]);
    }

    #[test]
    fn test_type_display() {
        let node = SchemaNode::tuple([
            SchemaNode::string(),
            SchemaNode::array(SchemaNode::number()),
            SchemaNode::object(ObjectShape::new()),
        ]);
        assert_eq!(node.type_display(), "[string, Array<number>, object]");
        assert_eq!(
            SchemaNode::any_of([SchemaNode::string(), SchemaNode::null()]).type_display(),
            "string | null"
        );
    }

    #[test]
    fn test_object_shape_required_dedup() {
        let shape = ObjectShape::new()
            .with_property("foo", SchemaNode::string(), true)
            .with_property("foo", SchemaNode::number(), true)
            .with_property("bar", SchemaNode::string(), false);
        assert_eq!(shape.required, vec!["foo".to_string()]);
        assert!(shape.is_required("foo"));
        assert!(!shape.is_required("bar"));
        assert_eq!(shape.properties["foo"], SchemaNode::number());
    }

    #[test]
    fn test_serde_form() {
        let node = SchemaNode::object(
            ObjectShape::new().with_property("foo", SchemaNode::string(), true),
        )
        .with_description("Options");
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            json!({
                "kind": "object",
                "properties": { "foo": { "kind": "string" } },
                "required": ["foo"],
                "description": "Options"
            })
        );
        let back: SchemaNode = serde_json::from_value(value).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn test_to_json_schema_object() {
        let node = SchemaNode::object(
            ObjectShape::new()
                .with_property("foo", SchemaNode::string(), true)
                .with_property("n", SchemaNode::integer().with_default(3), false),
        );
        assert_eq!(
            node.to_json_schema(),
            json!({
                "type": "object",
                "properties": {
                    "foo": { "type": "string" },
                    "n": { "type": "integer", "default": 3 }
                },
                "required": ["foo"]
            })
        );
    }

    #[test]
    fn test_to_json_schema_tuple_min_items() {
        let node = SchemaNode::tuple([
            SchemaNode::string(),
            SchemaNode::number().mark_optional(),
        ]);
        assert_eq!(
            node.to_json_schema(),
            json!({
                "type": "array",
                "items": [{ "type": "string" }, { "type": "number" }],
                "minItems": 1,
                "maxItems": 2
            })
        );
    }
}
