//! JSON Schema adapter.

use procli_ir::{ObjectShape, SchemaNode, Shape};
use serde_json::{Map, Value};

use super::SchemaAdapter;
use crate::error::SchemaIncompatibility;

/// Adapter for JSON Schema documents (draft-07 style, plus `prefixItems`).
///
/// Beyond the standard keywords it understands an `optional: true`
/// extension, and turns the `{"anyOf": [{"not": {}}, X]}` wrapper some
/// generators emit for optional values into `X` marked optional.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaAdapter;

impl SchemaAdapter for JsonSchemaAdapter {
    fn vendor(&self) -> &'static str {
        "json-schema"
    }

    fn to_ir(&self, schema: &Value) -> Result<SchemaNode, SchemaIncompatibility> {
        convert(schema)
    }
}

fn convert(schema: &Value) -> Result<SchemaNode, SchemaIncompatibility> {
    let map = match schema {
        Value::Bool(true) => return Ok(SchemaNode::any()),
        Value::Bool(false) => return Ok(SchemaNode::never()),
        Value::Object(map) => map,
        other => {
            return Err(SchemaIncompatibility::new(format!(
                "Invalid JSON Schema: expected an object or boolean, got {other}."
            )));
        }
    };

    let mut node = match optional_wrapper(map) {
        Some(inner) => convert(inner)?.mark_optional(),
        None => SchemaNode::new(convert_shape(map)?),
    };

    if map.get("optional") == Some(&Value::Bool(true)) {
        node.optional = true;
    }
    if let Some(default) = map.get("default") {
        node.default = Some(default.clone());
    }
    if let Some(title) = map.get("title").and_then(Value::as_str) {
        node.title = Some(title.to_string());
    }
    if let Some(description) = map.get("description").and_then(Value::as_str) {
        node.description = Some(description.to_string());
    }
    Ok(node)
}

/// `{"anyOf": [{"not": {}}, X]}` yields `X`.
fn optional_wrapper(map: &Map<String, Value>) -> Option<&Value> {
    match map.get("anyOf")?.as_array()?.as_slice() {
        [never, inner] if is_never(never) => Some(inner),
        _ => None,
    }
}

fn is_never(schema: &Value) -> bool {
    match schema {
        Value::Bool(false) => true,
        Value::Object(map) => {
            map.len() == 1 && map.get("not").is_some_and(is_empty_schema)
        }
        _ => false,
    }
}

fn is_empty_schema(schema: &Value) -> bool {
    match schema {
        Value::Object(map) => map.is_empty(),
        Value::Bool(b) => *b,
        _ => false,
    }
}

fn convert_shape(map: &Map<String, Value>) -> Result<Shape, SchemaIncompatibility> {
    if let Some(value) = map.get("const") {
        return Ok(Shape::Literal {
            value: value.clone(),
        });
    }

    if let Some(values) = map.get("enum").and_then(Value::as_array) {
        return Ok(match values.as_slice() {
            [value] => Shape::Literal {
                value: value.clone(),
            },
            values => Shape::Enum {
                values: values.to_vec(),
            },
        });
    }

    for keyword in ["anyOf", "oneOf"] {
        if let Some(variants) = map.get(keyword).and_then(Value::as_array) {
            return Ok(Shape::AnyOf {
                variants: convert_all(variants)?,
            });
        }
    }

    if let Some(branches) = map.get("allOf").and_then(Value::as_array) {
        return Ok(Shape::AllOf {
            branches: convert_all(branches)?,
        });
    }

    if map.get("not").is_some_and(is_empty_schema) {
        return Ok(Shape::Never);
    }

    match map.get("type") {
        Some(Value::String(ty)) => shape_for_type(ty, map),
        Some(Value::Array(types)) => match types.as_slice() {
            [Value::String(ty)] => shape_for_type(ty, map),
            types => {
                let variants = types
                    .iter()
                    .map(|ty| match ty {
                        Value::String(ty) => shape_for_type(ty, map).map(SchemaNode::new),
                        other => Err(invalid_type(other)),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Shape::AnyOf { variants })
            }
        },
        Some(other) => Err(invalid_type(other)),
        None if map.contains_key("properties") => object_shape(map),
        None if map.contains_key("items") || map.contains_key("prefixItems") => array_shape(map),
        None => Ok(Shape::Any),
    }
}

fn convert_all(schemas: &[Value]) -> Result<Vec<SchemaNode>, SchemaIncompatibility> {
    schemas.iter().map(convert).collect()
}

fn invalid_type(ty: &Value) -> SchemaIncompatibility {
    SchemaIncompatibility::new(format!("Unsupported JSON Schema type {ty}."))
}

fn shape_for_type(ty: &str, map: &Map<String, Value>) -> Result<Shape, SchemaIncompatibility> {
    match ty {
        "string" => Ok(Shape::String),
        "number" => Ok(Shape::Number),
        "integer" => Ok(Shape::Integer),
        "boolean" => Ok(Shape::Boolean),
        "null" => Ok(Shape::Null),
        "array" => array_shape(map),
        "object" => object_shape(map),
        other => Err(invalid_type(&Value::String(other.to_string()))),
    }
}

fn array_shape(map: &Map<String, Value>) -> Result<Shape, SchemaIncompatibility> {
    let tuple_items = map
        .get("prefixItems")
        .and_then(Value::as_array)
        .or_else(|| map.get("items").and_then(Value::as_array));

    if let Some(items) = tuple_items {
        // Without minItems every item is required.
        let min_items = map
            .get("minItems")
            .and_then(Value::as_u64)
            .map_or(items.len(), |n| n as usize);
        let items = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let node = convert(item)?;
                Ok(if index >= min_items {
                    node.mark_optional()
                } else {
                    node
                })
            })
            .collect::<Result<Vec<_>, SchemaIncompatibility>>()?;
        return Ok(Shape::Tuple { items });
    }

    let items = match map.get("items") {
        Some(items) => convert(items)?,
        None => SchemaNode::any(),
    };
    Ok(Shape::Array {
        items: Box::new(items),
    })
}

fn object_shape(map: &Map<String, Value>) -> Result<Shape, SchemaIncompatibility> {
    let mut shape = ObjectShape::new();

    if let Some(properties) = map.get("properties").and_then(Value::as_object) {
        for (name, property) in properties {
            shape.properties.insert(name.clone(), convert(property)?);
        }
    }

    if let Some(required) = map.get("required").and_then(Value::as_array) {
        for name in required.iter().filter_map(Value::as_str) {
            if !shape.required.iter().any(|r| r == name) {
                shape.required.push(name.to_string());
            }
        }
    }

    shape.additional_properties = match map.get("additionalProperties") {
        Some(Value::Bool(allowed)) => *allowed,
        Some(Value::Object(_)) => true,
        _ => false,
    };

    Ok(Shape::Object(shape))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn to_ir(schema: Value) -> SchemaNode {
        JsonSchemaAdapter.to_ir(&schema).unwrap()
    }

    #[test]
    fn test_scalars_and_annotations() {
        assert_eq!(to_ir(json!({ "type": "string" })), SchemaNode::string());
        assert_eq!(
            to_ir(json!({ "type": "integer", "title": "Count", "default": 2 })),
            SchemaNode::integer().with_title("Count").with_default(2)
        );
        assert_eq!(to_ir(json!(true)), SchemaNode::any());
        assert_eq!(to_ir(json!({ "not": {} })), SchemaNode::never());
    }

    #[test]
    fn test_const_and_enum() {
        assert_eq!(to_ir(json!({ "const": "a" })), SchemaNode::literal("a"));
        assert_eq!(to_ir(json!({ "enum": [3] })), SchemaNode::literal(3));
        assert_eq!(
            to_ir(json!({ "enum": ["a", "b"] })),
            SchemaNode::enumeration([json!("a"), json!("b")])
        );
    }

    #[test]
    fn test_type_lists() {
        assert_eq!(
            to_ir(json!({ "type": ["string", "null"] })),
            SchemaNode::any_of([SchemaNode::string(), SchemaNode::null()])
        );
        assert_eq!(to_ir(json!({ "type": ["number"] })), SchemaNode::number());
    }

    #[test]
    fn test_tuples_and_min_items() {
        let node = to_ir(json!({
            "type": "array",
            "prefixItems": [{ "type": "string" }, { "type": "number" }],
            "minItems": 1
        }));
        assert_eq!(
            node,
            SchemaNode::tuple([SchemaNode::string(), SchemaNode::number().mark_optional()])
        );

        let draft7 = to_ir(json!({ "type": "array", "items": [{ "type": "string" }] }));
        assert_eq!(draft7, SchemaNode::tuple([SchemaNode::string()]));
    }

    #[test]
    fn test_arrays() {
        assert_eq!(
            to_ir(json!({ "type": "array", "items": { "type": "number" } })),
            SchemaNode::array(SchemaNode::number())
        );
        assert_eq!(to_ir(json!({ "type": "array" })), SchemaNode::array(SchemaNode::any()));
    }

    #[test]
    fn test_objects() {
        let node = to_ir(json!({
            "type": "object",
            "properties": { "foo": { "type": "string" }, "bar": { "type": "number" } },
            "required": ["foo"],
            "additionalProperties": false
        }));
        assert_eq!(
            node,
            SchemaNode::object(
                ObjectShape::new()
                    .with_property("foo", SchemaNode::string(), true)
                    .with_property("bar", SchemaNode::number(), false)
            )
        );

        let open = to_ir(json!({ "type": "object", "additionalProperties": {} }));
        assert!(matches!(open.shape, Shape::Object(ref shape) if shape.additional_properties));

        let implied = to_ir(json!({ "properties": { "a": {} } }));
        assert!(matches!(implied.shape, Shape::Object(_)));
    }

    #[test]
    fn test_optional_wrapper_and_marker() {
        let wrapped = to_ir(json!({
            "anyOf": [{ "not": {} }, { "type": "string" }],
            "description": "nickname"
        }));
        assert_eq!(
            wrapped,
            SchemaNode::string().mark_optional().with_description("nickname")
        );

        let marked = to_ir(json!({ "type": "string", "optional": true }));
        assert!(marked.optional);
    }

    #[test]
    fn test_unions() {
        let node = to_ir(json!({ "oneOf": [{ "type": "string" }, { "type": "number" }] }));
        assert_eq!(
            node,
            SchemaNode::any_of([SchemaNode::string(), SchemaNode::number()])
        );
        let node = to_ir(json!({ "allOf": [{ "type": "object" }] }));
        assert_eq!(node, SchemaNode::all_of([SchemaNode::object(ObjectShape::new())]));
    }

    #[test]
    fn test_invalid_schemas() {
        assert!(JsonSchemaAdapter.to_ir(&json!("string")).is_err());
        let err = JsonSchemaAdapter
            .to_ir(&json!({ "type": "date" }))
            .unwrap_err();
        assert_eq!(err.message(), "Unsupported JSON Schema type \"date\".");
    }
}
