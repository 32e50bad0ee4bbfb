//! Shape classification of input schemas.

use procli_ir::{SchemaNode, Shape, TypeName};

use crate::error::SchemaIncompatibility;

/// How an input schema maps onto the CLI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classified<'a> {
    /// A single scalar, a literal, or an enum of scalars: one positional.
    Primitive { node: &'a SchemaNode, optional: bool },
    /// A fixed-length list: positionals, optionally followed by a flags object.
    Tuple {
        node: &'a SchemaNode,
        items: &'a [SchemaNode],
        optional: bool,
    },
    /// A homogeneous list: one variadic positional.
    Array {
        node: &'a SchemaNode,
        element: &'a SchemaNode,
        optional: bool,
    },
    /// An object (or an intersection of objects): flags only.
    Object { node: &'a SchemaNode },
    /// A union whose every branch is an object: flags only.
    UnionOfObjects { node: &'a SchemaNode },
}

impl<'a> Classified<'a> {
    /// The node the classification was made on.
    pub fn node(&self) -> &'a SchemaNode {
        match self {
            Classified::Primitive { node, .. }
            | Classified::Tuple { node, .. }
            | Classified::Array { node, .. }
            | Classified::Object { node }
            | Classified::UnionOfObjects { node } => node,
        }
    }

    /// Returns true for object-shaped classifications.
    pub fn is_object(&self) -> bool {
        matches!(
            self,
            Classified::Object { .. } | Classified::UnionOfObjects { .. }
        )
    }

    fn into_optional(self) -> Self {
        match self {
            Classified::Primitive { node, .. } => Classified::Primitive {
                node,
                optional: true,
            },
            Classified::Tuple { node, items, .. } => Classified::Tuple {
                node,
                items,
                optional: true,
            },
            Classified::Array { node, element, .. } => Classified::Array {
                node,
                element,
                optional: true,
            },
            other => other,
        }
    }
}

/// Classify a schema node. The first matching rule wins:
///
/// 1. objects accepting additional properties are rejected
/// 2. scalar-only nodes are primitives
/// 3. tuples
/// 4. arrays, whose element must not accept null
/// 5. unions of objects
/// 6. the `anyOf [never, X]` optional wrapper unwraps to `X`
/// 7. objects, and intersections of objects
/// 8. anything else is unconvertible
pub fn classify(node: &SchemaNode) -> Result<Classified<'_>, SchemaIncompatibility> {
    if has_additional_properties(node) {
        return Err(SchemaIncompatibility::additional_properties());
    }

    if is_primitive(node) {
        return Ok(Classified::Primitive {
            node: unwrap_optional(node),
            optional: is_optional(node),
        });
    }

    match &node.shape {
        Shape::Tuple { items } => Ok(Classified::Tuple {
            node,
            items,
            optional: is_optional(node),
        }),
        Shape::Array { items } => {
            if items.accepts_null() {
                return Err(SchemaIncompatibility::nullable_array(node));
            }
            Ok(Classified::Array {
                node,
                element: items,
                optional: is_optional(node),
            })
        }
        Shape::AnyOf { variants }
            if !variants.is_empty()
                && variants.iter().all(|v| matches!(v.shape, Shape::Object(_))) =>
        {
            Ok(Classified::UnionOfObjects { node })
        }
        Shape::AnyOf { .. } if optional_inner(node).is_some() => {
            let inner = unwrap_optional(node);
            tracing::trace!(shape = %inner.type_display(), "unwrapping optional wrapper");
            classify(inner).map(Classified::into_optional)
        }
        Shape::Object(_) => Ok(Classified::Object { node }),
        Shape::AllOf { branches } if !branches.is_empty() && accepts_object(node) => {
            Ok(Classified::Object { node })
        }
        _ => Err(SchemaIncompatibility::unconvertible(node)),
    }
}

/// Returns true if the node accepts only scalar types.
///
/// `Any` names no type and is not primitive; neither is a scalar that also
/// accepts null.
pub fn is_primitive(node: &SchemaNode) -> bool {
    let types = node.accepted_types();
    !types.is_empty() && types.iter().all(TypeName::is_scalar)
}

/// Returns true if the node accepts object values.
pub fn accepts_object(node: &SchemaNode) -> bool {
    node.accepted_types().contains(&TypeName::Object)
}

/// Returns true if a value may be omitted for this node.
pub fn is_optional(node: &SchemaNode) -> bool {
    node.optional || node.default.is_some() || optional_inner(node).is_some()
}

/// The wrapped node of an `anyOf [never, X]` optional wrapper, or the node
/// itself.
pub(crate) fn unwrap_optional(node: &SchemaNode) -> &SchemaNode {
    optional_inner(node).unwrap_or(node)
}

/// The node whose title and description name a parameter: the wrapper when
/// it is annotated, else the wrapped node.
pub(crate) fn annotated_node(node: &SchemaNode) -> &SchemaNode {
    if node.title.is_some() || node.description.is_some() {
        node
    } else {
        unwrap_optional(node)
    }
}

fn optional_inner(node: &SchemaNode) -> Option<&SchemaNode> {
    match &node.shape {
        Shape::AnyOf { variants } => match variants.as_slice() {
            [first, second] if matches!(first.shape, Shape::Never) => Some(second),
            _ => None,
        },
        _ => None,
    }
}

/// Additional properties on the node itself, or on an object it unions or
/// intersects.
pub(crate) fn has_additional_properties(node: &SchemaNode) -> bool {
    match &node.shape {
        Shape::Object(shape) => shape.additional_properties,
        Shape::AnyOf { variants } => variants.iter().any(has_additional_properties),
        Shape::AllOf { branches } => branches.iter().any(has_additional_properties),
        _ => false,
    }
}
