//! Naming helpers for positional parameters and command paths.

use once_cell::sync::Lazy;
use procli_ir::SchemaNode;
use regex::Regex;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());

/// Collapse runs of non-word characters into single spaces and trim.
pub fn clean_name(raw: &str) -> String {
    NON_WORD.replace_all(raw, " ").trim().to_string()
}

fn is_single_word(s: &str) -> bool {
    !s.is_empty() && !NON_WORD.is_match(s)
}

/// First non-empty cleaned annotation: title, then description.
fn annotated_name(node: &SchemaNode) -> Option<String> {
    [node.title.as_deref(), node.description.as_deref()]
        .into_iter()
        .flatten()
        .map(clean_name)
        .find(|name| !name.is_empty())
}

/// Name of the positional parameter at `position` (0-based).
///
/// Falls back to `parameter_<n>` with a 1-based index.
pub fn parameter_name(node: &SchemaNode, position: usize) -> String {
    annotated_name(node).unwrap_or_else(|| format!("parameter_{}", position + 1))
}

/// Name of an array positional, preferring the array's annotations over
/// those of its element.
pub fn array_parameter_name(array: &SchemaNode, element: &SchemaNode, position: usize) -> String {
    annotated_name(array)
        .or_else(|| annotated_name(element))
        .unwrap_or_else(|| format!("parameter_{}", position + 1))
}

/// Name of the single positional of a bare primitive input.
///
/// Uses the title or description, else the type itself when it reads as a
/// single word (`string`), else `value`.
pub fn primitive_input_name(node: &SchemaNode) -> String {
    if let Some(name) = annotated_name(node) {
        return name;
    }
    let display = node.type_display();
    if is_single_word(&display) {
        display
    } else {
        "value".to_string()
    }
}

/// Convert a string to kebab-case (e.g., "getUser" -> "get-user").
pub fn to_kebab_case(s: &str) -> String {
    let mut result = String::new();
    let mut prev_lower = false;
    for c in s.chars() {
        if c == '_' || c == '-' {
            if !result.is_empty() && !result.ends_with('-') {
                result.push('-');
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower {
            result.push('-');
        }
        result.extend(c.to_lowercase());
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
    }
    result.trim_end_matches('-').to_string()
}

/// Command path for a dotted procedure name: one kebab-case segment per level.
pub fn command_path(name: &str) -> Vec<String> {
    name.split('.').map(to_kebab_case).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("The file   path!"), "The file path");
        assert_eq!(clean_name("  --user-id--  "), "user id");
        assert_eq!(clean_name("snake_case"), "snake_case");
        assert_eq!(clean_name("!!!"), "");
    }

    #[test]
    fn test_parameter_name_fallbacks() {
        assert_eq!(parameter_name(&SchemaNode::string().with_title("Name"), 0), "Name");
        assert_eq!(
            parameter_name(&SchemaNode::string().with_description("user's email"), 0),
            "user s email"
        );
        assert_eq!(parameter_name(&SchemaNode::string(), 2), "parameter_3");
        assert_eq!(parameter_name(&SchemaNode::string().with_title("..."), 0), "parameter_1");
    }

    #[test]
    fn test_array_parameter_name() {
        let element = SchemaNode::string().with_title("file");
        assert_eq!(
            array_parameter_name(&SchemaNode::array(element.clone()).with_title("files"), &element, 0),
            "files"
        );
        assert_eq!(array_parameter_name(&SchemaNode::array(element.clone()), &element, 0), "file");
        assert_eq!(
            array_parameter_name(&SchemaNode::array(SchemaNode::number()), &SchemaNode::number(), 1),
            "parameter_2"
        );
    }

    #[test]
    fn test_primitive_input_name() {
        assert_eq!(primitive_input_name(&SchemaNode::string()), "string");
        assert_eq!(primitive_input_name(&SchemaNode::integer().with_title("count")), "count");
        let union = SchemaNode::any_of([SchemaNode::string(), SchemaNode::number()]);
        assert_eq!(primitive_input_name(&union), "value");
    }

    #[test]
    fn test_to_kebab_case() {
        assert_eq!(to_kebab_case("hello"), "hello");
        assert_eq!(to_kebab_case("getUser"), "get-user");
        assert_eq!(to_kebab_case("run_migrations"), "run-migrations");
        assert_eq!(to_kebab_case("already-kebab"), "already-kebab");
        assert_eq!(to_kebab_case("HTTPServer"), "httpserver");
        assert_eq!(to_kebab_case(""), "");
    }

    #[test]
    fn test_command_path() {
        assert_eq!(command_path("users.createUser"), vec!["users", "create-user"]);
        assert_eq!(command_path("ping"), vec!["ping"]);
    }
}
