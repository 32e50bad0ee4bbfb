//! Explain command report data structures.

use procli_ir::PositionalParameter;
use serde::Serialize;
use serde_json::Value;

use super::output::{Output, Report};

/// The compiled surface of one procedure.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainReport {
    pub procedure: String,
    /// Space-separated command path.
    pub command: String,
    pub description: String,
    pub usage: String,
    pub positionals: Vec<PositionalParameter>,
    #[serde(skip)]
    pub flags: Vec<FlagInfo>,
    /// JSON Schema of the named options.
    pub flags_schema: Value,
}

/// A named option.
#[derive(Debug)]
pub struct FlagInfo {
    pub name: String,
    pub ty: String,
    pub required: bool,
    pub description: String,
}

impl Report for ExplainReport {
    fn render(&self, out: &mut dyn Output) {
        out.title(&self.procedure);
        if !self.description.is_empty() {
            out.preformatted(&self.description);
        }
        out.newline();

        let usage = format!("{} {}", self.command, self.usage);
        out.key_value("Usage", usage.trim_end());

        if !self.positionals.is_empty() {
            out.newline();
            out.section("Arguments");
            for parameter in &self.positionals {
                let text = describe(&parameter.ty, &parameter.description);
                out.key_value_indented(&parameter.rendered(), &text);
            }
        }

        if !self.flags.is_empty() {
            out.newline();
            out.section("Options");
            for flag in &self.flags {
                let mut text = describe(&flag.ty, &flag.description);
                if flag.required {
                    text.push_str(" (required)");
                }
                out.key_value_indented(&format!("--{}", flag.name), &text);
            }
        }
    }
}

fn describe(ty: &str, description: &str) -> String {
    if description.is_empty() {
        format!("[{}]", ty)
    } else {
        format!("[{}] {}", ty, description)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::reports::output::RecordingOutput;

    fn report() -> ExplainReport {
        ExplainReport {
            procedure: "users.create".into(),
            command: "users create".into(),
            description: "Create a user".into(),
            usage: "<name> [options]".into(),
            positionals: vec![PositionalParameter {
                name: "name".into(),
                description: String::new(),
                ty: "string".into(),
                required: true,
                array: false,
            }],
            flags: vec![FlagInfo {
                name: "admin".into(),
                ty: "boolean".into(),
                required: false,
                description: "Grant admin".into(),
            }],
            flags_schema: json!({
                "type": "object",
                "properties": { "admin": { "type": "boolean", "description": "Grant admin" } }
            }),
        }
    }

    #[test]
    fn test_render_surface() {
        let mut out = RecordingOutput::default();
        report().render(&mut out);

        assert_eq!(
            out.lines,
            vec![
                "# users.create",
                "Create a user",
                "",
                "Usage: users create <name> [options]",
                "",
                "Arguments:",
                "  <name>: [string]",
                "",
                "Options:",
                "  --admin: [boolean] Grant admin",
            ]
        );
        insta::assert_snapshot!(out.lines[3], @"Usage: users create <name> [options]");
    }

    #[test]
    fn test_json_surface() {
        let value = serde_json::to_value(report()).unwrap();
        assert_eq!(value["positionals"][0]["type"], json!("string"));
        assert_eq!(value["flagsSchema"]["type"], json!("object"));
        assert!(value.get("flags").is_none());
    }
}
