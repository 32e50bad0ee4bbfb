use serde::Deserialize;

/// CLI metadata configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Name of the CLI binary
    pub name: String,

    /// Version
    #[serde(default = "default_version")]
    pub version: String,

    /// CLI description for help text
    pub description: Option<String>,

    /// Author information
    pub author: Option<String>,

    /// String-to-value coercion settings for positional parameters
    #[serde(default)]
    pub coercion: CoercionConfig,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

/// Coercion settings (`[cli.coercion]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoercionConfig {
    /// Forward non-integral numbers to integer parameters instead of the raw
    /// string, so the procedure's validator reports the precise mismatch.
    pub forward_non_integral: bool,
}

impl Default for CoercionConfig {
    fn default() -> Self {
        Self {
            forward_non_integral: true,
        }
    }
}
