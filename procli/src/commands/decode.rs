use std::path::PathBuf;

use clap::Args;
use eyre::{Result, WrapErr};
use procli_compiler::CliValidationError;
use procli_ir::DecodedArgv;
use procli_manifest::ProcliToml;
use serde_json::{Map, Value};

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct DecodeCommand {
    /// Procedure name, e.g. "users.create"
    pub procedure: String,

    /// Positional values, in order. An array parameter takes all remaining values.
    #[arg(allow_negative_numbers = true)]
    pub values: Vec<String>,

    /// Path to procli.toml (defaults to ./procli.toml)
    #[arg(short, long, default_value = "procli.toml")]
    pub config: PathBuf,

    /// Named option values as a JSON object
    #[arg(long, value_name = "JSON")]
    pub options: Option<String>,

    /// Full decoded argv as JSON ({"positionalValues": [...], "options": {...}}),
    /// instead of VALUES and --options
    #[arg(long, value_name = "JSON", conflicts_with_all = ["values", "options"])]
    pub argv: Option<String>,
}

impl DecodeCommand {
    pub fn run(&self) -> Result<()> {
        let procli_toml = ProcliToml::open(&self.config).unwrap_or_exit();

        let input = match &self.argv {
            Some(json) => ops::DecodeInput::Argv(
                serde_json::from_str::<DecodedArgv>(json).wrap_err("--argv is not valid argv JSON")?,
            ),
            None => ops::DecodeInput::Values {
                values: self.values.clone(),
                options: self.parse_options()?,
            },
        };

        match ops::decode(procli_toml.manifest(), &self.procedure, input) {
            Ok(report) => {
                report.render(&mut TerminalOutput::new());
                Ok(())
            }
            Err(err) => match err.downcast::<CliValidationError>() {
                Ok(invalid) => {
                    eprintln!("{:?}", miette::Report::new(invalid));
                    std::process::exit(2);
                }
                Err(err) => Err(err),
            },
        }
    }

    fn parse_options(&self) -> Result<Map<String, Value>> {
        let Some(json) = &self.options else {
            return Ok(Map::new());
        };
        match serde_json::from_str(json).wrap_err("--options is not valid JSON")? {
            Value::Object(options) => Ok(options),
            other => eyre::bail!("--options must be a JSON object, got {}", other),
        }
    }
}
