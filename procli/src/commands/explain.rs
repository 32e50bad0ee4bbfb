use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use procli_manifest::ProcliToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ExplainCommand {
    /// Procedure name, e.g. "users.create"
    pub procedure: String,

    /// Path to procli.toml (defaults to ./procli.toml)
    #[arg(short, long, default_value = "procli.toml")]
    pub config: PathBuf,

    /// Print the compiled surface as JSON
    #[arg(long)]
    pub json: bool,
}

impl ExplainCommand {
    pub fn run(&self) -> Result<()> {
        let procli_toml = ProcliToml::open(&self.config).unwrap_or_exit();
        let report = ops::explain(procli_toml.manifest(), &self.procedure)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            report.render(&mut TerminalOutput::new());
        }
        Ok(())
    }
}
