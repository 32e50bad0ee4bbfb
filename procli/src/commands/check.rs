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
pub struct CheckCommand {
    /// Path to procli.toml (defaults to ./procli.toml)
    #[arg(short, long, default_value = "procli.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let procli_toml = ProcliToml::open(&self.config).unwrap_or_exit();

        let report = ops::check(procli_toml.manifest(), procli_toml.path())?;
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
