mod check;
mod completions;
mod decode;
mod explain;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use decode::DecodeCommand;
use eyre::Result;
use explain::ExplainCommand;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for procli_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "procli")]
#[command(version)]
#[command(about = "Turn typed procedures into command-line surfaces")]
pub(crate) struct Cli {
    /// Enable debug logging (otherwise controlled by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Check(cmd) => cmd.run(),
            Commands::Explain(cmd) => cmd.run(),
            Commands::Decode(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile every procedure in procli.toml and report the result
    Check(CheckCommand),

    /// Show the positional parameters and flags of a procedure
    Explain(ExplainCommand),

    /// Decode command-line values into a procedure's call input
    Decode(DecodeCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
