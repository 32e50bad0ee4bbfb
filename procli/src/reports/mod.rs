//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod check;
mod decode;
mod explain;
mod output;

pub use check::{CheckReport, CompiledInfo};
pub use decode::DecodeReport;
pub use explain::{ExplainReport, FlagInfo};
pub use output::{Report, TerminalOutput};
