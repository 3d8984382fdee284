//! Report data structures for the generate operation.
//!
//! Operations build reports, then render them to an Output target.

mod generate;
mod output;

pub use generate::{GenerateReport, TargetResult};
pub use output::{Report, TerminalOutput};
