use std::path::PathBuf;

use envopts_codegen::{Error, Outcome};

use super::output::{Output, Report};

/// What happened to each target, in order.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub results: Vec<TargetResult>,
    /// The failure that stopped the run, if any.
    pub error: Option<Box<Error>>,
}

#[derive(Debug)]
pub enum TargetResult {
    Written { path: PathBuf, setter_count: usize },
    Skipped { type_name: String },
    /// Dry-run rendering of a file that would be written.
    Preview { path: PathBuf, content: String },
}

impl From<Outcome> for TargetResult {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Written { path, setter_count } => Self::Written { path, setter_count },
            Outcome::Skipped { type_name } => Self::Skipped { type_name },
        }
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for result in &self.results {
            match result {
                TargetResult::Written { path, setter_count } => {
                    let noun = if *setter_count == 1 { "setter" } else { "setters" };
                    out.added_item(&format!(
                        "{} ({} {})",
                        path.display(),
                        setter_count,
                        noun
                    ));
                }
                TargetResult::Skipped { type_name } => {
                    out.list_item(&format!(
                        "{}: skipped (no exported, tagged fields)",
                        type_name
                    ));
                }
                TargetResult::Preview { path, content } => {
                    out.divider(&path.display().to_string());
                    out.preformatted(content);
                }
            }
        }
    }
}
