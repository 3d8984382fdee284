//! Per-run state carried through the generator.

use super::Stage;
use crate::error::Error;

/// State of one generation run.
///
/// Records every stage reached so callers (and tests) can see how far a
/// run got before it finished or failed.
#[derive(Debug)]
pub struct RunContext {
    stage: Stage,
    history: Vec<Stage>,
    failed_at: Option<Stage>,
}

impl RunContext {
    pub fn new() -> Self {
        Self {
            stage: Stage::Idle,
            history: vec![Stage::Idle],
            failed_at: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Every stage reached, in order, starting at `Idle`.
    pub fn history(&self) -> &[Stage] {
        &self.history
    }

    /// The stage the run was in when it failed.
    pub fn failed_at(&self) -> Option<Stage> {
        self.failed_at
    }

    pub(crate) fn advance(&mut self, next: Stage) {
        debug_assert!(
            self.stage.can_advance_to(next),
            "illegal transition {} -> {}",
            self.stage,
            next
        );
        tracing::debug!(from = %self.stage, to = %next, "stage");
        self.stage = next;
        self.history.push(next);
    }

    pub(crate) fn fail(&mut self, error: &Error) {
        tracing::debug!(from = %self.stage, error = %error, "stage failed");
        self.failed_at = Some(self.stage);
        self.stage = Stage::Failed;
        self.history.push(Stage::Failed);
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}
