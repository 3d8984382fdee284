//! Run states.

/// Where a generation run is.
///
/// ```text
/// Idle → Loaded → Filtered → Emitted → Skipped
///                                    → Formatted → Written → PostProcessed
/// ```
///
/// Any failure moves the run to `Failed`; a failed run is not resumable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stage {
    #[default]
    Idle,
    Loaded,
    Filtered,
    Emitted,
    Skipped,
    Formatted,
    Written,
    PostProcessed,
    Failed,
}

impl Stage {
    /// Returns true if no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Skipped | Stage::PostProcessed | Stage::Failed)
    }

    /// Whether `next` is a legal successor of this stage.
    pub fn can_advance_to(&self, next: Stage) -> bool {
        use Stage::*;
        match (self, next) {
            (Failed, _) => false,
            (_, Failed) => !self.is_terminal(),
            (Idle, Loaded)
            | (Loaded, Filtered)
            | (Filtered, Emitted)
            | (Emitted, Skipped)
            | (Emitted, Formatted)
            | (Formatted, Written)
            | (Written, PostProcessed) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Loaded => "loaded",
            Stage::Filtered => "filtered",
            Stage::Emitted => "emitted",
            Stage::Skipped => "skipped",
            Stage::Formatted => "formatted",
            Stage::Written => "written",
            Stage::PostProcessed => "post-processed",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        let path = [
            Stage::Idle,
            Stage::Loaded,
            Stage::Filtered,
            Stage::Emitted,
            Stage::Formatted,
            Stage::Written,
            Stage::PostProcessed,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_advance_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
        assert!(Stage::Emitted.can_advance_to(Stage::Skipped));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!Stage::Idle.can_advance_to(Stage::Emitted));
        assert!(!Stage::Skipped.can_advance_to(Stage::Formatted));
        assert!(!Stage::Failed.can_advance_to(Stage::Idle));
        assert!(!Stage::PostProcessed.can_advance_to(Stage::Failed));
        assert!(Stage::Written.can_advance_to(Stage::Failed));
    }

    #[test]
    fn test_display() {
        assert_eq!(Stage::PostProcessed.to_string(), "post-processed");
        assert_eq!(Stage::default(), Stage::Idle);
    }
}
