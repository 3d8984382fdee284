//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::{
    cell::RefCell,
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};

use envopts_codegen::{CleanupError, ImportCleaner};

/// Absolute path of a fixture module.
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Copy a fixture into `dir` so a run can write next to it.
pub fn copy_fixture(name: &str, dir: &Path) -> PathBuf {
    let target = dir.join(name);
    fs::copy(fixture(name), &target).expect("copy fixture");
    target
}

/// Cleaner stub that records every path it was asked to clean.
#[derive(Clone, Default)]
pub struct RecordingCleaner {
    calls: Rc<RefCell<Vec<PathBuf>>>,
    fail: bool,
}

impl RecordingCleaner {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.borrow().clone()
    }
}

impl ImportCleaner for RecordingCleaner {
    fn clean_imports(&self, path: &Path) -> Result<(), CleanupError> {
        self.calls.borrow_mut().push(path.to_path_buf());
        if self.fail {
            return Err(CleanupError::NotFound {
                program: "rustfmt".to_string(),
            });
        }
        Ok(())
    }
}
