//! Validate, format, write and clean up a generated unit.

use std::{
    io,
    path::{Path, PathBuf},
    process::Command,
};

use envopts_core::{File, GenerationConfig};
use thiserror::Error;

use crate::{
    emit::GeneratedUnit,
    error::{Error, Result},
    model::SourcePackage,
    pipeline::Stage,
};

/// Result of processing one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No eligible field; the filesystem was not touched.
    Skipped { type_name: String },
    Written { path: PathBuf, setter_count: usize },
}

impl Outcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Written { path, .. } => Some(path),
            Self::Skipped { .. } => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// Failure of an [`ImportCleaner`].
#[derive(Debug, Error)]
pub enum CleanupError {
    #[error("`{program}` was not found on PATH")]
    NotFound { program: String },

    #[error("`{program}` exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("failed to run `{program}`")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Tidies imports of a freshly written file in place.
pub trait ImportCleaner {
    fn clean_imports(&self, path: &Path) -> std::result::Result<(), CleanupError>;
}

/// Import cleanup by running `rustfmt` on the written file.
#[derive(Debug, Clone)]
pub struct Rustfmt {
    program: String,
    edition: String,
}

impl Rustfmt {
    pub fn new() -> Self {
        Self {
            program: "rustfmt".to_string(),
            edition: "2024".to_string(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_edition(mut self, edition: impl Into<String>) -> Self {
        self.edition = edition.into();
        self
    }
}

impl Default for Rustfmt {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportCleaner for Rustfmt {
    fn clean_imports(&self, path: &Path) -> std::result::Result<(), CleanupError> {
        let output = Command::new(&self.program)
            .arg("--edition")
            .arg(&self.edition)
            .arg(path)
            .output()
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => CleanupError::NotFound {
                    program: self.program.clone(),
                },
                _ => CleanupError::Io {
                    program: self.program.clone(),
                    source,
                },
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(CleanupError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

/// Final stage of a run: from emitted text to a file on disk.
pub struct OutputPipeline {
    cleaner: Box<dyn ImportCleaner>,
}

impl OutputPipeline {
    pub fn new(cleaner: impl ImportCleaner + 'static) -> Self {
        Self {
            cleaner: Box::new(cleaner),
        }
    }

    /// Check that the unit parses and pretty-print everything below the header.
    pub fn format(&self, unit: &GeneratedUnit) -> Result<String> {
        let raw = unit.text();
        let file = syn::parse_file(&raw)
            .map_err(|err| Error::emit_format(&err, &unit.type_name, &raw))?;
        Ok(prettyplease::unparse(&file))
    }

    /// The file that would be written, without touching disk.
    ///
    /// `None` when the unit has no setters.
    pub fn preview(
        &self,
        config: &GenerationConfig,
        package: &SourcePackage,
        unit: &GeneratedUnit,
    ) -> Result<Option<File>> {
        if unit.is_empty() {
            return Ok(None);
        }
        self.render(config, package, unit).map(Some)
    }

    fn render(
        &self,
        config: &GenerationConfig,
        package: &SourcePackage,
        unit: &GeneratedUnit,
    ) -> Result<File> {
        let formatted = self.format(unit)?;
        Ok(File::new(config.output_path_in(&package.child_dir), formatted)
            .with_header(&unit.header))
    }

    pub fn process(
        &self,
        config: &GenerationConfig,
        package: &SourcePackage,
        unit: &GeneratedUnit,
    ) -> Result<Outcome> {
        self.process_with(config, package, unit, &mut |_| {})
    }

    /// Like [`process`](Self::process), reporting each stage reached.
    #[tracing::instrument(skip_all, fields(type_name = %unit.type_name))]
    pub fn process_with(
        &self,
        config: &GenerationConfig,
        package: &SourcePackage,
        unit: &GeneratedUnit,
        on_stage: &mut dyn FnMut(Stage),
    ) -> Result<Outcome> {
        if unit.is_empty() {
            on_stage(Stage::Skipped);
            return Ok(Outcome::Skipped {
                type_name: unit.type_name.clone(),
            });
        }

        let file = self.render(config, package, unit)?;
        on_stage(Stage::Formatted);

        let path = file.path().to_path_buf();
        if file.is_handwritten_on_disk() {
            tracing::warn!(path = %path.display(), "overwriting a file without a generated header");
        }
        file.write().map_err(|source| {
            Box::new(Error::Write {
                path: path.clone(),
                source,
            })
        })?;
        on_stage(Stage::Written);

        // The file stays in place if cleanup fails.
        self.cleaner
            .clean_imports(&path)
            .map_err(|source| {
                Box::new(Error::PostProcess {
                    path: path.clone(),
                    source,
                })
            })?;
        on_stage(Stage::PostProcessed);

        Ok(Outcome::Written {
            path,
            setter_count: unit.setter_count,
        })
    }
}

impl Default for OutputPipeline {
    fn default() -> Self {
        Self::new(Rustfmt::new())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, fs, rc::Rc};

    use envopts_core::is_generated;
    use tempfile::TempDir;

    use super::*;

    #[derive(Clone, Default)]
    struct Recording {
        calls: Rc<RefCell<Vec<PathBuf>>>,
        fail: bool,
    }

    impl ImportCleaner for Recording {
        fn clean_imports(&self, path: &Path) -> std::result::Result<(), CleanupError> {
            self.calls.borrow_mut().push(path.to_path_buf());
            if self.fail {
                Err(CleanupError::Failed {
                    program: "stub".to_string(),
                    status: "exit status: 1".to_string(),
                    stderr: "boom".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn package(dir: &Path) -> SourcePackage {
        SourcePackage {
            name: "config".to_string(),
            file: dir.join("config.rs"),
            child_dir: dir.join("config"),
            imports: Vec::new(),
        }
    }

    fn unit(body: &str, setter_count: usize) -> GeneratedUnit {
        GeneratedUnit {
            type_name: "FooEnv".to_string(),
            header: "// Code generated by \"envopts --type FooEnv\"; DO NOT EDIT.".to_string(),
            body: body.to_string(),
            setter_count,
        }
    }

    #[test]
    fn test_empty_unit_is_skipped_without_touching_disk() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("config").join("fooenv_opts.rs");
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(&target, "handwritten\n").unwrap();

        let cleaner = Recording::default();
        let pipeline = OutputPipeline::new(cleaner.clone());
        let outcome = pipeline
            .process(
                &GenerationConfig::new("FooEnv"),
                &package(temp.path()),
                &unit("pub type Option = u8;\n", 0),
            )
            .unwrap();

        assert!(outcome.is_skipped());
        assert_eq!(fs::read_to_string(&target).unwrap(), "handwritten\n");
        assert!(cleaner.calls.borrow().is_empty());
    }

    #[test]
    fn test_writes_formatted_file_then_cleans() {
        let temp = TempDir::new().unwrap();
        let cleaner = Recording::default();
        let pipeline = OutputPipeline::new(cleaner.clone());

        let mut stages = Vec::new();
        let outcome = pipeline
            .process_with(
                &GenerationConfig::new("FooEnv"),
                &package(temp.path()),
                &unit("pub   fn   WithHome( v : String ) {}\n", 1),
                &mut |stage| stages.push(stage),
            )
            .unwrap();

        let path = temp.path().join("config").join("fooenv_opts.rs");
        assert_eq!(
            outcome,
            Outcome::Written {
                path: path.clone(),
                setter_count: 1
            }
        );
        assert_eq!(stages, vec![Stage::Formatted, Stage::Written, Stage::PostProcessed]);

        let written = fs::read_to_string(&path).unwrap();
        assert!(is_generated(&written));
        assert!(written.contains("pub fn WithHome(v: String) {}"));
        assert_eq!(*cleaner.calls.borrow(), vec![path]);
    }

    #[test]
    fn test_explicit_output_path() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("gen").join("opts.rs");
        let pipeline = OutputPipeline::new(Recording::default());

        let outcome = pipeline
            .process(
                &GenerationConfig::new("FooEnv").with_output(&out),
                &package(temp.path()),
                &unit("pub fn a() {}\n", 1),
            )
            .unwrap();

        assert_eq!(outcome.path(), Some(out.as_path()));
        assert!(out.exists());
    }

    #[test]
    fn test_malformed_text_is_never_written() {
        let temp = TempDir::new().unwrap();
        let pipeline = OutputPipeline::new(Recording::default());
        let raw_body = "pub fn WithHome(v: String -> Option {\n";

        let err = pipeline
            .process(
                &GenerationConfig::new("FooEnv"),
                &package(temp.path()),
                &unit(raw_body, 1),
            )
            .unwrap_err();

        assert!(matches!(*err, Error::EmitFormat { .. }));
        assert!(err.raw_output().unwrap().ends_with(raw_body));
        assert!(!temp.path().join("config").exists());
    }

    #[test]
    fn test_cleanup_failure_keeps_written_file() {
        let temp = TempDir::new().unwrap();
        let cleaner = Recording {
            fail: true,
            ..Recording::default()
        };
        let pipeline = OutputPipeline::new(cleaner);

        let err = pipeline
            .process(
                &GenerationConfig::new("FooEnv"),
                &package(temp.path()),
                &unit("pub fn a() {}\n", 1),
            )
            .unwrap_err();

        let path = temp.path().join("config").join("fooenv_opts.rs");
        assert!(matches!(*err, Error::PostProcess { path: ref p, .. } if *p == path));
        assert_eq!(err.stage(), Stage::Written);
        assert!(path.exists());
    }

    #[test]
    fn test_preview_does_not_write() {
        let temp = TempDir::new().unwrap();
        let config = GenerationConfig::new("FooEnv");
        let package = package(temp.path());
        let pipeline = OutputPipeline::new(Recording::default());

        assert!(
            pipeline
                .preview(&config, &package, &unit("pub fn a() {}\n", 0))
                .unwrap()
                .is_none()
        );

        let file = pipeline
            .preview(&config, &package, &unit("pub fn a() {}\n", 1))
            .unwrap()
            .unwrap();
        assert_eq!(file.path(), temp.path().join("config").join("fooenv_opts.rs"));
        assert!(file.render().starts_with("// Code generated by"));
        assert!(!file.exists());
    }

    #[test]
    fn test_missing_rustfmt_is_not_found() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("x.rs");
        fs::write(&path, "fn a() {}\n").unwrap();

        let err = Rustfmt::new()
            .with_program("envopts-test-no-such-rustfmt")
            .clean_imports(&path)
            .unwrap_err();
        assert!(matches!(err, CleanupError::NotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_failure() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("x.rs");
        fs::write(&path, "fn a() {}\n").unwrap();

        let err = Rustfmt::new()
            .with_program("false")
            .clean_imports(&path)
            .unwrap_err();
        assert!(matches!(err, CleanupError::Failed { .. }));
    }
}
