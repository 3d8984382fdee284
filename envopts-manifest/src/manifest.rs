use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    str::FromStr,
};

use envopts_core::GenerationConfig;
use serde::Deserialize;

use crate::{
    Error, Result, SourceContext,
    validate::{Checker, find_target_span, find_value_spans},
};

/// Conventional manifest file name.
pub const MANIFEST_FILE_NAME: &str = "envopts.toml";

/// Raw shape of envopts.toml before defaults are merged.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    /// Keys applied to every target unless the target sets them
    #[serde(default)]
    defaults: toml::Table,

    #[serde(default, rename = "target")]
    targets: Vec<toml::Table>,
}

/// Parsed envopts.toml: one generation config per `[[target]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    targets: Vec<GenerationConfig>,
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, MANIFEST_FILE_NAME)
    }
}

impl Manifest {
    /// Parse a manifest file.
    ///
    /// Relative `source` and `output` paths resolve against the directory
    /// holding the manifest.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        let manifest = Self::from_str_with_filename(&content, &path.display().to_string())?;
        Ok(match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => manifest.relative_to(dir),
            _ => manifest,
        })
    }

    /// Parse manifest text with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let raw: RawManifest = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;

        if let Some(value) = raw.defaults.get("type") {
            let span = value
                .as_str()
                .and_then(|name| find_value_spans(content, "type", name).first().copied());
            return Err(ctx.validation_error("`type` cannot be set in [defaults]", span));
        }

        let targets = raw
            .targets
            .into_iter()
            .enumerate()
            .map(|(index, target)| {
                let mut merged = raw.defaults.clone();
                merged.extend(target);
                toml::Value::Table(merged)
                    .try_into::<GenerationConfig>()
                    .map_err(|e| ctx.target_error(index, find_target_span(content, index), e))
            })
            .collect::<Result<Vec<_>>>()?;

        let manifest = Self { targets };
        manifest.validate(&ctx)?;
        Ok(manifest)
    }

    pub fn targets(&self) -> &[GenerationConfig] {
        &self.targets
    }

    pub fn into_targets(self) -> Vec<GenerationConfig> {
        self.targets
    }

    /// Re-root relative `source` and `output` paths under `dir`.
    pub fn relative_to(mut self, dir: &Path) -> Self {
        for target in &mut self.targets {
            if target.source.is_relative() {
                target.source = normalize(&dir.join(&target.source));
            }
            if let Some(output) = &mut target.output_path
                && output.is_relative()
            {
                *output = normalize(&dir.join(&*output));
            }
        }
        self
    }

    fn validate(&self, ctx: &SourceContext) -> Result<()> {
        if self.targets.is_empty() {
            return Err(Box::new(Error::NoTargets {
                src: ctx.named_source(),
            }));
        }

        let checker = Checker::new(ctx);
        for target in &self.targets {
            checker.item_name("type", &target.type_name)?;
            checker.item_name("option-type", &target.option_type_name)?;
            checker.fragment("prefix", &target.function_prefix)?;
            checker.path("tag", &target.tag_key)?;
        }

        self.check_duplicate_targets(ctx)?;
        self.check_duplicate_outputs(ctx)
    }

    fn check_duplicate_targets(&self, ctx: &SourceContext) -> Result<()> {
        let mut seen: HashMap<(&str, PathBuf), usize> = HashMap::new();
        for target in &self.targets {
            let key = (target.type_name.as_str(), normalize(&target.source));
            let count = seen.entry(key).or_default();
            *count += 1;
            if *count > 1 {
                let span = find_value_spans(ctx.src(), "type", &target.type_name)
                    .get(1)
                    .copied();
                return Err(Box::new(Error::DuplicateTarget {
                    src: ctx.named_source(),
                    span,
                    type_name: target.type_name.clone(),
                    source_path: target.source.clone(),
                }));
            }
        }
        Ok(())
    }

    /// Two targets racing on one file. Derived paths are compared by
    /// source and file name since the module directory is only known once
    /// the source is resolved.
    fn check_duplicate_outputs(&self, ctx: &SourceContext) -> Result<()> {
        let mut seen: HashMap<PathBuf, usize> = HashMap::new();
        for (index, target) in self.targets.iter().enumerate() {
            let path = match &target.output_path {
                Some(path) => normalize(path),
                None => normalize(&target.source).join(target.default_file_name()),
            };
            if let Some(&first) = seen.get(&path) {
                let first = &self.targets[first];
                return Err(Box::new(Error::DuplicateOutput {
                    src: ctx.named_source(),
                    first_span: find_value_spans(ctx.src(), "type", &first.type_name)
                        .first()
                        .copied(),
                    second_span: find_value_spans(ctx.src(), "type", &target.type_name)
                        .last()
                        .copied(),
                    first: first.type_name.clone(),
                    second: target.type_name.clone(),
                    path,
                }));
            }
            seen.insert(path, index);
        }
        Ok(())
    }
}

/// Drop `.` components so `./src` and `src` compare equal.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect()
}
