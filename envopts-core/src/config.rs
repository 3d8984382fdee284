//! Generation configuration shared by every stage of a run.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Option type name that needs no suffix on generated identifiers.
pub const DEFAULT_OPTION_TYPE: &str = "Option";
/// Prefix placed in front of every generated setter.
pub const DEFAULT_FUNCTION_PREFIX: &str = "With";
/// Attribute scanned on struct fields.
pub const DEFAULT_TAG_KEY: &str = "env";
/// Crate path the generated code calls into for environment parsing.
pub const DEFAULT_RUNTIME_CRATE: &str = "envopts_runtime";
/// Suffix of the derived output file name.
pub const OUTPUT_SUFFIX: &str = "_opts.rs";

/// Immutable configuration for one generation run.
///
/// Built once (from CLI flags or a manifest entry) and threaded through
/// the loader, naming resolver, emitter and output pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GenerationConfig {
    /// Name of the struct to generate options for.
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(rename = "option-type", default = "default_option_type")]
    pub option_type_name: String,

    #[serde(rename = "prefix", default = "default_function_prefix")]
    pub function_prefix: String,

    #[serde(rename = "tag", default = "default_tag_key")]
    pub tag_key: String,

    /// Explicit output file; derived from the type name when absent.
    #[serde(rename = "output", default)]
    pub output_path: Option<PathBuf>,

    /// Module file or directory that declares the type.
    #[serde(default = "default_source")]
    pub source: PathBuf,

    #[serde(default = "default_runtime_crate")]
    pub runtime_crate: String,

    /// Command line recorded in the provenance header.
    #[serde(skip)]
    pub invocation: Option<String>,
}

fn default_option_type() -> String {
    DEFAULT_OPTION_TYPE.to_string()
}

fn default_function_prefix() -> String {
    DEFAULT_FUNCTION_PREFIX.to_string()
}

fn default_tag_key() -> String {
    DEFAULT_TAG_KEY.to_string()
}

fn default_source() -> PathBuf {
    PathBuf::from(".")
}

fn default_runtime_crate() -> String {
    DEFAULT_RUNTIME_CRATE.to_string()
}

impl GenerationConfig {
    /// Create a configuration for `type_name` with every other value defaulted.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            option_type_name: default_option_type(),
            function_prefix: default_function_prefix(),
            tag_key: default_tag_key(),
            output_path: None,
            source: default_source(),
            runtime_crate: default_runtime_crate(),
            invocation: None,
        }
    }

    pub fn with_option_type(mut self, name: impl Into<String>) -> Self {
        self.option_type_name = name.into();
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.function_prefix = prefix.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag_key = tag.into();
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = path.into();
        self
    }

    pub fn with_runtime_crate(mut self, path: impl Into<String>) -> Self {
        self.runtime_crate = path.into();
        self
    }

    /// Record the exact command line that produced this run.
    pub fn with_invocation(mut self, invocation: impl Into<String>) -> Self {
        self.invocation = Some(invocation.into());
        self
    }

    /// Whether generated identifiers need the option type name as suffix.
    pub fn has_custom_option_type(&self) -> bool {
        self.option_type_name != DEFAULT_OPTION_TYPE
    }

    /// The command line recorded in the provenance header.
    ///
    /// Falls back to a canonical rendering of the non-default settings so
    /// that library callers still get reproducible output.
    pub fn invocation(&self) -> String {
        if let Some(invocation) = &self.invocation {
            return format!("envopts {}", invocation).trim_end().to_string();
        }

        let mut parts = vec![format!("envopts --type {}", self.type_name)];
        if self.has_custom_option_type() {
            parts.push(format!("--option-type {}", self.option_type_name));
        }
        if self.function_prefix != DEFAULT_FUNCTION_PREFIX {
            parts.push(format!("--prefix {}", self.function_prefix));
        }
        if self.tag_key != DEFAULT_TAG_KEY {
            parts.push(format!("--tag {}", self.tag_key));
        }
        if let Some(output) = &self.output_path {
            parts.push(format!("--output {}", output.display()));
        }
        if self.runtime_crate != DEFAULT_RUNTIME_CRATE {
            parts.push(format!("--runtime-crate {}", self.runtime_crate));
        }
        parts.join(" ")
    }

    /// File name used when no output path is configured.
    pub fn default_file_name(&self) -> String {
        format!("{}{}", self.type_name.to_lowercase(), OUTPUT_SUFFIX)
    }

    /// Resolve the output path, deriving it inside `module_dir` when unset.
    pub fn output_path_in(&self, module_dir: &Path) -> PathBuf {
        match &self.output_path {
            Some(path) => path.clone(),
            None => module_dir.join(self.default_file_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GenerationConfig::new("FooEnv");
        assert_eq!(config.option_type_name, "Option");
        assert_eq!(config.function_prefix, "With");
        assert_eq!(config.tag_key, "env");
        assert_eq!(config.runtime_crate, "envopts_runtime");
        assert_eq!(config.source, PathBuf::from("."));
        assert!(config.output_path.is_none());
        assert!(!config.has_custom_option_type());
    }

    #[test]
    fn test_builder() {
        let config = GenerationConfig::new("RabEnv")
            .with_option_type("RabEnvOption")
            .with_prefix("On")
            .with_tag("cfg")
            .with_output("out.rs");

        assert!(config.has_custom_option_type());
        assert_eq!(config.function_prefix, "On");
        assert_eq!(config.tag_key, "cfg");
        assert_eq!(config.output_path, Some(PathBuf::from("out.rs")));
    }

    #[test]
    fn test_default_file_name_is_lowercase() {
        let config = GenerationConfig::new("FooEnv");
        assert_eq!(config.default_file_name(), "fooenv_opts.rs");
        assert_eq!(
            config.output_path_in(Path::new("src/config")),
            PathBuf::from("src/config/fooenv_opts.rs")
        );
    }

    #[test]
    fn test_explicit_output_wins() {
        let config = GenerationConfig::new("FooEnv").with_output("gen/foo.rs");
        assert_eq!(
            config.output_path_in(Path::new("src")),
            PathBuf::from("gen/foo.rs")
        );
    }

    #[test]
    fn test_canonical_invocation() {
        let config = GenerationConfig::new("RabEnv")
            .with_option_type("RabEnvOption")
            .with_prefix("On");
        assert_eq!(
            config.invocation(),
            "envopts --type RabEnv --option-type RabEnvOption --prefix On"
        );
    }

    #[test]
    fn test_recorded_invocation() {
        let config = GenerationConfig::new("FooEnv").with_invocation("--type=FooEnv");
        assert_eq!(config.invocation(), "envopts --type=FooEnv");
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let config: GenerationConfig = toml::from_str(
            r#"
            type = "RabEnv"
            option-type = "RabEnvOption"
            prefix = "On"
            "#,
        )
        .unwrap();

        assert_eq!(config.type_name, "RabEnv");
        assert_eq!(config.option_type_name, "RabEnvOption");
        assert_eq!(config.function_prefix, "On");
        assert_eq!(config.tag_key, "env");
        assert!(config.invocation.is_none());
    }

    #[test]
    fn test_deserialize_rejects_unknown_keys() {
        let result: Result<GenerationConfig, _> = toml::from_str(
            r#"
            type = "FooEnv"
            colour = "blue"
            "#,
        );
        assert!(result.is_err());
    }
}
