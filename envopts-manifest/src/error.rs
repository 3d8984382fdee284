use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Carries the manifest text and file name so error constructors do not
/// need them passed one by one.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    pub fn target_error(
        &self,
        index: usize,
        span: Option<SourceSpan>,
        source: toml::de::Error,
    ) -> Box<Error> {
        Box::new(Error::Target {
            src: self.named_source(),
            span,
            number: index + 1,
            reason: source.message().to_string(),
        })
    }

    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    pub fn reserved_keyword_error(
        &self,
        name: impl Into<String>,
        key: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::ReservedKeyword {
            src: self.named_source(),
            span,
            name: name.into(),
            key: key.into(),
        })
    }

    pub fn invalid_identifier_error(
        &self,
        name: impl Into<String>,
        key: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidIdentifier {
            src: self.named_source(),
            span,
            name: name.into(),
            key: key.into(),
            reason: reason.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(
        code(envopts::manifest::io),
        help("pass --manifest <path> or run from the directory holding envopts.toml")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse envopts.toml")]
    #[diagnostic(code(envopts::manifest::parse))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid target #{number}: {reason}")]
    #[diagnostic(
        code(envopts::manifest::target),
        help("each [[target]] needs a `type` key; see `envopts --help` for the other keys")
    )]
    Target {
        #[source_code]
        src: NamedSource<String>,
        #[label("in this target")]
        span: Option<SourceSpan>,
        number: usize,
        reason: String,
    },

    #[error("manifest declares no targets")]
    #[diagnostic(
        code(envopts::manifest::no_targets),
        help("add a [[target]] table with at least `type = \"MyEnv\"`")
    )]
    NoTargets {
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("targets '{first}' and '{second}' write the same file '{path}'")]
    #[diagnostic(
        code(envopts::manifest::duplicate_output),
        help("set `output` on one of them to a distinct file")
    )]
    DuplicateOutput {
        #[source_code]
        src: NamedSource<String>,
        #[label("first written by '{first}'")]
        first_span: Option<SourceSpan>,
        #[label("then overwritten by '{second}'")]
        second_span: Option<SourceSpan>,
        first: String,
        second: String,
        path: PathBuf,
    },

    #[error("type '{type_name}' in '{source_path}' is listed more than once")]
    #[diagnostic(
        code(envopts::manifest::duplicate_target),
        help("remove the repeated [[target]] table")
    )]
    DuplicateTarget {
        #[source_code]
        src: NamedSource<String>,
        #[label("listed again here")]
        span: Option<SourceSpan>,
        type_name: String,
        source_path: PathBuf,
    },

    #[error("{message}")]
    #[diagnostic(code(envopts::manifest::validation))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("'{name}' is a Rust reserved keyword")]
    #[diagnostic(
        code(envopts::manifest::reserved_keyword),
        help("`{key}` ends up in generated Rust code; rename '{name}'")
    )]
    ReservedKeyword {
        #[source_code]
        src: NamedSource<String>,
        #[label("reserved keyword used here")]
        span: Option<SourceSpan>,
        name: String,
        key: String,
    },

    #[error("invalid `{key}` value '{name}'")]
    #[diagnostic(
        code(envopts::manifest::invalid_identifier),
        help("{reason}. Use only letters, numbers, and underscores, starting with a letter or underscore.")
    )]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: Option<SourceSpan>,
        name: String,
        key: String,
        reason: String,
    },
}
