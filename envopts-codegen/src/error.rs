use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::{output::CleanupError, pipeline::Stage};

/// Result type for generation runs (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("could not resolve a single module at '{}': {reason}", location.display())]
    #[diagnostic(
        code(envopts::package_resolution),
        help("pass the module file explicitly, e.g. --source src/config.rs")
    )]
    PackageResolution { location: PathBuf, reason: String },

    #[error("failed to read '{}'", path.display())]
    #[diagnostic(code(envopts::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse module source")]
    #[diagnostic(code(envopts::syntax))]
    Syntax {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("type '{type_name}' not found in '{}'", module.display())]
    #[diagnostic(
        code(envopts::type_not_found),
        help("only top-level items of the module file are searched")
    )]
    TypeNotFound { type_name: String, module: PathBuf },

    #[error("type '{type_name}' is a {kind}, not a struct")]
    #[diagnostic(code(envopts::not_a_struct))]
    NotAStruct { type_name: String, kind: String },

    #[error("type '{type_name}' is not supported: {reason}")]
    #[diagnostic(code(envopts::unsupported))]
    Unsupported { type_name: String, reason: String },

    #[error("'{name}' for '{type_name}' would be generated for both {first} and {second}")]
    #[diagnostic(
        code(envopts::name_collision),
        help("rename one of the fields, or exclude it from generation by dropping its tag")
    )]
    NameCollision {
        type_name: String,
        name: String,
        first: String,
        second: String,
    },

    #[error("generated code for '{type_name}' does not parse")]
    #[diagnostic(
        code(envopts::emit_format),
        help("this is a generator bug; the unformatted output is attached")
    )]
    EmitFormat {
        type_name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("failed to write '{}'", path.display())]
    #[diagnostic(code(envopts::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("post-processing '{}' failed", path.display())]
    #[diagnostic(
        code(envopts::post_process),
        help("the file was written but not cleaned up; rerun the formatter by hand")
    )]
    PostProcess {
        path: PathBuf,
        #[source]
        source: CleanupError,
    },
}

impl Error {
    /// The pipeline stage this error was raised in.
    pub fn stage(&self) -> Stage {
        match self {
            Self::PackageResolution { .. }
            | Self::Read { .. }
            | Self::Syntax { .. }
            | Self::TypeNotFound { .. }
            | Self::NotAStruct { .. }
            | Self::Unsupported { .. } => Stage::Idle,
            Self::NameCollision { .. } => Stage::Filtered,
            Self::EmitFormat { .. } => Stage::Emitted,
            Self::Write { .. } => Stage::Formatted,
            Self::PostProcess { .. } => Stage::Written,
        }
    }

    /// The raw generated text for an [`Error::EmitFormat`], for diagnosis.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            Self::EmitFormat { src, .. } => Some(src.inner().as_str()),
            _ => None,
        }
    }

    /// Create a syntax error for a module file from a `syn` error
    pub(crate) fn syntax(err: &syn::Error, src: &str, filename: &str) -> Box<Self> {
        Box::new(Error::Syntax {
            src: NamedSource::new(filename, src.to_string()),
            span: span_of(err, src),
            message: err.to_string(),
        })
    }

    /// Create an emit error carrying the unformatted generated text
    pub(crate) fn emit_format(err: &syn::Error, type_name: &str, raw: &str) -> Box<Self> {
        Box::new(Error::EmitFormat {
            type_name: type_name.to_string(),
            src: NamedSource::new(
                format!("{}{}", type_name.to_lowercase(), envopts_core::OUTPUT_SUFFIX),
                raw.to_string(),
            ),
            span: span_of(err, raw),
            message: err.to_string(),
        })
    }
}

/// Map a `syn` error position back to a byte span in `src`.
fn span_of(err: &syn::Error, src: &str) -> Option<SourceSpan> {
    let start = err.span().start();
    let offset = crate::loader::offset_of(src, start)?;
    let len = src[offset..]
        .chars()
        .next()
        .map(char::len_utf8)
        .unwrap_or(0);
    Some(SourceSpan::from((offset, len)))
}
