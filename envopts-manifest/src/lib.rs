//! `envopts.toml` parsing and validation.
//!
//! A manifest lists every struct to generate options for, so one
//! `envopts --manifest envopts.toml` replaces a series of single-type
//! invocations:
//!
//! ```
//! use envopts_manifest::Manifest;
//!
//! let manifest: Manifest = r#"
//! [defaults]
//! source = "src/config.rs"
//!
//! [[target]]
//! type = "FooEnv"
//!
//! [[target]]
//! type = "RabEnv"
//! option-type = "RabEnvOption"
//! prefix = "On"
//! "#
//! .parse()
//! .unwrap();
//!
//! assert_eq!(manifest.targets().len(), 2);
//! assert_eq!(manifest.targets()[1].function_prefix, "On");
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;
mod validate;

use std::path::Path;

pub use error::{Error, Result, SourceContext};
pub use manifest::{MANIFEST_FILE_NAME, Manifest};

/// Parse an envopts.toml file from the given path
pub fn parse_file(path: impl AsRef<Path>) -> Result<Manifest> {
    Manifest::from_file(path)
}

/// Parse an envopts.toml from a string (uses "envopts.toml" as filename)
pub fn parse_str(content: &str) -> Result<Manifest> {
    content.parse()
}
