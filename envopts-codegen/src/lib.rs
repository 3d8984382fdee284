//! Functional option generation for environment-tagged structs.
//!
//! Given a module file and the name of a struct declared in it, the
//! generator writes a child module holding:
//!
//! - an option type, a boxed `FnOnce(&mut T)`
//! - a from-struct constructor that replaces the whole target
//! - a parse-env function that populates a default `T` through `envopts-runtime`
//! - an apply-options aggregator (declared defaults first, then each option in order)
//! - one setter per `pub` field carrying the tag attribute
//!
//! # Module Organization
//!
//! - [`loader`] - Module resolution and struct description
//! - [`filter`] - Field eligibility
//! - [`naming`] - Generated identifier names
//! - [`emit`] - Text emission
//! - [`output`] - Validation, formatting, writing, import cleanup
//! - [`pipeline`] - Run orchestration and stages
//! - [`builder`] - Code generation building blocks

pub mod builder;
pub mod emit;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod naming;
pub mod output;
pub mod pipeline;

pub use error::{Error, Result};
pub use model::{FieldDescriptor, Import, LoadedType, SourcePackage, TypeDescriptor};
pub use output::{CleanupError, ImportCleaner, Outcome, OutputPipeline, Rustfmt};
pub use pipeline::{Generator, RunContext, Stage};
