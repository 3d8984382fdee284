//! Core types and utilities for the envopts generator.
//!
//! This crate provides the configuration value threaded through a
//! generation run, identifier helpers and generated-file writing.

mod config;
mod file;
mod utils;

// Configuration
pub use config::{
    DEFAULT_FUNCTION_PREFIX, DEFAULT_OPTION_TYPE, DEFAULT_RUNTIME_CRATE, DEFAULT_TAG_KEY,
    GenerationConfig, OUTPUT_SUFFIX,
};
// File operations
pub use file::{DO_NOT_EDIT, File, FileRules, is_generated, provenance_header};
// String utilities
pub use utils::{to_pascal_case, unraw, upper_first};
