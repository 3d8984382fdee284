//! Core operations.
//!
//! Business logic for the envopts binary, separated from argument
//! parsing and output rendering.

pub mod generate;

pub use generate::{GenerateOptions, generate};
