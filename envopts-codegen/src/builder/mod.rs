//! Code generation building blocks.
//!
//! - [`CodeBuilder`] - Fluent API for building indented code
//! - [`CodeFragment`] - Intermediate representation for code pieces
//! - [`Renderable`] - Trait for types that can be converted to code fragments
//! - [`Fn`], [`TypeAlias`] - Item builders

mod code_builder;
mod fns;
mod renderable;
mod types;

pub use code_builder::CodeBuilder;
pub use fns::{Fn, Param, TypeAlias};
pub use renderable::{CodeFragment, Renderable};
pub use types::Visibility;
