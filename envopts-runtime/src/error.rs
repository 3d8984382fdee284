use std::fmt::Display;

use thiserror::Error;

/// Failure reported by a [`ParseEnv`](crate::ParseEnv) implementation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("required environment variable '{key}' is not set")]
    Missing { key: String },

    #[error("environment variable '{key}' has invalid value '{value}': {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    Custom(String),
}

impl Error {
    pub fn missing(key: impl Into<String>) -> Self {
        Self::Missing { key: key.into() }
    }

    pub fn invalid(key: impl Into<String>, value: impl Into<String>, reason: impl Display) -> Self {
        Self::Invalid {
            key: key.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    pub fn custom(message: impl Display) -> Self {
        Self::Custom(message.to_string())
    }
}
