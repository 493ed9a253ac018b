//! Configuration error types

use thiserror::Error;

use crate::types::{BackendKind, Concern};

/// Errors that abort backend resolution
///
/// Every variant is a deployment defect: the process should refuse to start
/// and the operator should fix the configuration source.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The kind setting does not name a known backend
    #[error("Invalid {concern} type ({value}), check your .env file (expected one of: {expected})")]
    UnrecognizedBackendKind {
        concern: Concern,
        value: String,
        expected: String,
    },

    /// A setting the selected backend cannot work without is absent
    #[error("Missing {key} for {concern} backend {kind}, check your .env file")]
    MissingSetting {
        concern: Concern,
        kind: String,
        key: String,
    },

    /// A setting is present but cannot be interpreted
    #[error("Invalid value for {key} ({value}): {reason}")]
    InvalidSetting {
        key: String,
        value: String,
        reason: String,
    },

    /// The process working directory could not be determined
    #[error("Cannot determine working directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),

    /// IO error while reading a settings source
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A settings source exists but could not be parsed
    #[error("Settings source error: {0}")]
    Source(String),
}

impl ConfigError {
    /// Create an unrecognized kind error for `K`'s concern
    pub fn unrecognized<K: BackendKind>(value: impl Into<String>) -> Self {
        Self::UnrecognizedBackendKind {
            concern: K::CONCERN,
            value: value.into(),
            expected: K::expected(),
        }
    }

    /// Create a missing setting error for a selected kind
    pub fn missing<K: BackendKind>(kind: K, key: impl Into<String>) -> Self {
        Self::MissingSetting {
            concern: K::CONCERN,
            kind: kind.to_string(),
            key: key.into(),
        }
    }

    /// Create an invalid setting error
    pub fn invalid(key: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Concern the error belongs to, when it is tied to one
    pub fn concern(&self) -> Option<Concern> {
        match self {
            Self::UnrecognizedBackendKind { concern, .. } | Self::MissingSetting { concern, .. } => {
                Some(*concern)
            }
            _ => None,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
