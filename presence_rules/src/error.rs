//! Error types for loading and validating rule documents.

use thiserror::Error;

/// Failures raised while loading or validating rules.
///
/// The engine itself never sees these: a loader that hits one falls back to
/// engine defaults for the affected domain.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("Failed to parse TOML rules: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON rules: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid rule '{field}': {reason}")]
    InvalidRule { field: String, reason: String },

    #[error("Invalid domain '{domain}': {reason}")]
    InvalidDomain { domain: String, reason: String },

    #[error("Unsupported rules file format: {0}")]
    UnsupportedFormat(String),

    #[error("Rules I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RulesError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        RulesError::InvalidRule {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RulesError>;
