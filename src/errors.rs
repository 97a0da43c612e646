//! Typed errors for the StitchByte toolkit.
//!
//! - `ConfigError` covers reading and writing `stitchbyte.toml`
//! - `TemplateError` covers template drafts, submission payloads and backend
//!   replies
//!
//! Widget generation has no error type: an unusable phone number yields the
//! placeholder snippet instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::template::ValidationErrors;

/// Errors from loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Errors from template drafts and their submission.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to read template draft at {path}: {source}")]
    DraftReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse template draft at {path}: {source}")]
    DraftParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Template draft is invalid: {0}")]
    Invalid(ValidationErrors),

    #[error("Failed to encode {field} as JSON: {source}")]
    Encode {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Template submission rejected: {message}")]
    Rejected { message: String },
}
