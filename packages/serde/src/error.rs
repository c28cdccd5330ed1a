//! Error types for loading and snapshotting environments.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while converting environments to and from serde
/// documents.
#[derive(Debug, Error)]
pub enum Error {
    /// The document file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The document is not valid JSON.
    #[error("malformed environment document: {0}")]
    Parse(#[source] serde_json::Error),

    /// The document root is not a JSON object.
    #[error("environment document must be an object, found {found}")]
    NotAnObject { found: &'static str },

    /// A value did not deserialize into its registered type.
    #[error("invalid value for '{key}': {source}")]
    Decode {
        key: &'static str,
        source: serde_json::Error,
    },

    /// A value could not be serialized.
    #[error("failed to encode '{key}': {source}")]
    Encode {
        key: &'static str,
        source: serde_json::Error,
    },

    /// The document names a key no registered type uses (strict mode only).
    #[error("unknown environment key '{key}'")]
    UnknownKey { key: String },

    /// Two different types were registered under the same key.
    #[error("key '{key}' is already registered for {existing}")]
    DuplicateKey {
        key: &'static str,
        existing: &'static str,
    },

    /// A type declared an empty key.
    #[error("empty environment key declared by {type_name}")]
    EmptyKey { type_name: &'static str },
}

/// Result type alias for serde environment operations.
pub type Result<T> = std::result::Result<T, Error>;
