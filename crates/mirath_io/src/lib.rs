//! mirath_io — case-file loading, canonical JSON, and artifact hashing.
//!
//! Strictly local and offline: no network I/O anywhere in this crate.
//! Canonicalization (sorted keys, compact, no trailing newline) is the single
//! source of truth for every digest and prefixed artifact ID.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for mirath_io (loader, canonical_json, hasher).
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors.
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON (de)serialization errors with a best-effort location hint.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Hashing / ID-shape errors.
    #[error("hash error: {0}")]
    Hash(String),

    /// Generic validation / invariants (schema version, timestamps).
    #[error("invalid: {0}")]
    Invalid(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json reports line/column, not a pointer; keep the root pointer
        // and let the message carry the location.
        IoError::Json { pointer: "/".to_string(), msg: e.to_string() }
    }
}

impl From<mirath_core::errors::CoreError> for IoError {
    fn from(e: mirath_core::errors::CoreError) -> Self {
        IoError::Invalid(e.to_string())
    }
}

pub mod canonical_json;
pub mod case;
pub mod hasher;

pub mod prelude {
    pub use crate::{IoError, IoResult};

    pub use crate::canonical_json::{canonical_bytes_of, to_canonical_bytes, write_canonical_file};
    pub use crate::case::{load_case_file, CaseFile, HeirsSection, CASE_SCHEMA_VERSION};
    pub use crate::hasher::{
        case_id_from_bytes, res_id_from_canonical, run_id_from_canonical, sha256_canonical,
        sha256_hex,
    };
}
