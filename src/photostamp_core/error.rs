use std::path::PathBuf;
use thiserror::Error;

use crate::photostamp_core::report::Outcome;

#[derive(Error, Debug)]
pub enum PhotostampError {
    // Path expansion
    #[error("Path not found: {path}: {source}")]
    PathNotFound {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    // Sidecar resolution
    #[error("No metadata file found for {0}")]
    NoSidecar(PathBuf),

    #[error("Failed to open metadata file {path}: {source}")]
    SidecarOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode metadata file {path}: {source}")]
    MetadataDecode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid timestamp {value:?} in {path}: {reason}")]
    InvalidTimestamp {
        path: PathBuf,
        value: String,
        reason: String,
    },

    // Timestamp writes
    #[error("Failed to update timestamp of {path}: {source}")]
    AttributeWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to update timestamp of {path}: creation time cannot be set on this platform")]
    CreationTimeUnsupported { path: PathBuf },
}

impl PhotostampError {
    /// Outcome recorded in the report when this error ends the processing of a file.
    pub fn outcome(&self) -> Outcome {
        match self {
            PhotostampError::NoSidecar(_) => Outcome::Skipped,
            _ => Outcome::Failed,
        }
    }

    /// Short human-readable reason shown next to the file in the report.
    pub fn reason(&self) -> &'static str {
        match self {
            PhotostampError::PathNotFound { .. } => "path or directory not found",
            PhotostampError::NoSidecar(_) => "no metadata file found",
            PhotostampError::SidecarOpen { .. }
            | PhotostampError::MetadataDecode { .. }
            | PhotostampError::InvalidTimestamp { .. } => "failed to read timestamp",
            PhotostampError::AttributeWrite { .. }
            | PhotostampError::CreationTimeUnsupported { .. } => "failed to update timestamp",
        }
    }

    /// Detailed diagnostic text. Empty for outcomes that are not failures.
    pub fn diagnostic(&self) -> String {
        match self.outcome() {
            Outcome::Failed => self.to_string(),
            _ => String::new(),
        }
    }
}

/// Result type for photostamp operations.
pub type Result<T> = std::result::Result<T, PhotostampError>;
