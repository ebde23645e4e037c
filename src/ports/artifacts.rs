//! Artifact port: Trait for reading the trained artifacts.
//!
//! This trait abstracts where the model and encoders come from (files on
//! disk in production, in-memory fixtures in tests).

use std::path::PathBuf;

use crate::domain::EncoderTable;
use crate::ports::Classifier;

/// Errors that can occur while loading artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("Missing resource file: {}", .path.display())]
    Missing { path: PathBuf },

    #[error("Malformed resource {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ResourceError {
    /// Path of the artifact that failed.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Missing { path } | Self::Malformed { path, .. } | Self::Io { path, .. } => path,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// A loaded artifact with where it came from.
pub struct Artifact<T> {
    pub value: T,

    /// Origin of the artifact (file path or fixture name)
    pub origin: PathBuf,

    /// Hex SHA-256 of the raw bytes
    pub sha256: String,
}

impl<T> Artifact<T> {
    /// First 12 hex digits of the digest.
    #[must_use]
    pub fn short_digest(&self) -> &str {
        &self.sha256[..self.sha256.len().min(12)]
    }
}

/// Trait for artifact storage.
///
/// Each call reads storage again; caching is the loader's job.
pub trait ArtifactSource: Send + Sync {
    /// Read and deserialize the trained classifier.
    ///
    /// # Errors
    /// Returns `ResourceError::Missing` if absent, `Malformed` if unreadable as a model.
    fn load_classifier(&self) -> Result<Artifact<Box<dyn Classifier>>, ResourceError>;

    /// Read and deserialize the encoder table.
    ///
    /// # Errors
    /// Returns `ResourceError::Missing` if absent, `Malformed` if unreadable as encoders.
    fn load_encoders(&self) -> Result<Artifact<EncoderTable>, ResourceError>;
}
