//! JSON adapter: Implementation of ArtifactSource over files on disk.
//!
//! The training pipeline exports two files:
//! - the classifier (`financial_inclusion_model.json`), tagged by model kind
//! - the encoder table (`label_encoders.json`), one vocabulary per column
//!
//! Every read hashes the raw bytes with SHA-256 so the header and the logs can
//! show exactly which artifacts are being served.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::adapters::model::ExportedModel;
use crate::config::ArtifactPaths;
use crate::domain::EncoderTable;
use crate::ports::{Artifact, ArtifactSource, Classifier, ResourceError};

fn sha256_hex_bytes(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// File-backed artifact store.
#[derive(Debug, Clone)]
pub struct JsonArtifactStore {
    paths: ArtifactPaths,
}

impl JsonArtifactStore {
    #[must_use]
    pub fn new(paths: ArtifactPaths) -> Self {
        Self { paths }
    }

    /// Store reading `financial_inclusion_model.json` and `label_encoders.json` from `dir`.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(ArtifactPaths {
            model: dir.join("financial_inclusion_model.json"),
            encoders: dir.join("label_encoders.json"),
        })
    }

    #[must_use]
    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    fn read(path: &Path) -> Result<(Vec<u8>, String), ResourceError> {
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ResourceError::Missing {
                path: path.to_path_buf(),
            },
            _ => ResourceError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        let digest = sha256_hex_bytes(&bytes);
        Ok((bytes, digest))
    }
}

impl ArtifactSource for JsonArtifactStore {
    fn load_classifier(&self) -> Result<Artifact<Box<dyn Classifier>>, ResourceError> {
        let path = &self.paths.model;
        let (bytes, sha256) = Self::read(path)?;
        let model = ExportedModel::from_json(&bytes)
            .map_err(|reason| ResourceError::malformed(path, reason))?;

        tracing::info!("Read classifier artifact {:?} (sha256={})", path, sha256);

        Ok(Artifact {
            value: model.into_classifier(),
            origin: PathBuf::from(path),
            sha256,
        })
    }

    fn load_encoders(&self) -> Result<Artifact<EncoderTable>, ResourceError> {
        let path = &self.paths.encoders;
        let (bytes, sha256) = Self::read(path)?;
        let table: EncoderTable = serde_json::from_slice(&bytes)
            .map_err(|e| ResourceError::malformed(path, e.to_string()))?;

        tracing::info!(
            "Read encoder artifact {:?} ({} encoders, sha256={})",
            path,
            table.len(),
            sha256
        );

        Ok(Artifact {
            value: table,
            origin: PathBuf::from(path),
            sha256,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Field;
    use tempfile::tempdir;

    #[test]
    fn test_loads_bundled_models() {
        let store = JsonArtifactStore::in_dir("models");
        let classifier = store.load_classifier().expect("bundled model");
        assert_eq!(classifier.value.n_features(), 11);
        assert_eq!(classifier.sha256.len(), 64);
        assert_eq!(classifier.short_digest().len(), 12);

        let encoders = store.load_encoders().expect("bundled encoders");
        assert!(encoders.value.missing_fields().is_empty());
        assert_eq!(
            encoders.value.vocabulary(Field::Country),
            ["Kenya", "Rwanda", "Tanzania", "Uganda"]
        );
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let temp = tempdir().expect("tempdir");
        let store = JsonArtifactStore::in_dir(temp.path());

        let err = store.load_classifier().err().expect("must fail");
        assert!(matches!(err, ResourceError::Missing { .. }));
        assert_eq!(err.path(), temp.path().join("financial_inclusion_model.json"));
        assert!(err.to_string().contains("financial_inclusion_model.json"));

        let err = store.load_encoders().err().expect("must fail");
        assert_eq!(err.path(), temp.path().join("label_encoders.json"));
    }

    #[test]
    fn test_malformed_files() {
        let temp = tempdir().expect("tempdir");
        let dir = temp.path();
        std::fs::write(dir.join("financial_inclusion_model.json"), b"\x80\x04pickle").expect("write");
        std::fs::write(
            dir.join("label_encoders.json"),
            br#"{"country": {"classes": []}}"#,
        )
        .expect("write");

        let store = JsonArtifactStore::in_dir(dir);
        assert!(matches!(
            store.load_classifier().err().expect("must fail"),
            ResourceError::Malformed { .. }
        ));
        let err = store.load_encoders().err().expect("must fail");
        assert!(matches!(err, ResourceError::Malformed { .. }));
        assert!(err.to_string().contains("vocabulary is empty"));
    }

    #[test]
    fn test_digest_is_stable() {
        assert_eq!(
            sha256_hex_bytes(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
