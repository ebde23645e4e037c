//! Resource loading: Reads the classifier and encoders once per process.
//!
//! The loader is an explicit service object. The first successful `load()`
//! stores an `Arc<Resources>`; every later call hands out the same `Arc`
//! without touching storage. Failures are not cached.

use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::{EncoderTable, FEATURE_NAMES};
use crate::ports::{Artifact, ArtifactSource, Classifier, ResourceError};

/// The classifier and encoders, immutable once loaded.
pub struct Resources {
    classifier: Box<dyn Classifier>,
    encoders: EncoderTable,
    model_digest: Option<String>,
    encoders_digest: Option<String>,
}

impl std::fmt::Debug for Resources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resources")
            .field("classifier", &self.classifier.kind())
            .field("encoders", &self.encoders.len())
            .field("model_digest", &self.model_digest)
            .field("encoders_digest", &self.encoders_digest)
            .finish()
    }
}

impl Resources {
    /// Wrap already-built parts without schema checks.
    #[must_use]
    pub fn new(classifier: Box<dyn Classifier>, encoders: EncoderTable) -> Self {
        Self {
            classifier,
            encoders,
            model_digest: None,
            encoders_digest: None,
        }
    }

    /// Combine loaded artifacts, checking that they fit the respondent record.
    ///
    /// The encoders must cover every categorical field. The classifier must
    /// take one feature per field and, when it records column names, list
    /// them in the record's order.
    ///
    /// # Errors
    /// Returns `ResourceError::Malformed` naming the offending artifact.
    pub fn assemble(
        classifier: Artifact<Box<dyn Classifier>>,
        encoders: Artifact<EncoderTable>,
    ) -> Result<Self, ResourceError> {
        let missing = encoders.value.missing_fields();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|f| f.name()).collect();
            return Err(ResourceError::malformed(
                &encoders.origin,
                format!("no encoder for categorical fields: {}", names.join(", ")),
            ));
        }
        for extra in encoders.value.extra_columns() {
            tracing::warn!("Ignoring encoder for column {:?}: not a categorical field", extra);
        }

        let model = &classifier.value;
        if model.n_features() != FEATURE_NAMES.len() {
            return Err(ResourceError::malformed(
                &classifier.origin,
                format!(
                    "model expects {} features, respondent record has {}",
                    model.n_features(),
                    FEATURE_NAMES.len()
                ),
            ));
        }
        match model.feature_names() {
            Some(names) if names.iter().map(String::as_str).ne(FEATURE_NAMES) => {
                return Err(ResourceError::malformed(
                    &classifier.origin,
                    format!(
                        "model feature order [{}] does not match [{}]",
                        names.join(", "),
                        FEATURE_NAMES.join(", ")
                    ),
                ));
            }
            Some(_) => {}
            None => tracing::warn!(
                "Model {:?} does not record feature names; column order is trusted",
                classifier.origin
            ),
        }

        tracing::info!(
            "Resources ready: {} model (sha256={}), encoders (sha256={})",
            model.kind(),
            classifier.short_digest(),
            encoders.short_digest()
        );

        Ok(Self {
            model_digest: Some(classifier.sha256),
            encoders_digest: Some(encoders.sha256),
            classifier: classifier.value,
            encoders: encoders.value,
        })
    }

    #[must_use]
    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    #[must_use]
    pub fn encoders(&self) -> &EncoderTable {
        &self.encoders
    }

    /// Short SHA-256 prefixes of the model and encoder artifacts.
    #[must_use]
    pub fn digests(&self) -> (Option<&str>, Option<&str>) {
        fn short(digest: &Option<String>) -> Option<&str> {
            digest.as_deref().map(|s| &s[..s.len().min(12)])
        }
        (short(&self.model_digest), short(&self.encoders_digest))
    }
}

/// Loads resources once and hands out the cached instance.
pub struct ResourceLoader<S: ArtifactSource> {
    source: S,
    cached: Mutex<Option<Arc<Resources>>>,
}

impl<S: ArtifactSource> ResourceLoader<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            cached: Mutex::new(None),
        }
    }

    /// Load the classifier and encoders, or return the cached pair.
    ///
    /// # Errors
    /// Returns `ResourceError` if either artifact is missing or malformed.
    pub fn load(&self) -> Result<Arc<Resources>, ResourceError> {
        // The slot only ever holds a finished Arc, so a poisoned lock is still usable.
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(resources) = cached.as_ref() {
            tracing::debug!("Serving cached resources");
            return Ok(Arc::clone(resources));
        }

        tracing::info!("Loading model and encoders...");
        let classifier = self.source.load_classifier()?;
        let encoders = self.source.load_encoders()?;
        let resources = Arc::new(Resources::assemble(classifier, encoders)?);

        *cached = Some(Arc::clone(&resources));
        Ok(resources)
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.cached
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
