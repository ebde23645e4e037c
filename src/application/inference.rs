//! Inference service: Encodes a respondent and invokes the classifier.
//!
//! This service coordinates:
//! - Record validation
//! - Categorical encoding
//! - Class prediction and probability estimation
//! - Cross-checking the two classifier views

use std::sync::Arc;

use crate::application::Resources;
use crate::domain::{encode, EncodingError, FeatureVector, Prediction, RespondentRecord};
use crate::ports::InferenceError;
use crate::FinclusionError;

/// Service for running one prediction at a time against shared resources.
#[derive(Debug, Clone)]
pub struct InferenceService {
    resources: Arc<Resources>,
}

impl InferenceService {
    /// Create a new inference service over loaded resources.
    #[must_use]
    pub fn new(resources: Arc<Resources>) -> Self {
        Self { resources }
    }

    #[must_use]
    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    /// Map the record into the classifier's numeric space.
    ///
    /// # Errors
    /// Returns `EncodingError` for a value outside its field's vocabulary.
    pub fn encode(&self, record: &RespondentRecord) -> Result<FeatureVector, EncodingError> {
        encode(record, self.resources.encoders())
    }

    /// Score an encoded vector.
    ///
    /// The vector's column order is not checked: values in the wrong
    /// positions are scored as if they were right.
    ///
    /// # Errors
    /// Returns `InferenceError` if the classifier rejects the vector or its
    /// label and probabilities do not agree.
    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction, InferenceError> {
        let classifier = self.resources.classifier();

        let label = classifier.predict(features)?;
        let probabilities = classifier.predict_proba(features)?;

        Prediction::new(label, probabilities).map_err(InferenceError::Inconsistent)
    }

    /// Run the full pipeline for one submission.
    ///
    /// Performs:
    /// 1. Validate the record
    /// 2. Encode categorical fields
    /// 3. Predict
    ///
    /// # Errors
    /// Returns `Validation`, `Encoding` or `Inference` errors; none are fatal.
    pub fn run(&self, record: &RespondentRecord) -> Result<Prediction, FinclusionError> {
        tracing::info!("Starting prediction pipeline...");

        tracing::debug!("Step 1: Validating respondent record...");
        record
            .validate()
            .map_err(|errors| FinclusionError::Validation(errors.join(", ")))?;

        tracing::debug!("Step 2: Encoding categorical fields...");
        let features = self.encode(record)?;

        tracing::debug!("Step 3: Invoking {} classifier...", self.resources.classifier().kind());
        let prediction = self.predict(&features)?;

        tracing::info!(
            "Prediction complete: label={}, confidence={:.2}%",
            prediction.label,
            prediction.confidence() * 100.0
        );

        Ok(prediction)
    }
}
