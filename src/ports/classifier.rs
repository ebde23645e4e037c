//! Classifier port: Trait for the trained model.
//!
//! This trait hides the model format from the application logic. A classifier
//! is consumed only through its two views of one inference: a class label and
//! a probability for each class.

use crate::domain::{FeatureVector, OutputViolation};

/// Errors that can occur while scoring a feature vector.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    #[error("Expected {expected} features, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("Feature at position {0} is not a finite number")]
    NonFiniteInput(usize),

    #[error("Classifier produced an invalid output: {0}")]
    InvalidOutput(String),

    #[error("Classifier views disagree: {0}")]
    Inconsistent(OutputViolation),
}

/// Trait for binary classifiers.
///
/// Implementations provide:
/// - Class prediction (0 or 1)
/// - Class probability estimates `[p0, p1]`
/// - Optional column names recorded at training time
pub trait Classifier: Send + Sync {
    /// Short name of the model family, for logs and the header.
    fn kind(&self) -> &'static str;

    /// Number of features the model was trained on.
    fn n_features(&self) -> usize;

    /// Column names in training order, when the artifact records them.
    fn feature_names(&self) -> Option<&[String]>;

    /// Predict the class label.
    ///
    /// # Errors
    /// Returns `InferenceError` if the vector has the wrong shape or values.
    fn predict(&self, features: &FeatureVector) -> Result<u8, InferenceError>;

    /// Estimate class probabilities `[p0, p1]`.
    ///
    /// # Errors
    /// Returns `InferenceError` if the vector has the wrong shape or values.
    fn predict_proba(&self, features: &FeatureVector) -> Result<[f64; 2], InferenceError>;

    /// Reject vectors of the wrong length or with non-finite values.
    ///
    /// # Errors
    /// Returns `ShapeMismatch` or `NonFiniteInput`.
    fn check_input(&self, features: &FeatureVector) -> Result<(), InferenceError> {
        if features.len() != self.n_features() {
            return Err(InferenceError::ShapeMismatch {
                expected: self.n_features(),
                got: features.len(),
            });
        }
        match features.values().iter().position(|v| !v.is_finite()) {
            Some(i) => Err(InferenceError::NonFiniteInput(i)),
            None => Ok(()),
        }
    }
}
