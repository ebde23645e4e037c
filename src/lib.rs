//! # Finclusion
//!
//! Financial inclusion prediction for survey respondents.
//!
//! This crate provides:
//! - A typed respondent record and the categorical encoders frozen at training time
//! - A narrow classifier port with JSON-exported model adapters
//! - A load-once resource cache shared by every submission
//! - Terminal UI form for entering one respondent at a time
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (RespondentRecord, EncoderTable, FeatureVector, Prediction)
//! - `ports`: Trait definitions for the classifier and artifact storage
//! - `adapters`: Concrete implementations (JSON artifacts, logistic regression, random forest)
//! - `application`: Resource loading, inference and the submission state machine
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{AccountOutcome, EncoderTable, FeatureVector, Prediction, RespondentRecord};

/// Result type for Finclusion operations
pub type Result<T> = std::result::Result<T, FinclusionError>;

/// Main error type for Finclusion
#[derive(Debug, thiserror::Error)]
pub enum FinclusionError {
    #[error(transparent)]
    Resource(#[from] ports::ResourceError),

    #[error(transparent)]
    Encoding(#[from] domain::EncodingError),

    #[error("Model inference failed: {0}")]
    Inference(#[from] ports::InferenceError),

    #[error("Invalid respondent data: {0}")]
    Validation(String),
}

impl FinclusionError {
    /// Resource failures halt the session; everything else is per-submission.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Resource(_))
    }
}
