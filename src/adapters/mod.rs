//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the integration with the exported artifacts:
//! - `model`: JSON-exported classifiers (logistic regression, random forest)
//! - `json`: File-backed artifact storage

pub mod json;
pub mod model;

pub use json::JsonArtifactStore;
