//! Model adapters: Classifiers exported from the training pipeline as JSON.
//!
//! The artifact carries a `kind` tag selecting the model family.

mod forest;
mod logistic;

use serde::{Deserialize, Serialize};

use crate::ports::Classifier;

pub use forest::{DecisionTree, ForestModel, TreeNode};
pub use logistic::{LogisticModel, StandardScaler};

/// Model parameters exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExportedModel {
    LogisticRegression(LogisticModel),
    RandomForest(ForestModel),
}

impl ExportedModel {
    /// Parse and validate a JSON model.
    ///
    /// # Errors
    /// Returns a description of the parse or validation failure.
    pub fn from_json(bytes: &[u8]) -> Result<Self, String> {
        let model: Self = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;
        model.validate()?;
        Ok(model)
    }

    /// Check parameter shapes.
    ///
    /// # Errors
    /// Returns a description of the first inconsistency.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::LogisticRegression(m) => m.validate(),
            Self::RandomForest(m) => m.validate(),
        }
    }

    #[must_use]
    pub fn into_classifier(self) -> Box<dyn Classifier> {
        match self {
            Self::LogisticRegression(m) => Box::new(m),
            Self::RandomForest(m) => Box::new(m),
        }
    }
}
