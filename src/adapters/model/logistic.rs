//! Logistic regression exported as plain coefficients.

use serde::{Deserialize, Serialize};

use crate::domain::{argmax, FeatureVector};
use crate::ports::{Classifier, InferenceError};

/// Per-feature standardisation applied before the linear term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Binary logistic regression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl LogisticModel {
    /// Check parameter shapes.
    ///
    /// # Errors
    /// Returns a description of the first inconsistency.
    pub fn validate(&self) -> Result<(), String> {
        let n = self.coefficients.len();
        if n == 0 {
            return Err("logistic regression has no coefficients".into());
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err("logistic regression parameters must be finite".into());
        }
        if let Some(names) = &self.feature_names {
            if names.len() != n {
                return Err(format!(
                    "feature_names has {} entries but there are {n} coefficients",
                    names.len()
                ));
            }
        }
        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != n || scaler.scale.len() != n {
                return Err("scaler lengths do not match coefficients length".into());
            }
            if scaler.scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
                return Err("scaler scale entries must be finite and non-zero".into());
            }
        }
        Ok(())
    }

    /// Signed distance to the decision boundary.
    #[must_use]
    pub fn decision_function(&self, x: &[f64]) -> f64 {
        let linear: f64 = match &self.scaler {
            Some(scaler) => x
                .iter()
                .zip(&self.coefficients)
                .zip(scaler.mean.iter().zip(&scaler.scale))
                .map(|((v, w), (m, s))| w * (v - m) / s)
                .sum(),
            None => x.iter().zip(&self.coefficients).map(|(v, w)| w * v).sum(),
        };
        linear + self.intercept
    }
}

impl Classifier for LogisticModel {
    fn kind(&self) -> &'static str {
        "logistic_regression"
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn predict(&self, features: &FeatureVector) -> Result<u8, InferenceError> {
        // Derived from the probabilities so the two views cannot drift apart
        // when the decision value rounds to exactly 0.5.
        Ok(argmax(self.predict_proba(features)?))
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<[f64; 2], InferenceError> {
        self.check_input(features)?;
        let p1 = sigmoid(self.decision_function(features.values()));
        if !p1.is_finite() {
            return Err(InferenceError::InvalidOutput(
                "decision function produced a non-finite probability".into(),
            ));
        }
        Ok([1.0 - p1, p1])
    }
}
