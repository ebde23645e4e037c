//! Random forest of binary decision trees.
//!
//! Trees are stored as flat node arrays, children always after their parent.
//! A split sends `x[feature] <= threshold` to `left`.

use serde::{Deserialize, Serialize};

use crate::domain::{argmax, FeatureVector};
use crate::ports::{Classifier, InferenceError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Class weights at the leaf (counts or fractions)
    Leaf { value: [f64; 2] },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".into());
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!("node {i} splits on feature {feature} of {n_features}"));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {i} has a non-finite threshold"));
                    }
                    for child in [left, right] {
                        if *child <= i || *child >= self.nodes.len() {
                            return Err(format!("node {i} has invalid child {child}"));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.iter().any(|v| !v.is_finite() || *v < 0.0) || value[0] + value[1] <= 0.0 {
                        return Err(format!("leaf {i} has invalid class weights"));
                    }
                }
            }
        }
        Ok(())
    }

    /// Normalised class distribution of the leaf reached by `x`.
    fn leaf_distribution(&self, x: &[f64]) -> [f64; 2] {
        let mut i = 0;
        loop {
            match &self.nodes[i] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    i = if x[*feature] <= *threshold { *left } else { *right };
                }
                TreeNode::Leaf { value } => {
                    let total = value[0] + value[1];
                    return [value[0] / total, value[1] / total];
                }
            }
        }
    }
}

/// Averaging ensemble of decision trees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestModel {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

impl ForestModel {
    /// Check tree structure against the declared feature count.
    ///
    /// # Errors
    /// Returns a description of the first inconsistency.
    pub fn validate(&self) -> Result<(), String> {
        if self.n_features == 0 {
            return Err("random forest declares zero features".into());
        }
        if self.trees.is_empty() {
            return Err("random forest has no trees".into());
        }
        if let Some(names) = &self.feature_names {
            if names.len() != self.n_features {
                return Err(format!(
                    "feature_names has {} entries but n_features is {}",
                    names.len(),
                    self.n_features
                ));
            }
        }
        for (t, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|e| format!("tree {t}: {e}"))?;
        }
        Ok(())
    }
}

impl Classifier for ForestModel {
    fn kind(&self) -> &'static str {
        "random_forest"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn predict(&self, features: &FeatureVector) -> Result<u8, InferenceError> {
        Ok(argmax(self.predict_proba(features)?))
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<[f64; 2], InferenceError> {
        self.check_input(features)?;

        let mut sum = [0.0, 0.0];
        for tree in &self.trees {
            let [p0, p1] = tree.leaf_distribution(features.values());
            sum[0] += p0;
            sum[1] += p1;
        }
        let n = self.trees.len() as f64;
        Ok([sum[0] / n, sum[1] / n])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(feature: usize, threshold: f64, left: [f64; 2], right: [f64; 2]) -> DecisionTree {
        DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature,
                    threshold,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: left },
                TreeNode::Leaf { value: right },
            ],
        }
    }

    fn forest() -> ForestModel {
        ForestModel {
            feature_names: None,
            n_features: 2,
            trees: vec![
                stump(0, 0.5, [8.0, 2.0], [1.0, 3.0]),
                stump(1, 10.0, [0.5, 0.5], [0.0, 1.0]),
            ],
        }
    }

    #[test]
    fn test_probabilities_average_normalised_leaves() {
        let f = forest();
        assert!(f.validate().is_ok());

        // Tree 0 -> [0.8, 0.2], tree 1 -> [0.5, 0.5]
        let x = FeatureVector::from_values(vec![0.0, 5.0]);
        let p = f.predict_proba(&x).expect("proba");
        assert!((p[0] - 0.65).abs() < 1e-12);
        assert!((p[1] - 0.35).abs() < 1e-12);
        assert_eq!(f.predict(&x), Ok(0));

        // Tree 0 -> [0.25, 0.75], tree 1 -> [0.0, 1.0]
        let x = FeatureVector::from_values(vec![1.0, 20.0]);
        assert_eq!(f.predict(&x), Ok(1));
    }

    #[test]
    fn test_threshold_goes_left() {
        let f = forest();
        let x = FeatureVector::from_values(vec![0.5, 10.0]);
        let p = f.predict_proba(&x).expect("proba");
        assert!((p[0] - 0.65).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_bad_structure() {
        let mut f = forest();
        f.trees[0].nodes[0] = TreeNode::Split {
            feature: 0,
            threshold: 0.5,
            left: 0,
            right: 2,
        };
        assert!(f.validate().unwrap_err().contains("invalid child"));

        let mut f = forest();
        f.trees[1] = stump(5, 1.0, [1.0, 0.0], [0.0, 1.0]);
        assert!(f.validate().unwrap_err().contains("feature 5"));

        let mut f = forest();
        f.trees[0].nodes[1] = TreeNode::Leaf { value: [0.0, 0.0] };
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_rejects_wrong_shape() {
        let err = forest()
            .predict(&FeatureVector::from_values(vec![1.0, 2.0, 3.0]))
            .unwrap_err();
        assert_eq!(err, InferenceError::ShapeMismatch { expected: 2, got: 3 });
    }
}
