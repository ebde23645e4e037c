//! Prediction result types.
//!
//! Represents the output of the bank account ownership classifier.

use serde::{Deserialize, Serialize};

/// Tolerance for `p0 + p1 == 1`.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Predicted account ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountOutcome {
    /// Class 1: likely to own a bank account
    LikelyBanked,
    /// Class 0: unlikely to own a bank account
    UnlikelyBanked,
}

impl AccountOutcome {
    /// Map a class label to an outcome.
    #[must_use]
    pub fn from_label(label: u8) -> Option<Self> {
        match label {
            0 => Some(Self::UnlikelyBanked),
            1 => Some(Self::LikelyBanked),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> u8 {
        match self {
            Self::UnlikelyBanked => 0,
            Self::LikelyBanked => 1,
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::LikelyBanked => "The respondent is likely to own a bank account",
            Self::UnlikelyBanked => "The respondent is unlikely to own a bank account",
        }
    }
}

impl std::fmt::Display for AccountOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LikelyBanked => write!(f, "LIKELY BANKED"),
            Self::UnlikelyBanked => write!(f, "UNLIKELY BANKED"),
        }
    }
}

/// Index of the larger probability; ties go to class 0.
#[must_use]
pub fn argmax(probabilities: [f64; 2]) -> u8 {
    if probabilities[1] > probabilities[0] {
        1
    } else {
        0
    }
}

/// Why a classifier output was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputViolation {
    LabelOutOfRange(u8),
    NotAProbability([f64; 2]),
    DoesNotSumToOne(f64),
    LabelDisagrees { label: u8, argmax: u8 },
}

impl std::fmt::Display for OutputViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LabelOutOfRange(label) => write!(f, "label {label} is not 0 or 1"),
            Self::NotAProbability(p) => {
                write!(f, "probabilities [{}, {}] outside [0, 1]", p[0], p[1])
            }
            Self::DoesNotSumToOne(sum) => write!(f, "probabilities sum to {sum}"),
            Self::LabelDisagrees { label, argmax } => {
                write!(f, "label {label} disagrees with probability argmax {argmax}")
            }
        }
    }
}

/// Outcome of one submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Binary prediction (0 = no account, 1 = account)
    pub label: u8,

    /// Class probabilities `[p0, p1]`
    pub probabilities: [f64; 2],

    pub outcome: AccountOutcome,

    /// Timestamp of prediction
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Prediction {
    /// Combine the two classifier views into one prediction.
    ///
    /// # Errors
    /// Returns the first violated output invariant.
    pub fn new(label: u8, probabilities: [f64; 2]) -> Result<Self, OutputViolation> {
        let outcome = AccountOutcome::from_label(label).ok_or(OutputViolation::LabelOutOfRange(label))?;

        if probabilities
            .iter()
            .any(|p| !p.is_finite() || !(0.0..=1.0).contains(p))
        {
            return Err(OutputViolation::NotAProbability(probabilities));
        }

        let sum = probabilities[0] + probabilities[1];
        if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(OutputViolation::DoesNotSumToOne(sum));
        }

        let best = argmax(probabilities);
        if best != label {
            return Err(OutputViolation::LabelDisagrees { label, argmax: best });
        }

        Ok(Self {
            label,
            probabilities,
            outcome,
            created_at: chrono::Utc::now(),
        })
    }

    /// Probability of the predicted class.
    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.probabilities[usize::from(self.label)]
    }

    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.outcome == AccountOutcome::LikelyBanked
    }

    /// Verdict line shown to the user.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "{} (probability: {:.2}%)",
            self.outcome.description(),
            self.confidence() * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_prediction() {
        let prediction = Prediction::new(1, [0.25, 0.75]).expect("valid");
        assert!(prediction.is_positive());
        assert!((prediction.confidence() - 0.75).abs() < f64::EPSILON);
        assert_eq!(
            prediction.message(),
            "The respondent is likely to own a bank account (probability: 75.00%)"
        );
    }

    #[test]
    fn test_negative_prediction_reports_class_zero_probability() {
        let prediction = Prediction::new(0, [0.6123, 0.3877]).expect("valid");
        assert_eq!(prediction.outcome, AccountOutcome::UnlikelyBanked);
        assert!(prediction.message().ends_with("(probability: 61.23%)"));
    }

    #[test]
    fn test_tie_goes_to_class_zero() {
        assert_eq!(argmax([0.5, 0.5]), 0);
        assert!(Prediction::new(0, [0.5, 0.5]).is_ok());
        assert_eq!(
            Prediction::new(1, [0.5, 0.5]).unwrap_err(),
            OutputViolation::LabelDisagrees { label: 1, argmax: 0 }
        );
    }

    #[test]
    fn test_rejects_invalid_outputs() {
        assert_eq!(
            Prediction::new(2, [0.1, 0.9]).unwrap_err(),
            OutputViolation::LabelOutOfRange(2)
        );
        assert!(matches!(
            Prediction::new(1, [f64::NAN, 0.9]).unwrap_err(),
            OutputViolation::NotAProbability(_)
        ));
        assert!(matches!(
            Prediction::new(1, [0.2, 0.9]).unwrap_err(),
            OutputViolation::DoesNotSumToOne(_)
        ));
        assert!(Prediction::new(1, [0.3, 0.7 + 5e-7]).is_ok());
    }
}
