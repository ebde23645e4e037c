//! Domain layer: Core types and logic.
//!
//! This module contains pure Rust types with no I/O.
//! Records and encoders validate themselves on construction.

mod encoder;
mod features;
mod prediction;
mod respondent;

pub use encoder::{CategoricalEncoder, EncoderTable, EncodingError};
pub use features::{encode, FeatureVector};
pub use prediction::{argmax, AccountOutcome, OutputViolation, Prediction, PROBABILITY_TOLERANCE};
pub use respondent::{
    Field, RespondentRecord, AGE_RANGE, FEATURE_NAMES, HOUSEHOLD_SIZE_MIN, YEAR_RANGE,
};

#[cfg(test)]
pub(crate) use respondent::kenya_respondent;
