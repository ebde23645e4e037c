//! Categorical encoders frozen at training time.
//!
//! Each encoder owns an ordered vocabulary; a value's code is its index in
//! that vocabulary. The stored order is kept as-is, since it defines the codes.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::respondent::Field;

/// Errors raised while mapping categories to codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("Unknown category {value:?} for field {field}")]
    UnknownCategory { field: &'static str, value: String },

    #[error("No encoder for categorical field {field}")]
    MissingEncoder { field: &'static str },
}

/// On-disk shape of one encoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawEncoder {
    classes: Vec<String>,
}

/// Bijective mapping between category strings and integer codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawEncoder", into = "RawEncoder")]
pub struct CategoricalEncoder {
    classes: Vec<String>,
    codes: HashMap<String, u32>,
}

impl TryFrom<RawEncoder> for CategoricalEncoder {
    type Error = String;

    fn try_from(raw: RawEncoder) -> Result<Self, Self::Error> {
        Self::new(raw.classes)
    }
}

impl From<CategoricalEncoder> for RawEncoder {
    fn from(encoder: CategoricalEncoder) -> Self {
        Self {
            classes: encoder.classes,
        }
    }
}

impl CategoricalEncoder {
    /// Build an encoder from its vocabulary.
    ///
    /// # Errors
    /// Returns an error if the vocabulary is empty or contains duplicates.
    pub fn new(classes: Vec<String>) -> Result<Self, String> {
        if classes.is_empty() {
            return Err("vocabulary is empty".into());
        }

        let mut codes = HashMap::with_capacity(classes.len());
        for (i, class) in classes.iter().enumerate() {
            let code = u32::try_from(i).map_err(|_| "vocabulary too large".to_string())?;
            if codes.insert(class.clone(), code).is_some() {
                return Err(format!("duplicate category {class:?}"));
            }
        }

        Ok(Self { classes, codes })
    }

    /// Valid values in stored order.
    #[must_use]
    pub fn vocabulary(&self) -> &[String] {
        &self.classes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.codes.contains_key(value)
    }

    /// Code for a value, if it belongs to the vocabulary.
    #[must_use]
    pub fn code(&self, value: &str) -> Option<u32> {
        self.codes.get(value).copied()
    }

    /// Value for a code, if in range.
    #[must_use]
    pub fn decode(&self, code: u32) -> Option<&str> {
        self.classes.get(code as usize).map(String::as_str)
    }
}

/// Encoders keyed by column name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncoderTable {
    encoders: BTreeMap<String, CategoricalEncoder>,
}

impl EncoderTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the encoder for a column.
    pub fn insert(&mut self, field: impl Into<String>, encoder: CategoricalEncoder) {
        self.encoders.insert(field.into(), encoder);
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&CategoricalEncoder> {
        self.encoders.get(field.name())
    }

    /// Vocabulary offered for a field; empty for numeric or unknown fields.
    #[must_use]
    pub fn vocabulary(&self, field: Field) -> &[String] {
        if !field.is_categorical() {
            return &[];
        }
        self.get(field).map_or(&[], CategoricalEncoder::vocabulary)
    }

    /// Encode one categorical value.
    ///
    /// # Errors
    /// Returns `MissingEncoder` if the field has no encoder and
    /// `UnknownCategory` if the value is outside the vocabulary.
    pub fn encode(&self, field: Field, value: &str) -> Result<u32, EncodingError> {
        let encoder = self.get(field).ok_or(EncodingError::MissingEncoder {
            field: field.name(),
        })?;
        encoder
            .code(value)
            .ok_or_else(|| EncodingError::UnknownCategory {
                field: field.name(),
                value: value.to_string(),
            })
    }

    /// Categorical fields with no encoder.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::categorical()
            .filter(|f| self.get(*f).is_none())
            .collect()
    }

    /// Column names with an encoder that the record does not encode.
    pub fn extra_columns(&self) -> impl Iterator<Item = &str> {
        self.encoders.keys().map(String::as_str).filter(|name| {
            Field::from_name(name).map_or(true, |f| !f.is_categorical())
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }
}
