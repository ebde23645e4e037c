//! Encoded feature vectors.

use serde::{Deserialize, Serialize};

use super::encoder::{EncoderTable, EncodingError};
use super::respondent::{Field, RespondentRecord};

/// Fully numeric form of a respondent, in training column order.
///
/// Nothing here records which column a value came from: a vector whose values
/// were permuted is indistinguishable from a correct one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    /// Wrap raw values. Length is checked by the classifier, not here.
    #[must_use]
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of a field, assuming training column order.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<f64> {
        self.values.get(field.index()).copied()
    }
}

/// Replace every categorical value by its code; numeric fields pass through.
///
/// # Errors
/// Returns the first `EncodingError` in column order.
pub fn encode(record: &RespondentRecord, encoders: &EncoderTable) -> Result<FeatureVector, EncodingError> {
    let mut values = Vec::with_capacity(Field::ALL.len());

    for field in Field::ALL {
        let value = match record.categorical(field) {
            Some(category) => f64::from(encoders.encode(field, category)?),
            None => record.numeric(field).unwrap_or_default(),
        };
        values.push(value);
    }

    Ok(FeatureVector { values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::encoder::CategoricalEncoder;
    use crate::domain::respondent::kenya_respondent;

    fn table() -> EncoderTable {
        let vocabularies: [(&str, &[&str]); 8] = [
            ("country", &["Kenya", "Rwanda", "Tanzania", "Uganda"]),
            ("location_type", &["Rural", "Urban"]),
            ("cellphone_access", &["No", "Yes"]),
            ("gender_of_respondent", &["Female", "Male"]),
            (
                "relationship_with_head",
                &["Child", "Head of Household", "Other non-relatives", "Other relative", "Parent", "Spouse"],
            ),
            (
                "marital_status",
                &["Divorced/Seperated", "Dont know", "Married/Living together", "Single/Never Married", "Widowed"],
            ),
            (
                "education_level",
                &["No formal education", "Other/Dont know/RTA", "Primary education", "Secondary education"],
            ),
            ("job_type", &["Farming and Fishing", "Self employed"]),
        ];

        let mut table = EncoderTable::new();
        for (name, classes) in vocabularies {
            let classes = classes.iter().map(|c| c.to_string()).collect();
            table.insert(name, CategoricalEncoder::new(classes).expect("valid"));
        }
        table
    }

    #[test]
    fn test_encode_uses_vocabulary_indices() {
        let vector = encode(&kenya_respondent(), &table()).expect("encode");
        assert_eq!(
            vector.values(),
            [0.0, 2025.0, 0.0, 1.0, 3.0, 30.0, 0.0, 1.0, 2.0, 3.0, 1.0]
        );
        assert_eq!(vector.get(Field::HouseholdSize), Some(3.0));
    }

    #[test]
    fn test_encode_reports_first_unknown_category() {
        let record = RespondentRecord {
            marital_status: "Engaged".into(),
            job_type: "Astronaut".into(),
            ..kenya_respondent()
        };
        let err = encode(&record, &table()).expect_err("unknown category");
        assert_eq!(
            err,
            EncodingError::UnknownCategory {
                field: "marital_status",
                value: "Engaged".into(),
            }
        );
    }
}
