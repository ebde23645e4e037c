//! Respondent record for financial inclusion prediction.
//!
//! Field order follows the training frame: country, year, location_type,
//! cellphone_access, household_size, age_of_respondent, gender_of_respondent,
//! relationship_with_head, marital_status, education_level, job_type.

use serde::{Deserialize, Serialize};

/// One column of the training frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Country,
    Year,
    LocationType,
    CellphoneAccess,
    HouseholdSize,
    AgeOfRespondent,
    GenderOfRespondent,
    RelationshipWithHead,
    MaritalStatus,
    EducationLevel,
    JobType,
}

impl Field {
    /// All fields in the order the classifier was trained on.
    pub const ALL: [Field; 11] = [
        Field::Country,
        Field::Year,
        Field::LocationType,
        Field::CellphoneAccess,
        Field::HouseholdSize,
        Field::AgeOfRespondent,
        Field::GenderOfRespondent,
        Field::RelationshipWithHead,
        Field::MaritalStatus,
        Field::EducationLevel,
        Field::JobType,
    ];

    /// Column name used by the artifacts.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::Year => "year",
            Self::LocationType => "location_type",
            Self::CellphoneAccess => "cellphone_access",
            Self::HouseholdSize => "household_size",
            Self::AgeOfRespondent => "age_of_respondent",
            Self::GenderOfRespondent => "gender_of_respondent",
            Self::RelationshipWithHead => "relationship_with_head",
            Self::MaritalStatus => "marital_status",
            Self::EducationLevel => "education_level",
            Self::JobType => "job_type",
        }
    }

    /// Human-readable label for the form.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Country => "Country",
            Self::Year => "Year",
            Self::LocationType => "Location type",
            Self::CellphoneAccess => "Cellphone access",
            Self::HouseholdSize => "Household size",
            Self::AgeOfRespondent => "Age",
            Self::GenderOfRespondent => "Gender",
            Self::RelationshipWithHead => "Relationship with head",
            Self::MaritalStatus => "Marital status",
            Self::EducationLevel => "Education level",
            Self::JobType => "Job type",
        }
    }

    #[must_use]
    pub fn is_categorical(self) -> bool {
        !matches!(
            self,
            Self::Year | Self::HouseholdSize | Self::AgeOfRespondent
        )
    }

    /// Position in the feature vector.
    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|f| *f == self)
            .unwrap_or_default()
    }

    /// Look up a field by its column name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// Categorical fields only, in feature order.
    pub fn categorical() -> impl Iterator<Item = Field> {
        Self::ALL.into_iter().filter(|f| f.is_categorical())
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Column names in training order.
pub const FEATURE_NAMES: [&str; 11] = [
    "country",
    "year",
    "location_type",
    "cellphone_access",
    "household_size",
    "age_of_respondent",
    "gender_of_respondent",
    "relationship_with_head",
    "marital_status",
    "education_level",
    "job_type",
];

/// Bounds offered by the year control. Not enforced by the record itself.
pub const YEAR_RANGE: (i64, i64) = (2000, 2030);

/// Smallest household the form accepts.
pub const HOUSEHOLD_SIZE_MIN: i64 = 1;

/// Age bounds in years.
pub const AGE_RANGE: (i64, i64) = (0, 120);

/// One survey respondent, as entered in the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondentRecord {
    pub country: String,
    pub year: i32,
    pub location_type: String,
    pub cellphone_access: String,
    pub household_size: u32,
    pub age_of_respondent: u32,
    pub gender_of_respondent: String,
    pub relationship_with_head: String,
    pub marital_status: String,
    pub education_level: String,
    pub job_type: String,
}

impl RespondentRecord {
    /// Value of a categorical field, `None` for numeric fields.
    #[must_use]
    pub fn categorical(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Country => &self.country,
            Field::LocationType => &self.location_type,
            Field::CellphoneAccess => &self.cellphone_access,
            Field::GenderOfRespondent => &self.gender_of_respondent,
            Field::RelationshipWithHead => &self.relationship_with_head,
            Field::MaritalStatus => &self.marital_status,
            Field::EducationLevel => &self.education_level,
            Field::JobType => &self.job_type,
            Field::Year | Field::HouseholdSize | Field::AgeOfRespondent => return None,
        };
        Some(value.as_str())
    }

    /// Value of a numeric field, `None` for categorical fields.
    #[must_use]
    pub fn numeric(&self, field: Field) -> Option<f64> {
        match field {
            Field::Year => Some(f64::from(self.year)),
            Field::HouseholdSize => Some(f64::from(self.household_size)),
            Field::AgeOfRespondent => Some(f64::from(self.age_of_respondent)),
            _ => None,
        }
    }

    /// Check the numeric constraints the record carries on its own.
    ///
    /// Category membership is checked by the encoders, and the year is only
    /// bounded by the form control.
    ///
    /// # Errors
    /// Returns validation errors as a vector of strings.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if i64::from(self.household_size) < HOUSEHOLD_SIZE_MIN {
            errors.push(format!(
                "Household size {} must be at least {}",
                self.household_size, HOUSEHOLD_SIZE_MIN
            ));
        }
        let age = i64::from(self.age_of_respondent);
        if !(AGE_RANGE.0..=AGE_RANGE.1).contains(&age) {
            errors.push(format!(
                "Age {} out of range [{}, {}]",
                age, AGE_RANGE.0, AGE_RANGE.1
            ));
        }
        for field in Field::categorical() {
            if self.categorical(field).is_some_and(|v| v.trim().is_empty()) {
                errors.push(format!("{} must not be empty", field.label()));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
pub(crate) fn kenya_respondent() -> RespondentRecord {
    RespondentRecord {
        country: "Kenya".into(),
        year: 2025,
        location_type: "Rural".into(),
        cellphone_access: "Yes".into(),
        household_size: 3,
        age_of_respondent: 30,
        gender_of_respondent: "Female".into(),
        relationship_with_head: "Head of Household".into(),
        marital_status: "Married/Living together".into(),
        education_level: "Secondary education".into(),
        job_type: "Self employed".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order_matches_feature_names() {
        let names: Vec<&str> = Field::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(names, FEATURE_NAMES);
        for (i, field) in Field::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
            assert_eq!(Field::from_name(field.name()), Some(*field));
        }
        assert_eq!(Field::categorical().count(), 8);
    }

    #[test]
    fn test_accessors() {
        let record = kenya_respondent();
        assert_eq!(record.categorical(Field::Country), Some("Kenya"));
        assert_eq!(record.categorical(Field::Year), None);
        assert_eq!(record.numeric(Field::AgeOfRespondent), Some(30.0));
        assert_eq!(record.numeric(Field::JobType), None);
    }

    #[test]
    fn test_validation() {
        assert!(kenya_respondent().validate().is_ok());

        let invalid = RespondentRecord {
            household_size: 0,
            age_of_respondent: 130,
            country: " ".into(),
            ..kenya_respondent()
        };
        let errors = invalid.validate().expect_err("should be invalid");
        assert_eq!(errors.len(), 3);

        // Year outside the form bounds is still a valid record.
        let future = RespondentRecord {
            year: 2100,
            ..kenya_respondent()
        };
        assert!(future.validate().is_ok());
    }
}
