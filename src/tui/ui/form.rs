//! Respondent input form.
//!
//! Categorical controls cycle through the encoder vocabulary in stored order.
//! Numeric controls take digits and are bounded per field.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{
    EncoderTable, Field, RespondentRecord, AGE_RANGE, HOUSEHOLD_SIZE_MIN, YEAR_RANGE,
};
use crate::tui::styles::InclusionTheme;

/// Input control for one field
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    /// Choice among a closed vocabulary
    Select { options: Vec<String>, selected: usize },
    /// Integer typed as text
    Number {
        value: String,
        min: i64,
        max: Option<i64>,
        default: i64,
    },
}

impl Control {
    fn for_field(field: Field, encoders: &EncoderTable) -> Self {
        let number = |min: i64, max: Option<i64>, default: i64| Self::Number {
            value: default.to_string(),
            min,
            max,
            default,
        };

        match field {
            Field::Year => number(YEAR_RANGE.0, Some(YEAR_RANGE.1), 2025),
            Field::HouseholdSize => number(HOUSEHOLD_SIZE_MIN, None, 3),
            Field::AgeOfRespondent => number(AGE_RANGE.0, Some(AGE_RANGE.1), 30),
            _ => Self::Select {
                options: encoders.vocabulary(field).to_vec(),
                selected: 0,
            },
        }
    }

    fn hint(&self) -> String {
        match self {
            Self::Select { options, selected } => {
                format!("{}/{}", (*selected + 1).min(options.len()), options.len())
            }
            Self::Number { min, max: Some(max), .. } => format!("{min}-{max}"),
            Self::Number { min, max: None, .. } => format!(">= {min}"),
        }
    }
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub field: Field,
    pub control: Control,
}

/// Respondent form state
pub struct FormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl FormState {
    /// Build one control per field, options taken from the encoders.
    #[must_use]
    pub fn from_encoders(encoders: &EncoderTable) -> Self {
        Self {
            fields: Field::ALL
                .into_iter()
                .map(|field| FormField {
                    field,
                    control: Control::for_field(field, encoders),
                })
                .collect(),
            selected_field: 0,
            error_message: None,
        }
    }

    fn current(&mut self) -> &mut Control {
        &mut self.fields[self.selected_field].control
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Select the next option of a categorical field. Returns whether anything changed.
    pub fn next_option(&mut self) -> bool {
        match self.current() {
            Control::Select { options, selected } if options.len() > 1 => {
                *selected = (*selected + 1) % options.len();
                true
            }
            _ => false,
        }
    }

    /// Select the previous option of a categorical field. Returns whether anything changed.
    pub fn prev_option(&mut self) -> bool {
        match self.current() {
            Control::Select { options, selected } if options.len() > 1 => {
                *selected = selected.checked_sub(1).unwrap_or(options.len() - 1);
                true
            }
            _ => false,
        }
    }

    /// Add a digit to the current numeric field
    pub fn input_char(&mut self, c: char) -> bool {
        match self.current() {
            Control::Number { value, .. } if c.is_ascii_digit() && value.len() < 6 => {
                value.push(c);
                self.error_message = None;
                true
            }
            _ => false,
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) -> bool {
        match self.current() {
            Control::Number { value, .. } => value.pop().is_some(),
            Control::Select { .. } => false,
        }
    }

    /// Clear the current numeric field
    pub fn clear_field(&mut self) -> bool {
        match self.current() {
            Control::Number { value, .. } => {
                value.clear();
                true
            }
            Control::Select { .. } => false,
        }
    }

    /// Restore every control to its default.
    pub fn reset(&mut self) {
        for form_field in &mut self.fields {
            match &mut form_field.control {
                Control::Select { selected, .. } => *selected = 0,
                Control::Number { value, default, .. } => *value = default.to_string(),
            }
        }
        self.selected_field = 0;
        self.error_message = None;
    }

    /// Load the reference respondent where its values exist in the vocabularies.
    pub fn load_sample_data(&mut self) {
        let sample: [(Field, &str); 11] = [
            (Field::Country, "Kenya"),
            (Field::Year, "2025"),
            (Field::LocationType, "Rural"),
            (Field::CellphoneAccess, "Yes"),
            (Field::HouseholdSize, "3"),
            (Field::AgeOfRespondent, "30"),
            (Field::GenderOfRespondent, "Female"),
            (Field::RelationshipWithHead, "Head of Household"),
            (Field::MaritalStatus, "Married/Living together"),
            (Field::EducationLevel, "Secondary education"),
            (Field::JobType, "Self employed"),
        ];

        for form_field in &mut self.fields {
            let Some(&(_, sample_value)) = sample.iter().find(|(f, _)| *f == form_field.field)
            else {
                continue;
            };
            match &mut form_field.control {
                Control::Select { options, selected } => {
                    if let Some(i) = options.iter().position(|o| o == sample_value) {
                        *selected = i;
                    }
                }
                Control::Number { value, .. } => *value = sample_value.to_string(),
            }
        }
        self.error_message = None;
    }

    /// Validate and convert to a RespondentRecord
    pub fn to_record(&self) -> Result<RespondentRecord, String> {
        let mut categories: Vec<String> = Vec::with_capacity(8);
        let mut numbers: Vec<i64> = Vec::with_capacity(3);

        for form_field in &self.fields {
            let label = form_field.field.label();
            match &form_field.control {
                Control::Select { options, selected } => {
                    let option = options
                        .get(*selected)
                        .ok_or_else(|| format!("{label}: No options available"))?;
                    categories.push(option.clone());
                }
                Control::Number { value, min, max, .. } => {
                    let n: i64 = value
                        .parse()
                        .map_err(|_| format!("{label}: Invalid number"))?;
                    if n < *min || max.is_some_and(|max| n > max) {
                        return Err(match max {
                            Some(max) => format!("{label}: Value must be between {min} and {max}"),
                            None => format!("{label}: Value must be at least {min}"),
                        });
                    }
                    numbers.push(n);
                }
            }
        }

        let &[year, household_size, age_of_respondent] = numbers.as_slice() else {
            return Err("Form is missing numeric fields".into());
        };
        let mut categories = categories.into_iter();
        let mut next = || {
            categories
                .next()
                .ok_or_else(|| "Form is missing categorical fields".to_string())
        };

        let overflow = |label: &str| format!("{label}: Value out of range");
        Ok(RespondentRecord {
            country: next()?,
            year: i32::try_from(year).map_err(|_| overflow(Field::Year.label()))?,
            location_type: next()?,
            cellphone_access: next()?,
            household_size: u32::try_from(household_size)
                .map_err(|_| overflow(Field::HouseholdSize.label()))?,
            age_of_respondent: u32::try_from(age_of_respondent)
                .map_err(|_| overflow(Field::AgeOfRespondent.label()))?,
            gender_of_respondent: next()?,
            relationship_with_head: next()?,
            marital_status: next()?,
            education_level: next()?,
            job_type: next()?,
        })
    }
}

/// Render the respondent input form
pub fn render_form(f: &mut Frame, area: Rect, state: &FormState, digests: (Option<&str>, Option<&str>)) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0], digests);
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect, digests: (Option<&str>, Option<&str>)) {
    let mut spans = vec![
        Span::styled(" ", InclusionTheme::text()),
        Span::styled("Financial Inclusion Prediction", InclusionTheme::title()),
        Span::styled(" │ Respondent details", InclusionTheme::text_secondary()),
    ];
    if let (Some(model), Some(encoders)) = digests {
        spans.push(Span::styled(
            format!(" │ model {model} · encoders {encoders}"),
            InclusionTheme::text_muted(),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(InclusionTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &FormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = state.fields.len().div_ceil(2);

    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected_field);
    render_field_column(
        f,
        columns[1],
        &state.fields[mid..],
        mid,
        state.selected_field,
    );
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, form_field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let (border_style, title_style) = if is_selected {
            (InclusionTheme::border_focused(), InclusionTheme::focused())
        } else {
            (InclusionTheme::border(), InclusionTheme::text_secondary())
        };

        let block = Block::default()
            .title(Span::styled(
                format!(" {} ({}) ", form_field.field.label(), form_field.control.hint()),
                title_style,
            ))
            .borders(Borders::ALL)
            .border_style(border_style);

        let mut line = vec![Span::raw(" ")];
        match &form_field.control {
            Control::Select { options, selected } => {
                let value = options.get(*selected).map_or("(no options)", String::as_str);
                if is_selected {
                    line.push(Span::styled("◀ ", InclusionTheme::key_hint()));
                    line.push(Span::styled(value, InclusionTheme::text()));
                    line.push(Span::styled(" ▶", InclusionTheme::key_hint()));
                } else {
                    line.push(Span::styled(value, InclusionTheme::text()));
                }
            }
            Control::Number { value, .. } => {
                line.push(Span::styled(value.as_str(), InclusionTheme::text()));
                if is_selected {
                    line.push(Span::styled("▌", InclusionTheme::cursor()));
                }
            }
        }

        f.render_widget(Paragraph::new(Line::from(line)).block(block), chunks[i]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &FormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", InclusionTheme::danger()),
            Span::styled(err.clone(), InclusionTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", InclusionTheme::key_hint()),
            Span::styled("Navigate ", InclusionTheme::key_desc()),
            Span::styled("[←→] ", InclusionTheme::key_hint()),
            Span::styled("Choose ", InclusionTheme::key_desc()),
            Span::styled("[Enter] ", InclusionTheme::key_hint()),
            Span::styled("Predict ", InclusionTheme::key_desc()),
            Span::styled("[S] ", InclusionTheme::key_hint()),
            Span::styled("Sample ", InclusionTheme::key_desc()),
            Span::styled("[R] ", InclusionTheme::key_hint()),
            Span::styled("Reset ", InclusionTheme::key_desc()),
            Span::styled("[Esc] ", InclusionTheme::key_hint()),
            Span::styled("Quit", InclusionTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(InclusionTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{kenya_respondent, CategoricalEncoder};

    fn encoders() -> EncoderTable {
        let mut table = EncoderTable::new();
        for field in Field::categorical() {
            let classes = match field {
                // Unsorted on purpose: the form must not reorder.
                Field::Country => vec!["Uganda", "Kenya", "Rwanda"],
                _ => vec!["B", "A"],
            };
            let classes = classes.into_iter().map(String::from).collect();
            table.insert(field.name(), CategoricalEncoder::new(classes).expect("valid"));
        }
        table
    }

    fn bundled_encoders() -> EncoderTable {
        let json = std::fs::read("models/label_encoders.json").expect("bundled encoders");
        serde_json::from_slice(&json).expect("parse")
    }

    #[test]
    fn test_options_follow_encoder_order() {
        let state = FormState::from_encoders(&encoders());
        assert_eq!(state.fields.len(), 11);
        assert_eq!(
            state.fields[0].control,
            Control::Select {
                options: vec!["Uganda".into(), "Kenya".into(), "Rwanda".into()],
                selected: 0,
            }
        );
        assert!(matches!(state.fields[1].control, Control::Number { .. }));
    }

    #[test]
    fn test_defaults_make_a_record() {
        let state = FormState::from_encoders(&encoders());
        let record = state.to_record().expect("defaults are valid");
        assert_eq!(record.country, "Uganda");
        assert_eq!(record.year, 2025);
        assert_eq!(record.household_size, 3);
        assert_eq!(record.age_of_respondent, 30);
        assert_eq!(record.job_type, "B");
    }

    #[test]
    fn test_option_cycling_wraps() {
        let mut state = FormState::from_encoders(&encoders());
        assert!(state.prev_option());
        assert_eq!(state.to_record().expect("valid").country, "Rwanda");
        assert!(state.next_option());
        assert!(state.next_option());
        assert_eq!(state.to_record().expect("valid").country, "Kenya");

        // Numeric fields ignore option keys and take digits.
        state.next_field();
        assert!(!state.next_option());
        assert!(!state.input_char('x'));
    }

    #[test]
    fn test_navigation_wraps() {
        let mut state = FormState::from_encoders(&encoders());
        state.prev_field();
        assert_eq!(state.selected_field, 10);
        state.next_field();
        assert_eq!(state.selected_field, 0);
    }

    #[test]
    fn test_numeric_bounds() {
        let mut state = FormState::from_encoders(&encoders());
        state.selected_field = Field::AgeOfRespondent.index();
        assert!(state.clear_field());
        assert_eq!(state.to_record().unwrap_err(), "Age: Invalid number");

        for c in "121".chars() {
            state.input_char(c);
        }
        assert_eq!(
            state.to_record().unwrap_err(),
            "Age: Value must be between 0 and 120"
        );

        state.delete_char();
        assert_eq!(state.to_record().expect("12 is valid").age_of_respondent, 12);

        state.selected_field = Field::HouseholdSize.index();
        state.clear_field();
        state.input_char('0');
        assert_eq!(
            state.to_record().unwrap_err(),
            "Household size: Value must be at least 1"
        );

        state.reset();
        assert!(state.to_record().is_ok());
    }

    #[test]
    fn test_sample_data_is_the_reference_respondent() {
        let mut state = FormState::from_encoders(&bundled_encoders());
        state.load_sample_data();
        assert_eq!(state.to_record().expect("valid"), kenya_respondent());
    }

    #[test]
    fn test_sample_data_follows_field_not_position() {
        let mut state = FormState::from_encoders(&bundled_encoders());
        state.fields.reverse();
        state.load_sample_data();

        let value_of = |field: Field| {
            let form_field = state
                .fields
                .iter()
                .find(|ff| ff.field == field)
                .expect("field present");
            match &form_field.control {
                Control::Select { options, selected } => options[*selected].clone(),
                Control::Number { value, .. } => value.clone(),
            }
        };

        assert_eq!(value_of(Field::Country), "Kenya");
        assert_eq!(value_of(Field::Year), "2025");
        assert_eq!(value_of(Field::HouseholdSize), "3");
        assert_eq!(value_of(Field::AgeOfRespondent), "30");
        assert_eq!(value_of(Field::JobType), "Self employed");
        assert_eq!(value_of(Field::LocationType), "Rural");
    }
}
