//! Medical guardrails applied to the screener form before anything is sent.
//!
//! Checks run in a fixed order: completeness, then age, resting blood pressure,
//! cholesterol and max heart rate. The first failure is the one reported.

use std::ops::RangeInclusive;

use serde::Serialize;
use shared::domain::{BiologicalSex, ChestPainType, ExerciseAngina, FastingSugar, FormField};

use crate::error::ValidationError;

pub const AGE_RANGE: RangeInclusive<i64> = 18..=100;
pub const RESTING_BP_RANGE: RangeInclusive<f64> = 80.0..=250.0;
pub const CHOLESTEROL_RANGE: RangeInclusive<f64> = 100.0..=600.0;
pub const MAX_HEART_RATE_RANGE: RangeInclusive<f64> = 60.0..=220.0;

/// Age-predicted maximum heart rate is `HEART_RATE_CEILING - age`.
const HEART_RATE_CEILING: f64 = 220.0;

/// Raw screener answers as typed by the user. A field holding only whitespace counts
/// as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssessmentInput {
    pub age: Option<String>,
    pub sex: Option<String>,
    pub chest_pain: Option<String>,
    pub resting_bp: Option<String>,
    pub cholesterol: Option<String>,
    pub fasting_sugar: Option<String>,
    pub max_heart_rate: Option<String>,
    pub exercise_angina: Option<String>,
}

impl AssessmentInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: FormField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        *self.slot_mut(field) = if value.trim().is_empty() {
            None
        } else {
            Some(value)
        };
    }

    pub fn clear(&mut self, field: FormField) {
        *self.slot_mut(field) = None;
    }

    /// Trimmed value of `field`, or `None` when it has not been filled in.
    pub fn value(&self, field: FormField) -> Option<&str> {
        self.slot(field)
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    pub fn missing_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|field| self.value(*field).is_none())
            .collect()
    }

    fn slot(&self, field: FormField) -> &Option<String> {
        match field {
            FormField::Age => &self.age,
            FormField::Sex => &self.sex,
            FormField::ChestPain => &self.chest_pain,
            FormField::RestingBp => &self.resting_bp,
            FormField::Cholesterol => &self.cholesterol,
            FormField::FastingSugar => &self.fasting_sugar,
            FormField::MaxHeartRate => &self.max_heart_rate,
            FormField::ExerciseAngina => &self.exercise_angina,
        }
    }

    fn slot_mut(&mut self, field: FormField) -> &mut Option<String> {
        match field {
            FormField::Age => &mut self.age,
            FormField::Sex => &mut self.sex,
            FormField::ChestPain => &mut self.chest_pain,
            FormField::RestingBp => &mut self.resting_bp,
            FormField::Cholesterol => &mut self.cholesterol,
            FormField::FastingSugar => &mut self.fasting_sugar,
            FormField::MaxHeartRate => &mut self.max_heart_rate,
            FormField::ExerciseAngina => &mut self.exercise_angina,
        }
    }
}

/// A form that passed every guardrail. Only [`validate`] can build one.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedAssessment {
    age: u8,
    sex: BiologicalSex,
    chest_pain: ChestPainType,
    resting_bp: f64,
    cholesterol: f64,
    fasting_sugar: FastingSugar,
    max_heart_rate: f64,
    exercise_angina: ExerciseAngina,
}

impl ValidatedAssessment {
    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn sex(&self) -> BiologicalSex {
        self.sex
    }

    pub fn chest_pain(&self) -> ChestPainType {
        self.chest_pain
    }

    pub fn resting_bp(&self) -> f64 {
        self.resting_bp
    }

    pub fn cholesterol(&self) -> f64 {
        self.cholesterol
    }

    pub fn fasting_sugar(&self) -> FastingSugar {
        self.fasting_sugar
    }

    pub fn max_heart_rate(&self) -> f64 {
        self.max_heart_rate
    }

    pub fn exercise_angina(&self) -> ExerciseAngina {
        self.exercise_angina
    }
}

pub fn validate(input: &AssessmentInput) -> Result<ValidatedAssessment, ValidationError> {
    let missing = input.missing_fields();
    if !missing.is_empty() {
        return Err(ValidationError::Incomplete { missing });
    }

    let age = parse_age(required(input, FormField::Age)?)?;
    let resting_bp = parse_measurement(input, FormField::RestingBp, &RESTING_BP_RANGE)?;
    let cholesterol = parse_measurement(input, FormField::Cholesterol, &CHOLESTEROL_RANGE)?;
    let max_heart_rate =
        parse_measurement(input, FormField::MaxHeartRate, &MAX_HEART_RATE_RANGE)?;

    Ok(ValidatedAssessment {
        age,
        sex: parse_choice(input, FormField::Sex, BiologicalSex::from_form_value)?,
        chest_pain: parse_choice(input, FormField::ChestPain, ChestPainType::from_form_value)?,
        resting_bp,
        cholesterol,
        fasting_sugar: parse_choice(input, FormField::FastingSugar, FastingSugar::from_form_value)?,
        max_heart_rate,
        exercise_angina: parse_choice(
            input,
            FormField::ExerciseAngina,
            ExerciseAngina::from_form_value,
        )?,
    })
}

/// Pre-fill value for the max heart rate field, `220 - age`, formatted the way the
/// form displays numbers.
pub fn estimate_max_heart_rate(input: &AssessmentInput) -> Result<String, ValidationError> {
    let age = input
        .value(FormField::Age)
        .and_then(|raw| raw.parse::<f64>().ok())
        .filter(|age| age.is_finite())
        .ok_or(ValidationError::MissingAge)?;
    Ok((HEART_RATE_CEILING - age).to_string())
}

fn required(input: &AssessmentInput, field: FormField) -> Result<&str, ValidationError> {
    input
        .value(field)
        .ok_or_else(|| ValidationError::Incomplete {
            missing: vec![field],
        })
}

fn parse_age(raw: &str) -> Result<u8, ValidationError> {
    raw.parse::<i64>()
        .ok()
        .filter(|age| AGE_RANGE.contains(age))
        .and_then(|age| u8::try_from(age).ok())
        .ok_or(ValidationError::OutOfRange(FormField::Age))
}

fn parse_measurement(
    input: &AssessmentInput,
    field: FormField,
    range: &RangeInclusive<f64>,
) -> Result<f64, ValidationError> {
    required(input, field)?
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && range.contains(value))
        .ok_or(ValidationError::OutOfRange(field))
}

fn parse_choice<T>(
    input: &AssessmentInput,
    field: FormField,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, ValidationError> {
    parse(required(input, field)?).ok_or(ValidationError::InvalidChoice(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_input() -> AssessmentInput {
        AssessmentInput::new()
            .with(FormField::Age, "45")
            .with(FormField::Sex, "male")
            .with(FormField::ChestPain, "2")
            .with(FormField::RestingBp, "130")
            .with(FormField::Cholesterol, "220")
            .with(FormField::FastingSugar, "true")
            .with(FormField::MaxHeartRate, "150")
            .with(FormField::ExerciseAngina, "0")
    }

    #[test]
    fn complete_input_passes() {
        let validated = validate(&complete_input()).expect("valid");
        assert_eq!(validated.age(), 45);
        assert_eq!(validated.sex(), BiologicalSex::Male);
        assert_eq!(validated.chest_pain(), ChestPainType::NonCardiac);
        assert_eq!(validated.fasting_sugar(), FastingSugar::High);
        assert_eq!(validated.exercise_angina(), ExerciseAngina::No);
    }

    #[test]
    fn every_missing_field_reports_incomplete() {
        for field in FormField::ALL {
            let mut input = complete_input();
            input.clear(field);
            assert_eq!(
                validate(&input),
                Err(ValidationError::Incomplete {
                    missing: vec![field]
                }),
                "field {field}"
            );
        }
    }

    #[test]
    fn whitespace_counts_as_unset() {
        let input = complete_input().with(FormField::Cholesterol, "   ");
        assert_eq!(input.cholesterol, None);
        assert!(matches!(
            validate(&input),
            Err(ValidationError::Incomplete { .. })
        ));
    }

    #[test]
    fn incomplete_wins_over_range_errors() {
        let mut input = complete_input().with(FormField::Age, "7");
        input.clear(FormField::ExerciseAngina);
        assert!(matches!(
            validate(&input),
            Err(ValidationError::Incomplete { .. })
        ));
    }

    #[test]
    fn range_boundaries_are_inclusive() {
        let cases = [
            (FormField::Age, "17", "18", "100", "101"),
            (FormField::RestingBp, "79", "80", "250", "251"),
            (FormField::Cholesterol, "99", "100", "600", "601"),
            (FormField::MaxHeartRate, "59", "60", "220", "221"),
        ];

        for (field, below, low, high, above) in cases {
            for accepted in [low, high] {
                let input = complete_input().with(field, accepted);
                assert!(validate(&input).is_ok(), "{field}={accepted} should pass");
            }
            for rejected in [below, above] {
                let input = complete_input().with(field, rejected);
                assert_eq!(
                    validate(&input),
                    Err(ValidationError::OutOfRange(field)),
                    "{field}={rejected} should fail"
                );
            }
        }
    }

    #[test]
    fn age_must_be_whole_years() {
        let input = complete_input().with(FormField::Age, "45.5");
        assert_eq!(
            validate(&input),
            Err(ValidationError::OutOfRange(FormField::Age))
        );
    }

    #[test]
    fn non_numeric_measurement_is_out_of_range() {
        let input = complete_input().with(FormField::RestingBp, "high");
        assert_eq!(
            validate(&input),
            Err(ValidationError::OutOfRange(FormField::RestingBp))
        );
        let input = complete_input().with(FormField::Cholesterol, "NaN");
        assert_eq!(
            validate(&input),
            Err(ValidationError::OutOfRange(FormField::Cholesterol))
        );
    }

    #[test]
    fn first_failing_check_wins() {
        let input = complete_input()
            .with(FormField::Age, "150")
            .with(FormField::RestingBp, "10")
            .with(FormField::MaxHeartRate, "500");
        assert_eq!(
            validate(&input),
            Err(ValidationError::OutOfRange(FormField::Age))
        );

        let input = complete_input()
            .with(FormField::Cholesterol, "50")
            .with(FormField::MaxHeartRate, "500");
        assert_eq!(
            validate(&input),
            Err(ValidationError::OutOfRange(FormField::Cholesterol))
        );
    }

    #[test]
    fn choices_are_checked_after_ranges() {
        let input = complete_input()
            .with(FormField::Sex, "other")
            .with(FormField::MaxHeartRate, "20");
        assert_eq!(
            validate(&input),
            Err(ValidationError::OutOfRange(FormField::MaxHeartRate))
        );

        let input = complete_input().with(FormField::ChestPain, "7");
        assert_eq!(
            validate(&input),
            Err(ValidationError::InvalidChoice(FormField::ChestPain))
        );
    }

    #[test]
    fn estimates_heart_rate_from_age() {
        let input = AssessmentInput::new().with(FormField::Age, "40");
        assert_eq!(estimate_max_heart_rate(&input).as_deref(), Ok("180"));

        let input = AssessmentInput::new().with(FormField::Age, "40.5");
        assert_eq!(estimate_max_heart_rate(&input).as_deref(), Ok("179.5"));
    }

    #[test]
    fn estimate_requires_numeric_age() {
        assert_eq!(
            estimate_max_heart_rate(&AssessmentInput::new()),
            Err(ValidationError::MissingAge)
        );
        let input = AssessmentInput::new().with(FormField::Age, "forty");
        assert_eq!(
            estimate_max_heart_rate(&input),
            Err(ValidationError::MissingAge)
        );
    }
}
