//! Inputs to the assessment reducer.

use shared::domain::FormField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    FieldEdited(FormField),
    ValidationFailed,
    SubmissionStarted,
    PredictionSucceeded,
    PredictionFailed,
    Reset,
}

impl ControllerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FieldEdited(_) => "field_edited",
            Self::ValidationFailed => "validation_failed",
            Self::SubmissionStarted => "submission_started",
            Self::PredictionSucceeded => "prediction_succeeded",
            Self::PredictionFailed => "prediction_failed",
            Self::Reset => "reset",
        }
    }
}
