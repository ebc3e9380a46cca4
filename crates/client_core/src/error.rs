//! Error taxonomy for the assessment pipeline.
//!
//! Every variant's `Display` is the exact text shown to the user.

use serde::Serialize;
use shared::domain::FormField;
use thiserror::Error;

pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Failed to connect to the prediction server. Make sure the prediction service is running.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields before predicting.")]
    Incomplete { missing: Vec<FormField> },
    #[error("{}", out_of_range_message(.0))]
    OutOfRange(FormField),
    #[error("{}", invalid_choice_message(.0))]
    InvalidChoice(FormField),
    #[error("Please enter your age first to estimate Max Heart Rate.")]
    MissingAge,
}

fn out_of_range_message(field: &FormField) -> String {
    match field {
        FormField::Age => "Please enter a valid age between 18 and 100.".to_string(),
        FormField::RestingBp => {
            "Resting blood pressure must be a realistic value (80 - 250 mm Hg).".to_string()
        }
        FormField::Cholesterol => {
            "Cholesterol must be a realistic value (100 - 600 mg/dl).".to_string()
        }
        FormField::MaxHeartRate => {
            "Max heart rate must be a realistic value (60 - 220 bpm).".to_string()
        }
        other => format!("\"{}\" is outside the accepted range.", other.prompt()),
    }
}

fn invalid_choice_message(field: &FormField) -> String {
    format!("Please choose one of the listed options for \"{}\".", field.prompt())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictionError {
    /// The service answered with an `error` body; the text is passed through as-is.
    #[error("{0}")]
    ServiceRejected(String),
    /// Unreachable endpoint, timeout, or an undecodable reply. The detail is for logs
    /// only and never shown.
    #[error("{}", TRANSPORT_FAILURE_MESSAGE)]
    Transport(String),
}

impl PredictionError {
    pub(crate) fn transport(detail: impl std::fmt::Display) -> Self {
        Self::Transport(detail.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Caught locally before anything left the device.
    Validation,
    /// The prediction service refused the input.
    Service,
    /// The prediction service could not be reached or understood.
    Transport,
}

impl AssessmentError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Prediction(PredictionError::ServiceRejected(_)) => ErrorCategory::Service,
            Self::Prediction(PredictionError::Transport(_)) => ErrorCategory::Transport,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_messages_name_the_accepted_bounds() {
        assert_eq!(
            ValidationError::OutOfRange(FormField::RestingBp).to_string(),
            "Resting blood pressure must be a realistic value (80 - 250 mm Hg)."
        );
        assert_eq!(
            ValidationError::OutOfRange(FormField::MaxHeartRate).to_string(),
            "Max heart rate must be a realistic value (60 - 220 bpm)."
        );
    }

    #[test]
    fn transport_detail_is_not_user_facing() {
        let err = PredictionError::transport("connection refused (os error 111)");
        assert_eq!(err.to_string(), TRANSPORT_FAILURE_MESSAGE);
    }

    #[test]
    fn categories_separate_rejection_from_transport() {
        let rejected: AssessmentError =
            PredictionError::ServiceRejected("invalid cp value".into()).into();
        let unreachable: AssessmentError = PredictionError::transport("timed out").into();
        let local: AssessmentError = ValidationError::MissingAge.into();

        assert_eq!(rejected.category(), ErrorCategory::Service);
        assert_eq!(rejected.to_string(), "invalid cp value");
        assert_eq!(unreachable.category(), ErrorCategory::Transport);
        assert_eq!(local.category(), ErrorCategory::Validation);
    }
}
