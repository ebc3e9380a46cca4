//! Controller layer: owns the screener form and drives it through validation,
//! prediction and interpretation.

pub mod events;
pub mod reducer;

use serde::Serialize;
use shared::{
    domain::FormField,
    protocol::{PredictionRequest, PredictionResponse},
};
use tracing::{debug, info, warn};

use crate::{
    error::{AssessmentError, ErrorCategory, PredictionError, ValidationError},
    interpret::{interpret_response, RiskPresentation},
    mapping::to_prediction_request,
    validation::{estimate_max_heart_rate, validate, AssessmentInput},
    PredictionService,
};

pub use events::ControllerEvent;
pub use reducer::{transition, AssessmentState};

/// What a submit request turned into.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation passed and the controller is now `Submitting`; the caller must send
    /// this request and hand the outcome to [`AssessmentController::complete_submission`].
    Started(PredictionRequest),
    /// The form failed validation; the error is now the displayed message.
    Invalid(ValidationError),
    /// A submission is already pending. Nothing changed.
    Busy,
}

/// Read-only snapshot for a presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentView {
    pub state: AssessmentState,
    pub loading: bool,
    pub input: AssessmentInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_category: Option<ErrorCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<RiskPresentation>,
}

#[derive(Debug, Default)]
pub struct AssessmentController {
    input: AssessmentInput,
    state: AssessmentState,
    error: Option<AssessmentError>,
    result: Option<RiskPresentation>,
}

impl AssessmentController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AssessmentState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_submitting()
    }

    pub fn input(&self) -> &AssessmentInput {
        &self.input
    }

    pub fn error(&self) -> Option<&AssessmentError> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn result(&self) -> Option<&RiskPresentation> {
        self.result.as_ref()
    }

    pub fn view(&self) -> AssessmentView {
        AssessmentView {
            state: self.state,
            loading: self.is_loading(),
            input: self.input.clone(),
            error: self.error_message(),
            error_category: self.error.as_ref().map(AssessmentError::category),
            result: self.result.clone(),
        }
    }

    /// Records a new value for `field`. Any shown error is dismissed; the last result
    /// stays visible.
    pub fn edit_field(&mut self, field: FormField, value: impl Into<String>) {
        if self.apply(ControllerEvent::FieldEdited(field)) {
            self.input.set(field, value);
            self.error = None;
        }
    }

    /// Fills the max heart rate field with `220 - age`. Without a usable age the
    /// `MissingAge` message is shown instead and the field is left alone.
    pub fn estimate_max_heart_rate(&mut self) -> Result<String, ValidationError> {
        match estimate_max_heart_rate(&self.input) {
            Ok(estimate) => {
                self.edit_field(FormField::MaxHeartRate, estimate.clone());
                Ok(estimate)
            }
            Err(err) => {
                if self.apply(ControllerEvent::ValidationFailed) {
                    self.error = Some(err.clone().into());
                }
                Err(err)
            }
        }
    }

    /// First half of a submission: validates, maps, and moves to `Submitting`.
    pub fn begin_submission(&mut self) -> SubmitOutcome {
        if self.state.is_submitting() {
            debug!("assessment: submit ignored while a prediction is pending");
            return SubmitOutcome::Busy;
        }

        let validated = match validate(&self.input) {
            Ok(validated) => validated,
            Err(err) => {
                self.apply(ControllerEvent::ValidationFailed);
                info!(reason = %err, "assessment: form rejected by guardrails");
                self.error = Some(err.clone().into());
                return SubmitOutcome::Invalid(err);
            }
        };

        let request = to_prediction_request(&validated);
        if !self.apply(ControllerEvent::SubmissionStarted) {
            return SubmitOutcome::Busy;
        }
        self.error = None;
        self.result = None;
        SubmitOutcome::Started(request)
    }

    /// Second half of a submission. Returns `false` if no submission was pending, in
    /// which case the outcome is dropped.
    pub fn complete_submission(
        &mut self,
        outcome: Result<PredictionResponse, PredictionError>,
    ) -> bool {
        match outcome {
            Ok(response) => {
                if !self.apply(ControllerEvent::PredictionSucceeded) {
                    return false;
                }
                let presentation = interpret_response(&response);
                info!(
                    tier = %presentation.tier,
                    probability = presentation.probability,
                    "assessment: risk interpreted"
                );
                self.error = None;
                self.result = Some(presentation);
            }
            Err(err) => {
                if !self.apply(ControllerEvent::PredictionFailed) {
                    return false;
                }
                warn!(error = ?err, "assessment: prediction failed");
                self.result = None;
                self.error = Some(err.into());
            }
        }
        true
    }

    /// Runs a full submission against `service`. Returns the state it settled in.
    pub async fn submit<S>(&mut self, service: &S) -> AssessmentState
    where
        S: PredictionService + ?Sized,
    {
        if let SubmitOutcome::Started(request) = self.begin_submission() {
            let outcome = service.predict(&request).await;
            self.complete_submission(outcome);
        }
        self.state
    }

    /// Clears the form, result and error. Refused while a submission is pending.
    pub fn reset(&mut self) -> bool {
        if !self.apply(ControllerEvent::Reset) {
            return false;
        }
        self.input = AssessmentInput::default();
        self.error = None;
        self.result = None;
        true
    }

    fn apply(&mut self, event: ControllerEvent) -> bool {
        match transition(self.state, event) {
            Some(next) => {
                if next != self.state {
                    debug!(
                        event = event.name(),
                        from = ?self.state,
                        to = ?next,
                        "assessment: state transition"
                    );
                }
                self.state = next;
                true
            }
            None => {
                debug!(
                    event = event.name(),
                    state = ?self.state,
                    "assessment: event refused"
                );
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
