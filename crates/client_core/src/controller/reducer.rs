//! Transition table for the assessment lifecycle.

use serde::Serialize;

use super::events::ControllerEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentState {
    #[default]
    Idle,
    Editing,
    Submitting,
    Success,
    Failed,
}

impl AssessmentState {
    pub fn is_submitting(self) -> bool {
        self == Self::Submitting
    }
}

/// Next state for `event`, or `None` when the event is not accepted in `state`.
///
/// While `Submitting`, edits are recorded but a second submission, a reset, or anything
/// other than the pending outcome is refused. Outcomes arriving outside `Submitting`
/// are refused too.
pub fn transition(state: AssessmentState, event: ControllerEvent) -> Option<AssessmentState> {
    use AssessmentState::*;
    use ControllerEvent::*;

    match (state, event) {
        (Submitting, FieldEdited(_)) => Some(Submitting),
        (Submitting, PredictionSucceeded) => Some(Success),
        (Submitting, PredictionFailed) => Some(Failed),
        (Submitting, ValidationFailed | SubmissionStarted | Reset) => None,

        (Idle | Editing | Success | Failed, FieldEdited(_) | ValidationFailed) => Some(Editing),
        (Idle | Editing | Success | Failed, SubmissionStarted) => Some(Submitting),
        (Idle | Editing | Success | Failed, Reset) => Some(Idle),
        (Idle | Editing | Success | Failed, PredictionSucceeded | PredictionFailed) => None,
    }
}
