use crate::api::Outcome;
use crate::error::Error;

/// UI-facing submission state, kept apart from any rendering so the flow
/// can be driven and tested without a front end.
///
/// Rapid repeated submits are not deduplicated: a submit event always
/// moves to `Submitting`, also from a terminal state.
#[derive(Clone, Debug, PartialEq)]
pub enum FormState {
    Idle,
    Submitting,
    Success,
    Failed(String),
}

impl FormState {
    pub fn new() -> Self {
        FormState::Idle
    }

    /// A submit event (re)starts the cycle.
    pub fn on_submit(&mut self) {
        *self = FormState::Submitting;
    }

    /// Resolve the in-flight submission with its terminal outcome.
    pub fn on_outcome(&mut self, outcome: &Outcome) {
        *self = if outcome.success {
            FormState::Success
        } else {
            let msg = outcome
                .error
                .clone()
                .unwrap_or_else(|| "Email sending failed. Please try again.".to_string());
            FormState::Failed(msg)
        };
    }

    /// Resolve with an error raised before any reply came back
    /// (validation failure or transport-chain exhaustion).
    pub fn on_error(&mut self, err: &Error) {
        *self = FormState::Failed(err.to_string());
    }

    pub fn is_terminal(&self) -> bool {
        match self {
            FormState::Success | FormState::Failed(_) => true,
            _ => false,
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        FormState::new()
    }
}
