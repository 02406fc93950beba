//! Wizard error types.

use thiserror::Error;

use crate::bridge::types::Chain;
use crate::services::ServiceError;
use crate::wizard::form::FieldErrors;

/// Why an event or operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("invalid transfer: {0}")]
    Validation(FieldErrors),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("bridge transfer from {} to {} is not supported", .source_chain.label(), .destination_chain.label())]
    RouteUnsupported {
        source_chain: Chain,
        destination_chain: Chain,
    },

    #[error("transfer failed: {0}")]
    Submission(String),

    #[error("the disclaimer must be acknowledged before confirming")]
    DisclaimerNotAcknowledged,

    #[error("{event} is not allowed in the {step} step")]
    InvalidTransition {
        step: &'static str,
        event: &'static str,
    },

    #[error("invalid route configuration: {0}")]
    RouteConfig(String),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl WizardError {
    pub fn invalid_transition(step: &'static str, event: &'static str) -> Self {
        Self::InvalidTransition { step, event }
    }
}
