//! Wizard state: the current step plus everything the steps display.

use serde::Serialize;

use crate::bridge::types::{BridgeTransferDirection, RouteConfig};
use crate::services::SecretPhrase;
use crate::wizard::error::WizardError;
use crate::wizard::form::{FieldErrors, TransferForm};

/// Outcome of a submitted transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResult {
    pub transaction_hash: Option<String>,
    pub error: Option<String>,
}

impl TransferResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Transaction hash on success, `WizardError::Submission` otherwise.
    pub fn outcome(&self) -> Result<Option<&str>, WizardError> {
        match &self.error {
            Some(reason) => Err(WizardError::Submission(reason.clone())),
            None => Ok(self.transaction_hash.as_deref()),
        }
    }
}

/// The three wizard steps.
///
/// Data that only exists on a step lives inside its variant: the form
/// snapshot is taken on entering Confirm and carried into Execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardStep {
    Configure,
    Confirm {
        snapshot: TransferForm,
        disclaimer_acknowledged: bool,
    },
    Execute {
        snapshot: TransferForm,
        /// `None` while the submission is in flight.
        result: Option<TransferResult>,
    },
}

impl WizardStep {
    pub fn index(&self) -> usize {
        match self {
            Self::Configure => 0,
            Self::Confirm { .. } => 1,
            Self::Execute { .. } => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Configure => "configure",
            Self::Confirm { .. } => "confirm",
            Self::Execute { .. } => "execute",
        }
    }

    pub fn snapshot(&self) -> Option<&TransferForm> {
        match self {
            Self::Configure => None,
            Self::Confirm { snapshot, .. } | Self::Execute { snapshot, .. } => Some(snapshot),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Execute { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressKind {
    Pending,
    Loading,
    Complete,
    TransferInitiated,
    Failed,
}

/// One line of the execute step's progress list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    pub kind: ProgressKind,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl ProgressEntry {
    pub fn new(kind: ProgressKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
            transaction_hash: None,
            link: None,
        }
    }

    pub fn loading() -> Self {
        Self::new(ProgressKind::Loading, "", "")
    }
}

/// Full wizard state. Replaced wholesale by every reducer call.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    pub step: WizardStep,
    pub form: TransferForm,
    pub is_valid: bool,
    pub field_errors: FieldErrors,
    /// Resolved direction of the current chain pair.
    pub direction: BridgeTransferDirection,
    /// Configuration of `direction`, once loaded.
    pub route_config: Option<RouteConfig>,
    /// Failure of the latest route configuration fetch.
    pub route_error: Option<String>,
    /// Bumped whenever the direction changes; fetch results tagged with an
    /// older value are dropped.
    pub route_generation: u64,
    pub progress: Vec<ProgressEntry>,
    /// Decrypted once per wizard instance, reused after Back.
    pub secret: Option<SecretPhrase>,
    pub awaiting_password: bool,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            step: WizardStep::Configure,
            form: TransferForm::default(),
            is_valid: false,
            field_errors: FieldErrors::new(),
            direction: BridgeTransferDirection::NotSupport,
            route_config: None,
            route_error: None,
            route_generation: 0,
            progress: Vec::new(),
            secret: None,
            awaiting_password: false,
        }
    }
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asset and amount inputs are enabled only on a supported chain pair.
    pub fn inputs_enabled(&self) -> bool {
        matches!(self.step, WizardStep::Configure) && self.direction.is_supported()
    }

    pub fn result(&self) -> Option<&TransferResult> {
        match &self.step {
            WizardStep::Execute { result, .. } => result.as_ref(),
            _ => None,
        }
    }
}
