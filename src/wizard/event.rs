//! Inputs and outputs of the reducer.

use crate::bridge::types::{BridgeTransferDirection, Chain, NetworkKind, RouteConfig};
use crate::services::{BridgeTransferRequest, BroadcastResult, SecretPhrase};

/// Something that happened: a user action or a service completion.
#[derive(Debug, Clone)]
pub enum WizardEvent {
    SelectSourceChain(Chain),
    SelectDestinationChain(Chain),
    SwapChains,
    SelectAsset(String),
    SetAmount(String),
    /// Continue from Configure. Opens the password prompt when needed.
    RequestTransfer,
    PasswordVerified(SecretPhrase),
    PasswordRejected(String),
    CancelPassword,
    RouteConfigLoaded { generation: u64, config: RouteConfig },
    RouteConfigFailed { generation: u64, reason: String },
    /// A user edit of the route parameters was persisted.
    RouteConfigEdited(RouteConfig),
    ToggleDisclaimer,
    Back,
    Confirm,
    SubmissionSucceeded(BroadcastResult),
    SubmissionFailed(String),
}

impl WizardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectSourceChain(_) => "select_source_chain",
            Self::SelectDestinationChain(_) => "select_destination_chain",
            Self::SwapChains => "swap_chains",
            Self::SelectAsset(_) => "select_asset",
            Self::SetAmount(_) => "set_amount",
            Self::RequestTransfer => "request_transfer",
            Self::PasswordVerified(_) => "password_verified",
            Self::PasswordRejected(_) => "password_rejected",
            Self::CancelPassword => "cancel_password",
            Self::RouteConfigLoaded { .. } => "route_config_loaded",
            Self::RouteConfigFailed { .. } => "route_config_failed",
            Self::RouteConfigEdited(_) => "route_config_edited",
            Self::ToggleDisclaimer => "toggle_disclaimer",
            Self::Back => "back",
            Self::Confirm => "confirm",
            Self::SubmissionSucceeded(_) => "submission_succeeded",
            Self::SubmissionFailed(_) => "submission_failed",
        }
    }
}

/// Side effects requested by the reducer, run by the controller.
#[derive(Debug, Clone)]
pub enum Effect {
    FetchRouteConfig {
        generation: u64,
        network: NetworkKind,
        direction: BridgeTransferDirection,
    },
    PromptPassword,
    SubmitTransfer(BridgeTransferRequest),
}
