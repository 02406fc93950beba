//! Three-step bridge transfer wizard.
//!
//! # Steps
//! - Configure: pick chains, asset and amount; validated per field
//! - Confirm: review the snapshot and acknowledge the disclaimer
//! - Execute: submission progress and final result (terminal)
//!
//! `reducer` holds the state machine and stays free of I/O. `controller`
//! wires it to the wallet services.

pub mod context;
pub mod controller;
pub mod error;
pub mod event;
pub mod form;
pub mod history;
pub mod preview;
pub mod reducer;
pub mod state;

pub use context::WizardContext;
pub use controller::{BridgeWizard, WizardServices};
pub use error::WizardError;
pub use event::{Effect, WizardEvent};
pub use form::{FieldErrors, FormField, TransferForm};
pub use history::{TransactionDirection, TransactionStatus, TransferHistory, TransferRecord};
pub use preview::TransferPreview;
pub use reducer::{reduce, Transition};
pub use state::{ProgressEntry, ProgressKind, TransferResult, WizardState, WizardStep};
