//! Cross-chain bridge transfer wizard.
//!
//! Moves CRO between Crypto.org Chain and Cronos in three steps: configure
//! the transfer, confirm it, then watch it execute. Wallet secrets, route
//! parameters and broadcasting come from pluggable services.

pub mod auth;
pub mod bridge;
pub mod config;
pub mod observability;
pub mod services;
pub mod session;
pub mod wizard;

pub use config::schema::WizardConfig;
pub use session::SessionSnapshot;
pub use wizard::{BridgeWizard, WizardContext, WizardError, WizardEvent, WizardServices};
