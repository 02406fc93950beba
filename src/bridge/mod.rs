//! Bridge route subsystem.
//!
//! # Data Flow
//! ```text
//! (source chain, destination chain)
//!     → types.rs (resolve BridgeTransferDirection)
//!     → store.rs (user override or defaults.rs)
//!     → RouteConfig handed to the wizard
//!
//! Route editor:
//!     edited RouteConfig
//!     → validation.rs (prefix / contract / channel rules)
//!     → store.rs (insert, persist to JSON)
//! ```
//!
//! # Design Decisions
//! - Defaults are code, overrides are data; resetting removes the override
//! - Routes are keyed by (network, direction) so testnet edits never leak
//!   into mainnet

pub mod defaults;
pub mod store;
pub mod types;
pub mod validation;

pub use defaults::default_route_config;
pub use store::{RouteConfigStore, RouteStoreError};
pub use types::{BridgeTransferDirection, Chain, NetworkKind, RouteConfig};
pub use validation::{validate_route_config, RouteConfigError};
