//! Contracts of the external services the wizard consumes.
//!
//! # Data Flow
//! ```text
//! BridgeWizard (controller)
//!     → SecretStore      validate_password, decrypt_secret
//!     → BridgeService    retrieve_route_config, update_route_config
//!     → TransferService  submit_bridge_transfer
//!     → AnalyticsSink    log_page
//! ```
//!
//! # Implementations
//! - local.rs: BridgeService backed by the on-disk RouteConfigStore
//! - remote.rs: SecretStore + TransferService over the wallet daemon's HTTP API
//! - analytics.rs: AnalyticsSink that emits tracing events
//!
//! Signing, key encryption and chain RPC live behind these traits.

pub mod analytics;
pub mod local;
pub mod remote;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bridge::types::{BridgeTransferDirection, NetworkKind, RouteConfig};
use crate::session::{UserAsset, WalletAuthMode};

pub use analytics::TracingAnalytics;
pub use local::LocalBridgeService;
pub use remote::RemoteWalletService;

/// Errors reported by consumed services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Password did not unlock the secret store.
    #[error("invalid password")]
    InvalidPassword,

    /// Connection or transport failure.
    #[error("request failed: {0}")]
    Transport(String),

    /// Call did not finish before its deadline.
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Service processed the call and refused it.
    #[error("rejected: {0}")]
    Rejected(String),

    /// Response could not be understood.
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Result type for service calls.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Decrypted wallet mnemonic.
///
/// Never printed: `Debug` is redacted and there is no `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretPhrase(String);

impl SecretPhrase {
    pub fn new(phrase: impl Into<String>) -> Self {
        Self(phrase.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretPhrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretPhrase(<redacted>)")
    }
}

/// Everything the transfer service needs to build and broadcast a bridge transfer.
#[derive(Debug, Clone)]
pub struct BridgeTransferRequest {
    pub direction: BridgeTransferDirection,
    pub source_address: String,
    pub destination_address: String,
    /// Amount in display units of `asset`.
    pub amount: String,
    pub asset: UserAsset,
    /// Absent for hardware-signed transfers.
    pub secret_phrase: Option<SecretPhrase>,
    pub wallet_auth_mode: WalletAuthMode,
}

/// Outcome of a broadcast transfer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastResult {
    #[serde(default)]
    pub transaction_hash: Option<String>,
}

/// Encrypted secret storage of the wallet.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Decrypt the mnemonic of `wallet_id`.
    ///
    /// Fails with `ServiceError::InvalidPassword` when the password is wrong.
    async fn decrypt_secret(&self, password: &str, wallet_id: &str) -> ServiceResult<SecretPhrase>;

    /// Check a password without decrypting anything.
    async fn validate_password(&self, password: &str) -> ServiceResult<bool>;
}

/// Source of per-route bridge parameters.
#[async_trait]
pub trait BridgeService: Send + Sync {
    async fn retrieve_route_config(
        &self,
        network: NetworkKind,
        direction: BridgeTransferDirection,
    ) -> ServiceResult<RouteConfig>;

    /// Persist user-edited parameters.
    async fn update_route_config(&self, config: RouteConfig) -> ServiceResult<()>;

    /// Drop user edits of a route and return the default now in effect.
    async fn reset_route_config(
        &self,
        network: NetworkKind,
        direction: BridgeTransferDirection,
    ) -> ServiceResult<RouteConfig>;
}

/// Builds, signs and broadcasts bridge transfers.
#[async_trait]
pub trait TransferService: Send + Sync {
    async fn submit_bridge_transfer(&self, request: BridgeTransferRequest) -> ServiceResult<BroadcastResult>;
}

/// Usage analytics.
pub trait AnalyticsSink: Send + Sync {
    fn log_page(&self, page: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_phrase_is_redacted() {
        let phrase = SecretPhrase::new("abandon abandon about");
        assert_eq!(format!("{:?}", phrase), "SecretPhrase(<redacted>)");
        assert_eq!(phrase.expose(), "abandon abandon about");
    }

    #[test]
    fn test_broadcast_result_wire_name() {
        let result: BroadcastResult = serde_json::from_str(r#"{"transactionHash":"0xabc"}"#).unwrap();
        assert_eq!(result.transaction_hash.as_deref(), Some("0xabc"));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(ServiceError::Timeout(30).to_string(), "request timed out after 30 seconds");
        assert_eq!(ServiceError::InvalidPassword.to_string(), "invalid password");
    }
}
