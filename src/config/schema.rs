//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the wizard.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::bridge::types::BridgeTransferDirection;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WizardConfig {
    /// Bridge routes, assets and fees.
    pub bridge: BridgeSettings,

    /// Wallet daemon connection.
    pub wallet_service: WalletServiceConfig,

    /// Deadlines for external calls.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Bridge behaviour settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct BridgeSettings {
    /// Directions the wizard accepts; any other pair is reported unsupported.
    pub supported_directions: Vec<BridgeTransferDirection>,

    /// Mainnet symbols of assets that may be bridged.
    pub supported_assets: Vec<String>,

    /// Flat bridge fee in display units of the source asset.
    pub fee: String,

    /// JSON file holding user-edited route configuration.
    pub route_store_path: Option<String>,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            supported_directions: vec![
                BridgeTransferDirection::CryptoOrgToCronos,
                BridgeTransferDirection::CronosToCryptoOrg,
            ],
            supported_assets: vec!["CRO".to_string(), "CRONOS".to_string()],
            fee: "0".to_string(),
            route_store_path: None,
        }
    }
}

impl BridgeSettings {
    pub fn is_supported(&self, direction: BridgeTransferDirection) -> bool {
        direction.is_supported() && self.supported_directions.contains(&direction)
    }
}

/// Wallet daemon HTTP endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WalletServiceConfig {
    /// Base URL (e.g., "http://127.0.0.1:7750").
    pub base_url: String,

    /// Optional bearer token.
    pub api_key: Option<String>,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for WalletServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:7750".to_string(),
            api_key: None,
            request_timeout_secs: 30,
        }
    }
}

/// Deadlines applied by the wizard around each service call.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Route configuration fetch timeout in seconds.
    pub route_fetch_secs: u64,

    /// Password validation and decryption timeout in seconds.
    pub password_secs: u64,

    /// Transfer submission timeout in seconds.
    pub submission_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            route_fetch_secs: 10,
            password_secs: 30,
            submission_secs: 120,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9464".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: WizardConfig = toml::from_str("").unwrap();
        assert_eq!(config.bridge.supported_directions.len(), 2);
        assert_eq!(config.bridge.fee, "0");
        assert_eq!(config.timeouts.submission_secs, 120);
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_sections() {
        let config: WizardConfig = toml::from_str(
            r#"
            [bridge]
            supported_directions = ["CRYPTO_ORG_TO_CRONOS"]

            [wallet_service]
            base_url = "http://wallet.local:9000"
            "#,
        )
        .unwrap();
        assert!(config.bridge.is_supported(BridgeTransferDirection::CryptoOrgToCronos));
        assert!(!config.bridge.is_supported(BridgeTransferDirection::CronosToCryptoOrg));
        assert_eq!(config.bridge.supported_assets, vec!["CRO", "CRONOS"]);
        assert_eq!(config.wallet_service.request_timeout_secs, 30);
    }

    #[test]
    fn test_not_support_is_never_supported() {
        let settings = BridgeSettings {
            supported_directions: vec![BridgeTransferDirection::NotSupport],
            ..BridgeSettings::default()
        };
        assert!(!settings.is_supported(BridgeTransferDirection::NotSupport));
    }
}
