//! Rules for user-edited route configuration.
//!
//! Every violated rule is reported, not just the first, so an editor can
//! flag all offending fields at once.

use thiserror::Error;

use crate::bridge::types::RouteConfig;
use crate::session::address::is_valid_evm_address;

/// A single rule violation in an edited route configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct RouteConfigError {
    pub field: &'static str,
    pub message: String,
}

impl RouteConfigError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a route configuration against the rules of its network.
pub fn validate_route_config(config: &RouteConfig) -> Result<(), Vec<RouteConfigError>> {
    let mut errors = Vec::new();

    let expected_len = if config.network.is_testnet() { 4 } else { 3 };
    if config.prefix.is_empty() {
        errors.push(RouteConfigError::new("prefix", "prefix is required"));
    } else if config.prefix.len() != expected_len
        || !config.prefix.chars().all(|c| c.is_ascii_lowercase())
    {
        errors.push(RouteConfigError::new(
            "prefix",
            format!("prefix must be {} lowercase letters", expected_len),
        ));
    }

    if config.uses_contract() {
        match config.cronos_bridge_contract_address.as_deref() {
            None | Some("") => errors.push(RouteConfigError::new(
                "cronosBridgeContractAddress",
                "contract address is required",
            )),
            Some(address) if !is_valid_evm_address(address) => errors.push(RouteConfigError::new(
                "cronosBridgeContractAddress",
                format!("invalid contract address {}", address),
            )),
            Some(_) => {}
        }
    }

    if config.uses_ibc() {
        if config.bridge_channel.as_deref().map_or(true, str::is_empty) {
            errors.push(RouteConfigError::new("bridgeChannel", "channel is required"));
        }
        if config.bridge_port.as_deref().map_or(true, str::is_empty) {
            errors.push(RouteConfigError::new("bridgePort", "port is required"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
