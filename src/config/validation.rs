//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, fee non-negative)
//! - Check endpoints and addresses parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: WizardConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::WizardConfig;
use crate::session::asset::parse_amount;

/// A semantic problem in a configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validate a loaded configuration.
pub fn validate_config(config: &WizardConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut push = |field: &'static str, message: String| errors.push(ValidationError { field, message });

    let bridge = &config.bridge;
    if bridge.supported_directions.is_empty() {
        push("bridge.supported_directions", "at least one direction is required".to_string());
    }
    if bridge.supported_directions.iter().any(|d| !d.is_supported()) {
        push("bridge.supported_directions", "NOT_SUPPORT cannot be enabled".to_string());
    }
    if bridge.supported_assets.is_empty() {
        push("bridge.supported_assets", "at least one asset is required".to_string());
    }
    match parse_amount(&bridge.fee) {
        Ok(fee) if fee.is_sign_negative() => push("bridge.fee", "fee cannot be negative".to_string()),
        Ok(_) => {}
        Err(e) => push("bridge.fee", e.to_string()),
    }

    if let Err(e) = url::Url::parse(&config.wallet_service.base_url) {
        push("wallet_service.base_url", format!("invalid URL: {}", e));
    }
    if config.wallet_service.request_timeout_secs == 0 {
        push("wallet_service.request_timeout_secs", "must be greater than 0".to_string());
    }

    let timeouts = &config.timeouts;
    for (field, value) in [
        ("timeouts.route_fetch_secs", timeouts.route_fetch_secs),
        ("timeouts.password_secs", timeouts.password_secs),
        ("timeouts.submission_secs", timeouts.submission_secs),
    ] {
        if value == 0 {
            push(field, "must be greater than 0".to_string());
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        push(
            "observability.metrics_address",
            format!("invalid socket address {}", config.observability.metrics_address),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
