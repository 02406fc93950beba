//! Read-only inputs shared by every reducer call.

use rust_decimal::Decimal;

use crate::bridge::types::{BridgeTransferDirection, NetworkKind};
use crate::config::schema::BridgeSettings;
use crate::session::asset::parse_amount;
use crate::session::{SessionSnapshot, UserAsset, WalletAuthMode};

/// Session snapshot plus bridge settings, injected into the wizard.
#[derive(Debug, Clone)]
pub struct WizardContext {
    pub session: SessionSnapshot,
    pub settings: BridgeSettings,
}

impl WizardContext {
    pub fn new(session: SessionSnapshot, settings: BridgeSettings) -> Self {
        Self { session, settings }
    }

    pub fn network(&self) -> NetworkKind {
        self.session.network()
    }

    pub fn auth_mode(&self) -> WalletAuthMode {
        self.session.auth_mode()
    }

    pub fn is_supported(&self, direction: BridgeTransferDirection) -> bool {
        self.settings.is_supported(direction)
    }

    /// Configured bridge fee; an unparsable fee counts as zero.
    pub fn fee(&self) -> Decimal {
        parse_amount(&self.settings.fee).unwrap_or(Decimal::ZERO)
    }

    pub fn is_bridge_asset(&self, asset: &UserAsset) -> bool {
        self.settings
            .supported_assets
            .iter()
            .any(|s| s.eq_ignore_ascii_case(&asset.mainnet_symbol))
    }
}
