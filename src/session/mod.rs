//! Read-only wallet session snapshot.
//!
//! The wizard never reaches into shared application state. Whoever drives it
//! hands over a `SessionSnapshot` describing the unlocked wallet, its network
//! and its assets, and the wizard only reads from it.

pub mod address;
pub mod asset;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::bridge::types::{Chain, NetworkKind};

pub use asset::{AmountError, AssetType, UserAsset};

/// Kind of wallet behind the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletType {
    /// Mnemonic held in the local encrypted secret store.
    Normal,
    /// Keys held on a Ledger device.
    Ledger,
}

/// How a transfer gets signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletAuthMode {
    /// Requires the decrypted secret phrase, so the password gate applies.
    LocalSecret,
    /// Signing is delegated to a hardware device; no password gate.
    HardwareSigner,
}

impl WalletType {
    pub fn auth_mode(&self) -> WalletAuthMode {
        match self {
            Self::Normal => WalletAuthMode::LocalSecret,
            Self::Ledger => WalletAuthMode::HardwareSigner,
        }
    }
}

impl WalletAuthMode {
    pub fn requires_password(&self) -> bool {
        matches!(self, Self::LocalSecret)
    }
}

/// Identity of the unlocked wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletInfo {
    pub identifier: String,
    pub name: String,
    /// Crypto.org account address.
    pub address: String,
    pub wallet_type: WalletType,
    pub network: NetworkKind,
    /// Block explorer base URL of the wallet's default chain.
    pub explorer_url: String,
}

/// Snapshot of everything the wizard reads from the wallet session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub wallet: WalletInfo,
    #[serde(default)]
    pub assets: Vec<UserAsset>,
}

impl SessionSnapshot {
    /// Load a snapshot exported as JSON by the wallet.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn network(&self) -> NetworkKind {
        self.wallet.network
    }

    pub fn auth_mode(&self) -> WalletAuthMode {
        self.wallet.wallet_type.auth_mode()
    }

    pub fn find_asset(&self, identifier: &str) -> Option<&UserAsset> {
        self.assets.iter().find(|a| a.identifier == identifier)
    }

    /// Native bridge asset on the given chain.
    pub fn asset_for_chain(&self, chain: Chain) -> Option<&UserAsset> {
        let symbol = match chain {
            Chain::CryptoOrg => self.network().native_symbol(),
            Chain::Cronos => "CRONOS",
        };
        self.assets.iter().find(|a| {
            a.mainnet_symbol.eq_ignore_ascii_case("CRO") && a.symbol.eq_ignore_ascii_case(symbol)
        })
    }

    /// Assets that may be moved across the bridge.
    pub fn bridge_supported_assets<'a>(&'a self, symbols: &'a [String]) -> impl Iterator<Item = &'a UserAsset> + 'a {
        self.assets
            .iter()
            .filter(move |a| symbols.iter().any(|s| s.eq_ignore_ascii_case(&a.mainnet_symbol)))
    }

    /// Address of the first EVM asset, if the wallet has one.
    pub fn evm_address(&self) -> Option<&str> {
        self.assets
            .iter()
            .find(|a| a.asset_type == AssetType::Evm)
            .and_then(|a| a.address.as_deref())
    }

    /// Receiving/sending address of the wallet on a chain.
    pub fn address_for_chain(&self, chain: Chain) -> Option<&str> {
        match chain {
            Chain::CryptoOrg => Some(self.wallet.address.as_str()),
            Chain::Cronos => self.evm_address(),
        }
    }

    /// Every address the wallet owns across the bridged chains.
    pub fn own_addresses(&self) -> Vec<&str> {
        [Chain::CryptoOrg, Chain::Cronos]
            .into_iter()
            .filter_map(|chain| self.address_for_chain(chain))
            .collect()
    }

    /// Explorer link to a transaction of the given asset.
    pub fn transaction_url(&self, asset: Option<&UserAsset>, transaction_hash: &str) -> String {
        let base = asset
            .and_then(|a| a.explorer_url.as_deref())
            .unwrap_or(&self.wallet.explorer_url);
        format!("{}/tx/{}", base.trim_end_matches('/'), transaction_hash)
    }
}
