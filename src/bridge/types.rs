//! Chain, direction and route configuration types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A chain that can take part in a bridge transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Chain {
    /// Crypto.org Chain (Tendermint, bech32 addresses).
    CryptoOrg,
    /// Cronos (EVM, hex addresses).
    Cronos,
}

impl Chain {
    /// All chains offered in the source/destination selectors.
    pub const ALL: [Chain; 2] = [Chain::CryptoOrg, Chain::Cronos];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CryptoOrg => "CRYPTO_ORG",
            Self::Cronos => "CRONOS",
        }
    }

    /// Human readable chain name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CryptoOrg => "Crypto.org Chain",
            Self::Cronos => "Cronos Chain",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a chain, direction or network name is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl FromStr for Chain {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CRYPTO_ORG" => Ok(Self::CryptoOrg),
            "CRONOS" => Ok(Self::Cronos),
            other => Err(UnknownVariant::new("chain", other)),
        }
    }
}

/// Ordered chain pair a transfer moves along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BridgeTransferDirection {
    CryptoOrgToCronos,
    CronosToCryptoOrg,
    /// Sentinel for any pair without a bridge.
    NotSupport,
}

impl BridgeTransferDirection {
    /// Resolve the direction for an ordered chain pair.
    pub fn from_pair(source: Chain, destination: Chain) -> Self {
        match (source, destination) {
            (Chain::CryptoOrg, Chain::Cronos) => Self::CryptoOrgToCronos,
            (Chain::Cronos, Chain::CryptoOrg) => Self::CronosToCryptoOrg,
            _ => Self::NotSupport,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CryptoOrgToCronos => "CRYPTO_ORG_TO_CRONOS",
            Self::CronosToCryptoOrg => "CRONOS_TO_CRYPTO_ORG",
            Self::NotSupport => "NOT_SUPPORT",
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::NotSupport)
    }

    /// Chains of the pair, `None` for the sentinel.
    pub fn chains(&self) -> Option<(Chain, Chain)> {
        match self {
            Self::CryptoOrgToCronos => Some((Chain::CryptoOrg, Chain::Cronos)),
            Self::CronosToCryptoOrg => Some((Chain::Cronos, Chain::CryptoOrg)),
            Self::NotSupport => None,
        }
    }
}

impl fmt::Display for BridgeTransferDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BridgeTransferDirection {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CRYPTO_ORG_TO_CRONOS" => Ok(Self::CryptoOrgToCronos),
            "CRONOS_TO_CRYPTO_ORG" => Ok(Self::CronosToCryptoOrg),
            "NOT_SUPPORT" => Ok(Self::NotSupport),
            other => Err(UnknownVariant::new("direction", other)),
        }
    }
}

/// Network the wallet session is connected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    Mainnet,
    Testnet,
}

impl NetworkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }

    pub fn is_testnet(&self) -> bool {
        matches!(self, Self::Testnet)
    }

    /// Bech32 prefix of Crypto.org account addresses on this network.
    pub fn crypto_org_prefix(&self) -> &'static str {
        match self {
            Self::Mainnet => "cro",
            Self::Testnet => "tcro",
        }
    }

    /// Symbol of the native Crypto.org asset on this network.
    pub fn native_symbol(&self) -> &'static str {
        match self {
            Self::Mainnet => "CRO",
            Self::Testnet => "TCRO",
        }
    }
}

impl fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            other => Err(UnknownVariant::new("network", other)),
        }
    }
}

/// Parameters needed to build a transfer along one route.
///
/// Contract fields apply to EVM-originated routes, channel/port to IBC
/// routes. Unused fields stay `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteConfig {
    #[serde(rename = "bridgeDirectionType")]
    pub direction: BridgeTransferDirection,
    #[serde(rename = "bridgeNetworkConfigType")]
    pub network: NetworkKind,
    /// Bech32 prefix of the receiving side.
    pub prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cronos_bridge_contract_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge_channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge_port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_gas_price: Option<u64>,
}

impl RouteConfig {
    /// Empty configuration used for unsupported routes.
    pub fn empty(network: NetworkKind, direction: BridgeTransferDirection) -> Self {
        Self {
            direction,
            network,
            prefix: String::new(),
            cronos_bridge_contract_address: None,
            bridge_channel: None,
            bridge_port: None,
            gas_limit: None,
            default_gas_price: None,
        }
    }

    /// Whether the route is driven by a contract on Cronos.
    pub fn uses_contract(&self) -> bool {
        self.direction == BridgeTransferDirection::CronosToCryptoOrg
    }

    /// Whether the route is an IBC transfer.
    pub fn uses_ibc(&self) -> bool {
        self.direction == BridgeTransferDirection::CryptoOrgToCronos
    }
}
