//! Built-in route configurations per network.

use crate::bridge::types::{BridgeTransferDirection, NetworkKind, RouteConfig};

const IBC_TRANSFER_PORT: &str = "transfer";
const CRONOS_GAS_LIMIT: u64 = 300_000;
const CRONOS_DEFAULT_GAS_PRICE: u64 = 5_000_000_000_000;

const MAINNET_CRONOS_BRIDGE_CONTRACT: &str = "0x6b1b50c2223eb31e0d4683b046ea9c6cb0d0ea4f";
const TESTNET_CRONOS_BRIDGE_CONTRACT: &str = "0x3368dd21c3a3a1b2e7e4c0d8cc5bd6ab2c7a5d0e";

/// Default configuration for a route on the given network.
///
/// `NOT_SUPPORT` yields an empty configuration.
pub fn default_route_config(network: NetworkKind, direction: BridgeTransferDirection) -> RouteConfig {
    let mut config = RouteConfig::empty(network, direction);

    match direction {
        BridgeTransferDirection::CryptoOrgToCronos => {
            config.prefix = match network {
                NetworkKind::Mainnet => "crc",
                NetworkKind::Testnet => "tcrc",
            }
            .to_string();
            config.bridge_channel = Some(
                match network {
                    NetworkKind::Mainnet => "channel-44",
                    NetworkKind::Testnet => "channel-131",
                }
                .to_string(),
            );
            config.bridge_port = Some(IBC_TRANSFER_PORT.to_string());
        }
        BridgeTransferDirection::CronosToCryptoOrg => {
            config.prefix = network.crypto_org_prefix().to_string();
            config.cronos_bridge_contract_address = Some(
                match network {
                    NetworkKind::Mainnet => MAINNET_CRONOS_BRIDGE_CONTRACT,
                    NetworkKind::Testnet => TESTNET_CRONOS_BRIDGE_CONTRACT,
                }
                .to_string(),
            );
            config.gas_limit = Some(CRONOS_GAS_LIMIT);
            config.default_gas_price = Some(CRONOS_DEFAULT_GAS_PRICE);
        }
        BridgeTransferDirection::NotSupport => {}
    }

    config
}
