//! Address format checks for the bridged chains.

use alloy::primitives::Address;
use std::str::FromStr;

use crate::bridge::types::{Chain, NetworkKind};

const BECH32_CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";
const BECH32_MAX_LEN: usize = 90;
// data part carries at least the 6-character checksum
const BECH32_MIN_DATA_LEN: usize = 6;

/// `0x`-prefixed, 20-byte hex address.
pub fn is_valid_evm_address(address: &str) -> bool {
    address.starts_with("0x") && Address::from_str(address).is_ok()
}

/// Lower-case bech32 account address with the network's Crypto.org prefix.
///
/// Checks shape and alphabet only; checksum verification is left to the
/// signing service.
pub fn is_valid_crypto_org_address(address: &str, network: NetworkKind) -> bool {
    if address.len() > BECH32_MAX_LEN {
        return false;
    }
    let Some(data) = address
        .strip_prefix(network.crypto_org_prefix())
        .and_then(|rest| rest.strip_prefix('1'))
    else {
        return false;
    };
    data.len() >= BECH32_MIN_DATA_LEN && data.chars().all(|c| BECH32_CHARSET.contains(c))
}

/// Validate a receiving address for the given chain.
pub fn is_valid_address(chain: Chain, address: &str, network: NetworkKind) -> bool {
    match chain {
        Chain::Cronos => is_valid_evm_address(address),
        Chain::CryptoOrg => is_valid_crypto_org_address(address, network),
    }
}

/// Shorten an address for display, keeping `keep` characters at each end.
pub fn middle_ellipsis(address: &str, keep: usize) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= keep * 2 {
        return address.to_string();
    }
    let head: String = chars[..keep].iter().collect();
    let tail: String = chars[chars.len() - keep..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVM: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

    #[test]
    fn test_evm_address() {
        assert!(is_valid_evm_address(EVM));
        assert!(!is_valid_evm_address("f39fd6e51aad88f6f4ce6ab8827279cfffb92266"));
        assert!(!is_valid_evm_address("0x1234"));
    }

    #[test]
    fn test_crypto_org_address_prefix_follows_network() {
        let mainnet = "cro1qqqsyqcyq5rqwzqfpg9scrgwpugpzysnzs23v";
        let testnet = "tcro1qqqsyqcyq5rqwzqfpg9scrgwpugpzysnzs23v";
        assert!(is_valid_crypto_org_address(mainnet, NetworkKind::Mainnet));
        assert!(!is_valid_crypto_org_address(mainnet, NetworkKind::Testnet));
        assert!(is_valid_crypto_org_address(testnet, NetworkKind::Testnet));
        assert!(!is_valid_crypto_org_address("cro1bio", NetworkKind::Mainnet));
        assert!(!is_valid_crypto_org_address("cro1QQQSYQCYQ5RQ", NetworkKind::Mainnet));
    }

    #[test]
    fn test_middle_ellipsis() {
        assert_eq!(middle_ellipsis(EVM, 6), "0xf39f...b92266");
        assert_eq!(middle_ellipsis("short", 6), "short");
    }
}
