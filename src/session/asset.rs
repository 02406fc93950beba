//! Wallet assets and amount arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Errors converting between display amounts and base units.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("invalid amount: {0}")]
    Invalid(String),

    #[error("asset precision {0} exceeds supported maximum")]
    PrecisionTooLarge(u32),

    #[error("amount has more than {0} decimals")]
    ExcessPrecision(u32),
}

/// Ledger an asset lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    Tendermint,
    Evm,
}

/// An asset held by the session's wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAsset {
    pub identifier: String,
    pub name: String,
    pub symbol: String,
    pub mainnet_symbol: String,
    pub asset_type: AssetType,
    /// Number of decimals of the smallest denomination.
    pub decimals: u32,
    /// Balance in base units.
    pub balance: String,
    /// Address holding the asset, when it differs from the wallet address.
    #[serde(default)]
    pub address: Option<String>,
    /// Block explorer base URL for this asset's chain.
    #[serde(default)]
    pub explorer_url: Option<String>,
}

impl UserAsset {
    /// Balance in display units.
    pub fn scaled_balance(&self) -> Result<Decimal, AmountError> {
        to_display_units(&self.balance, self.decimals)
    }

    /// Smallest transferable amount: one base unit.
    pub fn min_transfer_amount(&self) -> Result<Decimal, AmountError> {
        Decimal::try_new(1, self.decimals).map_err(|_| AmountError::PrecisionTooLarge(self.decimals))
    }

    /// Whether `amount` is expressible in whole base units.
    pub fn fits_precision(&self, amount: Decimal) -> bool {
        amount.normalize().scale() <= self.decimals
    }

    /// Convert a display amount to base units of this asset.
    ///
    /// Fails rather than rounding when `amount` is finer than one base unit.
    pub fn to_base_units(&self, amount: Decimal) -> Result<String, AmountError> {
        let factor = Decimal::from_i128_with_scale(10i128.pow(self.decimals.min(28)), 0);
        let scaled = amount
            .checked_mul(factor)
            .ok_or_else(|| AmountError::Invalid(amount.to_string()))?;
        if !scaled.fract().is_zero() {
            return Err(AmountError::ExcessPrecision(self.decimals));
        }
        Ok(scaled.normalize().to_string())
    }
}

/// Parse a user-entered amount, accepting plain and scientific notation.
pub fn parse_amount(input: &str) -> Result<Decimal, AmountError> {
    let trimmed = input.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| AmountError::Invalid(trimmed.to_string()))
}

/// Interpret a base-unit integer string as a display amount.
pub fn to_display_units(base_units: &str, decimals: u32) -> Result<Decimal, AmountError> {
    let mut value = Decimal::from_str(base_units.trim())
        .map_err(|_| AmountError::Invalid(base_units.to_string()))?;
    if value.scale() != 0 {
        return Err(AmountError::Invalid(base_units.to_string()));
    }
    value
        .set_scale(decimals)
        .map_err(|_| AmountError::PrecisionTooLarge(decimals))?;
    Ok(value.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cro(balance: &str) -> UserAsset {
        UserAsset {
            identifier: "cro".to_string(),
            name: "Crypto.org Coin".to_string(),
            symbol: "CRO".to_string(),
            mainnet_symbol: "CRO".to_string(),
            asset_type: AssetType::Tendermint,
            decimals: 8,
            balance: balance.to_string(),
            address: None,
            explorer_url: None,
        }
    }

    #[test]
    fn test_scaled_balance() {
        let asset = cro("5000000000");
        assert_eq!(asset.scaled_balance().unwrap(), Decimal::from(50));
        assert_eq!(cro("1").scaled_balance().unwrap(), Decimal::from_str("0.00000001").unwrap());
        assert!(cro("12.5").scaled_balance().is_err());
    }

    #[test]
    fn test_eighteen_decimals() {
        let value = to_display_units("50000000000000000000", 18).unwrap();
        assert_eq!(value, Decimal::from(50));
    }

    #[test]
    fn test_min_transfer_amount() {
        assert_eq!(cro("0").min_transfer_amount().unwrap(), Decimal::from_str("0.00000001").unwrap());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 10 ").unwrap(), Decimal::from(10));
        assert_eq!(parse_amount("1e-3").unwrap(), Decimal::from_str("0.001").unwrap());
        assert!(parse_amount("ten").is_err());
    }

    #[test]
    fn test_to_base_units() {
        let asset = cro("0");
        assert_eq!(asset.to_base_units(Decimal::from_str("1.5").unwrap()).unwrap(), "150000000");
        assert_eq!(
            asset.to_base_units(Decimal::from_str("1.000000019").unwrap()),
            Err(AmountError::ExcessPrecision(8))
        );
        assert!(asset.fits_precision(Decimal::from_str("1.00000001000").unwrap()));
        assert!(!asset.fits_precision(Decimal::from_str("1.000000019").unwrap()));
    }
}
