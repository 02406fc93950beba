//! Transfer form values and the validation gate in front of Confirm.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::bridge::types::{BridgeTransferDirection, Chain};
use crate::session::address::is_valid_address;
use crate::session::asset::parse_amount;
use crate::wizard::context::WizardContext;

/// Input fields that can carry an inline error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    SourceChain,
    DestinationChain,
    Asset,
    Amount,
    DestinationAddress,
    Password,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SourceChain => "sourceChain",
            Self::DestinationChain => "destinationChain",
            Self::Asset => "asset",
            Self::Amount => "amount",
            Self::DestinationAddress => "destinationAddress",
            Self::Password => "password",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First error per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error unless the field already has one.
    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn remove(&mut self, field: FormField) {
        self.0.remove(&field);
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
        }
        Ok(())
    }
}

/// Values of the configure step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferForm {
    pub source_chain: Option<Chain>,
    pub destination_chain: Option<Chain>,
    pub asset_id: Option<String>,
    /// Amount exactly as typed.
    pub amount: String,
    pub source_address: String,
    pub destination_address: String,
}

/// Result of checking a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValidation {
    pub errors: FieldErrors,
    /// Resolved direction; `NotSupport` unless the pair is valid and enabled.
    pub direction: BridgeTransferDirection,
}

impl FormValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check every field of the form, stopping at the first failure per field.
pub fn validate_form(form: &TransferForm, ctx: &WizardContext) -> FormValidation {
    let mut errors = FieldErrors::new();
    let mut direction = BridgeTransferDirection::NotSupport;

    if form.source_chain.is_none() {
        errors.insert(FormField::SourceChain, "Source chain is required");
    }

    match (form.source_chain, form.destination_chain) {
        (_, None) => errors.insert(FormField::DestinationChain, "Destination chain is required"),
        (Some(source), Some(destination)) if source == destination => {
            errors.insert(FormField::DestinationChain, "Source and destination chains must be different")
        }
        (Some(source), Some(destination)) => {
            let resolved = BridgeTransferDirection::from_pair(source, destination);
            if ctx.is_supported(resolved) {
                direction = resolved;
            } else {
                errors.insert(
                    FormField::DestinationChain,
                    format!("Bridge transfer from {} to {} is not supported", source.label(), destination.label()),
                );
            }
        }
        (None, Some(_)) => {}
    }

    let asset = form.asset_id.as_deref().and_then(|id| ctx.session.find_asset(id));
    match (&form.asset_id, asset) {
        (None, _) => errors.insert(FormField::Asset, "Asset is required"),
        (Some(id), None) => errors.insert(FormField::Asset, format!("Unknown asset {}", id)),
        (Some(_), Some(asset)) if !ctx.is_bridge_asset(asset) => {
            errors.insert(FormField::Asset, format!("{} cannot be bridged", asset.symbol))
        }
        _ => {}
    }

    if let Some(message) = check_amount(&form.amount, asset.filter(|a| ctx.is_bridge_asset(a))) {
        errors.insert(FormField::Amount, message);
    }

    if direction.is_supported() {
        if let Some(destination) = form.destination_chain {
            if form.destination_address.is_empty() {
                errors.insert(FormField::DestinationAddress, "Destination address is required");
            } else if !is_valid_address(destination, &form.destination_address, ctx.network()) {
                errors.insert(
                    FormField::DestinationAddress,
                    format!("Invalid {} address", destination.label()),
                );
            }
        }
    }

    FormValidation { errors, direction }
}

/// Amount rules in order: required, not zero, positive number, within
/// balance, above the smallest denomination, whole base units.
fn check_amount(input: &str, asset: Option<&crate::session::UserAsset>) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Some("Amount is required".to_string());
    }
    if trimmed.chars().all(|c| c == '0') {
        return Some("Amount cannot be 0".to_string());
    }
    let amount = match parse_amount(trimmed) {
        Ok(amount) if amount > Decimal::ZERO => amount,
        _ => return Some("Amount must be a positive number".to_string()),
    };

    let asset = asset?;
    let balance = match asset.scaled_balance() {
        Ok(balance) => balance,
        Err(_) => return Some(format!("Balance of {} is unavailable", asset.symbol)),
    };
    if amount > balance {
        return Some(format!(
            "Amount exceeds available balance of {} {}",
            balance.normalize(),
            asset.symbol
        ));
    }
    match asset.min_transfer_amount() {
        Ok(min) if amount < min => return Some(format!("Minimum amount is {} {}", min, asset.symbol)),
        Ok(_) => {}
        Err(e) => return Some(e.to_string()),
    }
    if !asset.fits_precision(amount) {
        return Some(format!("Amount has more than {} decimals", asset.decimals));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::BridgeSettings;
    use crate::session::fixtures::{session, EVM_ADDRESS, WALLET_ADDRESS};
    use crate::session::WalletType;

    fn ctx() -> WizardContext {
        WizardContext::new(session(WalletType::Normal), BridgeSettings::default())
    }

    fn valid_form() -> TransferForm {
        TransferForm {
            source_chain: Some(Chain::CryptoOrg),
            destination_chain: Some(Chain::Cronos),
            asset_id: Some("tcro".to_string()),
            amount: "10".to_string(),
            source_address: WALLET_ADDRESS.to_string(),
            destination_address: EVM_ADDRESS.to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let validation = validate_form(&valid_form(), &ctx());
        assert!(validation.is_valid(), "{}", validation.errors);
        assert_eq!(validation.direction, BridgeTransferDirection::CryptoOrgToCronos);
    }

    #[test]
    fn test_same_chain() {
        let mut form = valid_form();
        form.destination_chain = Some(Chain::CryptoOrg);
        let validation = validate_form(&form, &ctx());
        assert_eq!(
            validation.errors.get(FormField::DestinationChain),
            Some("Source and destination chains must be different")
        );
        assert_eq!(validation.direction, BridgeTransferDirection::NotSupport);
    }

    #[test]
    fn test_disabled_direction_is_unsupported() {
        let settings = BridgeSettings {
            supported_directions: vec![BridgeTransferDirection::CronosToCryptoOrg],
            ..BridgeSettings::default()
        };
        let ctx = WizardContext::new(session(WalletType::Normal), settings);
        let validation = validate_form(&valid_form(), &ctx);
        assert_eq!(validation.direction, BridgeTransferDirection::NotSupport);
        assert!(validation.errors.get(FormField::DestinationChain).unwrap().contains("not supported"));
    }

    #[test]
    fn test_amount_rules_in_order() {
        let cases = [
            ("", "Amount is required"),
            ("000", "Amount cannot be 0"),
            ("0.0", "Amount must be a positive number"),
            ("-5", "Amount must be a positive number"),
            ("abc", "Amount must be a positive number"),
            ("50.001", "Amount exceeds available balance of 50 TCRO"),
            ("0.0001", "Minimum amount is 0.001 TCRO"),
            ("1.0001", "Amount has more than 3 decimals"),
            ("1.000000019", "Amount has more than 3 decimals"),
        ];
        for (amount, expected) in cases {
            let mut form = valid_form();
            form.amount = amount.to_string();
            let validation = validate_form(&form, &ctx());
            assert_eq!(validation.errors.get(FormField::Amount), Some(expected), "amount {:?}", amount);
        }
    }

    #[test]
    fn test_boundaries_accepted() {
        for amount in ["50", "0.001", "1e1", "1.5000"] {
            let mut form = valid_form();
            form.amount = amount.to_string();
            assert!(validate_form(&form, &ctx()).is_valid(), "amount {}", amount);
        }
    }

    #[test]
    fn test_asset_must_be_bridgeable() {
        let mut form = valid_form();
        form.asset_id = Some("usdc".to_string());
        let validation = validate_form(&form, &ctx());
        assert_eq!(validation.errors.get(FormField::Asset), Some("USDC cannot be bridged"));
    }

    #[test]
    fn test_destination_address_format() {
        let mut form = valid_form();
        form.destination_address = WALLET_ADDRESS.to_string();
        let validation = validate_form(&form, &ctx());
        assert_eq!(
            validation.errors.get(FormField::DestinationAddress),
            Some("Invalid Cronos Chain address")
        );
    }

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.insert(FormField::Amount, "first");
        errors.insert(FormField::Amount, "second");
        errors.insert(FormField::Asset, "asset");
        assert_eq!(errors.get(FormField::Amount), Some("first"));
        assert_eq!(errors.to_string(), "asset: asset; amount: first");
    }
}
