//! Fee and receive-amount summary shown beside the form and on Confirm.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::bridge::types::Chain;
use crate::session::asset::parse_amount;
use crate::wizard::context::WizardContext;
use crate::wizard::form::TransferForm;

const RECEIVE_DISPLAY_SCALE: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferPreview {
    pub amount: Decimal,
    pub fee: Decimal,
    pub fee_symbol: String,
    /// Amount minus fee, rounded to four decimals.
    pub will_receive: String,
    pub receive_symbol: String,
    pub destination_chain: Chain,
    pub destination_address: String,
}

/// Build the preview once chains, asset and a positive amount are known.
pub fn preview(form: &TransferForm, ctx: &WizardContext) -> Option<TransferPreview> {
    let destination_chain = form.destination_chain?;
    let asset = form.asset_id.as_deref().and_then(|id| ctx.session.find_asset(id))?;
    let amount = parse_amount(&form.amount).ok().filter(|a| *a > Decimal::ZERO)?;

    let fee = ctx.fee();
    let receive = (amount - fee).max(Decimal::ZERO).round_dp(RECEIVE_DISPLAY_SCALE);
    let receive_symbol = ctx
        .session
        .asset_for_chain(destination_chain)
        .map(|a| a.symbol.clone())
        .unwrap_or_else(|| asset.symbol.clone());

    Some(TransferPreview {
        amount,
        fee,
        fee_symbol: asset.symbol.clone(),
        will_receive: format!("{:.*}", RECEIVE_DISPLAY_SCALE as usize, receive),
        receive_symbol,
        destination_chain,
        destination_address: form.destination_address.clone(),
    })
}
