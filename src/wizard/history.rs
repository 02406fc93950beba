//! Record of transfers submitted through the wizard.

use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::bridge::types::BridgeTransferDirection;

/// Direction of a transfer relative to the wallet owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionDirection {
    Incoming,
    Outgoing,
    SelfTransfer,
}

impl TransactionDirection {
    /// Classify a transfer by comparing its parties with the owner's
    /// addresses on every chain.
    pub fn classify(owners: &[&str], sender: &str, recipient: &str) -> Self {
        let owns = |address: &str| owners.iter().any(|o| o.eq_ignore_ascii_case(address));
        let is_sender = owns(sender);
        let is_recipient = owns(recipient);
        match (is_sender, is_recipient) {
            (true, true) => Self::SelfTransfer,
            (true, false) => Self::Outgoing,
            _ => Self::Incoming,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Success,
    Failed,
}

/// One submitted bridge transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecord {
    pub transaction_hash: Option<String>,
    pub sender: String,
    pub recipient: String,
    pub amount: String,
    pub symbol: String,
    pub bridge_direction: BridgeTransferDirection,
    pub direction: TransactionDirection,
    pub status: TransactionStatus,
    /// Unix time in seconds.
    pub time: u64,
}

impl TransferRecord {
    /// Key unique per transfer.
    pub fn key(&self) -> String {
        format!(
            "{}_{}_{}",
            self.transaction_hash.as_deref().unwrap_or("unsent"),
            self.recipient,
            self.amount
        )
    }
}

/// Append-only list of transfers, newest last.
#[derive(Debug, Clone, Default)]
pub struct TransferHistory {
    records: Vec<TransferRecord>,
}

impl TransferHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: TransferRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[TransferRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub(crate) fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let me = "0xF39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
        let other = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8";
        assert_eq!(
            TransactionDirection::classify(&[me], &me.to_lowercase(), me),
            TransactionDirection::SelfTransfer
        );
        assert_eq!(TransactionDirection::classify(&[me], me, other), TransactionDirection::Outgoing);
        assert_eq!(TransactionDirection::classify(&[me], other, me), TransactionDirection::Incoming);
    }

    #[test]
    fn test_classify_across_chains() {
        let cro = "tcro1qqqsyqcyq5rqwzqfpg9scrgwpugpzysn7hzdtn";
        let evm = "0xF39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
        let stranger = "tcro1zg69v7ys40x77y352eufp27daufrg4ncnjqz7q";
        let owners = [cro, evm];
        assert_eq!(
            TransactionDirection::classify(&owners, cro, &evm.to_lowercase()),
            TransactionDirection::SelfTransfer
        );
        assert_eq!(
            TransactionDirection::classify(&owners, evm, cro),
            TransactionDirection::SelfTransfer
        );
        assert_eq!(
            TransactionDirection::classify(&owners, evm, stranger),
            TransactionDirection::Outgoing
        );
        assert_eq!(
            TransactionDirection::classify(&owners, stranger, cro),
            TransactionDirection::Incoming
        );
        assert_eq!(
            TransactionDirection::classify(&[], cro, evm),
            TransactionDirection::Incoming
        );
    }

    #[test]
    fn test_record_key() {
        let record = TransferRecord {
            transaction_hash: Some("ABC".to_string()),
            sender: "a".to_string(),
            recipient: "b".to_string(),
            amount: "1".to_string(),
            symbol: "TCRO".to_string(),
            bridge_direction: BridgeTransferDirection::CryptoOrgToCronos,
            direction: TransactionDirection::Outgoing,
            status: TransactionStatus::Success,
            time: 0,
        };
        assert_eq!(record.key(), "ABC_b_1");
    }
}
