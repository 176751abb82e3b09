//! Typed response bodies of the node REST API.

use crate::types::TransactionHash;
use serde::{Deserialize, Serialize};

pub use crate::types::Resource;

/// Transaction `type` of a submitted but not yet executed transaction.
pub const PENDING_TRANSACTION_TYPE: &str = "pending_transaction";

/// `GET accounts/{address}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountData {
    /// Next sequence number, as a decimal string.
    pub sequence_number: String,
    /// Authentication key hex.
    pub authentication_key: String,
}

impl AccountData {
    /// Parses the sequence number.
    pub fn sequence_number(&self) -> Result<u64, std::num::ParseIntError> {
        self.sequence_number.parse()
    }
}

/// `POST transactions` (HTTP 202).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransaction {
    /// Hash to poll for.
    pub hash: TransactionHash,
    /// Sender echoed back by the node.
    #[serde(default)]
    pub sender: Option<String>,
    /// Sequence number echoed back by the node.
    #[serde(default)]
    pub sequence_number: Option<String>,
}

/// `POST transactions/signing_message`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningMessage {
    /// `0x`-prefixed hex of the bytes to sign.
    pub message: String,
}

/// `GET transactions/{hash}`
///
/// Only the fields this crate reads are typed; the node sends many more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInfo {
    /// `pending_transaction`, `user_transaction`, ...
    #[serde(rename = "type")]
    pub typ: String,
    /// Transaction hash.
    #[serde(default)]
    pub hash: Option<String>,
    /// Ledger version; absent while pending.
    #[serde(default)]
    pub version: Option<String>,
    /// Execution outcome; absent while pending.
    #[serde(default)]
    pub success: Option<bool>,
    /// VM status message.
    #[serde(default)]
    pub vm_status: Option<String>,
}

impl TransactionInfo {
    /// True while the node has not executed the transaction.
    pub fn is_pending(&self) -> bool {
        self.typ == PENDING_TRANSACTION_TYPE
    }

    /// True only for an executed transaction that reported success.
    pub fn did_succeed(&self) -> bool {
        self.success == Some(true)
    }
}
