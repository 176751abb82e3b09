//! Unsigned and signed transaction requests.

use crate::transaction::TransactionPayload;
use crate::types::AccountAddress;
use serde::{Deserialize, Serialize};

/// Gas budget attached to every generated transaction.
pub const DEFAULT_MAX_GAS_AMOUNT: u64 = 2000;
/// Gas price attached to every generated transaction.
pub const DEFAULT_GAS_UNIT_PRICE: u64 = 1;
/// Seconds between generation and expiration.
pub const DEFAULT_EXPIRATION_SECS: u64 = 600;

/// A transaction as the node's JSON API expects it.
///
/// Numeric fields travel as decimal strings. `signature` is absent until
/// [`RestClient::sign_transaction`](crate::api::RestClient::sign_transaction)
/// attaches one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// Sending account.
    pub sender: AccountAddress,
    /// Sender's sequence number at generation time.
    #[serde(with = "u64_string")]
    pub sequence_number: u64,
    /// Maximum gas units the transaction may consume.
    #[serde(with = "u64_string")]
    pub max_gas_amount: u64,
    /// Price per gas unit.
    #[serde(with = "u64_string")]
    pub gas_unit_price: u64,
    /// Unix time (seconds) after which the node rejects the transaction.
    #[serde(with = "u64_string")]
    pub expiration_timestamp_secs: u64,
    /// What the transaction does.
    pub payload: TransactionPayload,
    /// Sender's signature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<TransactionSignature>,
}

impl TransactionRequest {
    /// Builds an unsigned request with the default gas budget.
    pub fn new(
        sender: AccountAddress,
        sequence_number: u64,
        payload: TransactionPayload,
        expiration_timestamp_secs: u64,
    ) -> Self {
        Self {
            sender,
            sequence_number,
            max_gas_amount: DEFAULT_MAX_GAS_AMOUNT,
            gas_unit_price: DEFAULT_GAS_UNIT_PRICE,
            expiration_timestamp_secs,
            payload,
            signature: None,
        }
    }

    /// Returns true once a signature has been attached.
    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }
}

/// Signature block of a signed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionSignature {
    /// Single Ed25519 signature.
    Ed25519Signature {
        /// `0x`-prefixed public key hex.
        public_key: String,
        /// `0x`-prefixed 64-byte signature hex.
        signature: String,
    },
}

mod u64_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Str(String),
            Num(u64),
        }
        match Repr::deserialize(deserializer)? {
            Repr::Str(s) => s.parse().map_err(de::Error::custom),
            Repr::Num(n) => Ok(n),
        }
    }
}
