//! Transaction hash type.

use crate::error::{EmporiumError, EmporiumResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The length of a transaction hash in bytes.
pub const HASH_LENGTH: usize = 32;

/// A 32-byte transaction hash as reported by the node and the faucet.
///
/// ```rust
/// use coin_emporium_sdk::TransactionHash;
///
/// let hex = "0x0000000000000000000000000000000000000000000000000000000000000001";
/// let hash: TransactionHash = hex.parse().unwrap();
/// assert_eq!(hash.to_string(), hex);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransactionHash([u8; HASH_LENGTH]);

impl TransactionHash {
    /// Creates a hash from a byte array.
    pub const fn new(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parses a hash from exactly 64 hex characters, with or without `0x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the length is wrong or the string is not hex.
    pub fn from_hex<T: AsRef<str>>(hex_str: T) -> EmporiumResult<Self> {
        let hex_str = hex_str.as_ref();
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);

        if hex_str.len() != HASH_LENGTH * 2 {
            return Err(EmporiumError::Internal(format!(
                "invalid transaction hash length: expected {} hex characters, got {}",
                HASH_LENGTH * 2,
                hex_str.len()
            )));
        }

        let mut hash = [0u8; HASH_LENGTH];
        hex::decode_to_slice(hex_str, &mut hash)?;
        Ok(Self(hash))
    }

    /// Returns the hash as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the hash as a hex string with `0x` prefix.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for TransactionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransactionHash({})", self.to_hex())
    }
}

impl fmt::Display for TransactionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for TransactionHash {
    type Err = EmporiumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for TransactionHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for TransactionHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
