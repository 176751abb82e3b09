//! Account resources and the coin balances derived from them.

use crate::error::{EmporiumError, EmporiumResult};
use crate::types::type_tag::{generic_params, StructTag};
use crate::types::AccountAddress;
use serde::{Deserialize, Serialize};

/// Module of the framework coin store.
pub const COIN_MODULE: &str = "Coin";
/// Struct name of the framework coin store.
pub const COIN_STORE: &str = "CoinStore";
/// The network's native test coin.
pub const TEST_COIN: &str = "0x1::TestCoin::TestCoin";

/// Returns the coin store resource type holding `coin_type`.
///
/// ```rust
/// use coin_emporium_sdk::types::coin_store_type;
///
/// assert_eq!(
///     coin_store_type("0x1::TestCoin::TestCoin"),
///     "0x1::Coin::CoinStore<0x1::TestCoin::TestCoin>"
/// );
/// ```
pub fn coin_store_type(coin_type: &str) -> String {
    format!("0x1::{COIN_MODULE}::{COIN_STORE}<{coin_type}>")
}

/// A typed piece of on-chain state attached to an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Fully-qualified type tag, as the node renders it.
    #[serde(rename = "type")]
    pub typ: String,
    /// Resource contents.
    pub data: serde_json::Value,
}

impl Resource {
    /// Parses the resource type. Returns `None` for tags that do not parse as a struct.
    pub fn struct_tag(&self) -> Option<StructTag> {
        StructTag::from_str_strict(&self.typ).ok()
    }

    /// If this is a `0x1::Coin::CoinStore<T>`, returns `T` as written by the node.
    pub fn coin_store_coin(&self) -> Option<&str> {
        let tag = self.struct_tag()?;
        if !tag.is(AccountAddress::ONE, COIN_MODULE, COIN_STORE) || tag.type_args.len() != 1 {
            return None;
        }
        generic_params(&self.typ)
    }

    /// Reads `data.coin.value`, which the node encodes as a decimal string.
    pub fn coin_value(&self) -> EmporiumResult<u64> {
        let value = self
            .data
            .get("coin")
            .and_then(|c| c.get("value"))
            .ok_or_else(|| {
                EmporiumError::Internal(format!("{} has no coin.value field", self.typ))
            })?;
        match value {
            serde_json::Value::String(s) => s.parse().map_err(|e| {
                EmporiumError::Internal(format!("invalid coin value {s:?} in {}: {e}", self.typ))
            }),
            serde_json::Value::Number(n) => n.as_u64().ok_or_else(|| {
                EmporiumError::Internal(format!("invalid coin value {n} in {}", self.typ))
            }),
            other => Err(EmporiumError::Internal(format!(
                "invalid coin value {other} in {}",
                self.typ
            ))),
        }
    }
}

/// Balance of one coin type held by an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinBalance {
    /// Coin type tag, e.g. `0x1::TestCoin::TestCoin`.
    pub coin: String,
    /// Amount held, in the coin's smallest unit.
    pub balance: u64,
}

impl CoinBalance {
    /// Builds a balance from a coin store resource.
    ///
    /// Returns `Ok(None)` when the resource is not a coin store.
    pub fn from_resource(resource: &Resource) -> EmporiumResult<Option<Self>> {
        let Some(coin) = resource.coin_store_coin() else {
            return Ok(None);
        };
        Ok(Some(Self {
            coin: coin.to_string(),
            balance: resource.coin_value()?,
        }))
    }
}
