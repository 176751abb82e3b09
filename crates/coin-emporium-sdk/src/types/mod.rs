//! Core on-chain types.

mod address;
mod hash;
mod resource;
mod type_tag;

pub use address::{AccountAddress, ADDRESS_LENGTH};
pub use hash::{TransactionHash, HASH_LENGTH};
pub use resource::{coin_store_type, CoinBalance, Resource, COIN_MODULE, COIN_STORE, TEST_COIN};
pub use type_tag::{generic_params, generic_suffix, Identifier, StructTag, TypeTag};
