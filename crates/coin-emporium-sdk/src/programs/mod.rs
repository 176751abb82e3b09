//! Payload builders for the on-chain programs the emporium drives.
//!
//! - [`FaucetProgram`] - coin faucets (`Faucet`) and the coin registry (`Registry`)
//! - [`AirdropProgram`] - airdrops (`Airdrop`)
//! - [`coin`] - framework coin calls and module publishing
//!
//! Builders are pure: they format arguments into a [`TransactionPayload`]
//! and perform no validation. Malformed input surfaces as a chain-side
//! failure once the payload is submitted.
//!
//! [`TransactionPayload`]: crate::transaction::TransactionPayload

mod airdrop;
pub mod coin;
mod faucet;

pub use airdrop::{AirdropProgram, AIRDROP_MODULE};
pub use faucet::{FaucetProgram, FAUCET_META, FAUCET_MODULE, REGISTRY_MODULE};

use crate::account::Account;
use crate::api::RestClient;
use crate::error::{EmporiumError, EmporiumResult};
use crate::transaction::ScriptFunctionPayload;
use crate::types::{AccountAddress, TransactionHash};

/// Encodes a string as the lowercase hex of its UTF-8 bytes, without a prefix.
///
/// Move entry functions take strings as `vector<u8>`, which the node's JSON
/// API reads from hex.
///
/// ```rust
/// use coin_emporium_sdk::programs::string_to_hex;
///
/// assert_eq!(string_to_hex("FooCoin"), "466f6f436f696e");
/// ```
pub fn string_to_hex(text: &str) -> String {
    hex::encode(text.as_bytes())
}

/// Runs `<module_address>::<module>::init` from the module owner.
async fn init_program(
    client: &RestClient,
    module_address: AccountAddress,
    module: &str,
    admin: &Account,
) -> EmporiumResult<TransactionHash> {
    if admin.address() != module_address {
        return Err(EmporiumError::NotModuleOwner {
            module: format!("{}::{module}", module_address.to_hex()),
            caller: admin.address().to_hex(),
        });
    }
    let payload = ScriptFunctionPayload::new(admin.address(), module, "init", vec![], vec![]);
    client
        .execute_transaction_with_payload(admin, payload.into())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_to_hex() {
        assert_eq!(string_to_hex(""), "");
        assert_eq!(string_to_hex("A"), "41");
        assert_eq!(string_to_hex("Foo Coin\n"), "466f6f20436f696e0a");
        assert_eq!(string_to_hex("ü"), "c3bc");
    }

    #[test]
    fn test_string_to_hex_decodes_back_to_utf8() {
        for text in ["", "FooCoin", "https://example.com/logo.png", "émoji ✓"] {
            let decoded = hex::decode(string_to_hex(text)).unwrap();
            assert_eq!(decoded, text.as_bytes());
        }
    }
}
