//! Framework coin calls and module publishing.
//!
//! These target `0x1::Coin` and so work for any coin, whatever program
//! created it.

use crate::transaction::{ModuleBundlePayload, ScriptFunctionPayload, TransactionPayload};
use crate::types::{AccountAddress, COIN_MODULE};

fn framework_call(function: &str, coin_type: &str, arguments: Vec<String>) -> TransactionPayload {
    ScriptFunctionPayload {
        function: format!("0x1::{COIN_MODULE}::{function}"),
        type_arguments: vec![coin_type.to_string()],
        arguments,
    }
    .into()
}

/// `0x1::Coin::register<coin_type>()`: creates the sender's coin store.
pub fn register_ix(coin_type: &str) -> TransactionPayload {
    framework_call("register", coin_type, vec![])
}

/// `0x1::Coin::transfer<coin_type>(recipient, amount)`
pub fn transfer_ix(coin_type: &str, recipient: AccountAddress, amount: u64) -> TransactionPayload {
    framework_call(
        "transfer",
        coin_type,
        vec![recipient.to_hex(), amount.to_string()],
    )
}

/// Publishes one compiled module under the sender's address.
pub fn publish_module_ix(bytecode_hex: &str) -> TransactionPayload {
    ModuleBundlePayload::single(bytecode_hex).into()
}
