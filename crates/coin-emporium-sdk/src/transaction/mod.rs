//! Transaction requests and payloads.

mod payload;
mod request;

pub use payload::{ModuleBundlePayload, ModuleBytecode, ScriptFunctionPayload, TransactionPayload};
pub use request::{
    TransactionRequest, TransactionSignature, DEFAULT_EXPIRATION_SECS, DEFAULT_GAS_UNIT_PRICE,
    DEFAULT_MAX_GAS_AMOUNT,
};
