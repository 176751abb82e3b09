//! HTTP clients for the services the emporium talks to.
//!
//! - [`RestClient`] - full-node REST API: accounts, resources, transactions
//! - [`FaucetClient`] - funds accounts on devnet/local networks (feature-gated)
//! - [`CompilerClient`] - compiles coin modules remotely

mod compiler;
pub mod response;
mod rest;

#[cfg(feature = "faucet")]
mod faucet;

pub use compiler::CompilerClient;
pub use response::{AccountData, PendingTransaction, SigningMessage, TransactionInfo};
pub use rest::RestClient;

#[cfg(feature = "faucet")]
pub use faucet::FaucetClient;
