//! # Coin Emporium SDK
//!
//! Client library for creating, minting, registering and transferring custom
//! coins on Aptos through the Faucet and Airdrop Move programs.
//!
//! The SDK wraps the node REST API (account and resource queries, building,
//! signing and submitting transactions, waiting for them), builds payloads
//! for the programs' entry functions, and strings both together into the
//! user workflows of [`CoinEmporium`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coin_emporium_sdk::api::FaucetClient;
//! use coin_emporium_sdk::{Account, CoinEmporium, EmporiumConfig, LocalWallet, RestClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = EmporiumConfig::from_env()?;
//!     let account = FaucetClient::new(&config)?.create_and_fund(5_000).await?;
//!
//!     let wallet = LocalWallet::connected(account, RestClient::new(&config)?);
//!     let emporium = CoinEmporium::new(&config, wallet)?;
//!     let coin = emporium.create_coin("FooCoin").await?;
//!     emporium.mint(&coin.coin_type, 1_000).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `faucet` | Yes | Funding client for devnet and local networks |
//!
//! ## Modules
//!
//! - [`account`] - Local Ed25519 accounts
//! - [`api`] - Node, faucet and compiler clients
//! - [`programs`] - Faucet, Registry, Airdrop and framework coin payloads
//! - [`transaction`] - Transaction requests and payloads
//! - [`wallet`] - Signing capability injected into the workflows
//! - [`poll`] - Bounded waiting for transactions

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod account;
pub mod api;
pub mod config;
pub mod crypto;
pub mod emporium;
pub mod error;
pub mod poll;
pub mod programs;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use account::Account;
pub use api::RestClient;
pub use config::EmporiumConfig;
pub use emporium::{CoinEmporium, CreatedCoin, MintOutcome, RegisterOutcome};
pub use error::{EmporiumError, EmporiumResult};
pub use wallet::{LocalWallet, Wallet};

pub use types::{AccountAddress, CoinBalance, TransactionHash};
