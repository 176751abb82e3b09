//! CLI command implementations.

pub mod account;
pub mod airdrop;
pub mod coin;
pub mod config;
pub mod program;
pub mod txn;

pub use account::AccountCommand;
pub use airdrop::AirdropCommand;
pub use coin::CoinCommand;
pub use config::ConfigCommand;
pub use program::ProgramCommand;
pub use txn::TxnCommand;
