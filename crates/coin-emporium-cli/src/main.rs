//! Coin Emporium CLI - create, mint, register and send custom coins on Aptos.
//!
//! This CLI wraps the Coin Emporium SDK: account funding and balances, coin
//! workflows against the Faucet program, program bootstrap, transaction
//! status, and persistent settings.

mod commands;
mod common;
mod config;
mod output;

use clap::Parser;
use commands::{
    AccountCommand, AirdropCommand, CoinCommand, ConfigCommand, ProgramCommand, TxnCommand,
};
use common::GlobalOpts;

/// Coin Emporium CLI - Create and trade custom coins from the command line.
#[derive(Parser, Debug)]
#[command(name = "coin-emporium", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Account management (create, fund, balances, lookup)
    #[command(subcommand)]
    Account(AccountCommand),

    /// Coin workflows (create, mint, register, transfer, faucets, pause, unpause, metadata)
    #[command(subcommand)]
    Coin(CoinCommand),

    /// Airdrop program payloads (create, send)
    #[command(subcommand)]
    Airdrop(AirdropCommand),

    /// Program bootstrap for module owners
    #[command(subcommand)]
    Program(ProgramCommand),

    /// Transaction status and waiting
    #[command(subcommand)]
    Txn(TxnCommand),

    /// Persistent settings (show, set, unset)
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Account(cmd) => cmd.run(&cli.global).await,
        Command::Coin(cmd) => cmd.run(&cli.global).await,
        Command::Airdrop(cmd) => cmd.run(&cli.global).await,
        Command::Program(cmd) => cmd.run(&cli.global).await,
        Command::Txn(cmd) => cmd.run(&cli.global).await,
        Command::Config(cmd) => cmd.run(&cli.global),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}
