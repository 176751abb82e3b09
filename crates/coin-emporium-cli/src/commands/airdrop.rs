//! Airdrop program commands.

use crate::common::GlobalOpts;
use crate::output;
use anyhow::{Context, Result};
use clap::Args;
use coin_emporium_sdk::programs::AirdropProgram;
use coin_emporium_sdk::transaction::TransactionPayload;
use coin_emporium_sdk::{EmporiumConfig, Wallet};
use serde_json::json;

/// Airdrop program commands.
#[derive(clap::Subcommand, Debug)]
pub enum AirdropCommand {
    /// Open an airdrop for a coin
    Create(CreateArgs),
    /// Drop coins from an open airdrop
    Send(SendArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Coin type (e.g., "0x123::FooCoin::FooCoin")
    #[arg(long)]
    coin_type: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// Ticker symbol
    #[arg(long)]
    symbol: String,

    /// Decimal places
    #[arg(long, default_value_t = 6)]
    decimals: u8,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Coin type (e.g., "0x123::FooCoin::FooCoin")
    #[arg(long)]
    coin_type: String,

    /// Amount, in the coin's smallest unit
    #[arg(long)]
    amount: u64,
}

impl AirdropCommand {
    pub async fn run(&self, global: &GlobalOpts) -> Result<()> {
        let config = global.build_config()?;
        let program = AirdropProgram::from_config(&config)?;

        let (payload, done) = match self {
            AirdropCommand::Create(args) => (
                program.create_airdrop_ix(&args.name, &args.symbol, args.decimals, &args.coin_type),
                format!("opened airdrop for {}", args.coin_type),
            ),
            AirdropCommand::Send(args) => (
                program.airdrop_ix(&args.coin_type, args.amount),
                format!("dropped {} {}", args.amount, args.coin_type),
            ),
        };

        submit(global, &config, &program, payload, &done).await
    }
}

async fn submit(
    global: &GlobalOpts,
    config: &EmporiumConfig,
    program: &AirdropProgram,
    payload: TransactionPayload,
    done: &str,
) -> Result<()> {
    let wallet = global.build_wallet(config)?;

    let hash = wallet
        .sign_and_submit_transaction(payload)
        .await
        .context("failed to submit airdrop transaction")?;
    program.client().wait_for_transaction(&hash).await?;
    let succeeded = program.client().transaction_did_succeed(&hash).await?;

    if global.json_output()? {
        let mut value = output::txn_json(config, &hash);
        value["success"] = json!(succeeded);
        output::print_json(&value)?;
    } else if succeeded {
        output::print_success(done);
        output::print_txn(config, "Transaction", &hash);
    } else {
        output::print_warning("airdrop transaction failed on chain");
        output::print_txn(config, "Transaction", &hash);
    }
    Ok(())
}
