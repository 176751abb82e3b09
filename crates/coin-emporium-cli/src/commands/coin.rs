//! Coin workflow commands.

use crate::common::GlobalOpts;
use crate::output;
use anyhow::{Context, Result};
use clap::Args;
use coin_emporium_sdk::programs::FaucetProgram;
use coin_emporium_sdk::{RegisterOutcome, Wallet};
use serde_json::json;

/// Coin workflow commands.
#[derive(clap::Subcommand, Debug)]
pub enum CoinCommand {
    /// Compile and publish a new coin, then open a faucet for it
    Create(CreateArgs),
    /// Mint coins from a faucet, registering the coin first if needed
    Mint(MintArgs),
    /// Opt in to receiving a coin
    Register(CoinTypeArgs),
    /// Send coins to a registered recipient
    Transfer(TransferArgs),
    /// List faucets an account owns
    Faucets(FaucetsArgs),
    /// Pause a faucet you own
    Pause(CoinTypeArgs),
    /// Resume a paused faucet
    Unpause(CoinTypeArgs),
    /// Publish a coin's metadata to the registry
    Metadata(MetadataArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Coin name; also its module and struct name (e.g., "FooCoin")
    #[arg(long)]
    name: String,
}

#[derive(Args, Debug)]
pub struct CoinTypeArgs {
    /// Coin type (e.g., "0x123::FooCoin::FooCoin")
    #[arg(long)]
    coin_type: String,
}

#[derive(Args, Debug)]
pub struct MintArgs {
    /// Coin type (e.g., "0x123::FooCoin::FooCoin")
    #[arg(long)]
    coin_type: String,

    /// Amount to mint, in the coin's smallest unit
    #[arg(long)]
    amount: u64,
}

#[derive(Args, Debug)]
pub struct TransferArgs {
    /// Coin type (e.g., "0x123::FooCoin::FooCoin")
    #[arg(long)]
    coin_type: String,

    /// Recipient address (e.g., "0x123abc")
    #[arg(long)]
    to: String,

    /// Amount to send, in the coin's smallest unit
    #[arg(long)]
    amount: u64,
}

#[derive(Args, Debug)]
pub struct FaucetsArgs {
    /// Owner address (defaults to the signing account)
    #[arg(long)]
    address: Option<String>,
}

#[derive(Args, Debug)]
pub struct MetadataArgs {
    /// Coin type (e.g., "0x123::FooCoin::FooCoin")
    #[arg(long)]
    coin_type: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// Ticker symbol
    #[arg(long)]
    symbol: String,

    /// Free-form description
    #[arg(long, default_value = "")]
    description: String,

    /// Logo URL
    #[arg(long, default_value = "")]
    logo_url: String,

    /// Decimal places
    #[arg(long, default_value_t = 6)]
    decimals: u8,
}

impl CoinCommand {
    pub async fn run(&self, global: &GlobalOpts) -> Result<()> {
        match self {
            CoinCommand::Create(args) => cmd_create(args, global).await,
            CoinCommand::Mint(args) => cmd_mint(args, global).await,
            CoinCommand::Register(args) => cmd_register(args, global).await,
            CoinCommand::Transfer(args) => cmd_transfer(args, global).await,
            CoinCommand::Faucets(args) => cmd_faucets(args, global).await,
            CoinCommand::Pause(args) => cmd_pause(args, global, true).await,
            CoinCommand::Unpause(args) => cmd_pause(args, global, false).await,
            CoinCommand::Metadata(args) => cmd_metadata(args, global).await,
        }
    }
}

async fn cmd_create(args: &CreateArgs, global: &GlobalOpts) -> Result<()> {
    let config = global.build_config()?;
    let emporium = global.build_emporium(&config)?;

    let created = emporium
        .create_coin(&args.name)
        .await
        .context("failed to create coin")?;

    if global.json_output()? {
        output::print_json(&json!({
            "coin_type": created.coin_type,
            "publish": output::txn_json(&config, &created.publish_hash),
            "faucet": output::txn_json(&config, &created.faucet_hash),
        }))?;
    } else {
        output::print_success(&format!("created {}", created.coin_type));
        output::print_txn(&config, "Module Published", &created.publish_hash);
        output::print_txn(&config, "Faucet Created", &created.faucet_hash);
    }
    Ok(())
}

async fn cmd_mint(args: &MintArgs, global: &GlobalOpts) -> Result<()> {
    let config = global.build_config()?;
    let emporium = global.build_emporium(&config)?;

    let outcome = emporium
        .mint(&args.coin_type, args.amount)
        .await
        .context("failed to mint")?;

    if global.json_output()? {
        output::print_json(&json!({
            "registration": outcome.registration.map(|h| output::txn_json(&config, &h)),
            "mint": output::txn_json(&config, &outcome.mint_hash),
        }))?;
    } else {
        if let Some(hash) = &outcome.registration {
            output::print_txn(&config, "Registered", hash);
        }
        output::print_success(&format!("minted {} {}", args.amount, args.coin_type));
        output::print_txn(&config, "Minted", &outcome.mint_hash);
    }
    Ok(())
}

async fn cmd_register(args: &CoinTypeArgs, global: &GlobalOpts) -> Result<()> {
    let config = global.build_config()?;
    let emporium = global.build_emporium(&config)?;

    let outcome = emporium
        .register(&args.coin_type)
        .await
        .context("failed to register")?;

    let (status, hash) = match &outcome {
        RegisterOutcome::AlreadyRegistered => ("already_registered", None),
        RegisterOutcome::Registered(hash) => ("registered", Some(hash)),
        RegisterOutcome::Failed(hash) => ("failed", Some(hash)),
    };

    if global.json_output()? {
        output::print_json(&json!({
            "status": status,
            "transaction": hash.map(|h| output::txn_json(&config, h)),
        }))?;
        return Ok(());
    }

    match outcome {
        RegisterOutcome::AlreadyRegistered => {
            output::print_success(&format!("{} is already registered", args.coin_type));
        }
        RegisterOutcome::Registered(hash) => {
            output::print_success(&format!("registered {}", args.coin_type));
            output::print_txn(&config, "Transaction", &hash);
        }
        RegisterOutcome::Failed(hash) => {
            output::print_warning("registration transaction failed on chain");
            output::print_txn(&config, "Transaction", &hash);
        }
    }
    Ok(())
}

async fn cmd_transfer(args: &TransferArgs, global: &GlobalOpts) -> Result<()> {
    let config = global.build_config()?;
    let emporium = global.build_emporium(&config)?;

    let hash = emporium
        .transfer(&args.coin_type, &args.to, args.amount)
        .await
        .context("failed to transfer")?;

    if global.json_output()? {
        output::print_json(&output::txn_json(&config, &hash))?;
    } else {
        output::print_success(&format!(
            "sent {} {} to {}",
            args.amount, args.coin_type, args.to
        ));
        output::print_txn(&config, "Transaction", &hash);
    }
    Ok(())
}

async fn cmd_faucets(args: &FaucetsArgs, global: &GlobalOpts) -> Result<()> {
    let config = global.build_config()?;
    let program = FaucetProgram::from_config(&config)?;
    let owner = global.address_or_self(args.address.as_deref())?;

    let faucets = program
        .fetch_faucets(owner)
        .await
        .context("failed to list faucets")?;

    if global.json_output()? {
        output::print_json(&json!(faucets))?;
    } else {
        output::print_header("Faucets");
        if faucets.is_empty() {
            output::print_kv("Faucets", "none");
        }
        for faucet in &faucets {
            output::print_kv("Coin", faucet.trim_start_matches('<').trim_end_matches('>'));
        }
    }
    Ok(())
}

async fn cmd_pause(args: &CoinTypeArgs, global: &GlobalOpts, pause: bool) -> Result<()> {
    let config = global.build_config()?;
    let emporium = global.build_emporium(&config)?;

    let (hash, verb) = if pause {
        (emporium.pause(&args.coin_type).await, "paused")
    } else {
        (emporium.unpause(&args.coin_type).await, "resumed")
    };
    let hash = hash.with_context(|| format!("failed to update faucet for {}", args.coin_type))?;

    if global.json_output()? {
        output::print_json(&output::txn_json(&config, &hash))?;
    } else {
        output::print_success(&format!("{verb} faucet for {}", args.coin_type));
        output::print_txn(&config, "Transaction", &hash);
    }
    Ok(())
}

async fn cmd_metadata(args: &MetadataArgs, global: &GlobalOpts) -> Result<()> {
    let config = global.build_config()?;
    let program = FaucetProgram::from_config(&config)?;
    let wallet = global.build_wallet(&config)?;

    let payload = program.register_ix(
        &args.coin_type,
        &args.name,
        &args.symbol,
        &args.description,
        &args.logo_url,
        args.decimals,
    );
    let hash = wallet
        .sign_and_submit_transaction(payload)
        .await
        .context("failed to submit metadata")?;
    program.client().wait_for_transaction(&hash).await?;
    let succeeded = program.client().transaction_did_succeed(&hash).await?;

    if global.json_output()? {
        let mut value = output::txn_json(&config, &hash);
        value["success"] = json!(succeeded);
        output::print_json(&value)?;
    } else if succeeded {
        output::print_success(&format!("published metadata for {}", args.coin_type));
        output::print_txn(&config, "Transaction", &hash);
    } else {
        output::print_warning("metadata transaction failed on chain");
        output::print_txn(&config, "Transaction", &hash);
    }
    Ok(())
}
