//! Transaction status commands.

use crate::common::{self, GlobalOpts};
use crate::output;
use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;

/// Transaction status commands.
#[derive(clap::Subcommand, Debug)]
pub enum TxnCommand {
    /// Show a transaction's current state
    Status(HashArgs),
    /// Block until a transaction leaves the pending state
    Wait(HashArgs),
}

#[derive(Args, Debug)]
pub struct HashArgs {
    /// Transaction hash
    #[arg(long)]
    hash: String,
}

impl TxnCommand {
    pub async fn run(&self, global: &GlobalOpts) -> Result<()> {
        match self {
            TxnCommand::Status(args) => cmd_status(args, global).await,
            TxnCommand::Wait(args) => cmd_wait(args, global).await,
        }
    }
}

async fn cmd_status(args: &HashArgs, global: &GlobalOpts) -> Result<()> {
    let config = global.build_config()?;
    let client = global.build_client(&config)?;
    let hash = common::parse_hash(&args.hash)?;

    let info = client
        .transaction(&hash)
        .await
        .context("failed to get transaction")?;

    if global.json_output()? {
        let mut value = output::txn_json(&config, &hash);
        value["transaction"] = serde_json::to_value(&info)?;
        output::print_json(&value)?;
        return Ok(());
    }

    output::print_header("Transaction");
    output::print_txn(&config, "Hash", &hash);
    match info {
        None => output::print_kv("Status", "not found (pending or unknown)"),
        Some(info) if info.is_pending() => output::print_kv("Status", "pending"),
        Some(info) => {
            output::print_kv("Type", &info.typ);
            output::print_kv("Success", &info.did_succeed().to_string());
            if let Some(version) = &info.version {
                output::print_kv("Version", version);
            }
            if let Some(status) = &info.vm_status {
                output::print_kv("VM Status", status);
            }
        }
    }
    Ok(())
}

async fn cmd_wait(args: &HashArgs, global: &GlobalOpts) -> Result<()> {
    let config = global.build_config()?;
    let client = global.build_client(&config)?;
    let hash = common::parse_hash(&args.hash)?;

    client
        .wait_for_transaction(&hash)
        .await
        .context("transaction did not resolve")?;
    let succeeded = client.transaction_did_succeed(&hash).await?;

    if global.json_output()? {
        let mut value = output::txn_json(&config, &hash);
        value["success"] = json!(succeeded);
        output::print_json(&value)?;
    } else if succeeded {
        output::print_success("transaction executed");
        output::print_txn(&config, "Transaction", &hash);
    } else {
        output::print_warning("transaction executed but failed");
        output::print_txn(&config, "Transaction", &hash);
    }
    Ok(())
}
