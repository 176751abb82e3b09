//! Program bootstrap commands for module owners.

use crate::common::GlobalOpts;
use crate::output;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use coin_emporium_sdk::programs::{AirdropProgram, FaucetProgram};
use serde_json::json;

/// Program bootstrap commands.
#[derive(clap::Subcommand, Debug)]
pub enum ProgramCommand {
    /// Initialize a program; the signing key must own the module address
    Init(InitArgs),
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Program to initialize
    #[arg(long, value_enum)]
    program: ProgramKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProgramKind {
    Faucet,
    Airdrop,
}

impl ProgramCommand {
    pub async fn run(&self, global: &GlobalOpts) -> Result<()> {
        match self {
            ProgramCommand::Init(args) => cmd_init(args, global).await,
        }
    }
}

async fn cmd_init(args: &InitArgs, global: &GlobalOpts) -> Result<()> {
    let config = global.build_config()?;
    let admin = global.load_account()?;

    let (hash, client) = match args.program {
        ProgramKind::Faucet => {
            let program = FaucetProgram::from_config(&config)?;
            let hash = program
                .init_root(&admin)
                .await
                .context("failed to initialize Faucet program")?;
            (hash, program.client().clone())
        }
        ProgramKind::Airdrop => {
            let program = AirdropProgram::from_config(&config)?;
            let hash = program
                .init_root(&admin)
                .await
                .context("failed to initialize Airdrop program")?;
            (hash, program.client().clone())
        }
    };

    client.wait_for_transaction(&hash).await?;
    let succeeded = client.transaction_did_succeed(&hash).await?;

    if global.json_output()? {
        let mut value = output::txn_json(&config, &hash);
        value["success"] = json!(succeeded);
        output::print_json(&value)?;
    } else if succeeded {
        output::print_success(&format!("initialized {:?} program", args.program));
        output::print_txn(&config, "Transaction", &hash);
    } else {
        output::print_warning("init transaction failed on chain; was the program already initialized?");
        output::print_txn(&config, "Transaction", &hash);
    }
    Ok(())
}
