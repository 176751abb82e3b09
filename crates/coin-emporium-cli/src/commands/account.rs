//! Account management commands.

use crate::common::GlobalOpts;
use crate::output;
use anyhow::{Context, Result};
use clap::Args;
use coin_emporium_sdk::api::FaucetClient;
use coin_emporium_sdk::emporium::LOW_BALANCE_THRESHOLD;
use coin_emporium_sdk::{Account, CoinEmporium, EmporiumError};
use serde_json::json;

/// Account management commands.
#[derive(clap::Subcommand, Debug)]
pub enum AccountCommand {
    /// Generate a new account, optionally funding it from the faucet
    Create(CreateArgs),
    /// Fund an account from the faucet
    Fund(FundArgs),
    /// List every coin an account holds
    Balances(AddressArgs),
    /// Look up an account's sequence number and authentication key
    Lookup(AddressArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Fund the new account with this many native coins
    #[arg(long)]
    fund: Option<u64>,
}

#[derive(Args, Debug)]
pub struct FundArgs {
    /// Account to fund (defaults to the signing account)
    #[arg(long)]
    address: Option<String>,

    /// Amount of native coins to mint
    #[arg(long, default_value_t = 5_000)]
    amount: u64,
}

#[derive(Args, Debug)]
pub struct AddressArgs {
    /// Account address (defaults to the signing account)
    #[arg(long)]
    address: Option<String>,
}

impl AccountCommand {
    pub async fn run(&self, global: &GlobalOpts) -> Result<()> {
        match self {
            AccountCommand::Create(args) => cmd_create(args, global).await,
            AccountCommand::Fund(args) => cmd_fund(args, global).await,
            AccountCommand::Balances(args) => cmd_balances(args, global).await,
            AccountCommand::Lookup(args) => cmd_lookup(args, global).await,
        }
    }
}

async fn cmd_create(args: &CreateArgs, global: &GlobalOpts) -> Result<()> {
    let account = Account::generate();

    let funded = match args.fund {
        Some(amount) => {
            let config = global.build_config()?;
            let faucet = FaucetClient::new(&config).context("faucet unavailable")?;
            faucet
                .fund_account(account.address(), amount)
                .await
                .context("failed to fund account")?;
            Some(amount)
        }
        None => None,
    };

    if global.json_output()? {
        output::print_json(&json!({
            "address": account.address().to_hex(),
            "public_key": account.public_key().to_hex(),
            "private_key": account.private_key().to_hex(),
            "funded": funded,
        }))?;
    } else {
        output::print_header("New Account");
        output::print_kv("Address", &account.address().to_hex());
        output::print_kv("Public Key", &account.public_key().to_hex());
        output::print_kv("Private Key", &account.private_key().to_hex());
        if let Some(amount) = funded {
            output::print_kv("Funded", &amount.to_string());
        }
        output::print_warning("Store the private key securely; it is not saved anywhere.");
    }
    Ok(())
}

async fn cmd_fund(args: &FundArgs, global: &GlobalOpts) -> Result<()> {
    let config = global.build_config()?;
    let address = global.address_or_self(args.address.as_deref())?;
    let faucet = FaucetClient::new(&config).context("faucet unavailable")?;

    let hashes = faucet
        .fund_account(address, args.amount)
        .await
        .context("failed to fund account")?;

    if global.json_output()? {
        output::print_json(&json!({
            "address": address.to_hex(),
            "amount": args.amount,
            "transactions": hashes.iter().map(|h| h.to_hex()).collect::<Vec<_>>(),
        }))?;
    } else {
        output::print_success(&format!("funded {address} with {}", args.amount));
        for hash in &hashes {
            output::print_txn(&config, "Transaction", hash);
        }
    }
    Ok(())
}

async fn cmd_balances(args: &AddressArgs, global: &GlobalOpts) -> Result<()> {
    let config = global.build_config()?;
    let address = global.address_or_self(args.address.as_deref())?;
    let client = global.build_client(&config)?;

    let balances = client
        .all_coin_balances(address)
        .await
        .context("failed to get balances")?;

    if global.json_output()? {
        output::print_json(&serde_json::to_value(&balances)?)?;
        return Ok(());
    }

    output::print_header("Balances");
    output::print_kv("Address", &address.to_hex());
    if balances.is_empty() {
        output::print_kv("Coins", "none");
    }
    for balance in &balances {
        output::print_kv(&balance.coin, &balance.balance.to_string());
    }

    // The low-balance check only matters for the account that pays gas.
    if args.address.is_none() && config.faucet_module().is_some() {
        let emporium = CoinEmporium::new(&config, global.build_wallet(&config)?)?;
        if emporium.has_low_balance().await? {
            output::print_warning(&format!(
                "fewer than {LOW_BALANCE_THRESHOLD} native coins; transactions may fail for lack of gas. Try `account fund`."
            ));
        }
    }
    Ok(())
}

async fn cmd_lookup(args: &AddressArgs, global: &GlobalOpts) -> Result<()> {
    let config = global.build_config()?;
    let address = global.address_or_self(args.address.as_deref())?;
    let client = global.build_client(&config)?;

    let account = match client.account(address).await {
        Ok(account) => account,
        Err(e @ EmporiumError::AccountNotFound(_)) => {
            return Err(e).context("account does not exist yet; fund it first");
        }
        Err(e) => return Err(e).context("failed to get account"),
    };
    let native = client.account_balance(address).await?;

    if global.json_output()? {
        output::print_json(&json!({
            "address": address.to_hex(),
            "sequence_number": account.sequence_number,
            "authentication_key": account.authentication_key,
            "native_balance": native,
        }))?;
    } else {
        output::print_header("Account");
        output::print_kv("Address", &address.to_hex());
        output::print_kv("Sequence Number", &account.sequence_number);
        output::print_kv("Authentication Key", &account.authentication_key);
        output::print_kv(
            "Native Balance",
            &native.map_or_else(|| "not registered".to_string(), |b| b.to_string()),
        );
    }
    Ok(())
}
