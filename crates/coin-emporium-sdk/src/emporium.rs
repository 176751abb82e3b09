//! End-user coin workflows.
//!
//! [`CoinEmporium`] strings the clients together the way a user drives
//! them: create a coin with its own faucet, mint from a faucet, opt in to a
//! coin, and send coins to someone who has opted in. Every submitted
//! transaction goes through the injected [`Wallet`] and is awaited through
//! [`RestClient::wait_for_transaction`] before the workflow moves on.
//!
//! Input is validated before any network call; a rejected input surfaces as
//! [`EmporiumError::Validation`].

use crate::api::{CompilerClient, RestClient};
use crate::config::EmporiumConfig;
use crate::error::{EmporiumError, EmporiumResult};
use crate::programs::{coin, FaucetProgram};
use crate::transaction::TransactionPayload;
use crate::types::{
    coin_store_type, AccountAddress, CoinBalance, StructTag, TransactionHash, ADDRESS_LENGTH,
};
use crate::wallet::Wallet;
use tracing::info;

/// Decimals every coin created through [`CoinEmporium::create_coin`] gets.
pub const COIN_DECIMALS: u8 = 6;

/// Native balances below this count as low.
pub const LOW_BALANCE_THRESHOLD: u64 = 10;

/// Returns true for an upper-camel-case ASCII name such as `FooCoin`.
///
/// Coin names double as Move module and struct names.
pub fn valid_coin_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase()) && chars.all(|c| c.is_ascii_alphabetic())
}

/// Returns true for a non-generic struct tag such as `0x123::FooCoin::FooCoin`.
pub fn valid_coin_type(coin_type: &str) -> bool {
    coin_type.starts_with("0x")
        && StructTag::from_str_strict(coin_type).is_ok_and(|tag| tag.type_args.is_empty())
}

/// Returns true for a `0x`-prefixed hex address such as `0x123abc`.
pub fn valid_address(address: &str) -> bool {
    address.strip_prefix("0x").is_some_and(|digits| {
        !digits.is_empty()
            && digits.len() <= ADDRESS_LENGTH * 2
            && digits.chars().all(|c| c.is_ascii_hexdigit())
    })
}

/// Result of [`CoinEmporium::create_coin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedCoin {
    /// Type tag of the new coin, `0x<owner>::<name>::<name>`.
    pub coin_type: String,
    /// Module publication transaction.
    pub publish_hash: TransactionHash,
    /// Faucet creation transaction.
    pub faucet_hash: TransactionHash,
}

/// Result of [`CoinEmporium::mint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintOutcome {
    /// Registration submitted first because the wallet had no coin store.
    pub registration: Option<TransactionHash>,
    /// Mint transaction.
    pub mint_hash: TransactionHash,
}

/// Result of [`CoinEmporium::register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The wallet already had a coin store; nothing was submitted.
    AlreadyRegistered,
    /// Registration executed successfully.
    Registered(TransactionHash),
    /// Registration executed but the chain reported failure.
    Failed(TransactionHash),
}

/// Coin workflows for the account behind a [`Wallet`].
#[derive(Debug)]
pub struct CoinEmporium<W> {
    wallet: W,
    client: RestClient,
    faucet: FaucetProgram,
    compiler: Option<CompilerClient>,
    config: EmporiumConfig,
}

impl<W: Wallet> CoinEmporium<W> {
    /// Builds the workflows from `config`. The compiler is optional; without
    /// it [`create_coin`](Self::create_coin) fails with a configuration error.
    ///
    /// # Errors
    ///
    /// Returns an error if the Faucet program address is not configured or a
    /// client fails to build.
    pub fn new(config: &EmporiumConfig, wallet: W) -> EmporiumResult<Self> {
        let client = RestClient::new(config)?;
        let module_address = config
            .faucet_module()
            .ok_or_else(|| EmporiumError::Config("faucet module address not configured".into()))?;
        let compiler = match config.compiler_url() {
            Some(_) => Some(CompilerClient::new(config)?),
            None => None,
        };
        Ok(Self {
            wallet,
            faucet: FaucetProgram::new(client.clone(), module_address),
            client,
            compiler,
            config: config.clone(),
        })
    }

    /// The injected wallet.
    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    /// Node client.
    pub fn client(&self) -> &RestClient {
        &self.client
    }

    /// Faucet program client.
    pub fn faucet_program(&self) -> &FaucetProgram {
        &self.faucet
    }

    /// Explorer link for `hash`, if an explorer is configured.
    pub fn explorer_link(&self, hash: &TransactionHash) -> Option<String> {
        self.config.explorer_link(&hash.to_hex())
    }

    /// Address of the connected wallet account.
    ///
    /// # Errors
    ///
    /// Returns the wallet's error when it is not connected.
    pub async fn address(&self) -> EmporiumResult<AccountAddress> {
        self.wallet.account().await
    }

    /// Compiles and publishes a coin module named `name`, then opens a faucet for it.
    ///
    /// # Errors
    ///
    /// Validation error for a bad name, configuration error without a
    /// compiler, otherwise the first failing step.
    pub async fn create_coin(&self, name: &str) -> EmporiumResult<CreatedCoin> {
        if !valid_coin_name(name) {
            return Err(EmporiumError::validation(format!(
                "invalid coin name {name:?}: must start with an uppercase letter and contain only letters"
            )));
        }
        let compiler = self
            .compiler
            .as_ref()
            .ok_or_else(|| EmporiumError::Config("compiler URL not configured".into()))?;
        let owner = self.address().await?;

        let bytecode = compiler.compile(name, owner).await?;
        let publish_hash = self.submit_and_wait(coin::publish_module_ix(&bytecode)).await?;
        info!(txn_hash = %publish_hash, name, "coin module published");

        let coin_type = format!("{}::{name}::{name}", owner.to_hex());
        let faucet_hash = self
            .submit_and_wait(
                self.faucet
                    .create_faucet_ix(name, name, COIN_DECIMALS, &coin_type),
            )
            .await?;
        info!(txn_hash = %faucet_hash, %coin_type, "coin faucet created");

        Ok(CreatedCoin {
            coin_type,
            publish_hash,
            faucet_hash,
        })
    }

    /// Mints `amount` from the faucet of `coin_type`, registering the coin first if needed.
    ///
    /// # Errors
    ///
    /// Validation error for a bad type or a zero amount, otherwise the first
    /// failing step.
    pub async fn mint(&self, coin_type: &str, amount: u64) -> EmporiumResult<MintOutcome> {
        check_coin_type(coin_type)?;
        check_amount(amount)?;
        let owner = self.address().await?;

        let registration = if self.has_coin_store(owner, coin_type).await? {
            None
        } else {
            let hash = self.submit_and_wait(coin::register_ix(coin_type)).await?;
            info!(txn_hash = %hash, coin_type, "coin registered");
            Some(hash)
        };

        let mint_hash = self
            .submit_and_wait(self.faucet.mint_ix(coin_type, amount))
            .await?;
        info!(txn_hash = %mint_hash, coin_type, amount, "coins minted");
        Ok(MintOutcome {
            registration,
            mint_hash,
        })
    }

    /// Opts the wallet in to receiving `coin_type`.
    ///
    /// # Errors
    ///
    /// Validation error for a bad type, otherwise any query or submission error.
    pub async fn register(&self, coin_type: &str) -> EmporiumResult<RegisterOutcome> {
        check_coin_type(coin_type)?;
        let owner = self.address().await?;
        if self.has_coin_store(owner, coin_type).await? {
            return Ok(RegisterOutcome::AlreadyRegistered);
        }

        let hash = self.submit_and_wait(coin::register_ix(coin_type)).await?;
        if self.client.transaction_did_succeed(&hash).await? {
            Ok(RegisterOutcome::Registered(hash))
        } else {
            Ok(RegisterOutcome::Failed(hash))
        }
    }

    /// Sends `amount` of `coin_type` to `recipient`.
    ///
    /// The recipient must already hold a coin store for the type and the
    /// amount may not exceed the wallet's balance.
    ///
    /// # Errors
    ///
    /// Validation error for bad input, a short balance or an unregistered
    /// recipient, otherwise any query or submission error.
    pub async fn transfer(
        &self,
        coin_type: &str,
        recipient: &str,
        amount: u64,
    ) -> EmporiumResult<TransactionHash> {
        check_coin_type(coin_type)?;
        check_amount(amount)?;
        if !valid_address(recipient) {
            return Err(EmporiumError::validation(format!(
                "receiver address {recipient:?} is invalid, expected the format 0x123abc"
            )));
        }
        let recipient = AccountAddress::from_hex(recipient)?;
        let owner = self.address().await?;

        let balance = self.client.coin_balance(owner, coin_type).await?;
        if amount > balance {
            return Err(EmporiumError::validation(format!(
                "insufficient funds: balance {balance}, requested {amount}"
            )));
        }
        if !self.has_coin_store(recipient, coin_type).await? {
            return Err(EmporiumError::validation(format!(
                "{recipient} has not registered {coin_type}"
            )));
        }

        let hash = self
            .submit_and_wait(coin::transfer_ix(coin_type, recipient, amount))
            .await?;
        info!(txn_hash = %hash, coin_type, %recipient, amount, "coins transferred");
        Ok(hash)
    }

    /// Pauses the faucet of a coin the wallet owns.
    ///
    /// # Errors
    ///
    /// Validation error for a bad type, otherwise any submission error.
    pub async fn pause(&self, coin_type: &str) -> EmporiumResult<TransactionHash> {
        check_coin_type(coin_type)?;
        self.submit_and_wait(self.faucet.pause_ix(coin_type)).await
    }

    /// Resumes a paused faucet.
    ///
    /// # Errors
    ///
    /// Validation error for a bad type, otherwise any submission error.
    pub async fn unpause(&self, coin_type: &str) -> EmporiumResult<TransactionHash> {
        check_coin_type(coin_type)?;
        self.submit_and_wait(self.faucet.unpause_ix(coin_type)).await
    }

    /// Every coin the wallet holds.
    ///
    /// # Errors
    ///
    /// Returns any query error.
    pub async fn balances(&self) -> EmporiumResult<Vec<CoinBalance>> {
        let owner = self.address().await?;
        self.client.all_coin_balances(owner).await
    }

    /// Faucets the wallet owns, as generic suffixes like `<0xabc::FooCoin::FooCoin>`.
    ///
    /// # Errors
    ///
    /// Returns any query error.
    pub async fn faucets(&self) -> EmporiumResult<Vec<String>> {
        let owner = self.address().await?;
        self.faucet.fetch_faucets(owner).await
    }

    /// True when the wallet holds no native coin store or fewer than
    /// [`LOW_BALANCE_THRESHOLD`] native coins, i.e. may not afford gas.
    ///
    /// # Errors
    ///
    /// Returns any query error.
    pub async fn has_low_balance(&self) -> EmporiumResult<bool> {
        let owner = self.address().await?;
        Ok(self
            .client
            .account_balance(owner)
            .await?
            .map_or(true, |balance| balance < LOW_BALANCE_THRESHOLD))
    }

    async fn has_coin_store(&self, address: AccountAddress, coin_type: &str) -> EmporiumResult<bool> {
        Ok(self
            .client
            .account_resource(address, &coin_store_type(coin_type))
            .await?
            .is_some())
    }

    async fn submit_and_wait(&self, payload: TransactionPayload) -> EmporiumResult<TransactionHash> {
        let hash = self.wallet.sign_and_submit_transaction(payload).await?;
        self.client.wait_for_transaction(&hash).await?;
        Ok(hash)
    }
}

fn check_coin_type(coin_type: &str) -> EmporiumResult<()> {
    if valid_coin_type(coin_type) {
        Ok(())
    } else {
        Err(EmporiumError::validation(format!(
            "coin type {coin_type:?} is invalid, expected the format 0x123::FooCoin::FooCoin"
        )))
    }
}

fn check_amount(amount: u64) -> EmporiumResult<()> {
    if amount == 0 {
        Err(EmporiumError::validation("amount must be greater than zero"))
    } else {
        Ok(())
    }
}
