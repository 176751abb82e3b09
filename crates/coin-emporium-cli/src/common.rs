//! Shared types and helpers for the CLI.

use crate::config::CliConfig;
use anyhow::{bail, Context, Result};
use coin_emporium_sdk::config::{
    ENV_AIRDROP_MODULE, ENV_COMPILER_URL, ENV_FAUCET_MODULE, ENV_FAUCET_URL, ENV_NODE_URL,
};
use coin_emporium_sdk::{
    Account, AccountAddress, CoinEmporium, EmporiumConfig, LocalWallet, RestClient,
    TransactionHash,
};
use clap::ValueEnum;
use std::path::Path;
use std::sync::OnceLock;

/// Environment variable holding the signing key.
pub const ENV_PRIVATE_KEY: &str = "EMPORIUM_PRIVATE_KEY";

/// Global options available on every command.
#[derive(clap::Args, Debug, Default)]
pub struct GlobalOpts {
    /// Network to connect to [default: devnet]
    #[arg(long, global = true)]
    pub network: Option<NetworkArg>,

    /// Custom node URL (overrides --network)
    #[arg(long, global = true, env = ENV_NODE_URL)]
    pub node_url: Option<String>,

    /// Faucet URL used for funding
    #[arg(long, global = true, env = ENV_FAUCET_URL)]
    pub faucet_url: Option<String>,

    /// Coin compiler URL used by `coin create`
    #[arg(long, global = true, env = ENV_COMPILER_URL)]
    pub compiler_url: Option<String>,

    /// Address of the Faucet program
    #[arg(long, global = true, env = ENV_FAUCET_MODULE)]
    pub faucet_module: Option<String>,

    /// Address of the Airdrop program
    #[arg(long, global = true, env = ENV_AIRDROP_MODULE)]
    pub airdrop_module: Option<String>,

    /// Ed25519 private key (hex) of the signing account
    #[arg(long, global = true, env = ENV_PRIVATE_KEY, hide_env_values = true)]
    pub private_key: Option<String>,

    /// Output as JSON instead of human-readable text
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Settings file contents, read once per invocation.
    #[arg(skip)]
    settings: OnceLock<CliConfig>,
}

/// Supported network names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NetworkArg {
    Devnet,
    Local,
}

impl GlobalOpts {
    /// Build an `EmporiumConfig` from the flags, falling back to the settings file.
    pub fn build_config(&self) -> Result<EmporiumConfig> {
        self.build_config_with(self.settings()?)
    }

    /// The settings file, loaded on first use.
    pub fn settings(&self) -> Result<&CliConfig> {
        match self.settings.get() {
            Some(settings) => Ok(settings),
            None => self.settings_at(&CliConfig::default_path()?),
        }
    }

    /// Like [`settings`](Self::settings), reading `path` when nothing is cached yet.
    pub fn settings_at(&self, path: &Path) -> Result<&CliConfig> {
        if let Some(settings) = self.settings.get() {
            return Ok(settings);
        }
        let loaded = CliConfig::load_from(path)?;
        Ok(self.settings.get_or_init(|| loaded))
    }

    /// Flags win over `settings`; `settings` win over the network preset.
    pub fn build_config_with(&self, settings: &CliConfig) -> Result<EmporiumConfig> {
        let network = match (self.network, settings.network.as_deref()) {
            (Some(network), _) => network,
            (None, Some(name)) => NetworkArg::from_str(name, true)
                .map_err(|e| anyhow::anyhow!("invalid network in settings: {e}"))?,
            (None, None) => NetworkArg::Devnet,
        };

        let mut config = match self.node_url.as_ref().or(settings.node_url.as_ref()) {
            Some(url) => EmporiumConfig::custom(url).context("invalid node URL")?,
            None => match network {
                NetworkArg::Devnet => EmporiumConfig::devnet(),
                NetworkArg::Local => EmporiumConfig::local(),
            },
        };

        if let Some(url) = self.faucet_url.as_ref().or(settings.faucet_url.as_ref()) {
            config = config.with_faucet_url(url).context("invalid faucet URL")?;
        }
        if let Some(url) = self.compiler_url.as_ref().or(settings.compiler_url.as_ref()) {
            config = config.with_compiler_url(url).context("invalid compiler URL")?;
        }
        if let Some(addr) = self.faucet_module.as_ref().or(settings.faucet_module.as_ref()) {
            config = config.with_faucet_module(parse_address(addr)?);
        }
        if let Some(addr) = self.airdrop_module.as_ref().or(settings.airdrop_module.as_ref()) {
            config = config.with_airdrop_module(parse_address(addr)?);
        }
        tracing::debug!(node_url = %config.node_url(), ?network, "resolved configuration");
        Ok(config)
    }

    /// True when output should be JSON, by flag or by setting.
    pub fn json_output(&self) -> Result<bool> {
        if self.json {
            return Ok(true);
        }
        Ok(self.settings()?.json_output.unwrap_or(false))
    }

    /// Build a node client.
    pub fn build_client(&self, config: &EmporiumConfig) -> Result<RestClient> {
        RestClient::new(config).context("failed to create node client")
    }

    /// Load the signing account from `--private-key` / `EMPORIUM_PRIVATE_KEY`.
    pub fn load_account(&self) -> Result<Account> {
        match &self.private_key {
            Some(key) => Account::from_private_key_hex(key).context("invalid private key"),
            None => bail!(
                "No signing key. Pass --private-key <hex> or set {ENV_PRIVATE_KEY}."
            ),
        }
    }

    /// Build a connected wallet around the signing account.
    pub fn build_wallet(&self, config: &EmporiumConfig) -> Result<LocalWallet> {
        Ok(LocalWallet::connected(
            self.load_account()?,
            self.build_client(config)?,
        ))
    }

    /// Build the coin workflows for the signing account.
    pub fn build_emporium(&self, config: &EmporiumConfig) -> Result<CoinEmporium<LocalWallet>> {
        CoinEmporium::new(config, self.build_wallet(config)?)
            .context("failed to set up coin workflows (is --faucet-module set?)")
    }

    /// The given address, or the signing account's when absent.
    pub fn address_or_self(&self, address: Option<&str>) -> Result<AccountAddress> {
        match address {
            Some(s) => parse_address(s),
            None => Ok(self
                .load_account()
                .context("pass --address or a signing key")?
                .address()),
        }
    }
}

/// Parse an account address from a hex string.
pub fn parse_address(s: &str) -> Result<AccountAddress> {
    AccountAddress::from_hex(s).context("invalid account address")
}

/// Parse a transaction hash from a hex string.
pub fn parse_hash(s: &str) -> Result<TransactionHash> {
    TransactionHash::from_hex(s).context("invalid transaction hash")
}
