//! Endpoint and behavior configuration.
//!
//! [`EmporiumConfig`] names the node, the faucet, the coin compiler and the
//! addresses the Faucet/Airdrop programs are published under. Use a preset
//! and the `with_*` builders, or [`EmporiumConfig::from_env`].
//!
//! ```rust
//! use coin_emporium_sdk::EmporiumConfig;
//! use coin_emporium_sdk::poll::PollPolicy;
//! use std::time::Duration;
//!
//! let config = EmporiumConfig::devnet()
//!     .with_timeout(Duration::from_secs(10))
//!     .with_poll_policy(PollPolicy::fixed(20, Duration::from_millis(500)));
//! assert!(config.faucet_url().is_some());
//! ```

use crate::error::{EmporiumError, EmporiumResult};
use crate::poll::PollPolicy;
use crate::types::AccountAddress;
use std::time::Duration;
use url::Url;

/// Environment variable holding the node URL.
pub const ENV_NODE_URL: &str = "EMPORIUM_NODE_URL";
/// Environment variable holding the faucet URL.
pub const ENV_FAUCET_URL: &str = "EMPORIUM_FAUCET_URL";
/// Environment variable holding the compiler URL.
pub const ENV_COMPILER_URL: &str = "EMPORIUM_COMPILER_URL";
/// Environment variable holding the Faucet program address.
pub const ENV_FAUCET_MODULE: &str = "EMPORIUM_FAUCET_MODULE";
/// Environment variable holding the Airdrop program address.
pub const ENV_AIRDROP_MODULE: &str = "EMPORIUM_AIRDROP_MODULE";

const DEVNET_NODE_URL: &str = "https://fullnode.devnet.aptoslabs.com";
const DEVNET_FAUCET_URL: &str = "https://faucet.devnet.aptoslabs.com";
const DEVNET_EXPLORER_URL: &str = "https://explorer.devnet.aptos.dev";
const LOCAL_NODE_URL: &str = "http://127.0.0.1:8080";
const LOCAL_FAUCET_URL: &str = "http://127.0.0.1:8081";

/// Configuration shared by every client in the crate.
#[derive(Debug, Clone)]
pub struct EmporiumConfig {
    pub(crate) node_url: Url,
    pub(crate) faucet_url: Option<Url>,
    pub(crate) compiler_url: Option<Url>,
    pub(crate) explorer_url: Option<Url>,
    pub(crate) faucet_module: Option<AccountAddress>,
    pub(crate) airdrop_module: Option<AccountAddress>,
    pub(crate) timeout: Duration,
    pub(crate) poll_policy: PollPolicy,
}

impl EmporiumConfig {
    fn with_urls(node_url: Url, faucet_url: Option<Url>, explorer_url: Option<Url>) -> Self {
        Self {
            node_url,
            faucet_url,
            compiler_url: None,
            explorer_url,
            faucet_module: None,
            airdrop_module: None,
            timeout: Duration::from_secs(30),
            poll_policy: PollPolicy::default(),
        }
    }

    /// Aptos devnet, with its faucet and explorer.
    #[allow(clippy::missing_panics_doc)]
    pub fn devnet() -> Self {
        Self::with_urls(
            Url::parse(DEVNET_NODE_URL).expect("valid URL"),
            Some(Url::parse(DEVNET_FAUCET_URL).expect("valid URL")),
            Some(Url::parse(DEVNET_EXPLORER_URL).expect("valid URL")),
        )
    }

    /// A local testnet on the default ports.
    #[allow(clippy::missing_panics_doc)]
    pub fn local() -> Self {
        Self::with_urls(
            Url::parse(LOCAL_NODE_URL).expect("valid URL"),
            Some(Url::parse(LOCAL_FAUCET_URL).expect("valid URL")),
            None,
        )
    }

    /// A custom node with no faucet, compiler or explorer.
    ///
    /// # Errors
    ///
    /// Returns an error if `node_url` does not parse.
    pub fn custom(node_url: &str) -> EmporiumResult<Self> {
        Ok(Self::with_urls(Url::parse(node_url)?, None, None))
    }

    /// Builds a configuration from `EMPORIUM_*` environment variables on top of devnet.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparsable URL or address.
    pub fn from_env() -> EmporiumResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparsable URL or address.
    pub fn from_lookup<F>(lookup: F) -> EmporiumResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(ENV_NODE_URL) {
            Some(url) => Self::custom(&url)?,
            None => Self::devnet(),
        };
        if let Some(url) = lookup(ENV_FAUCET_URL) {
            config = config.with_faucet_url(&url)?;
        }
        if let Some(url) = lookup(ENV_COMPILER_URL) {
            config = config.with_compiler_url(&url)?;
        }
        if let Some(addr) = lookup(ENV_FAUCET_MODULE) {
            config = config.with_faucet_module(parse_module(ENV_FAUCET_MODULE, &addr)?);
        }
        if let Some(addr) = lookup(ENV_AIRDROP_MODULE) {
            config = config.with_airdrop_module(parse_module(ENV_AIRDROP_MODULE, &addr)?);
        }
        Ok(config)
    }

    /// Sets the faucet URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse.
    pub fn with_faucet_url(mut self, url: &str) -> EmporiumResult<Self> {
        self.faucet_url = Some(Url::parse(url)?);
        Ok(self)
    }

    /// Sets the coin compiler URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse.
    pub fn with_compiler_url(mut self, url: &str) -> EmporiumResult<Self> {
        self.compiler_url = Some(Url::parse(url)?);
        Ok(self)
    }

    /// Sets the block explorer base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse.
    pub fn with_explorer_url(mut self, url: &str) -> EmporiumResult<Self> {
        self.explorer_url = Some(Url::parse(url)?);
        Ok(self)
    }

    /// Sets the address the Faucet program is published under.
    #[must_use]
    pub fn with_faucet_module(mut self, address: AccountAddress) -> Self {
        self.faucet_module = Some(address);
        self
    }

    /// Sets the address the Airdrop program is published under.
    #[must_use]
    pub fn with_airdrop_module(mut self, address: AccountAddress) -> Self {
        self.airdrop_module = Some(address);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the policy used while waiting for transactions.
    #[must_use]
    pub fn with_poll_policy(mut self, policy: PollPolicy) -> Self {
        self.poll_policy = policy;
        self
    }

    /// Node REST API base URL.
    pub fn node_url(&self) -> &Url {
        &self.node_url
    }

    /// Faucet base URL, if any.
    pub fn faucet_url(&self) -> Option<&Url> {
        self.faucet_url.as_ref()
    }

    /// Coin compiler URL, if any.
    pub fn compiler_url(&self) -> Option<&Url> {
        self.compiler_url.as_ref()
    }

    /// Faucet program address, if any.
    pub fn faucet_module(&self) -> Option<AccountAddress> {
        self.faucet_module
    }

    /// Airdrop program address, if any.
    pub fn airdrop_module(&self) -> Option<AccountAddress> {
        self.airdrop_module
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Transaction wait policy.
    pub fn poll_policy(&self) -> &PollPolicy {
        &self.poll_policy
    }

    /// Returns a block explorer link for a transaction, if an explorer is configured.
    pub fn explorer_link(&self, hash: &str) -> Option<String> {
        let base = self.explorer_url.as_ref()?;
        Some(format!("{}/txn/{hash}", base.as_str().trim_end_matches('/')))
    }
}

fn parse_module(var: &str, value: &str) -> EmporiumResult<AccountAddress> {
    AccountAddress::from_hex(value).map_err(|e| EmporiumError::Config(format!("{var}: {e}")))
}
