//! Faucet client for funding accounts on devnet and local testnets.

use crate::account::Account;
use crate::api::RestClient;
use crate::config::EmporiumConfig;
use crate::error::{EmporiumError, EmporiumResult};
use crate::types::{AccountAddress, TransactionHash};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

/// Client for the faucet service.
///
/// Each funding request mints native coins and, if needed, creates the
/// account. [`fund_account`](Self::fund_account) also waits for every
/// minting transaction through the node.
///
/// ```rust,no_run
/// use coin_emporium_sdk::api::FaucetClient;
/// use coin_emporium_sdk::{Account, EmporiumConfig};
///
/// # async fn run() -> Result<(), coin_emporium_sdk::EmporiumError> {
/// let faucet = FaucetClient::new(&EmporiumConfig::devnet())?;
/// let account = Account::generate();
/// faucet.fund_account(account.address(), 5_000).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FaucetClient {
    faucet_url: Url,
    client: Client,
    rest: RestClient,
}

/// Faucet response body.
///
/// Older faucets answer with a bare array of hashes, newer ones wrap it in
/// an object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum FaucetResponse {
    Direct(Vec<String>),
    Object { txn_hashes: Vec<String> },
}

impl FaucetResponse {
    fn into_hashes(self) -> Vec<String> {
        match self {
            FaucetResponse::Direct(hashes) => hashes,
            FaucetResponse::Object { txn_hashes } => txn_hashes,
        }
    }
}

impl FaucetClient {
    /// Creates a faucet client plus the node client used to await funding.
    ///
    /// # Errors
    ///
    /// Returns an error if no faucet URL is configured or the HTTP client fails to build.
    pub fn new(config: &EmporiumConfig) -> EmporiumResult<Self> {
        let faucet_url = config
            .faucet_url()
            .cloned()
            .ok_or_else(|| EmporiumError::Config("faucet URL not configured".into()))?;
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(EmporiumError::Http)?;
        Ok(Self {
            faucet_url,
            client,
            rest: RestClient::new(config)?,
        })
    }

    /// Requests funding and returns the minting transaction hashes without waiting.
    ///
    /// # Errors
    ///
    /// Returns an error on any status other than 200 or a malformed hash.
    pub async fn fund(
        &self,
        address: AccountAddress,
        amount: u64,
    ) -> EmporiumResult<Vec<TransactionHash>> {
        let url = self.build_url(&format!("mint?amount={amount}&address={address}"))?;
        debug!(%url, "POST");
        let response = self.client.post(url).send().await?;

        if response.status() != StatusCode::OK {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(EmporiumError::remote(status, body));
        }

        let body: FaucetResponse = response.json().await?;
        body.into_hashes()
            .iter()
            .map(TransactionHash::from_hex)
            .collect()
    }

    /// Funds `address` and waits for every minting transaction, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if funding fails or any transaction stays pending
    /// past the poll policy.
    pub async fn fund_account(
        &self,
        address: AccountAddress,
        amount: u64,
    ) -> EmporiumResult<Vec<TransactionHash>> {
        let hashes = self.fund(address, amount).await?;
        for hash in &hashes {
            self.rest.wait_for_transaction(hash).await?;
        }
        info!(%address, amount, transactions = hashes.len(), "account funded");
        Ok(hashes)
    }

    /// Generates a fresh account and funds it.
    ///
    /// # Errors
    ///
    /// See [`fund_account`](Self::fund_account).
    pub async fn create_and_fund(&self, amount: u64) -> EmporiumResult<Account> {
        let account = Account::generate();
        self.fund_account(account.address(), amount).await?;
        Ok(account)
    }

    fn build_url(&self, path: &str) -> EmporiumResult<Url> {
        let base = self.faucet_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/{path}")).map_err(EmporiumError::Url)
    }
}
