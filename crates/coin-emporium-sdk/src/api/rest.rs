//! Full-node REST API client.

use crate::account::Account;
use crate::api::response::{
    AccountData, PendingTransaction, Resource, SigningMessage, TransactionInfo,
};
use crate::config::EmporiumConfig;
use crate::error::{EmporiumError, EmporiumResult};
use crate::poll::PollPolicy;
use crate::transaction::{
    TransactionPayload, TransactionRequest, TransactionSignature, DEFAULT_EXPIRATION_SECS,
};
use crate::types::{coin_store_type, AccountAddress, CoinBalance, TransactionHash, TEST_COIN};
use reqwest::header::ACCEPT;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};
use url::Url;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Client for the Aptos full-node REST API.
///
/// Every call goes to the network; nothing is cached. Clones share the
/// underlying connection pool.
///
/// ```rust,no_run
/// use coin_emporium_sdk::{Account, EmporiumConfig, RestClient};
///
/// # async fn run() -> Result<(), coin_emporium_sdk::EmporiumError> {
/// let client = RestClient::new(&EmporiumConfig::devnet())?;
/// let account = Account::generate();
/// for balance in client.all_coin_balances(account.address()).await? {
///     println!("{}: {}", balance.coin, balance.balance);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RestClient {
    base_url: Url,
    client: Client,
    poll_policy: PollPolicy,
}

impl RestClient {
    /// Creates a client for the configured node.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &EmporiumConfig) -> EmporiumResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(EmporiumError::Http)?;
        Ok(Self {
            base_url: config.node_url().clone(),
            client,
            poll_policy: config.poll_policy().clone(),
        })
    }

    /// Returns the node base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the policy used by [`wait_for_transaction`](Self::wait_for_transaction).
    pub fn poll_policy(&self) -> &PollPolicy {
        &self.poll_policy
    }

    /// Replaces the wait policy.
    #[must_use]
    pub fn with_poll_policy(mut self, policy: PollPolicy) -> Self {
        self.poll_policy = policy;
        self
    }

    // === Accounts ===

    /// Gets account metadata.
    ///
    /// # Errors
    ///
    /// [`EmporiumError::AccountNotFound`] on 404, [`EmporiumError::Remote`] on
    /// any other unexpected status.
    pub async fn account(&self, address: AccountAddress) -> EmporiumResult<AccountData> {
        let url = self.build_url(&format!("accounts/{address}"));
        self.get_optional(url)
            .await?
            .ok_or_else(|| EmporiumError::AccountNotFound(address.to_hex()))
    }

    /// Gets all resources of an account, or `None` if the account does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on any non-2xx status other than 404.
    pub async fn resources(&self, address: AccountAddress) -> EmporiumResult<Option<Vec<Resource>>> {
        let url = self.build_url(&format!("accounts/{address}/resources"));
        self.get_optional(url).await
    }

    /// Gets one resource, or `None` if the account or resource does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on any non-2xx status other than 404.
    pub async fn account_resource(
        &self,
        address: AccountAddress,
        resource_type: &str,
    ) -> EmporiumResult<Option<Resource>> {
        let url = self.build_url(&format!(
            "accounts/{}/resource/{}",
            address,
            urlencoding::encode(resource_type)
        ));
        self.get_optional(url).await
    }

    // === Balances ===

    /// Lists every coin store the account holds.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource query fails or a coin store carries a
    /// malformed value.
    pub async fn all_coin_balances(&self, address: AccountAddress) -> EmporiumResult<Vec<CoinBalance>> {
        let Some(resources) = self.resources(address).await? else {
            return Ok(Vec::new());
        };
        let mut balances = Vec::new();
        for resource in &resources {
            if let Some(balance) = CoinBalance::from_resource(resource)? {
                balances.push(balance);
            }
        }
        Ok(balances)
    }

    /// Balance of one coin type; 0 when the account has no store for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored value is malformed.
    pub async fn coin_balance(&self, address: AccountAddress, coin_type: &str) -> EmporiumResult<u64> {
        Ok(self.coin_store_value(address, coin_type).await?.unwrap_or(0))
    }

    /// Balance of the native test coin, or `None` when the account holds no store for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored value is malformed.
    pub async fn account_balance(&self, address: AccountAddress) -> EmporiumResult<Option<u64>> {
        self.coin_store_value(address, TEST_COIN).await
    }

    async fn coin_store_value(
        &self,
        address: AccountAddress,
        coin_type: &str,
    ) -> EmporiumResult<Option<u64>> {
        match self.account_resource(address, &coin_store_type(coin_type)).await? {
            Some(resource) => Ok(Some(resource.coin_value()?)),
            None => Ok(None),
        }
    }

    // === Transactions ===

    /// Builds an unsigned request for `sender` using its current sequence number.
    ///
    /// # Errors
    ///
    /// Returns an error if the account lookup fails.
    pub async fn generate_transaction(
        &self,
        sender: AccountAddress,
        payload: TransactionPayload,
    ) -> EmporiumResult<TransactionRequest> {
        let account = self.account(sender).await?;
        let sequence_number = account.sequence_number().map_err(|e| {
            EmporiumError::Internal(format!("failed to parse sequence number: {e}"))
        })?;
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| EmporiumError::Internal(format!("system clock before epoch: {e}")))?
            .as_secs();
        Ok(TransactionRequest::new(
            sender,
            sequence_number,
            payload,
            now + DEFAULT_EXPIRATION_SECS,
        ))
    }

    /// Signs a request with the node-provided signing message.
    ///
    /// Any signature already on the request is dropped before the signing
    /// message is requested.
    ///
    /// # Errors
    ///
    /// Returns an error if the node rejects the request or returns a message
    /// that is not hex.
    pub async fn sign_transaction(
        &self,
        account: &Account,
        mut request: TransactionRequest,
    ) -> EmporiumResult<TransactionRequest> {
        request.signature = None;
        let url = self.build_url("transactions/signing_message");
        let body = serde_json::to_string(&request)?;
        let message: SigningMessage = self.post_json(url, body, StatusCode::OK).await?;

        let hex_message = message.message.strip_prefix("0x").unwrap_or(&message.message);
        let to_sign = hex::decode(hex_message)?;
        let signature = account.sign_message(&to_sign);

        request.signature = Some(TransactionSignature::Ed25519Signature {
            public_key: account.public_key().to_hex(),
            signature: signature.to_hex(),
        });
        Ok(request)
    }

    /// Submits a signed request. Only HTTP 202 counts as accepted.
    ///
    /// # Errors
    ///
    /// [`EmporiumError::Remote`] carrying the response and request bodies on
    /// any other status.
    pub async fn submit_transaction(
        &self,
        request: &TransactionRequest,
    ) -> EmporiumResult<PendingTransaction> {
        let url = self.build_url("transactions");
        let body = serde_json::to_string(request)?;
        let pending: PendingTransaction = self.post_json(url, body, StatusCode::ACCEPTED).await?;
        info!(
            txn_hash = %pending.hash,
            sender = %request.sender,
            sequence_number = request.sequence_number,
            "transaction submitted"
        );
        Ok(pending)
    }

    /// Generates, signs and submits `payload` from `account`, returning the hash.
    ///
    /// # Errors
    ///
    /// Returns the first error from any of the three steps.
    pub async fn execute_transaction_with_payload(
        &self,
        account: &Account,
        payload: TransactionPayload,
    ) -> EmporiumResult<TransactionHash> {
        let request = self.generate_transaction(account.address(), payload).await?;
        let signed = self.sign_transaction(account, request).await?;
        Ok(self.submit_transaction(&signed).await?.hash)
    }

    /// Gets a transaction, or `None` if the node has not indexed it yet.
    ///
    /// # Errors
    ///
    /// Returns an error on any non-2xx status other than 404.
    pub async fn transaction(&self, hash: &TransactionHash) -> EmporiumResult<Option<TransactionInfo>> {
        let url = self.build_url(&format!("transactions/{hash}"));
        self.get_optional(url).await
    }

    /// True while the node either does not know the hash or reports it pending.
    ///
    /// # Errors
    ///
    /// Returns an error on any non-2xx status other than 404.
    pub async fn transaction_pending(&self, hash: &TransactionHash) -> EmporiumResult<bool> {
        Ok(match self.transaction(hash).await? {
            None => true,
            Some(info) => info.is_pending(),
        })
    }

    /// Polls until the transaction is no longer pending.
    ///
    /// Success and failure both end the wait; use
    /// [`transaction_did_succeed`](Self::transaction_did_succeed) to tell them apart.
    ///
    /// # Errors
    ///
    /// [`EmporiumError::TransactionTimeout`] once the poll policy is exhausted.
    pub async fn wait_for_transaction(&self, hash: &TransactionHash) -> EmporiumResult<()> {
        let resolved = self
            .poll_policy
            .poll(move || async move {
                let pending = self.transaction_pending(hash).await?;
                debug!(txn_hash = %hash, pending, "checked transaction");
                Ok(!pending)
            })
            .await?;

        if resolved {
            Ok(())
        } else {
            let attempts = self.poll_policy.max_attempts.max(1);
            warn!(txn_hash = %hash, attempts, "transaction still pending");
            Err(EmporiumError::TransactionTimeout {
                hash: hash.to_hex(),
                attempts,
            })
        }
    }

    /// Reads the executed transaction's success flag.
    ///
    /// Unknown and pending transactions report `false`.
    ///
    /// # Errors
    ///
    /// Returns an error on any non-2xx status other than 404.
    pub async fn transaction_did_succeed(&self, hash: &TransactionHash) -> EmporiumResult<bool> {
        Ok(self
            .transaction(hash)
            .await?
            .is_some_and(|info| info.did_succeed()))
    }

    // === Helper Methods ===

    fn build_url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        if !path.is_empty() {
            if !url.path().ends_with('/') {
                url.set_path(&format!("{}/", url.path()));
            }
            url.set_path(&format!("{}{}", url.path(), path));
        }
        url
    }

    async fn get_optional<T: DeserializeOwned>(&self, url: Url) -> EmporiumResult<Option<T>> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::handle_response(response, None).await.map(Some)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        url: Url,
        body: String,
        expected: StatusCode,
    ) -> EmporiumResult<T> {
        debug!(%url, "POST");
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .body(body.clone())
            .send()
            .await?;
        if response.status() != expected {
            return Err(Self::remote_error(response, Some(body)).await);
        }
        Self::handle_response(response, Some(body)).await
    }

    async fn handle_response<T: DeserializeOwned>(
        response: Response,
        request: Option<String>,
    ) -> EmporiumResult<T> {
        if let Some(version) = response
            .headers()
            .get("x-aptos-ledger-version")
            .and_then(|v| v.to_str().ok())
        {
            debug!(ledger_version = version, "node response");
        }

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::remote_error(response, request).await)
        }
    }

    async fn remote_error(response: Response, request: Option<String>) -> EmporiumError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        match request {
            Some(request) => EmporiumError::remote_with_request(status, body, request),
            None => EmporiumError::remote(status, body),
        }
    }
}
