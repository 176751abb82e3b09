//! Signing capability handed to [`CoinEmporium`](crate::CoinEmporium).
//!
//! A [`Wallet`] owns the user's key and decides how a payload gets signed
//! and broadcast. The emporium only ever sees addresses, payloads and
//! hashes, so a hardware wallet, a browser extension bridge or a gas
//! station can stand in for [`LocalWallet`].

use crate::account::Account;
use crate::api::RestClient;
use crate::error::{EmporiumError, EmporiumResult};
use crate::transaction::TransactionPayload;
use crate::types::{AccountAddress, TransactionHash};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Structs that implement this trait can sign and submit transactions on
/// behalf of one account.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Asks the wallet for access and returns the connected address.
    async fn connect(&self) -> EmporiumResult<AccountAddress>;

    /// Address of the connected account.
    ///
    /// Fails with [`EmporiumError::Wallet`] before [`connect`](Self::connect).
    async fn account(&self) -> EmporiumResult<AccountAddress>;

    /// Signs `payload`, submits it and returns the hash without waiting for execution.
    async fn sign_and_submit_transaction(
        &self,
        payload: TransactionPayload,
    ) -> EmporiumResult<TransactionHash>;
}

/// Wallet backed by an in-process [`Account`] that submits straight to the node.
#[derive(Debug)]
pub struct LocalWallet {
    account: Account,
    client: RestClient,
    connected: AtomicBool,
}

impl LocalWallet {
    /// Wraps `account`, submitting through `client`.
    pub fn new(account: Account, client: RestClient) -> Self {
        Self {
            account,
            client,
            connected: AtomicBool::new(false),
        }
    }

    /// Wraps `account` and marks the wallet connected.
    pub fn connected(account: Account, client: RestClient) -> Self {
        let wallet = Self::new(account, client);
        wallet.connected.store(true, Ordering::Release);
        wallet
    }

    /// The signing account.
    pub fn signer(&self) -> &Account {
        &self.account
    }

    fn ensure_connected(&self) -> EmporiumResult<()> {
        if self.connected.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(EmporiumError::Wallet("wallet not connected".into()))
        }
    }
}

#[async_trait]
impl Wallet for LocalWallet {
    async fn connect(&self) -> EmporiumResult<AccountAddress> {
        self.connected.store(true, Ordering::Release);
        debug!(address = %self.account.address(), "wallet connected");
        Ok(self.account.address())
    }

    async fn account(&self) -> EmporiumResult<AccountAddress> {
        self.ensure_connected()?;
        Ok(self.account.address())
    }

    async fn sign_and_submit_transaction(
        &self,
        payload: TransactionPayload,
    ) -> EmporiumResult<TransactionHash> {
        self.ensure_connected()?;
        self.client
            .execute_transaction_with_payload(&self.account, payload)
            .await
    }
}
