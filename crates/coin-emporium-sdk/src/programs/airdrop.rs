//! Airdrop program client.

use super::{init_program, string_to_hex};
use crate::account::Account;
use crate::api::RestClient;
use crate::config::EmporiumConfig;
use crate::error::{EmporiumError, EmporiumResult};
use crate::transaction::{ScriptFunctionPayload, TransactionPayload};
use crate::types::{AccountAddress, TransactionHash};

/// Module holding airdrop entry functions.
pub const AIRDROP_MODULE: &str = "Airdrop";

/// Client for the `Airdrop` module published at `module_address`.
#[derive(Debug, Clone)]
pub struct AirdropProgram {
    client: RestClient,
    module_address: AccountAddress,
}

impl AirdropProgram {
    /// Creates a client for the program published at `module_address`.
    pub fn new(client: RestClient, module_address: AccountAddress) -> Self {
        Self {
            client,
            module_address,
        }
    }

    /// Creates a client from the configured node and Airdrop program address.
    ///
    /// # Errors
    ///
    /// Returns an error if no Airdrop program address is configured.
    pub fn from_config(config: &EmporiumConfig) -> EmporiumResult<Self> {
        let module_address = config
            .airdrop_module()
            .ok_or_else(|| EmporiumError::Config("airdrop module address not configured".into()))?;
        Ok(Self::new(RestClient::new(config)?, module_address))
    }

    /// Address the program is published under.
    pub fn module_address(&self) -> AccountAddress {
        self.module_address
    }

    /// Node client used for queries and submission.
    pub fn client(&self) -> &RestClient {
        &self.client
    }

    /// Initializes the program. Only the module owner may call this.
    ///
    /// # Errors
    ///
    /// [`EmporiumError::NotModuleOwner`] before any network call when `admin`
    /// is not the module address; otherwise any submission error.
    pub async fn init_root(&self, admin: &Account) -> EmporiumResult<TransactionHash> {
        init_program(&self.client, self.module_address, AIRDROP_MODULE, admin).await
    }

    /// `Airdrop::create_airdrop<coin_type>(name, symbol, decimals)`
    pub fn create_airdrop_ix(
        &self,
        name: &str,
        symbol: &str,
        decimals: u8,
        coin_type: &str,
    ) -> TransactionPayload {
        self.call(
            "create_airdrop",
            coin_type,
            vec![string_to_hex(name), string_to_hex(symbol), decimals.to_string()],
        )
    }

    /// `Airdrop::airdrop<coin_type>(amount)`
    pub fn airdrop_ix(&self, coin_type: &str, amount: u64) -> TransactionPayload {
        self.call("airdrop", coin_type, vec![amount.to_string()])
    }

    fn call(&self, function: &str, coin_type: &str, arguments: Vec<String>) -> TransactionPayload {
        ScriptFunctionPayload::new(
            self.module_address,
            AIRDROP_MODULE,
            function,
            vec![coin_type.to_string()],
            arguments,
        )
        .into()
    }
}
