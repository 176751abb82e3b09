//! Faucet and Registry program client.

use super::{init_program, string_to_hex};
use crate::account::Account;
use crate::api::RestClient;
use crate::config::EmporiumConfig;
use crate::error::{EmporiumError, EmporiumResult};
use crate::transaction::{ScriptFunctionPayload, TransactionPayload};
use crate::types::{generic_suffix, AccountAddress, TransactionHash};

/// Module holding faucet entry functions.
pub const FAUCET_MODULE: &str = "Faucet";
/// Module holding the coin metadata registry.
pub const REGISTRY_MODULE: &str = "Registry";
/// Resource a faucet owner holds per faucet coin.
pub const FAUCET_META: &str = "FaucetMeta";

/// Client for the `Faucet` and `Registry` modules published at `module_address`.
///
/// ```rust
/// use coin_emporium_sdk::programs::FaucetProgram;
/// use coin_emporium_sdk::{AccountAddress, EmporiumConfig, RestClient};
///
/// let client = RestClient::new(&EmporiumConfig::devnet()).unwrap();
/// let program = FaucetProgram::new(client, AccountAddress::from_hex("0xabc").unwrap());
/// let payload = program.mint_ix("0xabc::FooCoin::FooCoin", 100);
/// let call = payload.as_script_function().unwrap();
/// assert!(call.function.ends_with("::Faucet::mint"));
/// assert_eq!(call.arguments, vec!["100"]);
/// ```
#[derive(Debug, Clone)]
pub struct FaucetProgram {
    client: RestClient,
    module_address: AccountAddress,
}

impl FaucetProgram {
    /// Creates a client for the program published at `module_address`.
    pub fn new(client: RestClient, module_address: AccountAddress) -> Self {
        Self {
            client,
            module_address,
        }
    }

    /// Creates a client from the configured node and Faucet program address.
    ///
    /// # Errors
    ///
    /// Returns an error if no Faucet program address is configured.
    pub fn from_config(config: &EmporiumConfig) -> EmporiumResult<Self> {
        let module_address = config
            .faucet_module()
            .ok_or_else(|| EmporiumError::Config("faucet module address not configured".into()))?;
        Ok(Self::new(RestClient::new(config)?, module_address))
    }

    /// Address the program is published under.
    pub fn module_address(&self) -> AccountAddress {
        self.module_address
    }

    /// Node client used by [`init_root`](Self::init_root) and
    /// [`fetch_faucets`](Self::fetch_faucets).
    pub fn client(&self) -> &RestClient {
        &self.client
    }

    /// Initializes the program. Only the module owner may call this.
    ///
    /// Returns the hash of the submitted `Faucet::init` transaction without
    /// waiting for it.
    ///
    /// # Errors
    ///
    /// [`EmporiumError::NotModuleOwner`] before any network call when `admin`
    /// is not the module address; otherwise any submission error.
    pub async fn init_root(&self, admin: &Account) -> EmporiumResult<TransactionHash> {
        init_program(&self.client, self.module_address, FAUCET_MODULE, admin).await
    }

    /// `Faucet::create_faucet_coin<coin_type>(name, symbol, decimals)`
    pub fn create_faucet_ix(
        &self,
        name: &str,
        symbol: &str,
        decimals: u8,
        coin_type: &str,
    ) -> TransactionPayload {
        self.call(
            FAUCET_MODULE,
            "create_faucet_coin",
            coin_type,
            vec![string_to_hex(name), string_to_hex(symbol), decimals.to_string()],
        )
    }

    /// `Faucet::mint<coin_type>(amount)`
    pub fn mint_ix(&self, coin_type: &str, amount: u64) -> TransactionPayload {
        self.call(FAUCET_MODULE, "mint", coin_type, vec![amount.to_string()])
    }

    /// `Faucet::pause<coin_type>()`
    pub fn pause_ix(&self, coin_type: &str) -> TransactionPayload {
        self.call(FAUCET_MODULE, "pause", coin_type, vec![])
    }

    /// `Faucet::unpause<coin_type>()`
    pub fn unpause_ix(&self, coin_type: &str) -> TransactionPayload {
        self.call(FAUCET_MODULE, "unpause", coin_type, vec![])
    }

    /// `Registry::put<coin_type>(name, symbol, description, logo_url, decimals)`
    pub fn register_ix(
        &self,
        coin_type: &str,
        name: &str,
        symbol: &str,
        description: &str,
        logo_url: &str,
        decimals: u8,
    ) -> TransactionPayload {
        self.call(
            REGISTRY_MODULE,
            "put",
            coin_type,
            vec![
                string_to_hex(name),
                string_to_hex(symbol),
                string_to_hex(description),
                string_to_hex(logo_url),
                decimals.to_string(),
            ],
        )
    }

    /// Lists the faucets `address` owns.
    ///
    /// Each entry is the generic suffix of a `Faucet::FaucetMeta` resource
    /// published by this program, e.g. `<0xabc::FooCoin::FooCoin>`.
    /// Unknown accounts have none.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource query fails.
    pub async fn fetch_faucets(&self, address: AccountAddress) -> EmporiumResult<Vec<String>> {
        let resources = self.client.resources(address).await?.unwrap_or_default();
        Ok(resources
            .iter()
            .filter(|resource| {
                resource.struct_tag().is_some_and(|tag| {
                    tag.is(self.module_address, FAUCET_MODULE, FAUCET_META)
                })
            })
            .map(|resource| generic_suffix(&resource.typ).to_string())
            .collect())
    }

    fn call(
        &self,
        module: &str,
        function: &str,
        coin_type: &str,
        arguments: Vec<String>,
    ) -> TransactionPayload {
        ScriptFunctionPayload::new(
            self.module_address,
            module,
            function,
            vec![coin_type.to_string()],
            arguments,
        )
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poll::PollPolicy;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::{
        matchers::{method, path, path_regex},
        Mock, MockServer, ResponseTemplate,
    };

    const FOO: &str = "0xabc::FooCoin::FooCoin";

    fn program(server_uri: &str, module_address: AccountAddress) -> FaucetProgram {
        let config = EmporiumConfig::custom(server_uri)
            .unwrap()
            .with_poll_policy(PollPolicy::fixed(2, Duration::from_millis(1)));
        FaucetProgram::new(RestClient::new(&config).unwrap(), module_address)
    }

    fn offline() -> FaucetProgram {
        program("http://127.0.0.1:9", AccountAddress::from_hex("0xabc").unwrap())
    }

    fn script(payload: &TransactionPayload) -> &ScriptFunctionPayload {
        payload.as_script_function().unwrap()
    }

    #[test]
    fn test_create_faucet_ix() {
        let program = offline();
        let payload = program.create_faucet_ix("FooCoin", "FooCoin", 6, FOO);
        let call = script(&payload);
        assert_eq!(
            call.function,
            format!("{}::Faucet::create_faucet_coin", program.module_address().to_hex())
        );
        assert_eq!(call.arguments[0], hex::encode("FooCoin"));
        assert_eq!(call.arguments, vec!["466f6f436f696e", "466f6f436f696e", "6"]);
        assert_eq!(call.type_arguments, vec![FOO]);
    }

    #[test]
    fn test_create_faucet_ix_wire_shape() {
        let payload = offline().create_faucet_ix("Bar", "BAR", 8, "0x1::Bar::Bar");
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["type"], json!("script_function_payload"));
        assert_eq!(value["arguments"], json!(["426172", "424152", "8"]));
        assert_eq!(value["type_arguments"], json!(["0x1::Bar::Bar"]));
    }

    #[test]
    fn test_mint_pause_unpause() {
        let program = offline();

        let mint = program.mint_ix(FOO, 1_000_000);
        assert!(script(&mint).function.ends_with("::Faucet::mint"));
        assert_eq!(script(&mint).arguments, vec!["1000000"]);
        assert_eq!(script(&mint).type_arguments, vec![FOO]);

        for (payload, entry) in [
            (program.pause_ix(FOO), "::Faucet::pause"),
            (program.unpause_ix(FOO), "::Faucet::unpause"),
        ] {
            let call = script(&payload);
            assert!(call.function.ends_with(entry));
            assert!(call.arguments.is_empty());
            assert_eq!(call.type_arguments, vec![FOO]);
        }
    }

    #[test]
    fn test_register_ix() {
        let payload = offline().register_ix(
            FOO,
            "Foo",
            "FOO",
            "A coin",
            "https://foo.test/logo.png",
            6,
        );
        let call = script(&payload);
        assert!(call.function.ends_with("::Registry::put"));
        assert_eq!(
            call.arguments,
            vec![
                string_to_hex("Foo"),
                string_to_hex("FOO"),
                string_to_hex("A coin"),
                string_to_hex("https://foo.test/logo.png"),
                "6".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_init_root_submits_once() {
        let server = MockServer::start().await;
        let admin = Account::from_seed(&[9u8; 32]).unwrap();
        let hash = TransactionHash::new([0x42; 32]);

        Mock::given(method("GET"))
            .and(path(format!("/accounts/{}", admin.address())))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sequence_number": "0",
                "authentication_key": admin.auth_key()
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/transactions/signing_message"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "0xbeef"})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/transactions"))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({"hash": hash.to_hex()})))
            .expect(1)
            .mount(&server)
            .await;

        let program = program(&server.uri(), admin.address());
        assert_eq!(program.init_root(&admin).await.unwrap(), hash);
    }

    #[tokio::test]
    async fn test_init_root_rejects_non_owner_without_network() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let admin = Account::from_seed(&[9u8; 32]).unwrap();
        let program = program(&server.uri(), AccountAddress::from_hex("0xabc").unwrap());
        let err = program.init_root(&admin).await.unwrap_err();
        assert!(matches!(err, EmporiumError::NotModuleOwner { .. }));
    }

    #[tokio::test]
    async fn test_fetch_faucets() {
        let server = MockServer::start().await;
        let module = AccountAddress::from_hex("0xabc").unwrap();
        Mock::given(method("GET"))
            .and(path_regex(r"/resources$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"type": format!("{}::Faucet::FaucetMeta<0xd9::CoinerTwo::CoinerTwo>", module.to_hex()),
                 "data": {}},
                {"type": "0xabc::Faucet::FaucetMeta<0xabc::FooCoin::FooCoin>", "data": {}},
                {"type": "0xdef::Faucet::FaucetMeta<0xabc::Other::Other>", "data": {}},
                {"type": "0xabc::Faucet::Capabilities<0xabc::FooCoin::FooCoin>", "data": {}},
                {"type": "0x1::Coin::CoinStore<0x1::TestCoin::TestCoin>",
                 "data": {"coin": {"value": "1"}}}
            ])))
            .mount(&server)
            .await;

        let faucets = program(&server.uri(), module)
            .fetch_faucets(AccountAddress::ONE)
            .await
            .unwrap();
        assert_eq!(
            faucets,
            vec!["<0xd9::CoinerTwo::CoinerTwo>", "<0xabc::FooCoin::FooCoin>"]
        );
    }

    #[tokio::test]
    async fn test_fetch_faucets_unknown_account() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let faucets = program(&server.uri(), AccountAddress::ONE)
            .fetch_faucets(AccountAddress::ONE)
            .await
            .unwrap();
        assert!(faucets.is_empty());
    }
}
