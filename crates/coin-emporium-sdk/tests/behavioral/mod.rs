//! Behavioral tests for the SDK.
//!
//! These drive the public API against a mocked node, so they run without a
//! live network.

use coin_emporium_sdk::poll::PollPolicy;
use coin_emporium_sdk::programs::FaucetProgram;
use coin_emporium_sdk::{
    Account, AccountAddress, CoinBalance, CoinEmporium, EmporiumConfig, EmporiumError,
    LocalWallet, RestClient, TransactionHash, Wallet,
};
use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{body_partial_json, method, path, path_regex},
    Mock, MockServer, Request, ResponseTemplate,
};

fn fast_config(server: &MockServer) -> EmporiumConfig {
    EmporiumConfig::custom(&server.uri())
        .unwrap()
        .with_poll_policy(PollPolicy::fixed(10, Duration::from_millis(1)))
}

async fn mount_account(server: &MockServer, account: &Account, sequence_number: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/accounts/{}", account.address())))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sequence_number": sequence_number.to_string(),
            "authentication_key": account.auth_key()
        })))
        .mount(server)
        .await;
}

/// Echoes a fixed signing message for any request.
async fn mount_signing_message(server: &MockServer, message: &[u8]) {
    Mock::given(method("POST"))
        .and(path("/transactions/signing_message"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": format!("0x{}", hex::encode(message))
        })))
        .mount(server)
        .await;
}

mod account_tests {
    use super::*;

    #[test]
    fn test_address_is_sha3_of_public_key_and_scheme() {
        use sha3::{Digest, Sha3_256};

        let account = Account::from_seed(&[3u8; 32]).unwrap();
        let mut hasher = Sha3_256::new();
        hasher.update(account.public_key().to_bytes());
        hasher.update([0u8]);
        let expected = hex::encode(hasher.finalize());

        assert_eq!(account.address().to_hex(), format!("0x{expected}"));
    }

    #[test]
    fn test_signing_is_deterministic_and_64_bytes() {
        let account = Account::from_seed(&[4u8; 32]).unwrap();
        let first = account.sign_message(b"the same message");
        let second = account.sign_message(b"the same message");
        assert_eq!(first.to_bytes(), second.to_bytes());
        assert_eq!(first.to_bytes().len(), 64);
        assert_eq!(first.to_hex().len(), 2 + 128);
    }
}

mod transaction_lifecycle_tests {
    use super::*;

    #[tokio::test]
    async fn test_generated_sequence_number_matches_account() {
        let server = MockServer::start().await;
        let account = Account::from_seed(&[5u8; 32]).unwrap();
        mount_account(&server, &account, 314).await;

        let client = RestClient::new(&fast_config(&server)).unwrap();
        let observed = client.account(account.address()).await.unwrap();
        let request = client
            .generate_transaction(
                account.address(),
                coin_emporium_sdk::programs::coin::register_ix("0x1::TestCoin::TestCoin"),
            )
            .await
            .unwrap();

        assert_eq!(request.sequence_number, observed.sequence_number().unwrap());
    }

    #[tokio::test]
    async fn test_execute_signs_node_message() {
        let server = MockServer::start().await;
        let account = Account::from_seed(&[6u8; 32]).unwrap();
        let message = b"canonical bytes";
        let expected_signature = account.sign_message(message).to_hex();
        let hash = TransactionHash::new([0x77; 32]);

        mount_account(&server, &account, 0).await;
        mount_signing_message(&server, message).await;
        Mock::given(method("POST"))
            .and(path("/transactions"))
            .and(body_partial_json(json!({
                "sender": account.address().to_hex(),
                "max_gas_amount": "2000",
                "gas_unit_price": "1",
                "signature": {
                    "type": "ed25519_signature",
                    "public_key": account.public_key().to_hex(),
                    "signature": expected_signature
                }
            })))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({"hash": hash.to_hex()})))
            .expect(1)
            .mount(&server)
            .await;

        let client = RestClient::new(&fast_config(&server)).unwrap();
        let submitted = client
            .execute_transaction_with_payload(
                &account,
                coin_emporium_sdk::programs::coin::register_ix("0x1::TestCoin::TestCoin"),
            )
            .await
            .unwrap();
        assert_eq!(submitted, hash);
    }

    #[tokio::test]
    async fn test_wait_gives_up_after_ten_checks() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/transactions/0x[0-9a-f]{64}$"))
            .respond_with(ResponseTemplate::new(404))
            .expect(10)
            .mount(&server)
            .await;

        let client = RestClient::new(&fast_config(&server)).unwrap();
        let err = client
            .wait_for_transaction(&TransactionHash::new([1; 32]))
            .await
            .unwrap_err();
        assert!(err.is_timeout());
        assert!(matches!(
            err,
            EmporiumError::TransactionTimeout { attempts: 10, .. }
        ));
    }

    #[tokio::test]
    async fn test_wait_returns_once_resolved_even_on_failure() {
        let server = MockServer::start().await;
        let pending = std::sync::atomic::AtomicU32::new(0);
        Mock::given(method("GET"))
            .and(path_regex(r"^/transactions/0x[0-9a-f]{64}$"))
            .respond_with(move |_: &Request| {
                let seen = pending.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                if seen < 4 {
                    ResponseTemplate::new(200).set_body_json(json!({"type": "pending_transaction"}))
                } else {
                    ResponseTemplate::new(200).set_body_json(json!({
                        "type": "user_transaction",
                        "success": false,
                        "vm_status": "Move abort"
                    }))
                }
            })
            .mount(&server)
            .await;

        let client = RestClient::new(&fast_config(&server)).unwrap();
        let hash = TransactionHash::new([2; 32]);
        client.wait_for_transaction(&hash).await.unwrap();
        assert!(!client.transaction_did_succeed(&hash).await.unwrap());
    }
}

mod resource_tests {
    use super::*;

    #[tokio::test]
    async fn test_coin_store_type_parameter_is_extracted() {
        let server = MockServer::start().await;
        let long_address = format!("0x{}", "ab".repeat(32));
        Mock::given(method("GET"))
            .and(path_regex(r"/resources$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"type": "0x1::Coin::CoinStore<0x1::TestCoin::TestCoin>",
                 "data": {"coin": {"value": "100"}}},
                {"type": format!("0x1::Coin::CoinStore<{long_address}::Foo::Foo>"),
                 "data": {"coin": {"value": "3"}}},
                {"type": "0x1::Coin::CoinInfo<0x1::TestCoin::TestCoin>", "data": {}},
                {"type": "0x2::Coin::CoinStore<0x1::TestCoin::TestCoin>",
                 "data": {"coin": {"value": "999"}}}
            ])))
            .mount(&server)
            .await;

        let client = RestClient::new(&fast_config(&server)).unwrap();
        let balances = client
            .all_coin_balances(AccountAddress::ONE)
            .await
            .unwrap();
        assert_eq!(
            balances,
            vec![
                CoinBalance {
                    coin: "0x1::TestCoin::TestCoin".to_string(),
                    balance: 100
                },
                CoinBalance {
                    coin: format!("{long_address}::Foo::Foo"),
                    balance: 3
                },
            ]
        );
    }
}

mod program_tests {
    use super::*;

    #[tokio::test]
    async fn test_init_root_from_module_owner() {
        let server = MockServer::start().await;
        let admin = Account::from_seed(&[8u8; 32]).unwrap();
        let hash = TransactionHash::new([0x11; 32]);
        mount_account(&server, &admin, 0).await;
        mount_signing_message(&server, b"init").await;
        Mock::given(method("POST"))
            .and(path("/transactions"))
            .and(body_partial_json(json!({
                "payload": {
                    "type": "script_function_payload",
                    "function": format!("{}::Faucet::init", admin.address().to_hex()),
                    "arguments": [],
                    "type_arguments": []
                }
            })))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({"hash": hash.to_hex()})))
            .expect(1)
            .mount(&server)
            .await;

        let client = RestClient::new(&fast_config(&server)).unwrap();
        let program = FaucetProgram::new(client, admin.address());
        assert_eq!(program.init_root(&admin).await.unwrap(), hash);
    }

    #[tokio::test]
    async fn test_init_root_from_stranger_makes_no_requests() {
        let server = MockServer::start().await;
        let client = RestClient::new(&fast_config(&server)).unwrap();
        let program = FaucetProgram::new(client, AccountAddress::from_hex("0xabc").unwrap());

        let err = program.init_root(&Account::generate()).await.unwrap_err();
        assert!(matches!(err, EmporiumError::NotModuleOwner { .. }));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}

mod workflow_tests {
    use super::*;

    #[tokio::test]
    async fn test_mint_through_local_wallet() {
        let server = MockServer::start().await;
        let user = Account::from_seed(&[9u8; 32]).unwrap();
        let module = AccountAddress::from_hex("0xabc").unwrap();
        let coin_type = "0xabc::FooCoin::FooCoin";

        mount_account(&server, &user, 2).await;
        mount_signing_message(&server, b"mint").await;
        Mock::given(method("GET"))
            .and(path_regex(r"/resource/.*FooCoin"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": format!("0x1::Coin::CoinStore<{coin_type}>"),
                "data": {"coin": {"value": "0"}}
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/transactions"))
            .and(body_partial_json(json!({
                "sequence_number": "2",
                "payload": {
                    "function": format!("{}::Faucet::mint", module.to_hex()),
                    "arguments": ["250"],
                    "type_arguments": [coin_type]
                }
            })))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "hash": TransactionHash::new([0x33; 32]).to_hex()
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/transactions/0x[0-9a-f]{64}$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "user_transaction",
                "success": true
            })))
            .mount(&server)
            .await;

        let config = fast_config(&server).with_faucet_module(module);
        let wallet = LocalWallet::new(user, RestClient::new(&config).unwrap());
        wallet.connect().await.unwrap();
        let emporium = CoinEmporium::new(&config, wallet).unwrap();

        let outcome = emporium.mint(coin_type, 250).await.unwrap();
        assert!(outcome.registration.is_none());
        assert_eq!(outcome.mint_hash, TransactionHash::new([0x33; 32]));
    }
}
