//! Client for the remote coin compiler.
//!
//! The compiler turns a coin name and an owner address into the bytecode of
//! a `<name>::<name>` Move module ready to publish under that address.

use crate::config::EmporiumConfig;
use crate::error::{EmporiumError, EmporiumResult};
use crate::types::AccountAddress;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

#[derive(Debug, Serialize)]
struct CompileRequest<'a> {
    name: &'a str,
    address: String,
}

#[derive(Debug, Deserialize)]
struct CompileResponse {
    hex: String,
}

/// Compiles coin modules through the configured compiler service.
#[derive(Debug, Clone)]
pub struct CompilerClient {
    url: Url,
    client: Client,
}

impl CompilerClient {
    /// # Errors
    ///
    /// Returns an error if no compiler URL is configured or the HTTP client fails to build.
    pub fn new(config: &EmporiumConfig) -> EmporiumResult<Self> {
        let url = config
            .compiler_url()
            .cloned()
            .ok_or_else(|| EmporiumError::Config("compiler URL not configured".into()))?;
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(EmporiumError::Http)?;
        Ok(Self { url, client })
    }

    /// Compiles the coin module `name` for `address` and returns its bytecode hex.
    ///
    /// # Errors
    ///
    /// Returns an error on a non-2xx status or a body without `hex`.
    pub async fn compile(&self, name: &str, address: AccountAddress) -> EmporiumResult<String> {
        let request = CompileRequest {
            name,
            address: address.to_bare_hex(),
        };
        debug!(url = %self.url, name, "compiling coin module");
        let response = self.client.post(self.url.clone()).json(&request).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(EmporiumError::remote_with_request(
                status,
                body,
                serde_json::to_string(&request)?,
            ));
        }
        let body: CompileResponse = response.json().await?;
        Ok(body.hex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn client(server: &MockServer) -> CompilerClient {
        let config = EmporiumConfig::custom("http://localhost:8080")
            .unwrap()
            .with_compiler_url(&format!("{}/compile", server.uri()))
            .unwrap();
        CompilerClient::new(&config).unwrap()
    }

    #[test]
    fn test_requires_compiler_url() {
        let err = CompilerClient::new(&EmporiumConfig::devnet()).unwrap_err();
        assert!(matches!(err, EmporiumError::Config(_)));
    }

    #[tokio::test]
    async fn test_compile_sends_bare_address() {
        let server = MockServer::start().await;
        let address = AccountAddress::from_hex("0xabc").unwrap();
        Mock::given(method("POST"))
            .and(path("/compile"))
            .and(body_json(json!({
                "name": "FooCoin",
                "address": address.to_bare_hex()
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hex": "a11ceb0b"})))
            .expect(1)
            .mount(&server)
            .await;

        let hex = client(&server).compile("FooCoin", address).await.unwrap();
        assert_eq!(hex, "a11ceb0b");
    }

    #[tokio::test]
    async fn test_compile_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("move build failed"))
            .mount(&server)
            .await;

        let err = client(&server)
            .compile("FooCoin", AccountAddress::ONE)
            .await
            .unwrap_err();
        match err {
            EmporiumError::Remote { body, request, .. } => {
                assert_eq!(body, "move build failed");
                assert!(request.unwrap().contains("FooCoin"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
