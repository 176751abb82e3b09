//! Error types for the Coin Emporium SDK.
//!
//! Every fallible operation returns [`EmporiumResult`]. Absent accounts and
//! resources are reported as `Option::None` by the query methods; this enum
//! only carries genuine failures.

use thiserror::Error;

/// A specialized Result type for SDK operations.
pub type EmporiumResult<T> = Result<T, EmporiumError>;

/// The main error type for the SDK.
#[derive(Error, Debug)]
pub enum EmporiumError {
    /// Error occurred during HTTP communication
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error occurred during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error occurred during URL parsing
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Error occurred during hex encoding/decoding
    #[error("Hex error: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Invalid account address
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid public key
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Invalid private key
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Invalid type tag format
    #[error("Invalid type tag: {0}")]
    InvalidTypeTag(String),

    /// A remote service answered with an unexpected status code.
    #[error("remote error ({status_code}): {body}")]
    Remote {
        /// HTTP status code
        status_code: u16,
        /// Raw response body
        body: String,
        /// Outgoing request body, when one was sent
        request: Option<String>,
    },

    /// The node does not know the account
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Transaction was still pending when the poll budget ran out
    #[error("Transaction {hash} still pending after {attempts} checks")]
    TransactionTimeout {
        /// The hash of the transaction that timed out
        hash: String,
        /// Number of pending checks performed
        attempts: u32,
    },

    /// A privileged program call was made by an account that does not own the module
    #[error("{caller} is not the owner of module {module}")]
    NotModuleOwner {
        /// Address the module is published under
        module: String,
        /// Address of the account that attempted the call
        caller: String,
    },

    /// User input rejected before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// The wallet refused or failed to sign and submit
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal SDK error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EmporiumError {
    /// Creates a remote error from a response status and body.
    pub fn remote(status_code: u16, body: impl Into<String>) -> Self {
        Self::Remote {
            status_code,
            body: body.into(),
            request: None,
        }
    }

    /// Creates a remote error that also records the request body that was sent.
    pub fn remote_with_request(
        status_code: u16,
        body: impl Into<String>,
        request: impl Into<String>,
    ) -> Self {
        Self::Remote {
            status_code,
            body: body.into(),
            request: Some(request.into()),
        }
    }

    /// Creates a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Returns the HTTP status code of a remote error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Remote { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Returns true if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::AccountNotFound(_)
                | Self::Remote {
                    status_code: 404,
                    ..
                }
        )
    }

    /// Returns true if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TransactionTimeout { .. })
    }

    /// Returns the error message suitable for display to end users.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Http(_) => "Network error occurred",
            Self::Json(_) => "Failed to process response",
            Self::Url(_) => "Invalid URL",
            Self::Hex(_) => "Invalid hex format",
            Self::InvalidAddress(_) => "Invalid account address",
            Self::InvalidPublicKey(_) => "Invalid public key",
            Self::InvalidPrivateKey(_) => "Invalid private key",
            Self::InvalidTypeTag(_) => "Invalid type format",
            Self::Remote {
                status_code: 404, ..
            } => "Resource not found",
            Self::Remote { status_code, .. } if *status_code >= 500 => "Server error",
            Self::Remote { .. } => "Transaction failed",
            Self::AccountNotFound(_) => "Account not found",
            Self::TransactionTimeout { .. } => "Transaction timed out",
            Self::NotModuleOwner { .. } => "Only the module owner can do this",
            Self::Validation(_) => "Invalid input",
            Self::Wallet(_) => "Wallet error",
            Self::Config(_) => "Configuration error",
            Self::Internal(_) => "Internal error",
        }
    }
}
