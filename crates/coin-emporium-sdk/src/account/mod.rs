//! Local Ed25519 accounts.

use crate::crypto::{Ed25519PrivateKey, Ed25519PublicKey, Ed25519Signature};
use crate::error::EmporiumResult;
use crate::types::AccountAddress;
use std::fmt;

/// An Ed25519 keypair and the address derived from it.
///
/// The address is `SHA3-256(public_key || 0x00)`. Accounts are immutable.
///
/// ```rust
/// use coin_emporium_sdk::Account;
///
/// let account = Account::generate();
/// assert_eq!(account.address(), account.public_key().to_address());
/// ```
#[derive(Clone)]
pub struct Account {
    private_key: Ed25519PrivateKey,
    public_key: Ed25519PublicKey,
    address: AccountAddress,
}

impl Account {
    /// Generates a new random account.
    pub fn generate() -> Self {
        Self::from_private_key(Ed25519PrivateKey::generate())
    }

    /// Creates an account from a private key.
    pub fn from_private_key(private_key: Ed25519PrivateKey) -> Self {
        let public_key = private_key.public_key();
        let address = public_key.to_address();
        Self {
            private_key,
            public_key,
            address,
        }
    }

    /// Creates an account from a 32-byte seed.
    pub fn from_seed(seed: &[u8]) -> EmporiumResult<Self> {
        Ok(Self::from_private_key(Ed25519PrivateKey::from_bytes(seed)?))
    }

    /// Creates an account from a hex-encoded private key.
    pub fn from_private_key_hex(hex_str: &str) -> EmporiumResult<Self> {
        Ok(Self::from_private_key(Ed25519PrivateKey::from_hex(hex_str)?))
    }

    /// Returns the account address.
    pub fn address(&self) -> AccountAddress {
        self.address
    }

    /// Returns the authentication key; identical to the address for a fresh account.
    pub fn auth_key(&self) -> String {
        self.address.to_hex()
    }

    /// Returns the public key.
    pub fn public_key(&self) -> &Ed25519PublicKey {
        &self.public_key
    }

    /// Returns a reference to the private key.
    pub fn private_key(&self) -> &Ed25519PrivateKey {
        &self.private_key
    }

    /// Signs a message with the account's private key.
    pub fn sign_message(&self, message: &[u8]) -> Ed25519Signature {
        self.private_key.sign(message)
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::sha3_256;

    #[test]
    fn test_address_derivation() {
        let account = Account::from_seed(&[1u8; 32]).unwrap();
        let mut preimage = account.public_key().to_bytes().to_vec();
        preimage.push(0x00);
        assert_eq!(account.address().as_bytes(), sha3_256(&preimage));
        assert_eq!(account.auth_key(), account.address().to_hex());
    }

    #[test]
    fn test_from_hex_matches_seed() {
        let seed = [9u8; 32];
        let a = Account::from_seed(&seed).unwrap();
        let b = Account::from_private_key_hex(&hex::encode(seed)).unwrap();
        assert_eq!(a.address(), b.address());
    }

    #[test]
    fn test_debug_hides_private_key() {
        let account = Account::from_seed(&[3u8; 32]).unwrap();
        let debug = format!("{account:?}");
        assert!(!debug.contains(&hex::encode([3u8; 32])));
        assert!(debug.contains("address"));
    }

    #[test]
    fn test_generated_accounts_differ() {
        assert_ne!(Account::generate().address(), Account::generate().address());
    }
}
