//! Cryptographic primitives: Ed25519 signing and SHA3-256 address derivation.

mod ed25519;
mod hash;

pub use ed25519::{
    Ed25519PrivateKey, Ed25519PublicKey, Ed25519Signature, ED25519_PRIVATE_KEY_LENGTH,
    ED25519_PUBLIC_KEY_LENGTH, ED25519_SIGNATURE_LENGTH,
};
pub use hash::{sha3_256, sha3_256_of};

use crate::types::AccountAddress;

/// Authentication scheme byte for single Ed25519 keys.
pub const ED25519_SCHEME: u8 = 0;

/// Derives an authentication key: `SHA3-256(public_key || scheme)`.
pub fn derive_authentication_key(public_key: &[u8], scheme: u8) -> [u8; 32] {
    sha3_256_of([public_key, [scheme].as_slice()])
}

/// Derives the account address, which equals the authentication key for a fresh account.
pub fn derive_address(public_key: &[u8], scheme: u8) -> AccountAddress {
    AccountAddress::new(derive_authentication_key(public_key, scheme))
}
