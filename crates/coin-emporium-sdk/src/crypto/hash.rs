//! SHA3-256 helpers.

use sha3::{Digest, Sha3_256};

/// Computes the SHA3-256 hash of the input.
///
/// ```rust
/// use coin_emporium_sdk::crypto::sha3_256;
///
/// assert_eq!(sha3_256(b"hello world").len(), 32);
/// ```
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    sha3_256_of([data])
}

/// Computes the SHA3-256 hash of several byte slices fed in order.
pub fn sha3_256_of<I, T>(items: I) -> [u8; 32]
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut hasher = Sha3_256::new();
    for item in items {
        hasher.update(item.as_ref());
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_vector() {
        assert_eq!(
            hex::encode(sha3_256(b"")),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn test_concatenation_matches_single_buffer() {
        assert_eq!(sha3_256_of([b"ab".as_slice(), b"cd".as_slice()]), sha3_256(b"abcd"));
    }
}
