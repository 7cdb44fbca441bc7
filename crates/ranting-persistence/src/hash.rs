//! Content hashing for external change detection.

use sha2::{Digest, Sha256};

/// SHA-256 of a stored value, hex encoded.
pub fn content_hash(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash() {
        // Known SHA-256 hash for "Hello, World!"
        assert_eq!(
            content_hash("Hello, World!"),
            "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
        );
    }

    #[test]
    fn test_hash_differs_on_change() {
        assert_ne!(content_hash("[]"), content_hash("[ ]"));
    }
}
