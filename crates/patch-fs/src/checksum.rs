//! SHA-256 checksums in the canonical `sha256:<hex>` form

use sha2::{Digest, Sha256};

const PREFIX: &str = "sha256:";

/// Compute the SHA-256 checksum of string content.
pub fn compute_content_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{}{:x}", PREFIX, hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_has_prefix_and_hex() {
        let sum = compute_content_checksum("hello");
        assert!(sum.starts_with("sha256:"));
        assert_eq!(sum.len(), PREFIX.len() + 64);
    }

    #[test]
    fn checksum_is_stable_and_content_sensitive() {
        assert_eq!(compute_content_checksum("a\n"), compute_content_checksum("a\n"));
        assert_ne!(compute_content_checksum("a\n"), compute_content_checksum("a\r\n"));
    }

    #[test]
    fn empty_content_checksum() {
        assert_eq!(
            compute_content_checksum(""),
            "sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
