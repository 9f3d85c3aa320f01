//! Strong entity tags for in-memory bodies.

use base64ct::{Base64, Encoding};
use sha1::{Digest, Sha1};

/// Computes a strong `ETag` for `entity`.
///
/// Format: `"<length in hex>-<first 27 chars of base64(sha1(entity))>"`, the
/// quoted form used verbatim as the header value.
pub fn generate(entity: &[u8]) -> String {
    let digest = Sha1::digest(entity);
    let encoded = Base64::encode_string(&digest);
    // 27 chars drop the single `=` of padding a 20-byte digest encodes to.
    let hash = encoded.get(..27).unwrap_or(encoded.as_str());
    format!("\"{:x}-{hash}\"", entity.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_entity() {
        assert_eq!(generate(b""), "\"0-2jmj7l5rSw0yVb/vlWAYkK/YBwk\"");
    }

    #[test]
    fn length_is_hex() {
        assert_eq!(generate(b"hello world"), "\"b-Kq5sNclPz7QV2+lfQIuc6R7oRu0\"");
    }

    #[test]
    fn different_content_different_tag() {
        assert_ne!(generate(b"a"), generate(b"b"));
        assert_eq!(generate(b"same"), generate(b"same"));
    }
}
