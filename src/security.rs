use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Hex-encoded SHA-256 digest of the given bytes (lowercase, 64 chars)
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Constant-time string comparison to prevent timing attacks
/// Use this for comparing stored digests against freshly computed ones
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Check that `bytes` hash to the hex digest recorded in `expected`
pub fn digest_matches(bytes: &[u8], expected: &str) -> bool {
    constant_time_compare(&sha256_hex(bytes), expected.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("secret123", "secret123"));
        assert!(!constant_time_compare("secret123", "secret124"));
        assert!(!constant_time_compare("secret123", "secret12"));
        assert!(!constant_time_compare("", "secret"));
    }

    #[test]
    fn test_sha256_hex_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha256_hex_is_lowercase_and_fixed_length() {
        let digest = sha256_hex(b"{\"language\":\"english\"}");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_digest_matches() {
        let bytes = b"{\"language\":\"french\"}";
        let digest = sha256_hex(bytes);
        assert!(digest_matches(bytes, &digest));
        assert!(digest_matches(bytes, &format!("{}\n", digest)));
        assert!(!digest_matches(b"{\"language\":\"german\"}", &digest));
        assert!(!digest_matches(bytes, ""));
    }
}
