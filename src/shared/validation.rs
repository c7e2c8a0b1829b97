use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for record identifiers accepted in URL paths
    /// Backend ids are UUIDs or short opaque tokens
    /// - Valid: "8f14e45f-ceea-467f-a0e6-1f2b3c4d5e6f", "abc_123"
    /// - Invalid: "", "../items", "a b", "id?x=1"
    pub static ref RECORD_ID_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_-]{1,64}$").unwrap();
}

/// Whether `id` can be safely forwarded to the record store
pub fn is_valid_record_id(id: &str) -> bool {
    RECORD_ID_REGEX.is_match(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_valid() {
        assert!(is_valid_record_id("8f14e45f-ceea-467f-a0e6-1f2b3c4d5e6f"));
        assert!(is_valid_record_id("abc_123"));
        assert!(is_valid_record_id("A"));
    }

    #[test]
    fn test_record_id_invalid() {
        assert!(!is_valid_record_id("")); // empty
        assert!(!is_valid_record_id("../items")); // path traversal
        assert!(!is_valid_record_id("a b")); // space
        assert!(!is_valid_record_id("id?x=1")); // query injection
        assert!(!is_valid_record_id(&"a".repeat(65))); // too long
    }
}
