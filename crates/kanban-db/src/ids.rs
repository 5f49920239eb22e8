//! Short, URL-safe identifiers for cards, comments and seeded entities.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// 72 bits of entropy, encoding to exactly 12 characters.
const ID_BYTES: usize = 9;

pub fn generate() -> String {
    let bytes: [u8; ID_BYTES] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_url_safe() {
        let id = generate();
        assert_eq!(id.len(), 12);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_ids_do_not_repeat() {
        let ids: HashSet<String> = (0..10_000).map(|_| generate()).collect();
        assert_eq!(ids.len(), 10_000);
    }
}
