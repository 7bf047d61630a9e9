//! Short code generation utilities.
//!
//! Codes are drawn from a fixed 62-symbol alphanumeric alphabet. The code is
//! the only thing standing between a link and a stranger guessing it, so the
//! source is the thread-local CSPRNG rather than a seeded fast RNG.

use rand::Rng;

/// Symbols a short code may contain.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of freshly generated codes.
pub const DEFAULT_CODE_LENGTH: usize = 7;

/// Generates a random code of `length` symbols from [`ALPHABET`].
///
/// # Examples
///
/// ```
/// use linkmeter::utils::code_generator::generate_code;
///
/// let code = generate_code(7);
/// assert_eq!(code.len(), 7);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Strips everything outside [`ALPHABET`] from a user-supplied code.
///
/// This is a filter, not a validation: `"abc-123!"` becomes `"abc123"`, and a
/// result that is empty or too short simply fails the subsequent lookup.
pub fn sanitize_code(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_alphabet_has_62_unique_symbols() {
        let unique: HashSet<&u8> = ALPHABET.iter().collect();
        assert_eq!(ALPHABET.len(), 62);
        assert_eq!(unique.len(), 62);
    }

    #[test]
    fn test_generate_code_has_requested_length() {
        assert_eq!(generate_code(DEFAULT_CODE_LENGTH).len(), 7);
        assert_eq!(generate_code(8).len(), 8);
        assert_eq!(generate_code(0), "");
    }

    #[test]
    fn test_generate_code_alphanumeric_only() {
        for _ in 0..100 {
            let code = generate_code(DEFAULT_CODE_LENGTH);
            assert!(code.bytes().all(|b| ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let codes: HashSet<String> = (0..1000)
            .map(|_| generate_code(DEFAULT_CODE_LENGTH))
            .collect();

        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_sanitize_strips_invalid_characters() {
        assert_eq!(sanitize_code("abc-123!"), "abc123");
        assert_eq!(sanitize_code("  AbC1234 "), "AbC1234");
        assert_eq!(sanitize_code("../etc"), "etc");
    }

    #[test]
    fn test_sanitize_can_yield_empty() {
        assert_eq!(sanitize_code("-_-/"), "");
        assert_eq!(sanitize_code("ключ"), "");
    }
}
