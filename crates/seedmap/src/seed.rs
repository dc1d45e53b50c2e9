//! # Seed Parsing
//!
//! Turns the text a user typed into a world seed the way the game's world
//! creation screen does: a number is used as-is, anything else is hashed
//! with `String.hashCode` and sign-extended.

use crate::error::{SeedMapError, SeedMapResult};

/// Parses seed text.
///
/// Accepts signed and unsigned 64-bit integers; unsigned values above
/// `i64::MAX` keep their bit pattern. Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`SeedMapError::EmptySeed`] for blank text.
#[allow(clippy::cast_sign_loss)]
pub fn parse_seed(text: &str) -> SeedMapResult<u64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(SeedMapError::EmptySeed);
    }
    if let Ok(seed) = text.parse::<i64>() {
        return Ok(seed as u64);
    }
    if let Ok(seed) = text.parse::<u64>() {
        return Ok(seed);
    }
    Ok(i64::from(java_string_hash(text)) as u64)
}

/// `String.hashCode`: `h = 31 * h + c` over UTF-16 code units, wrapping.
#[must_use]
pub fn java_string_hash(text: &str) -> i32 {
    text.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

#[cfg(test)]
#[allow(clippy::cast_sign_loss)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_seeds() {
        assert_eq!(parse_seed("12370816993565").unwrap(), 12_370_816_993_565);
        assert_eq!(parse_seed(" -1 ").unwrap(), u64::MAX);
        assert_eq!(parse_seed("18446744073709551615").unwrap(), u64::MAX);
        assert_eq!(parse_seed("+42").unwrap(), 42);
    }

    #[test]
    fn test_text_seeds_use_string_hash() {
        assert_eq!(java_string_hash("hello"), 99_162_322);
        assert_eq!(java_string_hash("Hello World"), -862_545_276);
        assert_eq!(java_string_hash("Glacier"), 1_772_835_215);
        assert_eq!(parse_seed("minecraft").unwrap(), 695_073_197);
        assert_eq!(parse_seed("Hello World").unwrap(), (-862_545_276i64) as u64);
    }

    #[test]
    fn test_number_too_large_for_u64_is_text() {
        let text = "99999999999999999999";
        assert_eq!(
            parse_seed(text).unwrap(),
            i64::from(java_string_hash(text)) as u64
        );
    }

    #[test]
    fn test_empty_seed() {
        assert!(matches!(parse_seed("   "), Err(SeedMapError::EmptySeed)));
    }
}
