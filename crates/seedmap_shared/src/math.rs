//! Fixed-width modular arithmetic.
//!
//! Every generator in the engine is defined over two's-complement 64- and
//! 32-bit integers that wrap silently. These helpers spell that contract out
//! once so the call sites read like the reference formulas: `mul64(a, b)` is
//! always `a * b mod 2^64`, never a panic in debug builds.
//!
//! All functions are `const` and branch-free apart from the shift guards.

/// `a + b mod 2^64`
#[inline]
#[must_use]
pub const fn add64(a: u64, b: u64) -> u64 {
    a.wrapping_add(b)
}

/// `a - b mod 2^64`
#[inline]
#[must_use]
pub const fn sub64(a: u64, b: u64) -> u64 {
    a.wrapping_sub(b)
}

/// `a * b mod 2^64`
#[inline]
#[must_use]
pub const fn mul64(a: u64, b: u64) -> u64 {
    a.wrapping_mul(b)
}

/// `a + b mod 2^32`
#[inline]
#[must_use]
pub const fn add32(a: u32, b: u32) -> u32 {
    a.wrapping_add(b)
}

/// `a - b mod 2^32`
#[inline]
#[must_use]
pub const fn sub32(a: u32, b: u32) -> u32 {
    a.wrapping_sub(b)
}

/// `a * b mod 2^32`
#[inline]
#[must_use]
pub const fn mul32(a: u32, b: u32) -> u32 {
    a.wrapping_mul(b)
}

/// Logical left shift. Shifting by 64 or more clears the value.
#[inline]
#[must_use]
pub const fn shl64(a: u64, n: u32) -> u64 {
    if n >= 64 {
        0
    } else {
        a << n
    }
}

/// Logical right shift. Shifting by 64 or more clears the value.
#[inline]
#[must_use]
pub const fn shr64(a: u64, n: u32) -> u64 {
    if n >= 64 {
        0
    } else {
        a >> n
    }
}

/// Rotate left within 64 bits.
#[inline]
#[must_use]
pub const fn rotl64(a: u64, n: u32) -> u64 {
    a.rotate_left(n)
}

/// Rotate right within 32 bits.
#[inline]
#[must_use]
pub const fn rotr32(a: u32, n: u32) -> u32 {
    a.rotate_right(n)
}

/// 64-bit exclusive or.
#[inline]
#[must_use]
pub const fn xor64(a: u64, b: u64) -> u64 {
    a ^ b
}

/// 64-bit inclusive or.
#[inline]
#[must_use]
pub const fn or64(a: u64, b: u64) -> u64 {
    a | b
}

/// 32-bit exclusive or.
#[inline]
#[must_use]
pub const fn xor32(a: u32, b: u32) -> u32 {
    a ^ b
}

/// 32-bit inclusive or.
#[inline]
#[must_use]
pub const fn or32(a: u32, b: u32) -> u32 {
    a | b
}

/// Reinterprets an unsigned 64-bit word as signed.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub const fn to_i64(a: u64) -> i64 {
    a as i64
}

/// Reinterprets a signed 64-bit word as unsigned.
#[inline]
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub const fn to_u64(a: i64) -> u64 {
    a as u64
}

/// Reinterprets an unsigned 32-bit word as signed.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub const fn to_i32(a: u32) -> i32 {
    a as i32
}

/// Reinterprets a signed 32-bit word as unsigned.
#[inline]
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub const fn to_u32(a: i32) -> u32 {
    a as u32
}

/// Keeps the low 32 bits of a 64-bit word and reads them as signed.
///
/// This is the `(int) someLong` narrowing of the reference generator.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const fn u64_to_i32(a: u64) -> i32 {
    a as u32 as i32
}

/// Reverses the byte order of a 32-bit word.
#[inline]
#[must_use]
pub const fn bswap32(a: u32) -> u32 {
    a.swap_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_add_sub_round_trip() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
        for _ in 0..10_000 {
            let a: u64 = rng.gen();
            let b: u64 = rng.gen();
            assert_eq!(add64(sub64(a, b), b), a, "add(sub(a, b), b) must be a");
            assert_eq!(sub64(add64(a, b), b), a, "sub(add(a, b), b) must be a");
        }
    }

    #[test]
    fn test_wraparound_vectors() {
        assert_eq!(add64(u64::MAX, 1), 0);
        assert_eq!(mul64(u64::MAX, 2), u64::MAX - 1);
        assert_eq!(mul64(424_242, 333_333), 141_413_858_586);
        assert_eq!(mul64(5, u64::MAX), u64::MAX - 4);
        assert_eq!(sub64(0, 1), u64::MAX);
        assert_eq!(add32(u32::MAX, 1), 0);
        assert_eq!(sub32(0, 1), u32::MAX);
        assert_eq!(mul32(u32::MAX, 2), u32::MAX - 1);
    }

    #[test]
    fn test_bitwise_vectors() {
        assert_eq!(xor64(123, 7_640_891_576_956_012_809), 7_640_891_576_956_012_914);
        assert_eq!(or64(0xF0, 0x0F), 0xFF);
        assert_eq!(xor32(0xFFFF_0000, 0x00FF_FF00), 0xFF00_FF00);
        assert_eq!(or32(1, 2), 3);
        assert_eq!(rotl64(0x8000_0000_0000_0001, 1), 3);
        assert_eq!(rotr32(1, 1), 0x8000_0000);
        assert_eq!(bswap32(0x1234_5678), 0x7856_3412);
    }

    #[test]
    fn test_shifts_clear_past_width() {
        assert_eq!(shl64(1, 63), 1 << 63);
        assert_eq!(shl64(1, 64), 0, "shifting out every bit leaves zero");
        assert_eq!(shr64(u64::MAX, 64), 0);
        assert_eq!(shr64(u64::MAX, 60), 0xF);
    }

    #[test]
    fn test_sign_reinterpretation() {
        assert_eq!(to_u64(-3), 18_446_744_073_709_551_613);
        assert_eq!(to_i64(18_446_744_073_709_551_613), -3);
        assert_eq!(to_u32(-1), u32::MAX);
        assert_eq!(to_i32(0x8000_0000), i32::MIN);
    }

    #[test]
    fn test_narrowing_keeps_low_word() {
        assert_eq!(u64_to_i32(18_446_744_073_709_550_800), -816);
        assert_eq!(u64_to_i32(to_u64(i64::MAX)), -1);
        assert_eq!(u64_to_i32(922_337_203_685_477_580), -858_993_460);
        assert_eq!(u64_to_i32(2_147_483_648), i32::MIN);
    }
}
