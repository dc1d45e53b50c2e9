//! # Seeded Generators
//!
//! The two pseudo-random generator families the world generator is built on.
//!
//! - [`JavaRandom`]: the legacy 48-bit linear congruential generator. Drives
//!   structure placement and structure variants.
//! - [`Xoroshiro`]: the two-word xoroshiro128++ mixer. Seeds every noise
//!   field.
//!
//! ## Ownership
//!
//! Both generators are small `Copy` values. A draw sequence is threaded
//! through one call chain by `&mut`; independent chains copy or construct
//! their own generator. Nothing is shared, so parallel fan-out needs no
//! locking.

use seedmap_shared::math::{add64, mul64, rotl64, u64_to_i32};

const LCG_MULTIPLIER: u64 = 0x5_DEEC_E66D;
const LCG_ADDEND: u64 = 0xB;
const LCG_MASK: u64 = (1 << 48) - 1;

/// Legacy 48-bit linear congruential generator.
///
/// `state' = (state * 0x5DEECE66D + 0xB) mod 2^48`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JavaRandom {
    state: u64,
}

impl JavaRandom {
    /// Creates a generator seeded with `seed` (scrambled like `setSeed`).
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            state: (seed ^ LCG_MULTIPLIER) & LCG_MASK,
        }
    }

    /// Wraps an already scrambled 48-bit state.
    #[inline]
    #[must_use]
    pub const fn from_state(state: u64) -> Self {
        Self {
            state: state & LCG_MASK,
        }
    }

    /// The current 48-bit state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> u64 {
        self.state
    }

    /// Re-seeds in place.
    #[inline]
    pub fn set_seed(&mut self, seed: u64) {
        self.state = (seed ^ LCG_MULTIPLIER) & LCG_MASK;
    }

    /// Advances the state and returns its top `bits` bits, read as signed.
    #[inline]
    pub fn next_bits(&mut self, bits: u32) -> i32 {
        self.state = add64(mul64(self.state, LCG_MULTIPLIER), LCG_ADDEND) & LCG_MASK;
        u64_to_i32(self.state >> (48 - bits))
    }

    /// Uniform value in `[0, bound)`.
    ///
    /// Powers of two take the top bits directly; other bounds reject draws
    /// from the biased tail with the generator's exact overflow test.
    ///
    /// # Panics
    ///
    /// Debug builds panic when `bound <= 0`.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub fn next_int(&mut self, bound: i32) -> i32 {
        debug_assert!(bound > 0, "next_int bound must be positive");
        if bound & (bound - 1) == 0 {
            let bits = i64::from(self.next_bits(31));
            return ((i64::from(bound) * bits) >> 31) as i32;
        }
        loop {
            let bits = self.next_bits(31);
            let value = bits % bound;
            if bits.wrapping_sub(value).wrapping_add(bound - 1) >= 0 {
                return value;
            }
        }
    }

    /// Two consecutive 32-bit draws joined into one signed 64-bit value.
    #[inline]
    pub fn next_long(&mut self) -> i64 {
        let high = i64::from(self.next_bits(32));
        let low = i64::from(self.next_bits(32));
        (high << 32).wrapping_add(low)
    }

    /// Uniform value in `[0, 1)` with 24 bits of precision.
    #[inline]
    #[allow(clippy::cast_precision_loss)]
    pub fn next_float(&mut self) -> f32 {
        self.next_bits(24) as f32 / (1u32 << 24) as f32
    }
}

const XOROSHIRO_GOLDEN: u64 = 0x9E37_79B9_7F4A_7C15;
const XOROSHIRO_SILVER: u64 = 0x6A09_E667_F3BC_C909;

/// SplitMix-style avalanche used to expand a seed into two words.
#[inline]
const fn mix64(mut v: u64) -> u64 {
    v = mul64(v ^ (v >> 30), 0xBF58_476D_1CE4_E5B9);
    v = mul64(v ^ (v >> 27), 0x94D0_49BB_1331_11EB);
    v ^ (v >> 31)
}

/// Two-word xoroshiro128++ generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Xoroshiro {
    low: u64,
    high: u64,
}

impl Xoroshiro {
    /// Creates a generator from a 64-bit seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        let low = seed ^ XOROSHIRO_SILVER;
        let high = add64(low, XOROSHIRO_GOLDEN);
        Self {
            low: mix64(low),
            high: mix64(high),
        }
    }

    /// Creates a generator from two raw state words.
    #[inline]
    #[must_use]
    pub const fn from_parts(low: u64, high: u64) -> Self {
        Self { low, high }
    }

    /// The raw `(low, high)` state.
    #[inline]
    #[must_use]
    pub const fn parts(&self) -> (u64, u64) {
        (self.low, self.high)
    }

    /// Next 64-bit output.
    #[inline]
    pub fn next_long(&mut self) -> u64 {
        let low = self.low;
        let high = self.high;
        let out = add64(rotl64(add64(low, high), 17), low);
        let cross = high ^ low;
        self.low = rotl64(low, 49) ^ cross ^ (cross << 21);
        self.high = rotl64(cross, 28);
        out
    }

    /// Uniform value in `[0, bound)` from the low 32 bits of each draw.
    ///
    /// # Panics
    ///
    /// Debug builds panic when `bound == 0`.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub fn next_int(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0, "next_int bound must be positive");
        let bound64 = u64::from(bound);
        let mut product = (self.next_long() & 0xFFFF_FFFF) * bound64;
        if (product as u32) < bound {
            let threshold = bound.wrapping_neg() % bound;
            while (product as u32) < threshold {
                product = (self.next_long() & 0xFFFF_FFFF) * bound64;
            }
        }
        (product >> 32) as u32
    }

    /// Uniform value in `[0, 1)` from the top 53 bits of a draw.
    #[inline]
    #[allow(clippy::cast_precision_loss)]
    pub fn next_double(&mut self) -> f64 {
        (self.next_long() >> 11) as f64 * 1.110_223_024_625_156_5e-16
    }
}
