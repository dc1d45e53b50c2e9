//! # Gradient Noise
//!
//! Improved Perlin noise and the two layered forms built from it.
//!
//! ## Layers
//!
//! - [`PerlinNoise`]: one 3D gradient lattice with a seeded permutation
//! - [`OctaveNoise`]: a sum of Perlin octaves at halving lacunarity
//! - [`DoublePerlinNoise`]: two octave sums, the second sampled at a
//!   `337/331` frequency ratio, used for each climate field
//!
//! ## Determinism Guarantee
//!
//! Every operation below is a fixed sequence of IEEE-754 double operations
//! in the same order as the game. Reordering a single addition changes
//! biome borders, so the arithmetic is written out long-hand on purpose.

use crate::rng::Xoroshiro;

/// Per-octave salt pairs, indexed by `12 + octave exponent`.
const OCTAVE_SALTS: [[u64; 2]; 13] = [
    [0xb198_de63_a801_2672, 0x7b84_cad4_3ef7_b5a8], // octave_-12
    [0x0fd7_87bf_bc40_3ec3, 0x74a4_a31c_a21b_48b8], // octave_-11
    [0x36d3_26ee_d40e_feb2, 0x5be9_ce18_223c_636a], // octave_-10
    [0x082f_e255_f8be_6631, 0x4e96_119e_22de_dc81], // octave_-9
    [0x0ef6_8ec6_8504_005e, 0x48b6_bf93_a278_9640], // octave_-8
    [0xf112_6812_8982_754f, 0x257a_1d67_0430_b0aa], // octave_-7
    [0xe51c_98ce_7d1d_e664, 0x5f94_78a7_3304_0c45], // octave_-6
    [0x6d7b_49e7_e429_850a, 0x2e30_63c6_22a2_4777], // octave_-5
    [0xbd90_d537_7ba1_b762, 0xc073_17d4_19a7_548d], // octave_-4
    [0x53d3_9c67_52da_c858, 0xbcd1_c5a8_0ab6_5b3e], // octave_-3
    [0xb4a2_4d7a_84e7_677b, 0x023f_f966_8e89_b5c4], // octave_-2
    [0xdffa_22b5_34c5_f608, 0xb9b6_7517_d366_5ca9], // octave_-1
    [0xd507_0808_6cef_4d7c, 0x6e16_51ec_c7f4_3309], // octave_0
];

/// Starting lacunarity `2^omin`, indexed by `-omin`.
const LACUNARITY: [f64; 13] = [
    1.0,
    0.5,
    0.25,
    1.0 / 8.0,
    1.0 / 16.0,
    1.0 / 32.0,
    1.0 / 64.0,
    1.0 / 128.0,
    1.0 / 256.0,
    1.0 / 512.0,
    1.0 / 1024.0,
    1.0 / 2048.0,
    1.0 / 4096.0,
];

/// Starting persistence `2^(n-1) / (2^n - 1)`, indexed by octave count.
const PERSISTENCE: [f64; 10] = [
    0.0,
    1.0,
    2.0 / 3.0,
    4.0 / 7.0,
    8.0 / 15.0,
    16.0 / 31.0,
    32.0 / 63.0,
    64.0 / 127.0,
    128.0 / 255.0,
    256.0 / 511.0,
];

/// Double-noise amplitude `(5/3) * n / (n + 1)`, indexed by trimmed octave count.
const DOUBLE_AMPLITUDE: [f64; 10] = [
    0.0,
    5.0 / 6.0,
    10.0 / 9.0,
    15.0 / 12.0,
    20.0 / 15.0,
    25.0 / 18.0,
    30.0 / 21.0,
    35.0 / 24.0,
    40.0 / 27.0,
    45.0 / 30.0,
];

/// Second-half frequency ratio of double Perlin noise.
const DOUBLE_FACTOR: f64 = 337.0 / 331.0;

/// One octave of 3D improved Perlin noise.
#[derive(Clone, Debug)]
pub struct PerlinNoise {
    /// Fractional origin offset, each component in `[0, 256)`
    pub origin: [f64; 3],
    /// Output multiplier applied by the octave sum
    pub amplitude: f64,
    /// Input multiplier applied by the octave sum
    pub lacunarity: f64,
    permutation: [u8; 512],
}

impl PerlinNoise {
    /// Builds a lattice from three origin draws and a seeded shuffle.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(rng: &mut Xoroshiro) -> Self {
        let origin = [
            rng.next_double() * 256.0,
            rng.next_double() * 256.0,
            rng.next_double() * 256.0,
        ];

        let mut permutation = [0u8; 512];
        for (i, slot) in permutation.iter_mut().take(256).enumerate() {
            *slot = i as u8;
        }
        for i in 0..256u32 {
            let j = rng.next_int(256 - i) + i;
            permutation.swap(i as usize, j as usize);
        }
        permutation.copy_within(0..256, 256);

        Self {
            origin,
            amplitude: 1.0,
            lacunarity: 1.0,
            permutation,
        }
    }

    /// Samples the lattice at `(x, y, z)`, roughly in `[-1, 1]`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::many_single_char_names)]
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let mut d1 = x + self.origin[0];
        let mut d2 = y + self.origin[1];
        let mut d3 = z + self.origin[2];
        let f1 = d1.floor();
        let f2 = d2.floor();
        let f3 = d3.floor();
        d1 -= f1;
        d2 -= f2;
        d3 -= f3;
        let t1 = fade(d1);
        let t2 = fade(d2);
        let t3 = fade(d3);

        let i1 = (f1 as i32 & 0xFF) as usize;
        let i2 = (f2 as i32 & 0xFF) as usize;
        let i3 = (f3 as i32 & 0xFF) as usize;

        let p = &self.permutation;
        let a1 = p[i1] as usize + i2;
        let b1 = p[i1 + 1] as usize + i2;
        let a2 = p[a1] as usize + i3;
        let b2 = p[b1] as usize + i3;
        let a3 = p[a1 + 1] as usize + i3;
        let b3 = p[b1 + 1] as usize + i3;

        let mut l1 = grad(p[a2], d1, d2, d3);
        let l2 = grad(p[b2], d1 - 1.0, d2, d3);
        let mut l3 = grad(p[a3], d1, d2 - 1.0, d3);
        let l4 = grad(p[b3], d1 - 1.0, d2 - 1.0, d3);
        let mut l5 = grad(p[a2 + 1], d1, d2, d3 - 1.0);
        let l6 = grad(p[b2 + 1], d1 - 1.0, d2, d3 - 1.0);
        let mut l7 = grad(p[a3 + 1], d1, d2 - 1.0, d3 - 1.0);
        let l8 = grad(p[b3 + 1], d1 - 1.0, d2 - 1.0, d3 - 1.0);

        l1 = lerp(t1, l1, l2);
        l3 = lerp(t1, l3, l4);
        l5 = lerp(t1, l5, l6);
        l7 = lerp(t1, l7, l8);

        l1 = lerp(t2, l1, l3);
        l5 = lerp(t2, l5, l7);

        lerp(t3, l1, l5)
    }
}

/// Quintic fade curve `t^3 (t (6t - 15) + 10)`.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Gradient dot product for one lattice corner.
///
/// Cases 12 to 15 repeat earlier cases instead of continuing the pattern.
/// The game uses exactly this table.
#[inline]
fn grad(hash: u8, a: f64, b: f64, c: f64) -> f64 {
    match hash & 0xF {
        0 | 12 => a + b,
        1 | 14 => -a + b,
        2 => a - b,
        3 => -a - b,
        4 => a + c,
        5 => -a + c,
        6 => a - c,
        7 => -a - c,
        8 => b + c,
        9 | 13 => -b + c,
        10 => b - c,
        _ => -b - c,
    }
}

/// A sum of Perlin octaves.
#[derive(Clone, Debug)]
pub struct OctaveNoise {
    octaves: Vec<PerlinNoise>,
}

impl OctaveNoise {
    /// Builds the octaves for an amplitude table starting at exponent `omin`.
    ///
    /// # Arguments
    ///
    /// * `rng` - Source of the two seed words every octave salt is mixed into
    /// * `amplitudes` - Per-octave amplitude; zero entries allocate nothing
    /// * `omin` - Exponent of the first octave, in `-12..=0`
    /// * `max_octaves` - Stop after this many active octaves (`None` = all)
    ///
    /// # Panics
    ///
    /// Panics if `omin` or the table length fall outside the salt tables.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn new(
        rng: &mut Xoroshiro,
        amplitudes: &[f64],
        omin: i32,
        max_octaves: Option<usize>,
    ) -> Self {
        assert!(
            (-12..=0).contains(&omin)
                && amplitudes.len() < PERSISTENCE.len()
                && (12 + omin) as usize + amplitudes.len() <= OCTAVE_SALTS.len(),
            "octave table out of range: omin {omin}, {} amplitudes",
            amplitudes.len()
        );
        let limit = max_octaves.unwrap_or(usize::MAX);
        let mut lacunarity = LACUNARITY[(-omin) as usize];
        let mut persistence = PERSISTENCE[amplitudes.len()];
        let low = rng.next_long();
        let high = rng.next_long();

        let mut octaves = Vec::with_capacity(amplitudes.len());
        for (i, &amplitude) in amplitudes.iter().enumerate() {
            if octaves.len() == limit {
                break;
            }
            if amplitude != 0.0 {
                let salt = OCTAVE_SALTS[(12 + omin) as usize + i];
                let mut octave_rng = Xoroshiro::from_parts(low ^ salt[0], high ^ salt[1]);
                let mut octave = PerlinNoise::new(&mut octave_rng);
                octave.amplitude = amplitude * persistence;
                octave.lacunarity = lacunarity;
                octaves.push(octave);
            }
            lacunarity *= 2.0;
            persistence *= 0.5;
        }
        Self { octaves }
    }

    /// Number of allocated octaves.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.octaves.len()
    }

    /// True when every amplitude was zero.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.octaves.is_empty()
    }

    /// Sums `amplitude * perlin(coords * lacunarity)` over all octaves.
    #[must_use]
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let mut value = 0.0;
        for octave in &self.octaves {
            let lf = octave.lacunarity;
            value += octave.amplitude * octave.sample(x * lf, y * lf, z * lf);
        }
        value
    }
}

/// Two octave sums at a fixed frequency ratio.
#[derive(Clone, Debug)]
pub struct DoublePerlinNoise {
    first: OctaveNoise,
    second: OctaveNoise,
    amplitude: f64,
}

impl DoublePerlinNoise {
    /// Builds both halves from one generator.
    ///
    /// A requested octave budget is split with the larger half first.
    #[must_use]
    pub fn new(
        rng: &mut Xoroshiro,
        amplitudes: &[f64],
        omin: i32,
        max_octaves: Option<usize>,
    ) -> Self {
        let (first_max, second_max) = match max_octaves {
            Some(total) => {
                let first = (total + 1) >> 1;
                (Some(first), Some(total - first))
            }
            None => (None, None),
        };
        let first = OctaveNoise::new(rng, amplitudes, omin, first_max);
        let second = OctaveNoise::new(rng, amplitudes, omin, second_max);

        let end = amplitudes
            .iter()
            .rposition(|&a| a != 0.0)
            .map_or(0, |last| last + 1);
        let start = amplitudes[..end]
            .iter()
            .position(|&a| a != 0.0)
            .unwrap_or(end);

        Self {
            first,
            second,
            amplitude: DOUBLE_AMPLITUDE[end - start],
        }
    }

    /// Output multiplier derived from the trimmed octave count.
    #[inline]
    #[must_use]
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Active octaves in each half.
    #[inline]
    #[must_use]
    pub fn octave_counts(&self) -> (usize, usize) {
        (self.first.len(), self.second.len())
    }

    /// Samples both halves and scales the sum.
    #[must_use]
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let value = self.first.sample(x, y, z)
            + self
                .second
                .sample(x * DOUBLE_FACTOR, y * DOUBLE_FACTOR, z * DOUBLE_FACTOR);
        value * self.amplitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perlin_init_reference() {
        let noise = PerlinNoise::new(&mut Xoroshiro::new(0));
        assert_eq!(noise.origin[0], 42.174_385_605_015_516);
        assert_eq!(noise.origin[1], 204.734_906_624_674_98);
        assert_eq!(noise.origin[2], 64.306_224_355_231_02);
        assert_eq!(&noise.permutation[..8], &[79, 225, 253, 23, 87, 169, 96, 152]);
        assert_eq!(&noise.permutation[..256], &noise.permutation[256..], "table is doubled");
    }

    #[test]
    fn test_perlin_is_a_permutation() {
        let noise = PerlinNoise::new(&mut Xoroshiro::new(99));
        let mut seen = [false; 256];
        for &v in &noise.permutation[..256] {
            assert!(!seen[v as usize], "value {v} appears twice");
            seen[v as usize] = true;
        }
    }

    #[test]
    fn test_perlin_sample_reference() {
        let noise = PerlinNoise::new(&mut Xoroshiro::new(0));
        assert_eq!(noise.sample(0.5, 1.25, -3.75), -0.559_047_778_691_475_8);
        assert_eq!(noise.sample(100.1, -7.3, 12.9), 0.135_912_776_497_785_44);
    }

    #[test]
    fn test_gradient_duplicates() {
        assert_eq!(grad(12, 1.0, 2.0, 3.0), grad(0, 1.0, 2.0, 3.0));
        assert_eq!(grad(14, 1.0, 2.0, 3.0), grad(1, 1.0, 2.0, 3.0));
        assert_eq!(grad(13, 1.0, 2.0, 3.0), grad(9, 1.0, 2.0, 3.0));
        assert_eq!(grad(15, 1.0, 2.0, 3.0), grad(11, 1.0, 2.0, 3.0));
    }

    #[test]
    fn test_octave_skips_zero_amplitudes() {
        let mut rng = Xoroshiro::new(42);
        let noise = OctaveNoise::new(&mut rng, &[1.0, 1.0, 2.0, 2.0, 2.0, 1.0, 1.0, 1.0, 1.0], -9, None);
        assert_eq!(noise.len(), 9);
        assert_eq!(noise.sample(12.0, 0.0, -34.0), 0.093_746_143_549_916);

        let sparse = OctaveNoise::new(&mut Xoroshiro::new(42), &[1.5, 0.0, 1.0, 0.0], -10, None);
        assert_eq!(sparse.len(), 2, "zero amplitudes allocate no octave");
        assert!(OctaveNoise::new(&mut Xoroshiro::new(1), &[0.0], 0, None).is_empty());
    }

    #[test]
    fn test_double_perlin_reference() {
        let mut rng = Xoroshiro::new(42);
        let noise = DoublePerlinNoise::new(&mut rng, &[1.5, 0.0, 1.0, 0.0, 0.0, 0.0], -10, None);
        assert_eq!(noise.octave_counts(), (2, 2));
        assert_eq!(noise.amplitude(), 1.25, "trailing zeros are trimmed");
        assert_eq!(noise.sample(100.0, 0.0, -200.0), 0.281_369_024_460_419_5);
    }

    #[test]
    fn test_double_perlin_splits_budget() {
        let mut rng = Xoroshiro::new(42);
        let noise = DoublePerlinNoise::new(&mut rng, &[1.0, 1.0, 1.0, 0.0], -3, Some(3));
        assert_eq!(noise.octave_counts(), (2, 1), "larger half first");
        assert_eq!(noise.amplitude(), 1.25);
    }
}
