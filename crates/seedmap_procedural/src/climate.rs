//! # Climate Noise
//!
//! The six double Perlin fields that drive overworld biome selection.
//!
//! ## Pipeline
//!
//! 1. Offset the horizontal position by the shift field (unless disabled)
//! 2. Sample continentalness, erosion and weirdness
//! 3. Fold weirdness into peaks-and-valleys and evaluate the offset spline
//! 4. Derive depth from the sample height and the spline offset
//! 5. Quantize all six climate parameters to fixed-point integers
//!
//! Every value is narrowed to single precision before quantization; this is
//! where the game drops precision, and the biome tree expects the result.

use crate::noise::DoublePerlinNoise;
use crate::rng::Xoroshiro;
use crate::spline::Spline;

/// The six noise fields built per seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoiseField {
    /// Temperature
    Temperature = 0,
    /// Humidity (vegetation)
    Humidity = 1,
    /// Continentalness
    Continentalness = 2,
    /// Erosion
    Erosion = 3,
    /// Horizontal coordinate shift applied before the other fields
    Shift = 4,
    /// Weirdness (ridges)
    Weirdness = 5,
}

impl NoiseField {
    /// All fields, in storage order.
    pub const ALL: [Self; 6] = [
        Self::Temperature,
        Self::Humidity,
        Self::Continentalness,
        Self::Erosion,
        Self::Shift,
        Self::Weirdness,
    ];

    /// `(amplitudes, first octave, salt low, salt high)` for this field.
    const fn parameters(self) -> (&'static [f64], i32, u64, u64) {
        match self {
            Self::Temperature => (
                &[1.5, 0.0, 1.0, 0.0, 0.0, 0.0],
                -10,
                0x5c7e_6b29_735f_0d7f,
                0xf7d8_6f1b_bc73_4988,
            ),
            Self::Humidity => (
                &[1.0, 1.0, 0.0, 0.0, 0.0, 0.0],
                -8,
                0x81bb_4d22_e8dc_168e,
                0xf1c8_b4be_a163_03cd,
            ),
            Self::Continentalness => (
                &[1.0, 1.0, 2.0, 2.0, 2.0, 1.0, 1.0, 1.0, 1.0],
                -9,
                0x8388_6c9d_0ae3_a662,
                0xafa6_38a6_1b42_e8ad,
            ),
            Self::Erosion => (
                &[1.0, 1.0, 0.0, 1.0, 1.0],
                -9,
                0xd024_91e6_058f_6fd8,
                0x4792_512c_94c1_7a80,
            ),
            Self::Shift => (
                &[1.0, 1.0, 1.0, 0.0],
                -3,
                0x0805_18cf_6af2_5384,
                0x3f3d_fb40_a54f_ebd5,
            ),
            Self::Weirdness => (
                &[1.0, 2.0, 1.0, 0.0, 0.0, 0.0],
                -7,
                0xefc8_ef4d_3610_2b34,
                0x1bee_eb32_4a0f_24ea,
            ),
        }
    }
}

/// The six quantized parameters a biome lookup classifies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClimateParameter {
    /// Temperature
    Temperature = 0,
    /// Humidity
    Humidity = 1,
    /// Continentalness
    Continentalness = 2,
    /// Erosion
    Erosion = 3,
    /// Depth below the terrain surface
    Depth = 4,
    /// Weirdness
    Weirdness = 5,
}

impl ClimateParameter {
    /// All parameters, in classification order.
    pub const ALL: [Self; 6] = [
        Self::Temperature,
        Self::Humidity,
        Self::Continentalness,
        Self::Erosion,
        Self::Depth,
        Self::Weirdness,
    ];

    /// The noise field sampled for this parameter; depth has none.
    #[must_use]
    pub const fn field(self) -> Option<NoiseField> {
        match self {
            Self::Temperature => Some(NoiseField::Temperature),
            Self::Humidity => Some(NoiseField::Humidity),
            Self::Continentalness => Some(NoiseField::Continentalness),
            Self::Erosion => Some(NoiseField::Erosion),
            Self::Depth => None,
            Self::Weirdness => Some(NoiseField::Weirdness),
        }
    }
}

/// Quantized climate at one position, ordered as [`ClimateParameter::ALL`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ClimatePoint(pub [i64; 6]);

impl ClimatePoint {
    /// One quantized parameter.
    #[inline]
    #[must_use]
    pub const fn get(&self, parameter: ClimateParameter) -> i64 {
        self.0[parameter as usize]
    }
}

/// Fixed-point quantization used by the parameter table and by sampling.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn quantize(value: f32) -> i64 {
    (10_000.0f32 * value) as i64
}

/// The per-seed climate noise fields.
#[derive(Clone, Debug)]
pub struct ClimateNoise {
    fields: [DoublePerlinNoise; 6],
}

impl ClimateNoise {
    /// Builds all six fields for `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut root = Xoroshiro::new(seed);
        let low = root.next_long();
        let high = root.next_long();
        let fields = NoiseField::ALL.map(|field| {
            let (amplitudes, omin, salt_low, salt_high) = field.parameters();
            let mut rng = Xoroshiro::from_parts(low ^ salt_low, high ^ salt_high);
            DoublePerlinNoise::new(&mut rng, amplitudes, omin, None)
        });
        Self { fields }
    }

    /// Direct access to one field.
    #[inline]
    #[must_use]
    pub fn field(&self, field: NoiseField) -> &DoublePerlinNoise {
        &self.fields[field as usize]
    }

    /// Raw double-precision sample of one field.
    #[inline]
    #[must_use]
    pub fn sample(&self, field: NoiseField, x: f64, y: f64, z: f64) -> f64 {
        self.field(field).sample(x, y, z)
    }

    /// Continentalness, erosion, weirdness and the biased spline offset.
    #[allow(clippy::cast_possible_truncation)]
    fn terrain(&self, spline: &Spline, x: f64, z: f64) -> [f32; 4] {
        let c = self.sample(NoiseField::Continentalness, x, 0.0, z) as f32;
        let e = self.sample(NoiseField::Erosion, x, 0.0, z) as f32;
        let w = self.sample(NoiseField::Weirdness, x, 0.0, z) as f32;
        let pv = -3.0 * ((w.abs() - 0.666_666_7).abs() - 0.333_333_34);
        let offset = spline.evaluate(&[c, e, pv]) + 0.015;
        [c, e, w, offset]
    }

    /// Samples the climate point at a 1:4 position.
    ///
    /// # Arguments
    ///
    /// * `spline` - The overworld offset spline
    /// * `x`, `y`, `z` - Position in 4-block cells
    /// * `apply_shift` - Offset the horizontal position by the shift field
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn sample_point(
        &self,
        spline: &Spline,
        x: i32,
        y: i32,
        z: i32,
        apply_shift: bool,
    ) -> ClimatePoint {
        let mut px = f64::from(x);
        let mut pz = f64::from(z);
        if apply_shift {
            let (fx, fz) = (f64::from(x), f64::from(z));
            px += self.sample(NoiseField::Shift, fx, 0.0, fz) * 4.0;
            pz += self.sample(NoiseField::Shift, fz, fx, 0.0) * 4.0;
        }

        let [c, e, w, offset] = self.terrain(spline, px, pz);
        let height = f64::from(y) * 4.0;
        let d = (1.0 - height / 128.0 - 83.0 / 160.0 + f64::from(offset)) as f32;
        let t = self.sample(NoiseField::Temperature, px, 0.0, pz) as f32;
        let h = self.sample(NoiseField::Humidity, px, 0.0, pz) as f32;

        ClimatePoint([t, h, c, e, d, w].map(quantize))
    }

    /// Terrain depth at the surface reference height, without shift.
    ///
    /// Values below `0.48` mean the terrain dips too low for large surface
    /// structures.
    #[must_use]
    pub fn depth(&self, spline: &Spline, x: f64, z: f64) -> f64 {
        let [_, _, _, offset] = self.terrain(spline, x, z);
        f64::from((1.0 - 83.0 / 160.0 + f64::from(offset)) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_truncates_toward_zero() {
        assert_eq!(quantize(0.123_45), 1234);
        assert_eq!(quantize(-0.123_45), -1234);
        assert_eq!(quantize(-1.0), -10_000);
    }

    #[test]
    fn test_field_reference() {
        let climate = ClimateNoise::new(0);
        assert_eq!(climate.sample(NoiseField::Temperature, 5.0, 0.0, 7.0), 0.133_259_429_369_027_6);
        assert_eq!(climate.sample(NoiseField::Shift, 5.0, 0.0, 7.0), -0.145_805_260_184_158_32);
    }

    #[test]
    fn test_climate_point_reference() {
        let climate = ClimateNoise::new(0);
        let spline = Spline::overworld_offset();
        assert_eq!(
            climate.sample_point(&spline, 0, 16, 0, true),
            ClimatePoint([1182, -13, -81, -1039, -881, 111])
        );
        assert_eq!(
            climate.sample_point(&spline, -100, 0, 250, false),
            ClimatePoint([2849, 1502, 708, 1527, 5641, -5477])
        );
        assert_eq!(
            climate.sample_point(&spline, 1234, -10, -5678, true),
            ClimatePoint([-3545, -4135, -3363, 3228, 6887, -4659])
        );
    }

    #[test]
    fn test_depth_reference() {
        let climate = ClimateNoise::new(0);
        let spline = Spline::overworld_offset();
        assert_eq!(climate.depth(&spline, 10.0, -20.0), 0.731_803_774_833_679_2);
        assert_eq!(climate.depth(&spline, 0.25, 0.5), 0.434_460_222_721_099_85);
    }

    #[test]
    fn test_parameter_fields() {
        assert_eq!(ClimateParameter::Depth.field(), None);
        assert_eq!(ClimateParameter::Weirdness.field(), Some(NoiseField::Weirdness));
        let point = ClimatePoint([1, 2, 3, 4, 5, 6]);
        assert_eq!(point.get(ClimateParameter::Erosion), 4);
    }
}
