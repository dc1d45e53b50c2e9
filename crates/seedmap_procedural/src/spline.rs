//! # Terrain Splines
//!
//! Piecewise cubic Hermite splines over climate values.
//!
//! The overworld terrain offset is a tree of splines: the root varies over
//! continentalness, its children over erosion, their children over peaks and
//! valleys. The tree is built once per [`World`](crate::World) from literal
//! control points and evaluated in single precision, exactly as the game does.
//!
//! Each node owns its children. Where the game reuses one sub-spline at two
//! locations, the tree holds two identical copies.

/// Which climate value a spline node varies over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SplineAxis {
    /// Continentalness noise
    Continentalness = 0,
    /// Erosion noise
    Erosion = 1,
    /// Peaks and valleys, folded from weirdness
    PeaksAndValleys = 2,
}

/// Maximum control points per node.
pub const MAX_SPLINE_POINTS: usize = 12;

/// A spline node: a constant or a set of control points over one axis.
#[derive(Clone, Debug, PartialEq)]
pub enum Spline {
    /// Constant value
    Fixed(f32),
    /// Control points over one axis
    Multi(MultiSpline),
}

/// Control points of a compound spline node.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiSpline {
    axis: SplineAxis,
    points: Vec<SplinePoint>,
}

#[derive(Clone, Debug, PartialEq)]
struct SplinePoint {
    location: f32,
    value: Spline,
    derivative: f32,
}

impl MultiSpline {
    /// Starts an empty node over `axis`.
    #[must_use]
    pub fn new(axis: SplineAxis) -> Self {
        Self {
            axis,
            points: Vec::with_capacity(MAX_SPLINE_POINTS),
        }
    }

    /// Appends a control point.
    ///
    /// # Panics
    ///
    /// Panics if the node is full or `location` does not increase strictly.
    #[must_use]
    pub fn point(mut self, location: f32, value: Spline, derivative: f32) -> Self {
        assert!(
            self.points.len() < MAX_SPLINE_POINTS,
            "spline node over {:?} exceeds {MAX_SPLINE_POINTS} points",
            self.axis
        );
        if let Some(last) = self.points.last() {
            assert!(
                location > last.location,
                "spline locations must increase: {location} after {}",
                last.location
            );
        }
        self.points.push(SplinePoint {
            location,
            value,
            derivative,
        });
        self
    }

    /// Finishes the node.
    ///
    /// # Panics
    ///
    /// Panics if no control point was added.
    #[must_use]
    pub fn build(self) -> Spline {
        assert!(!self.points.is_empty(), "spline node over {:?} has no points", self.axis);
        Spline::Multi(self)
    }
}

impl Spline {
    /// Evaluates the spline for `[continentalness, erosion, peaks_and_valleys]`.
    ///
    /// Outside the control points the nearest point is extended linearly
    /// along its derivative; between two points the value is the Hermite
    /// blend of their (recursively evaluated) values and derivatives.
    #[must_use]
    pub fn evaluate(&self, input: &[f32; 3]) -> f32 {
        let node = match self {
            Self::Fixed(value) => return *value,
            Self::Multi(node) => node,
        };
        let f = input[node.axis as usize];
        let points = &node.points;
        let i = points
            .iter()
            .position(|p| p.location >= f)
            .unwrap_or(points.len());

        if i == 0 || i == points.len() {
            let edge = &points[if i == 0 { 0 } else { i - 1 }];
            let value = edge.value.evaluate(input);
            return value + edge.derivative * (f - edge.location);
        }

        let lo = &points[i - 1];
        let hi = &points[i];
        let span = hi.location - lo.location;
        let k = (f - lo.location) / span;
        let n = lo.value.evaluate(input);
        let o = hi.value.evaluate(input);
        let p = lo.derivative * span - (o - n);
        let q = -hi.derivative * span + (o - n);
        lerp(k, n, o) + k * (1.0 - k) * lerp(k, p, q)
    }

    /// Builds the overworld terrain offset spline.
    #[must_use]
    pub fn overworld_offset() -> Self {
        let land1 = land_spline(-0.15, 0.0, 0.0, 0.1, 0.0, -0.03, false);
        let land2 = land_spline(-0.1, 0.03, 0.1, 0.1, 0.01, -0.03, false);
        let land3 = land_spline(-0.1, 0.03, 0.1, 0.7, 0.01, -0.03, true);
        let land4 = land_spline(-0.05, 0.03, 0.1, 1.0, 0.01, 0.01, true);

        MultiSpline::new(SplineAxis::Continentalness)
            .point(-1.1, Self::Fixed(0.044), 0.0)
            .point(-1.02, Self::Fixed(-0.2222), 0.0)
            .point(-0.51, Self::Fixed(-0.2222), 0.0)
            .point(-0.44, Self::Fixed(-0.12), 0.0)
            .point(-0.18, Self::Fixed(-0.12), 0.0)
            .point(-0.16, land1.clone(), 0.0)
            .point(-0.15, land1, 0.0)
            .point(-0.1, land2, 0.0)
            .point(0.25, land3, 0.0)
            .point(1.0, land4, 0.0)
            .build()
    }
}

#[inline]
fn lerp(k: f32, a: f32, b: f32) -> f32 {
    a + k * (b - a)
}

/// Height offset of a ridge at weirdness-derived `w` for continental factor `c`.
fn offset_value(w: f32, c: f32) -> f32 {
    let f0 = 1.0 - (1.0 - c) * 0.5;
    let f1 = 0.5 * (1.0 - c);
    let f2 = (w + 1.17) * 0.460_829_47;
    let offset = f2 * f0 - f1;
    if w < -0.7 {
        offset.max(-0.2222)
    } else {
        offset.max(0.0)
    }
}

/// Peaks-and-valleys spline for one continental factor.
fn ridge_spline(f: f32, beaches: bool) -> Spline {
    let low = offset_value(-1.0, f);
    let high = offset_value(1.0, f);
    let scale = 1.0 - (1.0 - f) * 0.5;
    let shift = 0.5 * (1.0 - f);
    let turn = shift / (0.460_829_47 * scale) - 1.17;

    let node = MultiSpline::new(SplineAxis::PeaksAndValleys);
    if -0.65 < turn && turn < 1.0 {
        let at_65 = offset_value(-0.65, f);
        let at_75 = offset_value(-0.75, f);
        let slope_low = (at_75 - low) * 4.0;
        let at_turn = offset_value(turn, f);
        let slope_high = (high - at_turn) / (1.0 - turn);
        node.point(-1.0, Spline::Fixed(low), slope_low)
            .point(-0.75, Spline::Fixed(at_75), 0.0)
            .point(-0.65, Spline::Fixed(at_65), 0.0)
            .point(turn - 0.01, Spline::Fixed(at_turn), 0.0)
            .point(turn, Spline::Fixed(at_turn), slope_high)
            .point(1.0, Spline::Fixed(high), slope_high)
            .build()
    } else {
        let slope = (high - low) * 0.5;
        let node = if beaches {
            node.point(-1.0, Spline::Fixed(low.max(0.2)), 0.0)
                .point(0.0, Spline::Fixed(lerp(0.5, low, high)), slope)
        } else {
            node.point(-1.0, Spline::Fixed(low), slope)
        };
        node.point(1.0, Spline::Fixed(high), slope).build()
    }
}

/// Five-point peaks-and-valleys spline with a minimum leading slope.
#[allow(clippy::many_single_char_names)]
fn flat_offset_spline(f: f32, g: f32, h: f32, i: f32, j: f32, k: f32) -> Spline {
    let mut l = 0.5 * (g - f);
    if l < k {
        l = k;
    }
    let m = 5.0 * (h - g);
    MultiSpline::new(SplineAxis::PeaksAndValleys)
        .point(-1.0, Spline::Fixed(f), l)
        .point(-0.4, Spline::Fixed(g), l.min(m))
        .point(0.0, Spline::Fixed(h), m)
        .point(0.4, Spline::Fixed(i), 2.0 * (i - h))
        .point(1.0, Spline::Fixed(j), 0.7 * (j - i))
        .build()
}

/// Erosion spline for one continentalness band.
#[allow(clippy::many_single_char_names)]
fn land_spline(f: f32, g: f32, h: f32, i: f32, j: f32, k: f32, beaches: bool) -> Spline {
    let ridge1 = ridge_spline(lerp(i, 0.6, 1.5), beaches);
    let ridge2 = ridge_spline(lerp(i, 0.6, 1.0), beaches);
    let ridge3 = ridge_spline(i, beaches);
    let half = 0.5 * i;
    let flat1 = flat_offset_spline(f - 0.15, half, half, half, i * 0.6, 0.5);
    let flat2 = flat_offset_spline(f, j * i, g * i, half, i * 0.6, 0.5);
    let flat3 = flat_offset_spline(f, j, j, g, h, 0.5);
    let valley = MultiSpline::new(SplineAxis::PeaksAndValleys)
        .point(-1.0, Spline::Fixed(f), 0.0)
        .point(-0.4, flat3.clone(), 0.0)
        .point(0.0, Spline::Fixed(h + 0.07), 0.0)
        .build();
    let shore = flat_offset_spline(-0.02, k, k, g, h, 0.0);

    let node = MultiSpline::new(SplineAxis::Erosion)
        .point(-0.85, ridge1, 0.0)
        .point(-0.7, ridge2, 0.0)
        .point(-0.4, ridge3, 0.0)
        .point(-0.35, flat1, 0.0)
        .point(-0.1, flat2, 0.0)
        .point(0.2, flat3.clone(), 0.0);
    let node = if beaches {
        node.point(0.4, flat3.clone(), 0.0)
            .point(0.45, valley.clone(), 0.0)
            .point(0.55, valley, 0.0)
            .point(0.58, flat3, 0.0)
    } else {
        node
    };
    node.point(0.7, shore, 0.0).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_midpoint_is_mean() {
        let spline = MultiSpline::new(SplineAxis::Continentalness)
            .point(0.0, Spline::Fixed(2.0), 4.0)
            .point(1.0, Spline::Fixed(6.0), 4.0)
            .build();
        assert_eq!(spline.evaluate(&[0.5, 0.0, 0.0]), 4.0);
    }

    #[test]
    fn test_extrapolates_along_derivative() {
        let spline = MultiSpline::new(SplineAxis::Erosion)
            .point(-1.0, Spline::Fixed(1.0), 2.0)
            .point(1.0, Spline::Fixed(3.0), -1.0)
            .build();
        assert_eq!(spline.evaluate(&[0.0, -2.0, 0.0]), -1.0, "left of the first point");
        assert_eq!(spline.evaluate(&[0.0, 3.0, 0.0]), 1.0, "right of the last point");
        assert_eq!(spline.evaluate(&[0.0, -1.0, 0.0]), 1.0, "exactly on a point");
    }

    #[test]
    fn test_fixed_ignores_input() {
        assert_eq!(Spline::Fixed(0.25).evaluate(&[9.0, 9.0, 9.0]), 0.25);
    }

    #[test]
    fn test_overworld_offset_reference() {
        let spline = Spline::overworld_offset();
        let cases: [([f32; 3], u32); 6] = [
            ([0.0, 0.0, 0.0], 0x3bf4_6390),
            ([0.3, -0.5, 0.2], 0x3eda_cb69),
            ([-0.5, 0.1, -0.8], 0xbe5d_bc58),
            ([0.8, 0.6, 0.9], 0x3dbc_6113),
            ([-1.5, 0.0, 0.0], 0x3d34_3958),
            ([0.05, -0.9, -0.3], 0x3ea3_cb71),
        ];
        for (input, expected) in cases {
            assert_eq!(
                spline.evaluate(&input).to_bits(),
                expected,
                "offset spline mismatch at {input:?}"
            );
        }
    }

    #[test]
    #[should_panic(expected = "must increase")]
    fn test_rejects_unordered_points() {
        let _ = MultiSpline::new(SplineAxis::Erosion)
            .point(0.5, Spline::Fixed(0.0), 0.0)
            .point(0.5, Spline::Fixed(1.0), 0.0);
    }

    #[test]
    #[should_panic(expected = "exceeds")]
    #[allow(clippy::cast_precision_loss)]
    fn test_rejects_oversized_node() {
        let mut node = MultiSpline::new(SplineAxis::Erosion);
        for i in 0..=MAX_SPLINE_POINTS {
            node = node.point(i as f32, Spline::Fixed(0.0), 0.0);
        }
    }
}
