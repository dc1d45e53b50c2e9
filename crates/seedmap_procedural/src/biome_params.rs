//! # Overworld Biome Parameters
//!
//! The fixed table of climate boxes the biome tree is built from.
//!
//! Each entry pairs a [`ParameterPoint`] (a `[min, max]` interval on each
//! of the six climate axes plus a constant offset axis) with the biome that
//! wins inside it. The table is generated by walking the same band layout as
//! the game: ocean bands off the coast, thirteen weirdness slices inland, and
//! three cave biomes underground. The layout is data, not configuration.

use crate::biome::Biome;
use crate::climate::quantize;

/// A closed interval on one quantized climate axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Parameter {
    /// Lower bound
    pub min: i64,
    /// Upper bound
    pub max: i64,
}

impl Parameter {
    /// Interval between two unquantized values.
    #[must_use]
    pub fn span(min: f32, max: f32) -> Self {
        Self {
            min: quantize(min),
            max: quantize(max),
        }
    }

    /// Degenerate interval at one unquantized value.
    #[must_use]
    pub fn point(value: f32) -> Self {
        Self::span(value, value)
    }

    /// From the start of `self` to the end of `other`.
    #[must_use]
    pub const fn join(self, other: Self) -> Self {
        Self {
            min: self.min,
            max: other.max,
        }
    }

    /// Midpoint, rounded toward zero.
    #[inline]
    #[must_use]
    pub const fn mid(self) -> i64 {
        (self.min + self.max) / 2
    }

    /// Width of the interval.
    #[inline]
    #[must_use]
    pub const fn width(self) -> i64 {
        (self.max - self.min).abs()
    }

    /// Distance from `value` to the interval; zero inside it.
    #[inline]
    #[must_use]
    pub const fn distance(self, value: i64) -> i64 {
        let above = value - self.max;
        let below = self.min - value;
        if above > 0 {
            above
        } else if below > 0 {
            below
        } else {
            0
        }
    }
}

/// Number of axes in a parameter point: six climate axes plus the offset.
pub const PARAMETER_AXES: usize = 7;

/// One climate box of the table.
pub type ParameterPoint = [Parameter; PARAMETER_AXES];

const NUM_TEMPERATURES: usize = 5;
const NUM_HUMIDITIES: usize = 5;

type BiomeGrid = [[Biome; NUM_HUMIDITIES]; NUM_TEMPERATURES];
type VariantGrid = [[Option<Biome>; NUM_HUMIDITIES]; NUM_TEMPERATURES];

const OCEANS: [[Biome; NUM_TEMPERATURES]; 2] = [
    [
        Biome::DeepFrozenOcean,
        Biome::DeepColdOcean,
        Biome::DeepOcean,
        Biome::DeepLukewarmOcean,
        Biome::WarmOcean,
    ],
    [
        Biome::FrozenOcean,
        Biome::ColdOcean,
        Biome::Ocean,
        Biome::LukewarmOcean,
        Biome::WarmOcean,
    ],
];

const MIDDLE: BiomeGrid = [
    [
        Biome::SnowyPlains,
        Biome::SnowyPlains,
        Biome::SnowyPlains,
        Biome::SnowyTaiga,
        Biome::Taiga,
    ],
    [
        Biome::Plains,
        Biome::Plains,
        Biome::Forest,
        Biome::Taiga,
        Biome::OldGrowthSpruceTaiga,
    ],
    [
        Biome::FlowerForest,
        Biome::Plains,
        Biome::Forest,
        Biome::BirchForest,
        Biome::DarkForest,
    ],
    [
        Biome::Savanna,
        Biome::Savanna,
        Biome::Forest,
        Biome::Jungle,
        Biome::Jungle,
    ],
    [Biome::Desert; NUM_HUMIDITIES],
];

const MIDDLE_VARIANT: VariantGrid = [
    [Some(Biome::IceSpikes), None, Some(Biome::SnowyTaiga), None, None],
    [None, None, None, None, Some(Biome::OldGrowthPineTaiga)],
    [Some(Biome::SunflowerPlains), None, None, Some(Biome::OldGrowthBirchForest), None],
    [None, None, Some(Biome::Plains), Some(Biome::SparseJungle), Some(Biome::BambooJungle)],
    [None; NUM_HUMIDITIES],
];

const PLATEAU: BiomeGrid = [
    [
        Biome::SnowyPlains,
        Biome::SnowyPlains,
        Biome::SnowyPlains,
        Biome::SnowyTaiga,
        Biome::SnowyTaiga,
    ],
    [
        Biome::Meadow,
        Biome::Meadow,
        Biome::Forest,
        Biome::Taiga,
        Biome::OldGrowthSpruceTaiga,
    ],
    [
        Biome::Meadow,
        Biome::Meadow,
        Biome::Meadow,
        Biome::Meadow,
        Biome::DarkForest,
    ],
    [
        Biome::SavannaPlateau,
        Biome::SavannaPlateau,
        Biome::Forest,
        Biome::Forest,
        Biome::Jungle,
    ],
    [
        Biome::Badlands,
        Biome::Badlands,
        Biome::Badlands,
        Biome::WoodedBadlands,
        Biome::WoodedBadlands,
    ],
];

const PLATEAU_VARIANT: VariantGrid = [
    [Some(Biome::IceSpikes), None, None, None, None],
    [None, None, Some(Biome::Meadow), Some(Biome::Meadow), Some(Biome::OldGrowthPineTaiga)],
    [None, None, Some(Biome::Forest), Some(Biome::BirchForest), None],
    [None; NUM_HUMIDITIES],
    [Some(Biome::ErodedBadlands), Some(Biome::ErodedBadlands), None, None, None],
];

const SHATTERED: VariantGrid = [
    [
        Some(Biome::WindsweptGravellyHills),
        Some(Biome::WindsweptGravellyHills),
        Some(Biome::WindsweptHills),
        Some(Biome::WindsweptForest),
        Some(Biome::WindsweptForest),
    ],
    [
        Some(Biome::WindsweptGravellyHills),
        Some(Biome::WindsweptGravellyHills),
        Some(Biome::WindsweptHills),
        Some(Biome::WindsweptForest),
        Some(Biome::WindsweptForest),
    ],
    [
        Some(Biome::WindsweptHills),
        Some(Biome::WindsweptHills),
        Some(Biome::WindsweptHills),
        Some(Biome::WindsweptForest),
        Some(Biome::WindsweptForest),
    ],
    [None; NUM_HUMIDITIES],
    [None; NUM_HUMIDITIES],
];

/// Interval boundaries of every climate band.
struct Bands {
    full: Parameter,
    temperatures: [Parameter; NUM_TEMPERATURES],
    humidities: [Parameter; NUM_HUMIDITIES],
    erosions: [Parameter; 7],
    frozen: Parameter,
    unfrozen: Parameter,
    mushroom: Parameter,
    deep_ocean: Parameter,
    ocean: Parameter,
    coast: Parameter,
    inland: Parameter,
    near_inland: Parameter,
    mid_inland: Parameter,
    far_inland: Parameter,
}

impl Bands {
    fn new() -> Self {
        let span = Parameter::span;
        let temperatures = [
            span(-1.0, -0.45),
            span(-0.45, -0.15),
            span(-0.15, 0.2),
            span(0.2, 0.55),
            span(0.55, 1.0),
        ];
        Self {
            full: span(-1.0, 1.0),
            temperatures,
            humidities: [
                span(-1.0, -0.35),
                span(-0.35, -0.1),
                span(-0.1, 0.1),
                span(0.1, 0.3),
                span(0.3, 1.0),
            ],
            erosions: [
                span(-1.0, -0.78),
                span(-0.78, -0.375),
                span(-0.375, -0.2225),
                span(-0.2225, 0.05),
                span(0.05, 0.45),
                span(0.45, 0.55),
                span(0.55, 1.0),
            ],
            frozen: temperatures[0],
            unfrozen: temperatures[1].join(temperatures[4]),
            mushroom: span(-1.2, -1.05),
            deep_ocean: span(-1.05, -0.455),
            ocean: span(-0.455, -0.19),
            coast: span(-0.19, -0.11),
            inland: span(-0.11, 0.55),
            near_inland: span(-0.11, 0.03),
            mid_inland: span(0.03, 0.3),
            far_inland: span(0.3, 1.0),
        }
    }
}

/// Generates the overworld parameter table.
pub struct OverworldBiomeBuilder {
    bands: Bands,
    points: Vec<(ParameterPoint, Biome)>,
}

impl Default for OverworldBiomeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OverworldBiomeBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bands: Bands::new(),
            points: Vec::with_capacity(7600),
        }
    }

    /// Generates every parameter point, in table order.
    #[must_use]
    pub fn build(mut self) -> Vec<(ParameterPoint, Biome)> {
        self.add_off_coast();
        self.add_inland();
        self.add_underground();
        self.points
    }

    fn push(&mut self, climate: [Parameter; 6], depth: Parameter, biome: Biome) {
        let [t, h, c, e, _, w] = climate;
        let offset = Parameter::point(0.0);
        self.points.push(([t, h, c, e, depth, w, offset], biome));
    }

    /// A surface biome: present both at the surface and one unit below it.
    #[allow(clippy::too_many_arguments)]
    fn surface(&mut self, t: Parameter, h: Parameter, c: Parameter, e: Parameter, w: Parameter, biome: Biome) {
        let unused = Parameter::default();
        self.push([t, h, c, e, unused, w], Parameter::point(0.0), biome);
        self.push([t, h, c, e, unused, w], Parameter::point(1.0), biome);
    }

    fn add_off_coast(&mut self) {
        let b = &self.bands;
        let (full, mushroom, deep_ocean, ocean) = (b.full, b.mushroom, b.deep_ocean, b.ocean);
        let temperatures = b.temperatures;
        self.surface(full, full, mushroom, full, full, Biome::MushroomFields);
        for (i, &t) in temperatures.iter().enumerate() {
            self.surface(t, full, deep_ocean, full, full, OCEANS[0][i]);
            self.surface(t, full, ocean, full, full, OCEANS[1][i]);
        }
    }

    fn add_inland(&mut self) {
        let span = Parameter::span;
        self.add_mid_slice(span(-1.0, -0.933_333_34));
        self.add_high_slice(span(-0.933_333_34, -0.766_666_7));
        self.add_peaks(span(-0.766_666_7, -0.566_666_66));
        self.add_high_slice(span(-0.566_666_66, -0.4));
        self.add_mid_slice(span(-0.4, -0.266_666_68));
        self.add_low_slice(span(-0.266_666_68, -0.05));
        self.add_valleys(span(-0.05, 0.05));
        self.add_low_slice(span(0.05, 0.266_666_68));
        self.add_mid_slice(span(0.266_666_68, 0.4));
        self.add_high_slice(span(0.4, 0.566_666_66));
        self.add_peaks(span(0.566_666_66, 0.766_666_7));
        self.add_high_slice(span(0.766_666_7, 0.933_333_34));
        self.add_mid_slice(span(0.933_333_34, 1.0));
    }

    fn add_peaks(&mut self, w: Parameter) {
        let b = &self.bands;
        let (coast, near, mid, far) = (b.coast, b.near_inland, b.mid_inland, b.far_inland);
        let (temperatures, humidities, e) = (b.temperatures, b.humidities, b.erosions);
        for (i, &t) in temperatures.iter().enumerate() {
            for (j, &h) in humidities.iter().enumerate() {
                let middle = pick_middle(i, j, w);
                let middle_or_badlands = pick_middle_or_badlands(i, j, w);
                let middle_or_slope = pick_middle_or_badlands_or_slope(i, j, w);
                let plateau = pick_plateau(i, j, w);
                let shattered = pick_shattered(i, j, w);
                let windswept = maybe_windswept_savanna(i, j, w, shattered);
                let peak = pick_peak(i, j, w);

                self.surface(t, h, coast.join(far), e[0], w, peak);
                self.surface(t, h, coast.join(near), e[1], w, middle_or_slope);
                self.surface(t, h, mid.join(far), e[1], w, peak);
                self.surface(t, h, coast.join(near), e[2].join(e[3]), w, middle);
                self.surface(t, h, mid.join(far), e[2], w, plateau);
                self.surface(t, h, mid, e[3], w, middle_or_badlands);
                self.surface(t, h, far, e[3], w, plateau);
                self.surface(t, h, coast.join(far), e[4], w, middle);
                self.surface(t, h, coast.join(near), e[5], w, windswept);
                self.surface(t, h, mid.join(far), e[5], w, shattered);
                self.surface(t, h, coast.join(far), e[6], w, middle);
            }
        }
    }

    fn add_high_slice(&mut self, w: Parameter) {
        let b = &self.bands;
        let (coast, near, mid, far) = (b.coast, b.near_inland, b.mid_inland, b.far_inland);
        let (temperatures, humidities, e) = (b.temperatures, b.humidities, b.erosions);
        for (i, &t) in temperatures.iter().enumerate() {
            for (j, &h) in humidities.iter().enumerate() {
                let middle = pick_middle(i, j, w);
                let middle_or_badlands = pick_middle_or_badlands(i, j, w);
                let middle_or_slope = pick_middle_or_badlands_or_slope(i, j, w);
                let plateau = pick_plateau(i, j, w);
                let shattered = pick_shattered(i, j, w);
                let windswept = maybe_windswept_savanna(i, j, w, middle);
                let slope = pick_slope(i, j, w);
                let peak = pick_peak(i, j, w);

                self.surface(t, h, coast, e[0].join(e[1]), w, middle);
                self.surface(t, h, near, e[0], w, slope);
                self.surface(t, h, mid.join(far), e[0], w, peak);
                self.surface(t, h, near, e[1], w, middle_or_slope);
                self.surface(t, h, mid.join(far), e[1], w, slope);
                self.surface(t, h, coast.join(near), e[2].join(e[3]), w, middle);
                self.surface(t, h, mid.join(far), e[2], w, plateau);
                self.surface(t, h, mid, e[3], w, middle_or_badlands);
                self.surface(t, h, far, e[3], w, plateau);
                self.surface(t, h, coast.join(far), e[4], w, middle);
                self.surface(t, h, coast.join(near), e[5], w, windswept);
                self.surface(t, h, mid.join(far), e[5], w, shattered);
                self.surface(t, h, coast.join(far), e[6], w, middle);
            }
        }
    }

    fn add_swamps(&mut self, w: Parameter, from: Parameter) {
        let b = &self.bands;
        let (full, t, far, e6) = (b.full, b.temperatures, b.far_inland, b.erosions[6]);
        self.surface(t[1].join(t[2]), full, from.join(far), e6, w, Biome::Swamp);
        self.surface(t[3].join(t[4]), full, from.join(far), e6, w, Biome::MangroveSwamp);
    }

    fn add_mid_slice(&mut self, w: Parameter) {
        let b = &self.bands;
        let (full, coast, near, mid, far) = (b.full, b.coast, b.near_inland, b.mid_inland, b.far_inland);
        let (temperatures, humidities, e) = (b.temperatures, b.humidities, b.erosions);
        self.surface(full, full, coast, e[0].join(e[2]), w, Biome::StonyShore);
        self.add_swamps(w, near);
        for (i, &t) in temperatures.iter().enumerate() {
            for (j, &h) in humidities.iter().enumerate() {
                let middle = pick_middle(i, j, w);
                let middle_or_badlands = pick_middle_or_badlands(i, j, w);
                let middle_or_slope = pick_middle_or_badlands_or_slope(i, j, w);
                let shattered = pick_shattered(i, j, w);
                let plateau = pick_plateau(i, j, w);
                let beach = pick_beach(i);
                let windswept = maybe_windswept_savanna(i, j, w, middle);
                let shattered_coast = pick_shattered_coast(i, j, w);
                let slope = pick_slope(i, j, w);

                self.surface(t, h, near.join(far), e[0], w, slope);
                self.surface(t, h, near.join(mid), e[1], w, middle_or_slope);
                self.surface(t, h, far, e[1], w, if i == 0 { slope } else { plateau });
                self.surface(t, h, near, e[2], w, middle);
                self.surface(t, h, mid, e[2], w, middle_or_badlands);
                self.surface(t, h, far, e[2], w, plateau);
                self.surface(t, h, coast.join(near), e[3], w, middle);
                self.surface(t, h, mid.join(far), e[3], w, middle_or_badlands);
                if w.max < 0 {
                    self.surface(t, h, coast, e[4], w, beach);
                    self.surface(t, h, near.join(far), e[4], w, middle);
                } else {
                    self.surface(t, h, coast.join(far), e[4], w, middle);
                }
                self.surface(t, h, coast, e[5], w, shattered_coast);
                self.surface(t, h, near, e[5], w, windswept);
                self.surface(t, h, mid.join(far), e[5], w, shattered);
                if w.max < 0 {
                    self.surface(t, h, coast, e[6], w, beach);
                } else {
                    self.surface(t, h, coast, e[6], w, middle);
                }
                if i == 0 {
                    self.surface(t, h, near.join(far), e[6], w, middle);
                }
            }
        }
    }

    fn add_low_slice(&mut self, w: Parameter) {
        let b = &self.bands;
        let (full, coast, near, mid, far) = (b.full, b.coast, b.near_inland, b.mid_inland, b.far_inland);
        let (temperatures, humidities, e) = (b.temperatures, b.humidities, b.erosions);
        self.surface(full, full, coast, e[0].join(e[2]), w, Biome::StonyShore);
        self.add_swamps(w, near);
        for (i, &t) in temperatures.iter().enumerate() {
            for (j, &h) in humidities.iter().enumerate() {
                let middle = pick_middle(i, j, w);
                let middle_or_badlands = pick_middle_or_badlands(i, j, w);
                let middle_or_slope = pick_middle_or_badlands_or_slope(i, j, w);
                let beach = pick_beach(i);
                let windswept = maybe_windswept_savanna(i, j, w, middle);
                let shattered_coast = pick_shattered_coast(i, j, w);

                self.surface(t, h, near, e[0].join(e[1]), w, middle_or_badlands);
                self.surface(t, h, mid.join(far), e[0].join(e[1]), w, middle_or_slope);
                self.surface(t, h, near, e[2].join(e[3]), w, middle);
                self.surface(t, h, mid.join(far), e[2].join(e[3]), w, middle_or_badlands);
                self.surface(t, h, coast, e[3].join(e[4]), w, beach);
                self.surface(t, h, near.join(far), e[4], w, middle);
                self.surface(t, h, coast, e[5], w, shattered_coast);
                self.surface(t, h, near, e[5], w, windswept);
                self.surface(t, h, mid.join(far), e[5], w, middle);
                self.surface(t, h, coast, e[6], w, beach);
                if i == 0 {
                    self.surface(t, h, near.join(far), e[6], w, middle);
                }
            }
        }
    }

    fn add_valleys(&mut self, w: Parameter) {
        let b = &self.bands;
        let (full, coast, near, mid, far) = (b.full, b.coast, b.near_inland, b.mid_inland, b.far_inland);
        let (frozen, unfrozen, inland) = (b.frozen, b.unfrozen, b.inland);
        let (temperatures, humidities, e) = (b.temperatures, b.humidities, b.erosions);
        let coast_biome = |river: Biome| if w.max < 0 { Biome::StonyShore } else { river };

        self.surface(frozen, full, coast, e[0].join(e[1]), w, coast_biome(Biome::FrozenRiver));
        self.surface(unfrozen, full, coast, e[0].join(e[1]), w, coast_biome(Biome::River));
        self.surface(frozen, full, near, e[0].join(e[1]), w, Biome::FrozenRiver);
        self.surface(unfrozen, full, near, e[0].join(e[1]), w, Biome::River);
        self.surface(frozen, full, coast.join(far), e[2].join(e[5]), w, Biome::FrozenRiver);
        self.surface(unfrozen, full, coast.join(far), e[2].join(e[5]), w, Biome::River);
        self.surface(frozen, full, coast, e[6], w, Biome::FrozenRiver);
        self.surface(unfrozen, full, coast, e[6], w, Biome::River);
        self.add_swamps(w, inland);
        self.surface(frozen, full, inland.join(far), e[6], w, Biome::FrozenRiver);
        for (i, &t) in temperatures.iter().enumerate() {
            for (j, &h) in humidities.iter().enumerate() {
                let middle_or_badlands = pick_middle_or_badlands(i, j, w);
                self.surface(t, h, mid.join(far), e[0].join(e[1]), w, middle_or_badlands);
            }
        }
    }

    fn add_underground(&mut self) {
        let b = &self.bands;
        let (full, e) = (b.full, b.erosions);
        let caves = Parameter::span(0.2, 0.9);
        let unused = Parameter::default();
        self.push(
            [full, full, Parameter::span(0.8, 1.0), full, unused, full],
            caves,
            Biome::DripstoneCaves,
        );
        self.push(
            [full, Parameter::span(0.7, 1.0), full, full, unused, full],
            caves,
            Biome::LushCaves,
        );
        self.push(
            [full, full, full, e[0].join(e[1]), unused, full],
            Parameter::point(1.1),
            Biome::DeepDark,
        );
    }
}

fn pick_middle(i: usize, j: usize, w: Parameter) -> Biome {
    if w.max < 0 {
        MIDDLE[i][j]
    } else {
        MIDDLE_VARIANT[i][j].unwrap_or(MIDDLE[i][j])
    }
}

fn pick_badlands(j: usize, w: Parameter) -> Biome {
    if j < 2 {
        if w.max < 0 {
            Biome::ErodedBadlands
        } else {
            Biome::Badlands
        }
    } else if j < 3 {
        Biome::Badlands
    } else {
        Biome::WoodedBadlands
    }
}

fn pick_middle_or_badlands(i: usize, j: usize, w: Parameter) -> Biome {
    if i == 4 {
        pick_badlands(j, w)
    } else {
        pick_middle(i, j, w)
    }
}

fn pick_middle_or_badlands_or_slope(i: usize, j: usize, w: Parameter) -> Biome {
    if i == 0 {
        pick_slope(i, j, w)
    } else {
        pick_middle_or_badlands(i, j, w)
    }
}

fn maybe_windswept_savanna(i: usize, j: usize, w: Parameter, fallback: Biome) -> Biome {
    if i > 1 && j < 4 && w.max >= 0 {
        Biome::WindsweptSavanna
    } else {
        fallback
    }
}

fn pick_shattered_coast(i: usize, j: usize, w: Parameter) -> Biome {
    let biome = if w.max >= 0 {
        pick_middle(i, j, w)
    } else {
        pick_beach(i)
    };
    maybe_windswept_savanna(i, j, w, biome)
}

fn pick_beach(i: usize) -> Biome {
    match i {
        0 => Biome::SnowyBeach,
        4 => Biome::Desert,
        _ => Biome::Beach,
    }
}

fn pick_plateau(i: usize, j: usize, w: Parameter) -> Biome {
    match PLATEAU_VARIANT[i][j] {
        Some(variant) if w.max >= 0 => variant,
        _ => PLATEAU[i][j],
    }
}

fn pick_peak(i: usize, j: usize, w: Parameter) -> Biome {
    if i <= 2 {
        if w.max < 0 {
            Biome::JaggedPeaks
        } else {
            Biome::FrozenPeaks
        }
    } else if i == 3 {
        Biome::StonyPeaks
    } else {
        pick_badlands(j, w)
    }
}

fn pick_slope(i: usize, j: usize, w: Parameter) -> Biome {
    if i >= 3 {
        pick_plateau(i, j, w)
    } else if j <= 1 {
        Biome::SnowySlopes
    } else {
        Biome::Grove
    }
}

fn pick_shattered(i: usize, j: usize, w: Parameter) -> Biome {
    SHATTERED[i][j].unwrap_or_else(|| pick_middle(i, j, w))
}
