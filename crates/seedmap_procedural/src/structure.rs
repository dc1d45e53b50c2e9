//! # Structure Placement
//!
//! Region hashing, structure positions and start-piece variants.
//!
//! The world is cut into square regions of `region_size` chunks per
//! structure kind. Each region holds at most one attempt, placed at a chunk
//! offset drawn from the legacy generator seeded by the region coordinates
//! and the kind's salt. Whether the attempt actually generates is decided
//! later by the biome and terrain filters in [`crate::viability`].

use seedmap_shared::math::{add64, mul64};
use seedmap_shared::StructureKind;

use crate::biome::Biome;
use crate::rng::JavaRandom;

const REGION_X_MULTIPLIER: u64 = 341_873_128_712;
const REGION_Z_MULTIPLIER: u64 = 132_897_987_541;
const LCG_MULTIPLIER: u64 = 0x5_DEEC_E66D;

/// Placement constants of one structure kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StructureConfig {
    /// Placement salt
    pub salt: u64,
    /// Region edge length in chunks
    pub region_size: i32,
    /// Chunk offsets are drawn from `[0, chunk_range)` per axis
    pub chunk_range: i32,
    /// The structure placed
    pub kind: StructureKind,
    /// Offsets are the mean of two draws (large structures)
    pub triangular: bool,
}

impl StructureConfig {
    /// Placement constants for `kind`.
    #[must_use]
    pub const fn of(kind: StructureKind) -> Self {
        let (salt, region_size, chunk_range, triangular) = match kind {
            StructureKind::DesertPyramid => (14_357_617, 32, 24, false),
            StructureKind::JunglePyramid => (14_357_619, 32, 24, false),
            StructureKind::SwampHut => (14_357_620, 32, 24, false),
            StructureKind::Igloo => (14_357_618, 32, 24, false),
            StructureKind::Village => (10_387_312, 34, 26, false),
            StructureKind::OceanRuins => (14_357_621, 20, 12, false),
            StructureKind::Shipwreck => (165_745_295, 24, 20, false),
            StructureKind::RuinedPortal => (34_222_645, 40, 25, false),
            StructureKind::Monument => (10_387_313, 32, 27, true),
            StructureKind::Mansion => (10_387_319, 80, 60, true),
            StructureKind::Outpost => (165_745_296, 32, 24, false),
            StructureKind::AncientCity => (20_083_232, 24, 16, false),
        };
        Self {
            salt,
            region_size,
            chunk_range,
            kind,
            triangular,
        }
    }

    /// Edge length of one region in blocks.
    #[inline]
    #[must_use]
    pub const fn region_blocks(&self) -> i32 {
        self.region_size * 16
    }
}

/// Placement constants of every supported kind, in [`StructureKind::ALL`] order.
#[must_use]
pub fn structure_configs() -> [StructureConfig; 12] {
    StructureKind::ALL.map(StructureConfig::of)
}

/// Chunk offset of the attempt inside region `(reg_x, reg_z)`.
#[must_use]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub fn chunk_in_region(seed: u64, config: &StructureConfig, reg_x: i32, reg_z: i32) -> (i32, i32) {
    let region_seed = add64(
        add64(
            add64(seed, mul64(i64::from(reg_x) as u64, REGION_X_MULTIPLIER)),
            mul64(i64::from(reg_z) as u64, REGION_Z_MULTIPLIER),
        ),
        config.salt,
    );
    let mut rng = JavaRandom::new(region_seed);
    let range = config.chunk_range;

    if config.triangular {
        let x = rng.next_bits(31) % range + rng.next_bits(31) % range;
        let z = rng.next_bits(31) % range + rng.next_bits(31) % range;
        return (x >> 1, z >> 1);
    }
    if range & (range - 1) != 0 {
        let x = rng.next_bits(31) % range;
        let z = rng.next_bits(31) % range;
        return (x, z);
    }
    let x = (i64::from(range) * i64::from(rng.next_bits(31))) >> 31;
    let z = (i64::from(range) * i64::from(rng.next_bits(31))) >> 31;
    (x as i32, z as i32)
}

/// Block position of the attempt in region `(reg_x, reg_z)`.
///
/// Returns `None` only for outposts, whose attempts are thinned by a
/// one-in-five draw. The block coordinates wrap at 32 bits.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn structure_position(
    seed: u64,
    config: &StructureConfig,
    reg_x: i32,
    reg_z: i32,
) -> Option<(i32, i32)> {
    let (cx, cz) = chunk_in_region(seed, config, reg_x, reg_z);
    let x = reg_x
        .wrapping_mul(config.region_size)
        .wrapping_add(cx)
        .wrapping_shl(4);
    let z = reg_z
        .wrapping_mul(config.region_size)
        .wrapping_add(cz)
        .wrapping_shl(4);

    if config.kind == StructureKind::Outpost {
        let attempt = seed ^ (i64::from(x >> 8) as u64) ^ ((i64::from(z >> 8) as u64) << 4);
        let mut rng = JavaRandom::from_state(attempt ^ LCG_MULTIPLIER);
        rng.next_bits(31);
        if rng.next_int(5) != 0 {
            return None;
        }
    }
    Some((x, z))
}

/// The per-chunk generator structures draw their layout from.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn chunk_generate_rnd(seed: u64, chunk_x: i32, chunk_z: i32) -> JavaRandom {
    let mut rng = JavaRandom::new(seed);
    let a = rng.next_long() as u64;
    let b = rng.next_long() as u64;
    let mixed = mul64(a, i64::from(chunk_x) as u64) ^ mul64(b, i64::from(chunk_z) as u64) ^ seed;
    JavaRandom::new(mixed)
}

/// Whether `kind` can generate in `biome` at its sample position.
#[must_use]
pub const fn is_viable_feature_biome(kind: StructureKind, biome: Biome) -> bool {
    match kind {
        StructureKind::DesertPyramid => matches!(biome, Biome::Desert),
        StructureKind::JunglePyramid => matches!(biome, Biome::Jungle | Biome::BambooJungle),
        StructureKind::SwampHut => matches!(biome, Biome::Swamp),
        StructureKind::Igloo => {
            matches!(biome, Biome::SnowyPlains | Biome::SnowyTaiga | Biome::SnowySlopes)
        }
        StructureKind::OceanRuins => biome.is_oceanic(),
        StructureKind::Shipwreck => {
            biome.is_oceanic() || matches!(biome, Biome::Beach | Biome::SnowyBeach)
        }
        StructureKind::RuinedPortal => true,
        StructureKind::Outpost => matches!(
            biome,
            Biome::Desert
                | Biome::Plains
                | Biome::Savanna
                | Biome::SnowyPlains
                | Biome::Taiga
                | Biome::Meadow
                | Biome::FrozenPeaks
                | Biome::JaggedPeaks
                | Biome::StonyPeaks
                | Biome::SnowySlopes
                | Biome::Grove
        ),
        StructureKind::Village => matches!(
            biome,
            Biome::Plains
                | Biome::Desert
                | Biome::Savanna
                | Biome::Taiga
                | Biome::SnowyPlains
                | Biome::Meadow
        ),
        StructureKind::Mansion => matches!(biome, Biome::DarkForest),
        StructureKind::Monument => biome.is_deep_ocean(),
        StructureKind::AncientCity => matches!(biome, Biome::DeepDark),
    }
}

/// Start piece and footprint of a structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StructureVariant {
    /// Rotation in quarter turns
    pub rotation: u8,
    /// Start piece index
    pub start: u8,
    /// Abandoned (zombie) village
    pub abandoned: bool,
    /// Biome the variant was drawn for, if any
    pub biome: Option<Biome>,
    /// Footprint origin relative to the structure position
    pub x: i32,
    /// Footprint origin relative to the structure position
    pub z: i32,
    /// Footprint size along x after rotation
    pub sx: i32,
    /// Footprint height
    pub sy: i32,
    /// Footprint size along z after rotation
    pub sz: i32,
}

/// One village start: drawn while the roll is below `limit`.
struct VillageStart {
    limit: i32,
    start: u8,
    size: (i32, i32, i32),
    abandoned: bool,
}

const fn start(limit: i32, start: u8, sx: i32, sy: i32, sz: i32, abandoned: bool) -> VillageStart {
    VillageStart {
        limit,
        start,
        size: (sx, sy, sz),
        abandoned,
    }
}

const PLAINS_STARTS: &[VillageStart] = &[
    start(50, 0, 9, 4, 9, false),
    start(100, 1, 10, 7, 10, false),
    start(150, 2, 8, 5, 15, false),
    start(200, 3, 11, 9, 11, false),
    start(201, 0, 9, 4, 9, true),
    start(202, 1, 10, 7, 10, true),
    start(203, 2, 8, 5, 15, true),
    start(204, 3, 11, 9, 11, true),
];

const DESERT_STARTS: &[VillageStart] = &[
    start(98, 1, 17, 6, 9, false),
    start(196, 2, 12, 6, 12, false),
    start(245, 3, 15, 6, 15, false),
    start(247, 1, 17, 6, 9, true),
    start(249, 2, 12, 6, 12, true),
    start(250, 3, 15, 6, 15, true),
];

const SAVANNA_STARTS: &[VillageStart] = &[
    start(100, 1, 14, 5, 12, false),
    start(150, 2, 11, 6, 11, false),
    start(300, 3, 9, 6, 11, false),
    start(450, 4, 9, 6, 9, false),
    start(452, 1, 14, 5, 12, true),
    start(453, 2, 11, 6, 11, true),
    start(456, 3, 9, 6, 11, true),
    start(459, 4, 9, 6, 9, true),
];

const TAIGA_STARTS: &[VillageStart] = &[
    start(49, 1, 22, 3, 18, false),
    start(98, 2, 9, 7, 9, false),
    start(99, 1, 22, 3, 18, true),
    start(100, 2, 9, 7, 9, true),
];

const SNOWY_STARTS: &[VillageStart] = &[
    start(100, 1, 12, 8, 8, false),
    start(150, 2, 11, 5, 9, false),
    start(300, 3, 7, 7, 7, false),
    start(302, 1, 12, 8, 8, true),
    start(303, 2, 11, 5, 9, true),
    start(306, 3, 7, 7, 7, true),
];

/// Biomes that draw their own village start table, in viability order.
pub const VILLAGE_BIOMES: [Biome; 5] = [
    Biome::Plains,
    Biome::Desert,
    Biome::Savanna,
    Biome::Taiga,
    Biome::SnowyPlains,
];

fn village_starts(biome: Biome) -> Option<&'static [VillageStart]> {
    match biome {
        Biome::Plains | Biome::Meadow => Some(PLAINS_STARTS),
        Biome::Desert => Some(DESERT_STARTS),
        Biome::Savanna => Some(SAVANNA_STARTS),
        Biome::Taiga => Some(TAIGA_STARTS),
        Biome::SnowyPlains => Some(SNOWY_STARTS),
        _ => None,
    }
}

/// Draws the start-piece variant of the structure at block `(x, z)`.
///
/// Villages need the biome of their start; ancient cities ignore it. Other
/// kinds have no variant.
///
/// # Panics
///
/// Panics if a village start table does not cover its own roll range.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn structure_variant(
    seed: u64,
    kind: StructureKind,
    x: i32,
    z: i32,
    biome: Biome,
) -> Option<StructureVariant> {
    let mut rng = chunk_generate_rnd(seed, x >> 4, z >> 4);
    match kind {
        StructureKind::Village => {
            let starts = village_starts(biome)?;
            let rotation = rng.next_int(4);
            let total = starts.last().map_or(1, |s| s.limit);
            let roll = rng.next_int(total);
            let chosen = starts
                .iter()
                .find(|s| roll < s.limit)
                .unwrap_or_else(|| panic!("village roll {roll} outside its start table"));
            let (sx, sy, sz) = chosen.size;
            let (ox, oz, rsx, rsz) = match rotation {
                0 => (0, 0, sx, sz),
                1 => (1 - sz, 0, sz, sx),
                2 => (1 - sx, 1 - sz, sx, sz),
                _ => (0, 1 - sx, sz, sx),
            };
            Some(StructureVariant {
                rotation: rotation as u8,
                start: chosen.start,
                abandoned: chosen.abandoned,
                biome: Some(biome),
                x: ox,
                z: oz,
                sx: rsx,
                sy,
                sz: rsz,
            })
        }
        StructureKind::AncientCity => {
            let rotation = rng.next_int(4);
            let start = 1 + rng.next_int(3);
            let (sx, sz) = (18, 41);
            let (east, south) = (i32::from(x > 0), i32::from(z > 0));
            let (west, north) = (i32::from(x < 0), i32::from(z < 0));
            let (bx, bz, rsx, rsz) = match rotation {
                0 => (-east, -south, sx, sz),
                1 => (west - sz, -south, sz, sx),
                2 => (west - sx, north - sz, sx, sz),
                _ => (-east, north - sx, sz, sx),
            };
            let (cx, cz) = (13, 20);
            let (ox, oz) = match rotation {
                0 => (bx - cx, bz - cz),
                1 => (bx + cz, bz - cx),
                2 => (bx + cx, bz + cz),
                _ => (bx - cz, bz + cx),
            };
            Some(StructureVariant {
                rotation: rotation as u8,
                start: start as u8,
                abandoned: false,
                biome: None,
                x: ox,
                z: oz,
                sx: rsx,
                sy: 31,
                sz: rsz,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: u64 = 12_370_816_993_565;

    #[test]
    fn test_configs_follow_kind_order() {
        let configs = structure_configs();
        for (config, kind) in configs.iter().zip(StructureKind::ALL) {
            assert_eq!(config.kind, kind);
        }
        let triangular: Vec<StructureKind> =
            configs.iter().filter(|c| c.triangular).map(|c| c.kind).collect();
        assert_eq!(triangular, vec![StructureKind::Monument, StructureKind::Mansion]);
        assert_eq!(StructureConfig::of(StructureKind::Mansion).region_blocks(), 1280);
    }

    #[test]
    fn test_offsets_stay_in_range() {
        for config in structure_configs() {
            for reg in -20..20 {
                let (cx, cz) = chunk_in_region(SEED, &config, reg, 7 - reg);
                assert!((0..config.chunk_range).contains(&cx), "{:?} x {cx}", config.kind);
                assert!((0..config.chunk_range).contains(&cz), "{:?} z {cz}", config.kind);
            }
        }
    }

    #[test]
    fn test_positions_are_chunk_aligned() {
        let config = StructureConfig::of(StructureKind::Village);
        let (x, z) = structure_position(SEED, &config, 0, 0).unwrap_or_default();
        assert_eq!((x, z), (0, 128));
        assert_eq!(x & 15, 0);
        assert_eq!(structure_position(SEED, &config, -3, 2), Some((-1392, 1168)));
        let mansion = StructureConfig::of(StructureKind::Mansion);
        assert_eq!(structure_position(SEED, &mansion, 0, 0), Some((48, 64)));
    }

    #[test]
    fn test_outposts_are_thinned() {
        let config = StructureConfig::of(StructureKind::Outpost);
        let attempts = (-30..30)
            .flat_map(|x| (-30..30).map(move |z| (x, z)))
            .filter(|&(x, z)| structure_position(SEED, &config, x, z).is_some())
            .count();
        assert_eq!(attempts, 744, "about one in five of 3600 regions");
    }

    #[test]
    fn test_viable_feature_biomes() {
        assert!(is_viable_feature_biome(StructureKind::Shipwreck, Biome::SnowyBeach));
        assert!(is_viable_feature_biome(StructureKind::Monument, Biome::DeepWarmOcean));
        assert!(!is_viable_feature_biome(StructureKind::Monument, Biome::WarmOcean));
        assert!(!is_viable_feature_biome(StructureKind::Village, Biome::Beach));
        assert!(is_viable_feature_biome(StructureKind::RuinedPortal, Biome::DeepDark));
    }

    #[test]
    fn test_village_variant_footprint() {
        for biome in VILLAGE_BIOMES {
            let variant = structure_variant(SEED, StructureKind::Village, 0, 128, biome);
            let Some(v) = variant else {
                panic!("{biome} has a village table");
            };
            assert!(v.rotation < 4);
            assert!(v.sx > 0 && v.sz > 0);
            if v.rotation % 2 == 0 {
                assert!(v.x <= 0 && v.x > -v.sx);
            }
        }
        let footprint = |x, z, biome| {
            structure_variant(SEED, StructureKind::Village, x, z, biome).map(|v| (v.x, v.z, v.sx, v.sz))
        };
        assert_eq!(footprint(-400, 320, Biome::Plains), Some((-8, 0, 9, 9)));
        assert_eq!(footprint(0, 128, Biome::Desert), Some((-11, 0, 12, 12)));
        assert_eq!(structure_variant(SEED, StructureKind::Village, 0, 128, Biome::Beach), None);
        assert_eq!(structure_variant(SEED, StructureKind::Mansion, 0, 0, Biome::DarkForest), None);
    }

    #[test]
    fn test_meadow_uses_plains_starts() {
        let plains = structure_variant(SEED, StructureKind::Village, 64, -64, Biome::Plains);
        let meadow = structure_variant(SEED, StructureKind::Village, 64, -64, Biome::Meadow);
        let strip = |v: Option<StructureVariant>| v.map(|v| (v.rotation, v.start, v.x, v.z, v.sx, v.sz));
        assert_eq!(strip(plains), strip(meadow));
    }

    #[test]
    fn test_ancient_city_variant() {
        let Some(v) = structure_variant(SEED, StructureKind::AncientCity, -400, 320, Biome::Plains) else {
            panic!("ancient cities always have a variant");
        };
        assert!((1..=3).contains(&v.start));
        assert_eq!(v.sy, 31);
        assert_eq!((v.x, v.z, v.sx, v.sz), (-20, -14, 41, 18), "18 x 41 footprint, rotated");
    }
}
