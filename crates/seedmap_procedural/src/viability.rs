//! # Structure Viability
//!
//! Biome and terrain filters applied to structure attempts.
//!
//! Each kind samples the biome at its own reference point: the chunk centre
//! at the surface for small features, the centre of the start piece for
//! villages and ancient cities, a point under the sea for monuments. Large
//! surface structures also reject terrain that dips too low at the corners
//! of their footprint.

use seedmap_shared::{StructureKind, SURFACE_CELL_Y};

use crate::biome::{Biome, BiomeMask};
use crate::structure::{
    chunk_generate_rnd, is_viable_feature_biome, structure_position, structure_variant,
    StructureConfig, VILLAGE_BIOMES,
};
use crate::world::World;

/// Terrain lower than this at a footprint corner rejects the structure.
const MIN_TERRAIN_DEPTH: f64 = 0.48;

/// Villages closer than this many chunks suppress an outpost.
const OUTPOST_VILLAGE_CLEARANCE: i32 = 10;

/// Monument water check: radius in blocks and centre height.
const MONUMENT_RADIUS: i32 = 29;
const MONUMENT_Y: i32 = 63;

/// Outpost start offsets, by rotation.
const OUTPOST_OFFSETS: [(i32, i32); 4] = [(15, 15), (-15, 15), (-15, -15), (15, -15)];

impl World {
    /// Whether the biomes allow the structure attempt at block `(x, z)`.
    ///
    /// Returns the biome that passed.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn is_viable_structure_position(&self, kind: StructureKind, x: i32, z: i32) -> Option<Biome> {
        let (cx, cz) = (x >> 4, z >> 4);
        let passes = |biome: Biome| is_viable_feature_biome(kind, biome).then_some(biome);

        match kind {
            StructureKind::DesertPyramid
            | StructureKind::JunglePyramid
            | StructureKind::SwampHut
            | StructureKind::Igloo
            | StructureKind::OceanRuins
            | StructureKind::Shipwreck
            | StructureKind::RuinedPortal => {
                passes(self.noise_biome((cx << 2) + 2, SURFACE_CELL_Y, (cz << 2) + 2))
            }
            StructureKind::Village => self.viable_village(x, z),
            StructureKind::Outpost => {
                if self.village_near(cx, cz) {
                    return None;
                }
                let mut rng = chunk_generate_rnd(self.seed(), cx, cz);
                let (ox, oz) = OUTPOST_OFFSETS[rng.next_int(4) as usize & 3];
                let bx = ((cx << 5) + ox) / 2;
                let bz = ((cz << 5) + oz) / 2;
                passes(self.noise_biome(bx >> 2, SURFACE_CELL_Y, bz >> 2))
            }
            StructureKind::Monument => {
                let bx = (cx << 4) + 8;
                let bz = (cz << 4) + 8;
                let biome = passes(self.noise_biome(bx >> 2, 36 >> 2, bz >> 2))?;
                self.are_biomes_viable(
                    bx,
                    MONUMENT_Y,
                    bz,
                    MONUMENT_RADIUS,
                    BiomeMask::MONUMENT_SURROUNDINGS,
                )
                .then_some(biome)
            }
            StructureKind::Mansion => {
                let bx = (cx << 4) + 7;
                let bz = (cz << 4) + 7;
                passes(self.noise_biome(bx >> 2, SURFACE_CELL_Y, bz >> 2))
            }
            StructureKind::AncientCity => {
                let variant = structure_variant(self.seed(), kind, x, z, Biome::DeepDark)?;
                let bx = ((cx << 5) + 2 * variant.x + variant.sx) / 2;
                let bz = ((cz << 5) + 2 * variant.z + variant.sz) / 2;
                passes(self.noise_biome(bx >> 2, -27 >> 2, bz >> 2))
            }
        }
    }

    /// Tries each village start table; the centre of the start piece must lie
    /// in the biome the table belongs to.
    fn viable_village(&self, x: i32, z: i32) -> Option<Biome> {
        let (cx, cz) = (x >> 4, z >> 4);
        for table in VILLAGE_BIOMES {
            let Some(v) = structure_variant(self.seed(), StructureKind::Village, x, z, table) else {
                continue;
            };
            let bx = (cx * 32 + 2 * v.x + v.sx - 1) / 2;
            let bz = (cz * 32 + 2 * v.z + v.sz - 1) / 2;
            let biome = self.noise_biome(bx >> 2, SURFACE_CELL_Y, bz >> 2);
            if biome == table || (table == Biome::Plains && biome == Biome::Meadow) {
                return Some(biome);
            }
        }
        None
    }

    /// Whether a village attempt lands within the outpost clearance.
    fn village_near(&self, cx: i32, cz: i32) -> bool {
        let config = StructureConfig::of(StructureKind::Village);
        let (x0, x1) = (cx - OUTPOST_VILLAGE_CLEARANCE, cx + OUTPOST_VILLAGE_CLEARANCE);
        let (z0, z1) = (cz - OUTPOST_VILLAGE_CLEARANCE, cz + OUTPOST_VILLAGE_CLEARANCE);
        let size = config.region_size;
        for reg_z in z0.div_euclid(size)..=z1.div_euclid(size) {
            for reg_x in x0.div_euclid(size)..=x1.div_euclid(size) {
                let Some((px, pz)) = structure_position(self.seed(), &config, reg_x, reg_z) else {
                    continue;
                };
                let (vx, vz) = (px >> 4, pz >> 4);
                if (x0..=x1).contains(&vx) && (z0..=z1).contains(&vz) {
                    return true;
                }
            }
        }
        false
    }

    /// Whether the terrain under the footprint is high enough.
    ///
    /// Only pyramids and mansions check terrain; every other kind passes.
    #[must_use]
    pub fn is_viable_structure_terrain(&self, kind: StructureKind, x: i32, z: i32) -> bool {
        let (x, z, sx, sz) = match kind {
            StructureKind::DesertPyramid => (x, z, 21, 21),
            StructureKind::JunglePyramid => (x, z, 12, 15),
            StructureKind::Mansion => {
                let (cx, cz) = (x >> 4, z >> 4);
                let (sx, sz) = match chunk_generate_rnd(self.seed(), cx, cz).next_int(4) {
                    0 => (-5, 5),
                    1 => (-5, -5),
                    2 => (5, -5),
                    _ => (5, 5),
                };
                ((cx << 4) + 7, (cz << 4) + 7, sx, sz)
            }
            _ => return true,
        };
        [(x, z), (x + sx, z + sz), (x, z + sz), (x + sx, z)]
            .into_iter()
            .all(|(bx, bz)| self.depth(f64::from(bx) / 4.0, f64::from(bz) / 4.0) >= MIN_TERRAIN_DEPTH)
    }

    /// Whether every 1:4 cell within `radius` blocks of `(x, y, z)` is in `mask`.
    ///
    /// The eight corners are tested before the interior.
    #[must_use]
    pub fn are_biomes_viable(&self, x: i32, y: i32, z: i32, radius: i32, mask: BiomeMask) -> bool {
        let (x0, x1) = ((x - radius) >> 2, (x + radius) >> 2);
        let (y0, y1) = ((y - radius) >> 2, (y + radius) >> 2);
        let (z0, z1) = ((z - radius) >> 2, (z + radius) >> 2);

        for corner in 0..8 {
            let cx = if corner & 4 == 0 { x0 } else { x1 };
            let cy = if corner & 2 == 0 { y0 } else { y1 };
            let cz = if corner & 1 == 0 { z0 } else { z1 };
            if !mask.contains(self.noise_biome(cx, cy, cz)) {
                return false;
            }
        }
        for cy in y0..=y1 {
            for cz in z0..=z1 {
                for cx in x0..=x1 {
                    if !mask.contains(self.noise_biome(cx, cy, cz)) {
                        return false;
                    }
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: u64 = 12_370_816_993_565;

    #[test]
    fn test_known_mansion_is_viable() {
        let world = World::new(SEED);
        assert_eq!(
            world.is_viable_structure_position(StructureKind::Mansion, 48, 64),
            Some(Biome::DarkForest)
        );
        assert!(world.is_viable_structure_terrain(StructureKind::Mansion, 48, 64));
    }

    #[test]
    fn test_terrain_ignores_small_features() {
        let world = World::new(SEED);
        assert!(world.is_viable_structure_terrain(StructureKind::Igloo, 1 << 20, -(1 << 20)));
    }

    #[test]
    fn test_portal_accepts_any_biome() {
        let world = World::new(SEED);
        for (x, z) in [(0, 0), (-3000, 4500), (12_345, -678)] {
            let biome = world.is_viable_structure_position(StructureKind::RuinedPortal, x, z);
            let expected = world.noise_biome(((x >> 4) << 2) + 2, SURFACE_CELL_Y, ((z >> 4) << 2) + 2);
            assert_eq!(biome, Some(expected));
        }
    }

    #[test]
    fn test_biome_box_rejects_foreign_biome() {
        let world = World::new(SEED);
        let here = world.noise_biome(0, 16, 0);
        assert!(world.are_biomes_viable(0, 64, 0, 0, BiomeMask::EMPTY.with(here)));
        let others = BiomeMask::of(&[Biome::IceSpikes]);
        assert_eq!(world.are_biomes_viable(0, 64, 0, 0, others), here == Biome::IceSpikes);
    }
}
