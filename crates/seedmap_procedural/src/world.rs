//! # World
//!
//! Every per-seed query: biome points and regions, climate, structures.
//!
//! A [`World`] owns the six climate fields, the offset spline and the Voronoi
//! seed hash, and borrows the process-wide biome tree. Nothing in it changes
//! after construction, so one world is shared freely across threads; a new
//! seed means a new world.

use seedmap_shared::{Range, StructureKind, StructurePosition};

use crate::biome::Biome;
use crate::biome_tree::{overworld_tree, BiomeTree};
use crate::climate::{ClimateNoise, ClimateParameter, ClimatePoint, NoiseField};
use crate::error::ProceduralResult;
use crate::spline::Spline;
use crate::structure::{self, StructureConfig, StructureVariant};
use crate::voronoi::{source_range, voronoi_access, voronoi_seed_hash};

/// Generation state for one seed.
#[derive(Clone, Debug)]
pub struct World {
    seed: u64,
    climate: ClimateNoise,
    spline: Spline,
    hash: u64,
    tree: &'static BiomeTree,
}

impl World {
    /// Builds the generator state for `seed`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn new(seed: u64) -> Self {
        let climate = ClimateNoise::new(seed);
        let octaves: usize = NoiseField::ALL
            .iter()
            .map(|&field| {
                let (first, second) = climate.field(field).octave_counts();
                first + second
            })
            .sum();
        let tree = overworld_tree();
        let world = Self {
            seed,
            climate,
            spline: Spline::overworld_offset(),
            hash: voronoi_seed_hash(seed),
            tree,
        };
        tracing::debug!(
            seed = seed as i64,
            octaves,
            tree_nodes = tree.len(),
            "Created world"
        );
        world
    }

    /// The world seed.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// The SHA-256 seed hash used by Voronoi smoothing.
    #[inline]
    #[must_use]
    pub const fn voronoi_hash(&self) -> u64 {
        self.hash
    }

    /// The climate fields of this seed.
    #[inline]
    #[must_use]
    pub const fn climate(&self) -> &ClimateNoise {
        &self.climate
    }

    /// Quantized climate at a 1:4 position, with the coordinate shift.
    #[must_use]
    pub fn climate_at(&self, x: i32, y: i32, z: i32) -> ClimatePoint {
        self.climate.sample_point(&self.spline, x, y, z, true)
    }

    /// Raw biome lookup at a 1:4 position.
    #[must_use]
    pub fn noise_biome(&self, x: i32, y: i32, z: i32) -> Biome {
        self.tree.classify(&self.climate_at(x, y, z))
    }

    fn unshifted_biome(&self, x: i32, y: i32, z: i32) -> Biome {
        let point = self.climate.sample_point(&self.spline, x, y, z, false);
        self.tree.classify(&point)
    }

    /// Terrain depth at a 1:4 horizontal position, without shift.
    #[must_use]
    pub fn depth(&self, x: f64, z: f64) -> f64 {
        self.climate.depth(&self.spline, x, z)
    }

    /// One climate field at a 1:4 horizontal position, without shift.
    ///
    /// Depth has no field of its own; it returns the surface depth the
    /// terrain filters use.
    #[must_use]
    pub fn sample_climate_parameter(&self, parameter: ClimateParameter, x: f64, z: f64) -> f64 {
        match parameter.field() {
            Some(field) => self.climate.sample(field, x, 0.0, z),
            None => self.depth(x, z),
        }
    }

    /// Biome at one position in units of `scale`.
    ///
    /// Scale 1 is block resolution with Voronoi smoothing; scale 4 is the
    /// native biome resolution; larger scales sample cell centres.
    #[must_use]
    pub fn sample_biome(&self, scale: i32, x: i32, y: i32, z: i32) -> Biome {
        match scale {
            1 => {
                let (cx, cy, cz) = voronoi_access(self.hash, x, y, z);
                self.noise_biome(cx, cy, cz)
            }
            _ if scale <= 4 => self.noise_biome(x, y, z),
            _ => {
                let cell = scale / 4;
                let mid = scale / 8;
                self.unshifted_biome(x * cell + mid, y, z * cell + mid)
            }
        }
    }

    /// Biomes of a range, nested y, then z, then x.
    ///
    /// Negative extents give an empty result; `sy == 0` counts as one layer.
    #[must_use]
    pub fn sample_region(&self, range: &Range) -> Vec<Biome> {
        let volume = range.volume();
        let mut out = Vec::with_capacity(volume);
        if volume == 0 {
            return out;
        }
        if range.scale == 1 && volume > 1 {
            return self.sample_smoothed_region(range);
        }
        for k in 0..range.height() {
            for j in 0..range.sz {
                for i in 0..range.sx {
                    out.push(self.sample_biome(range.scale, range.x + i, range.y + k, range.z + j));
                }
            }
        }
        out
    }

    /// Scale-1 regions read a precomputed 1:4 source range.
    #[allow(clippy::cast_sign_loss)]
    fn sample_smoothed_region(&self, range: &Range) -> Vec<Biome> {
        let src = source_range(range);
        let cells = self.sample_region(&src);
        let (sx, sz) = (src.sx as usize, src.sz as usize);
        let mut out = Vec::with_capacity(range.volume());
        for k in 0..range.height() {
            for j in 0..range.sz {
                for i in 0..range.sx {
                    let (cx, cy, cz) =
                        voronoi_access(self.hash, range.x + i, range.y + k, range.z + j);
                    let index = ((cy - src.y) as usize * sz + (cz - src.z) as usize) * sx
                        + (cx - src.x) as usize;
                    out.push(cells[index]);
                }
            }
        }
        out
    }

    /// [`World::sample_region`] after validating the range.
    ///
    /// # Errors
    ///
    /// Returns an error for a negative extent or an unsupported scale.
    pub fn checked_region(&self, range: &Range) -> ProceduralResult<Vec<Biome>> {
        range.validate()?;
        Ok(self.sample_region(range))
    }

    /// Placement constants of every supported structure kind.
    #[must_use]
    pub fn structure_configs(&self) -> [StructureConfig; 12] {
        structure::structure_configs()
    }

    /// Attempt position of `config` in region `(reg_x, reg_z)`.
    #[must_use]
    pub fn structure_position(
        &self,
        config: &StructureConfig,
        reg_x: i32,
        reg_z: i32,
    ) -> Option<StructurePosition> {
        structure::structure_position(self.seed, config, reg_x, reg_z).map(|(x, z)| {
            StructurePosition {
                x,
                z,
                kind: config.kind,
            }
        })
    }

    /// Start-piece variant of the structure at block `(x, z)`.
    #[must_use]
    pub fn structure_variant(
        &self,
        kind: StructureKind,
        x: i32,
        z: i32,
        biome: Biome,
    ) -> Option<StructureVariant> {
        structure::structure_variant(self.seed, kind, x, z, biome)
    }

    /// Every structure of one kind inside a window around the origin.
    ///
    /// The window spans `sx * scale * 2` blocks either side of the origin on
    /// x (likewise z), matching a map preset of extent `(sx, sz)` at `scale`.
    /// Results are in region order, without duplicates.
    #[must_use]
    pub fn find_structures(
        &self,
        config: &StructureConfig,
        sx: i32,
        sz: i32,
        scale: i32,
    ) -> Vec<StructurePosition> {
        let (x1, z1) = (sx * scale * 2, sz * scale * 2);
        let (x0, z0) = (-x1, -z1);
        let region = config.region_blocks();

        let mut found: Vec<StructurePosition> = Vec::new();
        let mut attempts = 0usize;
        for reg_x in x0.div_euclid(region)..=(x1 - 1).div_euclid(region) {
            for reg_z in z0.div_euclid(region)..=(z1 - 1).div_euclid(region) {
                let Some(pos) = self.structure_position(config, reg_x, reg_z) else {
                    continue;
                };
                attempts += 1;
                if !(x0..=x1).contains(&pos.x) || !(z0..=z1).contains(&pos.z) {
                    continue;
                }
                if self.is_viable_structure_position(config.kind, pos.x, pos.z).is_none() {
                    continue;
                }
                if !self.is_viable_structure_terrain(config.kind, pos.x, pos.z) {
                    continue;
                }
                if !found.contains(&pos) {
                    found.push(pos);
                }
            }
        }

        tracing::debug!(
            kind = %config.kind,
            attempts,
            found = found.len(),
            "Structure search finished"
        );
        found
    }
}
