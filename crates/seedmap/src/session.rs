//! # Preview Session
//!
//! The state behind an interactive map preview: the current seed's
//! [`World`] and the window being shown.
//!
//! Building a world is the expensive step, so the session keeps it until the
//! seed changes. Switching preset, scale or height only changes what is
//! sampled next.

use std::collections::BTreeMap;

use seedmap_procedural::{structure_configs, Biome, StructureConfig, World};
use seedmap_shared::{MapPreset, Range, StructureKind, StructurePosition};

use crate::config::MapConfig;
use crate::error::SeedMapResult;

/// One preview: a world plus the window over it.
#[derive(Debug)]
pub struct MapSession {
    world: World,
    map: MapConfig,
}

impl MapSession {
    /// Opens a session on `seed`.
    ///
    /// # Errors
    ///
    /// Returns an error if the map settings are not sampleable.
    pub fn new(seed: u64, map: MapConfig) -> SeedMapResult<Self> {
        map.validate()?;
        Ok(Self {
            world: World::new(seed),
            map,
        })
    }

    /// The world being previewed.
    #[inline]
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Current map settings.
    #[inline]
    #[must_use]
    pub const fn map(&self) -> &MapConfig {
        &self.map
    }

    /// Switches to `seed`, rebuilding the world only if it differs.
    ///
    /// Returns whether a new world was built.
    pub fn set_seed(&mut self, seed: u64) -> bool {
        if self.world.seed() == seed {
            return false;
        }
        self.world = World::new(seed);
        true
    }

    /// Switches the window size.
    pub fn set_preset(&mut self, preset: MapPreset) {
        self.map.preset = preset;
    }

    /// Replaces the map settings.
    ///
    /// # Errors
    ///
    /// Returns an error and keeps the old settings if `map` is invalid.
    pub fn set_map(&mut self, map: MapConfig) -> SeedMapResult<()> {
        map.validate()?;
        self.map = map;
        Ok(())
    }

    /// The biome range of the current window.
    #[must_use]
    pub const fn range(&self) -> Range {
        self.map.range()
    }

    /// Biomes of the window, row by row along x.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine rejects the range.
    pub fn biome_grid(&self) -> SeedMapResult<Vec<Biome>> {
        Ok(self.world.checked_region(&self.range())?)
    }

    /// Count of each biome in the window.
    ///
    /// # Errors
    ///
    /// Same as [`MapSession::biome_grid`].
    pub fn biome_histogram(&self) -> SeedMapResult<BTreeMap<Biome, usize>> {
        let mut histogram = BTreeMap::new();
        for biome in self.biome_grid()? {
            *histogram.entry(biome).or_default() += 1;
        }
        Ok(histogram)
    }

    /// Structures of one kind covered by the window.
    #[must_use]
    pub fn structures_of(&self, kind: StructureKind) -> Vec<StructurePosition> {
        let (sx, sz) = self.map.preset.extent();
        let config = StructureConfig::of(kind);
        self.world.find_structures(&config, sx, sz, self.map.scale)
    }

    /// Structures of every kind covered by the window, kind by kind.
    #[must_use]
    pub fn structures(&self) -> Vec<StructurePosition> {
        let (sx, sz) = self.map.preset.extent();
        let found: Vec<StructurePosition> = structure_configs()
            .iter()
            .flat_map(|config| self.world.find_structures(config, sx, sz, self.map.scale))
            .collect();
        tracing::debug!(
            seed = self.world.seed(),
            preset = ?self.map.preset,
            found = found.len(),
            "Collected preview structures"
        );
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: u64 = 12_370_816_993_565;

    #[test]
    fn test_seed_change_rebuilds_once() {
        let mut session = MapSession::new(SEED, MapConfig::default()).unwrap();
        assert!(!session.set_seed(SEED));
        assert!(session.set_seed(42));
        assert_eq!(session.world().seed(), 42);
        assert!(!session.set_seed(42));
    }

    #[test]
    fn test_grid_matches_preset() {
        let mut session = MapSession::new(SEED, MapConfig::default()).unwrap();
        session.set_preset(MapPreset::Small);
        let grid = session.biome_grid().unwrap();
        assert_eq!(grid.len(), 64 * 64);
        assert_eq!(grid, session.world().sample_region(&MapPreset::Small.range(4, 255)));
        let total: usize = session.biome_histogram().unwrap().values().sum();
        assert_eq!(total, 64 * 64);
    }

    #[test]
    fn test_bad_map_is_rejected() {
        let bad = MapConfig {
            scale: 3,
            ..MapConfig::default()
        };
        assert!(MapSession::new(SEED, bad.clone()).is_err());
        let mut session = MapSession::new(SEED, MapConfig::default()).unwrap();
        assert!(session.set_map(bad).is_err());
        assert_eq!(session.map().scale, 4);
    }

    #[test]
    fn test_structures_cover_all_kinds() {
        let session = MapSession::new(SEED, MapConfig::default()).unwrap();
        let all = session.structures();
        assert!(all.contains(&StructurePosition {
            x: 48,
            z: 64,
            kind: StructureKind::Mansion
        }));
        let villages = session.structures_of(StructureKind::Village);
        assert_eq!(villages.len(), 1);
        assert_eq!(
            all.iter().filter(|p| p.kind == StructureKind::Village).count(),
            1
        );
    }
}
