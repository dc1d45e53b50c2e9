//! # Tool Configuration
//!
//! `seedmap.toml`, loaded once at start-up. Every section and every field
//! has a default, so an empty file (or no file at all) is a valid config.
//!
//! ```toml
//! [map]
//! preset = "large"
//! scale = 4
//! y = 255
//!
//! [search]
//! threads = 4
//! structures = ["mansion"]
//! max_distance = 512
//! ```

use std::path::Path;

use seedmap_shared::{MapPreset, Range, StructureKind, DEFAULT_SCALE, DEFAULT_Y};
use serde::{Deserialize, Serialize};

use crate::error::{SeedMapError, SeedMapResult};

/// Scales the preview accepts.
pub const SUPPORTED_SCALES: [i32; 5] = [1, 4, 16, 64, 256];

/// The whole config file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedMapConfig {
    /// Preview window settings.
    pub map: MapConfig,
    /// Seed search settings.
    pub search: SearchConfig,
}

/// `[map]`: what a preview samples.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Window size.
    pub preset: MapPreset,
    /// Cells per sample; 1 is Voronoi-smoothed block scale.
    pub scale: i32,
    /// Sample height, in units of `scale`.
    pub y: i32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            preset: MapPreset::Large,
            scale: DEFAULT_SCALE,
            y: DEFAULT_Y,
        }
    }
}

impl MapConfig {
    /// The biome range of the configured preset.
    #[must_use]
    pub const fn range(&self) -> Range {
        self.preset.range(self.scale, self.y)
    }

    /// Rejects scales the engine does not sample at.
    ///
    /// # Errors
    ///
    /// Returns [`SeedMapError::UnsupportedScale`] for any scale outside
    /// [`SUPPORTED_SCALES`].
    pub fn validate(&self) -> SeedMapResult<()> {
        if !SUPPORTED_SCALES.contains(&self.scale) {
            return Err(SeedMapError::UnsupportedScale(self.scale));
        }
        self.range().validate()?;
        Ok(())
    }
}

/// `[search]`: defaults for the `search` command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Worker threads.
    pub threads: usize,
    /// Kinds a seed must have near the origin (any one of them).
    pub structures: Vec<StructureKind>,
    /// Maximum distance from the origin, in blocks.
    pub max_distance: i32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threads: 4,
            structures: vec![StructureKind::Mansion],
            max_distance: 512,
        }
    }
}

impl SeedMapConfig {
    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed TOML, unknown preset or structure
    /// names, or an unsupported scale.
    pub fn from_toml_str(text: &str) -> SeedMapResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.map.validate()?;
        Ok(config)
    }

    /// Loads the config at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn load(path: &Path) -> SeedMapResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Loads `path` if given, otherwise the defaults.
    ///
    /// # Errors
    ///
    /// Same as [`SeedMapConfig::load`].
    pub fn load_or_default(path: Option<&Path>) -> SeedMapResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_defaults() {
        let config = SeedMapConfig::from_toml_str("").unwrap();
        assert_eq!(config, SeedMapConfig::default());
        assert_eq!(config.map.range(), MapPreset::Large.range(4, 255));
    }

    #[test]
    fn test_partial_sections() {
        let config = SeedMapConfig::from_toml_str(
            "[map]\npreset = \"small\"\n\n[search]\nstructures = [\"village\", \"ancient_city\"]\n",
        )
        .unwrap();
        assert_eq!(config.map.preset, MapPreset::Small);
        assert_eq!(config.map.scale, 4);
        assert_eq!(config.search.threads, 4);
        assert_eq!(
            config.search.structures,
            vec![StructureKind::Village, StructureKind::AncientCity]
        );
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            SeedMapConfig::from_toml_str("[map]\nscale = 8\n"),
            Err(SeedMapError::UnsupportedScale(8))
        ));
        assert!(matches!(
            SeedMapConfig::from_toml_str("[map]\npreset = \"huge\"\n"),
            Err(SeedMapError::Config(_))
        ));
        assert!(matches!(
            SeedMapConfig::from_toml_str("[search]\nstructures = [\"castle\"]\n"),
            Err(SeedMapError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let missing = Path::new("/nonexistent/seedmap.toml");
        assert!(matches!(SeedMapConfig::load(missing), Err(SeedMapError::Io(_))));
        assert!(SeedMapConfig::load_or_default(None).is_ok());
    }
}
