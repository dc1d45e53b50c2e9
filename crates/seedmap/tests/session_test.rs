//! # Preview Session Integration Tests
//!
//! A session opened from a config file previews the same blocks for biomes
//! and structures.

use seedmap::{parse_seed, MapSession, SeedMapConfig};
use seedmap_procedural::Biome;
use seedmap_shared::{MapPreset, StructureKind};

/// Test: Config file to session to biome grid.
#[test]
fn test_session_from_config() {
    let config =
        SeedMapConfig::from_toml_str("[map]\npreset = \"medium\"\nscale = 16\ny = 16\n").unwrap();
    let session = MapSession::new(parse_seed("12370816993565").unwrap(), config.map).unwrap();
    let range = session.range();
    assert_eq!((range.x, range.z, range.sx, range.sz), (-64, -64, 128, 128));
    assert_eq!(session.biome_grid().unwrap().len(), 128 * 128);
}

/// Test: The reference seed's spawn window at 1:4.
#[test]
fn test_reference_preview() {
    let config = SeedMapConfig::default();
    let mut session = MapSession::new(12_370_816_993_565, config.map).unwrap();
    session.set_preset(MapPreset::Small);
    let histogram = session.biome_histogram().unwrap();
    assert!(histogram.contains_key(&Biome::Ocean));

    session.set_preset(MapPreset::Large);
    let structures = session.structures();
    let monuments: Vec<(i32, i32)> = structures
        .iter()
        .filter(|p| p.kind == StructureKind::Monument)
        .map(|p| (p.x, p.z))
        .collect();
    assert_eq!(monuments, vec![(-256, -480)]);
}

/// Test: Text seeds preview the world of their string hash.
#[test]
fn test_text_seed_session() {
    let config = SeedMapConfig::default();
    let session = MapSession::new(parse_seed("Glacier").unwrap(), config.map).unwrap();
    assert_eq!(session.world().seed(), 1_772_835_215);
}
