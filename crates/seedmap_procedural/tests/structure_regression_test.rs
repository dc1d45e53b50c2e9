//! # Structure Regression Tests
//!
//! Structure search results for known seeds, captured from the game
//! generator, plus the invariants every search result must satisfy.

use seedmap_procedural::{structure_configs, StructureConfig, World};
use seedmap_shared::{StructureKind, StructurePosition};

const SEED: u64 = 12_370_816_993_565;

fn find(world: &World, kind: StructureKind, extent: i32) -> Vec<(i32, i32)> {
    world
        .find_structures(&StructureConfig::of(kind), extent, extent, 4)
        .into_iter()
        .map(|p| (p.x, p.z))
        .collect()
}

/// Test: The mansion next to spawn on the reference seed.
#[test]
fn test_reference_mansion() {
    let world = World::new(SEED);
    assert_eq!(find(&world, StructureKind::Mansion, 64), vec![(48, 64)]);
}

/// Test: Every kind on the reference seed, large preset.
#[test]
fn test_reference_seed_all_kinds() {
    let world = World::new(SEED);
    let expected: [(StructureKind, Vec<(i32, i32)>); 12] = [
        (StructureKind::DesertPyramid, vec![]),
        (StructureKind::JunglePyramid, vec![]),
        (StructureKind::SwampHut, vec![]),
        (StructureKind::Igloo, vec![]),
        (StructureKind::Village, vec![(0, 128)]),
        (
            StructureKind::OceanRuins,
            vec![
                (-480, 144),
                (-320, -192),
                (-176, 16),
                (-288, 432),
                (64, -304),
                (96, 144),
                (144, 448),
                (368, -272),
                (336, 160),
                (320, 464),
            ],
        ),
        (
            StructureKind::Shipwreck,
            vec![(-496, 96), (-176, -192), (-160, 496), (32, -320), (112, 144), (272, 496)],
        ),
        (StructureKind::RuinedPortal, vec![(0, -464), (304, 336)]),
        (StructureKind::Monument, vec![(-256, -480)]),
        (StructureKind::Mansion, vec![(48, 64)]),
        (StructureKind::Outpost, vec![]),
        (StructureKind::AncientCity, vec![]),
    ];
    for (kind, positions) in expected {
        assert_eq!(find(&world, kind, 64), positions, "{kind}");
    }
}

/// Test: Swamp huts, villages, a monument and an ancient city on seed 42.
#[test]
fn test_seed_42_wide_window() {
    let world = World::new(42);
    assert_eq!(find(&world, StructureKind::SwampHut, 128), vec![(-816, -368), (-272, 352)]);
    assert_eq!(find(&world, StructureKind::Village, 128), vec![(848, -880), (656, -304)]);
    assert_eq!(find(&world, StructureKind::Monument, 128), vec![(784, -176)]);
    assert_eq!(find(&world, StructureKind::AncientCity, 128), vec![(816, -752)]);
    assert_eq!(
        find(&world, StructureKind::Shipwreck, 128),
        vec![
            (-736, 448),
            (-224, -944),
            (192, 448),
            (288, 960),
            (672, 608),
            (640, 880),
            (768, -272),
            (880, 576)
        ]
    );
}

/// Test: Villages on seed 0 in a wide window.
#[test]
fn test_seed_0_villages() {
    let world = World::new(0);
    assert_eq!(find(&world, StructureKind::Village, 128), vec![(272, 944), (608, 720)]);
}

/// Test: Results are unique, inside the window and tagged with their kind.
#[test]
fn test_search_invariants() {
    let world = World::new(42);
    for config in structure_configs() {
        let found: Vec<StructurePosition> = world.find_structures(&config, 96, 96, 4);
        let limit = 96 * 4 * 2;
        for (i, pos) in found.iter().enumerate() {
            assert_eq!(pos.kind, config.kind);
            assert!(pos.x.abs() <= limit && pos.z.abs() <= limit, "{pos:?} outside window");
            assert!(!found[i + 1..].contains(pos), "{pos:?} listed twice");
        }
    }
}

/// Test: Village variants exist for every village found.
#[test]
fn test_found_villages_have_variants() {
    let world = World::new(42);
    for pos in world.find_structures(&StructureConfig::of(StructureKind::Village), 128, 128, 4) {
        let biome = world
            .is_viable_structure_position(StructureKind::Village, pos.x, pos.z)
            .expect("found villages are viable");
        assert!(world.structure_variant(StructureKind::Village, pos.x, pos.z, biome).is_some());
    }
}
