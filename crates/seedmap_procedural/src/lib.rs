//! # SEEDMAP Procedural Generation
//!
//! Bit-exact overworld biome and structure generation for 1.18+ worlds.
//!
//! ## Design Principles
//!
//! 1. **Bit-exact**: Every value matches the game generator; there is no approximation
//! 2. **Deterministic**: Same seed always produces the same world
//! 3. **Immutable**: A `World` never changes after construction and is shared across threads
//! 4. **Self-contained**: The classification tree is built from the parameter table at first use
//!
//! ## Core Components
//!
//! - `JavaRandom` / `Xoroshiro`: the two seeded generator families
//! - `PerlinNoise` / `OctaveNoise` / `DoublePerlinNoise`: layered gradient noise
//! - `ClimateNoise`: the six climate fields and quantized climate points
//! - `Spline`: the terrain offset spline
//! - `BiomeTree`: nearest-neighbour biome classification
//! - `voronoi_access`: block-scale smoothing
//! - `StructureConfig`: structure placement, variants and viability
//! - `World`: every per-seed query
//!
//! ## Example
//!
//! ```rust,ignore
//! use seedmap_procedural::{Biome, World};
//! use seedmap_shared::{MapPreset, StructureKind};
//!
//! let world = World::new(12_370_816_993_565);
//!
//! // Block-scale biome at sea level
//! let biome = world.sample_biome(1, 0, 63, 0);
//!
//! // A 64x64 preview at 1:4 and the mansions it covers
//! let grid = world.sample_region(&MapPreset::Large.range(4, 255 >> 2));
//! let config = seedmap_procedural::StructureConfig::of(StructureKind::Mansion);
//! let mansions = world.find_structures(&config, 64, 64, 4);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod biome;
pub mod biome_params;
pub mod biome_tree;
pub mod climate;
pub mod error;
pub mod noise;
pub mod rng;
pub mod spline;
pub mod structure;
pub mod viability;
pub mod voronoi;
pub mod world;

pub use biome::{Biome, BiomeMask};
pub use biome_params::{OverworldBiomeBuilder, Parameter, ParameterPoint};
pub use biome_tree::{overworld_tree, BiomeTree, TreeNode, MAX_TREE_DEPTH};
pub use climate::{ClimateNoise, ClimateParameter, ClimatePoint, NoiseField};
pub use error::{ProceduralError, ProceduralResult};
pub use noise::{DoublePerlinNoise, OctaveNoise, PerlinNoise};
pub use rng::{JavaRandom, Xoroshiro};
pub use spline::{MultiSpline, Spline, SplineAxis};
pub use structure::{
    is_viable_feature_biome, structure_configs, StructureConfig, StructureVariant,
};
pub use voronoi::{source_range, voronoi_access, voronoi_seed_hash};
pub use world::World;
