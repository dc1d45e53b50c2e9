//! # Map Constants
//!
//! Defaults used by every consumer of the engine.
//!
//! **NOTE:** Generator constants (salts, amplitude tables, spline points)
//! live next to the code that uses them in `seedmap_procedural` and are
//! never configurable.

// =============================================================================
// SAMPLING
// =============================================================================

/// Default preview height, in the units of the sampling scale.
///
/// At scale 4 this is block 1020, well above the surface, so previews show
/// the surface biome rather than a cave biome.
pub const DEFAULT_Y: i32 = 255;

/// Default sampling scale (one sample per 4x4x4 block cell).
pub const DEFAULT_SCALE: i32 = 4;

/// Block height used by surface structure checks (`319 >> 2` in cell units).
pub const SURFACE_CELL_Y: i32 = 319 >> 2;

// =============================================================================
// MAP PRESETS
// =============================================================================

/// Extent of the small preview preset; the window spans `4 * extent` samples.
pub const SMALL_EXTENT: i32 = 16;

/// Extent of the medium preview preset; the window spans `4 * extent` samples.
pub const MEDIUM_EXTENT: i32 = 32;

/// Extent of the large preview preset; the window spans `4 * extent` samples.
pub const LARGE_EXTENT: i32 = 64;
