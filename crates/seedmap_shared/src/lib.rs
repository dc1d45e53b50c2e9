//! # SEEDMAP Shared
//!
//! Common types used by the engine and by every tool built on it.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER contain generator logic. Noise tables, splines and
//! the biome tree belong in `seedmap_procedural`.
//!
//! ## Contents
//!
//! - [`math`]: fixed-width wrapping arithmetic the generators are written in
//! - [`protocol`]: query ranges, structure kinds, structure positions, presets
//! - [`constants`]: sampling defaults and preset extents

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod math;
pub mod protocol;

pub use constants::{DEFAULT_SCALE, DEFAULT_Y, SURFACE_CELL_Y};
pub use protocol::{MapPreset, ProtocolError, Range, StructureKind, StructurePosition};
