//! # Procedural Error Types
//!
//! Recoverable errors raised at the engine boundary.
//!
//! Generation itself never fails: every seed, coordinate and range produces a
//! result. Broken generator constants (malformed splines, an oversized biome
//! tree, an inconsistent variant table) are build defects and panic instead.

use seedmap_shared::ProtocolError;
use thiserror::Error;

/// Errors that can occur when validating input for the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProceduralError {
    /// A boundary value failed validation.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Biome name not known to the generator.
    #[error("unknown biome: {0}")]
    UnknownBiome(String),

    /// Numeric biome id not produced by the overworld generator.
    #[error("unknown biome id: {0}")]
    UnknownBiomeId(u8),
}

/// Result type for engine boundary operations.
pub type ProceduralResult<T> = Result<T, ProceduralError>;
