//! # Tool Error Types
//!
//! Everything the preview and search front end can fail on: reading the
//! config file, parsing it, and handing bad input to the engine.

use seedmap_procedural::ProceduralError;
use seedmap_shared::ProtocolError;
use thiserror::Error;

/// Errors raised by the seedmap tool.
#[derive(Error, Debug)]
pub enum SeedMapError {
    /// Reading a file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for [`crate::SeedMapConfig`].
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// The engine rejected a query.
    #[error(transparent)]
    Procedural(#[from] ProceduralError),

    /// A boundary value failed to parse or validate.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The seed text is empty.
    #[error("seed text is empty")]
    EmptySeed,

    /// A search was requested without any structure kind.
    #[error("no structure kinds to search for")]
    NoSearchKinds,

    /// Sampling scale outside the supported set.
    #[error("unsupported scale {0}: expected 1, 4, 16, 64 or 256")]
    UnsupportedScale(i32),
}

/// Result type for tool operations.
pub type SeedMapResult<T> = Result<T, SeedMapError>;
