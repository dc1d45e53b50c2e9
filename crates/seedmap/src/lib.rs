//! # SEEDMAP
//!
//! Map preview and seed search on top of `seedmap_procedural`.
//!
//! ## Design Principles
//!
//! 1. **Thin**: No generation logic; every biome and structure comes from the engine
//! 2. **Replayable**: A search is fully determined by its arguments
//! 3. **Configured once**: `seedmap.toml` is read at start-up and never again
//!
//! ## Core Components
//!
//! - `SeedMapConfig`: the `[map]` and `[search]` config sections
//! - `parse_seed`: seed text to world seed
//! - `MapSession`: a world plus the preview window over it
//! - `SeedSearch`: multi-threaded search for structures near spawn
//!
//! ## Example
//!
//! ```rust,ignore
//! use seedmap::{parse_seed, MapSession, SeedMapConfig};
//!
//! let config = SeedMapConfig::default();
//! let mut session = MapSession::new(parse_seed("Glacier")?, config.map)?;
//! let histogram = session.biome_histogram()?;
//! let structures = session.structures();
//!
//! // Same window, another seed
//! session.set_seed(parse_seed("12370816993565")?);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod search;
pub mod seed;
pub mod session;

pub use config::{MapConfig, SearchConfig, SeedMapConfig, SUPPORTED_SCALES};
pub use error::{SeedMapError, SeedMapResult};
pub use search::{SearchHit, SeedSearch, SeedSource};
pub use seed::{java_string_hash, parse_seed};
pub use session::MapSession;
