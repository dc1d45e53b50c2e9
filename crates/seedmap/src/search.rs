//! # Seed Search
//!
//! Scans many seeds for a structure close to the origin.
//!
//! ## Architecture
//!
//! ```text
//!                      ┌──> [Worker 1] ──┐
//!   [Seed source] ─────┼──> [Worker 2] ──┼──> [Mutex<Vec<SearchHit>>] ──> sort
//!   (bounded channel)  └──> [Worker N] ──┘
//! ```
//!
//! Each worker builds the [`World`] for every seed it receives and drops it
//! when done. Seeds come either from a contiguous range or from a ChaCha8
//! stream, so a random search replays exactly from its rng seed.

use std::thread;

use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use seedmap_procedural::{StructureConfig, World};
use seedmap_shared::{StructureKind, StructurePosition};

use crate::error::{SeedMapError, SeedMapResult};

/// Scale the search window is expressed in.
const SEARCH_SCALE: i32 = 4;

/// Seeds queued per worker before the producer blocks.
const QUEUE_DEPTH: usize = 64;

/// Where candidate seeds come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedSource {
    /// `count` consecutive seeds starting at `from`.
    Range {
        /// First seed
        from: i64,
        /// Number of seeds
        count: u64,
    },
    /// `count` seeds drawn from a ChaCha8 stream.
    Random {
        /// Seed of the stream
        rng_seed: u64,
        /// Number of seeds
        count: u64,
    },
}

impl SeedSource {
    /// Number of candidates.
    #[must_use]
    pub const fn count(&self) -> u64 {
        match *self {
            Self::Range { count, .. } | Self::Random { count, .. } => count,
        }
    }

    /// The candidate seeds, in order.
    #[allow(clippy::cast_possible_wrap)]
    pub fn seeds(&self) -> Box<dyn Iterator<Item = i64>> {
        match *self {
            Self::Range { from, count } => {
                Box::new((0..count).map(move |i| from.wrapping_add(i as i64)))
            }
            Self::Random { rng_seed, count } => {
                let mut rng = ChaCha8Rng::seed_from_u64(rng_seed);
                Box::new((0..count).map(move |_| rng.gen::<i64>()))
            }
        }
    }
}

/// A seed that passed the search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchHit {
    /// The seed
    pub seed: i64,
    /// Nearest matching structure
    pub position: StructurePosition,
}

/// What a seed must have to count as a hit.
#[derive(Clone, Debug)]
pub struct SeedSearch {
    kinds: Vec<StructureKind>,
    max_distance: i32,
    threads: usize,
}

impl SeedSearch {
    /// A search for any of `kinds` within `max_distance` blocks of the origin.
    ///
    /// # Errors
    ///
    /// Returns [`SeedMapError::NoSearchKinds`] if `kinds` is empty.
    pub fn new(kinds: Vec<StructureKind>, max_distance: i32, threads: usize) -> SeedMapResult<Self> {
        if kinds.is_empty() {
            return Err(SeedMapError::NoSearchKinds);
        }
        Ok(Self {
            kinds,
            max_distance: max_distance.max(0),
            threads: threads.max(1),
        })
    }

    /// Kinds searched for.
    #[must_use]
    pub fn kinds(&self) -> &[StructureKind] {
        &self.kinds
    }

    /// Nearest structure of a searched kind within range, if any.
    #[must_use]
    pub fn check(&self, world: &World) -> Option<StructurePosition> {
        let extent = (self.max_distance + 2 * SEARCH_SCALE - 1) / (2 * SEARCH_SCALE);
        let limit = i64::from(self.max_distance) * i64::from(self.max_distance);
        self.kinds
            .iter()
            .flat_map(|&kind| {
                world.find_structures(&StructureConfig::of(kind), extent, extent, SEARCH_SCALE)
            })
            .filter(|pos| pos.distance_squared() <= limit)
            .min_by_key(StructurePosition::distance_squared)
    }

    /// Checks one seed.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn check_seed(&self, seed: i64) -> Option<SearchHit> {
        let world = World::new(seed as u64);
        self.check(&world).map(|position| SearchHit { seed, position })
    }

    /// Checks every seed of `source` on the worker threads.
    ///
    /// Hits are returned sorted by seed.
    #[must_use]
    pub fn run(&self, source: &SeedSource) -> Vec<SearchHit> {
        let hits: Mutex<Vec<SearchHit>> = Mutex::new(Vec::new());
        let (sender, receiver) = crossbeam_channel::bounded::<i64>(QUEUE_DEPTH * self.threads);

        tracing::info!(
            candidates = source.count(),
            threads = self.threads,
            max_distance = self.max_distance,
            "Starting seed search"
        );

        thread::scope(|scope| {
            for _ in 0..self.threads {
                let receiver = receiver.clone();
                let hits = &hits;
                scope.spawn(move || {
                    for seed in receiver {
                        if let Some(hit) = self.check_seed(seed) {
                            tracing::debug!(seed, x = hit.position.x, z = hit.position.z, "Hit");
                            hits.lock().push(hit);
                        }
                    }
                });
            }
            drop(receiver);

            for seed in source.seeds() {
                if sender.send(seed).is_err() {
                    break;
                }
            }
            drop(sender);
        });

        let mut hits = hits.into_inner();
        hits.sort_unstable_by_key(|hit| hit.seed);
        tracing::info!(hits = hits.len(), "Seed search finished");
        hits
    }
}
