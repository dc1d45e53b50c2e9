//! # SEEDMAP Command Line
//!
//! Biome lookups, window previews and seed searches from the terminal.
//!
//! ## Usage
//!
//! ```bash
//! # Biome under a block
//! seedmap biome --seed 12370816993565 --x 0 --y 63 --z 0 --scale 1
//!
//! # Biome histogram and every structure in the large window
//! seedmap preview --seed Glacier --preset large
//!
//! # Mansions within 1000 blocks, first 10000 seeds, 8 threads
//! seedmap search --from 0 --count 10000 --kind mansion --max-distance 1000 --threads 8
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use seedmap::{
    parse_seed, MapConfig, MapSession, SeedMapConfig, SeedMapResult, SeedSearch, SeedSource,
};
use seedmap_procedural::World;
use seedmap_shared::{MapPreset, StructureKind};

#[derive(Parser, Debug)]
#[command(author, version, about = "Minecraft 1.18+ biome and structure finder", long_about = None)]
struct Cli {
    /// Path to seedmap.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the biome at one position
    Biome {
        /// World seed (number or text)
        #[arg(long, value_parser = parse_seed, allow_hyphen_values = true)]
        seed: u64,
        /// X in units of the scale
        #[arg(long, allow_hyphen_values = true)]
        x: i32,
        /// Y in units of the scale
        #[arg(long, allow_hyphen_values = true)]
        y: i32,
        /// Z in units of the scale
        #[arg(long, allow_hyphen_values = true)]
        z: i32,
        /// Blocks per sample: 1, 4, 16, 64 or 256
        #[arg(long, default_value_t = 1)]
        scale: i32,
    },
    /// Print the biome histogram and all structures of a preview window
    Preview {
        /// World seed (number or text)
        #[arg(long, value_parser = parse_seed, allow_hyphen_values = true)]
        seed: u64,
        /// Window size: small, medium or large
        #[arg(long)]
        preset: Option<MapPreset>,
    },
    /// List the structures of one kind in a preview window
    Structures {
        /// World seed (number or text)
        #[arg(long, value_parser = parse_seed, allow_hyphen_values = true)]
        seed: u64,
        /// Structure kind, e.g. village or ancient_city
        #[arg(long)]
        kind: StructureKind,
        /// Window size: small, medium or large
        #[arg(long)]
        preset: Option<MapPreset>,
    },
    /// Scan many seeds for a structure near the origin
    Search {
        /// First seed of the scan
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        from: i64,
        /// Number of seeds to check
        #[arg(long)]
        count: u64,
        /// Structure kind; defaults to the config's list
        #[arg(long)]
        kind: Option<StructureKind>,
        /// Maximum distance from the origin, in blocks
        #[arg(long)]
        max_distance: Option<i32>,
        /// Worker threads
        #[arg(long)]
        threads: Option<usize>,
        /// Draw seeds at random instead of scanning a range
        #[arg(long, requires = "rng_seed")]
        random: bool,
        /// Seed of the random candidate stream
        #[arg(long)]
        rng_seed: Option<u64>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> SeedMapResult<()> {
    let config = SeedMapConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Command::Biome {
            seed,
            x,
            y,
            z,
            scale,
        } => {
            let map = MapConfig {
                scale,
                ..config.map
            };
            map.validate()?;
            let biome = World::new(seed).sample_biome(scale, x, y, z);
            println!("{} ({})", biome.name(), biome.id());
        }
        Command::Preview { seed, preset } => {
            let session = open_session(seed, config.map, preset)?;
            print_preview(&session)?;
        }
        Command::Structures { seed, kind, preset } => {
            let session = open_session(seed, config.map, preset)?;
            for pos in session.structures_of(kind) {
                println!("{:>7} {:>7}", pos.x, pos.z);
            }
        }
        Command::Search {
            from,
            count,
            kind,
            max_distance,
            threads,
            random,
            rng_seed,
        } => {
            let kinds = kind.map_or(config.search.structures, |kind| vec![kind]);
            let search = SeedSearch::new(
                kinds,
                max_distance.unwrap_or(config.search.max_distance),
                threads.unwrap_or(config.search.threads),
            )?;
            let source = match (random, rng_seed) {
                (true, Some(rng_seed)) => SeedSource::Random { rng_seed, count },
                _ => SeedSource::Range { from, count },
            };
            for hit in search.run(&source) {
                println!(
                    "{:>20} {:<16} {:>7} {:>7}",
                    hit.seed,
                    hit.position.kind.name(),
                    hit.position.x,
                    hit.position.z
                );
            }
        }
    }
    Ok(())
}

fn open_session(seed: u64, map: MapConfig, preset: Option<MapPreset>) -> SeedMapResult<MapSession> {
    let map = MapConfig {
        preset: preset.unwrap_or(map.preset),
        ..map
    };
    MapSession::new(seed, map)
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
fn print_preview(session: &MapSession) -> SeedMapResult<()> {
    let histogram = session.biome_histogram()?;
    let total: usize = histogram.values().sum();
    let mut rows: Vec<_> = histogram.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let range = session.range();
    println!("═══════════════════════════════════════════════════════════════════");
    println!(
        "  seed {}  scale 1:{}  y {}  window {}x{} at ({}, {})",
        session.world().seed() as i64,
        range.scale,
        range.y,
        range.sx,
        range.sz,
        range.x,
        range.z
    );
    println!("═══════════════════════════════════════════════════════════════════");
    for (biome, count) in rows {
        let share = 100.0 * count as f64 / total.max(1) as f64;
        println!("  {:<28} {:>6} {:>6.2}%", biome.name(), count, share);
    }
    println!();
    for pos in session.structures() {
        println!("  {:<16} {:>7} {:>7}", pos.kind.name(), pos.x, pos.z);
    }
    Ok(())
}
