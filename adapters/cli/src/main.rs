#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Autoscope rules headlessly.

mod session;

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use autoscope_core::BoardShape;
use autoscope_system_catalog::{Catalog, Navigator};
use autoscope_world::Config;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::session::RunOptions;

/// Run a cellular automaton from the rule catalog and print its boards.
#[derive(Debug, Parser)]
#[command(name = "autoscope", about = "Headless cellular automata explorer")]
struct Args {
    /// Name of the rule to run; defaults to the first rule in the catalog.
    #[arg(long)]
    rule: Option<String>,

    /// Index of the seed within the rule's seed list.
    #[arg(long, default_value_t = 0)]
    seed_index: usize,

    /// Board height in cells.
    #[arg(long, default_value_t = 64)]
    height: usize,

    /// Board width in cells.
    #[arg(long, default_value_t = 128)]
    width: usize,

    /// Number of generations to compute.
    #[arg(long, default_value_t = 100)]
    generations: u64,

    /// Seed for the random number generator behind random board seeds.
    #[arg(long)]
    rng_seed: Option<u64>,

    /// TOML catalog to use instead of the builtin rules.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Print the board every N generations; 0 prints only the final board.
    #[arg(long, default_value_t = 0)]
    print_every: u64,

    /// Measure throughput instead of printing boards.
    #[arg(long)]
    benchmark: bool,

    /// List the catalog's rules and seeds, then exit.
    #[arg(long)]
    list: bool,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let catalog = match &args.catalog {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::builtin(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.list {
        return session::list(&catalog, &mut out);
    }

    let navigator = match &args.rule {
        Some(name) => Navigator::at(&catalog, name)
            .with_context(|| format!("rule `{name}` is not in the catalog"))?,
        None => Navigator::new(),
    };
    let shape = BoardShape::new(args.height, args.width)
        .context("board dimensions must be positive")?;
    let config = args.rng_seed.map_or_else(Config::default, Config::new);

    let options = RunOptions {
        shape,
        seed_index: args.seed_index,
        generations: args.generations,
        print_every: args.print_every,
        config,
    };

    if args.benchmark {
        session::benchmark(&catalog, navigator, &options, &mut out)
    } else {
        session::run(&catalog, navigator, &options, &mut out)
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
