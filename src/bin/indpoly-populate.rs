//! `indpoly-populate`: fills a JSON polynomial store order by order.
//!
//! **Usage:**
//! ```text
//! indpoly-populate [--min-order <n>] [--max-order <n>] [--db <path>] [--sequential] [--quiet]
//! ```
//!
//! Orders below `--min-order` must already be committed in the store.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic, missing_docs)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indpoly::{JsonFileStore, Orchestrator, PolynomialAlgebra, PolynomialStore, PopulateConfig};

/// Compute and store the independence polynomials of all trees in a range of orders.
#[derive(Parser)]
#[command(
    name = "indpoly-populate",
    about = "Populate a store with independence polynomials of non-isomorphic trees"
)]
struct Args {
    /// First tree order to compute (inclusive).
    #[arg(long, default_value_t = 8, conflicts_with = "config")]
    min_order: usize,

    /// Last tree order to compute (inclusive).
    #[arg(long, default_value_t = 12, conflicts_with = "config")]
    max_order: usize,

    /// Store file; created when missing.
    #[arg(long, default_value = "poly.json")]
    db: PathBuf,

    /// Reduce trees on a single thread.
    #[arg(long, conflicts_with = "config")]
    sequential: bool,

    /// Suppress per-order progress lines.
    #[arg(long)]
    quiet: bool,

    /// Read the order range and threading from a JSON config instead.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PopulateConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PopulateConfig {
            min_order: args.min_order,
            max_order: args.max_order,
            parallel: !args.sequential,
            verbose: !args.quiet,
        },
    };
    if args.quiet {
        config.verbose = false;
    }
    config.validate()?;

    let mut store = JsonFileStore::open(&args.db, PolynomialAlgebra::default())
        .with_context(|| format!("opening store {}", args.db.display()))?;
    let reports = Orchestrator::new(&mut store, config).run()?;

    if !args.quiet {
        let trees: usize = reports.iter().map(|r| r.trees).sum();
        println!("Stored {} new trees; {} records total.", trees, store.len());
        println!("  Store: {}", args.db.display());
    }

    Ok(())
}
