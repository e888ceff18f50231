//! # CLI Execution Functions
//!
//! Resolution dispatch, output formatting and rayon configuration, kept out
//! of `main.rs` so the entry point stays small.

use anyhow::Result;
use primesieve_nth::resolver::{self, NthPrime};
use rayon::prelude::*;
use serde::Serialize;
use std::io::{self, Write};
use std::time::Instant;
use tracing::{info, warn};

use super::Cli;

#[derive(Serialize)]
struct Resolved {
    index: i64,
    prime: i64,
}

#[derive(Serialize)]
struct Estimate {
    index: i64,
    /// `None` for negative indices, which are never sieved.
    bound: Option<u64>,
}

/// Resolve (or estimate) every index on the command line and print the
/// results in argument order.
pub fn run(cli: &Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.bound_only {
        for &index in &cli.indices {
            let bound = u64::try_from(index).ok().map(resolver::initial_bound);
            let estimate = Estimate { index, bound };
            if cli.json {
                writeln!(out, "{}", serde_json::to_string(&estimate)?)?;
            } else {
                match bound {
                    Some(b) => writeln!(out, "{}\t{}", index, b)?,
                    None => writeln!(out, "{}\t-", index)?,
                }
            }
        }
        return Ok(());
    }

    info!(
        count = cli.indices.len(),
        threads = rayon::current_num_threads(),
        "resolving prime indices"
    );
    let start = Instant::now();

    let resolver = NthPrime::new();
    let results: Vec<Resolved> = cli
        .indices
        .par_iter()
        .map(|&index| Resolved {
            index,
            prime: resolver.nth_prime(index),
        })
        .collect();

    for r in &results {
        if cli.json {
            writeln!(out, "{}", serde_json::to_string(r)?)?;
        } else {
            writeln!(out, "{}\t{}", r.index, r.prime)?;
        }
    }
    out.flush()?;

    info!(
        count = results.len(),
        elapsed_secs = start.elapsed().as_secs_f64(),
        "resolution complete"
    );
    Ok(())
}

// ── Rayon Configuration ─────────────────────────────────────────

/// Size the global rayon pool. `None` or `Some(0)` keeps rayon's default of
/// one thread per logical core.
pub fn configure_rayon(threads: Option<usize>) {
    let num_threads = threads.unwrap_or(0);
    if num_threads == 0 {
        return;
    }
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
    {
        warn!(error = %e, "Could not configure rayon thread pool");
    } else {
        info!(threads = num_threads, "Rayon thread pool configured");
    }
}
