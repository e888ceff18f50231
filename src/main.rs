//! # Main — CLI Entry Point
//!
//! Parses arguments, sets up logging and the rayon pool, then hands off to
//! [`cli::run`]. Each positional index is resolved independently; indices are
//! spread across the pool, but every individual sieve runs on one thread.
//!
//! ## Options
//!
//! - `--threads` / `PRIMESIEVE_THREADS`: rayon pool size (default: all cores).
//! - `--json`: one JSON object per line instead of `index<TAB>prime`.
//! - `--bound-only`: print the first sieve bound tried for each index.
//! - `LOG_FORMAT=json`: JSON log lines on stderr; `RUST_LOG` sets the level.

mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(
    name = "primesieve-nth",
    about = "Compute the n-th prime (0-indexed) with a segmented sieve"
)]
struct Cli {
    /// Number of rayon worker threads (defaults to all logical cores)
    #[arg(long, env = "PRIMESIEVE_THREADS")]
    threads: Option<usize>,

    /// Emit one JSON object per index instead of tab-separated lines
    #[arg(long)]
    json: bool,

    /// Print the initial sieve bound estimate for each index instead of resolving it
    #[arg(long)]
    bound_only: bool,

    /// 0-based prime indices (index 0 is 2; negative indices yield 0)
    #[arg(required = true, allow_negative_numbers = true)]
    indices: Vec<i64>,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // LOG_FORMAT=json for log shippers, human-readable otherwise
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();
    cli::configure_rayon(cli.threads);
    cli::run(&cli)
}
