#![deny(unsafe_code)]
//! CLI binary for gravlines.
//!
//! Renders one image of trajectories through a point-mass direction field
//! and writes it as PNG. The generator is seeded from the system clock, so
//! every run differs.

mod error;

use clap::Parser;
use error::CliError;
use gravlines_core::RenderConfig;
use gravlines_core::config::{DEFAULT_ITERATIONS, DEFAULT_LINES};
use gravlines_render::snapshot::write_png;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gravlines", about = "Trajectories through a point-mass field, as PNG")]
struct Cli {
    /// Number of trajectories.
    #[arg(long, default_value_t = DEFAULT_LINES)]
    lines: usize,

    /// Integration steps per trajectory.
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    iters: usize,

    /// Output file path.
    #[arg(long, default_value = "out.png")]
    out: PathBuf,
}

/// Nanoseconds since the Unix epoch, truncated to 64 bits.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

/// Renders `config` to `out` and returns the confirmation line.
fn render_to(config: &RenderConfig, out: &Path) -> Result<String, CliError> {
    debug!(?config, "starting render");
    let canvas = gravlines_render::render(config)?;
    write_png(&canvas, out)?;
    Ok(format!("written {}", out.display()))
}

fn run(cli: Cli) -> Result<String, CliError> {
    let config = RenderConfig::new(cli.lines, cli.iters, clock_seed());
    render_to(&config, &cli.out)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    match run(cli) {
        Ok(line) => println!("{line}"),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(e.exit_code());
        }
    }
}
