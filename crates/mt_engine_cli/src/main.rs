//! mtsample - command-line front end for the mt_engine sampler
//!
//! # Commands
//!
//! - `mtsample uniform` - uniform draws on [0, 1) or between bounds
//! - `mtsample normal` - normal draws
//! - `mtsample choice <values...>` - one value chosen uniformly
//! - `mtsample weighted --values .. --weights ..` - weighted choice
//! - `mtsample ints --min --max --count [--unique]` - integer draws
//! - `mtsample points --bounds .. --count [--unique]` - 2D/3D lattice points
//! - `mtsample shuffle <values...>` - Fisher-Yates shuffle
//! - `mtsample bulk --count` - parallel normal draws
//! - `mtsample demo` - short demonstration
//!
//! Pass `--seed` (or set `MT_ENGINE_SEED`) for reproducible output.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mt_engine::{MtEngine, ParallelSampler};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

/// Seeded Mersenne Twister sampler
#[derive(Parser)]
#[command(name = "mtsample")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed for reproducible output (defaults to the clock)
    #[arg(short, long, global = true, env = "MT_ENGINE_SEED")]
    seed: Option<u64>,

    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Uniform draws on [0, 1), or on [low, high) when both bounds are given
    Uniform {
        /// Number of draws
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,

        /// Lower bound
        #[arg(long, allow_hyphen_values = true)]
        low: Option<f64>,

        /// Upper bound
        #[arg(long, allow_hyphen_values = true)]
        high: Option<f64>,
    },

    /// Normal draws
    Normal {
        /// Number of draws
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,

        /// Mean
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        mean: f64,

        /// Standard deviation
        #[arg(long, default_value = "1.0", allow_hyphen_values = true)]
        std_dev: f64,
    },

    /// Choose one value uniformly
    Choice {
        /// Candidate values
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Weighted choice
    Weighted {
        /// Candidate values (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        values: Vec<String>,

        /// Weights matching the values (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        weights: Vec<f64>,

        /// Number of draws
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,
    },

    /// Integer draws from [min, max]
    Ints {
        /// Lower bound (inclusive)
        #[arg(long, allow_hyphen_values = true)]
        min: i64,

        /// Upper bound (inclusive)
        #[arg(long, allow_hyphen_values = true)]
        max: i64,

        /// Number of draws
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,

        /// Draw without repetition
        #[arg(short, long)]
        unique: bool,
    },

    /// Lattice points; give `min max` for each of 2 or 3 axes
    Points {
        /// Axis bounds, e.g. `--bounds 0 9 0 9 0 4`
        #[arg(long, num_args = 4..=6, allow_hyphen_values = true, required = true)]
        bounds: Vec<i64>,

        /// Number of points
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,

        /// Draw distinct cells
        #[arg(short, long)]
        unique: bool,
    },

    /// Shuffle values
    Shuffle {
        /// Values to shuffle
        values: Vec<String>,
    },

    /// Parallel bulk normal draws (prints summary moments)
    Bulk {
        /// Number of draws
        #[arg(short = 'n', long, default_value = "1000000")]
        count: usize,
    },

    /// Draw a value, make a choice, shuffle a list
    Demo,
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = config::build_config(cli.config.as_deref(), cli.seed)?;
    let mut engine = MtEngine::from_config(&config);
    info!(
        seed = engine.seeded_with(),
        chunk_size = config.chunk_size(),
        "Engine configured"
    );

    match cli.command {
        Commands::Uniform { count, low, high } => {
            commands::sample::uniform(&mut engine, count, low, high)
        }
        Commands::Normal {
            count,
            mean,
            std_dev,
        } => commands::sample::normal(&mut engine, count, mean, std_dev),
        Commands::Choice { values } => commands::sample::choice(&mut engine, &values),
        Commands::Weighted {
            values,
            weights,
            count,
        } => commands::sample::weighted(&mut engine, &values, &weights, count),
        Commands::Ints {
            min,
            max,
            count,
            unique,
        } => commands::sample::ints(&mut engine, min, max, count, unique),
        Commands::Points {
            bounds,
            count,
            unique,
        } => commands::sample::points(&mut engine, &bounds, count, unique),
        Commands::Shuffle { values } => commands::sample::shuffle(&mut engine, values),
        Commands::Bulk { count } => {
            let sampler = ParallelSampler::new(engine.seeded_with(), config.chunk_size())?;
            commands::sample::bulk(&sampler, count)
        }
        Commands::Demo => commands::demo::run(&mut engine),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_std_dev_reaches_engine() {
        let cli = Cli::try_parse_from(["mtsample", "normal", "--std-dev", "-1"]).unwrap();
        let Commands::Normal { std_dev, .. } = cli.command else {
            panic!("expected the normal subcommand");
        };
        assert_eq!(std_dev, -1.0);

        let mut engine = MtEngine::from_seed(1);
        let err = commands::sample::normal(&mut engine, 1, 0.0, std_dev).unwrap_err();
        assert!(err.to_string().contains("std_dev"));
    }

    #[test]
    fn test_negative_bounds_parse() {
        let cli = Cli::try_parse_from([
            "mtsample", "points", "--bounds", "-3", "3", "-1", "1", "-n", "2",
        ])
        .unwrap();
        let Commands::Points { bounds, count, .. } = cli.command else {
            panic!("expected the points subcommand");
        };
        assert_eq!(bounds, vec![-3, 3, -1, 1]);
        assert_eq!(count, 2);
    }
}
