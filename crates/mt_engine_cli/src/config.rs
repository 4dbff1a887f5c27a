//! Engine configuration assembly for the CLI.
//!
//! Priority (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables
//! 3. Config file (TOML)
//! 4. Default values

use std::path::Path;

use anyhow::Context;
use mt_engine::config::CHUNK_SIZE_ENV;
use mt_engine::EngineConfig;

/// Loads an [`EngineConfig`] from a TOML file.
///
/// ```toml
/// seed = 42
/// chunk_size = 8192
/// ```
pub fn from_file(path: &Path) -> anyhow::Result<EngineConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_toml(&content).with_context(|| format!("Failed to parse TOML in {}", path.display()))
}

fn parse_toml(content: &str) -> anyhow::Result<EngineConfig> {
    // deserialization validates the chunk size
    Ok(toml::from_str(content)?)
}

/// Builds the effective configuration from all sources.
pub fn build_config(file: Option<&Path>, cli_seed: Option<u64>) -> anyhow::Result<EngineConfig> {
    let base = match file {
        Some(path) => from_file(path)?,
        None => EngineConfig::default(),
    };
    let env = EngineConfig::from_env()?;

    let chunk_size = if std::env::var(CHUNK_SIZE_ENV).is_ok() {
        env.chunk_size()
    } else {
        base.chunk_size()
    };

    let config = EngineConfig::builder()
        .maybe_seed(base.seed())
        .maybe_seed(env.seed())
        .maybe_seed(cli_seed)
        .chunk_size(chunk_size)
        .build()?;
    Ok(config)
}
