//! Engine configuration.
//!
//! This module provides [`EngineConfig`] and its builder. A configuration
//! pins the seed (or leaves it to the clock) and sets the chunk size used by
//! [`ParallelSampler`](crate::ParallelSampler).

use thiserror::Error;

/// Default number of values produced by one parallel stream.
pub const DEFAULT_CHUNK_SIZE: usize = 4_096;

/// Maximum chunk size accepted by the configuration.
pub const MAX_CHUNK_SIZE: usize = 1 << 24;

/// Environment variable holding an explicit seed.
pub const SEED_ENV: &str = "MT_ENGINE_SEED";

/// Environment variable holding the parallel chunk size.
pub const CHUNK_SIZE_ENV: &str = "MT_ENGINE_CHUNK_SIZE";

/// Configuration error.
///
/// These errors occur when building or loading an [`EngineConfig`].
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Chunk size outside `[1, MAX_CHUNK_SIZE]`.
    #[error("Invalid chunk size {0}: must be in range [1, {max}]", max = MAX_CHUNK_SIZE)]
    InvalidChunkSize(usize),

    /// Environment variable could not be parsed.
    #[error("Environment variable error: {name}={value:?} is not a valid {expected}")]
    EnvError {
        /// Variable name.
        name: &'static str,
        /// Raw value found.
        value: String,
        /// Expected type.
        expected: &'static str,
    },
}

/// Sampling engine configuration.
///
/// Use [`EngineConfig::builder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use mt_engine::EngineConfig;
///
/// let config = EngineConfig::builder()
///     .seed(42)
///     .chunk_size(1024)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.seed(), Some(42));
/// assert_eq!(config.chunk_size(), 1024);
/// ```
///
/// With the `serde` feature the configuration can be deserialized; the
/// result is validated like [`EngineConfigBuilder::build`], so a loaded
/// configuration is always usable.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawEngineConfig"))]
pub struct EngineConfig {
    /// Explicit seed; `None` seeds from the clock.
    seed: Option<u64>,
    /// Values per parallel stream.
    chunk_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl EngineConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Returns the explicit seed, if any.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the parallel chunk size.
    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidChunkSize` if `chunk_size` is 0 or
    /// greater than [`MAX_CHUNK_SIZE`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            return Err(ConfigError::InvalidChunkSize(self.chunk_size));
        }
        Ok(())
    }

    /// Loads configuration from `MT_ENGINE_SEED` and `MT_ENGINE_CHUNK_SIZE`.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(SEED_ENV) {
            let seed = raw.trim().parse().map_err(|_| ConfigError::EnvError {
                name: SEED_ENV,
                value: raw.clone(),
                expected: "u64",
            })?;
            config.seed = Some(seed);
        }

        if let Some(raw) = lookup(CHUNK_SIZE_ENV) {
            config.chunk_size = raw.trim().parse().map_err(|_| ConfigError::EnvError {
                name: CHUNK_SIZE_ENV,
                value: raw.clone(),
                expected: "usize",
            })?;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Unvalidated wire form of [`EngineConfig`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(default)]
struct RawEngineConfig {
    seed: Option<u64>,
    chunk_size: usize,
}

#[cfg(feature = "serde")]
impl Default for RawEngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<RawEngineConfig> for EngineConfig {
    type Error = ConfigError;

    fn try_from(raw: RawEngineConfig) -> Result<Self, Self::Error> {
        let config = EngineConfig {
            seed: raw.seed,
            chunk_size: raw.chunk_size,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Builder for [`EngineConfig`].
#[derive(Clone, Debug, Default)]
pub struct EngineConfigBuilder {
    seed: Option<u64>,
    chunk_size: Option<usize>,
}

impl EngineConfigBuilder {
    /// Sets an explicit seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the seed from an optional value (e.g. a CLI flag).
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Sets the number of values produced by each parallel stream.
    #[inline]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails.
    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        let config = EngineConfig {
            seed: self.seed,
            chunk_size: self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE),
        };
        config.validate()?;
        Ok(config)
    }
}
