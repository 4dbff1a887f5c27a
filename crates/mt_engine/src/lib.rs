//! # mt_engine: Seeded Mersenne Twister Sampling Engine
//!
//! A convenience layer over a single 64-bit Mersenne Twister (MT19937-64)
//! generator. One type, [`MtEngine`], owns the generator and the seed it was
//! last initialised with; every sampling family is a method on it.
//!
//! ## Module Structure
//!
//! - [`engine`]: construction, seeding and reseeding
//! - [`continuous`]: uniform and normal scalars, vectors and matrices
//! - [`choice`]: two-way, three-way, N-way and weighted choice
//! - [`lattice`]: integer draws and unique/repeated lattice point sampling
//! - [`sequence`]: integer ranges, `ones` and Fisher-Yates shuffling
//! - [`parallel`]: independently seeded streams for parallel bulk sampling
//! - [`config`]: engine configuration and builder
//! - [`error`]: error taxonomy
//!
//! ## Usage Example
//!
//! ```rust
//! use mt_engine::MtEngine;
//!
//! let mut engine = MtEngine::from_seed(12345);
//!
//! let u = engine.uniform01();
//! let z = engine.normal(0.0, 2.0).unwrap();
//! let pick = engine.choice_weighted(&["low", "high"], &[3.0, 1.0]).unwrap();
//! let cells = engine.random_points_3d(0, 3, 0, 3, 0, 3, 10, false).unwrap();
//!
//! let mut deck: Vec<u32> = (1..=52).collect();
//! engine.shuffle(&mut deck);
//! # let _ = (u, z, pick, cells);
//! ```
//!
//! ## Threading
//!
//! All sampling methods take `&mut self`; an engine is owned by one thread
//! at a time. For parallel bulk work use [`ParallelSampler`], which gives
//! every chunk its own engine with a derived seed.
//!
//! ## Non-goals
//!
//! Not suitable for cryptographic use. Derived distributions are not
//! guaranteed to reproduce across crate versions or platforms.

#![warn(missing_docs)]

pub mod choice;
pub mod config;
pub mod continuous;
pub mod engine;
pub mod error;
pub mod lattice;
pub mod parallel;
pub mod sequence;

// Public re-exports
pub use config::{ConfigError, EngineConfig, EngineConfigBuilder};
pub use continuous::Matrix;
pub use engine::MtEngine;
pub use error::{EngineError, Result};
pub use lattice::{Point2, Point3};
pub use parallel::{derive_stream_seed, ParallelSampler};
