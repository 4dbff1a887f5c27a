//! CLI command implementations
//!
//! Each submodule implements a group of CLI commands.

pub mod demo;
pub mod sample;
