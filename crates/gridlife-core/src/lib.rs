//! Core types and utilities for the Gridlife artificial-life simulation.

pub mod types;
pub mod config;
pub mod error;
pub mod rng;

pub use error::{Error, Result};
pub use types::*;
pub use config::*;
pub use rng::RandomSource;
