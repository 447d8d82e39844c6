//! quantum_lab — a small pure-state quantum simulator.
//!
//! The engine lives in [`core::sim`]; [`core::circuit`] parses text circuits
//! and the `qlab` binary drives both through [`commands`].
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;

pub use crate::core::error::{QuantumError, Result};
pub use crate::core::sim::*;
