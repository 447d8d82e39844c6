//! Core module tree: the state-vector engine and the circuit IR.

pub mod circuit;
pub mod error;
pub mod sim;
