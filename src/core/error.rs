//! Error taxonomy for the state-vector engine.
//!
//! Every variant is a contract violation by the caller (or, for
//! `NormalizationViolation`, an internal consistency failure). Nothing here is
//! retried or silently corrected.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuantumError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuantumError {
    #[error("invalid qubit count {n}: at least one qubit is required")]
    InvalidQubitCount { n: usize },

    #[error("too many qubits: {n} (at most {max} fit in a basis index)")]
    TooManyQubits { n: usize, max: usize },

    #[error("qubit index {index} out of range for {n_qubits} qubit(s)")]
    InvalidQubitIndex { index: usize, n_qubits: usize },

    #[error("dimension mismatch: expected {expected} amplitudes, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("state not normalized (total probability = {norm})")]
    NormalizationViolation { norm: f64 },

    #[error("basis index {index} out of range for dimension {dim}")]
    InvalidBasisIndex { index: usize, dim: usize },

    #[error("gate is not unitary (‖UU†−I‖∞ = {deviation:e})")]
    NonUnitaryGate { deviation: f64 },

    #[error("control and target must differ (both are qubit {qubit})")]
    SameControlTarget { qubit: usize },

    #[error("too many Grover iterations: {requested} (limit {max})")]
    TooManyIterations { requested: usize, max: usize },
}

impl QuantumError {
    pub fn qubit_index(index: usize, n_qubits: usize) -> Self {
        QuantumError::InvalidQubitIndex { index, n_qubits }
    }

    pub fn dimension(expected: usize, actual: usize) -> Self {
        QuantumError::DimensionMismatch { expected, actual }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test] fn test_qubit_count_message() {
        let err = QuantumError::InvalidQubitCount { n: 0 };
        assert_eq!(format!("{}", err), "invalid qubit count 0: at least one qubit is required");
    }
    #[test] fn test_qubit_index_message() {
        let err = QuantumError::qubit_index(5, 2);
        assert_eq!(format!("{}", err), "qubit index 5 out of range for 2 qubit(s)");
    }
    #[test] fn test_dimension_message() {
        let err = QuantumError::dimension(4, 3);
        assert_eq!(format!("{}", err), "dimension mismatch: expected 4 amplitudes, got 3");
    }
    #[test] fn test_same_control_target_message() {
        let err = QuantumError::SameControlTarget { qubit: 1 };
        assert_eq!(format!("{}", err), "control and target must differ (both are qubit 1)");
    }
    #[test] fn test_too_many_qubits_message() {
        let err = QuantumError::TooManyQubits { n: 64, max: 63 };
        assert_eq!(format!("{}", err), "too many qubits: 64 (at most 63 fit in a basis index)");
    }
}
