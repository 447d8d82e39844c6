//! State-vector engine: pure states, single-qubit gates, CNOT, Born-rule
//! readout, Grover primitives and the Bloch projection.

pub mod apply;
pub mod bloch;
pub mod gates;
pub mod grover;
pub mod measure;
pub mod state;

pub use apply::{apply_cnot, apply_sequence, apply_single_qubit_gate};
pub use bloch::{bloch_coords, bloch_state, BlochVector};
pub use gates::{gate_table, lookup, Gate, GateKind};
pub use grover::{
    check_iterations, grover_diffusion, grover_oracle, optimal_grover_iterations, run_grover,
    uniform_superposition, GroverRun, MAX_GROVER_ITERATIONS,
};
pub use measure::{
    basis_label, ket_label, measure, measure_qubit, probabilities, qubit_probability, sample_counts,
};
pub use state::{
    basis_state, check_normalized, zero_state, StateVector, MAX_QUBITS, NORM_TOLERANCE,
};
