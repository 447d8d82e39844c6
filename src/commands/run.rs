use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use super::{
    amplitude_rows, labelled_counts, print_counts, print_state_table, AmplitudeRow, Session,
};
use crate::core::circuit::parse_circuit_file;
use crate::core::sim::sample_counts;

#[derive(Debug, Serialize)]
struct RunReport {
    n_qubits: usize,
    ops: usize,
    amplitudes: Vec<AmplitudeRow>,
    shots: usize,
    counts: BTreeMap<String, usize>,
}

/// `qlab run FILE`: parse, simulate, print the final state and optional shot counts.
pub fn run_circuit(session: &Session, file: &Path, shots: Option<usize>, json: bool) -> Result<()> {
    let circuit = parse_circuit_file(file)?;
    session.check_size(circuit.n_qubits);
    info!(
        file = %file.display(),
        n_qubits = circuit.n_qubits,
        ops = circuit.ops.len(),
        "simulating"
    );

    let state = circuit
        .simulate()
        .with_context(|| format!("simulating {}", file.display()))?;

    let shots = session.shots(shots);
    let counts = if shots > 0 {
        labelled_counts(&sample_counts(&state, shots, &mut session.rng()), circuit.n_qubits)?
    } else {
        BTreeMap::new()
    };

    if json {
        let report = RunReport {
            n_qubits: circuit.n_qubits,
            ops: circuit.ops.len(),
            amplitudes: amplitude_rows(&state)?,
            shots,
            counts,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_state_table(&state, session.precision())?;
    if shots > 0 {
        println!();
        print_counts(&counts, shots);
    }
    Ok(())
}
