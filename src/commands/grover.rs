use std::collections::BTreeMap;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use super::{labelled_counts, print_counts, Session};
use crate::core::sim::{ket_label, run_grover, sample_counts, GroverRun};

#[derive(Debug, Serialize)]
struct GroverReport<'a> {
    #[serde(flatten)]
    run: &'a GroverRun,
    success_probability: f64,
    shots: usize,
    counts: BTreeMap<String, usize>,
}

/// `qlab grover -n N -t T`: per-iteration marked probability, then sampling.
pub fn grover_search(
    session: &Session,
    n_qubits: usize,
    target: usize,
    iterations: Option<usize>,
    shots: Option<usize>,
    json: bool,
) -> Result<()> {
    session.check_size(n_qubits);
    let run = run_grover(n_qubits, target, iterations)
        .with_context(|| format!("grover search for index {target} over {n_qubits} qubit(s)"))?;

    let shots = session.shots(shots);
    let counts = if shots > 0 {
        labelled_counts(&sample_counts(&run.state, shots, &mut session.rng()), n_qubits)?
    } else {
        BTreeMap::new()
    };

    if json {
        let report = GroverReport {
            run: &run,
            success_probability: run.success_probability(),
            shots,
            counts,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let marked = ket_label(target, n_qubits)?;
    let prec = session.precision();
    println!(
        "{}",
        format!(
            "Grover: {} qubit(s), marked {}, {} iteration(s)",
            n_qubits, marked, run.iterations
        )
        .bold()
    );
    for (step, p) in run.history.iter().enumerate() {
        println!("  iter {:>3}  P({}) = {:.prec$}", step, marked, p, prec = prec);
    }
    println!(
        "  {} {:.prec$}",
        "success probability:".green(),
        run.success_probability(),
        prec = prec
    );
    if shots > 0 {
        println!();
        print_counts(&counts, shots);
    }
    Ok(())
}
