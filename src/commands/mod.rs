pub mod bloch;
pub mod gates;
pub mod grover;
pub mod run;

use std::collections::BTreeMap;

use anyhow::Result;
use colored::Colorize;
use num_complex::Complex64 as C64;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::warn;

use crate::config::Config;
use crate::core::sim::{basis_label, ket_label, probabilities, StateVector};

/// Resolved settings shared by every subcommand.
#[derive(Clone, Debug)]
pub struct Session {
    pub config: Config,
}

impl Session {
    /// `seed` from the command line overrides the config file.
    pub fn new(mut config: Config, seed: Option<u64>) -> Self {
        if seed.is_some() {
            config.simulator.seed = seed;
        }
        Self { config }
    }

    pub fn rng(&self) -> StdRng {
        match self.config.simulator.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        }
    }

    pub fn shots(&self, cli: Option<usize>) -> usize {
        cli.unwrap_or(self.config.simulator.shots)
    }

    pub fn precision(&self) -> usize {
        self.config.output.precision
    }

    pub fn check_size(&self, n_qubits: usize) {
        let limit = self.config.simulator.max_qubits;
        if n_qubits > limit {
            warn!(
                n_qubits,
                limit,
                "{n_qubits} qubits exceeds max_qubits = {limit} (2^{n_qubits} amplitudes per step)"
            );
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AmplitudeRow {
    pub label: String,
    pub re: f64,
    pub im: f64,
    pub probability: f64,
}

pub fn amplitude_rows(state: &StateVector) -> Result<Vec<AmplitudeRow>> {
    let n = state.n_qubits();
    state
        .amplitudes()
        .iter()
        .zip(probabilities(state))
        .enumerate()
        .map(|(i, (a, p))| -> Result<AmplitudeRow> {
            Ok(AmplitudeRow {
                label: basis_label(i, n)?,
                re: a.re,
                im: a.im,
                probability: p,
            })
        })
        .collect()
}

pub fn labelled_counts(
    counts: &BTreeMap<usize, usize>,
    n_qubits: usize,
) -> Result<BTreeMap<String, usize>> {
    counts
        .iter()
        .map(|(&i, &k)| -> Result<(String, usize)> { Ok((basis_label(i, n_qubits)?, k)) })
        .collect()
}

/// Snaps values that would print as `-0.000…` to zero.
pub fn tidy(v: f64, precision: usize) -> f64 {
    if v.abs() < 0.5 * 10f64.powi(-(precision as i32)) {
        0.0
    } else {
        v
    }
}

pub fn format_amplitude(a: C64, precision: usize) -> String {
    format!("{:+.p$} {:+.p$}i", tidy(a.re, precision), tidy(a.im, precision), p = precision)
}

/// State-vector table; rows with zero probability at the printed precision are dimmed.
pub fn print_state_table(state: &StateVector, precision: usize) -> Result<()> {
    let n = state.n_qubits();
    let cutoff = 0.5 * 10f64.powi(-(precision as i32));
    println!("{}", format!("{} qubit(s), {} amplitudes", n, state.len()).bold());
    for (i, (a, p)) in state.amplitudes().iter().zip(probabilities(state)).enumerate() {
        let line = format!(
            "  {:>w$}  {}  p={:.prec$}",
            ket_label(i, n)?,
            format_amplitude(*a, precision),
            p,
            w = n + 2,
            prec = precision
        );
        if p < cutoff {
            println!("{}", line.dimmed());
        } else {
            println!("{}", line);
        }
    }
    Ok(())
}

pub fn print_counts(counts: &BTreeMap<String, usize>, shots: usize) {
    println!("{}", format!("{} shots", shots).bold());
    for (label, k) in counts {
        let frac = *k as f64 / shots.max(1) as f64;
        let bar = "█".repeat((frac * 40.0).round() as usize);
        println!("  {}  {:>7}  {:.3}  {}", label.cyan(), k, frac, bar);
    }
}
