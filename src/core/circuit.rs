//! Plain-text circuit descriptions.
//!
//! One instruction per line; `//` and `#` start comments:
//!   qubits N
//!   h|x|y|z|s|t|sdg|tdg q
//!   rx|ry|rz|phase ANGLE q       (ANGLE: radians, or pi, pi/4, -3pi/4, 2*pi)
//!   cnot c t
//!   oracle INDEX
//!   diffuse
//!   grover INDEX [ITERATIONS]
//!
//! Example:
//!   qubits 2
//!   h 0
//!   cnot 0 1
use std::f64::consts::PI;
use std::{fs, path::Path};

use anyhow::{anyhow, bail, Context, Result};
use tracing::debug;

use crate::core::error;
use crate::core::sim::{
    apply_cnot, apply_single_qubit_gate, check_iterations, grover_diffusion, grover_oracle,
    optimal_grover_iterations, zero_state, Gate, GateKind, StateVector,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Axis {
    X,
    Y,
    Z,
    Phase,
}

impl Axis {
    pub fn gate(self, angle: f64) -> Gate {
        match self {
            Axis::X => Gate::rx(angle),
            Axis::Y => Gate::ry(angle),
            Axis::Z => Gate::rz(angle),
            Axis::Phase => Gate::phase(angle),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Fixed { kind: GateKind, qubit: usize },
    Rotate { axis: Axis, angle: f64, qubit: usize },
    Cnot { control: usize, target: usize },
    Oracle { index: usize },
    Diffuse,
    Grover { index: usize, iterations: Option<usize> },
}

impl Op {
    fn qubits(&self) -> Vec<usize> {
        match *self {
            Op::Fixed { qubit, .. } | Op::Rotate { qubit, .. } => vec![qubit],
            Op::Cnot { control, target } => vec![control, target],
            Op::Oracle { .. } | Op::Diffuse | Op::Grover { .. } => Vec::new(),
        }
    }

    fn basis_index(&self) -> Option<usize> {
        match *self {
            Op::Oracle { index } | Op::Grover { index, .. } => Some(index),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Circuit {
    pub n_qubits: usize,
    pub ops: Vec<Op>,
}

impl Circuit {
    pub fn new(n_qubits: usize) -> Self {
        Self {
            n_qubits,
            ops: Vec::new(),
        }
    }

    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    /// Folds every op over `|0…0⟩`.
    pub fn simulate(&self) -> error::Result<StateVector> {
        let n = self.n_qubits;
        self.ops.iter().try_fold(zero_state(n)?, |psi, op| match *op {
            Op::Fixed { kind, qubit } => apply_single_qubit_gate(&kind.gate(), qubit, &psi, n),
            Op::Rotate { axis, angle, qubit } => {
                apply_single_qubit_gate(&axis.gate(angle), qubit, &psi, n)
            }
            Op::Cnot { control, target } => apply_cnot(control, target, &psi, n),
            Op::Oracle { index } => grover_oracle(&psi, index),
            Op::Diffuse => grover_diffusion(&psi),
            Op::Grover { index, iterations } => {
                let k = match iterations {
                    Some(k) => check_iterations(k)?,
                    None => optimal_grover_iterations(n)?,
                };
                (0..k).try_fold(psi, |acc, _| grover_diffusion(&grover_oracle(&acc, index)?))
            }
        })
    }
}

/// Radians, or a multiple/fraction of `pi`: `pi`, `-pi/2`, `3pi/4`, `2*pi`.
/// `nan`, `inf` and anything that overflows are rejected.
pub fn parse_angle(tok: &str) -> Option<f64> {
    parse_angle_value(tok).filter(|v| v.is_finite())
}

fn parse_angle_value(tok: &str) -> Option<f64> {
    if let Ok(v) = tok.parse::<f64>() {
        return Some(v);
    }
    let lower = tok.to_ascii_lowercase();
    let (sign, body) = match lower.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, lower.as_str()),
    };
    let (num, den) = match body.split_once('/') {
        Some((n, d)) => (n, d.parse::<f64>().ok()?),
        None => (body, 1.0),
    };
    let coeff = match num.strip_suffix("pi")?.trim_end_matches('*') {
        "" => 1.0,
        k => k.parse::<f64>().ok()?,
    };
    if den == 0.0 {
        return None;
    }
    Some(sign * coeff * PI / den)
}

pub fn parse_circuit_file(path: &Path) -> Result<Circuit> {
    let src =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_circuit(&src).with_context(|| format!("in {}", path.display()))
}

pub fn parse_circuit(src: &str) -> Result<Circuit> {
    let mut n_qubits: Option<usize> = None;
    let mut ops: Vec<Op> = Vec::new();

    for (lineno, raw) in src.lines().enumerate() {
        let line = raw.split("//").next().unwrap_or("");
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let toks: Vec<&str> = line.split_whitespace().collect();
        let kw = toks[0].to_ascii_lowercase();
        let bad = |msg: &str| -> anyhow::Error { anyhow!("line {}: {}", lineno + 1, msg) };
        let index = |tok: &str, what: &str| -> Result<usize> {
            tok.parse::<usize>().map_err(|_| bad(&format!("invalid {what} '{tok}'")))
        };

        match kw.as_str() {
            "qubits" => {
                if toks.len() != 2 {
                    bail!(bad("usage: qubits <N>"));
                }
                let n = index(toks[1], "qubit count")?;
                if n == 0 {
                    bail!(bad("qubits must be ≥ 1"));
                }
                n_qubits = Some(n);
            }

            "cnot" | "cx" => {
                if toks.len() != 3 {
                    bail!(bad("usage: cnot <control> <target>"));
                }
                let control = index(toks[1], "control index")?;
                let target = index(toks[2], "target index")?;
                if control == target {
                    bail!(bad("cnot control and target must differ"));
                }
                ops.push(Op::Cnot { control, target });
            }

            "rx" | "ry" | "rz" | "phase" | "p" => {
                if toks.len() != 3 {
                    bail!(bad(&format!("usage: {kw} <angle> <qubit>")));
                }
                let angle = parse_angle(toks[1])
                    .ok_or_else(|| bad(&format!("invalid angle '{}'", toks[1])))?;
                let axis = match kw.as_str() {
                    "rx" => Axis::X,
                    "ry" => Axis::Y,
                    "rz" => Axis::Z,
                    _ => Axis::Phase,
                };
                ops.push(Op::Rotate { axis, angle, qubit: index(toks[2], "target index")? });
            }

            "oracle" => {
                if toks.len() != 2 {
                    bail!(bad("usage: oracle <basis-index>"));
                }
                ops.push(Op::Oracle { index: index(toks[1], "basis index")? });
            }

            "diffuse" => {
                if toks.len() != 1 {
                    bail!(bad("usage: diffuse"));
                }
                ops.push(Op::Diffuse);
            }

            "grover" => {
                if !(2..=3).contains(&toks.len()) {
                    bail!(bad("usage: grover <basis-index> [iterations]"));
                }
                let iterations = match toks.get(2).copied() {
                    Some(t) => Some(index(t, "iteration count")?),
                    None => None,
                };
                ops.push(Op::Grover { index: index(toks[1], "basis index")?, iterations });
            }

            other => {
                let kind = GateKind::from_name(other)
                    .ok_or_else(|| bad(&format!("unknown instruction '{other}'")))?;
                if toks.len() != 2 {
                    bail!(bad(&format!("usage: {other} <qubit>")));
                }
                ops.push(Op::Fixed { kind, qubit: index(toks[1], "target index")? });
            }
        }
    }

    let inferred = ops.iter().flat_map(Op::qubits).max().map_or(1, |q| q + 1);
    let n_qubits = n_qubits.unwrap_or(inferred);
    if n_qubits >= usize::BITS as usize {
        bail!("qubit count {n_qubits} is too large");
    }
    let dim = 1usize << n_qubits;

    // Guards files like "qubits 1; cnot 0 1"
    for (idx, op) in ops.iter().enumerate() {
        for q in op.qubits() {
            if q >= n_qubits {
                bail!("op #{idx} references qubit {q} out of range 0..{}", n_qubits - 1);
            }
        }
        if let Some(b) = op.basis_index() {
            if b >= dim {
                bail!("op #{idx} marks basis index {b} out of range 0..{}", dim - 1);
            }
        }
    }

    debug!(n_qubits, ops = ops.len(), "parsed circuit");
    Ok(Circuit { n_qubits, ops })
}
