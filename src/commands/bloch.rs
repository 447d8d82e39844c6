use anyhow::{anyhow, bail, Context, Result};
use colored::Colorize;
use serde::Serialize;

use super::{format_amplitude, tidy, Session};
use crate::core::circuit::{parse_angle, Axis};
use crate::core::sim::{
    apply_single_qubit_gate, bloch_coords, lookup, zero_state, BlochVector, Gate,
};

#[derive(Debug, Serialize)]
struct BlochReport {
    gates: Vec<String>,
    bloch: BlochVector,
    theta: f64,
    phi: f64,
}

/// Gate by name (`h`, `sdg`, ...) or rotation spec (`rx=pi/2`, `phase=0.3`).
pub fn parse_gate_spec(spec: &str) -> Result<Gate> {
    if let Some((name, angle)) = spec.split_once('=') {
        let theta = parse_angle(angle.trim()).ok_or_else(|| anyhow!("invalid angle '{angle}'"))?;
        let axis = match name.trim().to_ascii_lowercase().as_str() {
            "rx" => Axis::X,
            "ry" => Axis::Y,
            "rz" => Axis::Z,
            "phase" | "p" => Axis::Phase,
            other => bail!("unknown rotation '{other}' (try: rx | ry | rz | phase)"),
        };
        return Ok(axis.gate(theta));
    }
    lookup(spec).ok_or_else(|| anyhow!("unknown gate '{spec}' (see `qlab gates`)"))
}

/// `qlab bloch GATES...`: evolve |0⟩ and project onto the sphere.
pub fn bloch_run(session: &Session, specs: &[String], json: bool) -> Result<()> {
    let mut psi = zero_state(1)?;
    for spec in specs {
        let gate = parse_gate_spec(spec)?;
        psi = apply_single_qubit_gate(&gate, 0, &psi, 1)
            .with_context(|| format!("applying {spec}"))?;
    }
    let v = bloch_coords(&psi)?;
    let (theta, phi) = v.polar_angles();

    if json {
        let report = BlochReport { gates: specs.to_vec(), bloch: v, theta, phi };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let p = session.precision();
    let amps = psi.amplitudes();
    println!("{}", "Bloch projection".bold());
    println!("  α = {}", format_amplitude(amps[0], p));
    println!("  β = {}", format_amplitude(amps[1], p));
    println!(
        "  (x, y, z) = ({:+.p$}, {:+.p$}, {:+.p$})",
        tidy(v.x, p),
        tidy(v.y, p),
        tidy(v.z, p),
        p = p
    );
    println!("  θ = {:.p$}  φ = {:+.p$}", tidy(theta, p), tidy(phi, p), p = p);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sim::gates::{h, sdg};

    #[test]
    fn gate_specs() {
        assert_eq!(parse_gate_spec("H").unwrap(), h());
        assert_eq!(parse_gate_spec("s†").unwrap(), sdg());
        assert_eq!(parse_gate_spec("rx=pi").unwrap(), Gate::rx(std::f64::consts::PI));
        assert!(parse_gate_spec("cnot").is_err());
        assert!(parse_gate_spec("rq=1").is_err());
        assert!(parse_gate_spec("rx=abc").is_err());
        assert!(parse_gate_spec("rx=inf").is_err());
        assert!(parse_gate_spec("rz=nan").is_err());
    }
}
