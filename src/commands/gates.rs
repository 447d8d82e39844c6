use anyhow::Result;
use colored::Colorize;

use super::{format_amplitude, Session};
use crate::core::sim::gate_table;

/// `qlab gates`: the fixed gate set with matrices and unitarity deviation.
pub fn list_gates(session: &Session) -> Result<()> {
    let p = session.precision();
    for (name, gate) in gate_table() {
        println!(
            "{}  {}",
            format!("{:<4}", name).cyan().bold(),
            format!("‖UU†−I‖∞ = {:.1e}", gate.unitarity_deviation()).dimmed()
        );
        for row in 0..2 {
            println!(
                "      [ {}   {} ]",
                format_amplitude(gate.entry(row, 0), p),
                format_amplitude(gate.entry(row, 1), p)
            );
        }
    }
    Ok(())
}
