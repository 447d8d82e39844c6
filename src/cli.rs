use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "qlab",
    about = "qlab — simulate small qubit registers: circuits, Grover search, Bloch sphere",
    version,
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct QlabCli {
    /// Global: path to config (TOML); default: ~/.qlab/config.toml
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Global: RNG seed for measurement sampling (overrides config)
    #[arg(long = "seed", value_name = "N", global = true)]
    pub seed: Option<u64>,

    /// Global: log level when QLAB_LOG is unset (trace, debug, info, warn, error)
    #[arg(long = "log-level", value_name = "LEVEL", global = true, default_value = "warn")]
    pub log_level: String,

    /// Global: disable colored output
    #[arg(long = "no-color", action = ArgAction::SetTrue, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Simulate a circuit file and print its state vector
    ///
    /// Examples:
    ///   qlab run bell.qc
    ///   qlab run bell.qc --shots 2000 --json
    Run {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Measurement shots after the final state (0 disables sampling)
        #[arg(long = "shots", value_name = "N")]
        shots: Option<usize>,
        #[arg(long = "json", action = ArgAction::SetTrue)]
        json: bool,
    },

    /// Grover search for one marked basis index
    Grover {
        #[arg(short = 'n', long = "qubits", value_name = "N")]
        qubits: usize,
        /// Marked basis index
        #[arg(short = 't', long = "target", value_name = "INDEX")]
        target: usize,
        /// Iteration count (default: optimal)
        #[arg(long = "iterations", value_name = "K")]
        iterations: Option<usize>,
        #[arg(long = "shots", value_name = "N")]
        shots: Option<usize>,
        #[arg(long = "json", action = ArgAction::SetTrue)]
        json: bool,
    },

    /// Apply single-qubit gates to |0⟩ and print the Bloch vector
    ///
    /// Examples:
    ///   qlab bloch h s
    ///   qlab bloch ry=pi/3 rz=pi/4
    Bloch {
        #[arg(value_name = "GATES")]
        gates: Vec<String>,
        #[arg(long = "json", action = ArgAction::SetTrue)]
        json: bool,
    },

    /// List the built-in gate table
    Gates,
}
