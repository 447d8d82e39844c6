/// qlab — command-line front end for the quantum_lab state-vector engine.
use clap::Parser; // trait import enables QlabCli::parse()
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use quantum_lab::cli::{Command, QlabCli};
use quantum_lab::commands::{self, Session};
use quantum_lab::config::Config;

fn main() -> anyhow::Result<()> {
    let args = QlabCli::parse();
    init_logging(&args.log_level);

    let config = Config::load(&args.config)?;
    if args.no_color || !config.output.color {
        colored::control::set_override(false);
    }
    let session = Session::new(config, args.seed);

    match args.cmd {
        Command::Run { file, shots, json } => {
            commands::run::run_circuit(&session, &file, shots, json)
        }
        Command::Grover {
            qubits,
            target,
            iterations,
            shots,
            json,
        } => commands::grover::grover_search(&session, qubits, target, iterations, shots, json),
        Command::Bloch { gates, json } => commands::bloch::bloch_run(&session, &gates, json),
        Command::Gates => commands::gates::list_gates(&session),
    }
}

/// `QLAB_LOG` (EnvFilter syntax) wins over `--log-level`; logs go to stderr.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_env("QLAB_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}
