fn main() -> anyhow::Result<()> {
    use std::env;
    use quantum_lab::{basis_label, probabilities, run_grover};

    // args: qubits  target  [iterations]
    let args = env::args().skip(1).collect::<Vec<_>>();
    if args.len() < 2 {
        eprintln!("usage: cargo run --example grover_demo -- <qubits> <target> [iterations]");
        eprintln!("example: cargo run --example grover_demo -- 3 5");
        std::process::exit(2);
    }

    let n: usize = args[0].parse()?;
    let target: usize = args[1].parse()?;
    let iterations = args.get(2).and_then(|s| s.parse::<usize>().ok());

    let run = run_grover(n, target, iterations)?;
    for (step, p) in run.history.iter().enumerate() {
        println!("iter {step}: P({}) = {p:.4}", basis_label(target, n)?);
    }
    for (i, p) in probabilities(&run.state).iter().enumerate() {
        println!("{} {:.4}", basis_label(i, n)?, p);
    }
    Ok(())
}
