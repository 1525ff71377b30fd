use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use zeros::driver::{run_all, write_report, InputConfig};

/// zeros - approximate roots of f(x) by five classical methods
#[derive(Parser)]
#[command(name = "zeros")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Runs bisection, fixed point, Newton, secant and regula falsi on one function")]
struct Cli {
    /// Input file with one line `a;b;delta;n;f(x)[;g(x)]`
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Where to write the report
    #[arg(short, long, value_name = "FILE", default_value = "output.txt")]
    output: PathBuf,

    /// Log method progress to stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let input = InputConfig::from_file(&cli.input)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;

    let runs = run_all(&input);
    write_report(&cli.output, &runs)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    let failed = runs.iter().filter(|run| run.result.is_err()).count();
    if failed > 0 {
        println!("{failed} of {} methods failed; see the report", runs.len());
    }
    println!("Results saved to {}", cli.output.display());
    Ok(())
}
