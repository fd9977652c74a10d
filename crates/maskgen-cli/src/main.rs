use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    measure::{self, MeasureArgs},
    samples::{self, SamplesArgs},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "maskgen", version, about = "Lattice configuration sampler CLI")]
struct Cli {
    /// Log filter used when `RUST_LOG` is unset (e.g. `info`, `maskgen_sampler=trace`).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stream thermalized, decorrelated configurations to stdout.
    Samples(SamplesArgs),
    /// Run a measurement and print observable averages as JSON.
    Measure(MeasureArgs),
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    match cli.command {
        Command::Samples(args) => samples::run(&args),
        Command::Measure(args) => measure::run(&args),
    }
}
