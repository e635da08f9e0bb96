use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;

use cli::{Args, Mode};

fn initialize_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn,ecsplan_cli=info,ecsplan_topology=info".into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    initialize_tracing();

    match args.mode {
        Mode::Synth { params, output } => commands::synth::run(&params, &output),
        Mode::Outputs { params, output } => commands::outputs::run(&params, &output),
        Mode::Check { params } => commands::check::run(&params),
    }
}
