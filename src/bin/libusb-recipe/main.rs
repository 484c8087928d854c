//! libusb-recipe CLI - fetch, build and package libusb

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("libusb_recipe=debug")
    } else {
        EnvFilter::new("libusb_recipe=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        Commands::Create(args) => commands::create::execute(args),
        Commands::Source(args) => commands::source::execute(args),
        Commands::Info(args) => commands::info::execute(args),
        Commands::Sysreqs(args) => commands::sysreqs::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
