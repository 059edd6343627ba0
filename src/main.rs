// Copyright 2025 ZNS Contributors
// Licensed under GPL-3.0

//! ZNS CLI application

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

#[derive(Parser)]
#[command(name = "zns")]
#[command(about = "Zilliqa Name Service - client tools for the ZNS registry and resolver", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Name hashing utilities
    Names {
        #[command(subcommand)]
        command: cli::names::NamesCommands,
    },
    /// Record and resolution conversion utilities
    Records {
        #[command(subcommand)]
        command: cli::records::RecordsCommands,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Without -v: only show WARN and ERROR (quiet mode)
    // With -v: show INFO, WARN, ERROR
    // With RUST_LOG set: use whatever the environment asks for
    if std::env::var("RUST_LOG").is_err() {
        use tracing_subscriber::EnvFilter;

        let filter = if cli.verbose {
            EnvFilter::new("zns=info")
        } else {
            EnvFilter::new("zns=warn")
        };

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_target(true)
            .init();
    }

    // Execute command
    match cli.command {
        Commands::Names { command } => {
            cli::names::execute(command)?;
        }
        Commands::Records { command } => {
            cli::records::execute(command)?;
        }
    }

    Ok(())
}
