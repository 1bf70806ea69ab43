//! CLI application for scanning supplier bills.

mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use console::style;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use billscan_core::{BillscanError, ConfigError};
use commands::{config, parse, suppliers};

/// Supplier bill scanner - turn supplier PDFs into expense records
#[derive(Parser)]
#[command(name = "billscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a supplier document into an expense record
    Parse(parse::ParseArgs),

    /// List registered suppliers
    Suppliers,

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("cannot install log subscriber: {}", e);
    }

    let result = match cli.command {
        Commands::Parse(args) => parse::run(args, cli.config.as_deref()),
        Commands::Suppliers => suppliers::run(cli.config.as_deref()),
        Commands::Config(args) => config::run(args, cli.config.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", style("✗").red(), e);
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Map a failure to the documented exit status.
fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(e) = err.downcast_ref::<ConfigError>() {
        return config_exit_code(e);
    }
    match err.downcast_ref::<BillscanError>() {
        Some(BillscanError::Config(e)) => config_exit_code(e),
        Some(BillscanError::Io(_) | BillscanError::Pdf(_)) => 5,
        Some(BillscanError::Parse(_) | BillscanError::Conversion(_)) => 6,
        None => 1,
    }
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::Read(_) => 1,
        ConfigError::Format(_) | ConfigError::Invalid { .. } | ConfigError::UnknownSupplier(_) => 3,
    }
}
