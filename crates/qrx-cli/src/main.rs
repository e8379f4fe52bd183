//! `qrx` command-line entrypoint.
//!
//! Stands in for the device display loop:
//! - `qrx encode` - print the fragments for a payload, one per line
//! - `qrx path` - show how a derivation path is parsed and classified
//! - `qrx budgets` - print the density budget table

#![forbid(unsafe_code)]

mod budgets;
mod encode;
mod path;

use clap::{Parser, Subcommand};

/// Multi-part QR export for an airgapped signer.
#[derive(Parser)]
#[command(name = "qrx")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a payload into QR fragments.
    ///
    /// Prints one fragment per line: text as-is, binary fragments as hex.
    ///
    /// Example: qrx encode --kind ur-psbt --input tx.psbt --density high
    Encode(encode::EncodeArgs),

    /// Parse a derivation path and infer its script types.
    Path(path::PathArgs),

    /// Print fragment budgets per density as JSON.
    Budgets,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries fragments and JSON only.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode(args) => encode::run(args),
        Commands::Path(args) => path::run(&args),
        Commands::Budgets => budgets::run(),
    }
}
