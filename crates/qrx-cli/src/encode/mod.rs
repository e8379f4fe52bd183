//! `qrx encode` command implementation.
//!
//! Builds one [`EncodingRequest`] from flags (and an optional settings file),
//! then pulls fragments the way the device display loop would.
//!
//! # Usage
//!
//! ```text
//! # Legacy text parts for a binary or base64 PSBT
//! qrx encode --kind psbt --input tx.psbt --density low
//!
//! # Account export as crypto-account, settings from TOML
//! qrx encode --kind ur-account --input account.json --config qrx.toml
//!
//! # CompactSeedQR bytes (printed as hex)
//! qrx encode --kind compact-seedqr --words "zoo zoo ... wrong"
//!
//! # SeedQR digits against a device-specific wordlist
//! qrx encode --kind seedqr --wordlist words.txt --words "..."
//! ```

mod input;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use qrx_encode::{
    Density, EncoderSettings, EncodingRequest, Fragment, Network, PayloadKind, QrEncoder,
    UrFountain,
};

/// Arguments for the `qrx encode` command.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Payload kind: psbt, ur-psbt, xpub, xpub-chunked, ur-account, seedqr,
    /// compact-seedqr, or address.
    #[arg(long, short = 'k')]
    pub kind: PayloadKind,

    /// Input file: PSBT (binary or base64) or account export (JSON).
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Seed words, space separated.
    #[arg(long, conflicts_with = "input")]
    pub words: Option<String>,

    /// Address to display.
    #[arg(long, conflicts_with_all = ["input", "words"])]
    pub address: Option<String>,

    /// QR density (overrides the settings file).
    #[arg(long, short = 'd')]
    pub density: Option<Density>,

    /// Network (overrides the settings file).
    #[arg(long)]
    pub network: Option<Network>,

    /// Wordlist language code (overrides the settings file).
    #[arg(long)]
    pub language: Option<String>,

    /// Custom 2048-line wordlist for seed kinds, used instead of BIP39.
    #[arg(long, conflicts_with = "language")]
    pub wordlist: Option<PathBuf>,

    /// TOML settings file.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Number of fragments to print (defaults to one full cycle).
    #[arg(long, short = 'n')]
    pub count: Option<usize>,
}

/// Run the encode command.
///
/// # Errors
///
/// Returns an error if the settings or payload cannot be loaded, or if the
/// encoder rejects the request.
pub fn run(args: EncodeArgs) -> Result<()> {
    let settings = load_settings(&args)?;
    let payload = input::load_payload(args.kind, &args)?;
    let request = EncodingRequest::from_settings(args.kind, payload, &settings);

    let encoder = match &args.wordlist {
        Some(path) => {
            let wordlist = input::load_wordlist(path)?;
            QrEncoder::with_collaborators(&request, &wordlist, &UrFountain)
        }
        None => QrEncoder::new(&request),
    };
    let mut encoder =
        encoder.with_context(|| format!("failed to build {} encoder", args.kind))?;
    let count = args.count.unwrap_or_else(|| encoder.sequence_length());

    tracing::info!(
        kind = %encoder.payload_kind(),
        density = %encoder.density(),
        network = %encoder.network(),
        parts = encoder.sequence_length(),
        count,
        "encoding payload"
    );

    for _ in 0..count {
        let fragment = encoder.next_fragment().context("failed to produce fragment")?;
        println!("{}", display(&fragment));
    }

    Ok(())
}

/// Settings file (or defaults) with command-line overrides applied.
fn load_settings(args: &EncodeArgs) -> Result<EncoderSettings> {
    let mut settings = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            EncoderSettings::from_toml_str(&text)
                .with_context(|| format!("invalid settings in {}", path.display()))?
        }
        None => EncoderSettings::default(),
    };

    if let Some(density) = args.density {
        settings.density = density;
    }
    if let Some(network) = args.network {
        settings.network = network;
    }
    if let Some(language) = &args.language {
        settings.wordlist_language.clone_from(language);
    }
    Ok(settings)
}

fn display(fragment: &Fragment) -> String {
    match fragment {
        Fragment::Text(text) => text.clone(),
        Fragment::Bytes(bytes) => hex::encode(bytes),
    }
}
