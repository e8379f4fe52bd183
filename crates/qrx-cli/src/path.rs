//! `qrx path` command implementation.
//!
//! Shows how a derivation path parses and which script types an account
//! export for it would carry.

use anyhow::{Context, Result};
use clap::Args;
use qrx_encode::{DerivationKeypath, ScriptType};
use serde::Serialize;

/// Arguments for the `qrx path` command.
#[derive(Args, Debug)]
pub struct PathArgs {
    /// Derivation path, e.g. `m/84'/0'/0'`.
    pub derivation: String,

    /// Root key fingerprint (8 hex characters).
    #[arg(long, short = 'f', default_value = "00000000")]
    pub fingerprint: String,
}

/// JSON report for a parsed path.
#[derive(Debug, Serialize)]
struct PathReport {
    path: String,
    fingerprint: String,
    depth: usize,
    components: Vec<String>,
    script_type: ScriptType,
    descriptor_script_types: Vec<ScriptType>,
}

/// Run the path command.
///
/// # Errors
///
/// Returns an error if the fingerprint or path is malformed.
pub fn run(args: &PathArgs) -> Result<()> {
    let fingerprint = parse_fingerprint(&args.fingerprint)?;
    let keypath = DerivationKeypath::parse(&args.derivation, fingerprint)
        .with_context(|| format!("invalid derivation {:?}", args.derivation))?;

    let report = PathReport {
        path: keypath.to_string(),
        fingerprint: hex::encode(keypath.root_fingerprint()),
        depth: keypath.depth(),
        components: keypath
            .components()
            .iter()
            .map(|c| format!("{}{}", c.index, if c.hardened { "'" } else { "" }))
            .collect(),
        script_type: keypath.script_type(),
        descriptor_script_types: keypath.descriptor_script_types(),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn parse_fingerprint(text: &str) -> Result<[u8; 4]> {
    let mut fingerprint = [0u8; 4];
    hex::decode_to_slice(text, &mut fingerprint)
        .with_context(|| format!("fingerprint {text:?} is not 4 hex bytes"))?;
    Ok(fingerprint)
}
