//! Payload loading for `qrx encode`.

use std::path::Path;

use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use qrx_encode::{AccountExport, Payload, PayloadKind, Wordlist, WordlistSource};

use super::EncodeArgs;

/// Binary PSBT magic: `psbt` followed by 0xff.
const PSBT_MAGIC: &[u8] = b"psbt\xff";

/// Build the payload `kind` expects from whichever input flag was given.
pub fn load_payload(kind: PayloadKind, args: &EncodeArgs) -> Result<Payload> {
    match kind {
        PayloadKind::Psbt | PayloadKind::UrPsbt => {
            let path = require_input(args, kind)?;
            let raw = std::fs::read(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(Payload::Psbt(decode_psbt(&raw)?))
        }
        PayloadKind::Xpub | PayloadKind::XpubChunked | PayloadKind::UrAccount => {
            let path = require_input(args, kind)?;
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let account: AccountExport = serde_json::from_str(&text)
                .with_context(|| format!("invalid account export in {}", path.display()))?;
            Ok(Payload::Account(account))
        }
        PayloadKind::SeedQr | PayloadKind::CompactSeedQr => {
            let phrase = match (&args.words, &args.input) {
                (Some(words), _) => words.clone(),
                (None, Some(path)) => std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                (None, None) => bail!("{kind} needs --words or --input"),
            };
            let words: Vec<&str> = phrase.split_whitespace().collect();
            Ok(Payload::seed_phrase(&words))
        }
        PayloadKind::Address => {
            let address = match (&args.address, &args.input) {
                (Some(address), _) => address.clone(),
                (None, Some(path)) => std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                (None, None) => bail!("address needs --address or --input"),
            };
            Ok(Payload::Address(address))
        }
    }
}

/// A wordlist read from disk, served for every language code.
#[derive(Debug)]
pub struct FileWordlist(Wordlist);

impl WordlistSource for FileWordlist {
    fn get_wordlist(&self, _code: &str) -> Option<Wordlist> {
        Some(self.0.clone())
    }
}

/// Read one word per line; blank lines are skipped.
pub fn load_wordlist(path: &Path) -> Result<FileWordlist> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let words = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();
    let wordlist = Wordlist::new(words)
        .with_context(|| format!("invalid wordlist in {}", path.display()))?;
    Ok(FileWordlist(wordlist))
}

fn require_input(args: &EncodeArgs, kind: PayloadKind) -> Result<&Path> {
    args.input
        .as_deref()
        .with_context(|| format!("{kind} needs --input"))
}

/// Accept a raw binary PSBT or its base64 text form.
fn decode_psbt(raw: &[u8]) -> Result<Vec<u8>> {
    if raw.starts_with(PSBT_MAGIC) {
        return Ok(raw.to_vec());
    }
    let text = std::str::from_utf8(raw).context("PSBT is neither binary nor base64 text")?;
    let bytes = STANDARD
        .decode(text.trim())
        .context("PSBT is neither binary nor base64 text")?;
    tracing::debug!(len = bytes.len(), "decoded base64 PSBT");
    Ok(bytes)
}
