//! Encoding requests: what to encode and how.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::account::AccountExport;
use crate::error::EncodeError;
use crate::policy::Density;
use crate::settings::{EncoderSettings, Network, DEFAULT_WORDLIST_LANGUAGE};

/// Output format requested by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayloadKind {
    /// PSBT as base64 over legacy `pXofY` chunks.
    Psbt,
    /// PSBT as a fountain-coded `crypto-psbt` UR.
    UrPsbt,
    /// Single xpub descriptor string.
    Xpub,
    /// Xpub descriptor string over legacy chunks.
    XpubChunked,
    /// Account descriptors as a fountain-coded `crypto-account` UR.
    UrAccount,
    /// SeedQR, digits.
    #[serde(rename = "seedqr")]
    SeedQr,
    /// CompactSeedQR, bytes.
    #[serde(rename = "compact-seedqr")]
    CompactSeedQr,
    /// Plain address.
    Address,
}

impl PayloadKind {
    /// Every kind, in CLI listing order.
    pub const ALL: [Self; 8] = [
        Self::Psbt,
        Self::UrPsbt,
        Self::Xpub,
        Self::XpubChunked,
        Self::UrAccount,
        Self::SeedQr,
        Self::CompactSeedQr,
        Self::Address,
    ];

    /// Stable kind code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Psbt => "psbt",
            Self::UrPsbt => "ur-psbt",
            Self::Xpub => "xpub",
            Self::XpubChunked => "xpub-chunked",
            Self::UrAccount => "ur-account",
            Self::SeedQr => "seedqr",
            Self::CompactSeedQr => "compact-seedqr",
            Self::Address => "address",
        }
    }

    /// Whether the kind encodes a mnemonic and needs a wordlist.
    #[must_use]
    pub const fn is_seed_phrase(self) -> bool {
        matches!(self, Self::SeedQr | Self::CompactSeedQr)
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayloadKind {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| EncodeError::UnsupportedKind(s.to_string()))
    }
}

/// The data to encode.
#[derive(Clone, PartialEq, Eq)]
pub enum Payload {
    /// Serialized PSBT bytes.
    Psbt(Vec<u8>),
    /// Exported account key.
    Account(AccountExport),
    /// Mnemonic words.
    SeedPhrase(Zeroizing<Vec<String>>),
    /// Address text.
    Address(String),
}

impl Payload {
    /// Wrap mnemonic words.
    #[must_use]
    pub fn seed_phrase<S: AsRef<str>>(words: &[S]) -> Self {
        Self::SeedPhrase(Zeroizing::new(
            words.iter().map(|w| w.as_ref().to_string()).collect(),
        ))
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Psbt(bytes) => f.debug_tuple("Psbt").field(&bytes.len()).finish(),
            Self::Account(account) => f.debug_tuple("Account").field(account).finish(),
            Self::SeedPhrase(words) => f
                .debug_struct("SeedPhrase")
                .field("word_count", &words.len())
                .finish(),
            Self::Address(address) => f.debug_tuple("Address").field(address).finish(),
        }
    }
}

/// One export operation's input. Immutable once handed to the factory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodingRequest {
    kind: PayloadKind,
    payload: Payload,
    density: Density,
    network: Network,
    wordlist_language: String,
}

impl EncodingRequest {
    /// Request with default density, network, and wordlist language.
    #[must_use]
    pub fn new(kind: PayloadKind, payload: Payload) -> Self {
        Self {
            kind,
            payload,
            density: Density::default(),
            network: Network::default(),
            wordlist_language: DEFAULT_WORDLIST_LANGUAGE.to_string(),
        }
    }

    /// Request taking density, network, and language from `settings`.
    #[must_use]
    pub fn from_settings(kind: PayloadKind, payload: Payload, settings: &EncoderSettings) -> Self {
        Self {
            kind,
            payload,
            density: settings.density,
            network: settings.network,
            wordlist_language: settings.wordlist_language.clone(),
        }
    }

    /// Set the density.
    #[must_use]
    pub fn with_density(mut self, density: Density) -> Self {
        self.density = density;
        self
    }

    /// Set the network.
    #[must_use]
    pub fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    /// Set the wordlist language code.
    #[must_use]
    pub fn with_wordlist_language(mut self, code: impl Into<String>) -> Self {
        self.wordlist_language = code.into();
        self
    }

    /// Requested kind.
    #[must_use]
    pub const fn kind(&self) -> PayloadKind {
        self.kind
    }

    /// Payload.
    #[must_use]
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Requested density.
    #[must_use]
    pub const fn density(&self) -> Density {
        self.density
    }

    /// Key network.
    #[must_use]
    pub const fn network(&self) -> Network {
        self.network
    }

    /// Wordlist language code.
    #[must_use]
    pub fn wordlist_language(&self) -> &str {
        &self.wordlist_language
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_codes_round_trip() {
        for kind in PayloadKind::ALL {
            assert_eq!(kind.as_str().parse::<PayloadKind>().unwrap(), kind);
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn unknown_kind_rejected() {
        assert_eq!(
            "psbt-v3".parse::<PayloadKind>().unwrap_err(),
            EncodeError::UnsupportedKind("psbt-v3".into())
        );
    }

    #[test]
    fn seed_kinds() {
        assert!(PayloadKind::SeedQr.is_seed_phrase());
        assert!(PayloadKind::CompactSeedQr.is_seed_phrase());
        assert!(!PayloadKind::Xpub.is_seed_phrase());
    }

    #[test]
    fn builder_and_settings() {
        let settings = EncoderSettings {
            density: Density::High,
            network: Network::Testnet,
            wordlist_language: "es".into(),
        };
        let req = EncodingRequest::from_settings(
            PayloadKind::Address,
            Payload::Address("bc1qexample".into()),
            &settings,
        );
        assert_eq!(req.density(), Density::High);
        assert_eq!(req.network(), Network::Testnet);
        assert_eq!(req.wordlist_language(), "es");

        let req = EncodingRequest::new(PayloadKind::Psbt, Payload::Psbt(vec![1]))
            .with_density(Density::Low)
            .with_wordlist_language("fr");
        assert_eq!(req.density(), Density::Low);
        assert_eq!(req.network(), Network::Mainnet);
        assert_eq!(req.wordlist_language(), "fr");
    }

    #[test]
    fn debug_redacts_seed_phrase() {
        let payload = Payload::seed_phrase(&["abandon", "about"]);
        let dbg = format!("{payload:?}");
        assert!(!dbg.contains("abandon"));
        assert!(dbg.contains("word_count"));
    }
}
