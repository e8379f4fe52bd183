//! Export settings: density, network, and wordlist language.
//!
//! Settings are plain serde data so they can live in a TOML file next to the
//! device configuration:
//!
//! ```toml
//! density = "high"
//! network = "testnet"
//! wordlist_language = "en"
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::policy::Density;

/// Default wordlist language code.
pub const DEFAULT_WORDLIST_LANGUAGE: &str = "en";

/// Errors reading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The TOML document is malformed or has wrongly typed fields.
    #[error("settings parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A single setting has an unrecognized value.
    #[error("invalid {field}: {value:?}")]
    InvalidValue {
        /// Setting name.
        field: &'static str,
        /// Rejected value.
        value: String,
    },
}

/// Bitcoin network the exported keys belong to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Main network.
    #[default]
    Mainnet,
    /// Public test network.
    Testnet,
    /// Local regression-test network.
    Regtest,
}

impl Network {
    /// Config/CLI name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Regtest => "regtest",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Self::Mainnet),
            "testnet" | "test" => Ok(Self::Testnet),
            "regtest" => Ok(Self::Regtest),
            other => Err(SettingsError::InvalidValue {
                field: "network",
                value: other.to_string(),
            }),
        }
    }
}

/// Settings applied to every request built from them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncoderSettings {
    /// QR density.
    pub density: Density,
    /// Key network.
    pub network: Network,
    /// Wordlist language code for seed-phrase kinds.
    pub wordlist_language: String,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            density: Density::default(),
            network: Network::default(),
            wordlist_language: DEFAULT_WORDLIST_LANGUAGE.to_string(),
        }
    }
}

impl EncoderSettings {
    /// Parse settings from a TOML document. Missing fields take defaults.
    ///
    /// # Errors
    /// Returns `SettingsError::Toml` for malformed input or unknown fields.
    pub fn from_toml_str(input: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = EncoderSettings::default();
        assert_eq!(settings.density, Density::Medium);
        assert_eq!(settings.network, Network::Mainnet);
        assert_eq!(settings.wordlist_language, "en");
    }

    #[test]
    fn toml_partial_document() {
        let settings = EncoderSettings::from_toml_str("density = \"high\"\n").unwrap();
        assert_eq!(settings.density, Density::High);
        assert_eq!(settings.network, Network::Mainnet);
    }

    #[test]
    fn toml_full_document() {
        let settings = EncoderSettings::from_toml_str(
            "density = \"low\"\nnetwork = \"regtest\"\nwordlist_language = \"es\"\n",
        )
        .unwrap();
        assert_eq!(
            settings,
            EncoderSettings {
                density: Density::Low,
                network: Network::Regtest,
                wordlist_language: "es".into(),
            }
        );
    }

    #[test]
    fn toml_rejects_unknown_fields() {
        let err = EncoderSettings::from_toml_str("colour = \"red\"\n").unwrap_err();
        assert!(matches!(err, SettingsError::Toml(_)));
    }

    #[test]
    fn toml_rejects_bad_density() {
        assert!(EncoderSettings::from_toml_str("density = \"ultra\"\n").is_err());
    }

    #[test]
    fn network_parsing() {
        assert_eq!("TESTNET".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!("main".parse::<Network>().unwrap(), Network::Mainnet);
        let err = "signet".parse::<Network>().unwrap_err();
        assert_eq!(err.to_string(), "invalid network: \"signet\"");
    }
}
