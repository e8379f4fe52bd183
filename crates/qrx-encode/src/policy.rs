//! Fragment budgets per QR density (NORMATIVE).
//!
//! Receivers are tuned to these numbers; changing them breaks scanning on
//! deployed companion wallets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::settings::SettingsError;

/// Qualitative QR density chosen by the user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    /// Large modules, easiest to scan, most frames.
    Low,
    /// Default.
    #[default]
    Medium,
    /// Small modules, fewest frames.
    High,
}

impl Density {
    /// All densities, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Config/CLI name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Density {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(SettingsError::InvalidValue {
                field: "density",
                value: other.to_string(),
            }),
        }
    }
}

/// Maps a density to the per-format fragment budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FragmentPolicy {
    /// Max fragment length handed to the fountain encoder, in bytes.
    pub fountain_budget: usize,
    /// Characters per legacy `pXofY` chunk.
    pub chunk_budget: usize,
}

impl FragmentPolicy {
    /// Budgets for a density.
    #[must_use]
    pub const fn for_density(density: Density) -> Self {
        match density {
            Density::Low => Self {
                fountain_budget: 10,
                chunk_budget: 40,
            },
            Density::Medium => Self {
                fountain_budget: 30,
                chunk_budget: 65,
            },
            Density::High => Self {
                fountain_budget: 120,
                chunk_budget: 90,
            },
        }
    }
}

impl From<Density> for FragmentPolicy {
    fn from(density: Density) -> Self {
        Self::for_density(density)
    }
}
