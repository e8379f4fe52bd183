//! BIP32 path parsing and output script-type inference.
//!
//! Script types are read off the path's purpose field (BIP44/49/84/86) and,
//! for BIP48 multisig, the script-type field in position four:
//!
//! ```text
//! m / purpose' / coin' / account' / script' / ...
//!      84  -> wpkh          48 + 2' -> wsh
//!      49  -> sh(wpkh)      48 + 1' -> sh(wsh)
//!      86  -> tr
//! ```
//!
//! Anything else is `Unknown`, and the account export then carries every
//! recognized script type so the receiving wallet can pick.

use std::fmt;

use qrx_ur::{CryptoKeypath, ScriptExpression};
use serde::Serialize;

pub use qrx_ur::PathComponent;

use crate::error::{EncodeError, EncodeResult};

/// Largest non-hardened child index.
const MAX_CHILD_INDEX: u32 = (1 << 31) - 1;

/// Parsed derivation path anchored at a root fingerprint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivationKeypath {
    components: Vec<PathComponent>,
    root_fingerprint: [u8; 4],
}

impl DerivationKeypath {
    /// Parse `m/84'/0'/0'` style paths.
    ///
    /// The leading `m` and a trailing slash are optional. A trailing `'` or
    /// `h` marks a hardened step.
    ///
    /// # Errors
    /// Returns `EncodeError::InvalidDerivation` for empty steps, non-numeric
    /// indices, or indices at or above 2^31.
    pub fn parse(path: &str, root_fingerprint: [u8; 4]) -> EncodeResult<Self> {
        let invalid = |reason: String| EncodeError::InvalidDerivation {
            path: path.to_string(),
            reason,
        };

        let mut steps: Vec<&str> = path.trim().split('/').collect();
        if steps.first() == Some(&"m") {
            steps.remove(0);
        }
        if steps.last() == Some(&"") {
            steps.pop();
        }

        let components = steps
            .into_iter()
            .map(|step| parse_component(step).map_err(&invalid))
            .collect::<EncodeResult<Vec<_>>>()?;

        if components.len() > usize::from(u8::MAX) {
            return Err(invalid(format!("{} steps exceeds 255", components.len())));
        }

        Ok(Self {
            components,
            root_fingerprint,
        })
    }

    /// Path components, root first.
    #[must_use]
    pub fn components(&self) -> &[PathComponent] {
        &self.components
    }

    /// Root key fingerprint.
    #[must_use]
    pub const fn root_fingerprint(&self) -> [u8; 4] {
        self.root_fingerprint
    }

    /// Number of steps from the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.components.len()
    }

    /// Script type implied by the path.
    #[must_use]
    pub fn script_type(&self) -> ScriptType {
        ScriptType::infer(&self.components)
    }

    /// Script types to export for this path, falling back to all of them.
    #[must_use]
    pub fn descriptor_script_types(&self) -> Vec<ScriptType> {
        match self.script_type() {
            ScriptType::Unknown => {
                tracing::warn!(
                    path = %self,
                    "unrecognized derivation purpose, exporting all script types"
                );
                ScriptType::RECOGNIZED.to_vec()
            }
            known => vec![known],
        }
    }

    /// `crypto-keypath` origin for this path. Depth is omitted for the root.
    ///
    /// # Errors
    /// Returns `EncodeError::Ur` if the depth does not fit a `u8`.
    pub fn to_crypto_keypath(&self) -> EncodeResult<CryptoKeypath> {
        let depth = if self.components.is_empty() {
            None
        } else {
            Some(CryptoKeypath::depth_of(&self.components)?)
        };
        Ok(CryptoKeypath::new(
            self.components.clone(),
            Some(self.root_fingerprint),
            depth,
        ))
    }
}

impl fmt::Display for DerivationKeypath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for c in &self.components {
            write!(f, "/{}", c.index)?;
            if c.hardened {
                f.write_str("'")?;
            }
        }
        Ok(())
    }
}

fn parse_component(step: &str) -> Result<PathComponent, String> {
    let (digits, hardened) = match step.strip_suffix(|c: char| c == '\'' || c == 'h') {
        Some(rest) => (rest, true),
        None => (step, false),
    };
    if digits.is_empty() {
        return Err("empty path step".to_string());
    }
    let index: u32 = digits
        .parse()
        .map_err(|_| format!("step {step:?} is not a child index"))?;
    if index > MAX_CHILD_INDEX {
        return Err(format!("step {step:?} exceeds 2^31-1"));
    }
    Ok(PathComponent::new(index, hardened))
}

/// Output script template a key is meant for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScriptType {
    /// BIP84 `wpkh`.
    NativeSegwit,
    /// BIP49 `sh(wpkh)`.
    NestedSegwit,
    /// BIP48 script type 2, `wsh`.
    NativeSegwitMultisig,
    /// BIP48 script type 1, `sh(wsh)`.
    NestedSegwitMultisig,
    /// BIP86 `tr`.
    Taproot,
    /// Purpose not recognized.
    Unknown,
}

impl ScriptType {
    /// Recognized script types, in fallback emission order.
    pub const RECOGNIZED: [Self; 5] = [
        Self::NativeSegwit,
        Self::NestedSegwit,
        Self::NativeSegwitMultisig,
        Self::NestedSegwitMultisig,
        Self::Taproot,
    ];

    /// Infer from path components (purpose first).
    #[must_use]
    pub fn infer(components: &[PathComponent]) -> Self {
        let Some(purpose) = components.first() else {
            return Self::Unknown;
        };
        match purpose.index {
            84 => Self::NativeSegwit,
            49 => Self::NestedSegwit,
            86 => Self::Taproot,
            48 => match components.get(3).map(|c| c.index) {
                Some(2) => Self::NativeSegwitMultisig,
                Some(1) => Self::NestedSegwitMultisig,
                _ => Self::Unknown,
            },
            _ => Self::Unknown,
        }
    }

    /// Script expressions, outermost first. Empty for `Unknown`.
    #[must_use]
    pub const fn expressions(self) -> &'static [ScriptExpression] {
        match self {
            Self::NativeSegwit => &[ScriptExpression::WitnessPublicKeyHash],
            Self::NestedSegwit => &[
                ScriptExpression::ScriptHash,
                ScriptExpression::WitnessPublicKeyHash,
            ],
            Self::NativeSegwitMultisig => &[ScriptExpression::WitnessScriptHash],
            Self::NestedSegwitMultisig => &[
                ScriptExpression::ScriptHash,
                ScriptExpression::WitnessScriptHash,
            ],
            Self::Taproot => &[ScriptExpression::Taproot],
            Self::Unknown => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FP: [u8; 4] = [0x73, 0xc5, 0xda, 0x0a];

    fn parse(path: &str) -> DerivationKeypath {
        DerivationKeypath::parse(path, FP).unwrap()
    }

    #[test]
    fn parses_hardened_markers() {
        let kp = parse("m/84'/0h/0'/1/7");
        assert_eq!(
            kp.components(),
            &[
                PathComponent::new(84, true),
                PathComponent::new(0, true),
                PathComponent::new(0, true),
                PathComponent::new(1, false),
                PathComponent::new(7, false),
            ]
        );
        assert_eq!(kp.depth(), 5);
        assert_eq!(kp.root_fingerprint(), FP);
    }

    #[test]
    fn leading_m_and_trailing_slash_optional() {
        assert_eq!(parse("m/49'/0'/0'/"), parse("49'/0'/0'"));
        assert_eq!(parse("m").depth(), 0);
        assert_eq!(parse("m/").depth(), 0);
    }

    #[test]
    fn hardened_flag_is_identity() {
        assert_ne!(parse("m/44'"), parse("m/44"));
    }

    #[test]
    fn rejects_malformed_steps() {
        for bad in ["m/84'/x/0'", "m//0", "m/'", "m/2147483648", "m/-1"] {
            let err = DerivationKeypath::parse(bad, FP).unwrap_err();
            assert!(
                matches!(err, EncodeError::InvalidDerivation { .. }),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn largest_index_accepted() {
        let kp = parse("m/2147483647'");
        assert_eq!(kp.components()[0].index, MAX_CHILD_INDEX);
    }

    #[test]
    fn script_type_inference() {
        let cases = [
            ("m/84'/0'/0'", ScriptType::NativeSegwit),
            ("m/49'/0'/0'", ScriptType::NestedSegwit),
            ("m/86'/0'/0'", ScriptType::Taproot),
            ("m/48'/0'/0'/2'", ScriptType::NativeSegwitMultisig),
            ("m/48'/0'/0'/1'", ScriptType::NestedSegwitMultisig),
            ("m/48'/0'/0'/3'", ScriptType::Unknown),
            ("m/48'/0'/0'", ScriptType::Unknown),
            ("m/44'/0'/0'", ScriptType::Unknown),
            ("m", ScriptType::Unknown),
        ];
        for (path, expected) in cases {
            assert_eq!(parse(path).script_type(), expected, "{path}");
        }
    }

    #[test]
    fn unknown_purpose_falls_back_to_all_recognized() {
        let types = parse("m/44'/0'/0'").descriptor_script_types();
        assert_eq!(types, ScriptType::RECOGNIZED.to_vec());
        assert!(!types.contains(&ScriptType::Unknown));

        let types = parse("m/84'/0'/0'").descriptor_script_types();
        assert_eq!(types, vec![ScriptType::NativeSegwit]);
    }

    #[test]
    fn expressions_per_script_type() {
        assert_eq!(
            ScriptType::NestedSegwitMultisig.expressions(),
            &[
                ScriptExpression::ScriptHash,
                ScriptExpression::WitnessScriptHash
            ]
        );
        assert!(ScriptType::Unknown.expressions().is_empty());
        for t in ScriptType::RECOGNIZED {
            assert!(!t.expressions().is_empty());
        }
    }

    #[test]
    fn crypto_keypath_depth() {
        let origin = parse("m/84'/0'/0'").to_crypto_keypath().unwrap();
        assert_eq!(origin.depth, Some(3));
        assert_eq!(origin.source_fingerprint, Some(FP));

        let root = parse("m").to_crypto_keypath().unwrap();
        assert_eq!(root.depth, None);
        assert!(root.components.is_empty());
    }

    #[test]
    fn display_round_trips() {
        let kp = parse("m/48h/1h/0h/2h/0");
        assert_eq!(kp.to_string(), "m/48'/1'/0'/2'/0");
        assert_eq!(parse(&kp.to_string()), kp);
    }
}
