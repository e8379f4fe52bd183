//! `crypto-output` (tag 308): a key wrapped in script-expression tags.

use ciborium::value::Value;
use serde::{Deserialize, Serialize};

use crate::hdkey::CryptoHdKey;
use crate::{tagged, tags};

/// Output-descriptor script expressions and their registry tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScriptExpression {
    /// `sh(...)`
    ScriptHash,
    /// `wsh(...)`
    WitnessScriptHash,
    /// `wpkh(...)`
    WitnessPublicKeyHash,
    /// `tr(...)`
    Taproot,
}

impl ScriptExpression {
    /// Registry tag for this expression.
    #[must_use]
    pub const fn tag(self) -> u64 {
        match self {
            Self::ScriptHash => 400,
            Self::WitnessScriptHash => 401,
            Self::WitnessPublicKeyHash => 404,
            Self::Taproot => 409,
        }
    }

    /// Descriptor function name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ScriptHash => "sh",
            Self::WitnessScriptHash => "wsh",
            Self::WitnessPublicKeyHash => "wpkh",
            Self::Taproot => "tr",
        }
    }
}

/// An output descriptor: outermost expression first, then the key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CryptoOutput {
    /// Script expressions, outermost first (e.g. `[sh, wpkh]`).
    pub expressions: Vec<ScriptExpression>,
    /// The key the expressions wrap.
    pub key: CryptoHdKey,
}

impl CryptoOutput {
    /// Create an output descriptor.
    #[must_use]
    pub const fn new(expressions: Vec<ScriptExpression>, key: CryptoHdKey) -> Self {
        Self { expressions, key }
    }

    /// Untagged item: nested expression tags around `#6.303(key)`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        self.expressions
            .iter()
            .rev()
            .fold(self.key.to_tagged_value(), |inner, expr| {
                tagged(expr.tag(), inner)
            })
    }

    /// Tagged data item (`#6.308`).
    #[must_use]
    pub fn to_tagged_value(&self) -> Value {
        tagged(tags::CRYPTO_OUTPUT, self.to_value())
    }

    /// Human-readable descriptor skeleton, e.g. `sh(wpkh(KEY))`.
    #[must_use]
    pub fn skeleton(&self) -> String {
        let open: String = self
            .expressions
            .iter()
            .map(|e| format!("{}(", e.as_str()))
            .collect();
        format!("{open}KEY{}", ")".repeat(self.expressions.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypath::{CryptoKeypath, PathComponent};

    fn key() -> CryptoHdKey {
        let origin = CryptoKeypath::new(vec![PathComponent::new(49, true)], None, Some(1));
        CryptoHdKey::new(vec![2u8; 33], [0u8; 32], origin, [0; 4]).unwrap()
    }

    #[test]
    fn nested_segwit_tags_outermost_first() {
        let out = CryptoOutput::new(
            vec![
                ScriptExpression::ScriptHash,
                ScriptExpression::WitnessPublicKeyHash,
            ],
            key(),
        );

        let Value::Tag(outer, inner) = out.to_value() else {
            panic!("expected tag");
        };
        assert_eq!(outer, 400);
        let Value::Tag(middle, inner) = *inner else {
            panic!("expected tag");
        };
        assert_eq!(middle, 404);
        assert!(matches!(*inner, Value::Tag(303, _)));
    }

    #[test]
    fn tagged_output_is_308() {
        let out = CryptoOutput::new(vec![ScriptExpression::Taproot], key());
        assert!(matches!(out.to_tagged_value(), Value::Tag(308, _)));
    }

    #[test]
    fn skeleton_rendering() {
        let out = CryptoOutput::new(
            vec![
                ScriptExpression::ScriptHash,
                ScriptExpression::WitnessScriptHash,
            ],
            key(),
        );
        assert_eq!(out.skeleton(), "sh(wsh(KEY))");
    }

    #[test]
    fn expression_tags() {
        let cases = [
            (ScriptExpression::ScriptHash, 400, "sh"),
            (ScriptExpression::WitnessScriptHash, 401, "wsh"),
            (ScriptExpression::WitnessPublicKeyHash, 404, "wpkh"),
            (ScriptExpression::Taproot, 409, "tr"),
        ];
        for (expr, tag, name) in cases {
            assert_eq!(expr.tag(), tag);
            assert_eq!(expr.as_str(), name);
        }
    }

    #[test]
    fn expression_serde_names() {
        let json = serde_json::to_string(&ScriptExpression::WitnessPublicKeyHash).unwrap();
        assert_eq!(json, "\"witness-public-key-hash\"");
    }
}
