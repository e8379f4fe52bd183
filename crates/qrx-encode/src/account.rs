//! Account export: the xpub descriptor string and the `crypto-account` UR.
//!
//! Keys are derived elsewhere; this module only shapes what the external
//! BIP32 library hands over.

use qrx_ur::{CryptoAccount, CryptoHdKey, CryptoOutput};
use serde::{Deserialize, Serialize};

use crate::derivation::DerivationKeypath;
use crate::error::EncodeResult;

/// Extended public key plus its origin, as produced by a BIP32 library.
///
/// Byte fields are hex strings in JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountExport {
    /// Master key fingerprint.
    #[serde(with = "hex::serde")]
    pub root_fingerprint: [u8; 4],
    /// Derivation path of the exported key, e.g. `m/84'/0'/0'`.
    pub derivation: String,
    /// Base58 extended public key (`xpub`, `zpub`, `tpub`, ...).
    pub xpub: String,
    /// 33-byte compressed public key.
    #[serde(with = "hex::serde")]
    pub public_key: Vec<u8>,
    /// BIP32 chain code.
    #[serde(with = "hex::serde")]
    pub chain_code: [u8; 32],
    /// Fingerprint of the key's parent.
    #[serde(with = "hex::serde")]
    pub parent_fingerprint: [u8; 4],
}

impl AccountExport {
    /// `[<fingerprint hex><path without m>]<xpub>`, the format wallets import
    /// from a plain xpub QR.
    #[must_use]
    pub fn xpub_descriptor_string(&self) -> String {
        let path = self.derivation.trim();
        let path = path.strip_prefix('m').unwrap_or(path);
        let sep = if path.is_empty() || path.starts_with('/') {
            ""
        } else {
            "/"
        };
        format!(
            "[{}{sep}{path}]{}",
            hex::encode(self.root_fingerprint),
            self.xpub
        )
    }

    /// Parsed derivation anchored at the root fingerprint.
    ///
    /// # Errors
    /// Returns `EncodeError::InvalidDerivation` if the path does not parse.
    pub fn keypath(&self) -> EncodeResult<DerivationKeypath> {
        DerivationKeypath::parse(&self.derivation, self.root_fingerprint)
    }

    /// Build the `crypto-account` item: one output per script type the path
    /// implies, or all recognized types when the path is not recognized.
    ///
    /// # Errors
    /// Returns `EncodeError::InvalidDerivation` for a bad path and
    /// `EncodeError::Ur` for a malformed public key.
    pub fn to_crypto_account(&self) -> EncodeResult<CryptoAccount> {
        let keypath = self.keypath()?;
        let hdkey = CryptoHdKey::new(
            self.public_key.clone(),
            self.chain_code,
            keypath.to_crypto_keypath()?,
            self.parent_fingerprint,
        )?;

        let outputs = keypath
            .descriptor_script_types()
            .into_iter()
            .map(|script_type| CryptoOutput::new(script_type.expressions().to_vec(), hdkey.clone()))
            .collect();

        Ok(CryptoAccount::new(self.root_fingerprint, outputs)?)
    }
}
