//! `crypto-hdkey` (tag 303), public-key form only.

use ciborium::value::Value;

use crate::error::UrError;
use crate::keypath::CryptoKeypath;
use crate::{fingerprint_value, tagged, tags, uint};

/// Compressed secp256k1 public key length.
pub const KEY_DATA_LEN: usize = 33;
/// BIP32 chain code length.
pub const CHAIN_CODE_LEN: usize = 32;

/// Extended public key with origin metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CryptoHdKey {
    key_data: Vec<u8>,
    chain_code: [u8; CHAIN_CODE_LEN],
    origin: CryptoKeypath,
    parent_fingerprint: [u8; 4],
}

impl CryptoHdKey {
    /// Create an extended public key item.
    ///
    /// # Errors
    /// Returns `UrError::InvalidLength` if `key_data` is not a 33-byte
    /// compressed key.
    pub fn new(
        key_data: impl Into<Vec<u8>>,
        chain_code: [u8; CHAIN_CODE_LEN],
        origin: CryptoKeypath,
        parent_fingerprint: [u8; 4],
    ) -> Result<Self, UrError> {
        let key_data = key_data.into();
        if key_data.len() != KEY_DATA_LEN {
            return Err(UrError::InvalidLength {
                field: "key data",
                expected: KEY_DATA_LEN,
                got: key_data.len(),
            });
        }
        Ok(Self {
            key_data,
            chain_code,
            origin,
            parent_fingerprint,
        })
    }

    /// Untagged map `{3: key, 4: chain code, 6: origin, 8: parent fingerprint}`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Map(vec![
            (uint(3u8), Value::Bytes(self.key_data.clone())),
            (uint(4u8), Value::Bytes(self.chain_code.to_vec())),
            (uint(6u8), self.origin.to_tagged_value()),
            (uint(8u8), fingerprint_value(self.parent_fingerprint)),
        ])
    }

    /// Tagged data item (`#6.303`).
    #[must_use]
    pub fn to_tagged_value(&self) -> Value {
        tagged(tags::CRYPTO_HDKEY, self.to_value())
    }
}
