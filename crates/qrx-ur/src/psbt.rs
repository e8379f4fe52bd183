//! `crypto-psbt`.

use ciborium::value::Value;

use crate::error::UrError;
use crate::{UrPayload, UrType};

/// Serialized PSBT carried as a CBOR byte string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CryptoPsbt(Vec<u8>);

impl CryptoPsbt {
    /// Wrap serialized PSBT bytes.
    #[must_use]
    pub fn new(psbt: impl Into<Vec<u8>>) -> Self {
        Self(psbt.into())
    }

    /// Borrow the PSBT bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl UrPayload for CryptoPsbt {
    fn ur_type(&self) -> UrType {
        UrType::CryptoPsbt
    }

    fn to_value(&self) -> Result<Value, UrError> {
        Ok(Value::Bytes(self.0.clone()))
    }
}
