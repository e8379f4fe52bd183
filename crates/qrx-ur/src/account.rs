//! `crypto-account` (tag 311).

use ciborium::value::Value;

use crate::error::UrError;
use crate::output::CryptoOutput;
use crate::{fingerprint_value, uint, UrPayload, UrType};

/// Master fingerprint plus the output descriptors exported for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CryptoAccount {
    master_fingerprint: [u8; 4],
    outputs: Vec<CryptoOutput>,
}

impl CryptoAccount {
    /// Create an account item.
    ///
    /// # Errors
    /// Returns `UrError::NoOutputs` when `outputs` is empty.
    pub fn new(master_fingerprint: [u8; 4], outputs: Vec<CryptoOutput>) -> Result<Self, UrError> {
        if outputs.is_empty() {
            return Err(UrError::NoOutputs);
        }
        Ok(Self {
            master_fingerprint,
            outputs,
        })
    }

    /// Master key fingerprint.
    #[must_use]
    pub const fn master_fingerprint(&self) -> [u8; 4] {
        self.master_fingerprint
    }

    /// Output descriptors in emission order.
    #[must_use]
    pub fn outputs(&self) -> &[CryptoOutput] {
        &self.outputs
    }
}

impl UrPayload for CryptoAccount {
    fn ur_type(&self) -> UrType {
        UrType::CryptoAccount
    }

    fn to_value(&self) -> Result<Value, UrError> {
        let outputs = self
            .outputs
            .iter()
            .map(CryptoOutput::to_tagged_value)
            .collect();
        Ok(Value::Map(vec![
            (uint(1u8), fingerprint_value(self.master_fingerprint)),
            (uint(2u8), Value::Array(outputs)),
        ]))
    }
}
