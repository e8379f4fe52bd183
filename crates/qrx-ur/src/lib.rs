//! UR registry CBOR types for airgapped QR export.
//!
//! This crate implements the CBOR data items that companion wallets expect
//! inside a Uniform Resource (UR):
//! - `crypto-psbt`: a partially signed transaction as a byte string
//! - `crypto-keypath` (tag 304): BIP32 origin path with source fingerprint
//! - `crypto-hdkey` (tag 303): extended public key material
//! - `crypto-output` (tag 308): a key wrapped in script-expression tags
//! - `crypto-account` (tag 311): master fingerprint plus output descriptors
//!
//! Only the byte-level data items live here. Fragmenting a UR into fountain
//! parts is the job of the caller's fountain encoder.

#![forbid(unsafe_code)]

mod account;
mod error;
mod hdkey;
mod keypath;
mod output;
mod psbt;

use ciborium::value::Value;

pub use account::CryptoAccount;
pub use error::UrError;
pub use hdkey::CryptoHdKey;
pub use keypath::{CryptoKeypath, PathComponent};
pub use output::{CryptoOutput, ScriptExpression};
pub use psbt::CryptoPsbt;

/// Registry type label carried in the `ur:<type>/...` prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UrType {
    /// `crypto-psbt`
    CryptoPsbt,
    /// `crypto-account`
    CryptoAccount,
}

impl UrType {
    /// Wire label for this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CryptoPsbt => "crypto-psbt",
            Self::CryptoAccount => "crypto-account",
        }
    }
}

impl std::fmt::Display for UrType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CBOR semantic tags from the UR registry.
pub mod tags {
    /// `crypto-hdkey`
    pub const CRYPTO_HDKEY: u64 = 303;
    /// `crypto-keypath`
    pub const CRYPTO_KEYPATH: u64 = 304;
    /// `crypto-output`
    pub const CRYPTO_OUTPUT: u64 = 308;
    /// `crypto-account`
    pub const CRYPTO_ACCOUNT: u64 = 311;
}

/// A registry item that can be written as a top-level UR payload.
pub trait UrPayload {
    /// Registry type label for the UR prefix.
    fn ur_type(&self) -> UrType;

    /// Untagged CBOR data item.
    ///
    /// # Errors
    /// Returns `UrError` if a field cannot be represented.
    fn to_value(&self) -> Result<Value, UrError>;

    /// Serialize the untagged data item to CBOR bytes.
    ///
    /// # Errors
    /// Returns `UrError::CborSerialize` if the writer fails.
    fn to_cbor(&self) -> Result<Vec<u8>, UrError> {
        write_value(&self.to_value()?)
    }
}

/// Serialize a CBOR `Value` to bytes.
///
/// # Errors
/// Returns `UrError::CborSerialize` if ciborium rejects the value.
pub fn write_value(value: &Value) -> Result<Vec<u8>, UrError> {
    let mut out = Vec::new();
    ciborium::ser::into_writer(value, &mut out)?;
    Ok(out)
}

pub(crate) fn uint(v: impl Into<ciborium::value::Integer>) -> Value {
    Value::Integer(v.into())
}

pub(crate) fn fingerprint_value(fingerprint: [u8; 4]) -> Value {
    uint(u32::from_be_bytes(fingerprint))
}

pub(crate) fn tagged(tag: u64, value: Value) -> Value {
    Value::Tag(tag, Box::new(value))
}
