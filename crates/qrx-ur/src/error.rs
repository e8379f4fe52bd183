//! UR registry error types.

use thiserror::Error;

/// Errors building or serializing registry items.
#[derive(Debug, Error)]
pub enum UrError {
    /// A fixed-length field had the wrong size.
    #[error("invalid {field} length: expected {expected}, got {got}")]
    InvalidLength {
        /// Field name.
        field: &'static str,
        /// Required length in bytes.
        expected: usize,
        /// Supplied length in bytes.
        got: usize,
    },

    /// A keypath is too deep to carry a `u8` depth.
    #[error("keypath depth {0} exceeds 255")]
    DepthOverflow(usize),

    /// An account must carry at least one output descriptor.
    #[error("account has no output descriptors")]
    NoOutputs,

    /// CBOR serialization failed.
    #[error("cbor serialization error: {0}")]
    CborSerialize(#[from] ciborium::ser::Error<std::io::Error>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = UrError::InvalidLength {
            field: "chain code",
            expected: 32,
            got: 31,
        };
        assert_eq!(
            err.to_string(),
            "invalid chain code length: expected 32, got 31"
        );
        assert_eq!(
            UrError::DepthOverflow(300).to_string(),
            "keypath depth 300 exceeds 255"
        );
        assert_eq!(
            UrError::NoOutputs.to_string(),
            "account has no output descriptors"
        );
    }
}
