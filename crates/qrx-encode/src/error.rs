//! Encoder error types.

use thiserror::Error;

use crate::request::PayloadKind;

/// Result type for encoder construction and fragment pulls.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Errors raised while building or driving a part encoder.
///
/// Every variant is final for the request that produced it; callers issue a
/// fresh, corrected request instead of retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The payload kind string is not one this crate can encode.
    #[error("unsupported payload kind: {0}")]
    UnsupportedKind(String),

    /// A seed-phrase kind was requested with an unknown wordlist language.
    #[error("no wordlist for language code {code:?}")]
    MissingWordlist {
        /// Requested language code.
        code: String,
    },

    /// A mnemonic word is not in the resolved wordlist.
    ///
    /// Only the word's position is reported so seed material stays out of logs.
    #[error("mnemonic word #{position} is not in the wordlist")]
    WordNotInWordlist {
        /// 1-based position of the offending word.
        position: usize,
    },

    /// A part cursor pointed past the part list.
    #[error("part index {index} out of range: sequence has {len} parts")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of parts.
        len: usize,
    },

    /// The request payload does not carry the data its kind needs.
    #[error("payload does not match kind {kind}")]
    PayloadMismatch {
        /// Requested kind.
        kind: PayloadKind,
    },

    /// Nothing to encode.
    #[error("cannot encode empty payload")]
    EmptyPayload,

    /// A derivation path could not be parsed.
    #[error("invalid derivation path {path:?}: {reason}")]
    InvalidDerivation {
        /// The path as given.
        path: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A fragment budget of zero was supplied.
    #[error("fragment budget must be at least one")]
    InvalidFragmentBudget,

    /// The fountain encoder rejected its input.
    #[error("fountain encoder error: {0}")]
    Fountain(String),

    /// Building the UR registry payload failed.
    #[error("ur payload error: {0}")]
    Ur(String),

    /// The renderer could not draw a fragment.
    #[error("render error: {0}")]
    Render(String),
}

impl From<qrx_ur::UrError> for EncodeError {
    fn from(e: qrx_ur::UrError) -> Self {
        Self::Ur(e.to_string())
    }
}
