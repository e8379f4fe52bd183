//! Single-part encoder for payloads that fit one QR (addresses, xpub strings).

use crate::error::EncodeResult;
use crate::part::{Fragment, PartEncoder};

/// Emits the same fragment on every pull.
///
/// By default it completes after the first pull. Encoders built with
/// [`SingleShotEncoder::complete`] report complete from the start.
#[derive(Debug, Clone)]
pub struct SingleShotEncoder {
    fragment: Fragment,
    complete: bool,
}

impl SingleShotEncoder {
    /// Wrap a fragment.
    #[must_use]
    pub const fn new(fragment: Fragment) -> Self {
        Self {
            fragment,
            complete: false,
        }
    }

    /// Wrap a fragment that counts as shown before any pull.
    #[must_use]
    pub const fn complete(fragment: Fragment) -> Self {
        Self {
            fragment,
            complete: true,
        }
    }

    /// Wrap a text payload.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Fragment::Text(text.into()))
    }
}

impl PartEncoder for SingleShotEncoder {
    fn sequence_length(&self) -> usize {
        1
    }

    fn next_fragment(&mut self) -> EncodeResult<Fragment> {
        self.complete = true;
        Ok(self.fragment.clone())
    }

    fn is_complete(&self) -> bool {
        self.complete
    }
}
