//! Fragments and the pull contract shared by every encoder.

use std::fmt;

use crate::error::EncodeResult;

/// One renderable QR payload.
#[derive(Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Alphanumeric or numeric text.
    Text(String),
    /// Raw bytes for byte-mode QR.
    Bytes(Vec<u8>),
}

impl Fragment {
    /// Text content, if this is a text fragment.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Bytes(_) => None,
        }
    }

    /// Raw bytes of the fragment (UTF-8 for text).
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(s) => s.as_bytes(),
            Self::Bytes(b) => b,
        }
    }

    /// Payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Whether the fragment carries no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Seed fragments are secret; only shape is printed.
impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.debug_struct("Text").field("len", &s.len()).finish(),
            Self::Bytes(b) => f.debug_struct("Bytes").field("len", &b.len()).finish(),
        }
    }
}

/// Pull-based fragment source.
///
/// Chunked and fountain encoders never end: after the last part they start
/// over (or keep emitting redundancy), since the camera may miss frames.
/// `is_complete` reports that every part has been shown at least once.
///
/// Implementations hold per-instance cursor state and are not meant to be
/// shared between threads without external locking.
pub trait PartEncoder: Send {
    /// Number of parts in one full traversal.
    fn sequence_length(&self) -> usize;

    /// Return the next fragment and advance the cursor.
    ///
    /// # Errors
    /// Returns an error only if the encoder's internal state is corrupt or the
    /// wrapped fountain encoder fails.
    fn next_fragment(&mut self) -> EncodeResult<Fragment>;

    /// Whether every part has been emitted at least once.
    fn is_complete(&self) -> bool;
}

impl<E: PartEncoder + ?Sized> PartEncoder for Box<E> {
    fn sequence_length(&self) -> usize {
        (**self).sequence_length()
    }

    fn next_fragment(&mut self) -> EncodeResult<Fragment> {
        (**self).next_fragment()
    }

    fn is_complete(&self) -> bool {
        (**self).is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_accessors() {
        let f = Fragment::Text("p1of2 abc".into());
        assert_eq!(f.as_text(), Some("p1of2 abc"));
        assert_eq!(f.as_bytes(), b"p1of2 abc");
        assert_eq!(f.len(), 9);
        assert!(!f.is_empty());
    }

    #[test]
    fn bytes_accessors() {
        let f = Fragment::Bytes(vec![1, 2, 3]);
        assert_eq!(f.as_text(), None);
        assert_eq!(f.as_bytes(), &[1, 2, 3]);
        assert!(Fragment::Bytes(vec![]).is_empty());
    }

    #[test]
    fn debug_hides_content() {
        let f = Fragment::Text("000100020003".into());
        let dbg = format!("{f:?}");
        assert!(!dbg.contains("0001"));
        assert!(dbg.contains("len"));
    }
}
