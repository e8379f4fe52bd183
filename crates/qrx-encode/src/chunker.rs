//! Legacy `pXofY` multi-part text chunking wire format.
//!
//! ```text
//! n == 1:  <blob>
//! n  > 1:  p1of3 <blob[0..B]>
//!          p2of3 <blob[B..2B]>
//!          p3of3 <blob[2B..]>
//! ```
//!
//! Receivers look for the literal `p{i}of{n} ` prefix to detect and reorder
//! captures, so the header is reproduced byte for byte. A payload that fits
//! one part carries no header at all.

use crate::error::{EncodeError, EncodeResult};
use crate::part::{Fragment, PartEncoder};

/// Fixed-size text chunker with a cycling cursor.
#[derive(Debug, Clone)]
pub struct LegacyChunker {
    parts: Vec<String>,
    cursor: usize,
    complete: bool,
}

impl LegacyChunker {
    /// Split `blob` into parts of at most `budget` characters.
    ///
    /// Parts are built eagerly; the count never changes afterwards.
    ///
    /// # Errors
    /// Returns `EncodeError::EmptyPayload` for an empty blob and
    /// `EncodeError::InvalidFragmentBudget` for a zero budget.
    pub fn new(blob: &str, budget: usize) -> EncodeResult<Self> {
        if budget == 0 {
            return Err(EncodeError::InvalidFragmentBudget);
        }
        if blob.is_empty() {
            return Err(EncodeError::EmptyPayload);
        }

        let chars: Vec<char> = blob.chars().collect();
        let count = chars.len().div_ceil(budget);

        let parts = if count == 1 {
            vec![blob.to_string()]
        } else {
            chars
                .chunks(budget)
                .enumerate()
                .map(|(i, chunk)| {
                    let body: String = chunk.iter().collect();
                    format!("p{}of{count} {body}", i + 1)
                })
                .collect()
        };

        tracing::debug!(parts = parts.len(), budget, "legacy chunker built");

        Ok(Self {
            parts,
            cursor: 0,
            complete: false,
        })
    }

    /// Precomputed parts in emission order.
    #[must_use]
    pub fn parts(&self) -> &[String] {
        &self.parts
    }
}

impl PartEncoder for LegacyChunker {
    fn sequence_length(&self) -> usize {
        self.parts.len()
    }

    fn next_fragment(&mut self) -> EncodeResult<Fragment> {
        let len = self.parts.len();
        let part = self
            .parts
            .get(self.cursor)
            .cloned()
            .ok_or(EncodeError::IndexOutOfRange {
                index: self.cursor,
                len,
            })?;

        if self.cursor == len - 1 {
            self.complete = true;
        }
        tracing::trace!(index = self.cursor, len, "legacy part");
        self.cursor = (self.cursor + 1) % len;

        Ok(Fragment::Text(part))
    }

    fn is_complete(&self) -> bool {
        self.complete
    }
}

/// Strip a `p{i}of{n} ` header, returning `(i, n, body)`.
///
/// Headerless input (a single-part payload) is returned as `(1, 1, input)`.
#[must_use]
pub fn split_header(part: &str) -> (usize, usize, &str) {
    let parsed = part.strip_prefix('p').and_then(|rest| {
        let (header, body) = rest.split_once(' ')?;
        let (i, n) = header.split_once("of")?;
        Some((i.parse().ok()?, n.parse().ok()?, body))
    });
    parsed.unwrap_or((1, 1, part))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(chunker: &mut LegacyChunker) -> Vec<String> {
        (0..chunker.sequence_length())
            .map(|_| chunker.next_fragment().unwrap().as_text().unwrap().to_string())
            .collect()
    }

    #[test]
    fn single_part_has_no_header() {
        let mut c = LegacyChunker::new("cHNidP8BAHECAAAAAQ==", 65).unwrap();
        assert_eq!(c.sequence_length(), 1);
        assert_eq!(drain(&mut c), vec!["cHNidP8BAHECAAAAAQ=="]);
        assert!(c.is_complete());
    }

    #[test]
    fn exact_multiple_of_budget_is_single_part() {
        let blob = "a".repeat(40);
        let c = LegacyChunker::new(&blob, 40).unwrap();
        assert_eq!(c.parts(), &[blob]);
    }

    #[test]
    fn headers_and_clipped_last_slice() {
        let mut c = LegacyChunker::new("abcdefghij", 4).unwrap();
        assert_eq!(
            drain(&mut c),
            vec!["p1of3 abcd", "p2of3 efgh", "p3of3 ij"]
        );
    }

    #[test]
    fn completes_exactly_on_last_part_and_wraps() {
        let mut c = LegacyChunker::new("abcdefghij", 4).unwrap();
        let first = c.next_fragment().unwrap();
        assert!(!c.is_complete());
        c.next_fragment().unwrap();
        assert!(!c.is_complete());
        c.next_fragment().unwrap();
        assert!(c.is_complete());

        // (n+1)-th pull wraps to the first part
        assert_eq!(c.next_fragment().unwrap(), first);
        assert!(c.is_complete());
    }

    #[test]
    fn double_digit_part_counts() {
        let blob = "x".repeat(12 * 40 + 1);
        let mut c = LegacyChunker::new(&blob, 40).unwrap();
        assert_eq!(c.sequence_length(), 13);
        let parts = drain(&mut c);
        assert!(parts[0].starts_with("p1of13 "));
        assert!(parts[12].starts_with("p13of13 "));
        assert_eq!(split_header(&parts[12]).2, "x");
    }

    #[test]
    fn empty_and_zero_budget_rejected() {
        assert_eq!(
            LegacyChunker::new("", 40).unwrap_err(),
            EncodeError::EmptyPayload
        );
        assert_eq!(
            LegacyChunker::new("abc", 0).unwrap_err(),
            EncodeError::InvalidFragmentBudget
        );
    }

    #[test]
    fn split_header_parses_and_passes_through() {
        assert_eq!(split_header("p2of5 body"), (2, 5, "body"));
        assert_eq!(split_header("plain"), (1, 1, "plain"));
        assert_eq!(split_header("pxofy body"), (1, 1, "pxofy body"));
    }
}
