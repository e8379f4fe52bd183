//! SeedQR (numeric) and CompactSeedQR (bit-packed) encoders.
//!
//! ```text
//! numeric:  "abandon" "about" ...  ->  "0000" "0003" ...       (4 digits/word)
//! compact:  11-bit indices, checksum bits dropped, packed MSB first
//!           12 words: 132 - 4 = 128 bits -> 16 bytes
//!           24 words: 264 - 8 = 256 bits -> 32 bytes
//! ```
//!
//! Both are a single part that never cycles, and both count as complete from
//! the start. Unknown words are rejected at construction.

use zeroize::Zeroizing;

use crate::error::{EncodeError, EncodeResult};
use crate::part::{Fragment, PartEncoder};
use crate::seed::Wordlist;

/// Bits per wordlist index.
pub const BITS_PER_WORD: usize = 11;

/// Trailing checksum bits dropped from a compact SeedQR.
#[must_use]
pub const fn checksum_bits(word_count: usize) -> usize {
    match word_count {
        24 => 8,
        12 => 4,
        _ => 0,
    }
}

/// Number of bytes a compact SeedQR of `word_count` words occupies.
#[must_use]
pub const fn compact_len(word_count: usize) -> usize {
    (word_count * BITS_PER_WORD - checksum_bits(word_count)).div_ceil(8)
}

fn indices<S: AsRef<str>>(words: &[S], wordlist: &Wordlist) -> EncodeResult<Zeroizing<Vec<u16>>> {
    if words.is_empty() {
        return Err(EncodeError::EmptyPayload);
    }
    let mut out = Zeroizing::new(Vec::with_capacity(words.len()));
    for (i, word) in words.iter().enumerate() {
        let index = wordlist
            .index_of(word.as_ref())
            .ok_or(EncodeError::WordNotInWordlist { position: i + 1 })?;
        out.push(index);
    }
    Ok(out)
}

/// Concatenated zero-padded 4-digit word indices.
pub struct SeedNumericEncoder {
    digits: Zeroizing<String>,
}

impl SeedNumericEncoder {
    /// Look every word up in `wordlist`.
    ///
    /// # Errors
    /// Returns `EncodeError::EmptyPayload` for no words and
    /// `EncodeError::WordNotInWordlist` for the first unknown word.
    pub fn new<S: AsRef<str>>(words: &[S], wordlist: &Wordlist) -> EncodeResult<Self> {
        let indices = indices(words, wordlist)?;
        let mut digits = Zeroizing::new(String::with_capacity(indices.len() * 4));
        for index in indices.iter() {
            digits.push_str(&format!("{index:04}"));
        }
        tracing::debug!(words = words.len(), "numeric seedqr built");
        Ok(Self { digits })
    }
}

impl std::fmt::Debug for SeedNumericEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedNumericEncoder")
            .field("digits", &self.digits.len())
            .finish()
    }
}

impl PartEncoder for SeedNumericEncoder {
    fn sequence_length(&self) -> usize {
        1
    }

    fn next_fragment(&mut self) -> EncodeResult<Fragment> {
        Ok(Fragment::Text(self.digits.to_string()))
    }

    fn is_complete(&self) -> bool {
        true
    }
}

/// Bit-packed word indices with checksum bits stripped.
pub struct SeedCompactEncoder {
    bytes: Zeroizing<Vec<u8>>,
}

impl SeedCompactEncoder {
    /// Look every word up in `wordlist` and pack the indices.
    ///
    /// A final partial byte holds its bits in the low positions.
    ///
    /// # Errors
    /// Returns `EncodeError::EmptyPayload` for no words and
    /// `EncodeError::WordNotInWordlist` for the first unknown word.
    pub fn new<S: AsRef<str>>(words: &[S], wordlist: &Wordlist) -> EncodeResult<Self> {
        let indices = indices(words, wordlist)?;

        let mut bits: Zeroizing<Vec<u8>> =
            Zeroizing::new(Vec::with_capacity(indices.len() * BITS_PER_WORD));
        for index in indices.iter() {
            for shift in (0..BITS_PER_WORD).rev() {
                bits.push(u8::from((index >> shift) & 1 == 1));
            }
        }
        let keep = bits.len() - checksum_bits(words.len());
        bits.truncate(keep);

        let bytes = Zeroizing::new(
            bits.chunks(8)
                .map(|chunk| chunk.iter().fold(0u8, |acc, bit| (acc << 1) | bit))
                .collect::<Vec<u8>>(),
        );

        tracing::debug!(words = words.len(), bytes = bytes.len(), "compact seedqr built");
        Ok(Self { bytes })
    }

    /// Packed bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for SeedCompactEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedCompactEncoder")
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl PartEncoder for SeedCompactEncoder {
    fn sequence_length(&self) -> usize {
        1
    }

    fn next_fragment(&mut self) -> EncodeResult<Fragment> {
        Ok(Fragment::Bytes(self.bytes.to_vec()))
    }

    fn is_complete(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use bip39::Language;

    use super::*;

    fn english() -> Wordlist {
        Wordlist::bip39(Language::English)
    }

    fn words(phrase: &str) -> Vec<&str> {
        phrase.split_whitespace().collect()
    }

    #[test]
    fn numeric_digits() {
        let phrase = words(
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
        );
        let mut enc = SeedNumericEncoder::new(&phrase, &english()).unwrap();
        let frag = enc.next_fragment().unwrap();
        assert_eq!(frag.as_text(), Some("000000000000000000000000000000000000000000000003"));
        assert_eq!(enc.sequence_length(), 1);
        assert!(enc.is_complete());
    }

    #[test]
    fn numeric_pads_each_index() {
        let mut enc = SeedNumericEncoder::new(&["zoo", "able"], &english()).unwrap();
        let frag = enc.next_fragment().unwrap();
        assert_eq!(frag.as_text(), Some("20470002"));
    }

    #[test]
    fn unknown_word_reports_position() {
        let err = SeedNumericEncoder::new(&["abandon", "bitcoin"], &english()).unwrap_err();
        assert_eq!(err, EncodeError::WordNotInWordlist { position: 2 });

        let err = SeedCompactEncoder::new(&["nakamoto"], &english()).unwrap_err();
        assert_eq!(err, EncodeError::WordNotInWordlist { position: 1 });
    }

    #[test]
    fn empty_phrase_rejected() {
        let empty: [&str; 0] = [];
        assert_eq!(
            SeedNumericEncoder::new(&empty, &english()).unwrap_err(),
            EncodeError::EmptyPayload
        );
    }

    #[test]
    fn compact_twelve_words_is_entropy() {
        let phrase = words(
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
        );
        let mut enc = SeedCompactEncoder::new(&phrase, &english()).unwrap();
        // "about" = 3 -> last word bits 00000000011, checksum nibble 0011 dropped
        assert_eq!(enc.next_fragment().unwrap(), Fragment::Bytes(vec![0u8; 16]));
        assert!(enc.is_complete());
    }

    #[test]
    fn compact_twenty_four_words_is_entropy() {
        let mut phrase = vec!["zoo"; 23];
        phrase.push("vote");
        let enc = SeedCompactEncoder::new(&phrase, &english()).unwrap();
        assert_eq!(enc.as_bytes(), &[0xffu8; 32]);
    }

    #[test]
    fn compact_partial_byte_is_right_aligned() {
        // 3 words, no checksum strip: 33 bits -> 5 bytes, last byte holds 1 bit
        let enc = SeedCompactEncoder::new(&["zoo", "zoo", "zoo"], &english()).unwrap();
        assert_eq!(enc.as_bytes(), &[0xff, 0xff, 0xff, 0xff, 0x01]);
    }

    #[test]
    fn compact_lengths() {
        assert_eq!(compact_len(12), 16);
        assert_eq!(compact_len(24), 32);
        assert_eq!(compact_len(15), 21);
        assert_eq!(checksum_bits(18), 0);
    }

    #[test]
    fn debug_hides_seed() {
        let enc = SeedNumericEncoder::new(&["zoo"], &english()).unwrap();
        assert!(!format!("{enc:?}").contains("2047"));
    }
}
