//! BIP39 wordlists and validated seeds.
//!
//! Seed material (words, passphrase, entropy) lives in `Zeroizing` buffers and
//! is wiped on drop. `Debug` output shows only the word count.

use std::collections::HashMap;
use std::fmt;

use bip39::{Language, Mnemonic};
use thiserror::Error;
use zeroize::Zeroizing;

/// Words in a BIP39 wordlist.
pub const WORDLIST_LEN: usize = 2048;

/// Errors from seed parsing and pending-seed bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    /// Language code not supported by the wordlist source.
    #[error("unknown wordlist language code {code:?}")]
    UnknownLanguage {
        /// Requested code.
        code: String,
    },

    /// Words do not form a valid BIP39 mnemonic (unknown word, bad length,
    /// or checksum mismatch).
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// A wordlist did not have exactly 2048 entries.
    #[error("wordlist has {0} words, expected 2048")]
    WordlistLength(usize),

    /// Pending mnemonic slot out of range.
    #[error("word index {index} out of range for a {len}-word mnemonic")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Pending mnemonic length.
        len: usize,
    },

    /// No pending seed to finalize.
    #[error("no pending seed")]
    NoPendingSeed,
}

/// Map a wordlist language code to a `bip39` language.
#[must_use]
pub fn language_from_code(code: &str) -> Option<Language> {
    let language = match code {
        "en" => Language::English,
        "es" => Language::Spanish,
        "fr" => Language::French,
        "it" => Language::Italian,
        "ja" => Language::Japanese,
        "ko" => Language::Korean,
        "pt" => Language::Portuguese,
        "cs" => Language::Czech,
        "zh-hans" => Language::SimplifiedChinese,
        "zh-hant" => Language::TraditionalChinese,
        _ => return None,
    };
    Some(language)
}

/// Ordered 2048-word list with reverse lookup.
#[derive(Clone, PartialEq, Eq)]
pub struct Wordlist {
    words: Vec<String>,
    index: HashMap<String, u16>,
}

impl Wordlist {
    /// Build from an ordered list of exactly 2048 words.
    ///
    /// # Errors
    /// Returns `SeedError::WordlistLength` for any other length.
    pub fn new(words: Vec<String>) -> Result<Self, SeedError> {
        if words.len() != WORDLIST_LEN {
            return Err(SeedError::WordlistLength(words.len()));
        }
        Ok(Self::from_words(words))
    }

    /// The `bip39` crate's list for `language`.
    #[must_use]
    pub fn bip39(language: Language) -> Self {
        Self::from_words(
            language
                .word_list()
                .iter()
                .map(|w| (*w).to_string())
                .collect(),
        )
    }

    fn from_words(words: Vec<String>) -> Self {
        let index = words
            .iter()
            .zip(0u16..)
            .map(|(w, i)| (w.clone(), i))
            .collect();
        Self { words, index }
    }

    /// Position of `word`, if present.
    #[must_use]
    pub fn index_of(&self, word: &str) -> Option<u16> {
        self.index.get(word).copied()
    }

    /// Word at `index`.
    #[must_use]
    pub fn word(&self, index: u16) -> Option<&str> {
        self.words.get(usize::from(index)).map(String::as_str)
    }

    /// Always 2048.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl fmt::Debug for Wordlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wordlist")
            .field("first", &self.words.first())
            .field("len", &self.words.len())
            .finish()
    }
}

/// Resolves a wordlist by language code.
pub trait WordlistSource {
    /// `None` when the code is unknown.
    fn get_wordlist(&self, code: &str) -> Option<Wordlist>;
}

/// Wordlists shipped with the `bip39` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bip39Wordlists;

impl WordlistSource for Bip39Wordlists {
    fn get_wordlist(&self, code: &str) -> Option<Wordlist> {
        language_from_code(code).map(Wordlist::bip39)
    }
}

/// A checksum-validated mnemonic with its passphrase.
#[derive(Clone)]
pub struct Seed {
    words: Zeroizing<Vec<String>>,
    passphrase: Zeroizing<String>,
    language: Language,
    entropy: Zeroizing<Vec<u8>>,
}

impl Seed {
    /// Validate `words` against the wordlist for `language_code`.
    ///
    /// # Errors
    /// Returns `SeedError::UnknownLanguage` for an unsupported code and
    /// `SeedError::InvalidMnemonic` if the words fail BIP39 validation.
    pub fn new(
        words: Vec<String>,
        passphrase: impl Into<String>,
        language_code: &str,
    ) -> Result<Self, SeedError> {
        let language = language_from_code(language_code).ok_or_else(|| {
            SeedError::UnknownLanguage {
                code: language_code.to_string(),
            }
        })?;
        let words = Zeroizing::new(words);
        let mnemonic = parse_mnemonic(language, &words)?;
        let entropy = Zeroizing::new(mnemonic.to_entropy());

        Ok(Self {
            words,
            passphrase: Zeroizing::new(passphrase.into()),
            language,
            entropy,
        })
    }

    /// Parse a whitespace-separated phrase.
    ///
    /// # Errors
    /// Same as [`Seed::new`].
    pub fn from_phrase(
        phrase: &str,
        passphrase: impl Into<String>,
        language_code: &str,
    ) -> Result<Self, SeedError> {
        let words = phrase.split_whitespace().map(str::to_string).collect();
        Self::new(words, passphrase, language_code)
    }

    /// Mnemonic words.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of words.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// BIP39 passphrase.
    #[must_use]
    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    /// Wordlist language.
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Raw entropy bytes.
    #[must_use]
    pub fn entropy(&self) -> &[u8] {
        &self.entropy
    }

    /// 64-byte BIP39 seed (PBKDF2 over mnemonic and passphrase).
    ///
    /// # Errors
    /// Returns `SeedError::InvalidMnemonic` only if the stored words stopped
    /// parsing, which construction rules out.
    pub fn seed_bytes(&self) -> Result<Zeroizing<[u8; 64]>, SeedError> {
        let mnemonic = parse_mnemonic(self.language, &self.words)?;
        Ok(Zeroizing::new(mnemonic.to_seed_normalized(&self.passphrase)))
    }
}

impl PartialEq for Seed {
    fn eq(&self, other: &Self) -> bool {
        self.language == other.language
            && *self.words == *other.words
            && *self.passphrase == *other.passphrase
    }
}

impl Eq for Seed {}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seed")
            .field("word_count", &self.words.len())
            .field("language", &self.language)
            .field("has_passphrase", &!self.passphrase.is_empty())
            .finish_non_exhaustive()
    }
}

fn parse_mnemonic(language: Language, words: &[String]) -> Result<Mnemonic, SeedError> {
    let phrase = Zeroizing::new(words.join(" "));
    Mnemonic::parse_in_normalized(language, &phrase)
        .map_err(|e| SeedError::InvalidMnemonic(e.to_string()))
}
