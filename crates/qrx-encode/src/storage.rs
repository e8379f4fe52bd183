//! In-memory seed bookkeeping for the device session.
//!
//! Holds finalized seeds, at most one pending seed awaiting confirmation, and
//! a pending mnemonic being entered word by word. Nothing is persisted.

use zeroize::Zeroizing;

use crate::seed::{Seed, SeedError};
use crate::settings::DEFAULT_WORDLIST_LANGUAGE;

/// Default length for a fresh pending mnemonic.
pub const DEFAULT_MNEMONIC_LEN: usize = 12;

/// Session seed store.
#[derive(Default)]
pub struct SeedStorage {
    seeds: Vec<Seed>,
    pending_seed: Option<Seed>,
    pending_mnemonic: Zeroizing<Vec<Option<String>>>,
}

impl SeedStorage {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finalized seeds, oldest first.
    #[must_use]
    pub fn seeds(&self) -> &[Seed] {
        &self.seeds
    }

    /// Number of finalized seeds.
    #[must_use]
    pub fn num_seeds(&self) -> usize {
        self.seeds.len()
    }

    /// Replace the pending seed.
    pub fn set_pending_seed(&mut self, seed: Seed) {
        self.pending_seed = Some(seed);
    }

    /// The pending seed, if any.
    #[must_use]
    pub const fn pending_seed(&self) -> Option<&Seed> {
        self.pending_seed.as_ref()
    }

    /// Drop the pending seed.
    pub fn clear_pending_seed(&mut self) {
        self.pending_seed = None;
    }

    /// Move the pending seed into the finalized list and return its index.
    /// A seed already stored is not added twice; its existing index is
    /// returned.
    ///
    /// # Errors
    /// Returns `SeedError::NoPendingSeed` if nothing is pending.
    pub fn finalize_pending_seed(&mut self) -> Result<usize, SeedError> {
        let seed = self.pending_seed.take().ok_or(SeedError::NoPendingSeed)?;
        let index = match self.seeds.iter().position(|s| *s == seed) {
            Some(index) => index,
            None => {
                self.seeds.push(seed);
                self.seeds.len() - 1
            }
        };
        tracing::debug!(index, num_seeds = self.seeds.len(), "pending seed finalized");
        Ok(index)
    }

    /// Whether `words` form a valid mnemonic in `language_code`.
    #[must_use]
    pub fn validate_mnemonic(words: &[String], language_code: &str) -> bool {
        Seed::new(words.to_vec(), "", language_code).is_ok()
    }

    /// Start entering a mnemonic of `num_words` empty slots.
    pub fn init_pending_mnemonic(&mut self, num_words: usize) {
        self.pending_mnemonic = Zeroizing::new(vec![None; num_words]);
    }

    /// Fill slot `index` with `word`.
    ///
    /// # Errors
    /// Returns `SeedError::IndexOutOfRange` past the end of the mnemonic.
    pub fn update_pending_mnemonic(&mut self, word: &str, index: usize) -> Result<(), SeedError> {
        let len = self.pending_mnemonic.len();
        let slot = self
            .pending_mnemonic
            .get_mut(index)
            .ok_or(SeedError::IndexOutOfRange { index, len })?;
        *slot = Some(word.to_string());
        Ok(())
    }

    /// Word in slot `index`, if filled.
    #[must_use]
    pub fn pending_mnemonic_word(&self, index: usize) -> Option<&str> {
        self.pending_mnemonic.get(index)?.as_deref()
    }

    /// Number of slots in the pending mnemonic.
    #[must_use]
    pub fn pending_mnemonic_len(&self) -> usize {
        self.pending_mnemonic.len()
    }

    /// Copy of the pending mnemonic's filled words, in order.
    #[must_use]
    pub fn pending_mnemonic(&self) -> Zeroizing<Vec<String>> {
        Zeroizing::new(self.pending_mnemonic.iter().flatten().cloned().collect())
    }

    /// Forget the pending mnemonic.
    pub fn discard_pending_mnemonic(&mut self) {
        self.pending_mnemonic = Zeroizing::new(Vec::new());
    }

    /// Validate the pending mnemonic, make it the pending seed (no
    /// passphrase), and discard the mnemonic.
    ///
    /// # Errors
    /// Returns `SeedError::InvalidMnemonic` if a slot is empty or the words
    /// fail validation; the pending mnemonic is kept in that case.
    pub fn convert_pending_mnemonic_to_pending_seed(
        &mut self,
        language_code: &str,
    ) -> Result<(), SeedError> {
        if let Some(empty) = self.pending_mnemonic.iter().position(Option::is_none) {
            return Err(SeedError::InvalidMnemonic(format!(
                "word {} not entered",
                empty + 1
            )));
        }
        let words = self.pending_mnemonic().to_vec();
        let seed = Seed::new(words, "", language_code)?;
        self.pending_seed = Some(seed);
        self.discard_pending_mnemonic();
        Ok(())
    }

    /// [`convert_pending_mnemonic_to_pending_seed`](Self::convert_pending_mnemonic_to_pending_seed)
    /// with the English wordlist.
    ///
    /// # Errors
    /// Same as the language-aware variant.
    pub fn convert_pending_mnemonic(&mut self) -> Result<(), SeedError> {
        self.convert_pending_mnemonic_to_pending_seed(DEFAULT_WORDLIST_LANGUAGE)
    }
}

impl std::fmt::Debug for SeedStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedStorage")
            .field("num_seeds", &self.seeds.len())
            .field("has_pending_seed", &self.pending_seed.is_some())
            .field("pending_mnemonic_len", &self.pending_mnemonic.len())
            .finish()
    }
}
