//! Seed Phrase Fuzz Target
//!
//! Feeds arbitrary word lists to both SeedQR encoders.

#![no_main]

use bip39::Language;
use libfuzzer_sys::fuzz_target;
use qrx_encode::{SeedCompactEncoder, SeedNumericEncoder, Wordlist};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let words: Vec<&str> = text.split_whitespace().collect();
    let wordlist = Wordlist::bip39(Language::English);

    let numeric = SeedNumericEncoder::new(&words, &wordlist);
    let compact = SeedCompactEncoder::new(&words, &wordlist);
    assert_eq!(numeric.is_ok(), compact.is_ok());
});
