//! Derivation Path Fuzz Target
//!
//! Fuzzes BIP32 path parsing and everything downstream of it:
//! - Step parsing (hardened markers, overflow, empty steps)
//! - Script-type inference
//! - `crypto-keypath` construction
//!
//! Goal: Ensure no panics on arbitrary input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use qrx_encode::DerivationKeypath;

fuzz_target!(|data: &[u8]| {
    let Ok(path) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(keypath) = DerivationKeypath::parse(path, [0x73, 0xc5, 0xda, 0x0a]) {
        // Display must re-parse to the same components
        let reparsed = DerivationKeypath::parse(&keypath.to_string(), keypath.root_fingerprint())
            .expect("display output must parse");
        assert_eq!(reparsed, keypath);

        let _ = keypath.descriptor_script_types();
        let _ = keypath.to_crypto_keypath();
    }
});
