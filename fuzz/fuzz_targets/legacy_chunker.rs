//! Legacy Chunker Fuzz Target
//!
//! Splits arbitrary text at arbitrary budgets and checks that the part
//! bodies reassemble to the input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use qrx_encode::{split_header, LegacyChunker, PartEncoder};

fuzz_target!(|data: &[u8]| {
    let Some((&budget, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };

    let Ok(mut chunker) = LegacyChunker::new(text, usize::from(budget)) else {
        return;
    };

    let n = chunker.sequence_length();
    let mut rebuilt = String::new();
    for i in 0..n {
        let part = chunker.next_fragment().expect("chunker never fails after construction");
        let text = part.as_text().expect("legacy parts are text");
        if n == 1 {
            // Single parts carry no header, so the text is the body.
            rebuilt.push_str(text);
        } else {
            let (index, count, body) = split_header(text);
            assert_eq!((index, count), (i + 1, n));
            rebuilt.push_str(body);
        }
    }
    assert!(chunker.is_complete());
    assert_eq!(rebuilt, text);
});
