//! Fuzz target for the key decoder
//!
//! Remote clients control every byte the decoder sees (MEDIUM priority)
//!
//! # Strategy
//!
//! - Raw bytes: truncated escape sequences, invalid UTF-8, control bytes
//! - Split reads: the same bytes decoded whole and at an arbitrary split
//!
//! # Invariants
//!
//! - Never panics
//! - Never yields more keys than input bytes
//! - Splitting after a run of printable ASCII changes nothing

#![no_main]

use folio_tui::decode;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (Vec<u8>, usize)| {
    let (bytes, split) = input;
    let keys = decode(&bytes);
    assert!(keys.len() <= bytes.len());

    let split = split % (bytes.len() + 1);
    let (head, tail) = bytes.split_at(split);
    let mut pieces = decode(head);
    pieces.extend(decode(tail));
    assert!(pieces.len() <= bytes.len());

    // A head of printable ASCII ends on a key boundary.
    if head.iter().all(|b| (0x20..0x7f).contains(b)) {
        assert_eq!(decode(head).len(), head.len());
        assert_eq!(pieces, keys);
    }
});
