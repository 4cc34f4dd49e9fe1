//! Kani proof harnesses for the escaping codec and base validation.
//!
//! # Usage
//!
//! Kani is not a Cargo dependency. Install and run with:
//!
//! ```bash
//! cargo install --locked kani-verifier
//! cargo kani setup
//! cargo kani --features kani
//! ```
//!
//! This module is only compiled when using Kani (`#[cfg(kani)]`).

use crate::base::{is_naan, shoulder_len};
use crate::escape;

/// Characters drawn for codec inputs: reserved, plus-free ordinary, space.
const CODEC_CHARS: &[u8] = b"%:\n\rab0 /#";

/// Generate a codec input character (never `+`)
fn arbitrary_codec_char() -> char {
    let idx: usize = kani::any();
    let idx = idx % CODEC_CHARS.len();
    CODEC_CHARS[idx] as char
}

/// Generate a short codec input (0-3 chars for tractability)
fn arbitrary_codec_input() -> String {
    let len: usize = kani::any();
    let len = len % 4;
    (0..len).map(|_| arbitrary_codec_char()).collect()
}

#[kani::proof]
#[kani::unwind(16)]
fn encode_leaves_no_reserved_char_but_escapes() {
    let input = arbitrary_codec_input();
    let encoded = escape::encode(&input);
    assert!(!encoded.contains([':', '\n', '\r']));
}

#[kani::proof]
#[kani::unwind(16)]
fn decode_inverts_encode_without_plus() {
    let input = arbitrary_codec_input();
    assert_eq!(escape::decode(&escape::encode(&input)), input);
}

#[kani::proof]
#[kani::unwind(8)]
fn shoulder_len_never_exceeds_input() {
    let bytes: [u8; 4] = kani::any();
    kani::assume(bytes.iter().all(u8::is_ascii));
    let s = std::str::from_utf8(&bytes).expect("ascii is utf-8");
    if let Some(n) = shoulder_len(s) {
        assert!(n >= 2 && n <= s.len());
        assert!(s.as_bytes()[n - 1].is_ascii_digit());
    }
}

#[kani::proof]
#[kani::unwind(8)]
fn naan_is_five_digits() {
    let bytes: [u8; 5] = kani::any();
    kani::assume(bytes.iter().all(u8::is_ascii));
    let s = std::str::from_utf8(&bytes).expect("ascii is utf-8");
    assert_eq!(is_naan(s), bytes.iter().all(u8::is_ascii_digit));
}
