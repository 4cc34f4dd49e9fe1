//! Percent-style escaping for ANVL delimiters.
//!
//! Only the characters ANVL itself reserves are escaped: `%`, `:`, line feed
//! and carriage return. Everything else passes through untouched, so this is
//! deliberately narrower than URL encoding.
//!
//! Decoding follows the registry convention of reading `+` as a space before
//! resolving `%XX` escapes. Encoding never produces `+`, which means a value
//! containing a literal `+` does not survive an encode/decode round trip.
//! Registry data depends on this convention, so it is kept as is.

use crate::constants::RESERVED_CHARS;

/// Returns true if `c` must be escaped inside an ANVL name or value.
#[must_use]
pub fn is_reserved(c: char) -> bool {
    RESERVED_CHARS.contains(&c)
}

/// Escapes the ANVL-reserved characters of `input` as `%XX`.
///
/// # Examples
///
/// ```
/// use ark_anvl::escape;
///
/// assert_eq!(escape::encode("a:b%c"), "a%3Ab%25c");
/// assert_eq!(escape::encode("line\nbreak"), "line%0Abreak");
/// assert_eq!(escape::encode("a b/c?"), "a b/c?");
/// ```
#[must_use]
pub fn encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if is_reserved(c) {
            out.push_str(&format!("%{:02X}", u32::from(c)));
        } else {
            out.push(c);
        }
    }
    out
}

/// Reverses [`encode`], also expanding `+` to a space.
///
/// A `%` that is not followed by two hex digits is kept literally. Escaped
/// bytes are reassembled as UTF-8; invalid sequences are replaced with
/// U+FFFD.
///
/// # Examples
///
/// ```
/// use ark_anvl::escape;
///
/// assert_eq!(escape::decode("a%3Ab%25c"), "a:b%c");
/// assert_eq!(escape::decode("The+Eskimo"), "The Eskimo");
/// assert_eq!(escape::decode("caf%C3%A9"), "café");
/// ```
#[must_use]
pub fn decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                let hi = bytes.get(i + 1).and_then(|b| hex_value(*b));
                let lo = bytes.get(i + 2).and_then(|b| hex_value(*b));
                if let (Some(hi), Some(lo)) = (hi, lo) {
                    out.push((hi << 4) | lo);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_value_reads_both_cases() {
        assert_eq!(hex_value(b'0'), Some(0));
        assert_eq!(hex_value(b'a'), Some(10));
        assert_eq!(hex_value(b'F'), Some(15));
        assert_eq!(hex_value(b'g'), None);
    }

    #[test]
    fn encode_reserved_chars() {
        assert_eq!(encode("%"), "%25");
        assert_eq!(encode(":"), "%3A");
        assert_eq!(encode("\n"), "%0A");
        assert_eq!(encode("\r"), "%0D");
    }

    #[test]
    fn encode_leaves_url_chars_alone() {
        let input = "a b&c=d?e#f/g+h";
        assert_eq!(encode(input), input);
    }

    #[test]
    fn encode_never_emits_plus() {
        assert_eq!(encode("a b"), "a b");
    }

    #[test]
    fn encode_passes_multibyte_through() {
        assert_eq!(encode("café: ok"), "café%3A ok");
    }

    #[test]
    fn decode_plus_is_space() {
        assert_eq!(decode("a+b"), "a b");
    }

    #[test]
    fn decode_escaped_plus_stays_plus() {
        assert_eq!(decode("a%2Bb"), "a+b");
    }

    #[test]
    fn decode_lowercase_hex() {
        assert_eq!(decode("a%3ab"), "a:b");
    }

    #[test]
    fn decode_malformed_escape_is_literal() {
        assert_eq!(decode("100%"), "100%");
        assert_eq!(decode("%G1"), "%G1");
        assert_eq!(decode("%4"), "%4");
    }

    #[test]
    fn decode_invalid_utf8_is_replaced() {
        assert_eq!(decode("%FF"), "\u{FFFD}");
    }

    #[test]
    fn round_trip_without_plus() {
        let input = "who: Quinn\r\n100% sure";
        assert_eq!(decode(&encode(input)), input);
    }

    #[test]
    fn round_trip_with_plus_is_lossy() {
        assert_eq!(decode(&encode("1+1")), "1 1");
    }
}
