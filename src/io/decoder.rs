//! Text decoding with encoding fallback
//!
//! CNAB files come from different bank systems and are not consistently
//! encoded. The ingestor tries an ordered list of encodings and keeps the
//! first one that decodes the whole file without error.

use clap::ValueEnum;
use std::borrow::Cow;

/// Supported text encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum TextEncoding {
    /// ISO-8859-1; every byte maps to a character, so it never fails
    #[value(alias = "latin-1", alias = "iso-8859-1")]
    Latin1,
    /// UTF-8; fails on invalid byte sequences
    #[value(alias = "utf-8")]
    Utf8,
    /// Windows code page 1252
    #[value(alias = "windows-1252", alias = "cp1252")]
    Windows1252,
}

/// Default decoding order: single-byte Western first, then unicode, then
/// the Windows code page
pub const DEFAULT_ENCODINGS: [TextEncoding; 3] = [
    TextEncoding::Latin1,
    TextEncoding::Utf8,
    TextEncoding::Windows1252,
];

impl TextEncoding {
    /// Human-readable encoding name
    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Latin1 => "latin-1",
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Windows1252 => "windows-1252",
        }
    }

    /// Decode `bytes`, or `None` if they are not valid in this encoding
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
            TextEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            TextEncoding::Windows1252 => encoding_rs::WINDOWS_1252
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(Cow::into_owned),
        }
    }
}

/// Decode with the first encoding of `order` that accepts the bytes
///
/// # Returns
///
/// * `Some((encoding, text))` for the first successful encoding
/// * `None` if every encoding rejected the bytes (or `order` is empty)
pub fn decode_first(bytes: &[u8], order: &[TextEncoding]) -> Option<(TextEncoding, String)> {
    order.iter().find_map(|encoding| {
        let text = encoding.decode(bytes);
        if text.is_none() {
            tracing::debug!(encoding = encoding.label(), "decode attempt failed");
        }
        text.map(|text| (*encoding, text))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::ascii(TextEncoding::Latin1, b"1ABC", Some("1ABC"))]
    #[case::latin1_accent(TextEncoding::Latin1, b"JO\xC3O", Some("JOÃO"))]
    #[case::utf8_accent(TextEncoding::Utf8, "JOÃO".as_bytes(), Some("JOÃO"))]
    #[case::utf8_invalid(TextEncoding::Utf8, b"JO\xC3O", None)]
    #[case::cp1252_euro(TextEncoding::Windows1252, b"\x80 10", Some("€ 10"))]
    fn test_decode(
        #[case] encoding: TextEncoding,
        #[case] bytes: &[u8],
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(encoding.decode(bytes).as_deref(), expected);
    }

    #[test]
    fn test_default_order_prefers_latin1() {
        let (encoding, text) = decode_first("JOÃO".as_bytes(), &DEFAULT_ENCODINGS).unwrap();
        assert_eq!(encoding, TextEncoding::Latin1);
        assert_eq!(text.chars().count(), 5);
    }

    #[test]
    fn test_falls_back_to_next_encoding() {
        let order = [TextEncoding::Utf8, TextEncoding::Windows1252];
        let (encoding, text) = decode_first(b"JO\xC3O", &order).unwrap();
        assert_eq!(encoding, TextEncoding::Windows1252);
        assert_eq!(text, "JOÃO");
    }

    #[test]
    fn test_all_encodings_fail() {
        assert_eq!(decode_first(b"\xFF\xFE", &[TextEncoding::Utf8]), None);
        assert_eq!(decode_first(b"abc", &[]), None);
    }

    #[test]
    fn test_labels() {
        let labels: Vec<_> = DEFAULT_ENCODINGS.iter().map(|e| e.label()).collect();
        assert_eq!(labels, vec!["latin-1", "utf-8", "windows-1252"]);
    }
}
