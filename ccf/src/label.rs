//! Label text encoding.
//!
//! Each character of a label picks its own charset, so a single label may mix ASCII, EUC-CN and
//! EUC-JP bytes. Decoding doesn't know which double-byte charset was used and reads every
//! non-ASCII byte pair as GB18030, which covers the EUC-CN range and the kana rows shared with
//! EUC-JP.

use encoding_rs::{Encoding, EUC_JP, GB18030, GBK};
use snafu::Snafu;
use std::borrow::Cow;

#[derive(Debug, Snafu)]
#[snafu(display(
    "character {character:?} (U+{:04X}) at index {index} has no ASCII, EUC-CN or EUC-JP encoding",
    u32::from(*character)
))]
pub struct UnsupportedCharacterError {
    pub character: char,
    /// Position of the character within the label, counted in `char`s.
    pub index: usize,
}

/// The charset a single label character is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelCharset {
    /// One byte, code point below 128.
    Ascii,
    /// CJK unified ideographs, written as EUC-CN (GB2312).
    Chinese,
    /// Hiragana, katakana and remaining CJK characters, written as EUC-JP.
    Japanese,
    Unsupported,
}

impl LabelCharset {
    /// Classifies a character by its Unicode name.
    pub fn classify(c: char) -> Self {
        if c.is_ascii() {
            return Self::Ascii;
        }

        let Some(name) = unicode_names2::name(c) else {
            return Self::Unsupported;
        };
        let name = name.to_string();

        if name.contains("CJK UNIFIED IDEOGRAPH") {
            Self::Chinese
        } else if name.contains("HIRAGANA") || name.contains("KATAKANA") || name.contains("CJK") {
            Self::Japanese
        } else {
            Self::Unsupported
        }
    }

    /// Appends the encoding of `c` in this charset to `out`.
    ///
    /// Returns `false` without touching `out` if the charset can't represent `c`.
    pub fn encode_char(self, c: char, out: &mut Vec<u8>) -> bool {
        match self {
            Self::Ascii if c.is_ascii() => {
                out.push(c as u8);
                true
            }
            Self::Chinese => encode_with(GBK, c, out, is_euc_cn),
            Self::Japanese => encode_with(EUC_JP, c, out, |_| true),
            Self::Ascii | Self::Unsupported => false,
        }
    }
}

/// EUC-CN is the GB2312 subset of GBK where both bytes lie in `0xA1..=0xFE`.
fn is_euc_cn(bytes: &[u8]) -> bool {
    matches!(bytes, [0xA1..=0xFE, 0xA1..=0xFE])
}

fn encode_with(
    encoding: &'static Encoding,
    c: char,
    out: &mut Vec<u8>,
    accept: impl Fn(&[u8]) -> bool,
) -> bool {
    let mut buf = [0; 4];
    let (bytes, _, had_errors) = encoding.encode(c.encode_utf8(&mut buf));
    if had_errors || !accept(&*bytes) {
        return false;
    }

    out.extend_from_slice(&bytes);
    true
}

/// Encodes a label, one character at a time.
///
/// The whole label is rejected if any character can't be encoded.
pub fn encode_label(label: &str) -> Result<Vec<u8>, UnsupportedCharacterError> {
    let mut out = Vec::with_capacity(label.len());
    encode_label_into(label, &mut out)?;
    Ok(out)
}

/// Like [`encode_label`], but appends to an existing buffer.
///
/// On error, `out` may contain the bytes of the characters preceding the rejected one.
pub fn encode_label_into(label: &str, out: &mut Vec<u8>) -> Result<(), UnsupportedCharacterError> {
    for (index, character) in label.chars().enumerate() {
        let charset = LabelCharset::classify(character);
        if !charset.encode_char(character, out) {
            return UnsupportedCharacterSnafu { character, index }.fail();
        }
    }

    Ok(())
}

/// Decodes a label payload.
///
/// Stops at the first malformed double-byte sequence and returns the text decoded up to that
/// point.
pub fn decode_label(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    let mut i = 0;

    while let Some(&byte) = bytes.get(i) {
        if byte.is_ascii() {
            text.push(char::from(byte));
            i += 1;
            continue;
        }

        let pair = &bytes[i..bytes.len().min(i + 2)];
        let Some(decoded) = decode_pair(pair) else {
            warn!("malformed label bytes {pair:02X?} at offset {i}, keeping {text:?}");
            break;
        };
        text.push_str(&decoded);
        i += 2;
    }

    text
}

fn decode_pair(pair: &[u8]) -> Option<Cow<'_, str>> {
    // GB18030 has no single-byte 0x80 or 0xFF lead; encoding_rs would map 0x80 to U+20AC.
    if !matches!(pair, [0x81..=0xFE, _]) {
        return None;
    }

    GB18030.decode_without_bom_handling_and_without_replacement(pair)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_by_unicode_name() {
        assert_eq!(LabelCharset::classify('R'), LabelCharset::Ascii);
        assert_eq!(LabelCharset::classify('~'), LabelCharset::Ascii);
        assert_eq!(LabelCharset::classify('黑'), LabelCharset::Chinese);
        assert_eq!(LabelCharset::classify('あ'), LabelCharset::Japanese);
        assert_eq!(LabelCharset::classify('シ'), LabelCharset::Japanese);
        assert_eq!(LabelCharset::classify('é'), LabelCharset::Unsupported);
        assert_eq!(LabelCharset::classify('한'), LabelCharset::Unsupported);
    }

    #[test]
    fn ascii_label() {
        assert_eq!(encode_label("Red").unwrap(), b"Red");
        assert_eq!(decode_label(b"Red"), "Red");
    }

    #[test]
    fn chinese_label_uses_euc_cn() {
        let bytes = encode_label("黑色").unwrap();
        assert_eq!(bytes, [0xBA, 0xDA, 0xC9, 0xAB]);
        assert_eq!(decode_label(&bytes), "黑色");
    }

    #[test]
    fn japanese_kana_uses_euc_jp() {
        assert_eq!(encode_label("あ").unwrap(), [0xA4, 0xA2]);
        assert_eq!(encode_label("シ").unwrap(), [0xA5, 0xB7]);
    }

    #[test]
    fn mixed_label_keeps_per_character_charsets() {
        let bytes = encode_label("Cyanシアン").unwrap();
        assert_eq!(&bytes[..4], b"Cyan");
        assert_eq!(bytes.len(), 4 + 3 * 2);
        // GB2312 shares the kana rows with JIS X 0208
        assert_eq!(decode_label(&bytes), "Cyanシアン");

        let bytes = encode_label("White白色").unwrap();
        assert_eq!(bytes.len(), 5 + 2 * 2);
        assert_eq!(decode_label(&bytes), "White白色");
    }

    #[test]
    fn unsupported_character_rejects_label() {
        let err = encode_label("Caf\u{e9}").unwrap_err();
        assert_eq!(err.character, '\u{e9}');
        assert_eq!(err.index, 3);

        let err = encode_label("黑\u{1F600}").unwrap_err();
        assert_eq!(err.index, 1);
    }

    #[test]
    fn decode_stops_at_dangling_lead_byte() {
        assert_eq!(decode_label(&[b'R', b'e', 0xBA, 0xDA, 0xC9]), "Re黑");
    }

    #[test]
    fn decode_stops_at_invalid_pair() {
        assert_eq!(decode_label(&[b'A', 0xFF, 0xA1, b'B']), "A");
        assert_eq!(decode_label(&[b'A', 0x80, b'B']), "A");
        // four-byte GB18030 lead
        assert_eq!(decode_label(&[0x81, 0x30, 0x81, 0x30]), "");
    }

    #[test]
    fn empty_label() {
        assert!(encode_label("").unwrap().is_empty());
        assert_eq!(decode_label(&[]), "");
    }
}
