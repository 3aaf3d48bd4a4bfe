//! Fixed-size color blocks.

use crate::{
    consts::{BLOCK_LEN, MAX_LABEL_LEN, RGB16_LEN},
    label::{self, UnsupportedCharacterError},
    DecodedEntry, Rgb16,
};
use snafu::{ensure, Snafu};

#[derive(Debug, Snafu)]
#[snafu(module)]
pub enum BlockDecodeError {
    /// Fewer than six bytes left where a block would start. This is how a stream normally ends.
    #[snafu(display("end of stream: {remaining} bytes left, no further block"))]
    EndOfStream { remaining: usize },
    #[snafu(display(
        "block truncated while reading {field}: {needed} bytes needed, {remaining} left"
    ))]
    TruncatedBlock {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },
}

impl BlockDecodeError {
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Self::EndOfStream { .. })
    }
}

/// Appends one 22-byte block to `w`.
///
/// Labels longer than 15 bytes once encoded are cut off at 15 bytes, even in the middle of a
/// double-byte character. Nothing is written if the label can't be encoded.
pub fn encode_block(
    rgb: [u8; 3],
    label: &str,
    w: &mut Vec<u8>,
) -> Result<(), UnsupportedCharacterError> {
    let mut encoded = label::encode_label(label)?;
    if encoded.len() > MAX_LABEL_LEN {
        trace!("label {label:?} is {} bytes, truncating", encoded.len());
        encoded.truncate(MAX_LABEL_LEN);
    }

    w.reserve(BLOCK_LEN);
    w.extend_from_slice(&Rgb16::from_rgb8(rgb).to_be_bytes());
    // at most MAX_LABEL_LEN, always fits
    w.push(encoded.len() as u8);
    w.extend_from_slice(&encoded);
    w.resize(w.len() + MAX_LABEL_LEN - encoded.len(), 0);

    Ok(())
}

/// Decodes the block at the start of `data` and advances `data` past it.
///
/// On error, `data` is left untouched.
pub fn decode_block(data: &mut &[u8]) -> Result<DecodedEntry, BlockDecodeError> {
    let input = *data;
    ensure!(
        input.len() >= RGB16_LEN,
        block_decode_error::EndOfStreamSnafu {
            remaining: input.len()
        }
    );

    let (rgb, rest) = input.split_at(RGB16_LEN);
    let mut rgb_bytes = [0; RGB16_LEN];
    rgb_bytes.copy_from_slice(rgb);
    let rgb = Rgb16::from_be_bytes(rgb_bytes);

    let (&len, rest) = rest
        .split_first()
        .ok_or(BlockDecodeError::TruncatedBlock {
            field: "label length",
            needed: 1,
            remaining: 0,
        })?;
    let len = usize::from(len);

    ensure!(
        rest.len() >= len,
        block_decode_error::TruncatedBlockSnafu {
            field: "label",
            needed: len,
            remaining: rest.len(),
        }
    );
    let (label_bytes, rest) = rest.split_at(len);
    let label = label::decode_label(label_bytes);

    // A length byte above 15 (never written by the encoder) leaves no padding to skip.
    let padding = MAX_LABEL_LEN.saturating_sub(len);
    ensure!(
        rest.len() >= padding,
        block_decode_error::TruncatedBlockSnafu {
            field: "label padding",
            needed: padding,
            remaining: rest.len(),
        }
    );

    *data = &rest[padding..];
    Ok(DecodedEntry { label, rgb })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(rgb: [u8; 3], label: &str) -> Vec<u8> {
        let mut out = Vec::new();
        encode_block(rgb, label, &mut out).unwrap();
        out
    }

    #[test]
    fn block_is_always_22_bytes() {
        let labels = [
            "",
            "R",
            "Red",
            "Magenta",
            "0123456789abcde",
            "0123456789abcdef",
            "a much longer label than fits",
            "黑色",
            "Gray灰色",
            "黑色黑色黑色黑色",
        ];
        for label in labels {
            for rgb in [[0, 0, 0], [255, 255, 255], [12, 200, 7]] {
                assert_eq!(encoded(rgb, label).len(), BLOCK_LEN, "label {label:?}");
            }
        }
    }

    #[test]
    fn red_block_bytes() {
        let block = encoded([255, 0, 0], "Red");
        assert_eq!(
            block,
            [
                0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, 0x03, b'R', b'e', b'd', 0, 0, 0, 0, 0, 0, 0, 0,
                0, 0, 0, 0
            ]
        );
    }

    #[test]
    fn long_ascii_label_is_truncated() {
        let block = encoded([1, 2, 3], "ABCDEFGHIJKLMNOPQ");
        assert_eq!(block[6], 15);
        assert_eq!(&block[7..], b"ABCDEFGHIJKLMNO");

        let mut data = &block[..];
        let entry = decode_block(&mut data).unwrap();
        assert_eq!(entry.label, "ABCDEFGHIJKLMNO");
        assert!(data.is_empty());
    }

    #[test]
    fn truncation_may_split_a_double_byte_character() {
        let block = encoded([0, 0, 0], "Re黑色黑色黑色黑色");
        assert_eq!(block[6], 15);
        assert_eq!(block[21], 0xBA);

        let entry = decode_block(&mut &block[..]).unwrap();
        assert_eq!(entry.label, "Re黑色黑色黑色");
    }

    #[test]
    fn unsupported_label_writes_nothing() {
        let mut out = vec![0x00, 0x64];
        let err = encode_block([0, 0, 0], "Gr\u{fc}n", &mut out).unwrap_err();
        assert_eq!(err.character, '\u{fc}');
        assert_eq!(out, [0x00, 0x64]);
    }

    #[test]
    fn decode_keeps_raw_16_bit_channels() {
        let block = encoded([255, 128, 1], "Blend");
        let mut data = &block[..];
        let entry = decode_block(&mut data).unwrap();
        assert_eq!(entry.rgb, Rgb16::new(0xFFFF, 0x8080, 0x0101));
        assert_eq!(entry.rgb.to_rgb8(), [255, 128, 1]);
        assert_eq!(entry.label, "Blend");
    }

    #[test]
    fn decode_advances_past_each_block() {
        let mut stream = encoded([10, 20, 30], "A");
        stream.extend(encoded([40, 50, 60], "黑色"));

        let mut data = &stream[..];
        assert_eq!(decode_block(&mut data).unwrap().label, "A");
        assert_eq!(data.len(), BLOCK_LEN);
        assert_eq!(decode_block(&mut data).unwrap().label, "黑色");
        assert!(data.is_empty());
        assert!(decode_block(&mut data).unwrap_err().is_end_of_stream());
    }

    #[test]
    fn short_rgb_is_end_of_stream() {
        let mut data: &[u8] = &[0xFF; 5];
        let err = decode_block(&mut data).unwrap_err();
        assert!(matches!(err, BlockDecodeError::EndOfStream { remaining: 5 }));
        assert_eq!(data.len(), 5);
    }

    #[test]
    fn missing_bytes_after_rgb_are_truncation() {
        let block = encoded([1, 1, 1], "Truncated");

        for cut in [6, 7, 10, 16, 21] {
            let mut data = &block[..cut];
            let err = decode_block(&mut data).unwrap_err();
            assert!(
                matches!(err, BlockDecodeError::TruncatedBlock { .. }),
                "cut at {cut}: {err}"
            );
            assert_eq!(data.len(), cut);
        }
    }
}
