//! Reference implementation for the CCF color chart format.
//!
//! A CCF file stores an ordered palette of named colors. Every file has the same length,
//! regardless of how many colors it holds: the colors are followed by a fill region that pads the
//! stream up to [`TARGET_LEN`](consts::TARGET_LEN) bytes, and a single terminator byte.
//!
//! # Layout
//!
//! ```plain
//! .- CCF file ------------------------------------------------------------.
//! | offset     | size   |                                                  |
//! |------------+--------+--------------------------------------------------|
//! | 0          | 2      | header: 0x00 0x64                                |
//! | 2          | 22 * N | N color blocks                                   |
//! | 2 + 22 * N | ...    | fill region, up to offset 0x6E01                 |
//! | 0x6E01     | 1      | terminator: 0x00                                 |
//! `------------------------------------------------------------------------`
//! ```
//!
//! All multi-byte integers are big-endian.
//!
//! ## Color blocks
//!
//! ```plain
//! .- Color block -----------------------------------------------------.
//! | Byte[0..2] | Byte[2..4] | Byte[4..6] | Byte[6] | Byte[7..22]        |
//! |------------+------------+------------+---------+--------------------|
//! | R16 (r, r) | G16 (g, g) | B16 (b, b) | len     | label + zero pad   |
//! `-------------------------------------------------------------------`
//! ```
//!
//! Each 8-bit channel is stored twice, which makes the 16-bit value `v * 257`. The label is at
//! most 15 bytes long; longer labels are cut off without an error.
//!
//! ## Labels
//!
//! Labels are encoded character by character. ASCII stays ASCII, CJK unified ideographs are
//! encoded as EUC-CN, kana and other CJK characters as EUC-JP. Any other character is rejected.
//! Decoding reads any non-ASCII byte pair as GB18030, so Japanese-only characters are not
//! guaranteed to survive a round-trip.
//!
//! ## Fill region
//!
//! See [`FILL_LEAD`](consts::FILL_LEAD), [`FILL_PATTERN`](consts::FILL_PATTERN) and
//! [`FILL_TAIL_LEN`](consts::FILL_TAIL_LEN). The decoder has no entry count and walks straight
//! through the fill region, yielding entries with empty labels. Use
//! [`DecodedEntry::is_named`] or [`decode::decode_named`] to drop them.

#[macro_use]
extern crate log;

pub mod block;
pub mod decode;
pub mod encode;
pub mod label;
pub mod utils;

pub use block::BlockDecodeError;
pub use decode::{decode, decode_named, has_ccf_header, ColorBlocks};
pub use encode::{encode, encode_to_vec, EncodeError};
pub use label::{LabelCharset, UnsupportedCharacterError};

#[cfg(feature = "std")]
pub use decode::{decode_from_path, decode_from_reader, ReadError};
#[cfg(feature = "std")]
pub use encode::{encode_to_path, encode_to_writer, WriteError};

/// One palette entry, as supplied to the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorEntry {
    pub rgb: [u8; 3],
    pub label: String,
}

impl ColorEntry {
    pub fn new(rgb: [u8; 3], label: impl Into<String>) -> Self {
        Self {
            rgb,
            label: label.into(),
        }
    }
}

impl<S: Into<String>> From<([u8; 3], S)> for ColorEntry {
    fn from((rgb, label): ([u8; 3], S)) -> Self {
        Self::new(rgb, label)
    }
}

/// A color as stored on disk, with 16 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb16 {
    pub r: u16,
    pub g: u16,
    pub b: u16,
}

impl Rgb16 {
    pub const fn new(r: u16, g: u16, b: u16) -> Self {
        Self { r, g, b }
    }

    /// Widens an 8-bit color by duplicating each channel into both bytes.
    pub const fn from_rgb8([r, g, b]: [u8; 3]) -> Self {
        Self {
            r: utils::widen_channel(r),
            g: utils::widen_channel(g),
            b: utils::widen_channel(b),
        }
    }

    /// Narrows back to 8 bits per channel (`value / 257`).
    pub const fn to_rgb8(self) -> [u8; 3] {
        [
            utils::narrow_channel(self.r),
            utils::narrow_channel(self.g),
            utils::narrow_channel(self.b),
        ]
    }

    pub fn to_be_bytes(self) -> [u8; consts::RGB16_LEN] {
        let [r1, r2] = self.r.to_be_bytes();
        let [g1, g2] = self.g.to_be_bytes();
        let [b1, b2] = self.b.to_be_bytes();
        [r1, r2, g1, g2, b1, b2]
    }

    pub fn from_be_bytes(bytes: [u8; consts::RGB16_LEN]) -> Self {
        use byteorder::{BigEndian, ByteOrder};

        Self {
            r: BigEndian::read_u16(&bytes[0..2]),
            g: BigEndian::read_u16(&bytes[2..4]),
            b: BigEndian::read_u16(&bytes[4..6]),
        }
    }
}

/// One entry as read back from a CCF stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEntry {
    pub label: String,
    pub rgb: Rgb16,
}

impl DecodedEntry {
    /// Entries decoded from the fill region always have an empty label.
    pub fn is_named(&self) -> bool {
        !self.label.is_empty()
    }
}

pub mod consts {
    /// File header, always the first two bytes.
    pub const HEADER: [u8; 2] = [0x00, 0x64];

    /// Length of every file up to (but excluding) the terminator.
    pub const TARGET_LEN: usize = 0x6E01;

    /// Final byte of every file.
    pub const TERMINATOR: u8 = 0x00;

    /// Total file length, terminator included.
    pub const FILE_LEN: usize = TARGET_LEN + 1;

    /// Three big-endian u16 channels.
    pub const RGB16_LEN: usize = 6;

    /// Longest label payload that fits into a block, in bytes.
    pub const MAX_LABEL_LEN: usize = 15;

    /// Length byte plus the label payload area.
    pub const LABEL_FIELD_LEN: usize = 1 + MAX_LABEL_LEN;

    /// Size of one color block.
    pub const BLOCK_LEN: usize = RGB16_LEN + LABEL_FIELD_LEN;

    /// Bytes written right after the last color block.
    ///
    /// ```plain
    /// .- FILL_LEAD -------------------.
    /// | 0xFF 0xFF 0xFF 0xFF 0xFF 0xFF |
    /// `-------------------------------`
    /// ```
    pub const FILL_LEAD: [u8; 6] = [0xFF; 6];

    /// Repeated after [`FILL_LEAD`] as many times as fits, the last repetition cut short.
    ///
    /// ```plain
    /// .- FILL_PATTERN ---------------.
    /// | 16 x 0x00       | 6 x 0xFF   |
    /// `------------------------------`
    /// ```
    ///
    /// Together with the lead this reads like a sequence of unlabeled blocks colored `0xFFFF`.
    pub const FILL_PATTERN: [u8; BLOCK_LEN] = [
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    ];

    /// Zero bytes closing the fill region, right before the terminator.
    pub const FILL_TAIL_LEN: usize = 16;

    /// Most entries a file can hold while still leaving room for the fill lead and tail.
    pub const MAX_ENTRIES: usize =
        (TARGET_LEN - HEADER.len() - FILL_LEAD.len() - FILL_TAIL_LEN) / BLOCK_LEN;
}
