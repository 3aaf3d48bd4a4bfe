use crate::{
    block::{decode_block, BlockDecodeError},
    consts::HEADER,
    DecodedEntry,
};
use core::iter::FusedIterator;

#[cfg(feature = "std")]
mod std_api;
#[cfg(feature = "std")]
pub use std_api::*;

/// Whether `data` starts with the CCF header bytes.
///
/// The decoder itself never checks the header.
pub fn has_ccf_header(data: &[u8]) -> bool {
    data.starts_with(&HEADER)
}

/// Iterator over the color blocks of a CCF stream.
///
/// There is no entry count in the format, so iteration only stops once fewer than six bytes are
/// left or a block is cut short. Blocks read from the fill region come out as entries with an
/// empty label.
#[derive(Debug)]
pub struct ColorBlocks<'a> {
    data: &'a [u8],
    stop: Option<BlockDecodeError>,
}

impl<'a> ColorBlocks<'a> {
    /// Skips the two header bytes, whatever they are, and iterates over the rest.
    pub fn new(data: &'a [u8]) -> Self {
        Self::without_header(data.get(HEADER.len()..).unwrap_or_default())
    }

    /// Iterates over blocks starting right at the beginning of `data`.
    pub fn without_header(data: &'a [u8]) -> Self {
        Self { data, stop: None }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        self.data
    }

    /// Why iteration ended, once it has.
    ///
    /// Anything other than [`BlockDecodeError::EndOfStream`] means the last block was truncated.
    pub fn stop_reason(&self) -> Option<&BlockDecodeError> {
        self.stop.as_ref()
    }
}

impl Iterator for ColorBlocks<'_> {
    type Item = DecodedEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stop.is_some() {
            return None;
        }

        match decode_block(&mut self.data) {
            Ok(entry) => {
                trace!("block {:?} {:?}", entry.label, entry.rgb);
                Some(entry)
            }
            Err(err) => {
                if !err.is_end_of_stream() {
                    warn!("{err}, dropping the partial block");
                }
                self.stop = Some(err);
                None
            }
        }
    }
}

impl FusedIterator for ColorBlocks<'_> {}

/// Decodes every block of a CCF stream, fill region included.
///
/// Never fails. Decoding ends at the end of the stream or at the first truncated block, and
/// malformed labels are cut short.
pub fn decode(data: &[u8]) -> Vec<DecodedEntry> {
    let entries: Vec<_> = ColorBlocks::new(data).collect();
    debug!("decoded {} blocks from {} bytes", entries.len(), data.len());
    entries
}

/// Like [`decode`], but drops entries without a label.
pub fn decode_named(data: &[u8]) -> Vec<DecodedEntry> {
    ColorBlocks::new(data)
        .filter(DecodedEntry::is_named)
        .collect()
}
