use crate::{
    block::encode_block,
    consts::{FILL_LEAD, FILL_PATTERN, FILL_TAIL_LEN, HEADER, MAX_ENTRIES, TARGET_LEN, TERMINATOR},
    label::UnsupportedCharacterError,
    ColorEntry,
};
use snafu::{ensure, ResultExt, Snafu};

#[cfg(feature = "std")]
mod std_api;
#[cfg(feature = "std")]
pub use std_api::*;

#[derive(Debug, Snafu)]
pub enum EncodeError {
    #[snafu(display("label of entry {entry} can't be encoded"))]
    UnsupportedCharacter {
        entry: usize,
        source: UnsupportedCharacterError,
    },
    #[snafu(display("{count} entries don't fit into a CCF file, at most {max} do"))]
    CapacityExceeded { count: usize, max: usize },
}

/// Encodes a complete CCF file, terminator included, and appends it to `w`.
///
/// On error, `w` may contain part of the file.
pub fn encode_to_vec(entries: &[ColorEntry], w: &mut Vec<u8>) -> Result<(), EncodeError> {
    ensure!(
        entries.len() <= MAX_ENTRIES,
        CapacityExceededSnafu {
            count: entries.len(),
            max: MAX_ENTRIES
        }
    );

    let start = w.len();
    w.reserve(TARGET_LEN + 1);
    w.extend_from_slice(&HEADER);

    for (entry, ColorEntry { rgb, label }) in entries.iter().enumerate() {
        encode_block(*rgb, label, w).context(UnsupportedCharacterSnafu { entry })?;
    }

    fill_to_target_len(w, start + TARGET_LEN);
    w.push(TERMINATOR);

    debug!(
        "encoded {} entries into {} bytes",
        entries.len(),
        w.len() - start
    );

    Ok(())
}

/// Encodes a complete CCF file into a new buffer.
pub fn encode(entries: &[ColorEntry]) -> Result<Vec<u8>, EncodeError> {
    let mut w = Vec::new();
    encode_to_vec(entries, &mut w)?;
    Ok(w)
}

/// Appends the fill region, bringing `w` up to `target_len` bytes.
///
/// The lead and tail are always written, so `w` ends up longer than `target_len` if it started
/// out within `FILL_LEAD.len() + FILL_TAIL_LEN` bytes of it.
pub fn fill_to_target_len(w: &mut Vec<u8>, target_len: usize) {
    w.extend_from_slice(&FILL_LEAD);

    // room for the pattern, keeping the tail in reserve
    let fill_len = target_len.saturating_sub(w.len() + FILL_TAIL_LEN);
    let full_patterns = fill_len / FILL_PATTERN.len();
    let extra_bytes = fill_len % FILL_PATTERN.len();
    trace!("fill region: {full_patterns} patterns + {extra_bytes} bytes");

    for _ in 0..full_patterns {
        w.extend_from_slice(&FILL_PATTERN);
    }
    w.extend_from_slice(&FILL_PATTERN[..extra_bytes]);

    w.extend(itertools::repeat_n(0x00, FILL_TAIL_LEN));
}
