/// Widens an 8-bit channel into the on-disk 16-bit value by repeating the byte.
#[inline]
pub const fn widen_channel(v: u8) -> u16 {
    u16::from_be_bytes([v, v])
}

/// Narrows an on-disk 16-bit channel back to 8 bits.
///
/// Uses integer division by 257, so values that weren't written by [`widen_channel`] round down.
#[inline]
pub const fn narrow_channel(v: u16) -> u8 {
    (v / 257) as u8
}
