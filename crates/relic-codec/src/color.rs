//! Packed colour expansion and contraction.

use crate::error::{CodecError, CodecResult};
use crate::{Argb32, PackedColor16, PackedColorArchive32};

/// Expand a 16-bit packed colour into a 32-bit ARGB pixel.
///
/// The transparency flag selects alpha 0x00 (transparent) or 0xFF (opaque).
/// Each 5-bit channel lands in the top five bits of its 8-bit channel, so the
/// low three bits of every channel are zero. The expansion is lossy by
/// design: those low bits must stay zero for [`pack_color16`] to reverse it
/// exactly.
#[must_use]
pub fn unpack_color16(packed: PackedColor16) -> Argb32 {
    let word = u32::from(packed.0);

    let alpha = if packed.is_transparent() {
        0x0000_0000
    } else {
        0xff00_0000
    };

    // Word layout: {t}{bbbbb}{ggggg}{rrrrr}.
    let red = (word << 3) & 0xf8;
    let green = (word >> 2) & 0xf8;
    let blue = (word >> 7) & 0xf8;

    Argb32(alpha | (red << 16) | (green << 8) | blue)
}

/// Contract a 32-bit ARGB pixel into the 16-bit packed form.
///
/// The low three bits of each channel are discarded with no rounding.
///
/// # Errors
///
/// Returns [`CodecError::PartialAlpha`] unless alpha is exactly 0x00 or
/// 0xFF. Partial transparency cannot be represented and is never clamped.
pub fn pack_color16(argb: Argb32) -> CodecResult<PackedColor16> {
    let transparency = match argb.alpha() {
        0xff => 0,
        0x00 => PackedColor16::TRANSPARENT_BIT,
        alpha => return Err(CodecError::PartialAlpha { alpha }),
    };

    let red = u16::from(argb.red() >> 3);
    let green = u16::from(argb.green() >> 3);
    let blue = u16::from(argb.blue() >> 3);

    Ok(PackedColor16(red | (green << 5) | (blue << 10) | transparency))
}

/// Reorder an archive "ABGR" word into a conventional ARGB pixel.
///
/// Alpha and green pass through; red and blue swap places. The permutation is
/// lossless, and [`argb_to_archive`] undoes it exactly for every input.
#[must_use]
pub fn archive_to_argb(archive: PackedColorArchive32) -> Argb32 {
    Argb32(swap_red_blue(archive.0))
}

/// Reorder an ARGB pixel into the archive's "ABGR" word.
#[must_use]
pub fn argb_to_archive(argb: Argb32) -> PackedColorArchive32 {
    PackedColorArchive32(swap_red_blue(argb.0))
}

/// Swap bytes 2 and 0, leaving bytes 3 and 1 in place.
fn swap_red_blue(value: u32) -> u32 {
    (value & 0xff00_ff00) | ((value >> 16) & 0x0000_00ff) | ((value << 16) & 0x00ff_0000)
}

/// Decode a row of consecutive 16-bit colour words.
///
/// The archive stores palettes as bare little-endian 16-bit words with no
/// header; each word expands via [`unpack_color16`].
///
/// # Errors
///
/// Returns [`CodecError::InvalidFormat`] if the slice is not a whole number
/// of 16-bit words.
pub fn unpack_color_table(packed: &[u8]) -> CodecResult<Vec<Argb32>> {
    if packed.len() % 2 != 0 {
        return Err(CodecError::InvalidFormat {
            context: "colour table",
            detail: format!("length {} is not a whole number of 16-bit words", packed.len()),
        });
    }

    Ok(packed
        .chunks_exact(2)
        .map(|pair| unpack_color16(PackedColor16::from_le_bytes([pair[0], pair[1]])))
        .collect())
}
