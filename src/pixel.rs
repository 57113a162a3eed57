//! Packed pixel cells.
//!
//! Decoded images and presentable surfaces share one layout: four bytes per
//! pixel in the order alpha, blue, green, red (`Abgr8`). Alpha is always
//! opaque since the source format has no transparency.

use rgb::RGB8;

/// Bytes per packed pixel cell.
pub const BYTES_PER_PIXEL: usize = 4;

/// Alpha value written to every cell.
pub const OPAQUE: u8 = 255;

/// Pack an RGB sample into an `Abgr8` cell.
#[inline]
pub fn pack_abgr(px: RGB8) -> [u8; BYTES_PER_PIXEL] {
    [OPAQUE, px.b, px.g, px.r]
}

/// Recover the RGB sample from an `Abgr8` cell.
#[inline]
pub fn unpack_abgr(cell: [u8; BYTES_PER_PIXEL]) -> RGB8 {
    RGB8::new(cell[3], cell[2], cell[1])
}

/// Convert an `Abgr8` cell to a `0x00RRGGBB` word.
///
/// Read little-endian, the cell is `0xRRGGBBAA`; shifting out the alpha byte
/// leaves the xRGB word that software framebuffers expect.
#[inline]
pub fn abgr_to_xrgb(cell: [u8; BYTES_PER_PIXEL]) -> u32 {
    u32::from_le_bytes(cell) >> 8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_order_is_alpha_blue_green_red() {
        assert_eq!(pack_abgr(RGB8::new(1, 2, 3)), [255, 3, 2, 1]);
    }

    #[test]
    fn unpack_inverts_pack() {
        for px in [
            RGB8::new(0, 0, 0),
            RGB8::new(255, 0, 0),
            RGB8::new(0, 255, 0),
            RGB8::new(0, 0, 255),
            RGB8::new(12, 200, 99),
        ] {
            assert_eq!(unpack_abgr(pack_abgr(px)), px);
        }
    }

    #[test]
    fn xrgb_word() {
        assert_eq!(abgr_to_xrgb(pack_abgr(RGB8::new(0x12, 0x34, 0x56))), 0x0012_3456);
        assert_eq!(abgr_to_xrgb(pack_abgr(RGB8::new(0, 0, 255))), 0x0000_00ff);
    }
}
