use std::fmt;

use imgref::ImgRef;
use rgb::RGB8;

use crate::pixel::{BYTES_PER_PIXEL, unpack_abgr};

/// A fully decoded pixel map.
///
/// Only the decoder constructs an `Image`, and only after every pixel has been
/// written, so a partially decoded buffer is never observable. The pixel
/// buffer holds `width * height` [`Abgr8`](crate::pixel) cells in row-major
/// order.
pub struct Image {
    source: String,
    format_tag: [u8; 2],
    width: u32,
    height: u32,
    max_intensity: u32,
    pixels: Vec<u8>,
}

impl Image {
    pub(crate) fn new(
        source: String,
        format_tag: [u8; 2],
        width: u32,
        height: u32,
        max_intensity: u32,
        pixels: Vec<u8>,
    ) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * BYTES_PER_PIXEL
        );
        Self {
            source,
            format_tag,
            width,
            height,
            max_intensity,
            pixels,
        }
    }

    /// Where the image came from, usually a file path.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The two-character format tag, e.g. `"P3"`.
    pub fn format_tag(&self) -> &str {
        std::str::from_utf8(&self.format_tag).unwrap_or_default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Per-channel maximum declared in the header.
    pub fn max_intensity(&self) -> u32 {
        self.max_intensity
    }

    /// Packed `Abgr8` pixel bytes, `width * height * 4` long.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGB sample at (`x`, `y`), or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<RGB8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        let (cells, _) = self.pixels.as_chunks::<BYTES_PER_PIXEL>();
        cells.get(idx).copied().map(unpack_abgr)
    }

    /// Zero-copy 2D view of the packed cells.
    pub fn as_imgref(&self) -> ImgRef<'_, [u8; BYTES_PER_PIXEL]> {
        let (cells, _) = self.pixels.as_chunks::<BYTES_PER_PIXEL>();
        ImgRef::new(cells, self.width as usize, self.height as usize)
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("source", &self.source)
            .field("format_tag", &self.format_tag())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("max_intensity", &self.max_intensity)
            .field("pixel_bytes", &self.pixels.len())
            .finish()
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}x{}, max color {})",
            self.source,
            self.format_tag(),
            self.width,
            self.height,
            self.max_intensity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::pack_abgr;

    fn two_by_two() -> Image {
        let mut pixels = Vec::new();
        for px in [
            RGB8::new(255, 0, 0),
            RGB8::new(0, 255, 0),
            RGB8::new(0, 0, 255),
            RGB8::new(10, 20, 30),
        ] {
            pixels.extend_from_slice(&pack_abgr(px));
        }
        Image::new("mem".into(), *b"P3", 2, 2, 255, pixels)
    }

    #[test]
    fn pixel_lookup_is_row_major() {
        let img = two_by_two();
        assert_eq!(img.pixel(0, 0), Some(RGB8::new(255, 0, 0)));
        assert_eq!(img.pixel(1, 0), Some(RGB8::new(0, 255, 0)));
        assert_eq!(img.pixel(0, 1), Some(RGB8::new(0, 0, 255)));
        assert_eq!(img.pixel(1, 1), Some(RGB8::new(10, 20, 30)));
        assert_eq!(img.pixel(2, 0), None);
        assert_eq!(img.pixel(0, 2), None);
    }

    #[test]
    fn imgref_rows() {
        let img = two_by_two();
        let view = img.as_imgref();
        assert_eq!(view.width(), 2);
        assert_eq!(view.height(), 2);
        let rows: Vec<_> = view.rows().collect();
        assert_eq!(rows[1][1], [255, 30, 20, 10]);
    }

    #[test]
    fn display_summary() {
        let img = two_by_two();
        assert_eq!(img.to_string(), "mem (P3, 2x2, max color 255)");
        assert_eq!(img.format_tag(), "P3");
    }
}
