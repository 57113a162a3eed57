//! P3 decoder: single pass over the token stream, no backtracking.

use std::io::BufRead;

use enough::Stop;
use rgb::RGB8;

use super::tokens::{Scan, Tokens};
use super::{FORMAT_TAG, MAX_INTENSITY};
use crate::error::ViewError;
use crate::image::Image;
use crate::limits::Limits;
use crate::pixel::{BYTES_PER_PIXEL, pack_abgr};

/// Pixels decoded between cancellation checks.
const STOP_CHECK_INTERVAL: usize = 4096;

/// Decode a P3 stream into a fully populated [`Image`].
pub(crate) fn decode<R: BufRead>(
    reader: R,
    source: String,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, ViewError> {
    let mut tokens = Tokens::new(reader);

    let format_tag = match tokens.next_tag()? {
        Scan::Value(tag) if tag == FORMAT_TAG => tag,
        Scan::Value(tag) => {
            return Err(ViewError::Format(format!(
                "unsupported tag {:?}",
                String::from_utf8_lossy(&tag)
            )));
        }
        Scan::Malformed => return Err(ViewError::Format("malformed tag".into())),
        Scan::Eof => return Err(ViewError::Format("missing tag".into())),
    };

    let width = dimension(&mut tokens, "width")?;
    let height = dimension(&mut tokens, "height")?;

    let max_intensity = match tokens.next_u32()? {
        Scan::Value(0) => return Err(ViewError::MaxColor("max color is zero".into())),
        Scan::Value(v) if v > MAX_INTENSITY => {
            return Err(ViewError::MaxColor(format!(
                "max color {v} needs more than 8 bits per channel"
            )));
        }
        Scan::Value(v) => v,
        Scan::Malformed => return Err(ViewError::MaxColor("not a number".into())),
        Scan::Eof => return Err(ViewError::MaxColor("missing".into())),
    };

    let too_large = || ViewError::Dimension(format!("{width}x{height} is too large"));
    let pixel_count = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(too_large)?;
    let bytes = pixel_count
        .checked_mul(BYTES_PER_PIXEL)
        .ok_or_else(too_large)?;

    if let Some(limits) = limits {
        limits.check(width, height, bytes)?;
    }

    stop.check()?;

    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(bytes)
        .map_err(|_| ViewError::Allocation { bytes })?;

    let mut stats = SampleStats::default();
    for index in 0..pixel_count {
        if index % STOP_CHECK_INTERVAL == 0 {
            stop.check()?;
        }
        let mut rgb = [0u8; 3];
        for sample in rgb.iter_mut() {
            match tokens.next_u32()? {
                Scan::Value(v) => *sample = stats.observe(v, max_intensity),
                Scan::Malformed | Scan::Eof => return Err(ViewError::PixelData { index }),
            }
        }
        pixels.extend_from_slice(&pack_abgr(RGB8::new(rgb[0], rgb[1], rgb[2])));
    }

    stats.report(&source, max_intensity);

    Ok(Image::new(
        source,
        format_tag,
        width,
        height,
        max_intensity,
        pixels,
    ))
}

fn dimension<R: BufRead>(tokens: &mut Tokens<R>, name: &str) -> Result<u32, ViewError> {
    match tokens.next_u32()? {
        Scan::Value(0) => Err(ViewError::Dimension(format!("{name} is zero"))),
        Scan::Value(v) => Ok(v),
        Scan::Malformed => Err(ViewError::Dimension(format!("{name} is not a number"))),
        Scan::Eof => Err(ViewError::Dimension(format!("missing {name}"))),
    }
}

/// Out-of-range samples seen while decoding.
///
/// Neither case fails the decode; both are reported once per image.
#[derive(Debug, Default, PartialEq, Eq)]
struct SampleStats {
    above_max: u64,
    truncated: u64,
}

impl SampleStats {
    /// Record a sample and return it truncated to one byte.
    fn observe(&mut self, value: u32, max_intensity: u32) -> u8 {
        if value > max_intensity {
            self.above_max += 1;
        }
        if value > u32::from(u8::MAX) {
            self.truncated += 1;
        }
        value as u8
    }

    fn report(&self, source: &str, max_intensity: u32) {
        if self.above_max > 0 {
            log::warn!(
                "{source}: {} samples exceed declared max color {max_intensity}",
                self.above_max
            );
        }
        if self.truncated > 0 {
            log::warn!(
                "{source}: {} samples above 255 were truncated to 8 bits",
                self.truncated
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_count_and_truncate() {
        let mut stats = SampleStats::default();
        assert_eq!(stats.observe(100, 100), 100);
        assert_eq!(stats.observe(101, 100), 101);
        assert_eq!(stats.observe(256, 255), 0);
        assert_eq!(stats.observe(300, 255), 44);
        assert_eq!(
            stats,
            SampleStats {
                above_max: 3,
                truncated: 2
            }
        );
    }
}
