use crate::error::ViewError;

/// Largest image side the viewer accepts by default.
pub const VIEWER_MAX_SIDE: u64 = 16_384;

/// Resource limits checked after the header is parsed, before the pixel
/// buffer is reserved.
///
/// `Limits::default()` is unlimited; [`Limits::viewer`] is what the viewer
/// decodes dropped files with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size of the packed pixel buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Caps for interactive viewing: 16384x16384 pixels, 1 GiB of pixels.
    pub fn viewer() -> Self {
        let max_pixels = VIEWER_MAX_SIDE * VIEWER_MAX_SIDE;
        Self {
            max_width: Some(VIEWER_MAX_SIDE),
            max_height: Some(VIEWER_MAX_SIDE),
            max_pixels: Some(max_pixels),
            max_memory_bytes: Some(max_pixels * crate::pixel::BYTES_PER_PIXEL as u64),
        }
    }

    pub fn with_max_pixels(mut self, pixels: u64) -> Self {
        self.max_pixels = Some(pixels);
        self
    }

    pub fn with_max_memory_bytes(mut self, bytes: u64) -> Self {
        self.max_memory_bytes = Some(bytes);
        self
    }

    /// Check a parsed header and the buffer size it implies.
    pub(crate) fn check(&self, width: u32, height: u32, bytes: usize) -> Result<(), ViewError> {
        let pixels = u64::from(width) * u64::from(height);
        exceeds("width", u64::from(width), self.max_width)?;
        exceeds("height", u64::from(height), self.max_height)?;
        exceeds("pixel count", pixels, self.max_pixels)?;
        exceeds("pixel buffer bytes", bytes as u64, self.max_memory_bytes)
    }
}

fn exceeds(what: &str, value: u64, limit: Option<u64>) -> Result<(), ViewError> {
    match limit {
        Some(max) if value > max => Err(ViewError::LimitExceeded(format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_by_default() {
        assert!(Limits::default().check(u32::MAX, u32::MAX, usize::MAX).is_ok());
    }

    #[test]
    fn viewer_caps_side_and_buffer() {
        let limits = Limits::viewer();
        assert!(limits.check(16_384, 16_384, 16_384 * 16_384 * 4).is_ok());
        assert!(matches!(
            limits.check(16_385, 1, 16_385 * 4),
            Err(ViewError::LimitExceeded(_))
        ));
        assert!(matches!(
            limits.check(60_000, 60_000, usize::MAX),
            Err(ViewError::LimitExceeded(_))
        ));
    }

    #[test]
    fn builder_sets_single_caps() {
        let limits = Limits::default()
            .with_max_pixels(50)
            .with_max_memory_bytes(16);
        assert!(limits.check(4, 1, 16).is_ok());
        assert!(limits.check(10, 6, 16).is_err());
        assert!(limits.check(5, 1, 20).is_err());
    }
}
