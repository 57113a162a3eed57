//! Turning the viewer state into one presented frame.

use rgb::RGB8;

use crate::error::ViewError;
use crate::image::Image;
use crate::pixel::{BYTES_PER_PIXEL, pack_abgr};

/// Writable view of a locked surface. Dropping it unlocks the surface.
///
/// `bytes` holds `height` rows of `stride` bytes each, in `Abgr8` cells.
pub struct SurfaceLock<'a> {
    pub bytes: &'a mut [u8],
    pub stride: usize,
    pub width: u32,
    pub height: u32,
}

/// A presentable pixel surface.
pub trait Surface {
    /// Size of the visible drawing area in pixels.
    fn visible_size(&self) -> (u32, u32);

    /// Create or reuse a buffer of exactly `width` x `height` pixels.
    fn configure(&mut self, width: u32, height: u32) -> Result<(), ViewError>;

    /// Lock the configured buffer for direct writes.
    fn lock(&mut self) -> Result<SurfaceLock<'_>, ViewError>;

    /// Show the most recently written buffer.
    fn present(&mut self) -> Result<(), ViewError>;
}

/// Draws either the active image or the fallback fill, then presents once.
#[derive(Clone, Debug)]
pub struct Presenter {
    fallback: [u8; BYTES_PER_PIXEL],
}

impl Presenter {
    pub fn new(fallback: RGB8) -> Self {
        Self {
            fallback: pack_abgr(fallback),
        }
    }

    /// Render one frame. `image` is borrowed only for the duration of the call.
    pub fn draw<S: Surface + ?Sized>(
        &self,
        image: Option<&Image>,
        surface: &mut S,
    ) -> Result<(), ViewError> {
        match image {
            Some(image) => copy_image(image, surface)?,
            None => self.fill(surface)?,
        }
        surface.present()
    }

    fn fill<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<(), ViewError> {
        let (width, height) = surface.visible_size();
        surface.configure(width.max(1), height.max(1))?;
        let lock = surface.lock()?;
        let row_bytes = lock.width as usize * BYTES_PER_PIXEL;
        if row_bytes == 0 || lock.stride < row_bytes {
            return Err(ViewError::Window(format!(
                "surface stride {} too small for width {}",
                lock.stride, lock.width
            )));
        }
        for row in lock.bytes.chunks_mut(lock.stride).take(lock.height as usize) {
            let Some(row) = row.get_mut(..row_bytes) else {
                break;
            };
            let (cells, _) = row.as_chunks_mut::<BYTES_PER_PIXEL>();
            cells.fill(self.fallback);
        }
        Ok(())
    }
}

fn copy_image<S: Surface + ?Sized>(image: &Image, surface: &mut S) -> Result<(), ViewError> {
    surface.configure(image.width(), image.height())?;
    let lock = surface.lock()?;
    let row_bytes = image.width() as usize * BYTES_PER_PIXEL;
    let needed = lock
        .stride
        .checked_mul(image.height() as usize)
        .unwrap_or(usize::MAX);
    if lock.width != image.width()
        || lock.height != image.height()
        || lock.stride < row_bytes
        || lock.bytes.len() < needed
    {
        return Err(ViewError::Window(format!(
            "surface {}x{} (stride {}) cannot hold a {}x{} image",
            lock.width,
            lock.height,
            lock.stride,
            image.width(),
            image.height()
        )));
    }

    if lock.stride == row_bytes {
        lock.bytes[..image.pixels().len()].copy_from_slice(image.pixels());
    } else {
        for (src, dst) in image
            .as_imgref()
            .rows()
            .zip(lock.bytes.chunks_mut(lock.stride))
        {
            dst[..row_bytes].copy_from_slice(src.as_flattened());
        }
    }
    Ok(())
}
