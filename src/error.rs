use std::io;
use std::path::PathBuf;

use enough::StopReason;

/// Errors from decoding pixel maps and driving the viewer window.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ViewError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("not a P3 pixel map: {0}")]
    Format(String),

    #[error("invalid image dimensions: {0}")]
    Dimension(String),

    #[error("invalid max color: {0}")]
    MaxColor(String),

    #[error("invalid pixel data at pixel {index}")]
    PixelData { index: usize },

    #[error("failed to allocate {bytes} bytes of pixel data")]
    Allocation { bytes: usize },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("read error: {0}")]
    Io(#[from] io::Error),

    #[error("operation cancelled")]
    Cancelled(StopReason),

    #[error("window error: {0}")]
    Window(String),
}

impl ViewError {
    /// Whether this error came out of decoding an image.
    ///
    /// Decode errors abandon a single load; the viewer keeps running.
    /// Everything else (window, surface) is fatal.
    pub fn is_decode_error(&self) -> bool {
        !matches!(self, ViewError::Window(_))
    }
}

impl From<StopReason> for ViewError {
    fn from(r: StopReason) -> Self {
        ViewError::Cancelled(r)
    }
}
