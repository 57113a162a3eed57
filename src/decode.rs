use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use enough::Stop;

use crate::error::ViewError;
use crate::image::Image;
use crate::limits::Limits;

/// Builder for decoding one pixel map from a byte stream.
///
/// ```
/// use zenview::{DecodeRequest, Unstoppable};
///
/// let data: &[u8] = b"P3\n1 1\n255\n255 0 0\n";
/// let image = DecodeRequest::new(data)
///     .with_source("inline")
///     .decode(Unstoppable)?;
/// assert_eq!(image.width(), 1);
/// # Ok::<(), zenview::ViewError>(())
/// ```
pub struct DecodeRequest<'a, R> {
    reader: R,
    source: String,
    limits: Option<&'a Limits>,
}

impl<'a, R: BufRead> DecodeRequest<'a, R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            source: String::new(),
            limits: None,
        }
    }

    /// Identifier recorded on the decoded image (used for window titles).
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode the stream. On error nothing is returned; no partial image exists.
    pub fn decode(self, stop: impl Stop) -> Result<Image, ViewError> {
        crate::ppm::decode(self.reader, self.source, self.limits, &stop)
    }
}

/// Open and decode the pixel map at `path`.
///
/// The path's display form becomes the image's source identifier.
pub fn decode_file(
    path: impl AsRef<Path>,
    limits: Option<&Limits>,
    stop: impl Stop,
) -> Result<Image, ViewError> {
    let path = path.as_ref();
    let open_error = |source: std::io::Error| ViewError::Open {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = BufReader::new(File::open(path).map_err(open_error)?);
    // Directories and other unreadable handles open fine but fail on read.
    reader.fill_buf().map_err(open_error)?;
    let mut request = DecodeRequest::new(reader).with_source(path.display().to_string());
    if let Some(limits) = limits {
        request = request.with_limits(limits);
    }
    request.decode(stop)
}
