//! # zenview
//!
//! Plain-text PPM (`P3`) decoder and a drag-and-drop image viewer built on it.
//!
//! ## Decoding
//!
//! The decoder streams tokens from any [`std::io::BufRead`] and produces an
//! [`Image`] whose pixels are packed as `Abgr8` cells (alpha, blue, green, red;
//! alpha always 255). An image is only ever returned fully populated.
//!
//! ## Viewing
//!
//! [`Viewer`] is a small state machine: empty, or showing exactly one image.
//! Dropping a file decodes it and, on success, replaces the active image,
//! retitles and resizes the window, and redraws. Failed decodes are logged and
//! leave everything as it was. The window itself is abstracted by the
//! [`Window`] and [`Surface`] traits; the `viewer` feature provides a winit +
//! softbuffer implementation in [`backend`].
//!
//! ## Non-Goals
//!
//! - Binary PNM variants (P5, P6, P7)
//! - `maxval` above 255 and any rescaling of samples
//! - Multiple images, history, editing
//!
//! ## Usage
//!
//! ```
//! use zenview::{DecodeRequest, Unstoppable};
//!
//! let data: &[u8] = b"P3\n2 1\n255\n255 0 0  0 255 0\n";
//! let image = DecodeRequest::new(data).decode(Unstoppable)?;
//! assert_eq!(image.pixels(), &[255, 0, 0, 255, 255, 0, 255, 0]);
//! # Ok::<(), zenview::ViewError>(())
//! ```

#![forbid(unsafe_code)]

mod config;
mod decode;
mod error;
mod image;
mod limits;
pub mod pixel;
pub mod ppm;
mod present;
mod viewer;

#[cfg(feature = "viewer")]
pub mod backend;

// Re-exports
pub use config::ViewerConfig;
pub use decode::{DecodeRequest, decode_file};
pub use enough::{Stop, Unstoppable};
pub use error::ViewError;
pub use image::Image;
pub use limits::Limits;
pub use present::{Presenter, Surface, SurfaceLock};
pub use viewer::{Control, Event, Key, Viewer, ViewerState, Window, WindowSpec};
