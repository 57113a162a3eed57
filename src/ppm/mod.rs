//! Plain (ASCII) PPM, the `P3` member of the PNM family.
//!
//! ```text
//! P3
//! <width> <height>
//! <maxval>
//! <r> <g> <b> ...   (width * height triplets)
//! ```
//!
//! Only 8-bit channels are supported: `maxval` must be in `1..=255`.

mod decode;
mod tokens;

pub(crate) use decode::decode;

/// Format tag of the supported variant.
pub const FORMAT_TAG: [u8; 2] = *b"P3";

/// Largest supported `maxval`.
pub const MAX_INTENSITY: u32 = 255;
