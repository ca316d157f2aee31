//! pixscii - image to ASCII art converter
//!
//! Maps image luminance onto a ramp of ASCII glyphs and re-renders the
//! resulting text with a monospaced font for side-by-side display.
//!
//! # Example
//! ```no_run
//! use pixscii::{AsciiConfig, handle_upload};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let conversion = handle_upload(&bytes, &AsciiConfig::default()).unwrap();
//! println!("{}", conversion.ascii);
//! conversion.rendered.save("ascii_art.png").unwrap();
//! ```

pub mod config;
pub mod error;
pub mod filters;
pub mod font;
pub mod lut;
pub mod mapper;
pub mod processor;
pub mod raster;

// Re-export main types for convenience
pub use config::AsciiConfig;
pub use error::{Error, ErrorCategory, Result};
pub use filters::ResampleFilter;
pub use font::{MonospaceFont, shared_font};
pub use lut::GlyphRamp;
pub use mapper::{AsciiBlock, image_to_ascii, map_image};
pub use processor::{Conversion, convert, decode_image, handle_upload, load_upload};
pub use raster::{RasterOptions, rasterize};
