//! # Flyer Export
//!
//! Turns a rasterized flyer snapshot into a downloadable artifact.
//!
//! ```text
//! Bitmap (RGBA) ──encode_png──────────────→ image/png
//!        └───────encode_jpeg(95)──wrap_jpeg──→ application/pdf (one full page)
//! ```

mod encode;
mod error;
mod pdf;

pub use encode::{encode_jpeg, encode_png, Bitmap};
pub use error::EncodeError;
pub use pdf::{render_pdf, wrap_jpeg, Orientation, PageGeometry};
