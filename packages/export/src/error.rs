use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("PDF assembly failed: {0}")]
    Pdf(String),

    #[error("PDF write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bitmap is empty ({width}x{height})")]
    EmptyBitmap { width: u32, height: u32 },

    #[error("JPEG quality must be within 1..=100, got {0}")]
    InvalidQuality(u8),
}

impl From<lopdf::Error> for EncodeError {
    fn from(err: lopdf::Error) -> Self {
        EncodeError::Pdf(err.to_string())
    }
}
