use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage, RgbaImage};

use crate::error::EncodeError;

/// Rasterized snapshot of the export region
pub type Bitmap = RgbaImage;

/// Lossless PNG, alpha preserved
pub fn encode_png(bitmap: &Bitmap) -> Result<Vec<u8>, EncodeError> {
    ensure_not_empty(bitmap)?;

    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(
        bitmap.as_raw(),
        bitmap.width(),
        bitmap.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(out)
}

/// Baseline JPEG at `quality` (1..=100).
///
/// JPEG has no alpha channel; translucent pixels are composited over white.
pub fn encode_jpeg(bitmap: &Bitmap, quality: u8) -> Result<Vec<u8>, EncodeError> {
    ensure_not_empty(bitmap)?;
    if !(1..=100).contains(&quality) {
        return Err(EncodeError::InvalidQuality(quality));
    }

    let flattened = flatten_on_white(bitmap);
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality).write_image(
        flattened.as_raw(),
        flattened.width(),
        flattened.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(out)
}

fn flatten_on_white(bitmap: &Bitmap) -> RgbImage {
    RgbImage::from_fn(bitmap.width(), bitmap.height(), |x, y| {
        let [r, g, b, a] = bitmap.get_pixel(x, y).0;
        Rgb([over_white(r, a), over_white(g, a), over_white(b, a)])
    })
}

fn over_white(channel: u8, alpha: u8) -> u8 {
    let c = channel as u16 * alpha as u16 + 255 * (255 - alpha as u16);
    ((c + 127) / 255) as u8
}

fn ensure_not_empty(bitmap: &Bitmap) -> Result<(), EncodeError> {
    if bitmap.width() == 0 || bitmap.height() == 0 {
        return Err(EncodeError::EmptyBitmap {
            width: bitmap.width(),
            height: bitmap.height(),
        });
    }
    Ok(())
}
