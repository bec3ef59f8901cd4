//! Single-page PDF wrapping.
//!
//! The page carries one JPEG image XObject (`/DCTDecode`, stored as-is) drawn
//! over the whole media box, so the bitmap fills the page exactly regardless
//! of its own aspect ratio.

use lopdf::{dictionary, Document as PdfDocument, Object, Stream};

use crate::encode::{encode_jpeg, Bitmap};
use crate::error::EncodeError;

const POINTS_PER_MM: f32 = 72.0 / 25.4;
const IMAGE_NAME: &str = "Im0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Target page, in millimetres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
    pub orientation: Orientation,
}

impl PageGeometry {
    pub fn a4_portrait() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            orientation: Orientation::Portrait,
        }
    }

    /// Page size in PDF points, oriented
    pub fn size_pt(&self) -> (f32, f32) {
        let short = self.width_mm.min(self.height_mm) * POINTS_PER_MM;
        let long = self.width_mm.max(self.height_mm) * POINTS_PER_MM;
        match self.orientation {
            Orientation::Portrait => (short, long),
            Orientation::Landscape => (long, short),
        }
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4_portrait()
    }
}

/// JPEG-encode `bitmap` at `quality` and place it as a full-page image.
pub fn render_pdf(bitmap: &Bitmap, quality: u8, page: &PageGeometry) -> Result<Vec<u8>, EncodeError> {
    let jpeg = encode_jpeg(bitmap, quality)?;
    wrap_jpeg(&jpeg, bitmap.width(), bitmap.height(), page)
}

/// Build a one-page PDF around already-encoded JPEG data.
pub fn wrap_jpeg(jpeg: &[u8], width_px: u32, height_px: u32, page: &PageGeometry) -> Result<Vec<u8>, EncodeError> {
    if width_px == 0 || height_px == 0 {
        return Err(EncodeError::EmptyBitmap {
            width: width_px,
            height: height_px,
        });
    }

    let (width_pt, height_pt) = page.size_pt();
    let mut doc = PdfDocument::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut image = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width_px as i64,
            "Height" => height_px as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        jpeg.to_vec(),
    );
    image.allows_compression = false;
    let image_id = doc.add_object(image);

    let draw = format!(
        "q {:.4} 0 0 {:.4} 0 0 cm /{} Do Q\n",
        width_pt, height_pt, IMAGE_NAME
    );
    let content_id = doc.add_object(Stream::new(dictionary! {}, draw.into_bytes()));

    let media_box: Vec<Object> = vec![
        Object::Integer(0),
        Object::Integer(0),
        width_pt.into(),
        height_pt.into(),
    ];
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => media_box,
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! {
                IMAGE_NAME => image_id,
            },
        },
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    tracing::debug!(bytes = out.len(), width_px, height_px, "assembled single-page pdf");
    Ok(out)
}
