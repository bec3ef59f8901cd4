//! Image reference helpers.
//!
//! An image leaf holds either a URL (`images/Jean.png`) or a self-contained
//! `data:` URL produced when the user picks a local file.

use base64::Engine;

const DATA_PREFIX: &str = "data:";

/// True when the reference embeds its bytes
pub fn is_embedded(src: &str) -> bool {
    src.starts_with(DATA_PREFIX)
}

/// Encode bytes as a base64 `data:` URL
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime, payload)
}

/// Split a `data:` URL into its MIME type and decoded bytes
pub fn parse_data_url(src: &str) -> Option<(String, Vec<u8>)> {
    let rest = src.strip_prefix(DATA_PREFIX)?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header
        .split(';')
        .next()
        .filter(|v| !v.is_empty())
        .unwrap_or("application/octet-stream")
        .to_string();

    let data = if header.ends_with(";base64") {
        base64::engine::general_purpose::STANDARD.decode(payload).ok()?
    } else {
        payload.as_bytes().to_vec()
    };
    Some((mime, data))
}

/// Guess an image MIME type from a file name
pub fn mime_for_path(name: &str) -> Option<&'static str> {
    let ext = name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}
