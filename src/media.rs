//! Card image ingestion
//!
//! Turns an image file into the `data:` URL stored on `Card::image`.
//! Anything whose media type is not `image/*` is rejected before the card
//! is touched.

use std::fs;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{CardboxError, Result};

/// Media type for a file, judged by extension
pub fn media_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let media_type = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "avif" => "image/avif",
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        "json" => "application/json",
        _ => return None,
    };
    Some(media_type)
}

/// Encode raw bytes of a declared media type as a data URL
pub fn encode_image(bytes: &[u8], media_type: &str) -> Result<String> {
    if !media_type.starts_with("image/") {
        return Err(CardboxError::UnsupportedMedia(media_type.to_string()));
    }
    Ok(format!("data:{};base64,{}", media_type, STANDARD.encode(bytes)))
}

/// Read an image file and encode it, enforcing a size limit
pub fn ingest_image_file(path: &Path, max_bytes: u64) -> Result<String> {
    let media_type = media_type_for_path(path).unwrap_or("application/octet-stream");
    if !media_type.starts_with("image/") {
        return Err(CardboxError::UnsupportedMedia(media_type.to_string()));
    }

    let size = fs::metadata(path)?.len();
    if size > max_bytes {
        return Err(CardboxError::ImageTooLarge { size, limit: max_bytes });
    }

    let bytes = fs::read(path)?;
    log::info!("Ingested {} ({} bytes) as {}", path.display(), size, media_type);
    encode_image(&bytes, media_type)
}

/// Media type of a stored data URL, for display
pub fn data_url_media_type(image: &str) -> Option<&str> {
    let rest = image.strip_prefix("data:")?;
    let end = rest.find(|c| c == ';' || c == ',')?;
    Some(&rest[..end])
}
