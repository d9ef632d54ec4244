//! Input validation helpers.
//!
//! The upload form only accepts image files; the check runs against the
//! declared content type of the dropped file. The CLI path derives the
//! content type from the file extension before the same gate applies.

/// True when the declared content type identifies an image.
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .to_ascii_lowercase()
        .trim()
        .starts_with("image/")
}

/// MIME type for a file path based on its extension. Unknown extensions
/// map to `application/octet-stream`, which the image gate rejects.
pub fn content_type_for_path(path: &str) -> &'static str {
    let ext = std::path::Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}
