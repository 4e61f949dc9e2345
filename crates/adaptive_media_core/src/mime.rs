//! Image MIME types eligible for variant generation.

/// MIME types for which variants are expected to exist.
pub const SUPPORTED_IMAGE_MIME_TYPES: &[&str] = &[
    "image/bmp",
    "image/gif",
    "image/jpeg",
    "image/pjpeg",
    "image/png",
    "image/tiff",
    "image/webp",
    "image/x-citrix-jpeg",
    "image/x-citrix-png",
    "image/x-ms-bmp",
    "image/x-png",
];

/// Check whether variants are generated for files of this MIME type.
pub fn is_supported_image_mime_type(mime_type: &str) -> bool {
    SUPPORTED_IMAGE_MIME_TYPES
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(mime_type))
}
