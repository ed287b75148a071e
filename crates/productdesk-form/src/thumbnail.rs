//! Local image handling: thumbnails for freshly picked files and data
//! references for previews.

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::ImageFormat;
use productdesk_core::models::UploadFile;

/// Longest edge of a generated thumbnail, in pixels.
pub const THUMBNAIL_MAX_EDGE: u32 = 200;

pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// MIME type sniffed from the image header, `application/octet-stream` if unknown.
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream")
}

/// Downscale an encoded image and return it as a PNG data reference.
pub fn thumbnail_data_url(bytes: &[u8]) -> Result<String> {
    let image = image::load_from_memory(bytes).context("Failed to decode image")?;
    let thumb = image.thumbnail(THUMBNAIL_MAX_EDGE, THUMBNAIL_MAX_EDGE);

    let mut out = Cursor::new(Vec::new());
    thumb
        .write_to(&mut out, ImageFormat::Png)
        .context("Failed to encode thumbnail")?;

    Ok(data_url("image/png", &out.into_inner()))
}

/// Build the upload entry for a file the user just picked.
pub async fn upload_file_from_path(path: &Path) -> Result<UploadFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let thumb = tokio::task::spawn_blocking(move || thumbnail_data_url(&bytes))
        .await
        .context("Thumbnail task panicked")??;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string);

    tracing::debug!(path = %path.display(), "Generated upload thumbnail");

    Ok(UploadFile {
        uid: format!("rc-upload-{}", uuid::Uuid::new_v4()),
        name,
        url: None,
        thumb_url: Some(thumb),
        origin: Some(path.to_path_buf()),
    })
}
