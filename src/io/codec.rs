use std::{io::Cursor, path::Path};

use anyhow::Context;

use crate::{buffer::pixel_buffer::PixelBuffer, foundation::error::ExtrudeResult};

/// Decode encoded image bytes (any format `image` can sniff) into straight RGBA8.
pub fn decode_tileset(bytes: &[u8]) -> ExtrudeResult<PixelBuffer> {
    let dyn_img = image::load_from_memory(bytes).context("decode tileset image from memory")?;
    PixelBuffer::from_rgba_image(dyn_img.to_rgba8())
}

/// Read and decode a tileset image from disk.
pub fn load_tileset(path: impl AsRef<Path>) -> ExtrudeResult<PixelBuffer> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .with_context(|| format!("read tileset image '{}'", path.display()))?;
    Ok(decode_tileset(&bytes)
        .with_context(|| format!("decode tileset image '{}'", path.display()))?)
}

/// Encode `buffer` in `format`.
///
/// JPEG has no alpha channel, so alpha is dropped before encoding it.
pub fn encode_tileset(buffer: &PixelBuffer, format: image::ImageFormat) -> ExtrudeResult<Vec<u8>> {
    let img = image::DynamicImage::ImageRgba8(buffer.clone().into_rgba_image()?);
    let img = if supports_alpha(format) {
        img
    } else {
        image::DynamicImage::ImageRgb8(img.to_rgb8())
    };

    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), format)
        .with_context(|| format!("encode tileset as {format:?}"))?;
    Ok(out)
}

/// Encode `buffer` and write it to `path`, picking the format from the file extension.
///
/// Missing parent directories are created.
pub fn save_tileset(buffer: &PixelBuffer, path: impl AsRef<Path>) -> ExtrudeResult<()> {
    let path = path.as_ref();
    let format = output_format(path)?;
    write_tileset(buffer, path, format)
}

/// Image format implied by the extension of `path`.
pub(crate) fn output_format(path: &Path) -> ExtrudeResult<image::ImageFormat> {
    Ok(image::ImageFormat::from_path(path)
        .with_context(|| format!("pick image format for '{}'", path.display()))?)
}

pub(crate) fn write_tileset(
    buffer: &PixelBuffer,
    path: &Path,
    format: image::ImageFormat,
) -> ExtrudeResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let bytes = encode_tileset(buffer, format)?;
    std::fs::write(path, bytes)
        .with_context(|| format!("write tileset image '{}'", path.display()))?;
    Ok(())
}

/// Sniff the container format of encoded image bytes.
pub fn guess_format(bytes: &[u8]) -> Option<image::ImageFormat> {
    image::guess_format(bytes).ok()
}

fn supports_alpha(format: image::ImageFormat) -> bool {
    !matches!(format, image::ImageFormat::Jpeg)
}

#[cfg(test)]
#[path = "../../tests/unit/io/codec.rs"]
mod tests;
