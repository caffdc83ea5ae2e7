use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    buffer::pixel_buffer::PixelBuffer,
    extrude::engine::{Threading, extrude_with},
    foundation::{
        core::{ExtrusionSpec, GridSpec},
        error::ExtrudeResult,
    },
    io::codec::{
        decode_tileset, encode_tileset, guess_format, load_tileset, output_format, write_tileset,
    },
};

/// Decode `bytes` and extrude the result.
pub fn extrude_encoded(
    bytes: &[u8],
    grid: &GridSpec,
    spec: &ExtrusionSpec,
) -> ExtrudeResult<PixelBuffer> {
    let input = decode_tileset(bytes)?;
    extrude_with(&input, grid, spec, &Threading::default())
}

/// Load the tileset at `input`, extrude it and encode the result.
///
/// `format` defaults to the input's own format, falling back to PNG when it cannot be sniffed.
pub fn extrude_tileset_to_bytes(
    input: impl AsRef<Path>,
    grid: &GridSpec,
    spec: &ExtrusionSpec,
    format: Option<image::ImageFormat>,
) -> ExtrudeResult<Vec<u8>> {
    let input = input.as_ref();
    let bytes =
        std::fs::read(input).with_context(|| format!("read tileset '{}'", input.display()))?;
    let format = format
        .or_else(|| guess_format(&bytes))
        .unwrap_or(image::ImageFormat::Png);

    let extruded = extrude_encoded(&bytes, grid, spec)?;
    encode_tileset(&extruded, format)
}

/// Load the tileset at `input`, extrude it and save it to `output`.
///
/// The output format comes from the extension of `output` and is checked before any decoding.
#[tracing::instrument(
    skip(input, output, grid, spec, threading),
    fields(input = %input.display())
)]
pub fn extrude_tileset_to_image(
    input: &Path,
    output: &Path,
    grid: &GridSpec,
    spec: &ExtrusionSpec,
    threading: &Threading,
) -> ExtrudeResult<PixelBuffer> {
    let format = output_format(output)?;
    let tileset = load_tileset(input)?;
    let extruded = extrude_with(&tileset, grid, spec, threading)?;
    write_tileset(&extruded, output, format)?;
    tracing::debug!(
        output = %output.display(),
        width = extruded.width(),
        height = extruded.height(),
        "saved extruded tileset"
    );
    Ok(extruded)
}

/// `dir/name_extruded.ext` for `dir/name.ext`; inputs without an extension get a PNG output,
/// `dir/name_extruded.png`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{stem}_extruded.{}", ext.to_string_lossy()),
        None => format!("{stem}_extruded.png"),
    };
    input.with_file_name(name)
}

#[cfg(test)]
#[path = "../../tests/unit/io/tileset.rs"]
mod tests;
