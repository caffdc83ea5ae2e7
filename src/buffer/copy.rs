//! Verbatim pixel copies between two RGBA8 buffers.
//!
//! Nothing here blends, interpolates or premultiplies: destination bytes end up equal to source
//! bytes. Every call checks both rectangles before writing, so a failed call leaves the
//! destination untouched.

use crate::{
    buffer::pixel_buffer::{PixelBuffer, RowsMut},
    foundation::error::{ExtrudeError, ExtrudeResult},
};

/// An axis-aligned pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Region {
    /// Build a region from its top-left corner and size.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// `true` when the region covers no pixel.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    fn fits_in(self, width: u32, height: u32) -> bool {
        u64::from(self.x) + u64::from(self.width) <= u64::from(width)
            && u64::from(self.y) + u64::from(self.height) <= u64::from(height)
    }
}

/// Copy `src_region` of `src` to `dst` with its top-left corner at `(dst_x, dst_y)`.
pub fn copy_region(
    src: &PixelBuffer,
    src_region: Region,
    dst: &mut PixelBuffer,
    dst_x: u32,
    dst_y: u32,
) -> ExtrudeResult<()> {
    copy_region_into(src, src_region, &mut dst.rows_mut(), dst_x, dst_y)
}

/// Write the single source pixel `(src_x, src_y)` to every pixel of `dst_region`.
pub fn fill_region_with_pixel(
    src: &PixelBuffer,
    src_x: u32,
    src_y: u32,
    dst: &mut PixelBuffer,
    dst_region: Region,
) -> ExtrudeResult<()> {
    fill_region_into(src, src_x, src_y, &mut dst.rows_mut(), dst_region)
}

pub(crate) fn copy_region_into(
    src: &PixelBuffer,
    src_region: Region,
    dst: &mut RowsMut<'_>,
    dst_x: u32,
    dst_y: u32,
) -> ExtrudeResult<()> {
    if !src_region.fits_in(src.width(), src.height()) {
        return Err(ExtrudeError::out_of_bounds(format!(
            "source region {src_region:?} exceeds {}x{} buffer",
            src.width(),
            src.height()
        )));
    }
    if !dst.contains_rect(dst_x, dst_y, src_region.width, src_region.height) {
        return Err(ExtrudeError::out_of_bounds(format!(
            "destination {}x{} at ({dst_x}, {dst_y}) exceeds rows [{}, {}) of width {}",
            src_region.width,
            src_region.height,
            dst.top(),
            u64::from(dst.top()) + u64::from(dst.height()),
            dst.width()
        )));
    }
    if src_region.is_empty() {
        return Ok(());
    }

    for j in 0..src_region.height {
        let row = src.row_span(src_region.x, src_region.y + j, src_region.width);
        dst.row_span_mut(dst_x, dst_y + j, src_region.width)
            .copy_from_slice(row);
    }
    Ok(())
}

pub(crate) fn fill_region_into(
    src: &PixelBuffer,
    src_x: u32,
    src_y: u32,
    dst: &mut RowsMut<'_>,
    dst_region: Region,
) -> ExtrudeResult<()> {
    let px = src.pixel_bytes(src_x, src_y).ok_or_else(|| {
        ExtrudeError::out_of_bounds(format!(
            "source pixel ({src_x}, {src_y}) outside {}x{} buffer",
            src.width(),
            src.height()
        ))
    })?;
    if !dst.contains_rect(
        dst_region.x,
        dst_region.y,
        dst_region.width,
        dst_region.height,
    ) {
        return Err(ExtrudeError::out_of_bounds(format!(
            "destination region {dst_region:?} exceeds rows [{}, {}) of width {}",
            dst.top(),
            u64::from(dst.top()) + u64::from(dst.height()),
            dst.width()
        )));
    }
    if dst_region.is_empty() {
        return Ok(());
    }

    for j in 0..dst_region.height {
        let row = dst.row_span_mut(dst_region.x, dst_region.y + j, dst_region.width);
        for out in row.chunks_exact_mut(4) {
            out.copy_from_slice(&px);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/buffer/copy.rs"]
mod tests;
