use crate::foundation::{
    core::Rgba8,
    error::{ExtrudeError, ExtrudeResult},
};

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// An owned RGBA8 image, tightly packed, row-major.
///
/// `data.len() == width * height * 4` always holds, and both dimensions are non-zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap decoded RGBA8 bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> ExtrudeResult<Self> {
        let expected = byte_len(width, height).ok_or_else(|| {
            ExtrudeError::invalid(format!("pixel buffer {width}x{height} is too large"))
        })?;
        if width == 0 || height == 0 || data.len() != expected {
            return Err(ExtrudeError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A `width x height` buffer where every pixel is `color`.
    pub fn filled(width: u32, height: u32, color: Rgba8) -> ExtrudeResult<Self> {
        if width == 0 || height == 0 {
            return Err(ExtrudeError::invalid(format!(
                "pixel buffer dimensions must be > 0, got {width}x{height}"
            )));
        }
        let len = byte_len(width, height).ok_or_else(|| {
            ExtrudeError::invalid(format!("pixel buffer {width}x{height} is too large"))
        })?;
        let data = color.to_bytes().repeat(len / BYTES_PER_PIXEL);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Give up ownership of the RGBA8 bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of pixel `(x, y)`, or `None` when it lies outside the buffer.
    pub fn byte_offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL)
    }

    /// Color of pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        self.pixel_bytes(x, y).map(Rgba8::from_bytes)
    }

    pub(crate) fn pixel_bytes(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.byte_offset(x, y)?;
        let px = self.data.get(i..i + BYTES_PER_PIXEL)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Bytes of `len` pixels starting at `(x, y)`.
    pub(crate) fn row_span(&self, x: u32, y: u32, len: u32) -> &[u8] {
        let start = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        &self.data[start..start + len as usize * BYTES_PER_PIXEL]
    }

    /// Mutable view over every row.
    pub(crate) fn rows_mut(&mut self) -> RowsMut<'_> {
        RowsMut {
            width: self.width,
            top: 0,
            height: self.height,
            data: &mut self.data,
        }
    }

    /// Take ownership of an `image` RGBA8 image.
    pub fn from_rgba_image(img: image::RgbaImage) -> ExtrudeResult<Self> {
        let (width, height) = img.dimensions();
        Self::from_raw(width, height, img.into_raw())
    }

    /// Convert into an `image` RGBA8 image for encoding.
    pub fn into_rgba_image(self) -> ExtrudeResult<image::RgbaImage> {
        let (width, height, actual) = (self.width, self.height, self.data.len());
        image::RgbaImage::from_raw(width, height, self.data).ok_or(ExtrudeError::BufferSize {
            expected: byte_len(width, height).unwrap_or(usize::MAX),
            actual,
        })
    }
}

fn byte_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(BYTES_PER_PIXEL)
}

/// A band of full-width rows `[top, top + height)` of a [`PixelBuffer`], addressed in the
/// coordinates of the whole image.
#[derive(Debug)]
pub(crate) struct RowsMut<'a> {
    width: u32,
    top: u32,
    height: u32,
    data: &'a mut [u8],
}

impl<'a> RowsMut<'a> {
    pub(crate) fn width(&self) -> u32 {
        self.width
    }

    pub(crate) fn top(&self) -> u32 {
        self.top
    }

    pub(crate) fn height(&self) -> u32 {
        self.height
    }

    /// `true` when the rectangle lies entirely inside this band.
    pub(crate) fn contains_rect(&self, x: u32, y: u32, width: u32, height: u32) -> bool {
        let (x, y, w, h) = (
            u64::from(x),
            u64::from(y),
            u64::from(width),
            u64::from(height),
        );
        x + w <= u64::from(self.width)
            && y >= u64::from(self.top)
            && y + h <= u64::from(self.top) + u64::from(self.height)
    }

    /// Mutable bytes of `len` pixels starting at absolute `(x, y)`.
    pub(crate) fn row_span_mut(&mut self, x: u32, y: u32, len: u32) -> &mut [u8] {
        let row = (y - self.top) as usize;
        let start = (row * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        &mut self.data[start..start + len as usize * BYTES_PER_PIXEL]
    }

    /// Split into disjoint bands. `bands` holds `(top, height)` pairs sorted by `top`.
    pub(crate) fn split_bands(self, bands: &[(u32, u32)]) -> ExtrudeResult<Vec<RowsMut<'a>>> {
        let row_bytes = self.width as usize * BYTES_PER_PIXEL;
        let end = u64::from(self.top) + u64::from(self.height);
        let mut rest = self.data;
        let mut cursor = self.top;
        let mut out = Vec::with_capacity(bands.len());

        for &(top, height) in bands {
            if top < cursor || u64::from(top) + u64::from(height) > end {
                return Err(ExtrudeError::out_of_bounds(format!(
                    "row band [{top}, {}) overlaps a previous band or leaves rows [{}, {end})",
                    u64::from(top) + u64::from(height),
                    self.top
                )));
            }
            let skip = (top - cursor) as usize * row_bytes;
            let (_, tail) = std::mem::take(&mut rest).split_at_mut(skip);
            let (band, tail) = tail.split_at_mut(height as usize * row_bytes);
            out.push(RowsMut {
                width: self.width,
                top,
                height,
                data: band,
            });
            rest = tail;
            cursor = top + height;
        }

        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/buffer/pixel_buffer.rs"]
mod tests;
