use crate::foundation::{
    core::GridSpec,
    error::{Axis, ExtrudeError, ExtrudeResult},
};

/// A tileset grid solved against concrete image dimensions.
///
/// Along each axis the image satisfies
/// `size == 2 * margin + (count - 1) * spacing + count * tile`, with `count` an exact integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileGrid {
    spec: GridSpec,
    width: u32,
    height: u32,
    cols: u32,
    rows: u32,
}

/// Where one tile is read from and where its extruded cell is written to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TilePlacement {
    /// Tile row.
    pub row: u32,
    /// Tile column.
    pub col: u32,
    /// Left edge of the tile in the input image.
    pub src_x: u32,
    /// Top edge of the tile in the input image.
    pub src_y: u32,
    /// Left edge of the extruded cell (tile plus border) in the output image.
    pub dst_x: u32,
    /// Top edge of the extruded cell in the output image.
    pub dst_y: u32,
}

impl TileGrid {
    /// Solve for the number of columns and rows of `spec` in a `width x height` image.
    ///
    /// Fails with [`ExtrudeError::InvalidParameters`] for zero-sized tiles and with
    /// [`ExtrudeError::GridMismatch`] when either axis does not hold a whole number of tiles.
    pub fn solve(width: u32, height: u32, spec: &GridSpec) -> ExtrudeResult<Self> {
        spec.validate()?;

        let cols = solve_axis(width, spec.tile_width, spec.margin, spec.spacing).ok_or(
            ExtrudeError::GridMismatch {
                axis: Axis::Horizontal,
                image_size: width,
                tile_size: spec.tile_width,
                margin: spec.margin,
                spacing: spec.spacing,
            },
        )?;
        let rows = solve_axis(height, spec.tile_height, spec.margin, spec.spacing).ok_or(
            ExtrudeError::GridMismatch {
                axis: Axis::Vertical,
                image_size: height,
                tile_size: spec.tile_height,
                margin: spec.margin,
                spacing: spec.spacing,
            },
        )?;

        Ok(Self {
            spec: *spec,
            width,
            height,
            cols,
            rows,
        })
    }

    /// The grid this was solved from.
    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// Number of tile columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of tile rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of tiles.
    pub fn tile_count(&self) -> u64 {
        u64::from(self.cols) * u64::from(self.rows)
    }

    /// Input image dimensions.
    pub fn input_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Output image dimensions after inflating every tile by `extrusion` on each side.
    ///
    /// Margin and spacing keep their size; only tiles grow.
    pub fn output_size(&self, extrusion: u32) -> ExtrudeResult<(u32, u32)> {
        let width = inflate_axis(self.width, self.cols, extrusion).ok_or_else(|| {
            ExtrudeError::invalid(format!(
                "extruded width overflows: {} cols of {} px extruded by {extrusion}",
                self.cols, self.spec.tile_width
            ))
        })?;
        let height = inflate_axis(self.height, self.rows, extrusion).ok_or_else(|| {
            ExtrudeError::invalid(format!(
                "extruded height overflows: {} rows of {} px extruded by {extrusion}",
                self.rows, self.spec.tile_height
            ))
        })?;
        Ok((width, height))
    }

    /// Source and destination corners of tile `(row, col)`.
    ///
    /// Only meaningful for `row < rows()`, `col < cols()` and an `extrusion` accepted by
    /// [`TileGrid::output_size`]; every coordinate then fits in the output image.
    pub fn tile(&self, row: u32, col: u32, extrusion: u32) -> TilePlacement {
        let GridSpec {
            tile_width,
            tile_height,
            margin,
            spacing,
        } = self.spec;
        TilePlacement {
            row,
            col,
            src_x: cell_start(margin, col, tile_width, spacing, 0),
            src_y: cell_start(margin, row, tile_height, spacing, 0),
            dst_x: cell_start(margin, col, tile_width, spacing, extrusion),
            dst_y: cell_start(margin, row, tile_height, spacing, extrusion),
        }
    }

    /// All tiles, row by row.
    pub fn tiles(&self, extrusion: u32) -> impl Iterator<Item = TilePlacement> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.cols).map(move |col| self.tile(row, col, extrusion)))
    }

    /// Output rows `(top, height)` covered by the extruded cells of tile row `row`.
    pub(crate) fn row_band(&self, row: u32, extrusion: u32) -> (u32, u32) {
        let top = cell_start(
            self.spec.margin,
            row,
            self.spec.tile_height,
            self.spec.spacing,
            extrusion,
        );
        let height = u64::from(self.spec.tile_height) + 2 * u64::from(extrusion);
        (top, height as u32)
    }
}

/// Solve `size == 2 * margin + (count - 1) * spacing + count * tile` for an integer `count`.
fn solve_axis(size: u32, tile: u32, margin: u32, spacing: u32) -> Option<u32> {
    let numer = (u64::from(size) + u64::from(spacing)).checked_sub(2 * u64::from(margin))?;
    let denom = u64::from(tile) + u64::from(spacing);
    if numer % denom != 0 {
        return None;
    }
    u32::try_from(numer / denom).ok()
}

/// `2 * margin + (count - 1) * spacing + count * (tile + 2 * extrusion)`, which simplifies to
/// the input size plus `2 * extrusion` per tile.
fn inflate_axis(size: u32, count: u32, extrusion: u32) -> Option<u32> {
    let grow = u64::from(count).checked_mul(2 * u64::from(extrusion))?;
    u32::try_from(u64::from(size).checked_add(grow)?).ok()
}

fn cell_start(margin: u32, index: u32, tile: u32, spacing: u32, extrusion: u32) -> u32 {
    let stride = u64::from(tile) + u64::from(spacing) + 2 * u64::from(extrusion);
    // Bounded by the output size for in-range indices.
    (u64::from(margin) + u64::from(index) * stride) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/extrude/geometry.rs"]
mod tests;
