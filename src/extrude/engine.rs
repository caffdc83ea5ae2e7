use rayon::prelude::*;

use crate::{
    buffer::{
        copy::{Region, copy_region_into, fill_region_into},
        pixel_buffer::{PixelBuffer, RowsMut},
    },
    extrude::geometry::{TileGrid, TilePlacement},
    foundation::{
        core::{ExtrusionSpec, GridSpec},
        error::{ExtrudeError, ExtrudeResult},
    },
};

/// Threading controls for [`extrude_with`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Threading {
    /// Fill tile rows on a dedicated rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count (parallel mode only).
    pub threads: Option<usize>,
}

impl Threading {
    /// Parallel mode with rayon's default thread count.
    pub fn parallel() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }
}

/// Extrude every tile of `input` by `spec.extrusion` pixels.
///
/// Returns a new, larger buffer where each tile is surrounded by copies of its own edge pixels;
/// margin and spacing bands are filled with `spec.background`. `input` is never modified.
///
/// Fails with [`ExtrudeError::GridMismatch`] when the image does not hold a whole number of
/// tiles, before any allocation takes place.
pub fn extrude(
    input: &PixelBuffer,
    grid: &GridSpec,
    spec: &ExtrusionSpec,
) -> ExtrudeResult<PixelBuffer> {
    extrude_with(input, grid, spec, &Threading::default())
}

/// [`extrude`] with explicit threading. Output is identical in both modes.
#[tracing::instrument(
    skip(input, grid, spec),
    fields(width = input.width(), height = input.height(), extrusion = spec.extrusion)
)]
pub fn extrude_with(
    input: &PixelBuffer,
    grid: &GridSpec,
    spec: &ExtrusionSpec,
    threading: &Threading,
) -> ExtrudeResult<PixelBuffer> {
    let layout = TileGrid::solve(input.width(), input.height(), grid)?;
    let extrusion = spec.extrusion;
    let (out_width, out_height) = layout.output_size(extrusion)?;
    let pool = if threading.parallel {
        Some(build_thread_pool(threading.threads)?)
    } else {
        None
    };

    tracing::debug!(
        cols = layout.cols(),
        rows = layout.rows(),
        out_width,
        out_height,
        "solved tile grid"
    );

    let mut output = PixelBuffer::filled(out_width, out_height, spec.background)?;

    // Tile rows never share output rows, so each one gets its own band.
    let bands = (0..layout.rows())
        .map(|row| layout.row_band(row, extrusion))
        .collect::<Vec<_>>();
    let bands = output.rows_mut().split_bands(&bands)?;

    match pool {
        None => {
            for (row, mut band) in (0u32..).zip(bands) {
                extrude_tile_row(input, &layout, row, extrusion, &mut band)?;
            }
        }
        Some(pool) => pool.install(|| {
            bands
                .into_par_iter()
                .enumerate()
                .try_for_each(|(row, mut band)| {
                    extrude_tile_row(input, &layout, row as u32, extrusion, &mut band)
                })
        })?,
    }

    Ok(output)
}

fn extrude_tile_row(
    input: &PixelBuffer,
    layout: &TileGrid,
    row: u32,
    extrusion: u32,
    band: &mut RowsMut<'_>,
) -> ExtrudeResult<()> {
    tracing::trace!(row, top = band.top(), "extruding tile row");
    for col in 0..layout.cols() {
        let tile = layout.tile(row, col, extrusion);
        extrude_tile(input, layout.spec(), tile, extrusion, band)?;
    }
    Ok(())
}

/// Copy one tile body, then its edge rings, then its corner blocks.
fn extrude_tile(
    src: &PixelBuffer,
    grid: &GridSpec,
    tile: TilePlacement,
    e: u32,
    dst: &mut RowsMut<'_>,
) -> ExtrudeResult<()> {
    let (tw, th) = (grid.tile_width, grid.tile_height);
    let TilePlacement {
        src_x: sx,
        src_y: sy,
        dst_x: dx,
        dst_y: dy,
        ..
    } = tile;
    let (right, bottom) = (sx + tw - 1, sy + th - 1);

    copy_region_into(src, Region::new(sx, sy, tw, th), dst, dx + e, dy + e)?;

    // Ring `step` lies `e - step` pixels away from the body.
    for step in 0..e {
        let far = e - step - 1;
        copy_region_into(src, Region::new(sx, sy, tw, 1), dst, dx + e, dy + step)?;
        copy_region_into(
            src,
            Region::new(sx, bottom, tw, 1),
            dst,
            dx + e,
            dy + e + th + far,
        )?;
        copy_region_into(src, Region::new(sx, sy, 1, th), dst, dx + step, dy + e)?;
        copy_region_into(
            src,
            Region::new(right, sy, 1, th),
            dst,
            dx + e + tw + far,
            dy + e,
        )?;
    }

    fill_region_into(src, sx, sy, dst, Region::new(dx, dy, e, e))?;
    fill_region_into(src, right, sy, dst, Region::new(dx + e + tw, dy, e, e))?;
    fill_region_into(src, sx, bottom, dst, Region::new(dx, dy + e + th, e, e))?;
    fill_region_into(
        src,
        right,
        bottom,
        dst,
        Region::new(dx + e + tw, dy + e + th, e, e),
    )?;

    Ok(())
}

fn build_thread_pool(threads: Option<usize>) -> ExtrudeResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ExtrudeError::invalid(
            "extrusion threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ExtrudeError::invalid(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/extrude/engine.rs"]
mod tests;
