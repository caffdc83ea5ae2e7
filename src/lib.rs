//! Tile extruder: pad every tile of a tileset with copies of its own edge pixels.
//!
//! Rendering tiles with bilinear filtering or at non-integer zoom samples pixels just outside a
//! tile's bounds. In a tight tileset those pixels belong to the neighboring tile, which shows up
//! as seams ("tile bleeding"). Extruding each tile by a pixel or two moves the neighbors away and
//! puts matching colors in the sampled border instead.
//!
//! # Pipeline overview
//!
//! 1. **Decode** (optional): encoded bytes or a file -> [`PixelBuffer`] ([`decode_tileset`],
//!    [`load_tileset`])
//! 2. **Solve**: image size + [`GridSpec`] -> [`TileGrid`] (whole number of columns and rows, or
//!    [`ExtrudeError::GridMismatch`])
//! 3. **Extrude**: [`extrude`] copies every tile body, its edge rings and its corner blocks into
//!    a fresh, larger buffer
//! 4. **Encode** (optional): [`PixelBuffer`] -> bytes or a file ([`encode_tileset`],
//!    [`save_tileset`])
//!
//! Only margin and spacing keep their size; each tile grows by `2 * extrusion` along both axes.
//!
//! ```
//! use tile_extruder::{ExtrusionSpec, GridSpec, PixelBuffer, Rgba8, extrude};
//!
//! let tileset = PixelBuffer::filled(32, 16, Rgba8::new(200, 40, 40, 255))?;
//! let out = extrude(&tileset, &GridSpec::new(16, 16), &ExtrusionSpec::new(1))?;
//! assert_eq!((out.width(), out.height()), (36, 18));
//! # Ok::<(), tile_extruder::ExtrudeError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod buffer;
mod config;
mod extrude;
mod foundation;
mod io;

pub use buffer::copy::{Region, copy_region, fill_region_with_pixel};
pub use buffer::pixel_buffer::{BYTES_PER_PIXEL, PixelBuffer};
pub use config::job::{ExtrudeJob, ResolvedJob};
pub use extrude::engine::{Threading, extrude, extrude_with};
pub use extrude::geometry::{TileGrid, TilePlacement};
pub use foundation::core::{ExtrusionSpec, GridSpec, Rgba8};
pub use foundation::error::{Axis, ExtrudeError, ExtrudeResult};
pub use io::codec::{decode_tileset, encode_tileset, guess_format, load_tileset, save_tileset};
pub use io::tileset::{
    default_output_path, extrude_encoded, extrude_tileset_to_bytes, extrude_tileset_to_image,
};
