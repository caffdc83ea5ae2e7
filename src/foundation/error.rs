use std::fmt;

/// Convenience result type used across the crate.
pub type ExtrudeResult<T> = Result<T, ExtrudeError>;

/// Grid axis a [`ExtrudeError::GridMismatch`] was detected on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Image width, tile width, columns.
    Horizontal,
    /// Image height, tile height, rows.
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => f.write_str("width"),
            Self::Vertical => f.write_str("height"),
        }
    }
}

impl Axis {
    fn count_noun(self) -> &'static str {
        match self {
            Self::Horizontal => "cols",
            Self::Vertical => "rows",
        }
    }
}

/// Top-level error taxonomy used by the extrusion APIs.
#[derive(thiserror::Error, Debug)]
pub enum ExtrudeError {
    /// The image dimensions do not decompose into a whole number of tiles.
    #[error(
        "grid mismatch: non-integer number of {} found for image {axis} {image_size} \
         (tile {axis} {tile_size}, margin {margin}, spacing {spacing}); \
         double check your margin, spacing, tile width and tile height",
        .axis.count_noun()
    )]
    GridMismatch {
        /// Axis on which the mismatch was found.
        axis: Axis,
        /// Image extent along `axis`.
        image_size: u32,
        /// Tile extent along `axis`.
        tile_size: u32,
        /// Margin from the image edge.
        margin: u32,
        /// Spacing between tiles.
        spacing: u32,
    },

    /// Parameters that can never describe a valid extrusion.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Raw pixel data whose length does not match its dimensions.
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize {
        /// Expected byte length (`width * height * 4`).
        expected: usize,
        /// Actual byte length.
        actual: usize,
    },

    /// A pixel copy touched coordinates outside a buffer.
    #[error("out of bounds: {0}")]
    OutOfBounds(String),

    /// Unreadable job file or color string.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ExtrudeError {
    /// Build an [`ExtrudeError::InvalidParameters`] value.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameters(msg.into())
    }

    /// Build an [`ExtrudeError::OutOfBounds`] value.
    pub fn out_of_bounds(msg: impl Into<String>) -> Self {
        Self::OutOfBounds(msg.into())
    }

    /// Build an [`ExtrudeError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// `true` for [`ExtrudeError::GridMismatch`].
    pub fn is_grid_mismatch(&self) -> bool {
        matches!(self, Self::GridMismatch { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
