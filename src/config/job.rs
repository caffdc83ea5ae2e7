use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    extrude::engine::Threading,
    foundation::{
        core::{ExtrusionSpec, GridSpec, Rgba8},
        error::{ExtrudeError, ExtrudeResult},
    },
    io::tileset::default_output_path,
};

/// A saved extrusion job, typically read from JSON.
///
/// Every field is optional so a job file can hold just the settings shared by several tilesets;
/// command-line flags fill in or override the rest. [`ExtrudeJob::resolve`] checks that the
/// required values ended up present.
///
/// ```json
/// { "input": "tiles.png", "tile_width": 16, "tile_height": 16, "margin": 5, "spacing": 10,
///   "extrusion": 2, "color": "0xffffff00" }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtrudeJob {
    /// Tileset image to read.
    #[serde(default)]
    pub input: Option<PathBuf>,
    /// Where to write the result. Defaults to `<input>_extruded.<ext>`.
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Tile width in pixels.
    #[serde(default)]
    pub tile_width: Option<u32>,
    /// Tile height in pixels.
    #[serde(default)]
    pub tile_height: Option<u32>,
    /// Pixels between the image edge and the tiles.
    #[serde(default)]
    pub margin: Option<u32>,
    /// Pixels between neighboring tiles.
    #[serde(default)]
    pub spacing: Option<u32>,
    /// Pixels to extrude each tile edge by.
    #[serde(default)]
    pub extrusion: Option<u32>,
    /// Background for margin and spacing.
    #[serde(default)]
    pub color: Option<Rgba8>,
    /// Fill tile rows in parallel.
    #[serde(default)]
    pub parallel: Option<bool>,
    /// Worker thread count for parallel mode.
    #[serde(default)]
    pub threads: Option<usize>,
}

/// A fully specified job, ready to run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedJob {
    /// Tileset image to read.
    pub input: PathBuf,
    /// Where to write the result.
    pub output: PathBuf,
    /// Input grid.
    pub grid: GridSpec,
    /// Extrusion amount and background.
    pub extrusion: ExtrusionSpec,
    /// Threading controls.
    pub threading: Threading,
}

impl ExtrudeJob {
    /// Read a JSON job file.
    pub fn from_path(path: impl AsRef<Path>) -> ExtrudeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ExtrudeError::config(format!("open job file '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
            .map_err(|e| ExtrudeError::config(format!("{}: {e}", path.display())))
    }

    /// Parse a JSON job.
    pub fn from_reader(r: impl Read) -> ExtrudeResult<Self> {
        serde_json::from_reader(r).map_err(|e| ExtrudeError::config(format!("parse job JSON: {e}")))
    }

    /// Values set in `overrides` win over values set in `self`.
    pub fn merged_with(self, overrides: ExtrudeJob) -> Self {
        Self {
            input: overrides.input.or(self.input),
            output: overrides.output.or(self.output),
            tile_width: overrides.tile_width.or(self.tile_width),
            tile_height: overrides.tile_height.or(self.tile_height),
            margin: overrides.margin.or(self.margin),
            spacing: overrides.spacing.or(self.spacing),
            extrusion: overrides.extrusion.or(self.extrusion),
            color: overrides.color.or(self.color),
            parallel: overrides.parallel.or(self.parallel),
            threads: overrides.threads.or(self.threads),
        }
    }

    /// The grid described by this job.
    pub fn grid(&self) -> ExtrudeResult<GridSpec> {
        let tile_width = self.tile_width.ok_or_else(|| missing("tile width", "--tile-width"))?;
        let tile_height = self
            .tile_height
            .ok_or_else(|| missing("tile height", "--tile-height"))?;
        let grid = GridSpec {
            tile_width,
            tile_height,
            margin: self.margin.unwrap_or(0),
            spacing: self.spacing.unwrap_or(0),
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Check that everything needed is present and fill in defaults.
    pub fn resolve(&self) -> ExtrudeResult<ResolvedJob> {
        let grid = self.grid()?;
        let input = self
            .input
            .clone()
            .ok_or_else(|| missing("path to tileset image", "--input"))?;
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&input));

        let defaults = ExtrusionSpec::default();
        Ok(ResolvedJob {
            input,
            output,
            grid,
            extrusion: ExtrusionSpec {
                extrusion: self.extrusion.unwrap_or(defaults.extrusion),
                background: self.color.unwrap_or(defaults.background),
            },
            threading: Threading {
                parallel: self.parallel.unwrap_or(false),
                threads: self.threads,
            },
        })
    }
}

fn missing(what: &str, flag: &str) -> ExtrudeError {
    ExtrudeError::config(format!("missing {what}; pass {flag} or set it in the job file"))
}

#[cfg(test)]
#[path = "../../tests/unit/config/job.rs"]
mod tests;
