//! Map configuration for the Gridwalk binary.
//!
//! Worlds arrive either from the built-in default layout or from a TOML
//! map file. Both paths funnel through the same validation: the grid must
//! be enclosed and the camera must spawn inside a passable cell, so every
//! configuration error is reported before the frame loop starts.

use std::{error::Error, fmt, fs, io, path::{Path, PathBuf}};

use glam::DVec2;
use gridwalk_core::CellCode;
use gridwalk_world::{Camera, GridValidationError, WorldGrid};
use serde::Deserialize;

/// Start position used when a map does not define a camera.
pub(crate) const DEFAULT_SPAWN: DVec2 = DVec2::new(12.0, 12.0);
/// Facing direction used when a map does not define a camera.
pub(crate) const DEFAULT_DIRECTION: DVec2 = DVec2::new(-1.0, 0.0);
/// Camera plane used when a map does not define a camera.
pub(crate) const DEFAULT_PLANE: DVec2 = DVec2::new(0.0, 0.66);

/// Built-in 24x24 layout: a code-1 shell around a blue chamber with a
/// doorway, a solid green block, white pillars, and one strip of an
/// unlisted material that renders with the fallback color.
const DEFAULT_LAYOUT: [[i32; 24]; 24] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 3, 3, 3, 3, 3, 0, 0, 0, 0, 0, 2, 2, 2, 2, 2, 2, 0, 0, 0, 1],
    [1, 0, 0, 0, 3, 0, 0, 0, 3, 0, 0, 0, 0, 0, 2, 2, 2, 2, 2, 2, 0, 0, 0, 1],
    [1, 0, 0, 0, 3, 0, 0, 0, 3, 0, 0, 0, 0, 0, 2, 2, 2, 2, 2, 2, 0, 0, 0, 1],
    [1, 0, 0, 0, 3, 0, 0, 0, 3, 0, 0, 0, 0, 0, 2, 2, 2, 2, 2, 2, 0, 0, 0, 1],
    [1, 0, 0, 0, 3, 3, 0, 3, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 4, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 5, 5, 5, 5, 5, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 4, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// Errors produced while loading a world configuration.
#[derive(Debug)]
pub(crate) enum MapFileError {
    /// The map file could not be read from disk.
    Read {
        /// Path of the file that failed to read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// The file is not valid TOML for the map schema.
    Parse(toml::de::Error),
    /// The number of rows does not match the declared height.
    RowCountMismatch {
        /// Declared grid height.
        expected: u32,
        /// Number of rows actually supplied.
        actual: usize,
    },
    /// A row's length does not match the declared width.
    RowWidthMismatch {
        /// Zero-based index of the offending row.
        row: usize,
        /// Declared grid width.
        expected: u32,
        /// Number of cells actually supplied in the row.
        actual: usize,
    },
    /// The assembled grid failed world validation.
    InvalidGrid(GridValidationError),
    /// The camera would spawn inside a blocked cell.
    SpawnBlocked {
        /// Configured spawn X coordinate.
        x: f64,
        /// Configured spawn Y coordinate.
        y: f64,
    },
}

impl fmt::Display for MapFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read map file {}: {source}", path.display())
            }
            Self::Parse(source) => write!(f, "malformed map file: {source}"),
            Self::RowCountMismatch { expected, actual } => {
                write!(f, "expected {expected} rows but received {actual}")
            }
            Self::RowWidthMismatch {
                row,
                expected,
                actual,
            } => {
                write!(f, "row {row} holds {actual} cells but the grid is {expected} wide")
            }
            Self::InvalidGrid(source) => write!(f, "invalid grid: {source}"),
            Self::SpawnBlocked { x, y } => {
                write!(f, "camera spawn ({x}, {y}) lands inside a blocked cell")
            }
        }
    }
}

impl Error for MapFileError {}

#[derive(Debug, Deserialize)]
struct MapFile {
    grid: GridSection,
    camera: Option<CameraSection>,
}

#[derive(Debug, Deserialize)]
struct GridSection {
    width: u32,
    height: u32,
    rows: Vec<Vec<i32>>,
}

#[derive(Debug, Deserialize)]
struct CameraSection {
    position: [f64; 2],
    direction: [f64; 2],
    plane: [f64; 2],
}

/// Builds the built-in world and its default camera.
pub(crate) fn default_world() -> Result<(WorldGrid, Camera), MapFileError> {
    let cells = DEFAULT_LAYOUT
        .iter()
        .flat_map(|row| row.iter().copied().map(CellCode::new))
        .collect();
    let grid = WorldGrid::new(24, 24, cells).map_err(MapFileError::InvalidGrid)?;
    let camera = Camera::new(DEFAULT_SPAWN, DEFAULT_DIRECTION, DEFAULT_PLANE);
    validate_spawn(&grid, &camera)?;
    Ok((grid, camera))
}

/// Loads and validates a TOML map file.
pub(crate) fn load(path: &Path) -> Result<(WorldGrid, Camera), MapFileError> {
    let text = fs::read_to_string(path).map_err(|source| MapFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}

fn parse(text: &str) -> Result<(WorldGrid, Camera), MapFileError> {
    let file: MapFile = toml::from_str(text).map_err(MapFileError::Parse)?;
    let GridSection {
        width,
        height,
        rows,
    } = file.grid;

    if rows.len() != height as usize {
        return Err(MapFileError::RowCountMismatch {
            expected: height,
            actual: rows.len(),
        });
    }

    let mut cells = Vec::with_capacity(width as usize * height as usize);
    for (index, row) in rows.iter().enumerate() {
        if row.len() != width as usize {
            return Err(MapFileError::RowWidthMismatch {
                row: index,
                expected: width,
                actual: row.len(),
            });
        }
        cells.extend(row.iter().copied().map(CellCode::new));
    }

    let grid = WorldGrid::new(width, height, cells).map_err(MapFileError::InvalidGrid)?;
    let camera = match file.camera {
        Some(section) => Camera::new(
            DVec2::from(section.position),
            DVec2::from(section.direction),
            DVec2::from(section.plane),
        ),
        None => Camera::new(DEFAULT_SPAWN, DEFAULT_DIRECTION, DEFAULT_PLANE),
    };
    validate_spawn(&grid, &camera)?;
    Ok((grid, camera))
}

fn validate_spawn(grid: &WorldGrid, camera: &Camera) -> Result<(), MapFileError> {
    let (x, y) = (camera.position.x, camera.position.y);
    if grid.is_passable(x as i32, y as i32) {
        Ok(())
    } else {
        Err(MapFileError::SpawnBlocked { x, y })
    }
}
