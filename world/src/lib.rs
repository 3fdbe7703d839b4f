#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for Gridwalk.
//!
//! The world consists of two values: an immutable [`WorldGrid`] validated at
//! construction, and the mutable [`Camera`] pose advanced once per tick by
//! the motion system. Validation guarantees the grid is fully enclosed by
//! walls, which makes every per-tick bounds risk structurally impossible:
//! no ray and no movement check can escape the grid once it exists.

use std::{error::Error, fmt};

use glam::DVec2;
use gridwalk_core::CellCode;

/// Errors detected while validating a grid configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridValidationError {
    /// Width or height was zero.
    EmptyGrid {
        /// Requested number of columns.
        width: u32,
        /// Requested number of rows.
        height: u32,
    },
    /// The supplied cell array does not match the requested dimensions.
    CellCountMismatch {
        /// Number of cells implied by the dimensions.
        expected: usize,
        /// Number of cells actually supplied.
        actual: usize,
    },
    /// A perimeter cell is passable, leaving the interior unenclosed.
    OpenPerimeter {
        /// Column of the offending cell.
        x: u32,
        /// Row of the offending cell.
        y: u32,
    },
}

impl fmt::Display for GridValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { width, height } => {
                write!(f, "grid dimensions must be nonzero (received {width}x{height})")
            }
            Self::CellCountMismatch { expected, actual } => {
                write!(f, "expected {expected} cells but received {actual}")
            }
            Self::OpenPerimeter { x, y } => {
                write!(f, "perimeter cell ({x}, {y}) is passable; the grid must be enclosed by walls")
            }
        }
    }
}

impl Error for GridValidationError {}

/// Immutable 2D grid of cell codes addressed as `(x, y)`.
///
/// Cells are stored row-major: the cell at `(x, y)` lives at index
/// `y * width + x`. Construction validates that the dimensions are nonzero,
/// that the cell array matches them, and that every perimeter cell is a
/// wall.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldGrid {
    width: u32,
    height: u32,
    cells: Vec<CellCode>,
}

impl WorldGrid {
    /// Creates a grid after validating the supplied configuration.
    pub fn new(width: u32, height: u32, cells: Vec<CellCode>) -> Result<Self, GridValidationError> {
        if width == 0 || height == 0 {
            return Err(GridValidationError::EmptyGrid { width, height });
        }

        let expected = usize::try_from(u64::from(width) * u64::from(height))
            .unwrap_or(usize::MAX);
        if cells.len() != expected {
            return Err(GridValidationError::CellCountMismatch {
                expected,
                actual: cells.len(),
            });
        }

        let grid = Self {
            width,
            height,
            cells,
        };
        grid.validate_perimeter()?;
        Ok(grid)
    }

    /// Creates a grid without validating enclosure or dimensions.
    ///
    /// Available to tests that need to exercise the degraded traversal
    /// paths an enclosed grid makes unreachable.
    #[cfg(feature = "grid_scaffolding")]
    #[must_use]
    pub fn with_unvalidated_cells(width: u32, height: u32, cells: Vec<CellCode>) -> Self {
        Self {
            width,
            height,
            cells,
        }
    }

    fn validate_perimeter(&self) -> Result<(), GridValidationError> {
        for x in 0..self.width {
            for y in [0, self.height - 1] {
                if self.cell_at(x, y).is_passable() {
                    return Err(GridValidationError::OpenPerimeter { x, y });
                }
            }
        }
        for y in 0..self.height {
            for x in [0, self.width - 1] {
                if self.cell_at(x, y).is_passable() {
                    return Err(GridValidationError::OpenPerimeter { x, y });
                }
            }
        }
        Ok(())
    }

    fn cell_at(&self, x: u32, y: u32) -> CellCode {
        let index = y as usize * self.width as usize + x as usize;
        self.cells[index]
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns the cell code at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<CellCode> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cell_at(x, y))
    }

    /// Reports whether `(x, y)` can be entered; out-of-grid cells cannot.
    #[must_use]
    pub fn is_passable(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).map_or(false, |code| code.is_passable())
    }

    /// Upper bound on traversal steps before a ray is abandoned.
    ///
    /// Twice the sum of both extents over-approximates the cell crossings
    /// of any straight path through the grid.
    #[must_use]
    pub fn traversal_budget(&self) -> u32 {
        self.width.saturating_add(self.height).saturating_mul(2)
    }
}

/// Player pose: position, facing direction, and camera plane.
///
/// The plane vector encodes the field of view and is only ever rotated
/// jointly with the direction vector, by the identical angle in the same
/// tick; it is never re-derived from the direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Position in grid space, real-valued within the grid extents.
    pub position: DVec2,
    /// Facing direction. Norm-preserving rotation keeps its length fixed.
    pub direction: DVec2,
    /// Camera plane spanning the field of view, rotated in lockstep with
    /// the direction.
    pub plane: DVec2,
}

impl Camera {
    /// Creates a camera at the provided start pose.
    #[must_use]
    pub const fn new(position: DVec2, direction: DVec2, plane: DVec2) -> Self {
        Self {
            position,
            direction,
            plane,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Camera, GridValidationError, WorldGrid};
    use glam::DVec2;
    use gridwalk_core::CellCode;

    fn enclosed_cells(width: u32, height: u32) -> Vec<CellCode> {
        let mut cells = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                cells.push(if border {
                    CellCode::new(1)
                } else {
                    CellCode::EMPTY
                });
            }
        }
        cells
    }

    #[test]
    fn construction_rejects_zero_dimensions() {
        assert_eq!(
            WorldGrid::new(0, 4, Vec::new()),
            Err(GridValidationError::EmptyGrid {
                width: 0,
                height: 4
            })
        );
    }

    #[test]
    fn construction_rejects_mismatched_cell_counts() {
        assert_eq!(
            WorldGrid::new(3, 3, vec![CellCode::new(1); 8]),
            Err(GridValidationError::CellCountMismatch {
                expected: 9,
                actual: 8
            })
        );
    }

    #[test]
    fn construction_rejects_open_perimeters() {
        let mut cells = enclosed_cells(4, 4);
        cells[1] = CellCode::EMPTY;
        assert_eq!(
            WorldGrid::new(4, 4, cells),
            Err(GridValidationError::OpenPerimeter { x: 1, y: 0 })
        );
    }

    #[test]
    fn enclosed_grids_construct_and_answer_queries() {
        let grid = WorldGrid::new(4, 3, enclosed_cells(4, 3)).expect("enclosed grid");
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.cell(0, 0), Some(CellCode::new(1)));
        assert_eq!(grid.cell(1, 1), Some(CellCode::EMPTY));
        assert!(grid.is_passable(1, 1));
        assert!(!grid.is_passable(0, 1));
    }

    #[test]
    fn out_of_grid_coordinates_read_as_blocked() {
        let grid = WorldGrid::new(4, 4, enclosed_cells(4, 4)).expect("enclosed grid");
        assert_eq!(grid.cell(-1, 2), None);
        assert_eq!(grid.cell(2, 4), None);
        assert!(!grid.is_passable(-1, 2));
        assert!(!grid.is_passable(4, 2));
    }

    #[test]
    fn traversal_budget_covers_any_straight_crossing() {
        let grid = WorldGrid::new(24, 24, enclosed_cells(24, 24)).expect("enclosed grid");
        assert_eq!(grid.traversal_budget(), 96);
        assert!(grid.traversal_budget() > grid.width() + grid.height());
    }

    #[test]
    fn camera_holds_the_configured_start_pose() {
        let camera = Camera::new(
            DVec2::new(12.0, 12.0),
            DVec2::new(-1.0, 0.0),
            DVec2::new(0.0, 0.66),
        );
        assert_eq!(camera.position, DVec2::new(12.0, 12.0));
        assert_eq!(camera.direction, DVec2::new(-1.0, 0.0));
        assert_eq!(camera.plane, DVec2::new(0.0, 0.66));
    }
}
