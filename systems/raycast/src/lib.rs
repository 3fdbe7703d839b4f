#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! DDA ray casting for Gridwalk.
//!
//! For every screen column a ray is cast from the camera through the grid
//! using digital differential analysis: the ray advances one cell-boundary
//! crossing at a time along whichever axis has accumulated the smaller
//! distance, until it enters a wall cell. The perpendicular distance of
//! that hit (measured along the facing axis, not the ray's own length)
//! projects the wall into a vertical slice of the screen.

use glam::DVec2;
use gridwalk_core::{Axis, CellCode, Color, ScreenDimensions};
use gridwalk_world::{Camera, WorldGrid};

/// Vertical wall slice produced for a single screen column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallSlice {
    /// First row of the slice, clamped to the top of the screen.
    pub top: u32,
    /// Last row of the slice, clamped to the bottom of the screen.
    pub bottom: u32,
    /// Shaded wall color for the slice.
    pub color: Color,
}

/// Casts the ray for screen column `column` and projects the hit.
///
/// Returns `None` when the ray leaves the grid or exhausts the traversal
/// budget before striking a wall; callers render nothing for that column.
/// With an enclosed grid neither case is reachable, so this degrades only
/// on scaffolded or corrupted worlds.
#[must_use]
pub fn render_column(
    camera: &Camera,
    grid: &WorldGrid,
    column: u32,
    screen: ScreenDimensions,
) -> Option<WallSlice> {
    let camera_x = 2.0 * f64::from(column) / f64::from(screen.width()) - 1.0;
    let ray = camera.direction + camera.plane * camera_x;

    let mut map_x = camera.position.x as i32;
    let mut map_y = camera.position.y as i32;

    let step_x = if ray.x < 0.0 { -1 } else { 1 };
    let step_y = if ray.y < 0.0 { -1 } else { 1 };
    let delta = DVec2::new((1.0 / ray.x).abs(), (1.0 / ray.y).abs());

    let mut side_dist_x = if step_x == -1 {
        (camera.position.x - f64::from(map_x)) * delta.x
    } else {
        (f64::from(map_x) + 1.0 - camera.position.x) * delta.x
    };
    let mut side_dist_y = if step_y == -1 {
        (camera.position.y - f64::from(map_y)) * delta.y
    } else {
        (f64::from(map_y) + 1.0 - camera.position.y) * delta.y
    };

    let mut side = Axis::X;
    let budget = grid.traversal_budget();
    let mut hit = None;
    for _ in 0..budget {
        if side_dist_x < side_dist_y {
            side_dist_x += delta.x;
            map_x += step_x;
            side = Axis::X;
        } else {
            side_dist_y += delta.y;
            map_y += step_y;
            side = Axis::Y;
        }

        let code = grid.cell(map_x, map_y)?;
        if code.is_wall() {
            hit = Some(code);
            break;
        }
    }
    let hit = hit?;

    let wall_distance = match side {
        Axis::X => side_dist_x - delta.x,
        Axis::Y => side_dist_y - delta.y,
    };

    let line_height = (f64::from(screen.height()) / wall_distance) as i32;
    let half_screen = screen.height() as i32 / 2;
    let top = (-line_height / 2 + half_screen).max(0);
    let bottom = (line_height / 2 + half_screen).min(screen.height() as i32 - 1);

    Some(WallSlice {
        top: top as u32,
        bottom: bottom as u32,
        color: wall_color(hit, side),
    })
}

/// Selects and shades the color for a wall hit.
///
/// Materials 1 through 4 map to red, green, blue, and white; every other
/// code falls back to yellow. The color is then divided by the hit axis'
/// shading divisor, halving the brightness of Y-side hits.
#[must_use]
pub fn wall_color(code: CellCode, side: Axis) -> Color {
    let base = match code.get() {
        1 => Color::RED,
        2 => Color::GREEN,
        3 => Color::BLUE,
        4 => Color::WHITE,
        _ => Color::YELLOW,
    };
    base.scaled_by(side.shading_divisor())
}

#[cfg(test)]
mod tests {
    use super::wall_color;
    use gridwalk_core::{Axis, CellCode, Color};

    #[test]
    fn materials_map_to_their_palette_entries() {
        assert_eq!(wall_color(CellCode::new(1), Axis::X), Color::RED);
        assert_eq!(wall_color(CellCode::new(2), Axis::X), Color::GREEN);
        assert_eq!(wall_color(CellCode::new(3), Axis::X), Color::BLUE);
        assert_eq!(wall_color(CellCode::new(4), Axis::X), Color::WHITE);
    }

    #[test]
    fn unlisted_materials_fall_back_to_yellow() {
        assert_eq!(wall_color(CellCode::new(9), Axis::X), Color::YELLOW);
        assert_eq!(wall_color(CellCode::new(-3), Axis::X), Color::YELLOW);
    }

    #[test]
    fn y_side_hits_are_half_as_bright() {
        let full = wall_color(CellCode::new(3), Axis::X);
        let halved = wall_color(CellCode::new(3), Axis::Y);
        assert_eq!(full, Color::BLUE);
        assert_eq!(halved, Color::BLUE.scaled_by(2));
        assert_eq!(halved, Color::new(0, 0, 127, 100));
    }

    #[test]
    fn shading_leaves_gamma_untouched() {
        assert_eq!(wall_color(CellCode::new(2), Axis::Y).gamma(), 100);
    }
}
