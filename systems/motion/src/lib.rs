#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Camera motion integration for Gridwalk.
//!
//! Translation and rotation are Euler-integrated from the held-key state
//! and the tick's delta time. Translation is axis-separated: the X
//! component commits only if its destination cell is passable, then the Y
//! component is checked against the possibly-updated position. Rotation
//! applies the identical angle to the direction and plane vectors so the
//! pose established at initialization is preserved.

use std::time::Duration;

use glam::DVec2;
use gridwalk_world::{Camera, WorldGrid};

/// Linear speed in grid cells per second.
pub const MOVE_SPEED_CELLS_PER_SECOND: f64 = 5.0;

/// Angular speed in radians per second.
pub const ROTATION_RADIANS_PER_SECOND: f64 = 3.0;

/// Held-key movement state gathered for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MotionIntent {
    /// Move along the facing direction.
    pub forward: bool,
    /// Move against the facing direction.
    pub backward: bool,
    /// Rotate counter-clockwise.
    pub rotate_left: bool,
    /// Rotate clockwise.
    pub rotate_right: bool,
}

/// Advances the camera pose by one tick.
///
/// The update is atomic from the caller's perspective: the caster only
/// reads the camera after this returns. Forward translation is evaluated
/// before backward when both are held; large delta times produce
/// proportionally large single steps, including steps that cross more than
/// one cell in a tick.
pub fn advance(camera: &mut Camera, grid: &WorldGrid, intent: MotionIntent, delta_time: Duration) {
    let seconds = delta_time.as_secs_f64();
    let move_step = MOVE_SPEED_CELLS_PER_SECOND * seconds;
    let rotation_step = ROTATION_RADIANS_PER_SECOND * seconds;

    if intent.forward {
        translate(camera, grid, camera.direction * move_step);
    }
    if intent.backward {
        translate(camera, grid, -(camera.direction * move_step));
    }
    if intent.rotate_right {
        rotate(camera, -rotation_step);
    }
    if intent.rotate_left {
        rotate(camera, rotation_step);
    }
}

fn translate(camera: &mut Camera, grid: &WorldGrid, delta: DVec2) {
    let target_x = camera.position.x + delta.x;
    if grid.is_passable(target_x as i32, camera.position.y as i32) {
        camera.position.x = target_x;
    }

    let target_y = camera.position.y + delta.y;
    if grid.is_passable(camera.position.x as i32, target_y as i32) {
        camera.position.y = target_y;
    }
}

fn rotate(camera: &mut Camera, angle: f64) {
    let (sin, cos) = angle.sin_cos();

    let direction = camera.direction;
    camera.direction = DVec2::new(
        direction.x * cos - direction.y * sin,
        direction.x * sin + direction.y * cos,
    );

    let plane = camera.plane;
    camera.plane = DVec2::new(
        plane.x * cos - plane.y * sin,
        plane.x * sin + plane.y * cos,
    );
}
