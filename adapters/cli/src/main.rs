#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Gridwalk experience.
//!
//! The binary assembles the world from the built-in map or a TOML map
//! file, then hands a tick closure to the macroquad backend: sampled keys
//! feed the edge-triggered tracker, held keys drive motion, and the ray
//! caster refills the scene's column spans before every present.

mod maps;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use gridwalk_core::{Color, KeyCode, KeyTransition, ScreenDimensions};
use gridwalk_rendering::{
    ColumnSpan, FrameInput, LoopControl, Presentation, RenderingBackend, Scene,
};
use gridwalk_rendering_macroquad::MacroquadBackend;
use gridwalk_system_input::KeyStateTracker;
use gridwalk_system_motion::{advance, MotionIntent};
use gridwalk_system_raycast::render_column;
use gridwalk_world::{Camera, WorldGrid};

const WINDOW_TITLE: &str = "Gridwalk";
const CLEAR_COLOR: Color = Color::new(0, 0, 0, 100);

/// First-person ray-cast renderer for walled grid worlds.
#[derive(Debug, Parser)]
#[command(name = "gridwalk")]
struct Args {
    /// Path to a TOML map file; the built-in map is used when omitted.
    #[arg(long)]
    map: Option<PathBuf>,
    /// Window width in pixels.
    #[arg(long, default_value_t = 960)]
    width: u32,
    /// Window height in pixels.
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Render without waiting for the display refresh rate.
    #[arg(long)]
    no_vsync: bool,
    /// Print frame timing metrics once per second.
    #[arg(long)]
    show_fps: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (grid, camera) = match &args.map {
        Some(path) => maps::load(path)
            .with_context(|| format!("failed to load map file {}", path.display()))?,
        None => maps::default_world().context("built-in map failed validation")?,
    };

    let screen =
        ScreenDimensions::new(args.width, args.height).context("invalid window dimensions")?;
    let presentation = Presentation::new(
        WINDOW_TITLE,
        CLEAR_COLOR,
        tracked_keys(),
        Scene::new(screen),
    );
    let backend = MacroquadBackend::new()
        .with_vsync(!args.no_vsync)
        .with_show_fps(args.show_fps);

    let mut tracker = KeyStateTracker::new();
    let mut camera = camera;
    backend.run(presentation, move |delta_time, input, scene| {
        frame_tick(&mut tracker, &mut camera, &grid, input, delta_time, scene)
    })
}

/// Keys the backend samples for the tracker every tick.
fn tracked_keys() -> Vec<KeyCode> {
    vec![
        KeyCode::W,
        KeyCode::A,
        KeyCode::S,
        KeyCode::D,
        KeyCode::ESCAPE,
    ]
}

/// Runs one tick: input edges, motion, then a full ray-cast of the scene.
///
/// Stop requests (platform quit or an escape down-edge) abandon the tick
/// before motion runs; the backend still finishes the frame boundary, so
/// the loop never stops mid-tick.
fn frame_tick(
    tracker: &mut KeyStateTracker,
    camera: &mut Camera,
    grid: &WorldGrid,
    input: &FrameInput,
    delta_time: Duration,
    scene: &mut Scene,
) -> LoopControl {
    let mut stop_requested = input.quit_requested;
    for sample in &input.key_samples {
        let transition = tracker.sample(sample.key, sample.is_down);
        if transition == KeyTransition::Pressed && sample.key == KeyCode::ESCAPE {
            stop_requested = true;
        }
    }
    if stop_requested {
        return LoopControl::Stop;
    }

    let intent = MotionIntent {
        forward: tracker.is_held(KeyCode::W),
        backward: tracker.is_held(KeyCode::S),
        rotate_left: tracker.is_held(KeyCode::A),
        rotate_right: tracker.is_held(KeyCode::D),
    };
    advance(camera, grid, intent, delta_time);

    scene.columns.clear();
    for column in 0..scene.screen.width() {
        if let Some(slice) = render_column(camera, grid, column, scene.screen) {
            scene
                .columns
                .push(ColumnSpan::new(column, slice.top, slice.bottom, slice.color));
        }
    }

    LoopControl::Continue
}
