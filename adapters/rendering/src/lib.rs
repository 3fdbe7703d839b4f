#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Gridwalk adapters.
//!
//! A backend owns the window, the clock, and the raw input devices. Once
//! per tick it samples the keys the presentation asked it to track, hands
//! the elapsed time and samples to the tick closure, draws whatever column
//! spans the closure left in the scene, and presents the frame. The
//! closure steers shutdown through [`LoopControl`]; the backend folds that
//! into the one-way [`FrameLoopState`] machine.

use anyhow::Result as AnyResult;
use gridwalk_core::{Color, KeyCode, ScreenDimensions};
use std::time::Duration;

/// Vertical line drawn for a single screen column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSpan {
    /// Zero-based screen column the span occupies.
    pub column: u32,
    /// First row of the span.
    pub top: u32,
    /// Last row of the span.
    pub bottom: u32,
    /// Color the span is drawn with.
    pub color: Color,
}

impl ColumnSpan {
    /// Creates a new column span descriptor.
    #[must_use]
    pub const fn new(column: u32, top: u32, bottom: u32, color: Color) -> Self {
        Self {
            column,
            top,
            bottom,
            color,
        }
    }
}

/// Scene content drawn by a backend each tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    /// Dimensions of the render target in pixels.
    pub screen: ScreenDimensions,
    /// Column spans to draw, refilled by the tick closure every frame.
    pub columns: Vec<ColumnSpan>,
}

impl Scene {
    /// Creates an empty scene for the provided render target.
    #[must_use]
    pub fn new(screen: ScreenDimensions) -> Self {
        Self {
            screen,
            columns: Vec::with_capacity(screen.width() as usize),
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Keys the backend samples into every [`FrameInput`].
    pub tracked_keys: Vec<KeyCode>,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, tracked_keys: Vec<KeyCode>, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            tracked_keys,
            scene,
        }
    }
}

/// Raw down-state of a single tracked key at the start of a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeySample {
    /// Key the sample describes.
    pub key: KeyCode,
    /// Whether the key is down at the moment of sampling.
    pub is_down: bool,
}

impl KeySample {
    /// Creates a new key sample.
    #[must_use]
    pub const fn new(key: KeyCode, is_down: bool) -> Self {
        Self { key, is_down }
    }
}

/// Input snapshot gathered by a backend before running the tick closure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Whether the platform requested that the application quit.
    pub quit_requested: bool,
    /// One sample per tracked key the backend could observe.
    pub key_samples: Vec<KeySample>,
}

/// Decision returned by the tick closure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    /// Keep running and present the frame.
    Continue,
    /// Exit after this tick completes; never mid-tick.
    Stop,
}

/// One-way frame-loop state machine.
///
/// The loop starts `Running` and transitions to `Stopped` exactly once; no
/// control value can restart a stopped loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameLoopState {
    /// The loop is ticking.
    Running,
    /// The loop has exited or is exiting after the current tick.
    Stopped,
}

impl FrameLoopState {
    /// Folds a tick decision into the state.
    #[must_use]
    pub const fn apply(self, control: LoopControl) -> Self {
        match (self, control) {
            (Self::Running, LoopControl::Continue) => Self::Running,
            _ => Self::Stopped,
        }
    }

    /// Reports whether the loop should keep ticking.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Rendering backend capable of presenting Gridwalk scenes.
pub trait RenderingBackend {
    /// Runs the frame loop until the closure requests a stop or the
    /// platform quits.
    ///
    /// The `tick` closure receives the measured frame delta, the sampled
    /// input, and the mutable scene; it refills the scene's column spans
    /// and returns the [`LoopControl`] decision for this tick.
    fn run<F>(self, presentation: Presentation, tick: F) -> AnyResult<()>
    where
        F: FnMut(Duration, &FrameInput, &mut Scene) -> LoopControl + 'static;
}
