#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Gridwalk.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in containerised CI environments. To
//! keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature; the renderer never plays sound anyway.
//!
//! The backend owns the window, the frame clock, and the raw keyboard.
//! Each tick it samples the presentation's tracked keys, runs the tick
//! closure, draws the scene's column spans, and presents the frame. The
//! window close button is routed through `prevent_quit` so a quit request
//! reaches the closure as input and the loop still exits at a tick
//! boundary rather than mid-tick.

use std::time::{Duration, Instant};

use anyhow::Result;
use gridwalk_core::{Color, KeyCode};
use gridwalk_rendering::{
    FrameInput, FrameLoopState, KeySample, LoopControl, Presentation, RenderingBackend, Scene,
};
use macroquad::{
    color::Color as MacroquadColor,
    input::{is_key_down, is_quit_requested, prevent_quit, KeyCode as MacroquadKeyCode},
    shapes::draw_line,
    window::{clear_background, next_frame, Conf},
};

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the
    /// platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the
    /// display refresh rate or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints frame timing metrics once per
    /// second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

/// Wall-clock frame timer measuring the delta between ticks.
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    /// Starts the clock at the current instant.
    #[must_use]
    pub fn start() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Returns the elapsed time since the previous tick and resets.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        elapsed
    }
}

/// Per-tick timing sample fed to the FPS counter.
#[derive(Clone, Copy, Debug, Default)]
struct FrameBreakdown {
    frame: Duration,
    simulation: Duration,
    render: Duration,
}

/// Averages frame timings and emits metrics once per second.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    simulation_accum: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    avg_simulation: Duration,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns averaged metrics once a full
    /// second has elapsed.
    fn record_frame(&mut self, breakdown: FrameBreakdown) -> Option<FpsMetrics> {
        self.elapsed += breakdown.frame;
        self.frames = self.frames.saturating_add(1);
        self.simulation_accum += breakdown.simulation;
        self.render_accum += breakdown.render;

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let frames = self.frames.max(1);
        let metrics = FpsMetrics {
            per_second: self.frames as f32 / seconds,
            avg_simulation: self.simulation_accum / frames,
            avg_render: self.render_accum / frames,
        };

        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.simulation_accum = Duration::ZERO;
        self.render_accum = Duration::ZERO;
        Some(metrics)
    }
}

fn to_macroquad_color(color: Color) -> MacroquadColor {
    MacroquadColor::new(
        color.red() as f32 / 255.0,
        color.green() as f32 / 255.0,
        color.blue() as f32 / 255.0,
        color.gamma() as f32 / 100.0,
    )
}

fn to_macroquad_key(key: KeyCode) -> Option<MacroquadKeyCode> {
    match key {
        KeyCode::W => Some(MacroquadKeyCode::W),
        KeyCode::A => Some(MacroquadKeyCode::A),
        KeyCode::S => Some(MacroquadKeyCode::S),
        KeyCode::D => Some(MacroquadKeyCode::D),
        KeyCode::ESCAPE => Some(MacroquadKeyCode::Escape),
        _ => None,
    }
}

fn sample_input(tracked_keys: &[KeyCode]) -> FrameInput {
    let key_samples = tracked_keys
        .iter()
        .filter_map(|&key| {
            to_macroquad_key(key).map(|mapped| KeySample::new(key, is_key_down(mapped)))
        })
        .collect();

    FrameInput {
        quit_requested: is_quit_requested(),
        key_samples,
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut tick: F) -> Result<()>
    where
        F: FnMut(Duration, &FrameInput, &mut Scene) -> LoopControl + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            tracked_keys,
            scene,
        } = presentation;

        let mut config = Conf {
            window_title,
            window_width: scene.screen.width() as i32,
            window_height: scene.screen.height() as i32,
            ..Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            prevent_quit();

            let background = to_macroquad_color(clear_color);
            let mut scene = scene;
            let mut clock = FrameClock::start();
            let mut fps_counter = FpsCounter::default();
            let mut state = FrameLoopState::Running;

            while state.is_running() {
                let delta_time = clock.tick();
                let frame_input = sample_input(&tracked_keys);

                let simulation_started = Instant::now();
                let control = tick(delta_time, &frame_input, &mut scene);
                let simulation = simulation_started.elapsed();

                let render_started = Instant::now();
                clear_background(background);
                for span in &scene.columns {
                    // Center the unit-thick line on its pixel column.
                    let x = span.column as f32 + 0.5;
                    draw_line(
                        x,
                        span.top as f32,
                        x,
                        span.bottom as f32 + 1.0,
                        1.0,
                        to_macroquad_color(span.color),
                    );
                }
                let render = render_started.elapsed();

                if show_fps {
                    let breakdown = FrameBreakdown {
                        frame: delta_time,
                        simulation,
                        render,
                    };
                    if let Some(metrics) = fps_counter.record_frame(breakdown) {
                        println!(
                            "fps {:.1} | simulation {:.2?} | render {:.2?}",
                            metrics.per_second, metrics.avg_simulation, metrics.avg_render
                        );
                    }
                }

                state = state.apply(control);
                next_frame().await;
            }
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{to_macroquad_color, to_macroquad_key, FpsCounter, FrameBreakdown, FrameClock};
    use gridwalk_core::{Color, KeyCode};
    use macroquad::input::KeyCode as MacroquadKeyCode;
    use std::time::Duration;

    #[test]
    fn colors_convert_to_unit_range_channels() {
        let converted = to_macroquad_color(Color::new(255, 0, 127, 100));
        assert!((converted.r - 1.0).abs() < f32::EPSILON);
        assert!(converted.g.abs() < f32::EPSILON);
        assert!((converted.b - 127.0 / 255.0).abs() < f32::EPSILON);
        assert!((converted.a - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn bound_keys_map_to_macroquad_codes() {
        assert_eq!(to_macroquad_key(KeyCode::W), Some(MacroquadKeyCode::W));
        assert_eq!(to_macroquad_key(KeyCode::A), Some(MacroquadKeyCode::A));
        assert_eq!(to_macroquad_key(KeyCode::S), Some(MacroquadKeyCode::S));
        assert_eq!(to_macroquad_key(KeyCode::D), Some(MacroquadKeyCode::D));
        assert_eq!(
            to_macroquad_key(KeyCode::ESCAPE),
            Some(MacroquadKeyCode::Escape)
        );
        assert_eq!(to_macroquad_key(KeyCode::new(0xfffe)), None);
    }

    #[test]
    fn the_frame_clock_resets_on_every_tick() {
        let mut clock = FrameClock::start();
        std::thread::sleep(Duration::from_millis(5));
        let first = clock.tick();
        assert!(first >= Duration::from_millis(5));
        let second = clock.tick();
        assert!(second < first);
    }

    #[test]
    fn fps_metrics_are_emitted_once_per_second_and_reset() {
        let mut counter = FpsCounter::default();
        let breakdown = FrameBreakdown {
            frame: Duration::from_millis(250),
            simulation: Duration::from_millis(10),
            render: Duration::from_millis(20),
        };

        for _ in 0..3 {
            assert!(counter.record_frame(breakdown).is_none());
        }
        let metrics = counter
            .record_frame(breakdown)
            .expect("a full second elapsed");
        assert!((metrics.per_second - 4.0).abs() < 0.01);
        assert_eq!(metrics.avg_simulation, Duration::from_millis(10));
        assert_eq!(metrics.avg_render, Duration::from_millis(20));

        // The accumulators restart after emitting.
        assert!(counter.record_frame(breakdown).is_none());
    }
}
