#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core vocabulary shared across the Gridwalk engine.
//!
//! This crate defines the value types that connect the authoritative world,
//! the pure systems, and the adapters: grid cell codes, key codes and their
//! edge-triggered transitions, screen dimensions, traversal axes, and the
//! clamped integer color model used by the ray caster. Nothing in here
//! performs I/O or owns mutable state.

use std::{error::Error, fmt};

/// Code stored in a single grid cell.
///
/// Zero marks a passable cell. Any nonzero code blocks movement and
/// terminates ray traversal; positive codes double as wall material
/// identifiers used for color selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellCode(i32);

impl CellCode {
    /// The passable cell code.
    pub const EMPTY: Self = Self(0);

    /// Creates a cell code from its raw numeric value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Retrieves the raw numeric value of the code.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }

    /// Reports whether the cell can be entered by the camera.
    #[must_use]
    pub const fn is_passable(&self) -> bool {
        self.0 == 0
    }

    /// Reports whether the cell terminates ray traversal.
    #[must_use]
    pub const fn is_wall(&self) -> bool {
        self.0 != 0
    }
}

/// Grid axis crossed by a traversal step.
///
/// The terminating axis of a ray determines wall shading: X-side hits keep
/// full brightness while Y-side hits are rendered at half intensity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The horizontal grid axis.
    X,
    /// The vertical grid axis.
    Y,
}

impl Axis {
    /// Divisor applied to wall colors hit on this axis.
    #[must_use]
    pub const fn shading_divisor(self) -> i32 {
        match self {
            Self::X => 1,
            Self::Y => 2,
        }
    }
}

/// Platform-agnostic identifier for a keyboard key.
///
/// Codes for printable keys follow their ASCII values; the escape key uses
/// the traditional code 27. Adapters translate these into whatever key
/// representation their windowing library exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyCode(u32);

impl KeyCode {
    /// The `W` key, bound to forward movement.
    pub const W: Self = Self(119);
    /// The `A` key, bound to counter-clockwise rotation.
    pub const A: Self = Self(97);
    /// The `S` key, bound to backward movement.
    pub const S: Self = Self(115);
    /// The `D` key, bound to clockwise rotation.
    pub const D: Self = Self(100);
    /// The escape key, bound to exiting the frame loop.
    pub const ESCAPE: Self = Self(27);

    /// Creates a key code from its raw numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the raw numeric value of the key code.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Edge event produced by sampling the current down-state of a key.
///
/// A key held across many polls yields `Pressed` exactly once, at the
/// down-edge, then `NoChange` until the matching up-edge yields `Released`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyTransition {
    /// The key went from released to pressed on this sample.
    Pressed,
    /// The key went from pressed to released on this sample.
    Released,
    /// The sample matches the previously recorded state.
    NoChange,
}

/// Validated pixel dimensions of the render target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScreenDimensions {
    width: u32,
    height: u32,
}

impl ScreenDimensions {
    /// Creates screen dimensions, rejecting degenerate zero-sized targets.
    pub const fn new(width: u32, height: u32) -> Result<Self, ScreenDimensionsError> {
        if width == 0 || height == 0 {
            return Err(ScreenDimensionsError::Empty { width, height });
        }
        Ok(Self { width, height })
    }

    /// Width of the render target in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the render target in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }
}

/// Errors produced when validating screen dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenDimensionsError {
    /// Width or height was zero.
    Empty {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
}

impl fmt::Display for ScreenDimensionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { width, height } => {
                write!(
                    f,
                    "screen dimensions must be nonzero (received {width}x{height})"
                )
            }
        }
    }
}

impl Error for ScreenDimensionsError {}

const fn clamp_channel(value: i32, min: i32, max: i32) -> i32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Clamped integer color with an intensity channel.
///
/// Red, green, and blue are held in `[0, 255]`; the gamma (intensity)
/// channel is held in `[0, 100]`. Every constructor and arithmetic
/// operation re-clamps its result, so channel values never escape their
/// ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    red: i32,
    green: i32,
    blue: i32,
    gamma: i32,
}

impl Color {
    /// Fully saturated red at full intensity.
    pub const RED: Self = Self::new(255, 0, 0, 100);
    /// Fully saturated green at full intensity.
    pub const GREEN: Self = Self::new(0, 255, 0, 100);
    /// Fully saturated blue at full intensity.
    pub const BLUE: Self = Self::new(0, 0, 255, 100);
    /// White at full intensity.
    pub const WHITE: Self = Self::new(255, 255, 255, 100);
    /// Fully saturated yellow at full intensity.
    pub const YELLOW: Self = Self::new(255, 255, 0, 100);

    /// Creates a color, clamping every channel into its valid range.
    #[must_use]
    pub const fn new(red: i32, green: i32, blue: i32, gamma: i32) -> Self {
        Self {
            red: clamp_channel(red, 0, 255),
            green: clamp_channel(green, 0, 255),
            blue: clamp_channel(blue, 0, 255),
            gamma: clamp_channel(gamma, 0, 100),
        }
    }

    /// Red channel in `[0, 255]`.
    #[must_use]
    pub const fn red(&self) -> i32 {
        self.red
    }

    /// Green channel in `[0, 255]`.
    #[must_use]
    pub const fn green(&self) -> i32 {
        self.green
    }

    /// Blue channel in `[0, 255]`.
    #[must_use]
    pub const fn blue(&self) -> i32 {
        self.blue
    }

    /// Gamma (intensity) channel in `[0, 100]`.
    #[must_use]
    pub const fn gamma(&self) -> i32 {
        self.gamma
    }

    /// Divides the red, green, and blue channels by the provided divisor.
    ///
    /// Division truncates and the result is re-clamped through the
    /// constructor. The gamma channel is passed through unscaled. A zero
    /// divisor is a defined no-op returning the original color.
    #[must_use]
    pub const fn scaled_by(self, divisor: i32) -> Self {
        if divisor == 0 {
            return self;
        }
        Self::new(
            self.red / divisor,
            self.green / divisor,
            self.blue / divisor,
            self.gamma,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Axis, CellCode, Color, KeyCode, ScreenDimensions, ScreenDimensionsError};

    #[test]
    fn cell_code_zero_is_passable_and_not_a_wall() {
        assert!(CellCode::EMPTY.is_passable());
        assert!(!CellCode::EMPTY.is_wall());
    }

    #[test]
    fn nonzero_cell_codes_block_rays_and_movement() {
        assert!(CellCode::new(3).is_wall());
        assert!(!CellCode::new(3).is_passable());
        assert!(CellCode::new(-2).is_wall());
        assert!(!CellCode::new(-2).is_passable());
    }

    #[test]
    fn axis_shading_divisors_differentiate_sides() {
        assert_eq!(Axis::X.shading_divisor(), 1);
        assert_eq!(Axis::Y.shading_divisor(), 2);
    }

    #[test]
    fn key_codes_follow_ascii_values() {
        assert_eq!(KeyCode::W.get(), u32::from(b'w'));
        assert_eq!(KeyCode::A.get(), u32::from(b'a'));
        assert_eq!(KeyCode::S.get(), u32::from(b's'));
        assert_eq!(KeyCode::D.get(), u32::from(b'd'));
        assert_eq!(KeyCode::ESCAPE.get(), 27);
    }

    #[test]
    fn color_construction_clamps_every_channel() {
        let color = Color::new(300, -5, 128, 250);
        assert_eq!(color.red(), 255);
        assert_eq!(color.green(), 0);
        assert_eq!(color.blue(), 128);
        assert_eq!(color.gamma(), 100);
    }

    #[test]
    fn clamping_an_already_clamped_color_is_idempotent() {
        let color = Color::new(12, 200, 255, 40);
        let reclamped = Color::new(color.red(), color.green(), color.blue(), color.gamma());
        assert_eq!(reclamped, color);
    }

    #[test]
    fn scaled_by_zero_returns_the_original_color() {
        let color = Color::new(90, 45, 10, 70);
        assert_eq!(color.scaled_by(0), color);
    }

    #[test]
    fn scaled_by_truncates_and_leaves_gamma_untouched() {
        let halved = Color::new(255, 0, 255, 100).scaled_by(2);
        assert_eq!(halved, Color::new(127, 0, 127, 100));
        assert_eq!(halved.gamma(), 100);
    }

    #[test]
    fn screen_dimensions_reject_zero_extents() {
        assert_eq!(
            ScreenDimensions::new(0, 600),
            Err(ScreenDimensionsError::Empty {
                width: 0,
                height: 600
            })
        );
        assert_eq!(
            ScreenDimensions::new(960, 0),
            Err(ScreenDimensionsError::Empty {
                width: 960,
                height: 0
            })
        );
        let screen = ScreenDimensions::new(960, 600).expect("valid dimensions");
        assert_eq!(screen.width(), 960);
        assert_eq!(screen.height(), 600);
    }
}
