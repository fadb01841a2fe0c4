//! Pointer input for widget interaction.
//!
//! The host samples the primary pointer button once per frame and reduces it
//! to a [`Transition`]: an edge/level code that every widget understands.

use serde::{Deserialize, Serialize};

use crate::error::UiError;

/// Discretized state of the primary pointer button for one sample.
///
/// Ordering follows the wire codes, so `transition < Transition::Held`
/// means "the button is not being held".
#[repr(u8)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Button up, no edge this sample.
    #[default]
    None = 0,
    /// Down-edge this sample.
    Pressed = 1,
    /// Still down.
    Held = 2,
    /// Up-edge this sample.
    Released = 3,
}

impl Transition {
    /// Returns the numeric code of this transition.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns true when hover highlighting applies (`None` or `Pressed`).
    #[inline]
    #[must_use]
    pub const fn is_hover_phase(self) -> bool {
        matches!(self, Self::None | Self::Pressed)
    }

    /// Derives a transition from the host's per-frame edge and level flags.
    ///
    /// Edges take precedence over the level, pressed over released.
    #[must_use]
    pub const fn from_flags(pressed: bool, released: bool, down: bool) -> Self {
        if pressed {
            Self::Pressed
        } else if released {
            Self::Released
        } else if down {
            Self::Held
        } else {
            Self::None
        }
    }
}

impl TryFrom<u8> for Transition {
    type Error = UiError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::None),
            1 => Ok(Self::Pressed),
            2 => Ok(Self::Held),
            3 => Ok(Self::Released),
            other => Err(UiError::InvalidTransition(other)),
        }
    }
}

impl From<Transition> for u8 {
    fn from(transition: Transition) -> Self {
        transition.code()
    }
}

/// One pointer sample in canvas coordinates (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Pointer X.
    pub x: i32,
    /// Pointer Y.
    pub y: i32,
    /// Button transition for this sample.
    #[serde(default)]
    pub transition: Transition,
}

impl PointerSample {
    /// Creates a new sample.
    #[must_use]
    pub const fn new(x: i32, y: i32, transition: Transition) -> Self {
        Self { x, y, transition }
    }

    /// Converts a window-space position with a bottom-left origin.
    #[must_use]
    pub const fn from_window(x: i32, y: i32, window_height: i32, transition: Transition) -> Self {
        Self::new(x, window_height - y - 1, transition)
    }
}

/// Turns level samples of the primary button into [`Transition`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonTracker {
    /// Button level at the previous sample.
    down: bool,
}

impl ButtonTracker {
    /// Creates a tracker with the button up.
    #[must_use]
    pub const fn new() -> Self {
        Self { down: false }
    }

    /// Feeds the current button level and returns the transition for it.
    pub fn sample(&mut self, down: bool) -> Transition {
        let was_down = std::mem::replace(&mut self.down, down);
        Transition::from_flags(down && !was_down, was_down && !down, down)
    }

    /// Returns true if the button was down at the last sample.
    #[must_use]
    pub const fn is_down(&self) -> bool {
        self.down
    }
}
