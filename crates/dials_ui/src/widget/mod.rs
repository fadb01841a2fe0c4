//! Widget system for panel controls.
//!
//! Every widget is a fixed-width strip with its own pointer state machine.
//! The [`Settings`](crate::settings::Settings) container stacks them and
//! routes pointer samples to one of them at a time.

mod button;
mod color;
mod core;
mod options;
mod slider;

pub use button::Button;
pub use color::ColorSlider;
pub use self::core::{Widget, WidgetId, WidgetState};
pub use options::{Options, Stepper};
pub use slider::{Slider, DEFAULT_PRECISION};
