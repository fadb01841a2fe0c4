//! # DIALS UI
//!
//! Retained-mode settings widgets that draw into CPU pixel strips and push
//! them into one shared texture:
//! - Slider, Button, Options and ColorSlider
//! - One pointer capture at a time, drag-outside semantics
//! - Redraw only when something visible changed
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        PANEL PIPELINE                         │
//! ├──────────────────────────────────────────────────────────────┤
//! │  PointerSample → Settings → Widget::handle → flush            │
//! │        ↓             ↓             ↓            ↓             │
//! │   Transition    Focus/Capture  Dirty flag   PixelCanvas →     │
//! │                                             TextureSink       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use dials_ui::{CpuTexture, Settings, Slider, Transition, Widget, WidgetId};
//!
//! let widgets: Vec<Box<dyn Widget>> = vec![Box::new(Slider::new("value", 0.0, 1.0, 0.0))];
//! let mut settings = Settings::new(widgets, CpuTexture::new(400, 600));
//!
//! settings.mouse(100, 10, Transition::Pressed);
//! settings.mouse(300, 10, Transition::Held);
//! settings.mouse(300, 10, Transition::Released);
//!
//! let slider = settings.get::<Slider>(WidgetId(0)).unwrap();
//! assert!((slider.value() - 1.0).abs() < f64::EPSILON);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod canvas;
pub mod config;
pub mod error;
pub mod input;
pub mod layout;
pub mod render;
pub mod settings;
pub mod style;
pub mod texture;
pub mod widget;

pub use canvas::{Canvas, PixelCanvas};
pub use config::{PanelConfig, WidgetSpec};
pub use error::{UiError, UiResult};
pub use input::{ButtonTracker, PointerSample, Transition};
pub use layout::{Point, Rect, TrackMapping};
pub use render::{overlay_quad, OverlayVertex};
pub use settings::Settings;
pub use style::{Highlight, Rgb8, Theme};
pub use texture::{CpuTexture, TextureRegion, TextureSink};
pub use widget::{Button, ColorSlider, Options, Slider, Stepper, Widget, WidgetId, WidgetState};

#[cfg(feature = "gpu")]
pub use render::GpuTexture;
