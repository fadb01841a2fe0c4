//! Three-channel RGB slider with a colour swatch.

use std::any::Any;

use super::core::{Widget, WidgetState};
use crate::canvas::{Canvas, GLYPH_HEIGHT};
use crate::input::Transition;
use crate::layout::{
    clamp_track, near, Point, Rect, TrackMapping, COLOR_HEIGHT, HANDLE_RADIUS, ROW_HEIGHT,
    ROW_PITCH, TEXT_TOP, TRACK_HI, TRACK_LO, TRACK_Y, VALUE_TEXT_X,
};
use crate::style::{Highlight, Rgb8, Theme};

const SWATCH: Rect = Rect::from_corners(348, 12, 388, 52);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Channel {
    value: u8,
    handle_x: i32,
    highlight: Highlight,
}

impl Channel {
    fn new(value: u8) -> Self {
        Self {
            value,
            handle_x: TrackMapping::CHANNEL.pixel_for(f64::from(value)),
            highlight: Highlight::Neutral,
        }
    }
}

/// Row offset of channel `index` within the strip.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn row_offset(index: usize) -> i32 {
    index as i32 * ROW_PITCH
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel_at(pixel: i32) -> u8 {
    TrackMapping::CHANNEL.value_at(pixel).round().clamp(0.0, 255.0) as u8
}

/// Red, green and blue sliders over `[0, 255]`, stacked 22px apart.
pub struct ColorSlider {
    state: WidgetState,
    channels: [Channel; 3],
    captured: Option<usize>,
    on_change: Option<Box<dyn FnMut(Rgb8)>>,
}

impl ColorSlider {
    /// Creates a colour slider. Channels are clamped into `0..=255`.
    #[must_use]
    pub fn new(label: impl Into<String>, (r, g, b): (i32, i32, i32)) -> Self {
        let color = Rgb8::clamped(r, g, b);
        Self {
            state: WidgetState::new(label, COLOR_HEIGHT),
            channels: color.to_array().map(Channel::new),
            captured: None,
            on_change: None,
        }
    }

    /// Sets the change callback.
    #[must_use]
    pub fn on_change(mut self, callback: impl FnMut(Rgb8) + 'static) -> Self {
        self.set_on_change(callback);
        self
    }

    /// Replaces the change callback.
    pub fn set_on_change(&mut self, callback: impl FnMut(Rgb8) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Current colour.
    #[must_use]
    pub fn value(&self) -> Rgb8 {
        let [r, g, b] = self.channels.map(|channel| channel.value);
        Rgb8::new(r, g, b)
    }

    /// Sets the colour, moves the handles and schedules a redraw.
    /// Does not invoke the change callback.
    pub fn set_value(&mut self, color: Rgb8) {
        for (channel, value) in self.channels.iter_mut().zip(color.to_array()) {
            *channel = Channel {
                highlight: channel.highlight,
                ..Channel::new(value)
            };
        }
        self.state.mark_dirty();
    }

    /// Handle positions of the red, green and blue channels.
    #[must_use]
    pub fn handles(&self) -> [i32; 3] {
        self.channels.map(|channel| channel.handle_x)
    }

    fn hit(&self, index: usize, x: i32, y: i32) -> bool {
        self.state.row_contains(y, row_offset(index), ROW_HEIGHT)
            && near(x, self.channels[index].handle_x, HANDLE_RADIUS)
    }
}

impl Widget for ColorSlider {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn handle(&mut self, x: i32, y: i32, transition: Transition) -> bool {
        let hits = [0, 1, 2].map(|index| self.hit(index, x, y));
        let mut changed = false;

        for (index, &hit) in hits.iter().enumerate() {
            let highlight = Highlight::resolve(transition, hit, self.captured == Some(index));
            if highlight != self.channels[index].highlight {
                self.channels[index].highlight = highlight;
                changed = true;
            }
        }

        if transition == Transition::Pressed {
            if let Some(index) = hits.iter().position(|&hit| hit) {
                self.captured = Some(index);
            }
        }

        if let Some(index) = self.captured {
            let value = channel_at(clamp_track(x));
            let pixel = TrackMapping::CHANNEL.pixel_for(f64::from(value));
            let channel = &mut self.channels[index];
            if pixel != channel.handle_x {
                channel.handle_x = pixel;
                channel.value = value;
                let color = self.value();
                tracing::trace!(label = self.state.label(), %color, "colour moved");
                if let Some(callback) = self.on_change.as_mut() {
                    callback(color);
                }
                changed = true;
            }
        }

        let capturing = self.captured.is_some();
        if transition == Transition::Released {
            self.captured = None;
        }

        if changed {
            self.state.mark_dirty();
        }

        capturing
    }

    fn paint(&self, canvas: &mut dyn Canvas, theme: &Theme) {
        self.state.paint_label(canvas, theme, (COLOR_HEIGHT - GLYPH_HEIGHT) / 2);

        for (index, channel) in self.channels.iter().enumerate() {
            let top = row_offset(index);
            canvas.line(
                Point::new(TRACK_LO, top + TRACK_Y),
                Point::new(TRACK_HI, top + TRACK_Y),
                theme.ink,
            );
            let handle = Rect::from_corners(
                channel.handle_x - HANDLE_RADIUS,
                top,
                channel.handle_x + HANDLE_RADIUS,
                top + ROW_HEIGHT - 1,
            );
            canvas.fill_rect(handle, theme.fill(channel.highlight));
            canvas.stroke_rect(handle, theme.ink);
            canvas.text(
                Point::new(VALUE_TEXT_X, top + TEXT_TOP),
                &channel.value.to_string(),
                theme.ink,
            );
        }

        canvas.fill_rect(SWATCH, self.value());
        canvas.stroke_rect(SWATCH, theme.ink);
    }

    fn is_capturing(&self) -> bool {
        self.captured.is_some()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
