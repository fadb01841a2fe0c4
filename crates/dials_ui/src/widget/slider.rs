//! Numeric slider.

use std::any::Any;

use super::core::{Widget, WidgetState};
use crate::canvas::Canvas;
use crate::input::Transition;
use crate::layout::{
    clamp_track, near, Point, Rect, TrackMapping, HANDLE_RADIUS, ROW_HEIGHT, TEXT_TOP, TRACK_HI,
    TRACK_LO, TRACK_Y, VALUE_TEXT_X,
};
use crate::style::{Highlight, Theme};

/// Decimals shown by a new slider.
pub const DEFAULT_PRECISION: usize = 2;

/// A horizontal slider over `[min, max]`.
///
/// The handle is dragged along the track; `on_change` fires once per new
/// handle pixel, not once per pointer sample.
pub struct Slider {
    state: WidgetState,
    mapping: TrackMapping,
    value: f64,
    handle_x: i32,
    precision: usize,
    highlight: Highlight,
    dragging: bool,
    on_change: Option<Box<dyn FnMut(f64)>>,
}

impl Slider {
    /// Creates a slider. `value` is clamped into `[min, max]`.
    #[must_use]
    pub fn new(label: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        let mapping = TrackMapping::new(min, max);
        let value = mapping.clamp_value(value);
        Self {
            state: WidgetState::new(label, ROW_HEIGHT),
            mapping,
            value,
            handle_x: mapping.pixel_for(value),
            precision: DEFAULT_PRECISION,
            highlight: Highlight::Neutral,
            dragging: false,
            on_change: None,
        }
    }

    /// Sets the change callback.
    #[must_use]
    pub fn on_change(mut self, callback: impl FnMut(f64) + 'static) -> Self {
        self.set_on_change(callback);
        self
    }

    /// Replaces the change callback.
    pub fn set_on_change(&mut self, callback: impl FnMut(f64) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Clamps and stores a value, moves the handle and schedules a redraw.
    ///
    /// Does not invoke the change callback.
    pub fn set_value(&mut self, value: f64) {
        self.value = self.mapping.clamp_value(value);
        self.handle_x = self.mapping.pixel_for(self.value);
        self.state.mark_dirty();
    }

    /// Current `(min, max)`.
    #[must_use]
    pub const fn limits(&self) -> (f64, f64) {
        (self.mapping.min(), self.mapping.max())
    }

    /// Changes the limits and schedules a redraw.
    ///
    /// The handle is placed from the current value under the new limits
    /// before the value itself is clamped into them.
    pub fn set_limits(&mut self, min: f64, max: f64) {
        self.mapping = TrackMapping::new(min, max);
        self.handle_x = self.mapping.pixel_for(self.value);
        self.value = self.mapping.clamp_value(self.value);
        self.state.mark_dirty();
    }

    /// Handle position on the track.
    #[must_use]
    pub const fn handle_x(&self) -> i32 {
        self.handle_x
    }

    /// Number of decimals in the value readout.
    #[must_use]
    pub const fn precision(&self) -> usize {
        self.precision
    }

    /// Changes the number of decimals in the value readout.
    pub fn set_precision(&mut self, precision: usize) {
        self.precision = precision;
        self.state.mark_dirty();
    }

    fn value_text(&self) -> String {
        format!("{:.*}", self.precision, self.value)
    }
}

impl Widget for Slider {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn handle(&mut self, x: i32, y: i32, transition: Transition) -> bool {
        let hit = self.state.band_contains(y) && near(x, self.handle_x, HANDLE_RADIUS);
        let highlight = Highlight::resolve(transition, hit, self.dragging);

        if transition == Transition::Pressed && hit {
            self.dragging = true;
        }

        if self.dragging {
            // Re-derive the pixel from the value so a zero span stays at the low end.
            let value = self.mapping.value_at(clamp_track(x));
            let pixel = self.mapping.pixel_for(value);
            if pixel != self.handle_x {
                self.handle_x = pixel;
                self.value = value;
                tracing::trace!(label = self.state.label(), value = self.value, "slider moved");
                if let Some(callback) = self.on_change.as_mut() {
                    callback(self.value);
                }
                self.state.mark_dirty();
            }
        }

        let capturing = self.dragging;
        if transition == Transition::Released {
            self.dragging = false;
        }

        if highlight != self.highlight {
            self.highlight = highlight;
            self.state.mark_dirty();
        }

        capturing
    }

    fn paint(&self, canvas: &mut dyn Canvas, theme: &Theme) {
        self.state.paint_label(canvas, theme, TEXT_TOP);
        canvas.line(Point::new(TRACK_LO, TRACK_Y), Point::new(TRACK_HI, TRACK_Y), theme.ink);
        let handle = Rect::from_corners(
            self.handle_x - HANDLE_RADIUS,
            0,
            self.handle_x + HANDLE_RADIUS,
            ROW_HEIGHT - 1,
        );
        canvas.fill_rect(handle, theme.fill(self.highlight));
        canvas.stroke_rect(handle, theme.ink);
        canvas.text(Point::new(VALUE_TEXT_X, TEXT_TOP), &self.value_text(), theme.ink);
    }

    fn is_capturing(&self) -> bool {
        self.dragging
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::canvas::PixelCanvas;

    fn placed(mut slider: Slider) -> Slider {
        slider.state_mut().place(0);
        slider.state_mut().clear_dirty();
        slider
    }

    #[test]
    fn test_construction_clamps() {
        let slider = Slider::new("value", -10.0, 200.0, 500.0);
        assert!((slider.value() - 200.0).abs() < f64::EPSILON);
        assert_eq!(slider.handle_x(), TRACK_HI);

        let slider = Slider::new("value", -10.0, 200.0, 10.0);
        assert_eq!(slider.handle_x(), 119);
    }

    #[test]
    fn test_degenerate_limits() {
        let slider = Slider::new("value", 5.0, 5.0, 9.0);
        assert!((slider.value() - 5.0).abs() < f64::EPSILON);
        assert_eq!(slider.handle_x(), TRACK_LO);
    }

    #[test]
    fn test_drag_to_end() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let mut slider =
            placed(Slider::new("value", -10.0, 200.0, 10.0).on_change(move |v| log.borrow_mut().push(v)));

        assert!(slider.handle(119, 10, Transition::Pressed));
        assert!(slider.handle(200, 10, Transition::Held));
        assert!(slider.handle(300, 40, Transition::Held));
        assert!(slider.handle(300, 40, Transition::Released));
        assert!(!slider.is_capturing());
        assert!(!slider.handle(300, 40, Transition::None));

        assert!((slider.value() - 200.0).abs() < f64::EPSILON);
        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!((seen[1] - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_duplicate_pixels_do_not_notify() {
        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);
        let mut slider =
            placed(Slider::new("value", 0.0, 1.0, 0.0).on_change(move |_| *counter.borrow_mut() += 1));

        slider.handle(100, 5, Transition::Pressed);
        for x in [150, 150, 150, 160, 160, 400, 500] {
            slider.handle(x, 5, Transition::Held);
        }
        slider.handle(500, 5, Transition::Released);

        assert_eq!(*count.borrow(), 3);
    }

    #[test]
    fn test_zero_span_drag_stays_pinned() {
        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);
        let mut slider =
            placed(Slider::new("value", 5.0, 5.0, 5.0).on_change(move |_| *counter.borrow_mut() += 1));

        assert!(slider.handle(100, 5, Transition::Pressed));
        for x in [250, 260, 400, 20] {
            assert!(slider.handle(x, 5, Transition::Held));
            assert_eq!(slider.handle_x(), TRACK_LO);
            assert_eq!(slider.handle_x(), slider.mapping.pixel_for(slider.value()));
        }
        assert!(slider.handle(260, 5, Transition::Released));

        assert!((slider.value() - 5.0).abs() < f64::EPSILON);
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_handle_tracks_value_while_dragging() {
        let mut slider = placed(Slider::new("value", -10.0, 200.0, 10.0));
        slider.handle(119, 5, Transition::Pressed);
        for x in [101, 150, 233, 299] {
            slider.handle(x, 5, Transition::Held);
            assert_eq!(slider.handle_x(), x);
            assert_eq!(slider.handle_x(), slider.mapping.pixel_for(slider.value()));
        }
    }

    #[test]
    fn test_press_off_handle_does_not_capture() {
        let mut slider = placed(Slider::new("value", 0.0, 1.0, 0.0));
        assert!(!slider.handle(200, 5, Transition::Pressed));
        assert!(!slider.handle(250, 5, Transition::Held));
        assert_eq!(slider.handle_x(), TRACK_LO);
    }

    #[test]
    fn test_idle_sample_keeps_clean() {
        let mut slider = placed(Slider::new("value", 0.0, 1.0, 0.0));
        slider.handle(350, 5, Transition::None);
        assert!(!slider.state().is_dirty());

        slider.handle(101, 5, Transition::None);
        assert!(slider.state().is_dirty());
        slider.state_mut().clear_dirty();
        slider.handle(102, 5, Transition::None);
        assert!(!slider.state().is_dirty());
    }

    #[test]
    fn test_set_limits_uses_old_value_for_handle() {
        let mut slider = Slider::new("value", 0.0, 100.0, 80.0);
        slider.set_limits(0.0, 50.0);

        assert_eq!(slider.handle_x(), TRACK_HI);
        assert!((slider.value() - 50.0).abs() < f64::EPSILON);
        assert_eq!(slider.limits(), (0.0, 50.0));
        assert!(slider.state().is_dirty());
    }

    #[test]
    fn test_set_value_clamps_without_callback() {
        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);
        let mut slider =
            placed(Slider::new("value", 0.0, 10.0, 0.0).on_change(move |_| *counter.borrow_mut() += 1));

        slider.set_value(-4.0);
        assert!(slider.value().abs() < f64::EPSILON);
        slider.set_value(5.0);
        assert_eq!(slider.handle_x(), 200);
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_active_highlight_while_dragging() {
        let mut slider = placed(Slider::new("value", 0.0, 1.0, 0.0));
        slider.handle(100, 5, Transition::Pressed);
        slider.handle(100, 5, Transition::Held);

        let mut canvas = PixelCanvas::new(400, ROW_HEIGHT);
        slider.paint(&mut canvas, &Theme::default());
        assert_eq!(canvas.pixel(101, 15), Some(Theme::default().active));
    }

    #[test]
    fn test_precision_readout() {
        let mut slider = Slider::new("value", 0.0, 1.0, 0.5);
        assert_eq!(slider.value_text(), "0.50");
        slider.set_precision(0);
        assert_eq!(slider.value_text(), "0");
    }
}
