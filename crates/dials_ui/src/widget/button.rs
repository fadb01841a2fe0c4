//! Push button.

use std::any::Any;

use super::core::{Widget, WidgetState};
use crate::canvas::Canvas;
use crate::input::Transition;
use crate::layout::{in_span, Point, Rect, CONTENT_CENTER, ROW_HEIGHT, TEXT_TOP};
use crate::style::{Highlight, Theme};

/// Left edge of the button face.
pub const BUTTON_LO: i32 = 120;
/// Right edge of the button face (inclusive).
pub const BUTTON_HI: i32 = 280;

/// A button that fires on release inside its face.
///
/// Pressing and dragging off the face before release cancels the click.
pub struct Button {
    state: WidgetState,
    text: String,
    highlight: Highlight,
    pressed: bool,
    on_click: Option<Box<dyn FnMut()>>,
}

impl Button {
    /// Creates a button.
    #[must_use]
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            state: WidgetState::new(label, ROW_HEIGHT),
            text: text.into(),
            highlight: Highlight::Neutral,
            pressed: false,
            on_click: None,
        }
    }

    /// Sets the click callback.
    #[must_use]
    pub fn on_click(mut self, callback: impl FnMut() + 'static) -> Self {
        self.set_on_click(callback);
        self
    }

    /// Replaces the click callback.
    pub fn set_on_click(&mut self, callback: impl FnMut() + 'static) {
        self.on_click = Some(Box::new(callback));
    }

    /// Text on the button face.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Changes the face text and schedules a redraw.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.state.mark_dirty();
    }

    /// Returns true while the button is held down.
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }
}

impl Widget for Button {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn handle(&mut self, x: i32, y: i32, transition: Transition) -> bool {
        let hit = self.state.band_contains(y) && in_span(x, BUTTON_LO, BUTTON_HI);
        let highlight = Highlight::resolve(transition, hit, self.pressed);

        if transition == Transition::Pressed && hit {
            self.pressed = true;
        }

        let capturing = self.pressed;
        if transition == Transition::Released {
            if self.pressed && hit {
                tracing::debug!(label = self.state.label(), "button clicked");
                if let Some(callback) = self.on_click.as_mut() {
                    callback();
                }
            }
            self.pressed = false;
        }

        if highlight != self.highlight {
            self.highlight = highlight;
            self.state.mark_dirty();
        }

        capturing
    }

    fn paint(&self, canvas: &mut dyn Canvas, theme: &Theme) {
        self.state.paint_label(canvas, theme, TEXT_TOP);
        let face = Rect::from_corners(BUTTON_LO, 0, BUTTON_HI, ROW_HEIGHT - 1);
        canvas.fill_rect(face, theme.fill(self.highlight));
        canvas.stroke_rect(face, theme.ink);
        let x = CONTENT_CENTER - canvas.measure_text_width(&self.text) / 2;
        canvas.text(Point::new(x, TEXT_TOP), &self.text, theme.ink);
    }

    fn is_capturing(&self) -> bool {
        self.pressed
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
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    fn counting_button() -> (Button, Rc<Cell<u32>>) {
        let clicks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&clicks);
        let mut button = Button::new("button", "go").on_click(move || counter.set(counter.get() + 1));
        button.state_mut().place(8);
        (button, clicks)
    }

    #[test]
    fn test_click_inside() {
        let (mut button, clicks) = counting_button();

        assert!(!button.handle(200, 10, Transition::None));
        assert!(button.handle(200, 10, Transition::Pressed));
        assert!(button.is_pressed());
        assert!(button.handle(210, 12, Transition::Held));
        assert!(button.handle(210, 12, Transition::Released));

        assert_eq!(clicks.get(), 1);
        assert!(!button.is_capturing());
    }

    #[test]
    fn test_drag_away_cancels() {
        let (mut button, clicks) = counting_button();

        button.handle(200, 10, Transition::Pressed);
        button.handle(350, 10, Transition::Held);
        assert!(button.handle(350, 10, Transition::Released));

        assert_eq!(clicks.get(), 0);
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_release_without_press_does_nothing() {
        let (mut button, clicks) = counting_button();

        assert!(!button.handle(200, 10, Transition::Released));
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn test_edges_are_inclusive() {
        let (mut button, clicks) = counting_button();

        button.handle(BUTTON_LO, 8, Transition::Pressed);
        button.handle(BUTTON_HI, 28, Transition::Released);
        assert_eq!(clicks.get(), 1);

        assert!(!button.handle(BUTTON_HI + 1, 10, Transition::Pressed));
    }

    #[test]
    fn test_set_text_marks_dirty() {
        let (mut button, _) = counting_button();
        button.state_mut().clear_dirty();
        button.set_text("apply");

        assert_eq!(button.text(), "apply");
        assert!(button.state().is_dirty());
    }
}
