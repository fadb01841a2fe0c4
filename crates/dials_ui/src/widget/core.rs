//! Core widget types and traits.

use std::any::Any;

use crate::canvas::{Canvas, PixelCanvas};
use crate::input::Transition;
use crate::layout::{in_band, Point, LABEL_RIGHT};
use crate::style::Theme;
use crate::texture::{TextureRegion, TextureSink};

/// Index of a widget inside its [`Settings`](crate::settings::Settings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WidgetId(pub usize);

impl WidgetId {
    /// Creates a new widget ID.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// State shared by every widget: label, vertical placement and the
/// redraw flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetState {
    label: String,
    top: i32,
    height: i32,
    dirty: bool,
}

impl WidgetState {
    /// Creates state for a widget of the given height. New widgets start dirty.
    #[must_use]
    pub fn new(label: impl Into<String>, height: i32) -> Self {
        Self {
            label: label.into(),
            top: 0,
            height,
            dirty: true,
        }
    }

    /// Label text, without the trailing colon.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Changes the label and schedules a redraw.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.dirty = true;
    }

    /// Top edge in panel coordinates.
    #[must_use]
    pub const fn top(&self) -> i32 {
        self.top
    }

    /// Strip height.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Moves the strip and schedules a redraw.
    pub fn place(&mut self, top: i32) {
        self.top = top;
        self.dirty = true;
    }

    /// Returns true if `y` lies in this widget's band.
    #[inline]
    #[must_use]
    pub const fn band_contains(&self, y: i32) -> bool {
        in_band(y, self.top, self.height)
    }

    /// Returns true if `y` lies in row `top + offset .. top + offset + height`.
    #[inline]
    #[must_use]
    pub const fn row_contains(&self, y: i32, offset: i32, height: i32) -> bool {
        in_band(y, self.top + offset, height)
    }

    /// Region of the shared texture this widget owns.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn texture_region(&self, width: i32) -> TextureRegion {
        TextureRegion::new(
            0,
            self.top.max(0) as u32,
            width.max(0) as u32,
            self.height.max(0) as u32,
        )
    }

    /// Schedules a redraw.
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns true if a redraw is pending.
    #[inline]
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears the pending redraw.
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Paints `label:` right-aligned to the label column, with its top at `y`.
    pub fn paint_label(&self, canvas: &mut dyn Canvas, theme: &Theme, y: i32) {
        let text = format!("{}:", self.label);
        let x = LABEL_RIGHT - canvas.measure_text_width(&text);
        canvas.text(Point::new(x, y), &text, theme.ink);
    }
}

/// Base trait for all widgets.
///
/// `handle` mutates state and marks the widget dirty when its look changed;
/// painting and uploading happen later, in [`Widget::redraw`].
pub trait Widget: Any {
    /// Returns the widget's state.
    fn state(&self) -> &WidgetState;

    /// Returns mutable access to the widget's state.
    fn state_mut(&mut self) -> &mut WidgetState;

    /// Feeds one pointer sample in panel coordinates.
    ///
    /// Returns true if the widget held the pointer capture during this call.
    /// A `Released` sample that ends a capture still returns true.
    fn handle(&mut self, x: i32, y: i32, transition: Transition) -> bool;

    /// Paints the strip in local coordinates (origin at the strip's top-left).
    fn paint(&self, canvas: &mut dyn Canvas, theme: &Theme);

    /// Returns true while a sub-control is captured.
    fn is_capturing(&self) -> bool;

    /// Upcast for typed access.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed access.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Top edge in panel coordinates.
    fn top(&self) -> i32 {
        self.state().top()
    }

    /// Strip height.
    fn height(&self) -> i32 {
        self.state().height()
    }

    /// Label text, without the trailing colon.
    fn label(&self) -> &str {
        self.state().label()
    }

    /// Changes the label and schedules a redraw.
    fn set_label(&mut self, label: &str) {
        self.state_mut().set_label(label);
    }

    /// Returns true if `y` lies in this widget's band.
    fn band_contains(&self, y: i32) -> bool {
        self.state().band_contains(y)
    }

    /// Region of the shared texture this widget owns.
    fn texture_region(&self) -> TextureRegion {
        self.state().texture_region(crate::layout::PANEL_WIDTH)
    }

    /// Repaints the strip onto `surface` and pushes it to `sink`.
    fn redraw(&mut self, surface: &mut PixelCanvas, theme: &Theme, sink: &mut dyn TextureSink) {
        surface.clear(theme.background);
        self.paint(surface, theme);
        sink.write(surface.as_bytes(), self.texture_region());
        self.state_mut().clear_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_dirty() {
        let mut state = WidgetState::new("value", 21);
        assert!(state.is_dirty());
        state.clear_dirty();
        state.set_label("speed");
        assert!(state.is_dirty());
        assert_eq!(state.label(), "speed");
    }

    #[test]
    fn test_band_and_region() {
        let mut state = WidgetState::new("value", 21);
        state.place(8);

        assert!(state.band_contains(8));
        assert!(state.band_contains(28));
        assert!(!state.band_contains(29));
        assert!(state.row_contains(30, 22, 21));
        assert_eq!(state.texture_region(400), TextureRegion::new(0, 8, 400, 21));
    }

    #[test]
    fn test_label_right_aligned() {
        let state = WidgetState::new("ab", 21);
        let mut canvas = PixelCanvas::new(400, 21);
        state.paint_label(&mut canvas, &Theme::default(), 6);

        let inked: Vec<i32> = (0..400)
            .filter(|&x| (6..14).any(|y| canvas.pixel(x, y) == Some(Theme::default().ink)))
            .collect();
        assert!(inked.first().is_some_and(|&x| x >= LABEL_RIGHT - 24));
        assert!(inked.last().is_some_and(|&x| x < LABEL_RIGHT));
    }
}
