//! Multi-way option selector with prev/next steppers.

use std::any::Any;

use super::core::{Widget, WidgetState};
use crate::canvas::Canvas;
use crate::error::{UiError, UiResult};
use crate::input::Transition;
use crate::layout::{in_span, Point, Rect, CONTENT_CENTER, ROW_HEIGHT, TEXT_TOP};
use crate::style::{Highlight, Theme};

const PREV_LO: i32 = 110;
const PREV_HI: i32 = 130;
const NEXT_LO: i32 = 270;
const NEXT_HI: i32 = 290;
const FRAME_LO: i32 = 140;
const FRAME_HI: i32 = 260;

/// One of the two stepper buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stepper {
    /// Select the previous option.
    Prev,
    /// Select the next option.
    Next,
}

impl Stepper {
    const fn span(self) -> (i32, i32) {
        match self {
            Self::Prev => (PREV_LO, PREV_HI),
            Self::Next => (NEXT_LO, NEXT_HI),
        }
    }

    const fn glyph(self) -> &'static str {
        match self {
            Self::Prev => "<",
            Self::Next => ">",
        }
    }
}

/// Selects one string out of a fixed, non-empty sequence.
///
/// Steps clamp at both ends; there is no wraparound.
pub struct Options {
    state: WidgetState,
    options: Vec<String>,
    selected: usize,
    prev_highlight: Highlight,
    next_highlight: Highlight,
    captured: Option<Stepper>,
    on_change: Option<Box<dyn FnMut(&str)>>,
}

impl Options {
    /// Creates a selector. An out-of-range `selected` is clamped to the last option.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::EmptyOptions`] if `options` is empty.
    pub fn new<I, T>(label: impl Into<String>, options: I, selected: usize) -> UiResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let label = label.into();
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        if options.is_empty() {
            return Err(UiError::EmptyOptions { label });
        }
        let selected = selected.min(options.len() - 1);
        Ok(Self {
            state: WidgetState::new(label, ROW_HEIGHT),
            options,
            selected,
            prev_highlight: Highlight::Neutral,
            next_highlight: Highlight::Neutral,
            captured: None,
            on_change: None,
        })
    }

    /// Sets the change callback.
    #[must_use]
    pub fn on_change(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.set_on_change(callback);
        self
    }

    /// Replaces the change callback.
    pub fn set_on_change(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// The selected option.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.options[self.selected]
    }

    /// Index of the selected option.
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    /// All options, in order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Selects `value` and schedules a redraw. Does not invoke the callback.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidOption`] if `value` is not one of the
    /// options; the selection is left unchanged.
    pub fn set_value(&mut self, value: &str) -> UiResult<()> {
        let index = self
            .options
            .iter()
            .position(|option| option == value)
            .ok_or_else(|| UiError::InvalidOption {
                value: value.to_string(),
            })?;
        self.selected = index;
        self.state.mark_dirty();
        Ok(())
    }

    /// Commits one step. Returns false, changing nothing, at either end.
    pub fn step(&mut self, stepper: Stepper) -> bool {
        let target = match stepper {
            Stepper::Prev => self.selected.checked_sub(1),
            Stepper::Next => Some(self.selected + 1).filter(|&i| i < self.options.len()),
        };
        let Some(index) = target else {
            return false;
        };

        self.selected = index;
        let value = &self.options[index];
        tracing::debug!(label = self.state.label(), value = %value, "option selected");
        if let Some(callback) = self.on_change.as_mut() {
            callback(value);
        }
        self.state.mark_dirty();
        true
    }

    fn hit(&self, stepper: Stepper, x: i32, y: i32) -> bool {
        let (lo, hi) = stepper.span();
        self.state.band_contains(y) && in_span(x, lo, hi)
    }

    fn highlight(&self, stepper: Stepper) -> Highlight {
        match stepper {
            Stepper::Prev => self.prev_highlight,
            Stepper::Next => self.next_highlight,
        }
    }
}

impl Widget for Options {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn handle(&mut self, x: i32, y: i32, transition: Transition) -> bool {
        let hit_prev = self.hit(Stepper::Prev, x, y);
        let hit_next = self.hit(Stepper::Next, x, y);
        let prev = Highlight::resolve(transition, hit_prev, self.captured == Some(Stepper::Prev));
        let next = Highlight::resolve(transition, hit_next, self.captured == Some(Stepper::Next));

        if transition == Transition::Pressed {
            if hit_prev {
                self.captured = Some(Stepper::Prev);
            } else if hit_next {
                self.captured = Some(Stepper::Next);
            }
        }

        let capturing = self.captured.is_some();
        if transition == Transition::Released {
            if let Some(stepper) = self.captured.take() {
                if self.hit(stepper, x, y) {
                    self.step(stepper);
                }
            }
        }

        if prev != self.prev_highlight || next != self.next_highlight {
            self.prev_highlight = prev;
            self.next_highlight = next;
            self.state.mark_dirty();
        }

        capturing
    }

    fn paint(&self, canvas: &mut dyn Canvas, theme: &Theme) {
        self.state.paint_label(canvas, theme, TEXT_TOP);

        let frame = Rect::from_corners(FRAME_LO, 0, FRAME_HI, ROW_HEIGHT - 1);
        canvas.fill_rect(frame, theme.neutral);
        canvas.stroke_rect(frame, theme.ink);

        for stepper in [Stepper::Prev, Stepper::Next] {
            let (lo, hi) = stepper.span();
            let rect = Rect::from_corners(lo, 0, hi, ROW_HEIGHT - 1);
            canvas.fill_rect(rect, theme.fill(self.highlight(stepper)));
            canvas.stroke_rect(rect, theme.ink);
            let glyph = stepper.glyph();
            let x = (lo + hi) / 2 - canvas.measure_text_width(glyph) / 2;
            canvas.text(Point::new(x, TEXT_TOP), glyph, theme.ink);
        }

        let value = self.value();
        let x = CONTENT_CENTER - canvas.measure_text_width(value) / 2;
        canvas.text(Point::new(x, TEXT_TOP), value, theme.ink);
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
