//! The settings panel: stacks widgets and routes pointer samples.
//!
//! Routing rules:
//! 1. A widget that is capturing the pointer keeps receiving samples until
//!    it lets go, even when the pointer crosses a neighbour's band.
//! 2. Otherwise the first widget whose band contains `y` becomes focused
//!    and receives the sample.
//! 3. A sample outside every band reaches nobody.
//!
//! No widget receives the same sample twice. Every call ends with a flush
//! that repaints and uploads dirty widgets, so idle frames write nothing.

use crate::canvas::PixelCanvas;
use crate::config::PanelConfig;
use crate::error::UiResult;
use crate::input::{PointerSample, Transition};
use crate::layout::{GUTTER, PANEL_WIDTH};
use crate::style::Theme;
use crate::texture::TextureSink;
use crate::widget::{Widget, WidgetId};

struct Slot {
    widget: Box<dyn Widget>,
    surface: PixelCanvas,
}

/// An ordered stack of widgets sharing one texture.
pub struct Settings<S: TextureSink> {
    slots: Vec<Slot>,
    focused: Option<WidgetId>,
    theme: Theme,
    height: i32,
    sink: S,
}

impl<S: TextureSink> Settings<S> {
    /// Stacks `widgets` with the default gutter and theme, and draws them.
    pub fn new(widgets: Vec<Box<dyn Widget>>, sink: S) -> Self {
        Self::with_layout(widgets, sink, GUTTER, Theme::default())
    }

    /// Stacks `widgets` with `gutter` pixels above the first and between
    /// neighbours, and draws them.
    pub fn with_layout(widgets: Vec<Box<dyn Widget>>, sink: S, gutter: i32, theme: Theme) -> Self {
        let mut top = gutter;
        let slots = widgets
            .into_iter()
            .map(|mut widget| {
                widget.state_mut().place(top);
                top += widget.height() + gutter;
                let surface = PixelCanvas::new(PANEL_WIDTH, widget.height());
                Slot { widget, surface }
            })
            .collect();

        let mut settings = Self {
            slots,
            focused: None,
            theme,
            height: top,
            sink,
        };
        let drawn = settings.flush();
        tracing::debug!(widgets = drawn, height = settings.height, "settings panel stacked");
        settings
    }

    /// Builds the widgets described by `config` and stacks them.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout does not fit the configured texture
    /// or a widget description is invalid.
    pub fn from_config(config: &PanelConfig, sink: S) -> UiResult<Self> {
        config.validate()?;
        let widgets = config.build_widgets()?;
        Ok(Self::with_layout(widgets, sink, config.gutter, config.theme.clone()))
    }

    /// Routes one pointer sample and flushes redraws.
    ///
    /// Returns true if a widget held the pointer capture during this sample.
    pub fn mouse(&mut self, x: i32, y: i32, transition: Transition) -> bool {
        let capturing = self.route(x, y, transition);
        self.flush();
        capturing
    }

    /// Routes a [`PointerSample`]. See [`Settings::mouse`].
    pub fn pointer(&mut self, sample: PointerSample) -> bool {
        self.mouse(sample.x, sample.y, sample.transition)
    }

    fn route(&mut self, x: i32, y: i32, transition: Transition) -> bool {
        let mut delivered = None;
        if let Some(id) = self.focused {
            if self.slots[id.0].widget.handle(x, y, transition) {
                return true;
            }
            delivered = Some(id);
        }

        let hit = self
            .slots
            .iter()
            .position(|slot| slot.widget.band_contains(y))
            .map(WidgetId);
        if hit != self.focused {
            tracing::debug!(from = ?self.focused, to = ?hit, "focus changed");
            self.focused = hit;
        }

        match hit {
            Some(id) if delivered != Some(id) => self.slots[id.0].widget.handle(x, y, transition),
            _ => false,
        }
    }

    /// Repaints and uploads every dirty widget. Returns how many were drawn.
    ///
    /// [`Settings::mouse`] calls this itself; call it after using setters
    /// between samples.
    pub fn flush(&mut self) -> usize {
        let mut drawn = 0;
        for slot in &mut self.slots {
            if slot.widget.state().is_dirty() {
                slot.widget.redraw(&mut slot.surface, &self.theme, &mut self.sink);
                drawn += 1;
            }
        }
        drawn
    }

    /// Repaints and uploads every widget.
    pub fn redraw_all(&mut self) -> usize {
        for slot in &mut self.slots {
            slot.widget.state_mut().mark_dirty();
        }
        self.flush()
    }

    /// The focused widget, if any.
    #[must_use]
    pub const fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// Number of widgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the panel has no widgets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Total stacked height, including the trailing gutter.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Theme used for painting.
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    /// IDs of all widgets, top to bottom.
    pub fn ids(&self) -> impl Iterator<Item = WidgetId> {
        (0..self.slots.len()).map(WidgetId)
    }

    /// Returns the first widget with the given label.
    #[must_use]
    pub fn find(&self, label: &str) -> Option<WidgetId> {
        self.slots
            .iter()
            .position(|slot| slot.widget.label() == label)
            .map(WidgetId)
    }

    /// Returns a widget by ID.
    #[must_use]
    pub fn widget(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.slots.get(id.0).map(|slot| slot.widget.as_ref())
    }

    /// Returns a widget by ID.
    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut dyn Widget> {
        match self.slots.get_mut(id.0) {
            Some(slot) => Some(slot.widget.as_mut()),
            None => None,
        }
    }

    /// Returns a widget by ID if it is a `W`.
    #[must_use]
    pub fn get<W: Widget>(&self, id: WidgetId) -> Option<&W> {
        self.slots.get(id.0)?.widget.as_any().downcast_ref()
    }

    /// Returns a widget by ID if it is a `W`.
    ///
    /// Setters schedule a redraw; it is uploaded by the next
    /// [`Settings::mouse`] or [`Settings::flush`].
    pub fn get_mut<W: Widget>(&mut self, id: WidgetId) -> Option<&mut W> {
        self.slots.get_mut(id.0)?.widget.as_any_mut().downcast_mut()
    }

    /// The texture sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// The texture sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the panel and returns the texture sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::error::UiError;
    use crate::texture::CpuTexture;
    use crate::widget::{Button, ColorSlider, Options, Slider};

    fn panel() -> Settings<CpuTexture> {
        Settings::new(
            vec![
                Box::new(ColorSlider::new("color", (100, 200, 300))),
                Box::new(Slider::new("value", -10.0, 200.0, 10.0)),
                Box::new(Slider::new("value", -10.0, 200.0, 40.0)),
                Box::new(Button::new("button", "button")),
                Box::new(Options::new("hello", ["apple", "pear", "potato", "tomato"], 0).unwrap()),
            ],
            CpuTexture::new(400, 600),
        )
    }

    #[test]
    fn test_stacking() {
        let settings = panel();
        let tops: Vec<i32> = settings.ids().map(|id| settings.widget(id).unwrap().top()).collect();

        assert_eq!(tops, vec![8, 81, 110, 139, 168]);
        assert_eq!(settings.height(), 197);
        assert_eq!(settings.sink().write_count(), 5);
    }

    #[test]
    fn test_focus_follows_band() {
        let mut settings = panel();

        settings.mouse(10, 90, Transition::None);
        assert_eq!(settings.focused(), Some(WidgetId(1)));
        settings.mouse(10, 150, Transition::None);
        assert_eq!(settings.focused(), Some(WidgetId(3)));
        settings.mouse(10, 4, Transition::None);
        assert_eq!(settings.focused(), None);
        settings.mouse(10, 79, Transition::None);
        assert_eq!(settings.focused(), None);
    }

    #[test]
    fn test_drag_keeps_focus_across_neighbours() {
        let mut settings = panel();
        let slider = WidgetId(1);

        assert!(settings.mouse(119, 90, Transition::Pressed));
        assert!(settings.mouse(250, 120, Transition::Held));
        assert!(settings.mouse(300, 150, Transition::Held));
        assert_eq!(settings.focused(), Some(slider));
        assert!(settings.mouse(300, 150, Transition::Released));

        let value = settings.get::<Slider>(slider).unwrap().value();
        assert!((value - 200.0).abs() < f64::EPSILON);
        let neighbour = settings.get::<Slider>(WidgetId(2)).unwrap().value();
        assert!((neighbour - 40.0).abs() < f64::EPSILON);

        assert!(!settings.mouse(300, 150, Transition::None));
        assert_eq!(settings.focused(), Some(WidgetId(3)));
    }

    #[test]
    fn test_sample_delivered_once() {
        let clicks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&clicks);
        let mut settings = Settings::new(
            vec![Box::new(
                Button::new("button", "go").on_click(move || counter.set(counter.get() + 1)),
            )],
            CpuTexture::new(400, 40),
        );

        settings.mouse(200, 10, Transition::None);
        settings.mouse(200, 10, Transition::Pressed);
        settings.mouse(200, 10, Transition::Released);
        settings.mouse(200, 10, Transition::Released);

        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_idle_frames_write_nothing() {
        let mut settings = panel();
        let before = settings.sink().write_count();

        settings.mouse(390, 90, Transition::None);
        settings.mouse(391, 91, Transition::None);
        settings.mouse(5, 500, Transition::None);

        assert_eq!(settings.sink().write_count(), before);
    }

    #[test]
    fn test_setter_then_flush() {
        let mut settings = panel();
        let before = settings.sink().write_count();
        let id = settings.find("hello").unwrap();

        settings.get_mut::<Options>(id).unwrap().set_value("potato").unwrap();
        assert_eq!(settings.flush(), 1);
        assert_eq!(settings.flush(), 0);
        assert_eq!(settings.sink().write_count(), before + 1);
        assert!(settings.get::<Slider>(id).is_none());
    }

    #[test]
    fn test_redraw_all() {
        let mut settings = panel();
        assert_eq!(settings.redraw_all(), 5);
    }

    #[test]
    fn test_from_config_rejects_overlapping_layout() {
        let config = PanelConfig {
            gutter: -30,
            ..PanelConfig::default()
        };
        let result = Settings::from_config(&config, CpuTexture::new(400, 600));
        assert!(matches!(result, Err(UiError::InvalidConfig(_))));

        let config = PanelConfig {
            texture_width: 300,
            ..PanelConfig::default()
        };
        let result = Settings::from_config(&config, CpuTexture::new(300, 600));
        assert!(matches!(result, Err(UiError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_config_strips_are_disjoint() {
        let settings =
            Settings::from_config(&PanelConfig::default(), CpuTexture::new(400, 600)).unwrap();
        let mut rows: Vec<(i32, i32)> = settings
            .ids()
            .map(|id| {
                let widget = settings.widget(id).unwrap();
                (widget.top(), widget.top() + widget.height())
            })
            .collect();
        rows.sort_unstable();

        assert!(rows.windows(2).all(|pair| pair[0].1 <= pair[1].0));
        assert_eq!(settings.sink().write_count(), 5);
    }
}
