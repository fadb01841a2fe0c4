//! Panel configuration.
//!
//! A panel is described in TOML:
//!
//! ```toml
//! gutter = 8
//!
//! [theme]
//! hover = "#eee"
//!
//! [[widgets]]
//! kind = "slider"
//! label = "speed"
//! min = 0.0
//! max = 10.0
//! value = 2.5
//!
//! [[widgets]]
//! kind = "options"
//! label = "mode"
//! options = ["fast", "slow"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{UiError, UiResult};
use crate::layout::{COLOR_HEIGHT, GUTTER, PANEL_WIDTH, ROW_HEIGHT};
use crate::style::Theme;
use crate::widget::{Button, ColorSlider, Options, Slider, Widget};

/// Layout, theme and widgets of a settings panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Space above the first widget and between widgets.
    pub gutter: i32,
    /// Width of the shared texture.
    pub texture_width: u32,
    /// Height of the shared texture.
    pub texture_height: u32,
    /// Colours.
    pub theme: Theme,
    /// Widgets, top to bottom.
    pub widgets: Vec<WidgetSpec>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            gutter: GUTTER,
            texture_width: 400,
            texture_height: 600,
            theme: Theme::default(),
            widgets: vec![
                WidgetSpec::Color {
                    label: "color".into(),
                    value: [100, 200, 300],
                },
                WidgetSpec::Slider {
                    label: "value".into(),
                    min: -10.0,
                    max: 200.0,
                    value: 10.0,
                    precision: default_precision(),
                },
                WidgetSpec::Slider {
                    label: "value".into(),
                    min: -10.0,
                    max: 200.0,
                    value: 40.0,
                    precision: default_precision(),
                },
                WidgetSpec::Button {
                    label: "button".into(),
                    text: "button".into(),
                },
                WidgetSpec::Options {
                    label: "hello".into(),
                    options: ["apple", "pear", "potato", "tomato"].map(String::from).to_vec(),
                    selected: 0,
                },
            ],
        }
    }
}

impl PanelConfig {
    /// Parses a configuration from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] if the text is not a valid panel.
    pub fn from_toml_str(text: &str) -> UiResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| UiError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Height of the stacked panel: a gutter above every widget and one below the last.
    #[must_use]
    pub fn stacked_height(&self) -> i64 {
        let gutter = i64::from(self.gutter);
        self.widgets
            .iter()
            .fold(gutter, |height, spec| height + i64::from(spec.height()) + gutter)
    }

    /// Checks that every widget strip fits the texture without overlapping another.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] for a negative gutter, a texture
    /// narrower than the panel, or a panel taller than the texture.
    pub fn validate(&self) -> UiResult<()> {
        if self.gutter < 0 {
            return Err(UiError::InvalidConfig(format!(
                "gutter must not be negative, got {}",
                self.gutter
            )));
        }
        if i64::from(self.texture_width) < i64::from(PANEL_WIDTH) {
            return Err(UiError::InvalidConfig(format!(
                "texture width {} is narrower than the {PANEL_WIDTH}px panel",
                self.texture_width
            )));
        }
        let height = self.stacked_height();
        if height > i64::from(self.texture_height) {
            return Err(UiError::InvalidConfig(format!(
                "stacked panel is {height}px tall but the texture has {} rows",
                self.texture_height
            )));
        }
        Ok(())
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> UiResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| UiError::InvalidConfig(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), widgets = config.widgets.len(), "panel config loaded");
        Ok(config)
    }

    /// Serializes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] if serialization fails.
    pub fn to_toml_string(&self) -> UiResult<String> {
        toml::to_string(self).map_err(|e| UiError::InvalidConfig(e.to_string()))
    }

    /// Builds every widget, in order.
    ///
    /// # Errors
    ///
    /// Returns the first widget construction error.
    pub fn build_widgets(&self) -> UiResult<Vec<Box<dyn Widget>>> {
        self.widgets.iter().map(WidgetSpec::build).collect()
    }
}

const fn default_precision() -> usize {
    crate::widget::DEFAULT_PRECISION
}

/// Construction parameters of one widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WidgetSpec {
    /// A [`Slider`].
    Slider {
        /// Label.
        label: String,
        /// Lower limit.
        min: f64,
        /// Upper limit.
        max: f64,
        /// Initial value, clamped into the limits.
        #[serde(default)]
        value: f64,
        /// Decimals in the readout.
        #[serde(default = "default_precision")]
        precision: usize,
    },
    /// A [`Button`].
    Button {
        /// Label.
        label: String,
        /// Face text.
        text: String,
    },
    /// An [`Options`] selector.
    Options {
        /// Label.
        label: String,
        /// Options, in order.
        options: Vec<String>,
        /// Initially selected index.
        #[serde(default)]
        selected: usize,
    },
    /// A [`ColorSlider`].
    Color {
        /// Label.
        label: String,
        /// Initial red, green and blue, clamped into `0..=255`.
        value: [i32; 3],
    },
}

impl WidgetSpec {
    /// Label of the described widget.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Slider { label, .. }
            | Self::Button { label, .. }
            | Self::Options { label, .. }
            | Self::Color { label, .. } => label,
        }
    }

    /// Height of the strip the widget occupies.
    #[must_use]
    pub const fn height(&self) -> i32 {
        match self {
            Self::Color { .. } => COLOR_HEIGHT,
            Self::Slider { .. } | Self::Button { .. } | Self::Options { .. } => ROW_HEIGHT,
        }
    }

    /// Builds the widget.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::EmptyOptions`] for an options selector without options.
    pub fn build(&self) -> UiResult<Box<dyn Widget>> {
        Ok(match self {
            Self::Slider {
                label,
                min,
                max,
                value,
                precision,
            } => {
                let mut slider = Slider::new(label.as_str(), *min, *max, *value);
                slider.set_precision(*precision);
                Box::new(slider)
            }
            Self::Button { label, text } => Box::new(Button::new(label.as_str(), text.as_str())),
            Self::Options {
                label,
                options,
                selected,
            } => Box::new(Options::new(label.as_str(), options.iter().cloned(), *selected)?),
            Self::Color {
                label,
                value: [r, g, b],
            } => Box::new(ColorSlider::new(label.as_str(), (*r, *g, *b))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Rgb8;

    #[test]
    fn test_default_is_reference_panel() {
        let config = PanelConfig::default();
        let widgets = config.build_widgets().unwrap();

        let labels: Vec<&str> = widgets.iter().map(|w| w.label()).collect();
        assert_eq!(labels, vec!["color", "value", "value", "button", "hello"]);
        assert_eq!(config.gutter, 8);
        assert_eq!((config.texture_width, config.texture_height), (400, 600));
    }

    #[test]
    fn test_parse_panel() {
        let config = PanelConfig::from_toml_str(
            r##"
            gutter = 4

            [theme]
            hover = "#abc"

            [[widgets]]
            kind = "slider"
            label = "speed"
            min = 0.0
            max = 10.0
            value = 2.5

            [[widgets]]
            kind = "options"
            label = "mode"
            options = ["fast", "slow"]
            selected = 1

            [[widgets]]
            kind = "color"
            label = "tint"
            value = [1, 2, 3]
            "##,
        )
        .unwrap();

        assert_eq!(config.gutter, 4);
        assert_eq!(config.texture_height, 600);
        assert_eq!(config.theme.hover, Rgb8::hex(0xaabbcc));
        assert_eq!(config.theme.active, Theme::default().active);
        assert_eq!(config.widgets.len(), 3);
        assert_eq!(
            config.widgets[0],
            WidgetSpec::Slider {
                label: "speed".into(),
                min: 0.0,
                max: 10.0,
                value: 2.5,
                precision: 2,
            }
        );

        let widgets = config.build_widgets().unwrap();
        let mode = widgets[1].as_any().downcast_ref::<Options>().unwrap();
        assert_eq!(mode.value(), "slow");
    }

    #[test]
    fn test_empty_widgets_section() {
        let config = PanelConfig::from_toml_str("widgets = []").unwrap();
        assert!(config.widgets.is_empty());
        assert!(config.build_widgets().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            PanelConfig::from_toml_str("[[widgets]]\nkind = \"dial\"\nlabel = \"x\""),
            Err(UiError::InvalidConfig(_))
        ));
        assert!(matches!(
            PanelConfig::from_toml_str("[theme]\nink = \"black\""),
            Err(UiError::InvalidConfig(_))
        ));

        let spec = WidgetSpec::Options {
            label: "mode".into(),
            options: Vec::new(),
            selected: 0,
        };
        assert!(matches!(spec.build(), Err(UiError::EmptyOptions { .. })));
    }

    #[test]
    fn test_toml_round_trip_of_default() {
        let config = PanelConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(PanelConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_default_fits_its_texture() {
        let config = PanelConfig::default();
        assert_eq!(config.stacked_height(), 197);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_narrow_texture_rejected() {
        let err = PanelConfig::from_toml_str("texture_width = 300").unwrap_err();
        assert!(matches!(err, UiError::InvalidConfig(_)));

        assert!(PanelConfig::from_toml_str("texture_width = 400").is_ok());
    }

    #[test]
    fn test_negative_gutter_rejected() {
        let err = PanelConfig::from_toml_str("gutter = -30").unwrap_err();
        assert!(matches!(err, UiError::InvalidConfig(_)));

        assert!(PanelConfig::from_toml_str("gutter = 0").is_ok());
    }

    #[test]
    fn test_panel_taller_than_texture_rejected() {
        let err = PanelConfig::from_toml_str("texture_height = 196").unwrap_err();
        assert!(matches!(err, UiError::InvalidConfig(_)));

        assert!(PanelConfig::from_toml_str("texture_height = 197").is_ok());
    }

    #[test]
    fn test_missing_file() {
        let err = PanelConfig::load("/nonexistent/dials.toml").unwrap_err();
        assert!(matches!(err, UiError::InvalidConfig(_)));
    }
}
