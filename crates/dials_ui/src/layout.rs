//! Fixed panel geometry and the value <-> pixel track mapping.
//!
//! Every widget is a 400px wide strip. Sliders share one horizontal track
//! from x = 100 to x = 300; the same mapping places the handle when drawing
//! and converts the pointer back into a value while dragging.

/// Width of every widget strip.
pub const PANEL_WIDTH: i32 = 400;
/// Height of single-row widgets.
pub const ROW_HEIGHT: i32 = 21;
/// Vertical distance between the rows of a multi-row widget.
pub const ROW_PITCH: i32 = 22;
/// Height of the three-row colour slider.
pub const COLOR_HEIGHT: i32 = 65;
/// Default spacing above the first widget and between widgets.
pub const GUTTER: i32 = 8;
/// Labels are right-aligned to this x.
pub const LABEL_RIGHT: i32 = 88;
/// Left end of the slider track.
pub const TRACK_LO: i32 = 100;
/// Right end of the slider track.
pub const TRACK_HI: i32 = 300;
/// Length of the slider track in pixels.
pub const TRACK_SPAN: i32 = TRACK_HI - TRACK_LO;
/// Half-width of the grab band around a slider handle.
pub const HANDLE_RADIUS: i32 = 4;
/// X where value readouts start.
pub const VALUE_TEXT_X: i32 = 312;
/// Horizontal centre of the panel content.
pub const CONTENT_CENTER: i32 = 200;
/// Y of the slider track line within a row.
pub const TRACK_Y: i32 = 10;
/// Y of text within a row.
pub const TEXT_TOP: i32 = 6;

/// A point in widget-local or canvas coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An integer rectangle. Covers `x..x + width` by `y..y + height`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    /// X position (left edge).
    pub x: i32,
    /// Y position (top edge).
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle from inclusive corner coordinates.
    #[must_use]
    pub const fn from_corners(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self::new(x0, y0, x1 - x0 + 1, y1 - y0 + 1)
    }

    /// Returns the right edge (exclusive).
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Returns the bottom edge (exclusive).
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Returns true if the point is inside the rectangle.
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Returns true if the rectangle covers no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Returns true if `y` lies in the band `top..top + height`.
#[inline]
#[must_use]
pub const fn in_band(y: i32, top: i32, height: i32) -> bool {
    top <= y && y < top + height
}

/// Returns true if `x` lies in `lo..=hi`.
#[inline]
#[must_use]
pub const fn in_span(x: i32, lo: i32, hi: i32) -> bool {
    lo <= x && x <= hi
}

/// Returns true if `x` is within `radius` pixels of `center`.
#[inline]
#[must_use]
pub const fn near(x: i32, center: i32, radius: i32) -> bool {
    (x - center).abs() <= radius
}

/// Clamps a pointer x onto the slider track.
#[inline]
#[must_use]
pub const fn clamp_track(x: i32) -> i32 {
    if x < TRACK_LO {
        TRACK_LO
    } else if x > TRACK_HI {
        TRACK_HI
    } else {
        x
    }
}

/// Affine map between a value domain `[min, max]` and the slider track.
///
/// Forward: `pixel = 100 + round(200 * (value - min) / (max - min))`,
/// clamped to the track. Inverse: `value = min + (max - min) * (pixel - 100) / 200`.
/// A zero-width domain pins the handle to the left end of the track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackMapping {
    min: f64,
    max: f64,
}

impl TrackMapping {
    /// Mapping used by colour channels.
    pub const CHANNEL: Self = Self::new(0.0, 255.0);

    /// Creates a mapping for the domain `[min, max]`.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Lower end of the domain.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper end of the domain.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Value change represented by one track pixel.
    #[must_use]
    pub fn step(&self) -> f64 {
        (self.max - self.min).abs() / f64::from(TRACK_SPAN)
    }

    /// Maps a value to its handle pixel.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn pixel_for(&self, value: f64) -> i32 {
        let span = self.max - self.min;
        if span == 0.0 || !span.is_finite() || value.is_nan() {
            return TRACK_LO;
        }
        // `as` saturates, so far out-of-domain values still clamp cleanly.
        let offset = (f64::from(TRACK_SPAN) * (value - self.min) / span).round() as i32;
        clamp_track(TRACK_LO.saturating_add(offset))
    }

    /// Maps a pointer x (clamped onto the track) back to a value.
    #[must_use]
    pub fn value_at(&self, pixel: i32) -> f64 {
        let offset = f64::from(clamp_track(pixel) - TRACK_LO);
        self.min + (self.max - self.min) * offset / f64::from(TRACK_SPAN)
    }

    /// Clamps a value into the domain. NaN collapses to the lower bound.
    #[must_use]
    pub fn clamp_value(&self, value: f64) -> f64 {
        let lower = self.min.min(self.max);
        let upper = self.max.max(self.min);
        if value.is_nan() || value < lower {
            lower
        } else if value > upper {
            upper
        } else {
            value
        }
    }
}
