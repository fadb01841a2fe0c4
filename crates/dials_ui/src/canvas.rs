//! Drawing surface abstraction and the CPU pixel canvas.
//!
//! Widgets paint through [`Canvas`] only. [`PixelCanvas`] is the RGB8 backing
//! image each widget strip is rendered into before it is pushed to the
//! texture sink.

use font8x8::legacy::BASIC_LEGACY;

use crate::layout::{Point, Rect};
use crate::style::Rgb8;

/// Advance of one glyph of the fixed font.
pub const GLYPH_WIDTH: i32 = 8;
/// Height of one glyph of the fixed font.
pub const GLYPH_HEIGHT: i32 = 8;

/// A 2D drawing surface with a fixed font.
pub trait Canvas {
    /// Fills a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Rgb8);

    /// Draws a one pixel outline along the inside edge of a rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: Rgb8);

    /// Draws a line between two points, both ends included.
    fn line(&mut self, from: Point, to: Point, color: Rgb8);

    /// Draws text with its top-left corner at `origin`.
    fn text(&mut self, origin: Point, text: &str, color: Rgb8);

    /// Returns the rendered width of `text` in pixels.
    fn measure_text_width(&self, text: &str) -> i32;
}

/// Width of `text` in the fixed font.
#[must_use]
pub fn fixed_text_width(text: &str) -> i32 {
    i32::try_from(text.chars().count()).map_or(i32::MAX, |n| n.saturating_mul(GLYPH_WIDTH))
}

fn glyph_for_char(ch: char) -> [u8; 8] {
    let index = ch as usize;
    if index < BASIC_LEGACY.len() {
        BASIC_LEGACY[index]
    } else {
        BASIC_LEGACY[b'?' as usize]
    }
}

/// CPU-side RGB8 image implementing [`Canvas`].
///
/// Rows are stored top to bottom; every drawing call is clipped to the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelCanvas {
    width: i32,
    height: i32,
    pixels: Vec<Rgb8>,
}

impl PixelCanvas {
    /// Creates a white canvas. Negative sizes are treated as zero.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            pixels: vec![Rgb8::WHITE; (width as usize) * (height as usize)],
        }
    }

    /// Canvas width.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Canvas height.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Fills the whole canvas.
    pub fn clear(&mut self, color: Rgb8) {
        self.pixels.fill(color);
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the canvas.
    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb8> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Raw RGB8 bytes, row-major, top row first.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[allow(clippy::cast_sign_loss)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    fn put(&mut self, x: i32, y: i32, color: Rgb8) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }
}

impl Canvas for PixelCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Rgb8) {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.right().min(self.width);
        let y1 = rect.bottom().min(self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                self.put(x, y, color);
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb8) {
        if rect.is_empty() {
            return;
        }
        let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);
        self.line(Point::new(rect.x, rect.y), Point::new(right, rect.y), color);
        self.line(Point::new(rect.x, bottom), Point::new(right, bottom), color);
        self.line(Point::new(rect.x, rect.y), Point::new(rect.x, bottom), color);
        self.line(Point::new(right, rect.y), Point::new(right, bottom), color);
    }

    fn line(&mut self, from: Point, to: Point, color: Rgb8) {
        // Bresenham, all octants.
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (from.x, from.y);
        loop {
            self.put(x, y, color);
            if x == to.x && y == to.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn text(&mut self, origin: Point, text: &str, color: Rgb8) {
        let mut pen_x = origin.x;
        for ch in text.chars() {
            if pen_x >= self.width {
                break;
            }
            for (row, bits) in (0..GLYPH_HEIGHT).zip(glyph_for_char(ch)) {
                for column in 0..GLYPH_WIDTH {
                    if (bits >> column) & 0x01 != 0 {
                        self.put(pen_x + column, origin.y + row, color);
                    }
                }
            }
            pen_x += GLYPH_WIDTH;
        }
    }

    fn measure_text_width(&self, text: &str) -> i32 {
        fixed_text_width(text)
    }
}
