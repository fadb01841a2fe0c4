//! Texture sinks.
//!
//! A widget pushes its whole strip as one RGB8 region write. Each widget owns
//! a disjoint vertical band of the texture, so writes never overlap.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::style::Rgb8;

/// Bytes per texel of the shared texture.
pub const BYTES_PER_PIXEL: usize = 3;

/// A rectangular region of the texture, in texels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TextureRegion {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

impl TextureRegion {
    /// Creates a new region.
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Number of bytes an RGB8 upload of this region carries.
    #[must_use]
    pub const fn byte_len(&self) -> usize {
        self.width as usize * self.height as usize * BYTES_PER_PIXEL
    }

    /// Returns true if the region covers no texels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Smallest region covering both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = (self.y + self.height).max(other.y + other.height);
        Self::new(x, y, right - x, bottom - y)
    }
}

/// Receives raw pixel regions and integrates them into a texture.
pub trait TextureSink {
    /// Uploads `bytes` (RGB8, row-major, top row first) into `region`.
    ///
    /// Callers guarantee `bytes.len() == region.byte_len()`.
    fn write(&mut self, bytes: &[u8], region: TextureRegion);
}

impl<T: TextureSink + ?Sized> TextureSink for &mut T {
    fn write(&mut self, bytes: &[u8], region: TextureRegion) {
        (**self).write(bytes, region);
    }
}

impl<T: TextureSink + ?Sized> TextureSink for Box<T> {
    fn write(&mut self, bytes: &[u8], region: TextureRegion) {
        (**self).write(bytes, region);
    }
}

/// Lets the renderer keep a handle on the texture the panel writes into.
impl<T: TextureSink> TextureSink for Arc<Mutex<T>> {
    fn write(&mut self, bytes: &[u8], region: TextureRegion) {
        self.lock().write(bytes, region);
    }
}

/// CPU copy of the overlay texture.
///
/// Starts white. Remembers the union of regions written since the last
/// [`CpuTexture::take_dirty`] so a GPU mirror can upload only what changed.
#[derive(Debug, Clone)]
pub struct CpuTexture {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    dirty: Option<TextureRegion>,
    writes: u64,
}

impl CpuTexture {
    /// Creates a white texture.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0xff; width as usize * height as usize * BYTES_PER_PIXEL],
            dirty: None,
            writes: 0,
        }
    }

    /// Texture width.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Texture height.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// All texels, RGB8 row-major.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Number of region writes accepted so far.
    #[must_use]
    pub const fn write_count(&self) -> u64 {
        self.writes
    }

    /// Returns the texel at `(x, y)`.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let texel = &self.pixels[offset..offset + BYTES_PER_PIXEL];
        Some(Rgb8::new(texel[0], texel[1], texel[2]))
    }

    /// Copies the bytes of `region` out of the texture.
    #[must_use]
    pub fn region_bytes(&self, region: TextureRegion) -> Option<Vec<u8>> {
        if !self.fits(region) {
            return None;
        }
        let stride = self.width as usize * BYTES_PER_PIXEL;
        let row_len = region.width as usize * BYTES_PER_PIXEL;
        let mut bytes = Vec::with_capacity(region.byte_len());
        for row in region.y..region.y + region.height {
            let start = row as usize * stride + region.x as usize * BYTES_PER_PIXEL;
            bytes.extend_from_slice(&self.pixels[start..start + row_len]);
        }
        Some(bytes)
    }

    /// Returns and clears the region written since the last call.
    pub fn take_dirty(&mut self) -> Option<TextureRegion> {
        self.dirty.take()
    }

    fn fits(&self, region: TextureRegion) -> bool {
        region.x.checked_add(region.width).is_some_and(|right| right <= self.width)
            && region.y.checked_add(region.height).is_some_and(|bottom| bottom <= self.height)
    }
}

impl TextureSink for CpuTexture {
    fn write(&mut self, bytes: &[u8], region: TextureRegion) {
        if bytes.len() != region.byte_len() || !self.fits(region) {
            tracing::warn!(
                ?region,
                len = bytes.len(),
                texture_width = self.width,
                texture_height = self.height,
                "dropping texture write that does not match its region"
            );
            return;
        }
        let stride = self.width as usize * BYTES_PER_PIXEL;
        let row_len = region.width as usize * BYTES_PER_PIXEL;
        for (row, src) in (region.y..).zip(bytes.chunks_exact(row_len.max(1))) {
            let start = row as usize * stride + region.x as usize * BYTES_PER_PIXEL;
            self.pixels[start..start + row_len].copy_from_slice(src);
        }
        self.dirty = Some(match self.dirty {
            Some(dirty) => dirty.union(&region),
            None => region,
        });
        self.writes += 1;
        tracing::trace!(?region, "texture region updated");
    }
}
