//! Overlay geometry and the optional GPU mirror of the panel texture.
//!
//! The overlay renderer draws the panel as one textured triangle strip.
//! [`overlay_quad`] produces that strip; with the `gpu` feature,
//! [`GpuTexture`] keeps a wgpu texture in sync with a [`CpuTexture`].
//!
//! [`CpuTexture`]: crate::texture::CpuTexture

/// Vertex of the overlay quad.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OverlayVertex {
    /// Position in normalized device coordinates.
    pub position: [f32; 2],
    /// Texture coordinates.
    pub uv: [f32; 2],
}

impl OverlayVertex {
    /// Creates a new vertex.
    #[must_use]
    pub const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
        }
    }
}

/// Builds a triangle strip showing the top-left `width x height` texels of
/// the texture at window position `(x, y)` (origin top-left).
///
/// Order: top-left, bottom-left, top-right, bottom-right.
#[must_use]
pub fn overlay_quad(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    window: (f32, f32),
    texture: (f32, f32),
) -> [OverlayVertex; 4] {
    let (window_width, window_height) = window;
    let (texture_width, texture_height) = texture;
    let x1 = x * 2.0 / window_width - 1.0;
    let y1 = 1.0 - y * 2.0 / window_height;
    let x2 = x1 + width * 2.0 / window_width;
    let y2 = y1 - height * 2.0 / window_height;
    let u = width / texture_width;
    let v = height / texture_height;
    [
        OverlayVertex::new(x1, y1, 0.0, 0.0),
        OverlayVertex::new(x1, y2, 0.0, v),
        OverlayVertex::new(x2, y1, u, 0.0),
        OverlayVertex::new(x2, y2, u, v),
    ]
}

#[cfg(feature = "gpu")]
pub use gpu::GpuTexture;

#[cfg(feature = "gpu")]
mod gpu {
    use crate::texture::{CpuTexture, TextureRegion, BYTES_PER_PIXEL};

    /// wgpu texture mirroring a [`CpuTexture`].
    ///
    /// wgpu has no 24-bit format, so texels are widened to RGBA8 on upload.
    pub struct GpuTexture {
        texture: wgpu::Texture,
        view: wgpu::TextureView,
        scratch: Vec<u8>,
    }

    impl GpuTexture {
        /// Creates an `Rgba8Unorm` texture with the CPU texture's size.
        #[must_use]
        pub fn new(device: &wgpu::Device, source: &CpuTexture) -> Self {
            let texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Dials Panel Texture"),
                size: wgpu::Extent3d {
                    width: source.width(),
                    height: source.height(),
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            });
            let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
            Self {
                texture,
                view,
                scratch: Vec::new(),
            }
        }

        /// View for binding the texture in the overlay pipeline.
        #[must_use]
        pub fn view(&self) -> &wgpu::TextureView {
            &self.view
        }

        /// Uploads the region written since the last sync. Returns it, if any.
        pub fn sync(&mut self, queue: &wgpu::Queue, source: &mut CpuTexture) -> Option<TextureRegion> {
            let region = source.take_dirty().filter(|r| !r.is_empty())?;
            let rgb = source.region_bytes(region)?;

            self.scratch.clear();
            for texel in rgb.chunks_exact(BYTES_PER_PIXEL) {
                self.scratch.extend_from_slice(&[texel[0], texel[1], texel[2], 0xff]);
            }

            queue.write_texture(
                wgpu::ImageCopyTexture {
                    texture: &self.texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d {
                        x: region.x,
                        y: region.y,
                        z: 0,
                    },
                    aspect: wgpu::TextureAspect::All,
                },
                &self.scratch,
                wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(region.width * 4),
                    rows_per_image: Some(region.height),
                },
                wgpu::Extent3d {
                    width: region.width,
                    height: region.height,
                    depth_or_array_layers: 1,
                },
            );
            tracing::trace!(?region, "panel texture uploaded");
            Some(region)
        }
    }
}
