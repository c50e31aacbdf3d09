pub mod billboard;
pub mod overlay;
pub mod present;
pub mod raycast;
pub mod sprite;
pub mod utils;

pub use billboard::{draw_far_to_near, view_bucket, BillboardDraw};
pub use present::Presenter;
pub use raycast::{cast_ray, Raycaster, RayHit, WallFace};
pub use sprite::{draw_sprite, DepthTest, SpriteDraw};

// ── FrameBuffer ───────────────────────────────────────────────────────────────

/// Caller-owned ARGB software frame.  Allocated once; every draw writes in
/// place and out-of-range writes are dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, pixels: vec![0xFF00_0000; (width * height) as usize] }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    #[inline]
    pub fn put(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
            self.pixels[y as usize * self.width as usize + x as usize] = color;
        }
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
            Some(self.pixels[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Raw bytes for GPU upload.  On little-endian hosts an ARGB word is laid
    /// out as B, G, R, A, which is what a `Bgra8` texture expects.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

// ── DepthBuffer ───────────────────────────────────────────────────────────────

/// Per-column distance to the nearest wall, rebuilt by the raycaster every
/// frame before any billboard is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthBuffer {
    depths: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(width: u32, far: f32) -> Self {
        Self { depths: vec![far; width as usize] }
    }

    pub fn reset(&mut self, far: f32) {
        self.depths.fill(far);
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    #[inline]
    pub fn get(&self, column: i32) -> Option<f32> {
        usize::try_from(column).ok().and_then(|c| self.depths.get(c)).copied()
    }

    #[inline]
    pub fn set(&mut self, column: usize, depth: f32) {
        if let Some(slot) = self.depths.get_mut(column) {
            *slot = depth;
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.depths
    }
}

/// Scale the RGB channels of an ARGB colour, forcing it opaque.
#[inline]
pub fn shade(color: u32, factor: f32) -> u32 {
    let f = factor.clamp(0.0, 1.0);
    let r = (((color >> 16) & 0xFF) as f32 * f) as u32;
    let g = (((color >> 8) & 0xFF) as f32 * f) as u32;
    let b = ((color & 0xFF) as f32 * f) as u32;
    0xFF00_0000 | r << 16 | g << 8 | b
}
