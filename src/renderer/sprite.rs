// ── Sprite compositor ─────────────────────────────────────────────────────────
//
// Stateless scaled blit with nearest-neighbour centre sampling, optional
// horizontal flip, alpha cutout and an optional per-column depth test.

use crate::assets::{alpha, Bitmap, ALPHA_CUTOFF};

use super::{DepthBuffer, FrameBuffer};

/// Placement of one blit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpriteDraw {
    /// Top-left screen corner.
    pub x: i32,
    pub y: i32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub mirror: bool,
}

impl SpriteDraw {
    pub fn uniform(x: i32, y: i32, scale: f32, mirror: bool) -> Self {
        Self { x, y, scale_x: scale, scale_y: scale, mirror }
    }
}

/// Draw only in columns where `depth` is nearer than the recorded wall.
#[derive(Copy, Clone, Debug)]
pub struct DepthTest<'a> {
    pub buffer: &'a DepthBuffer,
    pub depth: f32,
}

/// Destination size of a scaled bitmap, rounded to the nearest pixel.
#[inline]
pub fn scaled_extent(size: u32, scale: f32) -> i32 {
    (size as f32 * scale + 0.5) as i32
}

/// Source texel for destination offset `d` under `scale`, sampled at the
/// destination pixel's centre.
#[inline]
pub fn source_index(d: i32, scale: f32) -> i32 {
    ((d as f32 + 0.5) / scale) as i32
}

pub fn draw_sprite(frame: &mut FrameBuffer, bitmap: &Bitmap, draw: SpriteDraw, depth: Option<DepthTest<'_>>) {
    if bitmap.is_empty()
        || !(draw.scale_x.is_finite() && draw.scale_y.is_finite())
        || draw.scale_x <= 0.0
        || draw.scale_y <= 0.0
    {
        return;
    }

    let src_w = bitmap.width() as i32;
    let src_h = bitmap.height() as i32;
    let dst_w = scaled_extent(bitmap.width(), draw.scale_x);
    let dst_h = scaled_extent(bitmap.height(), draw.scale_y);

    // Clip the destination rectangle to the frame before iterating.
    let sx_start = (-draw.x).max(0);
    let sx_end = dst_w.min(frame.width() as i32 - draw.x);
    let sy_start = (-draw.y).max(0);
    let sy_end = dst_h.min(frame.height() as i32 - draw.y);

    for sx in sx_start..sx_end {
        let px = draw.x + sx;
        if let Some(test) = depth {
            match test.buffer.get(px) {
                Some(wall) if test.depth < wall => {}
                _ => continue,
            }
        }

        let mut src_x = source_index(sx, draw.scale_x);
        if draw.mirror {
            src_x = src_w - 1 - src_x;
        }
        let src_x = src_x.clamp(0, src_w - 1);

        for sy in sy_start..sy_end {
            let src_y = source_index(sy, draw.scale_y).clamp(0, src_h - 1);
            let pixel = bitmap.texel_clamped(src_x, src_y);
            if alpha(pixel) < ALPHA_CUTOFF {
                continue;
            }
            frame.put(px, draw.y + sy, pixel);
        }
    }
}
