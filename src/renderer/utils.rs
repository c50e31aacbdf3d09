// ── Letterbox viewport math ───────────────────────────────────────────────────
//
// Fits the software frame inside the window, centred on both axes.  Pixel
// art stays crisp when the magnification is a whole number, so the integer
// variant rounds the scale down whenever the window allows at least 1×.

use crate::window::WindowConfig;

/// Rectangle in physical pixels, ready for `RenderPass::set_viewport`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };
}

/// Largest aspect-preserving rectangle for the logical frame.
///
/// With `integer_scale`, the scale is floored to a whole number when it is
/// at least 1; smaller windows fall back to the fractional fit.  Returns a
/// zero viewport when either logical dimension is zero.
pub fn letterbox_viewport(config: &WindowConfig, integer_scale: bool) -> Viewport {
    if config.logical_width == 0 || config.logical_height == 0 {
        return Viewport::ZERO;
    }

    let pw = config.physical_width as f32;
    let ph = config.physical_height as f32;
    let lw = config.logical_width as f32;
    let lh = config.logical_height as f32;

    let mut scale = (pw / lw).min(ph / lh);
    if integer_scale && scale >= 1.0 {
        scale = scale.floor();
    }

    let width = lw * scale;
    let height = lh * scale;
    Viewport { x: ((pw - width) / 2.0).floor(), y: ((ph - height) / 2.0).floor(), width, height }
}
