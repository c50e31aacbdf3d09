use std::f32::consts::PI;

use crate::assets::Bitmap;
use crate::geometry::angle_bucket;

use super::sprite::{draw_sprite, DepthTest, SpriteDraw};
use super::{DepthBuffer, FrameBuffer};

/// Viewing bucket of an actor facing `actor_facing`, seen along `bearing`
/// (the world angle from the viewer to the actor).  Bucket 0 is the front.
#[inline]
pub fn view_bucket(actor_facing: f32, bearing: f32) -> usize {
    angle_bucket(actor_facing - bearing + PI)
}

/// A queued depth-tested billboard.
#[derive(Copy, Clone, Debug)]
pub struct BillboardDraw<'a> {
    pub bitmap: &'a Bitmap,
    pub placement: SpriteDraw,
    /// Depth compared against the wall buffer.
    pub depth: f32,
}

/// Draw a batch far to near so nearer billboards overwrite farther ones.
pub fn draw_far_to_near(frame: &mut FrameBuffer, depth: &DepthBuffer, draws: &mut [BillboardDraw<'_>]) {
    draws.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    for d in draws.iter() {
        draw_sprite(frame, d.bitmap, d.placement, Some(DepthTest { buffer: depth, depth: d.depth }));
    }
}
