// ── Screen-space overlays ─────────────────────────────────────────────────────
//
// Drawn after the 3-D scene with no depth test.

use glam::Vec2;

use crate::assets::Bitmap;
use crate::geometry::walk_line;
use crate::map::OccupancyMap;

use super::sprite::{draw_sprite, SpriteDraw};
use super::FrameBuffer;

const MINIMAP_ORIGIN: i32 = 10;
const MINIMAP_WALL: u32 = 0xFF66_6666;
const MINIMAP_PLAYER: u32 = 0xFFFF_0000;
const MINIMAP_HEADING: u32 = 0xFFFF_FF00;

/// Pixel size of one minimap cell for a given frame width.
pub fn minimap_tile(frame_width: u32) -> i32 {
    (frame_width as i32 / 80).clamp(3, 12)
}

/// Top-left minimap: blocking cells, the player dot and a heading line.
pub fn draw_minimap(frame: &mut FrameBuffer, map: &OccupancyMap, eye: Vec2, facing: f32) {
    let tile = minimap_tile(frame.width());
    let o = MINIMAP_ORIGIN;

    for (row, col) in map.blocking_cells() {
        let (x0, y0) = (o + col as i32 * tile, o + row as i32 * tile);
        for dy in 0..tile {
            for dx in 0..tile {
                frame.put(x0 + dx, y0 + dy, MINIMAP_WALL);
            }
        }
    }

    let px = o + (eye.x * tile as f32) as i32;
    let py = o + (eye.y * tile as f32) as i32;
    for dy in -2..=2 {
        for dx in -2..=2 {
            if dx * dx + dy * dy <= 4 {
                frame.put(px + dx, py + dy, MINIMAP_PLAYER);
            }
        }
    }

    let tip_x = px + (facing.cos() * tile as f32) as i32;
    let tip_y = py + (facing.sin() * tile as f32) as i32;
    walk_line(px, py, tip_x, tip_y, |x, y| {
        frame.put(x, y, MINIMAP_HEADING);
        true
    });
}

/// Weapon bitmap centred at the bottom edge.  `lowered` in `[0, 1]` pushes it
/// down by that fraction of its height.
pub fn draw_weapon(frame: &mut FrameBuffer, bitmap: &Bitmap, scale: f32, margin: i32, lowered: f32) {
    let w = (bitmap.width() as f32 * scale) as i32;
    let h = (bitmap.height() as f32 * scale) as i32;
    let x = frame.width() as i32 / 2 - w / 2;
    let drop = (h as f32 * lowered.clamp(0.0, 1.0)) as i32;
    let y = frame.height() as i32 - h - margin + drop;
    draw_sprite(frame, bitmap, SpriteDraw::uniform(x, y, scale, false), None);
}
