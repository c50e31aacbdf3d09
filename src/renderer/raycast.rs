// ── Ray-cast renderer ─────────────────────────────────────────────────────────
//
// One ray per screen column, stepped through the grid with DDA: each step
// jumps to the next cell boundary on whichever axis is nearer, so the first
// blocking cell is found exactly without a fixed march step.  The axis of
// the final step decides the wall face and which world coordinate feeds the
// texture's horizontal lookup.

use glam::Vec2;

use crate::assets::Bitmap;
use crate::camera::Camera;
use crate::config::RenderTuning;
use crate::geometry::heading;
use crate::map::OccupancyMap;

use super::{shade, DepthBuffer, FrameBuffer};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WallFace {
    /// Crossed a vertical grid line (x step); texture follows world y.
    Vertical,
    /// Crossed a horizontal grid line (y step); texture follows world x.
    Horizontal,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    /// Length along the ray, before fish-eye correction.
    pub distance: f32,
    pub point: Vec2,
    pub face: WallFace,
    /// `(row, col)` of the blocking cell, `None` when the ray left the grid
    /// or ran past the maximum distance.
    pub cell: Option<(i32, i32)>,
}

impl RayHit {
    /// Fractional position along the struck wall, in `[0, 1)`.
    pub fn wall_u(&self) -> f32 {
        let coord = match self.face {
            WallFace::Vertical => self.point.y,
            WallFace::Horizontal => self.point.x,
        };
        coord - coord.floor()
    }
}

fn in_grid(map: &OccupancyMap, row: i32, col: i32) -> bool {
    row >= 0 && col >= 0 && (row as usize) < map.height() && (col as usize) < map.width()
}

/// Cast one ray from `origin` along `angle`.
///
/// A ray that leaves the grid, or travels past `max_distance`, reports a
/// miss at `max_distance`.  A ray starting inside a blocking cell hits at 0.
pub fn cast_ray(map: &OccupancyMap, origin: Vec2, angle: f32, max_distance: f32) -> RayHit {
    let dir = heading(angle);
    let mut col = origin.x.floor() as i32;
    let mut row = origin.y.floor() as i32;

    let miss = |face| RayHit {
        distance: max_distance,
        point: origin + dir * max_distance,
        face,
        cell: None,
    };

    if in_grid(map, row, col) && map.is_blocking(row, col) {
        return RayHit { distance: 0.0, point: origin, face: WallFace::Vertical, cell: Some((row, col)) };
    }

    let delta_x = if dir.x.abs() < 1e-9 { f32::INFINITY } else { (1.0 / dir.x).abs() };
    let delta_y = if dir.y.abs() < 1e-9 { f32::INFINITY } else { (1.0 / dir.y).abs() };
    let step_x = if dir.x > 0.0 { 1 } else { -1 };
    let step_y = if dir.y > 0.0 { 1 } else { -1 };

    let mut side_x = if dir.x > 0.0 {
        (col as f32 + 1.0 - origin.x) * delta_x
    } else {
        (origin.x - col as f32) * delta_x
    };
    let mut side_y = if dir.y > 0.0 {
        (row as f32 + 1.0 - origin.y) * delta_y
    } else {
        (origin.y - row as f32) * delta_y
    };

    loop {
        let (t, face) = if side_x < side_y {
            let t = side_x;
            side_x += delta_x;
            col += step_x;
            (t, WallFace::Vertical)
        } else {
            let t = side_y;
            side_y += delta_y;
            row += step_y;
            (t, WallFace::Horizontal)
        };

        if t.is_nan() || t > max_distance || !in_grid(map, row, col) {
            return miss(face);
        }
        if map.is_blocking(row, col) {
            return RayHit { distance: t, point: origin + dir * t, face, cell: Some((row, col)) };
        }
    }
}

// ── Raycaster ─────────────────────────────────────────────────────────────────

/// Paints ceiling, walls and floor and publishes the per-column depth.
#[derive(Clone, Debug)]
pub struct Raycaster {
    camera: Camera,
    depth_epsilon: f32,
    wall_falloff: f32,
    ceiling_fog: f32,
    ceiling_scale: f32,
    floor_color: u32,
    ceiling_color: u32,
}

impl Raycaster {
    pub fn new(camera: Camera, render: &RenderTuning) -> Self {
        Self {
            camera,
            depth_epsilon: render.depth_epsilon,
            wall_falloff: render.wall_falloff,
            ceiling_fog: render.ceiling_fog,
            ceiling_scale: render.ceiling_texture_scale,
            floor_color: render.floor_color,
            ceiling_color: render.ceiling_color,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Render one frame seen from `eye` along `facing`.  Every column's
    /// corrected distance is written to `depth`.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &self,
        eye: Vec2,
        facing: f32,
        map: &OccupancyMap,
        wall: &Bitmap,
        ceiling: Option<&Bitmap>,
        frame: &mut FrameBuffer,
        depth: &mut DepthBuffer,
    ) {
        let w = frame.width().min(self.camera.width);
        let h = frame.height() as i32;
        let half = h as f32 / 2.0;
        depth.reset(self.camera.max_distance);

        for x in 0..w {
            let angle = self.camera.ray_angle(facing, x);
            let relative_cos = (angle - facing).cos();
            let ray_dir = heading(angle);

            let hit = cast_ray(map, eye, angle, self.camera.max_distance);
            let dist = (hit.distance * relative_cos).max(self.depth_epsilon);
            depth.set(x as usize, dist);

            let wall_h = (h as f32 / dist).min(i32::MAX as f32 / 512.0) as i32;
            let draw_start = (h / 2 - wall_h / 2).max(0);
            let draw_end = if wall_h > 0 { (h / 2 + wall_h / 2).min(h - 1) } else { draw_start - 1 };
            let col = x as i32;

            // Ceiling: project each row back onto the ceiling plane.
            for y in 0..draw_start {
                let color = match ceiling {
                    Some(tex) if !tex.is_empty() => {
                        let p = (half - y as f32).max(1e-4);
                        let row_dist = half / p;
                        let world = eye + ray_dir * (row_dist / relative_cos.max(1e-4));
                        let sx = world.x * self.ceiling_scale;
                        let sy = world.y * self.ceiling_scale;
                        let tx = ((sx - sx.floor()) * tex.width() as f32) as i32;
                        let ty = ((sy - sy.floor()) * tex.height() as f32) as i32;
                        let fog = 1.0 / (1.0 + row_dist * row_dist * self.ceiling_fog);
                        shade(tex.texel_clamped(tx, ty), fog)
                    }
                    _ => self.ceiling_color,
                };
                frame.put(col, y, color);
            }

            // Wall span.
            if !wall.is_empty() && draw_end >= draw_start {
                let tex_x = (hit.wall_u() * wall.width() as f32) as i32;
                let tex_h = wall.height() as i64;
                let falloff = 1.0 / (1.0 + dist * dist * self.wall_falloff);
                for y in draw_start..=draw_end {
                    let d = y as i64 * 256 - h as i64 * 128 + wall_h as i64 * 128;
                    let tex_y = (d * tex_h / wall_h as i64 / 256) as i32;
                    frame.put(col, y, shade(wall.texel_clamped(tex_x, tex_y), falloff));
                }
            }

            for y in draw_end + 1..h {
                frame.put(col, y, self.floor_color);
            }
        }
    }
}
