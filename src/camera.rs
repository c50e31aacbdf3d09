use glam::Vec2;

use crate::config::RenderTuning;
use crate::geometry::{angle_to, wrap_angle};

/// First-person camera over a `width × height` software frame.
///
/// Columns are spread linearly in angle across the field of view, so a
/// billboard's screen column follows directly from its relative bearing and
/// always lines up with the ray cast for that column.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    /// Horizontal field of view in radians.
    pub fov: f32,
    pub max_distance: f32,
    pub width: u32,
    pub height: u32,
}

/// Where a world point lands relative to the viewer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    /// Straight-line distance from the eye.
    pub distance: f32,
    /// World angle from the eye to the point.
    pub bearing: f32,
    /// Bearing relative to the view direction, in `(-π, π]`.
    pub relative: f32,
    /// Fish-eye corrected distance, comparable with the depth buffer.
    pub depth: f32,
    /// Horizontal screen position of the point's centre, in pixels.
    pub screen_x: f32,
}

impl Camera {
    pub fn new(fov: f32, max_distance: f32, width: u32, height: u32) -> Self {
        Self { fov, max_distance, width, height }
    }

    pub fn from_tuning(render: &RenderTuning) -> Self {
        Self::new(render.fov(), render.max_distance, render.width, render.height)
    }

    /// World angle of the ray through `column`.
    #[inline]
    pub fn ray_angle(&self, facing: f32, column: u32) -> f32 {
        let t = column as f32 / self.width.max(1) as f32;
        facing - self.fov * 0.5 + t * self.fov
    }

    /// Project `target` into the view from `eye` looking along `facing`.
    ///
    /// Returns `None` when the point is nearer than `min_distance` or its
    /// centre lies outside the field of view.  The corrected depth is clamped
    /// to at least `min_distance`.
    pub fn project(&self, eye: Vec2, facing: f32, target: Vec2, min_distance: f32) -> Option<Projection> {
        let distance = eye.distance(target);
        if distance < min_distance {
            return None;
        }
        let bearing = angle_to(eye, target);
        let relative = wrap_angle(bearing - facing);
        if relative.abs() > self.fov * 0.5 {
            return None;
        }
        let depth = (distance * relative.cos()).max(min_distance);
        let screen_x = (0.5 + relative / self.fov) * self.width as f32;
        Some(Projection { distance, bearing, relative, depth, screen_x })
    }

    /// Projected height in pixels of something `factor` units tall at `depth`.
    #[inline]
    pub fn scale_at(&self, depth: f32, factor: f32) -> f32 {
        self.height as f32 / depth * factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cam() -> Camera {
        Camera::new(std::f32::consts::FRAC_PI_3, 20.0, 600, 400)
    }

    #[test]
    fn first_and_centre_columns() {
        let c = cam();
        assert!((c.ray_angle(0.0, 0) + c.fov / 2.0).abs() < 1e-6);
        assert!((c.ray_angle(1.0, 300) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn point_straight_ahead_projects_to_centre() {
        let p = cam().project(Vec2::ZERO, 0.0, Vec2::new(4.0, 0.0), 0.1).unwrap();
        assert!((p.screen_x - 300.0).abs() < 1e-3);
        assert!((p.depth - 4.0).abs() < 1e-5);
    }

    #[test]
    fn point_behind_is_culled() {
        assert!(cam().project(Vec2::ZERO, 0.0, Vec2::new(-4.0, 0.0), 0.1).is_none());
    }
}
