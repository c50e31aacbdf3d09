// =============================================================================
// GEOMETRY.RS: angles, distances and sight lines on the continuous grid
//
// World positions are `Vec2` in map units (one unit per cell, x = column,
// y = row).  Angles are radians measured from +x toward +y.
// - Angle normalisation and the 8-way viewing bucket used by sprite sets
// - Marching line of sight used by the AI and the player's hitscan
// - Bresenham walking for overlays drawn on the pixel grid
// =============================================================================

use std::f32::consts::{PI, TAU};

use glam::Vec2;

/// Number of discrete viewing directions a directional sprite carries.
pub const ANGLE_BUCKETS: usize = 8;

/// Map an angle into `[0, 2π)`.
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if a >= TAU { 0.0 } else { a }
}

/// Map an angle into `(-π, π]`.
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let a = normalize_angle(angle);
    if a > PI { a - TAU } else { a }
}

/// Round an angle to one of the 8 viewing buckets (45° each, bucket 0
/// centred on zero).  The result is always taken modulo 8.
#[inline]
pub fn angle_bucket(angle: f32) -> usize {
    let slots = normalize_angle(angle) / TAU * ANGLE_BUCKETS as f32;
    (slots.round() as usize) & (ANGLE_BUCKETS - 1)
}

/// Angle of the vector from `from` to `to`.
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector pointing along `angle`.
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Euclidean distance between two world positions.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

// =============================================================================
// LINE OF SIGHT
// =============================================================================

/// March from `from` toward `to` in increments of `step`, failing as soon as
/// a sample lands in a blocking cell.
///
/// Segments shorter than `min_length` are trivially visible.  The start
/// sample is included; the end point itself is not.
pub fn line_of_sight(
    from: Vec2,
    to: Vec2,
    step: f32,
    min_length: f32,
    is_blocking: impl Fn(Vec2) -> bool,
) -> bool {
    let delta = to - from;
    let length = delta.length();
    if length < min_length {
        return true;
    }
    let dir = delta / length;
    let step = step.max(1e-3);

    let mut t = 0.0;
    while t < length {
        if is_blocking(from + dir * t) {
            return false;
        }
        t += step;
    }
    true
}

// =============================================================================
// BRESENHAM WALK
// =============================================================================

/// Iterate along a pixel line, calling `callback` for each point.
/// Stops early if the callback returns false.
///
/// Returns true if the line completed, false if it was interrupted.
pub fn walk_line(
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    mut callback: impl FnMut(i32, i32) -> bool,
) -> bool {
    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let sy = if y1 < y2 { 1 } else { -1 };

    let mut x = x1;
    let mut y = y1;
    let mut err = dx - dy;

    loop {
        if !callback(x, y) {
            return false;
        }

        if x == x2 && y == y2 {
            break;
        }

        let e2 = 2 * err;

        if e2 > -dy {
            err -= dy;
            x += sx;
        }

        if e2 < dx {
            err += dx;
            y += sy;
        }
    }

    true
}

// =============================================================================
// DIRECTION HELPERS
// =============================================================================

/// The 4 cardinal directions as unit offsets (+x, -x, +y, -y).
pub const CARDINALS: [Vec2; 4] = [
    Vec2::new(1.0, 0.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(0.0, -1.0),
];
