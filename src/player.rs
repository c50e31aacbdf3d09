use std::f32::consts::FRAC_PI_2;

use glam::Vec2;

use crate::config::PlayerTuning;
use crate::geometry::{heading, normalize_angle};
use crate::map::OccupancyMap;

/// Player position in map units and facing in `[0, 2π)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlayerPose {
    pub position: Vec2,
    pub angle: f32,
}

impl PlayerPose {
    pub fn new(position: Vec2, angle: f32) -> Self {
        Self { position, angle: normalize_angle(angle) }
    }
}

/// One tick of player commands.  Axes run from -1 to 1.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PlayerIntent {
    /// Positive walks forward.
    pub forward: f32,
    /// Positive strafes right.
    pub strafe: f32,
    /// Positive turns right (increasing angle).
    pub turn: f32,
    pub fire: bool,
    pub reload: bool,
}

/// A square of half-width `radius` at `pos` overlaps a blocking cell.
fn collides(map: &OccupancyMap, pos: Vec2, radius: f32) -> bool {
    [(-radius, -radius), (radius, -radius), (-radius, radius), (radius, radius)]
        .iter()
        .any(|&(dx, dy)| map.is_blocking_at(pos + Vec2::new(dx, dy)))
}

/// Apply movement and turning, resolving X and Y separately so the player
/// slides along walls.
pub fn step_player(pose: &mut PlayerPose, intent: &PlayerIntent, map: &OccupancyMap, tuning: &PlayerTuning, dt: f32) {
    pose.angle = normalize_angle(pose.angle + intent.turn.clamp(-1.0, 1.0) * tuning.turn_speed * dt);

    let forward = heading(pose.angle) * intent.forward.clamp(-1.0, 1.0);
    let right = heading(pose.angle + FRAC_PI_2) * intent.strafe.clamp(-1.0, 1.0);
    let delta = (forward + right) * tuning.speed * dt;

    let try_x = Vec2::new(pose.position.x + delta.x, pose.position.y);
    if !collides(map, try_x, tuning.radius) {
        pose.position.x = try_x.x;
    }
    let try_y = Vec2::new(pose.position.x, pose.position.y + delta.y);
    if !collides(map, try_y, tuning.radius) {
        pose.position.y = try_y.y;
    }
}

// ── Weapon ────────────────────────────────────────────────────────────────────

/// Recoil and reload countdowns.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Weapon {
    recoil: f32,
    reload: f32,
    reload_total: f32,
}

impl Weapon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, dt: f32) {
        self.recoil = (self.recoil - dt).max(0.0);
        self.reload = (self.reload - dt).max(0.0);
    }

    pub fn is_reloading(&self) -> bool {
        self.reload > 0.0
    }

    pub fn is_recoiling(&self) -> bool {
        self.recoil > 0.0
    }

    pub fn ready(&self) -> bool {
        !self.is_reloading() && !self.is_recoiling()
    }

    /// Start the recoil timer if the weapon is ready.
    pub fn try_fire(&mut self, tuning: &PlayerTuning) -> bool {
        if !self.ready() {
            return false;
        }
        self.recoil = tuning.recoil_time;
        true
    }

    pub fn start_reload(&mut self, tuning: &PlayerTuning) {
        if !self.is_reloading() {
            self.reload = tuning.reload_time;
            self.reload_total = tuning.reload_time;
        }
    }

    /// How far the weapon is lowered, 0 when ready and peaking at 1 halfway
    /// through a reload.
    pub fn lowered(&self) -> f32 {
        if !self.is_reloading() || self.reload_total <= 0.0 {
            return 0.0;
        }
        let progress = 1.0 - self.reload / self.reload_total;
        1.0 - (2.0 * progress - 1.0).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fire_is_refused_during_recoil_and_reload() {
        let t = PlayerTuning::default();
        let mut w = Weapon::new();
        assert!(w.try_fire(&t));
        assert!(!w.try_fire(&t));
        w.update(t.recoil_time + 0.01);
        w.start_reload(&t);
        assert!(!w.try_fire(&t));
        w.update(t.reload_time + 0.01);
        assert!(w.try_fire(&t));
    }

    #[test]
    fn lowered_peaks_mid_reload() {
        let t = PlayerTuning::default();
        let mut w = Weapon::new();
        w.start_reload(&t);
        w.update(t.reload_time / 2.0);
        assert!((w.lowered() - 1.0).abs() < 1e-4);
    }
}
