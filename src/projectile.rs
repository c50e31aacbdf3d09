//! Fixed-size projectile pool.
//!
//! Frames address the projectile sprite set: the first two are travel frames
//! picked by distance flown and drawn by viewing angle, the rest are the
//! dissipation puff, timed and orientation-independent.

use glam::Vec2;

use crate::assets::{FrameKind, SpriteSet};
use crate::camera::Camera;
use crate::combat::DamageOutcome;
use crate::config::{ProjectileTuning, RenderTuning};
use crate::enemy::{AiRng, EnemyId, EnemyTable};
use crate::geometry::heading;
use crate::map::OccupancyMap;
use crate::renderer::{view_bucket, BillboardDraw, SpriteDraw};

pub const TRAVEL_FRAMES: usize = 2;
pub const DISSIPATE_FIRST: usize = TRAVEL_FRAMES;
pub const DISSIPATE_LAST: usize = 10;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ProjectileKind {
    #[default]
    EnemyFireball,
    PlayerBullet,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Projectile {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Launch angle; travel frames are drawn relative to it.
    pub angle: f32,
    pub kind: ProjectileKind,
    pub active: bool,
    pub frame: usize,
    pub frame_timer: f32,
    pub frame_time: f32,
    pub lifetime: f32,
    pub max_lifetime: f32,
    pub travelled: f32,
}

impl Projectile {
    pub fn is_dissipating(&self) -> bool {
        self.frame >= DISSIPATE_FIRST
    }

    /// Angle slot to draw for a viewer looking along `bearing`.
    pub fn view_slot(&self, bearing: f32) -> usize {
        if self.is_dissipating() { 0 } else { view_bucket(self.angle, bearing) }
    }
}

#[derive(Debug)]
pub struct ProjectilePool {
    slots: Vec<Projectile>,
    tuning: ProjectileTuning,
}

impl ProjectilePool {
    pub fn new(tuning: &ProjectileTuning) -> Self {
        Self { slots: vec![Projectile::default(); tuning.capacity], tuning: tuning.clone() }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, index: usize) -> Option<&Projectile> {
        self.slots.get(index)
    }

    pub fn active(&self) -> impl Iterator<Item = &Projectile> {
        self.slots.iter().filter(|p| p.active)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Fire from `origin` toward `target`.  Aim vectors shorter than the
    /// minimum aim distance are used unnormalised.
    pub fn spawn_aimed(&mut self, kind: ProjectileKind, origin: Vec2, target: Vec2) -> Option<usize> {
        let mut dir = target - origin;
        let len = dir.length();
        if len > self.tuning.aim_min_distance {
            dir /= len;
        }
        self.spawn(kind, origin, dir, dir.y.atan2(dir.x))
    }

    /// Fire from `origin` along `angle`.
    pub fn spawn_angled(&mut self, kind: ProjectileKind, origin: Vec2, angle: f32) -> Option<usize> {
        self.spawn(kind, origin, heading(angle), angle)
    }

    fn spawn(&mut self, kind: ProjectileKind, origin: Vec2, dir: Vec2, angle: f32) -> Option<usize> {
        let Some(index) = self.slots.iter().position(|p| !p.active) else {
            tracing::debug!(?kind, "projectile pool exhausted");
            return None;
        };
        let (speed, frame_time) = match kind {
            ProjectileKind::EnemyFireball => (self.tuning.speed, self.tuning.enemy_frame_time),
            ProjectileKind::PlayerBullet => {
                (self.tuning.speed * self.tuning.player_speed_factor, self.tuning.player_frame_time)
            }
        };
        self.slots[index] = Projectile {
            position: origin,
            velocity: dir * speed,
            angle,
            kind,
            active: true,
            frame: 0,
            frame_timer: 0.0,
            frame_time,
            lifetime: 0.0,
            max_lifetime: self.tuning.lifetime,
            travelled: 0.0,
        };
        Some(index)
    }

    pub fn update(&mut self, dt: f32, map: &OccupancyMap) {
        let cutoff = self.tuning.travel_cutoff;
        for p in self.slots.iter_mut().filter(|p| p.active) {
            p.lifetime += dt;
            if p.lifetime >= p.max_lifetime {
                p.active = false;
                continue;
            }

            let step = p.velocity * dt;
            p.position += step;
            p.travelled += step.length();
            if map.is_blocking_at(p.position) {
                p.active = false;
                continue;
            }

            if !p.is_dissipating() {
                if p.travelled < cutoff {
                    p.frame = (p.travelled.floor() as usize).min(TRAVEL_FRAMES - 1);
                } else {
                    p.frame = DISSIPATE_FIRST;
                    p.frame_timer = 0.0;
                }
            } else {
                p.frame_timer += dt;
                if p.frame_timer >= p.frame_time {
                    p.frame_timer = 0.0;
                    p.frame += 1;
                    if p.frame > DISSIPATE_LAST {
                        p.active = false;
                    }
                }
            }
        }
    }

    /// Retire the first hostile projectile within `radius` plus the
    /// projectile collision radius of `player`.  Returns true on a hit.
    pub fn check_player_hit(&mut self, player: Vec2, radius: f32) -> bool {
        let reach = radius + self.tuning.collision_radius;
        let hit = self
            .slots
            .iter_mut()
            .find(|p| p.active && p.kind == ProjectileKind::EnemyFireball && p.position.distance(player) < reach);
        match hit {
            Some(p) => {
                p.active = false;
                true
            }
            None => false,
        }
    }

    /// Player bullets damage the first targetable enemy they touch.
    pub fn hit_enemies(
        &mut self,
        enemies: &mut EnemyTable,
        damage: i32,
        rng: &mut dyn AiRng,
    ) -> Vec<(EnemyId, DamageOutcome)> {
        let reach = enemies.tuning().radius + self.tuning.collision_radius;
        let mut hits = Vec::new();
        for p in self.slots.iter_mut() {
            if !p.active || p.kind != ProjectileKind::PlayerBullet {
                continue;
            }
            let target = enemies
                .iter()
                .find(|(_, e)| e.is_targetable() && e.position.distance(p.position) < reach)
                .map(|(id, _)| id);
            if let Some(id) = target {
                p.active = false;
                hits.push((id, enemies.damage(id, damage, rng)));
            }
        }
        hits
    }

    pub fn queue_billboards<'a>(
        &self,
        camera: &Camera,
        eye: Vec2,
        facing: f32,
        set: &'a SpriteSet,
        render: &RenderTuning,
        out: &mut Vec<BillboardDraw<'a>>,
    ) {
        for p in self.active() {
            let Some(seen) = camera.project(eye, facing, p.position, render.min_billboard_distance) else {
                continue;
            };
            let bucket = match set.kind(p.frame) {
                Some(FrameKind::Directional) => p.view_slot(seen.bearing),
                _ => 0,
            };
            let Some(slot) = set.slot(p.frame, bucket) else {
                continue;
            };
            if slot.bitmap.is_empty() {
                continue;
            }

            let sprite_h = camera.scale_at(seen.depth, render.projectile_sprite_scale);
            let scale = sprite_h / slot.bitmap.height() as f32;
            let sprite_w = (slot.bitmap.width() as f32 * scale) as i32;
            let x = seen.screen_x as i32 - sprite_w / 2;
            let y = (camera.height as f32 / 2.0 - sprite_h * (0.5 + render.projectile_height_offset)) as i32;
            out.push(BillboardDraw {
                bitmap: &slot.bitmap,
                placement: SpriteDraw::uniform(x, y, scale, slot.mirror),
                depth: seen.depth,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dissipating_projectiles_always_use_slot_zero() {
        let p = Projectile { frame: 5, angle: 1.0, active: true, ..Default::default() };
        for i in 0..8 {
            assert_eq!(p.view_slot(i as f32), 0);
        }
    }

    #[test]
    fn short_aim_vectors_are_not_normalised() {
        let mut pool = ProjectilePool::new(&ProjectileTuning::default());
        let i = pool.spawn_aimed(ProjectileKind::EnemyFireball, Vec2::ZERO, Vec2::new(0.05, 0.0)).unwrap();
        let v = pool.get(i).unwrap().velocity;
        assert!((v.x - 0.05 * 4.0).abs() < 1e-6);
    }
}
