//! Enemies: a fixed table of bodies with a parallel table of AI records.
//!
//! The table is filled once at level start and never resized; dead enemies
//! keep their slot and go on drawing their final death frame.

pub mod ai;
pub mod anim;
pub mod motion;

pub use ai::{AiMemory, AiRng, AiState, Perception, RngSource};
pub use anim::{AnimState, Animation, ShotStep};

use glam::Vec2;

use crate::assets::SpriteSet;
use crate::camera::Camera;
use crate::combat::{apply_damage, DamageOutcome};
use crate::config::{EnemyTuning, RenderTuning};
use crate::geometry::angle_to;
use crate::map::OccupancyMap;
use crate::projectile::{ProjectileKind, ProjectilePool};
use crate::renderer::{view_bucket, BillboardDraw, SpriteDraw};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(pub usize);

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Position before the last step that actually moved.
    pub previous: Vec2,
    pub facing: f32,
    pub health: i32,
    /// Cleared once the death animation has finished.
    pub alive: bool,
    pub anim: Animation,
    pub shoot_cooldown: f32,
}

impl Enemy {
    pub fn new(position: Vec2, health: i32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            previous: position,
            facing: 0.0,
            health,
            alive: true,
            anim: Animation::idle(),
            shoot_cooldown: 0.0,
        }
    }

    pub fn is_dying(&self) -> bool {
        self.anim.state.is_dying()
    }

    /// Can still be hit: alive and not already falling.
    pub fn is_targetable(&self) -> bool {
        self.alive && !self.is_dying()
    }
}

#[derive(Debug)]
pub struct EnemyTable {
    bodies: Vec<Enemy>,
    minds: Vec<AiMemory>,
    tuning: EnemyTuning,
}

impl EnemyTable {
    /// Spawn one enemy per position, up to the configured capacity.
    pub fn spawn(spawns: &[Vec2], tuning: &EnemyTuning) -> Self {
        if spawns.len() > tuning.capacity {
            tracing::warn!(
                requested = spawns.len(),
                capacity = tuning.capacity,
                "too many enemy spawns, extra ones ignored"
            );
        }
        let spawns = &spawns[..spawns.len().min(tuning.capacity)];
        let bodies = spawns.iter().map(|&p| Enemy::new(p, tuning.max_health)).collect();
        let minds = spawns.iter().map(|&p| AiMemory::new(p)).collect();
        tracing::info!(count = spawns.len(), "enemies spawned");
        Self { bodies, minds, tuning: tuning.clone() }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn tuning(&self) -> &EnemyTuning {
        &self.tuning
    }

    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.bodies.get(id.0)
    }

    pub fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.bodies.get_mut(id.0)
    }

    pub fn ai(&self, id: EnemyId) -> Option<&AiMemory> {
        self.minds.get(id.0)
    }

    pub fn ai_mut(&mut self, id: EnemyId) -> Option<&mut AiMemory> {
        self.minds.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EnemyId, &Enemy)> {
        self.bodies.iter().enumerate().map(|(i, e)| (EnemyId(i), e))
    }

    pub fn alive_count(&self) -> usize {
        self.bodies.iter().filter(|e| e.alive).count()
    }

    pub fn damage(&mut self, id: EnemyId, amount: i32, rng: &mut dyn AiRng) -> DamageOutcome {
        let Some(enemy) = self.bodies.get_mut(id.0) else {
            return DamageOutcome::Ignored;
        };
        let outcome = apply_damage(enemy, amount, &self.tuning, rng);
        tracing::debug!(enemy = id.0, amount, ?outcome, "enemy damaged");
        outcome
    }

    /// Advance every living enemy by `dt`.  Shots are spawned into `shots`.
    pub fn update(
        &mut self,
        dt: f32,
        player: Vec2,
        map: &OccupancyMap,
        rng: &mut dyn AiRng,
        shots: &mut ProjectilePool,
    ) {
        let tuning = &self.tuning;
        for (i, (enemy, mind)) in self.bodies.iter_mut().zip(self.minds.iter_mut()).enumerate() {
            if !enemy.alive {
                continue;
            }
            if enemy.is_dying() {
                if enemy.anim.advance_death(dt, tuning.death_frame_time) {
                    enemy.alive = false;
                    tracing::info!(enemy = i, "enemy died");
                }
                continue;
            }
            if enemy.anim.state == AnimState::Pain {
                enemy.anim.advance_pain(dt, tuning.pain_time);
                enemy.velocity = Vec2::ZERO;
                continue;
            }
            think_and_act(enemy, mind, dt, player, map, tuning, rng, shots);
        }
    }

    /// Queue every enemy in view as a billboard.
    pub fn queue_billboards<'a>(
        &self,
        camera: &Camera,
        eye: Vec2,
        facing: f32,
        set: &'a SpriteSet,
        render: &RenderTuning,
        out: &mut Vec<BillboardDraw<'a>>,
    ) {
        for enemy in &self.bodies {
            if let Some(draw) = enemy_billboard(enemy, camera, eye, facing, set, render) {
                out.push(draw);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn think_and_act(
    enemy: &mut Enemy,
    mind: &mut AiMemory,
    dt: f32,
    player: Vec2,
    map: &OccupancyMap,
    tuning: &EnemyTuning,
    rng: &mut dyn AiRng,
    shots: &mut ProjectilePool,
) {
    let start = enemy.position;
    let seen = Perception::observe(map, start, player, tuning);

    if enemy.shoot_cooldown > 0.0 {
        enemy.shoot_cooldown -= dt;
    }
    mind.think(start, &seen, dt, tuning, rng);

    if mind.state == AiState::Chasing
        && seen.sees_player
        && seen.distance < tuning.shoot_radius
        && enemy.shoot_cooldown <= 0.0
        && enemy.anim.state != AnimState::Shoot
    {
        enemy.anim.start_shoot();
        enemy.shoot_cooldown = tuning.shoot_cooldown;
    }

    enemy.velocity = Vec2::ZERO;
    if enemy.anim.state != AnimState::Shoot {
        if let Some((target, stop_at)) = mind.move_target(start, &seen, tuning) {
            let remaining = start.distance(target);
            if remaining > stop_at && remaining > tuning.min_step_distance {
                let step = motion::step_toward(map, start, target, mind.move_speed(tuning), dt, tuning.wall_clearance);
                enemy.position = step.position;
                enemy.velocity = step.velocity;
            }
        }
    }

    let moved = enemy.position - start;
    if enemy.anim.state == AnimState::Shoot {
        enemy.facing = angle_to(enemy.position, player);
        if enemy.anim.advance_shoot(dt, tuning.shoot_frame_time) == ShotStep::Fire
            && shots.spawn_aimed(ProjectileKind::EnemyFireball, enemy.position, player).is_none()
        {
            tracing::trace!("projectile pool full, shot dropped");
        }
    } else if moved.length() > tuning.facing_threshold {
        enemy.facing = motion::turn_toward(enemy.facing, moved.y.atan2(moved.x), tuning);
        enemy.previous = start;
        enemy.anim.walk(dt, tuning.walk_frame_time);
    } else {
        enemy.anim.stand();
    }
}

fn enemy_billboard<'a>(
    enemy: &Enemy,
    camera: &Camera,
    eye: Vec2,
    facing: f32,
    set: &'a SpriteSet,
    render: &RenderTuning,
) -> Option<BillboardDraw<'a>> {
    let seen = camera.project(eye, facing, enemy.position, render.min_billboard_distance)?;
    let bucket = view_bucket(enemy.facing, seen.bearing);
    let slot = set.slot(enemy.anim.frame, bucket)?;
    let reference = set.slot(anim::WALK_FIRST, bucket)?.bitmap.height();
    if reference == 0 || slot.bitmap.is_empty() {
        return None;
    }

    let scale = camera.scale_at(seen.depth, render.enemy_sprite_scale) / reference as f32;
    let sprite_w = (slot.bitmap.width() as f32 * scale) as i32;
    let sprite_h = (slot.bitmap.height() as f32 * scale) as i32;
    let floor_line = camera.height as i32 / 2 + camera.scale_at(seen.depth, render.enemy_floor_offset) as i32;

    let depth = if enemy.anim.frame >= anim::FIRST_BILLBOARD {
        seen.depth - render.corpse_depth_bias
    } else {
        seen.depth
    };

    Some(BillboardDraw {
        bitmap: &slot.bitmap,
        placement: SpriteDraw::uniform(seen.screen_x as i32 - sprite_w / 2, floor_line - sprite_h, scale, slot.mirror),
        depth,
    })
}
