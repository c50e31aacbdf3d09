//! Per-tick simulation and per-frame rendering.
//!
//! A tick runs player, enemies, then projectiles in that order.  A frame
//! paints walls (filling the depth buffer), then enemies, then projectiles,
//! then the overlays.

use glam::Vec2;

use crate::assets::GameAssets;
use crate::camera::Camera;
use crate::combat::{hitscan, DamageOutcome, Hitscan};
use crate::config::{Tuning, WeaponMode};
use crate::enemy::{AiRng, EnemyId, EnemyTable};
use crate::error::GameError;
use crate::map::OccupancyMap;
use crate::player::{step_player, PlayerIntent, PlayerPose, Weapon};
use crate::projectile::{ProjectileKind, ProjectilePool};
use crate::renderer::overlay::{draw_minimap, draw_weapon};
use crate::renderer::{draw_far_to_near, BillboardDraw, DepthBuffer, FrameBuffer, Raycaster};

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// The clamped step actually simulated.
    pub dt: f32,
    pub fired: bool,
    pub enemy_hits: Vec<(EnemyId, DamageOutcome)>,
    pub player_hit: bool,
}

pub struct World {
    pub tuning: Tuning,
    pub map: OccupancyMap,
    pub player: PlayerPose,
    pub weapon: Weapon,
    pub enemies: EnemyTable,
    pub projectiles: ProjectilePool,
    /// Hostile hits taken so far.
    pub player_hits: u32,
    rng: Box<dyn AiRng>,
}

impl World {
    pub fn new(tuning: Tuning, rng: Box<dyn AiRng>) -> Result<Self, GameError> {
        let map = OccupancyMap::from_rows(&tuning.level.rows)?;
        let [px, py] = tuning.level.player_start;
        let player = PlayerPose::new(Vec2::new(px, py), tuning.level.player_angle);
        let spawns: Vec<Vec2> = tuning.level.enemy_spawns.iter().map(|&[x, y]| Vec2::new(x, y)).collect();
        let enemies = EnemyTable::spawn(&spawns, &tuning.enemy);
        let projectiles = ProjectilePool::new(&tuning.projectile);

        tracing::info!(
            width = map.width(),
            height = map.height(),
            enemies = enemies.len(),
            "level ready"
        );
        Ok(Self {
            map,
            player,
            weapon: Weapon::new(),
            enemies,
            projectiles,
            player_hits: 0,
            rng,
            tuning,
        })
    }

    /// Clamp a raw frame delta to `[0, max_dt]`.  Non-finite deltas become 0.
    pub fn clamp_dt(&self, raw: f32) -> f32 {
        if raw.is_finite() { raw.clamp(0.0, self.tuning.sim.max_dt) } else { 0.0 }
    }

    pub fn tick(&mut self, raw_dt: f32, intent: &PlayerIntent) -> TickReport {
        let dt = self.clamp_dt(raw_dt);
        let mut report = TickReport { dt, ..Default::default() };
        let pt = &self.tuning.player;

        step_player(&mut self.player, intent, &self.map, pt, dt);
        self.weapon.update(dt);
        if intent.reload {
            self.weapon.start_reload(pt);
        }
        if intent.fire && self.weapon.try_fire(pt) {
            report.fired = true;
            match pt.weapon {
                WeaponMode::Hitscan => {
                    let shot = Hitscan {
                        eye: self.player.position,
                        angle: self.player.angle,
                        range: pt.hitscan_range,
                        radius: self.tuning.enemy.radius,
                    };
                    if let Some(id) = hitscan(&shot, &self.enemies, &self.map) {
                        let outcome = self.enemies.damage(id, pt.damage, self.rng.as_mut());
                        report.enemy_hits.push((id, outcome));
                    }
                }
                WeaponMode::Projectile => {
                    self.projectiles.spawn_angled(ProjectileKind::PlayerBullet, self.player.position, self.player.angle);
                }
            }
        }

        self.enemies.update(dt, self.player.position, &self.map, self.rng.as_mut(), &mut self.projectiles);

        self.projectiles.update(dt, &self.map);
        let bullet_hits = self.projectiles.hit_enemies(&mut self.enemies, pt.damage, self.rng.as_mut());
        report.enemy_hits.extend(bullet_hits);
        if self.projectiles.check_player_hit(self.player.position, pt.hit_radius) {
            self.player_hits += 1;
            report.player_hit = true;
            tracing::info!(hits = self.player_hits, "player hit");
        }
        report
    }
}

/// Owns the frame and depth buffers and paints a [`World`] into them.
pub struct SceneRenderer {
    raycaster: Raycaster,
    frame: FrameBuffer,
    depth: DepthBuffer,
}

impl SceneRenderer {
    pub fn new(tuning: &Tuning) -> Self {
        let r = &tuning.render;
        Self {
            raycaster: Raycaster::new(Camera::from_tuning(r), r),
            frame: FrameBuffer::new(r.width, r.height),
            depth: DepthBuffer::new(r.width, r.max_distance),
        }
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn depth(&self) -> &DepthBuffer {
        &self.depth
    }

    pub fn render(&mut self, world: &World, assets: &GameAssets) -> &FrameBuffer {
        let r = &world.tuning.render;
        let eye = world.player.position;
        let facing = world.player.angle;

        self.raycaster.render(
            eye,
            facing,
            &world.map,
            &assets.wall,
            assets.ceiling.as_deref(),
            &mut self.frame,
            &mut self.depth,
        );

        let camera = *self.raycaster.camera();
        let mut draws: Vec<BillboardDraw<'_>> = Vec::new();
        world.enemies.queue_billboards(&camera, eye, facing, &assets.enemy, r, &mut draws);
        draw_far_to_near(&mut self.frame, &self.depth, &mut draws);

        draws.clear();
        world.projectiles.queue_billboards(&camera, eye, facing, &assets.projectile, r, &mut draws);
        draw_far_to_near(&mut self.frame, &self.depth, &mut draws);

        draw_weapon(
            &mut self.frame,
            &assets.weapon,
            r.weapon_scale,
            r.weapon_margin,
            world.weapon.lowered() * r.weapon_reload_drop,
        );
        if r.minimap {
            draw_minimap(&mut self.frame, &world.map, eye, facing);
        }
        &self.frame
    }
}
