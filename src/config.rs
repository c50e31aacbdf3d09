// ── Tunable configuration ─────────────────────────────────────────────────────
//
// Every gameplay and presentation constant lives here so a level or a balance
// pass can be expressed as a JSON file.  Any field omitted from the file keeps
// its default, so `{}` is a valid config.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::map::DEFAULT_LEVEL;

// ── Tuning ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub render: RenderTuning,
    pub enemy: EnemyTuning,
    pub projectile: ProjectileTuning,
    pub player: PlayerTuning,
    pub sim: SimTuning,
    pub level: LevelTuning,
}

impl Tuning {
    /// Parse a JSON document, filling every missing field with its default.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&text).map_err(|source| GameError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loaded tuning");
        Ok(tuning)
    }

    pub fn to_json_pretty(&self) -> String {
        // Plain data with string keys; serialization cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

// ── RenderTuning ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderTuning {
    /// Software frame width in pixels.
    pub width: u32,
    /// Software frame height in pixels.
    pub height: u32,
    /// Horizontal field of view in degrees.
    pub fov_degrees: f32,
    /// Rays that travel further than this report this distance.
    pub max_distance: f32,
    /// Lower bound for corrected wall distances.
    pub depth_epsilon: f32,
    /// Wall attenuation `1 / (1 + d² · k)`.
    pub wall_falloff: f32,
    /// Ceiling attenuation `1 / (1 + d² · k)`.
    pub ceiling_fog: f32,
    /// World units → ceiling texture repeats.
    pub ceiling_texture_scale: f32,
    /// ARGB colour used below the wall span.
    pub floor_color: u32,
    /// ARGB colour used above the wall span when no ceiling texture is loaded.
    pub ceiling_color: u32,
    /// Enemy sprite height as a multiple of `H / d`.
    pub enemy_sprite_scale: f32,
    /// Enemy foot line below the horizon as a multiple of `H / d`.
    pub enemy_floor_offset: f32,
    /// Projectile sprite height as a multiple of `H / d`.
    pub projectile_sprite_scale: f32,
    /// Fraction of the projectile sprite drawn below the horizon.
    pub projectile_height_offset: f32,
    /// Death frames are depth-tested this much nearer than their true depth.
    pub corpse_depth_bias: f32,
    /// Billboards nearer than this are culled.
    pub min_billboard_distance: f32,
    pub weapon_scale: f32,
    /// Gap between the weapon bitmap and the bottom edge, in pixels.
    pub weapon_margin: i32,
    /// Fraction of the weapon height it is lowered by while reloading.
    pub weapon_reload_drop: f32,
    pub minimap: bool,
}

impl RenderTuning {
    pub fn fov(&self) -> f32 {
        self.fov_degrees.to_radians()
    }
}

impl Default for RenderTuning {
    fn default() -> Self {
        Self {
            width: 620,
            height: 400,
            fov_degrees: 60.0,
            max_distance: 20.0,
            depth_epsilon: 1e-4,
            wall_falloff: 0.08,
            ceiling_fog: 0.1,
            ceiling_texture_scale: 0.6,
            floor_color: 0xFF0F_0F0F,
            ceiling_color: 0xFF26_2626,
            enemy_sprite_scale: 1.1,
            enemy_floor_offset: 0.8,
            projectile_sprite_scale: 0.6,
            projectile_height_offset: 0.10,
            corpse_depth_bias: 0.2,
            min_billboard_distance: 0.1,
            weapon_scale: 0.7,
            weapon_margin: 5,
            weapon_reload_drop: 0.35,
            minimap: true,
        }
    }
}

// ── EnemyTuning ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    /// Fixed size of the enemy table.
    pub capacity: usize,
    pub max_health: i32,
    pub speed: f32,
    /// Speed multiplier while searching.
    pub search_speed_factor: f32,
    /// Body radius used by hitscan and player bullets.
    pub radius: f32,
    /// Clearance kept from walls, checked along the four cardinals.
    pub wall_clearance: f32,
    pub detection_radius: f32,
    pub shoot_radius: f32,
    /// Chasing and searching enemies stop this close to their target.
    pub min_approach: f32,
    /// Targets closer than this are never stepped toward.
    pub min_step_distance: f32,
    pub memory_time: f32,
    pub alert_after_chase: f32,
    pub alert_after_search: f32,
    pub search_time: f32,
    pub search_arrival_radius: f32,
    pub search_point_cap: u32,
    pub search_step: f32,
    /// Width in radians of the uniform perturbation added to each patrol turn.
    pub search_jitter: f32,
    /// Displacement below which an enemy counts as not moving.
    pub stuck_threshold: f32,
    pub stuck_time: f32,
    pub unstuck_time: f32,
    /// Distance of the escape target point.
    pub unstuck_lookahead: f32,
    /// Smallest escape rotation away from the player direction.
    pub escape_min_degrees: f32,
    /// Escape rotation spread added on top of the minimum.
    pub escape_spread_degrees: f32,
    pub los_step: f32,
    pub los_min_length: f32,
    pub shoot_cooldown: f32,
    /// Probability that a non-lethal hit interrupts with pain.
    pub pain_chance: f32,
    /// Health at or below this after a lethal hit plays the violent death.
    pub violent_death_threshold: i32,
    /// Per-tick displacement above which the walk cycle runs.
    pub facing_threshold: f32,
    /// Turns sharper than this snap instantly.
    pub turn_snap: f32,
    /// Turns smaller than this are ignored.
    pub turn_ease_min: f32,
    /// Fraction of the remaining turn applied per tick when easing.
    pub turn_ease_rate: f32,
    pub walk_frame_time: f32,
    pub shoot_frame_time: f32,
    pub pain_time: f32,
    pub death_frame_time: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            capacity: 10,
            max_health: 100,
            speed: 1.8,
            search_speed_factor: 0.7,
            radius: 0.25,
            wall_clearance: 0.25,
            detection_radius: 8.0,
            shoot_radius: 6.0,
            min_approach: 0.8,
            min_step_distance: 0.1,
            memory_time: 3.0,
            alert_after_chase: 10.0,
            alert_after_search: 8.0,
            search_time: 6.0,
            search_arrival_radius: 1.2,
            search_point_cap: 4,
            search_step: 2.5,
            search_jitter: 1.0,
            stuck_threshold: 0.15,
            stuck_time: 2.5,
            unstuck_time: 1.0,
            unstuck_lookahead: 2.0,
            escape_min_degrees: 45.0,
            escape_spread_degrees: 45.0,
            los_step: 0.1,
            los_min_length: 0.1,
            shoot_cooldown: 1.5,
            pain_chance: 200.0 / 256.0,
            violent_death_threshold: -50,
            facing_threshold: 0.005,
            turn_snap: 0.3,
            turn_ease_min: 0.1,
            turn_ease_rate: 0.3,
            walk_frame_time: 0.15,
            shoot_frame_time: 0.15,
            pain_time: 0.25,
            death_frame_time: 0.2,
        }
    }
}

// ── ProjectileTuning ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub capacity: usize,
    pub speed: f32,
    pub player_speed_factor: f32,
    pub lifetime: f32,
    pub collision_radius: f32,
    /// Travelled distance at which the dissipation sequence starts.
    pub travel_cutoff: f32,
    pub enemy_frame_time: f32,
    pub player_frame_time: f32,
    /// Aim vectors shorter than this are used unnormalised.
    pub aim_min_distance: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            capacity: 50,
            speed: 4.0,
            player_speed_factor: 1.5,
            lifetime: 3.0,
            collision_radius: 0.3,
            travel_cutoff: 4.0,
            enemy_frame_time: 0.12,
            player_frame_time: 0.1,
            aim_min_distance: 0.1,
        }
    }
}

// ── PlayerTuning ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponMode {
    /// Instant ray against living enemies.
    Hitscan,
    /// Spawns a player bullet into the projectile pool.
    Projectile,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub speed: f32,
    /// Turn rate in radians per second.
    pub turn_speed: f32,
    /// Half-extent of the square checked against walls.
    pub radius: f32,
    /// Radius used when testing hostile projectiles against the player.
    pub hit_radius: f32,
    pub damage: i32,
    pub hitscan_range: f32,
    pub reload_time: f32,
    pub recoil_time: f32,
    pub weapon: WeaponMode,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: 3.5,
            turn_speed: 2.5,
            radius: 0.3,
            hit_radius: 0.3,
            damage: 70,
            hitscan_range: 20.0,
            reload_time: 0.8,
            recoil_time: 0.2,
            weapon: WeaponMode::Hitscan,
        }
    }
}

// ── SimTuning ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimTuning {
    /// Per-tick delta time is capped at this many seconds.
    pub max_dt: f32,
}

impl Default for SimTuning {
    fn default() -> Self {
        Self { max_dt: 0.05 }
    }
}

// ── LevelTuning ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelTuning {
    /// One string per map row; `#` or `1` block, `.`, `0` or space are open.
    pub rows: Vec<String>,
    pub player_start: [f32; 2],
    /// Initial facing in radians.
    pub player_angle: f32,
    pub enemy_spawns: Vec<[f32; 2]>,
}

impl Default for LevelTuning {
    fn default() -> Self {
        Self {
            rows: DEFAULT_LEVEL.iter().map(|r| r.to_string()).collect(),
            player_start: [1.5, 21.5],
            player_angle: 0.0,
            enemy_spawns: vec![
                [12.0, 10.0],
                [3.0, 3.0],
                [20.0, 3.0],
                [3.0, 15.0],
                [20.0, 16.0],
                [12.0, 19.5],
            ],
        }
    }
}
