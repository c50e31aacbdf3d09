use glam::Vec2;

use crate::config::EnemyTuning;
use crate::enemy::{AiRng, Enemy, EnemyId, EnemyTable};
use crate::geometry::{heading, line_of_sight};
use crate::map::OccupancyMap;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Already dead or dying.
    Ignored,
    Hurt { health: i32 },
    /// Hurt and flinching; any shot in progress is cancelled.
    Pain { health: i32 },
    Killed { violent: bool },
}

/// Apply `amount` points of damage.  Negative amounts count as zero.
pub fn apply_damage(enemy: &mut Enemy, amount: i32, tuning: &EnemyTuning, rng: &mut dyn AiRng) -> DamageOutcome {
    if !enemy.is_targetable() {
        return DamageOutcome::Ignored;
    }
    enemy.health = enemy.health.saturating_sub(amount.max(0));

    if enemy.health <= 0 {
        let violent = enemy.health <= tuning.violent_death_threshold;
        enemy.anim.start_death(violent);
        enemy.velocity = Vec2::ZERO;
        return DamageOutcome::Killed { violent };
    }
    if rng.unit() < tuning.pain_chance {
        enemy.anim.start_pain();
        enemy.velocity = Vec2::ZERO;
        return DamageOutcome::Pain { health: enemy.health };
    }
    DamageOutcome::Hurt { health: enemy.health }
}

/// Instant shot along `angle` from `eye`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hitscan {
    pub eye: Vec2,
    pub angle: f32,
    pub range: f32,
    /// Perpendicular distance from the ray that still counts as a hit.
    pub radius: f32,
}

/// Nearest targetable enemy the shot passes through with a clear line of
/// sight.
pub fn hitscan(shot: &Hitscan, enemies: &EnemyTable, map: &OccupancyMap) -> Option<EnemyId> {
    let dir = heading(shot.angle);
    let tuning = enemies.tuning();
    let mut best: Option<(EnemyId, f32)> = None;

    for (id, enemy) in enemies.iter() {
        if !enemy.is_targetable() {
            continue;
        }
        let to = enemy.position - shot.eye;
        let dist = to.length();
        if dist > shot.range {
            continue;
        }
        let along = to.dot(dir);
        if along < 0.0 {
            continue;
        }
        let off_axis = (to - dir * along).length();
        if off_axis >= shot.radius {
            continue;
        }
        if best.is_some_and(|(_, d)| d <= dist) {
            continue;
        }
        if line_of_sight(shot.eye, enemy.position, tuning.los_step, tuning.los_min_length, |p| {
            map.is_blocking_at(p)
        }) {
            best = Some((id, dist));
        }
    }
    best.map(|(id, _)| id)
}
