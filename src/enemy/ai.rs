//! Enemy decision making.
//!
//! One [`AiMemory`] per enemy slot.  Each tick the owner builds a
//! [`Perception`] of the player, lets the stuck detector run, then applies the
//! state transitions in priority order.  Randomness goes through [`AiRng`] so
//! tests can script it.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;

use crate::config::EnemyTuning;
use crate::geometry::{angle_to, heading, line_of_sight};
use crate::map::OccupancyMap;

// ── Randomness ────────────────────────────────────────────────────────────────

pub trait AiRng {
    /// Uniform sample in `[0, 1)`.
    fn unit(&mut self) -> f32;

    fn coin(&mut self) -> bool {
        self.unit() < 0.5
    }
}

/// Adapter for any `rand` generator.
#[derive(Debug)]
pub struct RngSource<R>(pub R);

impl<R: rand::Rng> AiRng for RngSource<R> {
    fn unit(&mut self) -> f32 {
        self.0.gen_range(0.0..1.0)
    }

    fn coin(&mut self) -> bool {
        self.0.gen_bool(0.5)
    }
}

// ── Perception ────────────────────────────────────────────────────────────────

/// What an enemy knows about the player this tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Perception {
    pub player: Vec2,
    pub distance: f32,
    pub angle_to_player: f32,
    pub sees_player: bool,
}

impl Perception {
    pub fn observe(map: &OccupancyMap, position: Vec2, player: Vec2, tuning: &EnemyTuning) -> Self {
        let sees_player = line_of_sight(position, player, tuning.los_step, tuning.los_min_length, |p| {
            map.is_blocking_at(p)
        });
        Self {
            player,
            distance: position.distance(player),
            angle_to_player: angle_to(position, player),
            sees_player,
        }
    }

    pub fn in_detection_range(&self, tuning: &EnemyTuning) -> bool {
        self.sees_player && self.distance < tuning.detection_radius
    }
}

// ── State machine ─────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AiState {
    #[default]
    Idle,
    Chasing,
    Searching,
    Alert,
    Unstuck,
}

/// Per-enemy AI record.
#[derive(Clone, Debug, PartialEq)]
pub struct AiMemory {
    pub state: AiState,
    /// Where the player was last seen, or the next search waypoint.
    pub last_seen: Vec2,
    pub memory_timer: f32,
    pub alert_timer: f32,
    pub search_timer: f32,
    pub search_points: u32,
    pub patrol_angle: f32,
    pub stuck_timer: f32,
    /// Position the stuck detector measures progress from.
    pub stuck_anchor: Vec2,
    pub escape_angle: f32,
    pub unstuck_timer: f32,
}

impl AiMemory {
    pub fn new(position: Vec2) -> Self {
        Self {
            state: AiState::Idle,
            last_seen: position,
            memory_timer: 0.0,
            alert_timer: 0.0,
            search_timer: 0.0,
            search_points: 0,
            patrol_angle: 0.0,
            stuck_timer: 0.0,
            stuck_anchor: position,
            escape_angle: 0.0,
            unstuck_timer: 0.0,
        }
    }

    /// Stuck detection followed by one transition step.
    pub fn think(
        &mut self,
        position: Vec2,
        seen: &Perception,
        dt: f32,
        tuning: &EnemyTuning,
        rng: &mut dyn AiRng,
    ) {
        self.detect_stuck(position, seen, dt, tuning, rng);
        self.transition(position, seen, dt, tuning, rng);
    }

    /// Force `Unstuck` when a chasing or searching enemy has barely moved for
    /// too long.  Returns true on the tick the escape starts.
    pub fn detect_stuck(
        &mut self,
        position: Vec2,
        seen: &Perception,
        dt: f32,
        tuning: &EnemyTuning,
        rng: &mut dyn AiRng,
    ) -> bool {
        let pursuing = matches!(self.state, AiState::Chasing | AiState::Searching);
        if pursuing && position.distance(self.stuck_anchor) < tuning.stuck_threshold {
            self.stuck_timer += dt;
            if self.stuck_timer > tuning.stuck_time {
                let offset = (tuning.escape_min_degrees + rng.unit() * tuning.escape_spread_degrees).to_radians();
                let sign = if rng.coin() { 1.0 } else { -1.0 };
                self.escape_angle = seen.angle_to_player + sign * offset;
                self.state = AiState::Unstuck;
                self.stuck_timer = 0.0;
                self.unstuck_timer = 0.0;
                tracing::debug!(escape = self.escape_angle, "enemy stuck, escaping");
                return true;
            }
        } else {
            self.stuck_timer = 0.0;
            self.stuck_anchor = position;
        }
        false
    }

    /// Apply the first transition rule that matches.
    pub fn transition(
        &mut self,
        position: Vec2,
        seen: &Perception,
        dt: f32,
        tuning: &EnemyTuning,
        rng: &mut dyn AiRng,
    ) {
        if seen.in_detection_range(tuning) && self.state != AiState::Unstuck {
            self.state = AiState::Chasing;
            self.last_seen = seen.player;
            self.memory_timer = tuning.memory_time;
            self.alert_timer = tuning.alert_after_chase;
            return;
        }

        match self.state {
            AiState::Chasing if !seen.sees_player => {
                self.state = AiState::Searching;
                self.search_timer = tuning.search_time;
                self.search_points = 0;
                self.patrol_angle = seen.angle_to_player;
            }
            AiState::Searching => {
                self.memory_timer -= dt;
                self.search_timer -= dt;
                if position.distance(self.last_seen) < tuning.search_arrival_radius
                    && self.search_points < tuning.search_point_cap
                {
                    self.search_points += 1;
                    self.patrol_angle += FRAC_PI_2 + (rng.unit() - 0.5) * tuning.search_jitter;
                    self.last_seen += heading(self.patrol_angle) * tuning.search_step;
                }
                if self.search_timer <= 0.0 {
                    self.state = AiState::Alert;
                    self.alert_timer = tuning.alert_after_search;
                }
            }
            AiState::Alert => {
                self.alert_timer -= dt;
                if self.alert_timer <= 0.0 {
                    self.state = AiState::Idle;
                }
            }
            AiState::Unstuck => {
                self.unstuck_timer += dt;
                if self.unstuck_timer > tuning.unstuck_time {
                    self.unstuck_timer = 0.0;
                    if seen.in_detection_range(tuning) {
                        self.state = AiState::Chasing;
                        self.last_seen = seen.player;
                        self.memory_timer = tuning.memory_time;
                    } else {
                        self.state = AiState::Idle;
                    }
                }
            }
            _ => {}
        }
    }

    /// Where this state wants to walk, with the distance at which it stops.
    pub fn move_target(&self, position: Vec2, seen: &Perception, tuning: &EnemyTuning) -> Option<(Vec2, f32)> {
        match self.state {
            AiState::Chasing => Some((seen.player, tuning.min_approach)),
            AiState::Searching => Some((self.last_seen, tuning.min_approach)),
            AiState::Unstuck => Some((position + heading(self.escape_angle) * tuning.unstuck_lookahead, 0.0)),
            AiState::Idle | AiState::Alert => None,
        }
    }

    pub fn move_speed(&self, tuning: &EnemyTuning) -> f32 {
        match self.state {
            AiState::Searching => tuning.speed * tuning.search_speed_factor,
            _ => tuning.speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f32);

    impl AiRng for Fixed {
        fn unit(&mut self) -> f32 {
            self.0
        }
    }

    fn seen(sees: bool, distance: f32) -> Perception {
        Perception {
            player: Vec2::new(distance, 0.0),
            distance,
            angle_to_player: 0.0,
            sees_player: sees,
        }
    }

    #[test]
    fn losing_sight_starts_a_search_toward_the_player() {
        let t = EnemyTuning::default();
        let mut ai = AiMemory::new(Vec2::ZERO);
        ai.state = AiState::Chasing;
        ai.transition(Vec2::ZERO, &seen(false, 5.0), 0.016, &t, &mut Fixed(0.5));
        assert_eq!(ai.state, AiState::Searching);
        assert_eq!(ai.search_points, 0);
        assert_eq!(ai.patrol_angle, 0.0);
        assert_eq!(ai.search_timer, t.search_time);
    }

    #[test]
    fn unstuck_ignores_the_player_until_it_times_out() {
        let t = EnemyTuning::default();
        let mut ai = AiMemory::new(Vec2::ZERO);
        ai.state = AiState::Unstuck;
        ai.transition(Vec2::ZERO, &seen(true, 2.0), 0.5, &t, &mut Fixed(0.5));
        assert_eq!(ai.state, AiState::Unstuck);
        ai.transition(Vec2::ZERO, &seen(true, 2.0), 0.6, &t, &mut Fixed(0.5));
        assert_eq!(ai.state, AiState::Chasing);
    }

    #[test]
    fn escape_heading_turns_45_to_90_degrees_off_the_player() {
        let t = EnemyTuning::default();
        let mut ai = AiMemory::new(Vec2::ZERO);
        ai.state = AiState::Chasing;
        let mut rng = Fixed(0.9);
        let mut escaped = false;
        for _ in 0..200 {
            if ai.detect_stuck(Vec2::ZERO, &seen(true, 5.0), 0.05, &t, &mut rng) {
                escaped = true;
                break;
            }
        }
        assert!(escaped);
        let offset = ai.escape_angle.abs();
        assert!(offset >= std::f32::consts::FRAC_PI_4 - 1e-4 && offset <= FRAC_PI_2 + 1e-4);
    }
}
