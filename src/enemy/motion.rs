use glam::Vec2;

use crate::config::EnemyTuning;
use crate::geometry::{normalize_angle, wrap_angle, CARDINALS};
use crate::map::OccupancyMap;

/// A body of half-width `clearance` fits at `pos`: its centre and the four
/// axis-aligned offsets around it are all in open cells.
pub fn position_valid(map: &OccupancyMap, pos: Vec2, clearance: f32) -> bool {
    !map.is_blocking_at(pos) && CARDINALS.iter().all(|c| !map.is_blocking_at(pos + *c * clearance))
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Step {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Move from `from` toward `target` at `speed`, sliding along walls.
///
/// The full step is tried first, then its X component alone, then its Y
/// component alone.  If none fits the body stays put with zero velocity.
pub fn step_toward(map: &OccupancyMap, from: Vec2, target: Vec2, speed: f32, dt: f32, clearance: f32) -> Step {
    let dir = (target - from).normalize_or_zero();
    let delta = dir * speed * dt;
    let candidates = [from + delta, Vec2::new(from.x + delta.x, from.y), Vec2::new(from.x, from.y + delta.y)];

    for candidate in candidates {
        if candidate != from && position_valid(map, candidate, clearance) {
            let velocity = if dt > 0.0 { (candidate - from) / dt } else { Vec2::ZERO };
            return Step { position: candidate, velocity };
        }
    }
    Step { position: from, velocity: Vec2::ZERO }
}

/// Turn `facing` toward `desired`: large errors snap, medium ones ease by a
/// fixed fraction and tiny ones are ignored.
pub fn turn_toward(facing: f32, desired: f32, tuning: &EnemyTuning) -> f32 {
    let diff = wrap_angle(desired - facing);
    let turned = if diff.abs() > tuning.turn_snap {
        desired
    } else if diff.abs() > tuning.turn_ease_min {
        facing + diff * tuning.turn_ease_rate
    } else {
        facing
    };
    normalize_angle(turned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> OccupancyMap {
        OccupancyMap::from_rows(&["#####", "#...#", "#####"]).unwrap()
    }

    #[test]
    fn clearance_keeps_the_body_off_walls() {
        let map = corridor();
        assert!(position_valid(&map, Vec2::new(2.5, 1.5), 0.25));
        assert!(!position_valid(&map, Vec2::new(2.5, 1.2), 0.25));
    }

    #[test]
    fn diagonal_blocked_slides_along_the_corridor() {
        let map = corridor();
        let from = Vec2::new(2.0, 1.5);
        let step = step_toward(&map, from, Vec2::new(4.0, 3.5), 5.0, 0.1, 0.25);
        assert_eq!(step.position.y, from.y);
        assert!(step.position.x > from.x);
    }

    #[test]
    fn snap_and_ease() {
        let t = EnemyTuning::default();
        assert_eq!(turn_toward(0.0, 1.0, &t), 1.0);
        let eased = turn_toward(0.0, 0.2, &t);
        assert!((eased - 0.06).abs() < 1e-6);
        assert_eq!(turn_toward(0.0, 0.05, &t), 0.0);
    }
}
