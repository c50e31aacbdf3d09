use glam::Vec2;
use gridfire::combat::*;
use gridfire::config::EnemyTuning;
use gridfire::enemy::{AiRng, AnimState, Enemy, EnemyId, EnemyTable};
use gridfire::map::OccupancyMap;

struct Always(f32);

impl AiRng for Always {
    fn unit(&mut self) -> f32 {
        self.0
    }
}

fn fresh() -> Enemy {
    Enemy::new(Vec2::new(2.5, 2.5), EnemyTuning::default().max_health)
}

fn shot_east(eye: Vec2) -> Hitscan {
    Hitscan { eye, angle: 0.0, range: 20.0, radius: 0.25 }
}

#[test]
fn negative_damage_heals_nothing() {
    let mut e = fresh();
    let outcome = apply_damage(&mut e, -40, &EnemyTuning::default(), &mut Always(0.9));
    assert_eq!(outcome, DamageOutcome::Hurt { health: 100 });
}

#[test]
fn exact_lethal_damage_is_an_ordinary_death() {
    let t = EnemyTuning::default();
    let mut e = fresh();
    assert_eq!(apply_damage(&mut e, 100, &t, &mut Always(0.0)), DamageOutcome::Killed { violent: false });
    assert_eq!(e.anim.state, AnimState::Death);
    assert!(e.alive, "alive until the death sequence finishes");
    assert!(!e.is_targetable());
}

#[test]
fn violent_threshold_is_inclusive() {
    let t = EnemyTuning::default();
    let mut e = fresh();
    assert_eq!(apply_damage(&mut e, 149, &t, &mut Always(0.0)), DamageOutcome::Killed { violent: false });

    let mut e = fresh();
    assert_eq!(apply_damage(&mut e, 150, &t, &mut Always(0.0)), DamageOutcome::Killed { violent: true });
    assert_eq!(e.anim.state, AnimState::ViolentDeath);
}

#[test]
fn dying_enemies_ignore_further_hits() {
    let t = EnemyTuning::default();
    let mut e = fresh();
    apply_damage(&mut e, 100, &t, &mut Always(0.0));
    let health = e.health;
    let anim = e.anim;
    assert_eq!(apply_damage(&mut e, 1000, &t, &mut Always(0.0)), DamageOutcome::Ignored);
    assert_eq!(e.health, health);
    assert_eq!(e.anim, anim);
}

#[test]
fn pain_roll_uses_the_configured_chance() {
    let t = EnemyTuning { pain_chance: 0.25, ..EnemyTuning::default() };
    let mut e = fresh();
    assert_eq!(apply_damage(&mut e, 10, &t, &mut Always(0.2)), DamageOutcome::Pain { health: 90 });
    e.anim.stand();
    assert_eq!(apply_damage(&mut e, 10, &t, &mut Always(0.25)), DamageOutcome::Hurt { health: 80 });
    assert_eq!(e.anim.state, AnimState::Idle);
}

#[test]
fn damage_saturates_instead_of_wrapping() {
    let mut e = fresh();
    e.health = i32::MIN + 5;
    let outcome = apply_damage(&mut e, i32::MAX, &EnemyTuning::default(), &mut Always(0.0));
    assert_eq!(outcome, DamageOutcome::Killed { violent: true });
    assert_eq!(e.health, i32::MIN);
}

// ── Hitscan ────────────────────────────────────────────────────────────────

#[test]
fn hitscan_picks_the_nearest_enemy_on_the_line() {
    let map = OccupancyMap::open(16, 4);
    let table = EnemyTable::spawn(
        &[Vec2::new(9.5, 1.5), Vec2::new(4.5, 1.5), Vec2::new(3.0, 3.0)],
        &EnemyTuning::default(),
    );
    assert_eq!(hitscan(&shot_east(Vec2::new(1.5, 1.5)), &table, &map), Some(EnemyId(1)));
}

#[test]
fn hitscan_misses_off_axis_and_behind() {
    let map = OccupancyMap::open(16, 4);
    let table = EnemyTable::spawn(&[Vec2::new(5.0, 2.0)], &EnemyTuning::default());
    let eye = Vec2::new(8.0, 1.5);
    assert_eq!(hitscan(&shot_east(eye), &table, &map), None);
    assert_eq!(hitscan(&Hitscan { angle: std::f32::consts::PI, ..shot_east(eye) }, &table, &map), None);
}

#[test]
fn hitscan_respects_range() {
    let map = OccupancyMap::open(16, 4);
    let table = EnemyTable::spawn(&[Vec2::new(12.5, 1.5)], &EnemyTuning::default());
    let shot = Hitscan { range: 5.0, ..shot_east(Vec2::new(1.5, 1.5)) };
    assert_eq!(hitscan(&shot, &table, &map), None);
}

#[test]
fn walls_stop_hitscan() {
    let map = OccupancyMap::from_rows(&["........", "....#...", "........"]).unwrap();
    let table = EnemyTable::spawn(&[Vec2::new(6.5, 1.5)], &EnemyTuning::default());
    assert_eq!(hitscan(&shot_east(Vec2::new(1.5, 1.5)), &table, &map), None);
    assert_eq!(hitscan(&shot_east(Vec2::new(5.5, 1.5)), &table, &map), Some(EnemyId(0)));
}

#[test]
fn hitscan_skips_the_dying() {
    let map = OccupancyMap::open(16, 4);
    let mut table = EnemyTable::spawn(&[Vec2::new(4.5, 1.5), Vec2::new(8.5, 1.5)], &EnemyTuning::default());
    table.damage(EnemyId(0), 500, &mut Always(0.0));
    assert_eq!(hitscan(&shot_east(Vec2::new(1.5, 1.5)), &table, &map), Some(EnemyId(1)));
}
