use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use glam::Vec2;
use gridfire::assets::{argb, Bitmap};
use gridfire::camera::Camera;
use gridfire::config::RenderTuning;
use gridfire::geometry::angle_bucket;
use gridfire::map::OccupancyMap;
use gridfire::renderer::*;
use proptest::prelude::*;

const RED: u32 = argb(255, 255, 0, 0);
const BLUE: u32 = argb(255, 0, 0, 255);
const GREEN: u32 = argb(255, 0, 255, 0);
const CLEAR: u32 = argb(0, 255, 255, 255);

/// First fixed-step sample along the ray that lands in a blocking cell,
/// looking no further than `until`.
fn march(map: &OccupancyMap, origin: Vec2, angle: f32, until: f32) -> Option<f32> {
    let dir = Vec2::new(angle.cos(), angle.sin());
    let step = 0.0005;
    let mut t = 0.0;
    while t < until {
        if map.is_blocking_at(origin + dir * t) {
            return Some(t);
        }
        t += step;
    }
    None
}

fn small_tuning(width: u32, height: u32) -> RenderTuning {
    RenderTuning { width, height, ..RenderTuning::default() }
}

// ── DDA ────────────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn dda_matches_a_fine_march(x in 1.05f32..22.95, y in 1.05f32..22.95, angle in 0.0f32..TAU) {
        let map = OccupancyMap::default_level();
        let origin = Vec2::new(x, y);
        prop_assume!(!map.is_blocking_at(origin));

        let hit = cast_ray(&map, origin, angle, 20.0);
        prop_assert!(hit.distance <= 20.0);
        // Nothing blocks the ray before the reported hit.
        prop_assert_eq!(march(&map, origin, angle, hit.distance - 1e-3), None);

        match hit.cell {
            Some((row, col)) => {
                prop_assert!(map.is_blocking(row, col));
                let p = hit.point;
                let eps = 1e-3;
                prop_assert!(p.x >= col as f32 - eps && p.x <= col as f32 + 1.0 + eps);
                prop_assert!(p.y >= row as f32 - eps && p.y <= row as f32 + 1.0 + eps);
            }
            None => prop_assert_eq!(hit.distance, 20.0),
        }
    }
}

#[test]
fn ray_leaving_the_grid_is_a_miss_at_max_distance() {
    let map = OccupancyMap::open(4, 4);
    let hit = cast_ray(&map, Vec2::new(2.0, 2.0), 0.0, 20.0);
    assert_eq!(hit.distance, 20.0);
    assert_eq!(hit.cell, None);
}

#[test]
fn ray_starting_in_a_wall_hits_immediately() {
    let map = OccupancyMap::walled(6, 6);
    let hit = cast_ray(&map, Vec2::new(0.5, 3.5), 0.3, 20.0);
    assert_eq!(hit.distance, 0.0);
    assert_eq!(hit.cell, Some((3, 0)));
}

#[test]
fn axis_aligned_rays_report_the_face_crossed() {
    let map = OccupancyMap::walled(10, 10);
    let east = cast_ray(&map, Vec2::new(5.5, 5.5), 0.0, 20.0);
    assert!((east.distance - 3.5).abs() < 1e-4);
    assert_eq!(east.face, WallFace::Vertical);
    assert_eq!(east.cell, Some((5, 9)));

    let south = cast_ray(&map, Vec2::new(5.5, 5.5), FRAC_PI_2, 20.0);
    assert!((south.distance - 3.5).abs() < 1e-4);
    assert_eq!(south.face, WallFace::Horizontal);
    assert_eq!(south.cell, Some((9, 5)));
}

// ── Frame ──────────────────────────────────────────────────────────────────

#[test]
fn depth_buffer_holds_corrected_distances() {
    let tuning = small_tuning(64, 40);
    let camera = Camera::from_tuning(&tuning);
    let raycaster = Raycaster::new(camera, &tuning);
    let map = OccupancyMap::default_level();
    let eye = Vec2::new(1.5, 21.5);
    let facing = 0.4;

    let mut frame = FrameBuffer::new(64, 40);
    let mut depth = DepthBuffer::new(64, tuning.max_distance);
    let wall = Bitmap::solid(8, 8, RED);
    raycaster.render(eye, facing, &map, &wall, None, &mut frame, &mut depth);

    for x in 0..64 {
        let angle = camera.ray_angle(facing, x);
        let expected = (cast_ray(&map, eye, angle, tuning.max_distance).distance * (angle - facing).cos())
            .max(tuning.depth_epsilon);
        let got = depth.get(x as i32).unwrap();
        assert!((got - expected).abs() < 1e-5, "column {x}: {got} vs {expected}");
    }
}

#[test]
fn facing_a_wall_paints_ceiling_wall_and_floor() {
    let tuning = small_tuning(32, 40);
    let raycaster = Raycaster::new(Camera::from_tuning(&tuning), &tuning);
    let map = OccupancyMap::walled(10, 10);
    let mut frame = FrameBuffer::new(32, 40);
    let mut depth = DepthBuffer::new(32, tuning.max_distance);
    let wall = Bitmap::solid(8, 8, argb(255, 200, 200, 200));

    raycaster.render(Vec2::new(5.5, 5.5), 0.0, &map, &wall, None, &mut frame, &mut depth);

    let centre = depth.get(16).unwrap();
    assert!((centre - 3.5).abs() < 1e-3);
    assert_eq!(frame.get(16, 0), Some(tuning.ceiling_color));
    assert_eq!(frame.get(16, 39), Some(tuning.floor_color));
    let mid = frame.get(16, 20).unwrap();
    assert_ne!(mid, tuning.floor_color);
    assert_ne!(mid, tuning.ceiling_color);
}

#[test]
fn rendering_is_deterministic() {
    let tuning = small_tuning(48, 32);
    let raycaster = Raycaster::new(Camera::from_tuning(&tuning), &tuning);
    let map = OccupancyMap::default_level();
    let wall = Bitmap::from_fn(16, 16, |x, y| argb(255, (x * 16) as u8, (y * 16) as u8, 90));
    let ceiling = Bitmap::from_fn(8, 8, |x, _| argb(255, 40, (x * 30) as u8, 40));

    let draw = || {
        let mut frame = FrameBuffer::new(48, 32);
        let mut depth = DepthBuffer::new(48, tuning.max_distance);
        raycaster.render(Vec2::new(8.3, 9.7), 2.2, &map, &wall, Some(&ceiling), &mut frame, &mut depth);
        (frame, depth)
    };
    let (f1, d1) = draw();
    let (f2, d2) = draw();
    assert_eq!(f1.pixels(), f2.pixels());
    assert_eq!(d1.as_slice(), d2.as_slice());
}

// ── Compositor ─────────────────────────────────────────────────────────────

#[test]
fn unit_scale_blit_copies_pixels() {
    let mut frame = FrameBuffer::new(4, 4);
    let bmp = Bitmap::from_fn(2, 2, |x, y| if (x + y) % 2 == 0 { RED } else { BLUE });
    draw_sprite(&mut frame, &bmp, SpriteDraw::uniform(1, 1, 1.0, false), None);
    assert_eq!(frame.get(1, 1), Some(RED));
    assert_eq!(frame.get(2, 1), Some(BLUE));
    assert_eq!(frame.get(1, 2), Some(BLUE));
    assert_eq!(frame.get(2, 2), Some(RED));
    assert_eq!(frame.get(0, 0), Some(0xFF00_0000));
}

#[test]
fn translucent_pixels_are_cut_out() {
    let mut frame = FrameBuffer::new(2, 1);
    frame.clear(GREEN);
    let bmp = Bitmap::from_fn(2, 1, |x, _| if x == 0 { CLEAR } else { argb(128, 0, 0, 255) });
    draw_sprite(&mut frame, &bmp, SpriteDraw::uniform(0, 0, 1.0, false), None);
    assert_eq!(frame.get(0, 0), Some(GREEN));
    assert_eq!(frame.get(1, 0), Some(argb(128, 0, 0, 255)));
}

#[test]
fn mirror_flips_columns() {
    let mut frame = FrameBuffer::new(3, 1);
    let bmp = Bitmap::from_fn(3, 1, |x, _| [RED, GREEN, BLUE][x as usize]);
    draw_sprite(&mut frame, &bmp, SpriteDraw::uniform(0, 0, 1.0, true), None);
    assert_eq!(frame.pixels(), &[BLUE, GREEN, RED]);
}

#[test]
fn doubled_scale_repeats_each_texel() {
    let mut frame = FrameBuffer::new(4, 1);
    let bmp = Bitmap::from_fn(2, 1, |x, _| if x == 0 { RED } else { BLUE });
    draw_sprite(&mut frame, &bmp, SpriteDraw::uniform(0, 0, 2.0, false), None);
    assert_eq!(frame.pixels(), &[RED, RED, BLUE, BLUE]);
}

#[test]
fn depth_test_hides_columns_behind_walls() {
    let mut frame = FrameBuffer::new(3, 1);
    let mut depth = DepthBuffer::new(3, 10.0);
    depth.set(1, 2.0);
    let bmp = Bitmap::solid(3, 1, RED);
    let test = DepthTest { buffer: &depth, depth: 5.0 };
    draw_sprite(&mut frame, &bmp, SpriteDraw::uniform(0, 0, 1.0, false), Some(test));
    assert_eq!(frame.get(0, 0), Some(RED));
    assert_eq!(frame.get(1, 0), Some(0xFF00_0000));
    assert_eq!(frame.get(2, 0), Some(RED));
}

#[test]
fn equal_depth_does_not_draw() {
    let mut frame = FrameBuffer::new(1, 1);
    let depth = DepthBuffer::new(1, 5.0);
    let bmp = Bitmap::solid(1, 1, RED);
    draw_sprite(&mut frame, &bmp, SpriteDraw::uniform(0, 0, 1.0, false), Some(DepthTest { buffer: &depth, depth: 5.0 }));
    assert_eq!(frame.get(0, 0), Some(0xFF00_0000));
}

#[test]
fn off_screen_blits_are_clipped() {
    let mut frame = FrameBuffer::new(4, 4);
    let bmp = Bitmap::solid(4, 4, RED);
    draw_sprite(&mut frame, &bmp, SpriteDraw::uniform(-3, -3, 1.0, false), None);
    draw_sprite(&mut frame, &bmp, SpriteDraw::uniform(100, 2, 1.0, false), None);
    assert_eq!(frame.get(0, 0), Some(RED));
    assert_eq!(frame.get(1, 0), Some(0xFF00_0000));
    assert_eq!(frame.get(0, 1), Some(0xFF00_0000));
}

#[test]
fn nearer_billboards_win_whatever_the_queue_order() {
    let depth = DepthBuffer::new(4, 20.0);
    let near = Bitmap::solid(2, 2, RED);
    let far = Bitmap::solid(2, 2, BLUE);
    let mut frame = FrameBuffer::new(4, 4);
    let mut draws = vec![
        BillboardDraw { bitmap: &near, placement: SpriteDraw::uniform(1, 1, 1.0, false), depth: 2.0 },
        BillboardDraw { bitmap: &far, placement: SpriteDraw::uniform(0, 0, 1.0, false), depth: 8.0 },
    ];
    draw_far_to_near(&mut frame, &depth, &mut draws);
    assert_eq!(frame.get(1, 1), Some(RED));
    assert_eq!(frame.get(0, 0), Some(BLUE));
}

proptest! {
    #[test]
    fn draw_time_mirror_matches_a_baked_copy(
        w in 1u32..9, h in 1u32..9, scale in 0.3f32..4.0, x in -6i32..12, seed in any::<u32>()
    ) {
        let bmp = Bitmap::from_fn(w, h, |px, py| {
            let v = seed.wrapping_mul(2654435761).wrapping_add(px * 31 + py * 17);
            if v % 3 == 0 { CLEAR } else { 0xFF00_0000 | (v & 0x00FF_FFFF) }
        });
        let baked = bmp.mirrored();

        let mut a = FrameBuffer::new(16, 16);
        let mut b = FrameBuffer::new(16, 16);
        draw_sprite(&mut a, &bmp, SpriteDraw::uniform(x, 1, scale, true), None);
        draw_sprite(&mut b, &baked, SpriteDraw::uniform(x, 1, scale, false), None);
        prop_assert_eq!(a.pixels(), b.pixels());
    }
}

proptest! {
    #[test]
    fn buckets_repeat_every_full_turn(
        k in 0usize..8, offset in -0.35f32..0.35, turns in -3i32..=3, bearing in -PI..PI
    ) {
        let t = k as f32 * FRAC_PI_4 + offset;
        let shifted = t + turns as f32 * TAU;
        prop_assert_eq!(angle_bucket(t), k);
        prop_assert_eq!(angle_bucket(shifted), k);
        prop_assert_eq!(angle_bucket(t + TAU), angle_bucket(t));

        let facing = bearing - PI + t;
        prop_assert_eq!(view_bucket(facing, bearing), k);
        prop_assert_eq!(view_bucket(facing + turns as f32 * TAU, bearing), k);
        prop_assert_eq!(view_bucket(facing, bearing + turns as f32 * TAU), k);
    }
}
