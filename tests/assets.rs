use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use gridfire::assets::*;
use gridfire::GameError;
use image::{Rgba, RgbaImage};

const ONE_DIRECTIONAL: SetLayout = SetLayout { base: "TEST", frames: &[('A', FrameKind::Directional)] };
const ONE_BILLBOARD: SetLayout = SetLayout { base: "TEST", frames: &[('B', FrameKind::Billboard)] };

fn file_names(layout: &SetLayout) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for &(letter, kind) in layout.frames {
        for slot in 0..8 {
            names.insert(sprite_file_name(layout.base, letter, kind, slot));
        }
    }
    names
}

/// Write a distinct, asymmetric PNG for every file the layout needs.
fn write_set(dir: &Path, layout: &SetLayout) {
    for (i, name) in file_names(layout).iter().enumerate() {
        let shade = (i * 7 % 200) as u8 + 40;
        let img = RgbaImage::from_fn(6, 4, |x, _| {
            if x == 0 { Rgba([255, 0, 0, 255]) } else { Rgba([shade, shade, 0, 255]) }
        });
        img.save(dir.join(name)).unwrap();
    }
}

#[test]
fn file_names_follow_the_pairing_table() {
    assert_eq!(sprite_file_name("SLHV", 'A', FrameKind::Directional, 0), "SLHVA1.png");
    assert_eq!(sprite_file_name("SLHV", 'A', FrameKind::Directional, 1), "SLHVA2A8.png");
    assert_eq!(sprite_file_name("SLHV", 'A', FrameKind::Directional, 7), "SLHVA2A8.png");
    assert_eq!(sprite_file_name("SLHV", 'C', FrameKind::Directional, 4), "SLHVC5.png");
    assert_eq!(sprite_file_name("SLHV", 'O', FrameKind::Billboard, 3), "SLHVO0.png");
}

#[test]
fn directional_frames_need_five_files_and_billboards_one() {
    assert_eq!(file_names(&ONE_DIRECTIONAL).len(), 5);
    assert_eq!(file_names(&ONE_BILLBOARD).len(), 1);
}

#[test]
fn loading_shares_each_file_once() {
    let dir = tempfile::tempdir().unwrap();
    write_set(dir.path(), &ONE_DIRECTIONAL);
    write_set(dir.path(), &ONE_BILLBOARD);

    let draw_time = SpriteSet::load_dir(dir.path(), &ONE_DIRECTIONAL, MirrorMode::DrawTime).unwrap();
    assert_eq!(draw_time.distinct_images(), 5);
    let baked = SpriteSet::load_dir(dir.path(), &ONE_DIRECTIONAL, MirrorMode::Baked).unwrap();
    assert_eq!(baked.distinct_images(), 8);
    let billboard = SpriteSet::load_dir(dir.path(), &ONE_BILLBOARD, MirrorMode::Baked).unwrap();
    assert_eq!(billboard.distinct_images(), 1);
}

#[test]
fn mirrored_slots_share_their_partner_at_draw_time() {
    let dir = tempfile::tempdir().unwrap();
    write_set(dir.path(), &ONE_DIRECTIONAL);
    let set = SpriteSet::load_dir(dir.path(), &ONE_DIRECTIONAL, MirrorMode::DrawTime).unwrap();

    for (slot, partner) in [(5, 3), (6, 2), (7, 1)] {
        let a = set.slot(0, slot).unwrap();
        let b = set.slot(0, partner).unwrap();
        assert!(Arc::ptr_eq(&a.bitmap, &b.bitmap));
        assert!(a.mirror);
        assert!(!b.mirror);
    }
    assert!(!set.slot(0, 0).unwrap().mirror);
    assert!(!set.slot(0, 4).unwrap().mirror);
}

#[test]
fn baked_slots_hold_flipped_copies() {
    let dir = tempfile::tempdir().unwrap();
    write_set(dir.path(), &ONE_DIRECTIONAL);
    let set = SpriteSet::load_dir(dir.path(), &ONE_DIRECTIONAL, MirrorMode::Baked).unwrap();

    let flipped = set.slot(0, 6).unwrap();
    let source = set.slot(0, 2).unwrap();
    assert!(!flipped.mirror);
    assert_eq!(*flipped.bitmap, source.bitmap.mirrored());
    // The red marker column moves to the right edge.
    assert_eq!(alpha(flipped.bitmap.get(5, 0).unwrap()), 255);
    assert_eq!(flipped.bitmap.get(5, 0), source.bitmap.get(0, 0));
}

#[test]
fn slot_indices_wrap_modulo_eight() {
    let set = placeholder::sprite_set(&ONE_DIRECTIONAL, MirrorMode::DrawTime);
    let a = set.slot(0, 9).unwrap();
    let b = set.slot(0, 1).unwrap();
    assert!(Arc::ptr_eq(&a.bitmap, &b.bitmap));
    assert!(set.slot(1, 0).is_none());
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = SpriteSet::load_dir(dir.path(), &ONE_BILLBOARD, MirrorMode::DrawTime).unwrap_err();
    assert!(matches!(err, GameError::AssetDecode { .. }));
    assert!(err.to_string().contains("TESTB0.png"), "{err}");
    assert!(std::error::Error::source(&err).is_some_and(|c| c.is::<image::ImageError>()));
}

#[test]
fn game_assets_tolerate_a_missing_ceiling_only() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let sets = root.join(SET_DIR);
    std::fs::create_dir(&sets).unwrap();
    write_set(&sets, &ENEMY_LAYOUT);
    write_set(&sets, &PROJECTILE_LAYOUT);
    RgbaImage::from_pixel(8, 8, Rgba([90, 90, 90, 255])).save(root.join(WALL_FILE)).unwrap();

    let err = GameAssets::load(root, MirrorMode::DrawTime).unwrap_err();
    assert!(err.to_string().contains(WEAPON_FILE), "{err}");

    RgbaImage::from_pixel(8, 4, Rgba([200, 200, 0, 255])).save(root.join(WEAPON_FILE)).unwrap();
    let assets = GameAssets::load(root, MirrorMode::DrawTime).unwrap();
    assert!(assets.ceiling.is_none());
    assert_eq!(assets.enemy.frame_count(), 29);
    assert_eq!(assets.projectile.frame_count(), 11);
    assert_eq!(assets.enemy.distinct_images(), 14 * 5 + 15);
    assert_eq!(assets.projectile.distinct_images(), 2 * 5 + 9);
}

#[test]
fn decoded_pixels_are_argb() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("px.png");
    RgbaImage::from_pixel(1, 1, Rgba([0x11, 0x22, 0x33, 0x44])).save(&path).unwrap();
    let bmp = Bitmap::load(&path).unwrap();
    assert_eq!(bmp.get(0, 0), Some(0x4411_2233));
}

#[test]
fn placeholder_sets_match_the_on_disk_layout() {
    let assets = GameAssets::placeholder(MirrorMode::DrawTime);
    assert_eq!(assets.enemy.frame_count(), ENEMY_LAYOUT.frames.len());
    assert_eq!(assets.projectile.frame_count(), PROJECTILE_LAYOUT.frames.len());
    assert_eq!(assets.enemy.distinct_images(), 14 * 5 + 15);
    assert_eq!(assets.enemy.kind(13), Some(FrameKind::Directional));
    assert_eq!(assets.enemy.kind(14), Some(FrameKind::Billboard));
}
