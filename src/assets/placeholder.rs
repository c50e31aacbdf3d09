// =============================================================================
// PLACEHOLDER.RS: procedural stand-in art
//
// Lets the game run without any image files.  Every generated bitmap goes
// through the same `SpriteSet::build` path as files on disk, so slot sharing,
// mirroring and billboard handling behave exactly as with real assets.
// Directional art is deliberately asymmetric so mirrored slots are visible.
// =============================================================================

use std::convert::Infallible;
use std::sync::Arc;

use super::{
    argb, Bitmap, FileRequest, FrameKind, GameAssets, MirrorMode, SetLayout, SpriteSet, ENEMY_LAYOUT,
    PROJECTILE_LAYOUT,
};

pub const ENEMY_W: u32 = 40;
pub const ENEMY_H: u32 = 56;
pub const PROJECTILE_SIZE: u32 = 16;

fn bordered_rect(img: &mut Bitmap, x0: u32, y0: u32, w: u32, h: u32, fill: u32, border: u32) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            let on_border = x == x0 || x == x0 + w - 1 || y == y0 || y == y0 + h - 1;
            img.set(x, y, if on_border { border } else { fill });
        }
    }
}

fn disc(img: &mut Bitmap, cx: i32, cy: i32, r: i32, color: u32) {
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r && cx + dx >= 0 && cy + dy >= 0 {
                img.set((cx + dx) as u32, (cy + dy) as u32, color);
            }
        }
    }
}

/// Brick rows with a half-brick offset every other row.
pub fn wall() -> Bitmap {
    let (w, h) = (64, 64);
    Bitmap::from_fn(w, h, |x, y| {
        let brick_row = y / 8;
        let offset_x = if brick_row % 2 == 0 { 0 } else { w / 4 };
        let is_mortar_h = y % 8 == 0;
        let is_mortar_v = (x + offset_x) % (w / 2) == 0;
        if is_mortar_h || is_mortar_v {
            argb(0xFF, 0x4A, 0x48, 0x45)
        } else {
            argb(0xFF, 0x82, 0x74, 0x66)
        }
    })
}

/// Dark square tiles.
pub fn ceiling() -> Bitmap {
    Bitmap::from_fn(32, 32, |x, y| {
        if x % 16 == 0 || y % 16 == 0 {
            argb(0xFF, 0x20, 0x20, 0x28)
        } else {
            argb(0xFF, 0x48, 0x48, 0x58)
        }
    })
}

/// Pistol seen from behind: barrel, slide and grip.
pub fn weapon() -> Bitmap {
    let mut img = Bitmap::new(72, 64);
    bordered_rect(&mut img, 30, 4, 12, 30, argb(0xFF, 0x50, 0x50, 0x58), argb(0xFF, 0x20, 0x20, 0x24));
    bordered_rect(&mut img, 24, 30, 24, 14, argb(0xFF, 0x68, 0x68, 0x70), argb(0xFF, 0x20, 0x20, 0x24));
    bordered_rect(&mut img, 28, 44, 16, 20, argb(0xFF, 0x5A, 0x3A, 0x22), argb(0xFF, 0x2A, 0x1A, 0x10));
    img
}

fn enemy_frame(frame: usize, direction: u8) -> Bitmap {
    let mut img = Bitmap::new(ENEMY_W, ENEMY_H);
    let fill = argb(0xFF, 0xCC, 0x22, 0x22);
    let border = argb(0xFF, 0x55, 0x00, 0x00);
    let eye = argb(0xFF, 0xFF, 0xAA, 0x00);

    match frame {
        // Walk, shoot and pain share the standing body.
        0..=13 => {
            let stride = if frame < 4 { (frame as u32 % 2) * 3 } else { 0 };
            bordered_rect(&mut img, 10, 8, 20, 32, fill, border);
            bordered_rect(&mut img, 11, 40, 6, 16 - stride, border, border);
            bordered_rect(&mut img, 23, 40 + stride, 6, 16 - stride, border, border);

            // Eyes slide toward the right edge as the actor turns away;
            // direction 5 is the back view and has none.
            let ey = 16;
            match direction {
                1 => {
                    img.set(15, ey, eye);
                    img.set(24, ey, eye);
                }
                2 => {
                    img.set(20, ey, eye);
                    img.set(27, ey, eye);
                }
                3 => img.set(27, ey, eye),
                4 => img.set(28, ey + 1, eye),
                _ => {}
            }

            if (4..=12).contains(&frame) {
                // Arm raised toward the right; muzzle flash around the fire frame.
                bordered_rect(&mut img, 28, 20, 10, 4, fill, border);
                if (10..=11).contains(&frame) {
                    disc(&mut img, 37, 21, 2, argb(0xFF, 0xFF, 0xF0, 0x80));
                }
            }
            if frame == 13 {
                for p in img.pixels.iter_mut().filter(|p| **p >> 24 != 0) {
                    *p |= 0x00_80_80_80;
                }
            }
        }
        // Ordinary death: the body folds down toward the floor line.
        14..=22 => {
            let step = (frame - 14) as u32;
            let h = (48u32.saturating_sub(step * 5)).max(6);
            bordered_rect(&mut img, 8, ENEMY_H - h, 24, h, fill, border);
        }
        // Violent death: scattered gibs that spread and settle.
        _ => {
            let step = (frame - 23) as i32;
            let gib = argb(0xFF, 0x99, 0x08, 0x08);
            for i in 0..6 {
                let cx = 6 + i * 6 + (i % 2) * step;
                let cy = ENEMY_H as i32 - 6 - ((5 - step).max(0) * (i % 3 + 1));
                disc(&mut img, cx, cy, 2, gib);
            }
        }
    }
    img
}

fn projectile_frame(frame: usize, direction: u8) -> Bitmap {
    let mut img = Bitmap::new(PROJECTILE_SIZE, PROJECTILE_SIZE);
    let c = PROJECTILE_SIZE as i32 / 2;
    if frame < 2 {
        disc(&mut img, c, c, 4 - frame as i32, argb(0xFF, 0xFF, 0x80, 0x10));
        // Tail trails to the left except when seen head-on or from behind.
        if !matches!(direction, 1 | 5) {
            for x in 1..c - 3 {
                img.set(x as u32, c as u32, argb(0xFF, 0xFF, 0xC0, 0x40));
            }
        }
    } else {
        let r = (frame as i32 - 1).min(c - 1);
        let fade = 0xFF - ((frame as u32 - 2) * 20) as u8;
        for dy in -r..=r {
            for dx in -r..=r {
                let d2 = dx * dx + dy * dy;
                if d2 <= r * r && d2 >= (r - 1) * (r - 1) {
                    img.set((c + dx) as u32, (c + dy) as u32, argb(0xFF, fade, fade / 2, 0x10));
                }
            }
        }
    }
    img
}

/// Generate the bitmap a file request would have loaded.
pub fn generate(req: &FileRequest<'_>) -> Bitmap {
    let direction = match req.kind {
        FrameKind::Billboard => 0,
        FrameKind::Directional => req.direction,
    };
    match req.base {
        "SHBA" => projectile_frame(req.frame, direction),
        _ => enemy_frame(req.frame, direction),
    }
}

/// Build a sprite set from generated art.
pub fn sprite_set(layout: &SetLayout, mirror: MirrorMode) -> SpriteSet {
    let built = SpriteSet::build(layout, mirror, |req| Ok::<_, Infallible>(Arc::new(generate(req))));
    match built {
        Ok(set) => set,
        Err(never) => match never {},
    }
}

pub fn game_assets(mirror: MirrorMode) -> GameAssets {
    GameAssets {
        wall: Arc::new(wall()),
        ceiling: Some(Arc::new(ceiling())),
        enemy: sprite_set(&ENEMY_LAYOUT, mirror),
        projectile: sprite_set(&PROJECTILE_LAYOUT, mirror),
        weapon: Arc::new(weapon()),
    }
}
