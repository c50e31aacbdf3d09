// ── Assets ────────────────────────────────────────────────────────────────────
//
// Decoded bitmaps live in `Arc`s so a single image can back any number of
// sprite-set slots.  Each distinct image is freed exactly once, when its last
// slot is dropped.

pub mod placeholder;
pub mod sprite_set;

pub use sprite_set::{
    AngleSlot, FrameKind, FileRequest, MirrorMode, SetLayout, SpriteSet, ENEMY_LAYOUT,
    PROJECTILE_LAYOUT, sprite_file_name,
};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::GameError;

/// Pixels with alpha at or above this value are opaque.
pub const ALPHA_CUTOFF: u8 = 128;

/// Pack an ARGB colour.
#[inline]
pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

#[inline]
pub const fn alpha(pixel: u32) -> u8 {
    (pixel >> 24) as u8
}

// ── Bitmap ────────────────────────────────────────────────────────────────────

/// A decoded image as row-major ARGB pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

pub type SharedBitmap = Arc<Bitmap>;

impl Bitmap {
    /// A fully transparent bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self::solid(width, height, 0)
    }

    pub fn solid(width: u32, height: u32, color: u32) -> Self {
        Self { width, height, pixels: vec![color; (width * height) as usize] }
    }

    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> u32) -> Self {
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self { width, height, pixels }
    }

    pub fn from_rgba(img: &image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                argb(a, r, g, b)
            })
            .collect();
        Self { width, height, pixels }
    }

    /// Decode an in-memory image file.
    pub fn decode(bytes: &[u8]) -> Result<Self, image::ImageError> {
        Ok(Self::from_rgba(&image::load_from_memory(bytes)?.to_rgba8()))
    }

    /// Read and decode an image file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| GameError::AssetDecode {
            path: path.to_path_buf(),
            source,
        })?;
        let bitmap = Self::from_rgba(&img.to_rgba8());
        tracing::trace!(path = %path.display(), w = bitmap.width, h = bitmap.height, "decoded bitmap");
        Ok(bitmap)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[(y * self.width + x) as usize])
    }

    pub fn set(&mut self, x: u32, y: u32, color: u32) {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = color;
        }
    }

    /// Texel lookup with both coordinates clamped into the image.
    #[inline]
    pub fn texel_clamped(&self, x: i32, y: i32) -> u32 {
        let x = x.clamp(0, self.width as i32 - 1) as u32;
        let y = y.clamp(0, self.height as i32 - 1) as u32;
        self.pixels[(y * self.width + x) as usize]
    }

    /// A horizontally flipped copy.
    pub fn mirrored(&self) -> Self {
        let mut pixels = Vec::with_capacity(self.pixels.len());
        for row in self.pixels.chunks(self.width.max(1) as usize) {
            pixels.extend(row.iter().rev());
        }
        Self { width: self.width, height: self.height, pixels }
    }
}

// ── GameAssets ────────────────────────────────────────────────────────────────

pub const WALL_FILE: &str = "wall.png";
pub const CEILING_FILE: &str = "Ceiling.png";
pub const WEAPON_FILE: &str = "SAKOA0.png";
/// Sub-directory holding the enemy and projectile sets.
pub const SET_DIR: &str = "slhv";

/// Every bitmap the game draws.
#[derive(Clone, Debug)]
pub struct GameAssets {
    pub wall: SharedBitmap,
    /// `None` falls back to a flat ceiling colour.
    pub ceiling: Option<SharedBitmap>,
    pub enemy: SpriteSet,
    pub projectile: SpriteSet,
    pub weapon: SharedBitmap,
}

impl GameAssets {
    /// Load everything from an asset root.  The ceiling is optional; any
    /// other missing or undecodable file aborts with its path.
    pub fn load(root: impl AsRef<Path>, mirror: MirrorMode) -> Result<Self, GameError> {
        let root = root.as_ref();
        let wall = Arc::new(Bitmap::load(root.join(WALL_FILE))?);

        let ceiling = match Bitmap::load(root.join(CEILING_FILE)) {
            Ok(bitmap) => Some(Arc::new(bitmap)),
            Err(err) => {
                tracing::warn!(%err, "no ceiling texture, using flat shade");
                None
            }
        };

        let set_dir: PathBuf = root.join(SET_DIR);
        let enemy = SpriteSet::load_dir(&set_dir, &ENEMY_LAYOUT, mirror)?;
        let projectile = SpriteSet::load_dir(&set_dir, &PROJECTILE_LAYOUT, mirror)?;
        let weapon = Arc::new(Bitmap::load(root.join(WEAPON_FILE))?);

        tracing::info!(root = %root.display(), "assets loaded");
        Ok(Self { wall, ceiling, enemy, projectile, weapon })
    }

    /// Generated art with the same layout as the on-disk sets.
    pub fn placeholder(mirror: MirrorMode) -> Self {
        placeholder::game_assets(mirror)
    }
}
