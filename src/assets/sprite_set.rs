// ── Angle-indexed sprite sets ─────────────────────────────────────────────────
//
// Each frame carries 8 slots, one per 45° viewing bucket.  Directional frames
// ship 5 physical files: slots 5, 6 and 7 share the file of slots 3, 2 and 1
// and show it flipped.  Billboard frames ship one file shared by all slots.
//
// File names encode base, frame letter and direction codes:
//   SLHVA1.png      slot 0 (front), unpaired
//   SLHVA2A8.png    slots 1 and 7
//   SLHVO0.png      billboard frame, every slot

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use crate::error::GameError;
use crate::geometry::ANGLE_BUCKETS;

use super::{Bitmap, SharedBitmap};

/// Direction codes per viewing slot: first code, and the paired code when
/// the file is shared with a mirrored slot.
pub const VIEW_TO_FILE: [(u8, Option<u8>); ANGLE_BUCKETS] = [
    (1, None),
    (2, Some(8)),
    (3, Some(7)),
    (4, Some(6)),
    (5, None),
    (4, Some(6)),
    (3, Some(7)),
    (2, Some(8)),
];

/// Slots that reuse the file of their mirror partner.
pub const MIRRORED_SLOTS: [bool; ANGLE_BUCKETS] = [false, false, false, false, false, true, true, true];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameKind {
    /// Silhouette depends on the viewing angle.
    Directional,
    /// One image for every viewing angle.
    Billboard,
}

/// How mirrored slots are realised.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MirrorMode {
    /// Share the partner's bitmap and flip while drawing.
    #[default]
    DrawTime,
    /// Store a pre-flipped copy and draw it unflipped.
    Baked,
}

/// Frame list of one sprite family.
#[derive(Copy, Clone, Debug)]
pub struct SetLayout {
    pub base: &'static str,
    pub frames: &'static [(char, FrameKind)],
}

use FrameKind::{Billboard as B, Directional as D};

/// Walk A–D, shoot E–M, pain N, death O–W, violent death X Y Z [ ] *.
pub const ENEMY_LAYOUT: SetLayout = SetLayout {
    base: "SLHV",
    frames: &[
        ('A', D), ('B', D), ('C', D), ('D', D),
        ('E', D), ('F', D), ('G', D), ('H', D), ('I', D), ('J', D), ('K', D), ('L', D), ('M', D),
        ('N', D),
        ('O', B), ('P', B), ('Q', B), ('R', B), ('S', B), ('T', B), ('U', B), ('V', B), ('W', B),
        ('X', B), ('Y', B), ('Z', B), ('[', B), (']', B), ('*', B),
    ],
};

/// Travel A–B, dissipation C–K.
pub const PROJECTILE_LAYOUT: SetLayout = SetLayout {
    base: "SHBA",
    frames: &[
        ('A', D), ('B', D),
        ('C', B), ('D', B), ('E', B), ('F', B), ('G', B), ('H', B), ('I', B), ('J', B), ('K', B),
    ],
};

/// File name for one slot of one frame.
pub fn sprite_file_name(base: &str, letter: char, kind: FrameKind, slot: usize) -> String {
    match kind {
        FrameKind::Billboard => format!("{base}{letter}0.png"),
        FrameKind::Directional => match VIEW_TO_FILE[slot & (ANGLE_BUCKETS - 1)] {
            (code, None) => format!("{base}{letter}{code}.png"),
            (code, Some(pair)) => format!("{base}{letter}{code}{letter}{pair}.png"),
        },
    }
}

/// One image fetch issued while building a set.
#[derive(Clone, Debug)]
pub struct FileRequest<'a> {
    pub base: &'a str,
    pub frame: usize,
    pub letter: char,
    pub kind: FrameKind,
    /// Primary direction code, 0 for billboards.
    pub direction: u8,
    pub file_name: String,
}

// ── AngleSlot ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct AngleSlot {
    pub bitmap: SharedBitmap,
    /// Flip horizontally when drawing.
    pub mirror: bool,
}

// ── SpriteSet ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct SpriteSet {
    base: String,
    frames: Vec<[AngleSlot; ANGLE_BUCKETS]>,
    kinds: Vec<FrameKind>,
}

impl SpriteSet {
    /// Build a set, fetching each physical file exactly once through `load`.
    pub fn build<E>(
        layout: &SetLayout,
        mirror: MirrorMode,
        mut load: impl FnMut(&FileRequest<'_>) -> Result<SharedBitmap, E>,
    ) -> Result<Self, E> {
        let mut frames = Vec::with_capacity(layout.frames.len());
        let mut kinds = Vec::with_capacity(layout.frames.len());

        for (frame, &(letter, kind)) in layout.frames.iter().enumerate() {
            let mut fetched: HashMap<String, SharedBitmap> = HashMap::new();
            let mut slots: Vec<AngleSlot> = Vec::with_capacity(ANGLE_BUCKETS);

            for slot in 0..ANGLE_BUCKETS {
                let file_name = sprite_file_name(layout.base, letter, kind, slot);
                let bitmap = match fetched.get(&file_name) {
                    Some(b) => Arc::clone(b),
                    None => {
                        let request = FileRequest {
                            base: layout.base,
                            frame,
                            letter,
                            kind,
                            direction: match kind {
                                FrameKind::Billboard => 0,
                                FrameKind::Directional => VIEW_TO_FILE[slot].0,
                            },
                            file_name: file_name.clone(),
                        };
                        let b = load(&request)?;
                        fetched.insert(file_name, Arc::clone(&b));
                        b
                    }
                };

                let flips = kind == FrameKind::Directional && MIRRORED_SLOTS[slot];
                slots.push(match (flips, mirror) {
                    (false, _) => AngleSlot { bitmap, mirror: false },
                    (true, MirrorMode::DrawTime) => AngleSlot { bitmap, mirror: true },
                    (true, MirrorMode::Baked) => AngleSlot {
                        bitmap: Arc::new(bitmap.mirrored()),
                        mirror: false,
                    },
                });
            }

            // Exactly ANGLE_BUCKETS slots were pushed above.
            let slots: [AngleSlot; ANGLE_BUCKETS] = match slots.try_into() {
                Ok(s) => s,
                Err(_) => unreachable!("slot count is fixed"),
            };
            frames.push(slots);
            kinds.push(kind);
        }

        let set = Self { base: layout.base.to_string(), frames, kinds };
        tracing::info!(
            set = %set.base,
            frames = set.frame_count(),
            images = set.distinct_images(),
            ?mirror,
            "sprite set ready"
        );
        Ok(set)
    }

    /// Load a set from `<dir>/<file name>` PNGs.
    pub fn load_dir(dir: impl AsRef<Path>, layout: &SetLayout, mirror: MirrorMode) -> Result<Self, GameError> {
        let dir = dir.as_ref();
        Self::build(layout, mirror, |req| -> Result<_, GameError> {
            Ok(Arc::new(Bitmap::load(dir.join(&req.file_name))?))
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn kind(&self, frame: usize) -> Option<FrameKind> {
        self.kinds.get(frame).copied()
    }

    /// Slot for a frame and viewing bucket; buckets wrap modulo 8.
    pub fn slot(&self, frame: usize, bucket: usize) -> Option<&AngleSlot> {
        self.frames.get(frame).map(|slots| &slots[bucket & (ANGLE_BUCKETS - 1)])
    }

    /// Number of physically distinct images backing the set.
    pub fn distinct_images(&self) -> usize {
        let mut seen = HashSet::new();
        for slots in &self.frames {
            for slot in slots {
                seen.insert(Arc::as_ptr(&slot.bitmap));
            }
        }
        seen.len()
    }
}
