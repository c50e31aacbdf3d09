// ── Enemy animation ───────────────────────────────────────────────────────────
//
// Frame indices address the enemy sprite set directly:
//
//   0..=3    walk cycle          (directional)
//   4..=12   shoot, fires on 11  (directional)
//   13       pain                (directional)
//   14..=22  death               (billboard)
//   23..=28  violent death       (billboard)

pub const WALK_FIRST: usize = 0;
pub const WALK_FRAMES: usize = 4;
pub const SHOOT_FIRST: usize = 4;
/// The projectile leaves on this frame.
pub const SHOOT_FIRE: usize = 11;
/// Advancing onto this frame ends the shot.
pub const SHOOT_END: usize = 13;
pub const PAIN_FRAME: usize = 13;
pub const DEATH_FIRST: usize = 14;
pub const DEATH_LAST: usize = 22;
pub const VIOLENT_FIRST: usize = 23;
pub const VIOLENT_LAST: usize = 28;
/// Frames from here on are orientation-independent.
pub const FIRST_BILLBOARD: usize = DEATH_FIRST;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AnimState {
    #[default]
    Idle,
    Walk,
    Shoot,
    Pain,
    Death,
    ViolentDeath,
}

impl AnimState {
    pub fn is_dying(self) -> bool {
        matches!(self, AnimState::Death | AnimState::ViolentDeath)
    }
}

/// What a shot animation step produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShotStep {
    Aiming,
    Fire,
    Done,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Animation {
    pub state: AnimState,
    pub frame: usize,
    pub timer: f32,
}

impl Default for Animation {
    fn default() -> Self {
        Self::idle()
    }
}

impl Animation {
    pub fn idle() -> Self {
        Self { state: AnimState::Idle, frame: WALK_FIRST, timer: 0.0 }
    }

    fn enter(&mut self, state: AnimState, frame: usize) {
        self.state = state;
        self.frame = frame;
        self.timer = 0.0;
    }

    pub fn start_shoot(&mut self) {
        self.enter(AnimState::Shoot, SHOOT_FIRST);
    }

    pub fn start_pain(&mut self) {
        self.enter(AnimState::Pain, PAIN_FRAME);
    }

    pub fn start_death(&mut self, violent: bool) {
        if violent {
            self.enter(AnimState::ViolentDeath, VIOLENT_FIRST);
        } else {
            self.enter(AnimState::Death, DEATH_FIRST);
        }
    }

    /// Stand still on the first walk frame.
    pub fn stand(&mut self) {
        self.enter(AnimState::Idle, WALK_FIRST);
    }

    /// Step the walk cycle; entering from another state restarts it.
    pub fn walk(&mut self, dt: f32, frame_time: f32) {
        if self.state != AnimState::Walk {
            self.enter(AnimState::Walk, WALK_FIRST);
        }
        self.timer += dt;
        if self.timer >= frame_time {
            self.timer = 0.0;
            self.frame = WALK_FIRST + (self.frame - WALK_FIRST + 1) % WALK_FRAMES;
        }
    }

    pub fn advance_shoot(&mut self, dt: f32, frame_time: f32) -> ShotStep {
        self.timer += dt;
        if self.timer < frame_time {
            return ShotStep::Aiming;
        }
        self.timer = 0.0;
        self.frame += 1;
        if self.frame >= SHOOT_END {
            self.stand();
            ShotStep::Done
        } else if self.frame == SHOOT_FIRE {
            ShotStep::Fire
        } else {
            ShotStep::Aiming
        }
    }

    /// Returns true once the flinch is over and the enemy is idle again.
    pub fn advance_pain(&mut self, dt: f32, pain_time: f32) -> bool {
        self.timer += dt;
        if self.timer >= pain_time {
            self.stand();
            return true;
        }
        false
    }

    /// Returns true once the last frame has been held for a full frame time.
    /// The frame stays on the last one afterwards.
    pub fn advance_death(&mut self, dt: f32, frame_time: f32) -> bool {
        let last = match self.state {
            AnimState::ViolentDeath => VIOLENT_LAST,
            _ => DEATH_LAST,
        };
        self.timer += dt;
        if self.timer < frame_time {
            return false;
        }
        self.timer = 0.0;
        if self.frame < last {
            self.frame += 1;
            false
        } else {
            true
        }
    }
}
