//! Keyboard and mouse state, and the bindings that turn it into a
//! [`PlayerIntent`].

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

use crate::player::PlayerIntent;

/// A physical input that can be bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Key(KeyCode),
    Mouse(MouseButton),
}

/// Raw device state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    pub keys_held: HashSet<KeyCode>,
    pub keys_pressed: HashSet<KeyCode>,
    pub keys_released: HashSet<KeyCode>,

    pub mouse_held: HashSet<MouseButton>,
    pub mouse_pressed: HashSet<MouseButton>,
    pub mouse_released: HashSet<MouseButton>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: KeyCode) {
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
        self.keys_released.insert(key);
    }

    pub fn mouse_down(&mut self, button: MouseButton) {
        if self.mouse_held.insert(button) {
            self.mouse_pressed.insert(button);
        }
    }

    pub fn mouse_up(&mut self, button: MouseButton) {
        self.mouse_held.remove(&button);
        self.mouse_released.insert(button);
    }

    /// Forget edge-triggered events; held state carries over.
    pub fn clear_frame_state(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_pressed.clear();
        self.mouse_released.clear();
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn is_mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_pressed.contains(&button)
    }

    fn source_held(&self, source: InputSource) -> bool {
        match source {
            InputSource::Key(k) => self.is_key_held(k),
            InputSource::Mouse(b) => self.is_mouse_held(b),
        }
    }

    fn source_pressed(&self, source: InputSource) -> bool {
        match source {
            InputSource::Key(k) => self.is_key_pressed(k),
            InputSource::Mouse(b) => self.is_mouse_pressed(b),
        }
    }
}

/// Maps logical actions to one or more physical inputs.
#[derive(Debug, Clone)]
pub struct ActionMap<A: Hash + Eq + Copy> {
    bindings: HashMap<A, Vec<InputSource>>,
}

impl<A: Hash + Eq + Copy> ActionMap<A> {
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    pub fn bind(&mut self, action: A, source: InputSource) {
        self.bindings.entry(action).or_default().push(source);
    }

    /// Triggered this frame.
    pub fn is_pressed(&self, action: A, input: &InputState) -> bool {
        self.bindings.get(&action).is_some_and(|s| s.iter().any(|&src| input.source_pressed(src)))
    }

    pub fn is_held(&self, action: A, input: &InputState) -> bool {
        self.bindings.get(&action).is_some_and(|s| s.iter().any(|&src| input.source_held(src)))
    }

    /// `1.0`, `-1.0` or `0.0` from a pair of opposing actions.
    pub fn axis(&self, positive: A, negative: A, input: &InputState) -> f32 {
        let mut v = 0.0;
        if self.is_held(positive, input) {
            v += 1.0;
        }
        if self.is_held(negative, input) {
            v -= 1.0;
        }
        v
    }
}

impl<A: Hash + Eq + Copy> Default for ActionMap<A> {
    fn default() -> Self {
        Self::new()
    }
}

// ── Game actions ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    TurnLeft,
    TurnRight,
    Fire,
    Reload,
    Quit,
}

/// W/S or Up/Down to walk, A/D to strafe, Left/Right to turn, Space or
/// left click to fire, R to reload, Escape to quit.
pub fn default_bindings() -> ActionMap<Action> {
    use Action::*;
    use InputSource::{Key, Mouse};

    let mut map = ActionMap::new();
    for (action, source) in [
        (Forward, Key(KeyCode::KeyW)),
        (Forward, Key(KeyCode::ArrowUp)),
        (Back, Key(KeyCode::KeyS)),
        (Back, Key(KeyCode::ArrowDown)),
        (StrafeLeft, Key(KeyCode::KeyA)),
        (StrafeRight, Key(KeyCode::KeyD)),
        (TurnLeft, Key(KeyCode::ArrowLeft)),
        (TurnRight, Key(KeyCode::ArrowRight)),
        (Fire, Key(KeyCode::Space)),
        (Fire, Mouse(MouseButton::Left)),
        (Reload, Key(KeyCode::KeyR)),
        (Quit, Key(KeyCode::Escape)),
    ] {
        map.bind(action, source);
    }
    map
}

/// Held movement keys become axes; fire and reload trigger once per press.
pub fn player_intent(bindings: &ActionMap<Action>, input: &InputState) -> PlayerIntent {
    PlayerIntent {
        forward: bindings.axis(Action::Forward, Action::Back, input),
        strafe: bindings.axis(Action::StrafeRight, Action::StrafeLeft, input),
        turn: bindings.axis(Action::TurnRight, Action::TurnLeft, input),
        fire: bindings.is_pressed(Action::Fire, input),
        reload: bindings.is_pressed(Action::Reload, input),
    }
}

/// Build this tick's intent and consume the edge-triggered events, so a
/// press is seen by exactly one tick.
pub fn take_player_intent(bindings: &ActionMap<Action>, input: &mut InputState) -> PlayerIntent {
    let intent = player_intent(bindings, input);
    input.clear_frame_state();
    intent
}
