//! Resolves raw key/button events against the keymap into logical action
//! states.
//!
//! The router owns all transient input state (held keys, toggle latches,
//! accumulated pointer motion and wheel steps). It is the only thing that
//! sits between the host's raw events and the navigation state machine,
//! which consumes one [`TickState`] snapshot per tick.

use glam::Vec2;
use rustc_hash::FxHashSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::actions::Action;
use super::event::{canonical_code, is_modifier, InputEvent};

/// How a binding activates its action.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// Active while any bound key is held.
    #[default]
    Hold,
    /// Each press flips the action on/off.
    Toggle,
}

/// One entry of the injected keymap table.
///
/// The table is ordered, external configuration; the router never mutates
/// it. `context_modes` restricts the binding to specific host object modes
/// (paint, sculpt, …); an empty list applies everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct KeymapBinding {
    /// Alternative key codes, any of which activates the binding.
    pub keys: Vec<String>,
    /// Modifier codes that must all be held (`"Shift"`, `"Control"`,
    /// `"Alt"`).
    #[serde(default)]
    pub modifiers: Vec<String>,
    /// The logical action this binding produces.
    pub action: Action,
    /// Hold or toggle activation.
    #[serde(default)]
    pub trigger: Trigger,
    /// Host object modes the binding applies in; empty means all.
    #[serde(default)]
    pub context_modes: Vec<String>,
}

impl KeymapBinding {
    /// Hold binding for a single key.
    #[must_use]
    pub fn hold(key: &str, action: Action) -> Self {
        Self::multi(&[key], action)
    }

    /// Hold binding with alternative keys.
    #[must_use]
    pub fn multi(keys: &[&str], action: Action) -> Self {
        Self {
            keys: keys.iter().map(|k| (*k).to_owned()).collect(),
            modifiers: Vec::new(),
            action,
            trigger: Trigger::Hold,
            context_modes: Vec::new(),
        }
    }

    /// Toggle binding for a single key.
    #[must_use]
    pub fn toggle(key: &str, action: Action) -> Self {
        Self {
            trigger: Trigger::Toggle,
            ..Self::hold(key, action)
        }
    }
}

/// Per-tick snapshot of logical action states.
#[derive(Debug, Clone, Default)]
pub struct ActionState {
    on: FxHashSet<Action>,
    pressed: FxHashSet<Action>,
    released: FxHashSet<Action>,
    toggle_pressed: FxHashSet<Action>,
}

impl ActionState {
    /// Whether the action is currently active (held or toggled on).
    #[must_use]
    pub fn is_on(&self, action: Action) -> bool {
        self.on.contains(&action)
    }

    /// Whether the action became active during this tick.
    #[must_use]
    pub fn was_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Whether the action stopped being active during this tick.
    #[must_use]
    pub fn was_released(&self, action: Action) -> bool {
        self.released.contains(&action)
    }

    /// Whether a toggle binding for the action fired during this tick.
    #[must_use]
    pub fn was_toggled(&self, action: Action) -> bool {
        self.toggle_pressed.contains(&action)
    }
}

/// Everything the state machine consumes for one tick.
#[derive(Debug, Clone, Default)]
pub struct TickState {
    /// Logical action states resolved from the keymap.
    pub actions: ActionState,
    /// Accumulated pointer motion since the previous tick, pixels.
    pub pointer_delta: Vec2,
    /// Current cursor position, pixels.
    pub cursor: Vec2,
    /// Accumulated wheel steps since the previous tick.
    pub wheel: i32,
}

/// Translates raw input events into logical action states using an
/// injected, read-only keymap.
#[derive(Debug)]
pub struct InputRouter {
    bindings: Vec<KeymapBinding>,
    context_mode: String,
    held: FxHashSet<String>,
    toggled: FxHashSet<Action>,
    active: FxHashSet<Action>,
    pressed: FxHashSet<Action>,
    released: FxHashSet<Action>,
    toggle_pressed: FxHashSet<Action>,
    cursor: Vec2,
    pointer_delta: Vec2,
    wheel: i32,
    has_cursor: bool,
}

impl InputRouter {
    /// Create a router over the given binding table.
    #[must_use]
    pub fn new(bindings: Vec<KeymapBinding>) -> Self {
        Self {
            bindings,
            context_mode: String::new(),
            held: FxHashSet::default(),
            toggled: FxHashSet::default(),
            active: FxHashSet::default(),
            pressed: FxHashSet::default(),
            released: FxHashSet::default(),
            toggle_pressed: FxHashSet::default(),
            cursor: Vec2::ZERO,
            pointer_delta: Vec2::ZERO,
            wheel: 0,
            has_cursor: false,
        }
    }

    /// Set the host object mode used to filter binding applicability.
    pub fn set_context_mode(&mut self, mode: &str) {
        self.context_mode = mode.to_owned();
    }

    /// Current cursor position in pixels.
    #[must_use]
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Whether any modifier key is currently held (ZBrush Simple override).
    #[must_use]
    pub fn any_modifier_held(&self) -> bool {
        self.held.iter().any(|code| is_modifier(code))
    }

    /// Whether the action is currently active.
    #[must_use]
    pub fn is_on(&self, action: Action) -> bool {
        self.active.contains(&action) || self.toggled.contains(&action)
    }

    /// Feed one raw event into the router.
    pub fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::CursorMoved { x, y } => {
                let pos = Vec2::new(*x, *y);
                if self.has_cursor {
                    self.pointer_delta += pos - self.cursor;
                }
                self.cursor = pos;
                self.has_cursor = true;
            }
            InputEvent::Key { code, pressed } => {
                let code = canonical_code(code).to_owned();
                if *pressed {
                    if self.held.insert(code.clone()) {
                        self.fire_toggles(&code);
                    }
                } else {
                    let _ = self.held.remove(&code);
                }
                self.recompute_active();
            }
            InputEvent::Scroll { steps } => self.wheel += steps,
        }
    }

    /// Take the per-tick snapshot, draining the accumulators.
    pub fn take_tick(&mut self) -> TickState {
        let actions = ActionState {
            on: self.active.union(&self.toggled).copied().collect(),
            pressed: std::mem::take(&mut self.pressed),
            released: std::mem::take(&mut self.released),
            toggle_pressed: std::mem::take(&mut self.toggle_pressed),
        };
        TickState {
            actions,
            pointer_delta: std::mem::take(&mut self.pointer_delta),
            cursor: self.cursor,
            wheel: std::mem::take(&mut self.wheel),
        }
    }

    /// Reset toggle latches and per-tick accumulators (session end).
    pub fn reset_session(&mut self) {
        self.toggled.clear();
        self.pressed.clear();
        self.released.clear();
        self.toggle_pressed.clear();
        self.pointer_delta = Vec2::ZERO;
        self.wheel = 0;
    }

    fn binding_applicable(&self, binding: &KeymapBinding) -> bool {
        binding.context_modes.is_empty()
            || binding.context_modes.iter().any(|m| *m == self.context_mode)
    }

    fn modifiers_satisfied(&self, binding: &KeymapBinding) -> bool {
        binding
            .modifiers
            .iter()
            .all(|m| self.held.contains(canonical_code(m)))
    }

    /// Flip toggle bindings activated by a fresh key press.
    fn fire_toggles(&mut self, code: &str) {
        let mut flipped = Vec::new();
        for binding in &self.bindings {
            if binding.trigger != Trigger::Toggle
                || !self.binding_applicable(binding)
                || !self.modifiers_satisfied(binding)
            {
                continue;
            }
            if binding.keys.iter().any(|k| canonical_code(k) == code) {
                flipped.push(binding.action);
            }
        }
        for action in flipped {
            let _ = self.toggle_pressed.insert(action);
            if self.toggled.remove(&action) {
                let _ = self.released.insert(action);
            } else {
                let _ = self.toggled.insert(action);
                let _ = self.pressed.insert(action);
            }
        }
    }

    /// Recompute hold-satisfied actions and record edges.
    fn recompute_active(&mut self) {
        let mut now = FxHashSet::default();
        for binding in &self.bindings {
            if binding.trigger != Trigger::Hold
                || !self.binding_applicable(binding)
                || !self.modifiers_satisfied(binding)
            {
                continue;
            }
            if binding
                .keys
                .iter()
                .any(|k| self.held.contains(canonical_code(k)))
            {
                let _ = now.insert(binding.action);
            }
        }
        for action in now.difference(&self.active) {
            let _ = self.pressed.insert(*action);
        }
        for action in self.active.difference(&now) {
            let _ = self.released.insert(*action);
        }
        self.active = now;
    }
}
