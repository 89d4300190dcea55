//! Input event routing: raw events → logical navigation actions.

/// Logical action definitions.
pub mod actions;
/// Platform-agnostic event types and key-code helpers.
pub mod event;
/// Keymap resolution and per-tick action state.
pub mod router;

pub use actions::Action;
pub use event::InputEvent;
pub use router::{ActionState, InputRouter, KeymapBinding, TickState, Trigger};
