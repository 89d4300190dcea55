//! Subdivision-level commands for the sculpt/paint workflow the navigator
//! shares its keymap with. Stateless: no session interaction.

/// Requested change to the subdivision level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelRequest {
    /// Step relative to the current level.
    Delta(i32),
    /// Jump to an absolute level.
    Absolute(u32),
}

/// Resolved subdivision change for the host to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChange {
    /// Target level, clamped to `[0, max]`.
    pub level: u32,
    /// The object has no subdivision modifier yet; one must be created at
    /// the target level.
    pub create_modifier: bool,
}

/// Resolve a level request against the object's current state.
///
/// `current` is `None` when the object has no subdivision modifier; the
/// request then starts from level zero and flags creation.
#[must_use]
pub fn resolve_level(current: Option<u32>, max: u32, request: LevelRequest) -> LevelChange {
    let base = current.unwrap_or(0);
    let target = match request {
        LevelRequest::Delta(delta) => base.saturating_add_signed(delta),
        LevelRequest::Absolute(level) => level,
    };
    LevelChange {
        level: target.min(max),
        create_modifier: current.is_none(),
    }
}
