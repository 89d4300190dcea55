use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::session::NavMode;

/// Paint-vs-navigate gating behavior.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ZBrushMode {
    /// Never gate; navigation always starts.
    #[default]
    Off,
    /// Gate only when no modifier keys are held.
    Simple,
    /// Always gate, regardless of modifiers.
    Always,
}

/// What to use as the orbit origin.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum OriginPolicy {
    /// Defer to the host's input preferences (falls back to View when the
    /// host provides none).
    #[default]
    Auto,
    /// Orbit around the view's focus point.
    View,
    /// Orbit around the geometry under the cursor.
    Mouse,
    /// Orbit around the selection center.
    Selection,
}

/// One allowed mode transition, directional. The default table lists both
/// directions of every pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ModeTransition {
    /// One end of the pair.
    pub from: NavMode,
    /// The other end.
    pub to: NavMode,
}

impl ModeTransition {
    /// Shorthand constructor.
    #[must_use]
    pub fn new(from: NavMode, to: NavMode) -> Self {
        Self { from, to }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Navigation", inline)]
#[serde(default)]
/// Mode selection, transition and gating behavior.
pub struct NavigationOptions {
    /// Mode entered on session start when no other trigger key is held.
    pub default_mode: NavMode,
    /// Allowed transitions between modes; requests outside this set are
    /// silently ignored.
    #[schemars(skip)]
    pub transitions: Vec<ModeTransition>,
    /// When switching modes, restore that mode's last view state instead of
    /// continuing from the current one.
    #[schemars(title = "Independent Modes")]
    pub independent_modes: bool,
    /// Paint-vs-navigate gating behavior.
    #[schemars(title = "ZBrush Mode")]
    pub zbrush: ZBrushMode,
    /// Orbit origin policy.
    #[schemars(title = "Orbit Origin")]
    pub origin: OriginPolicy,
    /// In orthographic views, abandon orbit rotation when another mode is
    /// selected and lock orbit out for the rest of the session.
    #[schemars(title = "Ortho Unrotate")]
    pub ortho_unrotate: bool,
    /// Switch to orthographic while orbit snap holds the view on a right
    /// angle, and back to perspective when it leaves one.
    #[schemars(title = "Auto Perspective")]
    pub auto_perspective: bool,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            default_mode: NavMode::Orbit,
            transitions: default_transitions(),
            independent_modes: false,
            zbrush: ZBrushMode::Off,
            origin: OriginPolicy::Auto,
            ortho_unrotate: true,
            auto_perspective: false,
        }
    }
}

/// The reference control scheme's transition table.
#[must_use]
pub fn default_transitions() -> Vec<ModeTransition> {
    use NavMode::{Dolly, Fly, Orbit, Pan, Walk, Zoom};
    [
        (Orbit, Pan),
        (Orbit, Dolly),
        (Orbit, Zoom),
        (Orbit, Fly),
        (Orbit, Walk),
        (Pan, Dolly),
        (Pan, Zoom),
        (Dolly, Zoom),
        (Fly, Walk),
    ]
    .into_iter()
    .flat_map(|(a, b)| [ModeTransition::new(a, b), ModeTransition::new(b, a)])
    .collect()
}
