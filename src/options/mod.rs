//! Centralized navigation options with TOML preset support.
//!
//! All tweakable settings (camera speeds, mode/transition policy, orbit and
//! snap behavior, fly/walk movement, geometry probing, axis flips, keymap)
//! are consolidated here. Options serialize to/from TOML for control-scheme
//! presets, and the state machine receives an immutable snapshot of this
//! struct at session start.

mod camera;
mod flips;
mod fps;
mod keymap;
mod navigation;
mod orbit;
mod probe;

use std::path::Path;

pub use camera::CameraOptions;
pub use flips::InputFlips;
pub use fps::FpsOptions;
pub use keymap::{default_bindings, KeymapOptions};
pub use navigation::{
    default_transitions, ModeTransition, NavigationOptions, OriginPolicy,
    ZBrushMode,
};
pub use orbit::{OrbitOptions, RotationMethod};
pub use probe::ProbeOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::NavError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[orbit]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and speed multipliers.
    pub camera: CameraOptions,
    /// Mode selection, transition and gating policy.
    pub navigation: NavigationOptions,
    /// Orbit rotation, snapping and autolevel behavior.
    pub orbit: OrbitOptions,
    /// Fly/walk movement parameters.
    pub fps: FpsOptions,
    /// Geometry probing parameters.
    pub probe: ProbeOptions,
    /// Per-axis input inversion.
    pub flips: InputFlips,
    /// Key binding table.
    #[schemars(skip)]
    pub keymap: KeymapOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults; a
    /// malformed keymap is rejected.
    pub fn load(path: &Path) -> Result<Self, NavError> {
        let content = std::fs::read_to_string(path).map_err(NavError::Io)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| NavError::OptionsParse(e.to_string()))?;
        options.keymap.validate()?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), NavError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| NavError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(NavError::Io)?;
        }
        std::fs::write(path, content).map_err(NavError::Io)?;
        log::info!("saved options to {}", path.display());
        Ok(())
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
