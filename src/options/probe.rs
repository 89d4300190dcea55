use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::probe::ProbeMethod;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Probe", inline)]
#[serde(default)]
/// Geometry probing parameters for gating and orbit origins.
pub struct ProbeOptions {
    /// How geometry under the cursor is detected.
    #[schemars(title = "Probe Method")]
    pub method: ProbeMethod,
    /// Gating radius in pixels: geometry within this distance of the cursor
    /// suppresses navigation.
    #[schemars(title = "Gate Radius", range(min = 0.0, max = 64.0), extend("step" = 1.0))]
    pub radius: f32,
    /// Width of the viewport border band, in pixels, where gating is
    /// bypassed.
    #[schemars(title = "Border Width", range(min = 0.0, max = 64.0), extend("step" = 1.0))]
    pub border: f32,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            method: ProbeMethod::Raycast,
            radius: 20.0,
            border: 16.0,
        }
    }
}
