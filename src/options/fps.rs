use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Fly / Walk", inline)]
#[serde(default)]
/// First-person movement parameters.
pub struct FpsOptions {
    /// Base movement speed in world units per second.
    #[schemars(title = "Movement Speed", range(min = 0.1, max = 20.0), extend("step" = 0.1))]
    pub movement_speed: f32,
    /// Speed multiplier while `Faster` is held.
    #[schemars(title = "Fast Multiplier", range(min = 1.0, max = 20.0), extend("step" = 0.5))]
    pub fast_multiplier: f32,
    /// Speed multiplier while `Slower` is held.
    #[schemars(title = "Slow Multiplier", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub slow_multiplier: f32,
    /// Keep forward/back/left/right in the world horizontal plane; up/down
    /// use world vertical.
    #[schemars(title = "FPS Horizontal")]
    pub horizontal: bool,
    /// Start walk sessions with gravity enabled.
    #[schemars(title = "Use Gravity")]
    pub use_gravity: bool,
    /// Eye height above the ground while walking, world units.
    #[schemars(title = "View Height", range(min = 0.1, max = 10.0), extend("step" = 0.1))]
    pub view_height: f32,
    /// Fraction of the view height while crouching.
    #[schemars(title = "Crouch Factor", range(min = 0.1, max = 1.0), extend("step" = 0.05))]
    pub crouch_factor: f32,
    /// Initial upward impulse of a jump, world units per second.
    #[schemars(title = "Jump Height", range(min = 0.1, max = 10.0), extend("step" = 0.1))]
    pub jump_height: f32,
}

impl Default for FpsOptions {
    fn default() -> Self {
        Self {
            movement_speed: 2.5,
            fast_multiplier: 5.0,
            slow_multiplier: 0.2,
            horizontal: false,
            use_gravity: false,
            view_height: 1.6,
            crouch_factor: 0.45,
            jump_height: 1.0,
        }
    }
}
