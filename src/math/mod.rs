//! Pure rotation math for the navigation modes.

/// Exponential tilt correction toward a reference up.
pub mod autolevel;
/// Angular quantization with hysteresis.
pub mod snap;
/// Pointer-motion-to-rotation algorithms.
pub mod trackball;
/// Yaw/pitch/roll orbit representation.
pub mod turntable;
