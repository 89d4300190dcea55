// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Pixel/step/angle casts and float literal comparisons are pervasive in
// camera math
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::float_cmp)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::struct_excessive_bools)]
// Tests assert with unwrap/panic freely
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic))]

//! Interactive viewport camera navigation.
//!
//! Viewnav turns raw pointer/key/wheel events into camera pose updates for a
//! host 3D viewport: orbit (turntable or trackball), pan, dolly, zoom and
//! first-person fly/walk, with live switching between them mid-gesture. It
//! renders nothing itself — the host supplies geometry queries behind
//! [`probe::GeometryQuery`] and applies the poses the navigator produces.
//!
//! # Key entry points
//!
//! - [`machine::Navigator`] - session start gating and per-tick advancement
//! - [`input::InputRouter`] - raw events resolved against the keymap
//! - [`pose::CameraPose`] - the mutable subject of navigation
//! - [`options::Options`] - runtime configuration (TOML presets, JSON schema)
//!
//! # Architecture
//!
//! The host feeds every raw event to the [`input::InputRouter`] and, once a
//! navigation trigger fires, asks [`machine::Navigator::try_start`] whether a
//! session begins or the event should fall through to paint/sculpt handling
//! (ZBrush-style gating). While a session is live, each host tick takes one
//! [`input::TickState`] snapshot and passes it to
//! [`machine::Navigator::advance`], which returns the running/confirmed/
//! cancelled outcome. All state lives in the session; all time arrives as
//! `dt`.

pub mod error;
pub mod fps;
pub mod input;
pub mod machine;
pub mod math;
pub mod options;
pub mod pose;
pub mod probe;
pub mod session;
pub mod subdiv;
pub mod viewport;
