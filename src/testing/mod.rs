//! Headless testing support: probe controls, snapshot helpers.
//!
//! The [`probe`] controls stand in for real widgets and record the frame,
//! visibility and enabled state the solver applied to them. Use
//! [`describe`] and [`frames_to_string`] to capture a placed tree as plain
//! text for snapshot-style assertions.

pub mod probe;
pub mod snapshot;

pub use probe::{Fixed, Wrap};
pub use snapshot::{describe, frames_to_string};
