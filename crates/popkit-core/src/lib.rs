#![forbid(unsafe_code)]

//! Core: geometry, easing, pan gestures and a virtual-clock scheduler.
//!
//! # Role in popkit
//! `popkit-core` holds the toolkit-neutral primitives that the overlay
//! controller (`popkit-overlay`) is built on. Nothing in here knows about
//! presentation styles or lifecycle states.
//!
//! # Primary responsibilities
//! - **Geometry**: points, sizes, rectangles, insets and the host viewport.
//! - **Easing**: timing curves used to interpolate animated placements.
//! - **Gesture**: pan events as delivered by the host gesture facility.
//! - **Schedule**: cancellable, deadline-ordered tasks driven by `advance`.
//!
//! # How it fits in the system
//! The host forwards elapsed time, viewport changes and pan events to the
//! overlay controller. The controller stores its pending animation and timer
//! completions in a [`schedule::Scheduler`] so that everything runs on the
//! caller's thread, in deadline order, and is dropped with its owner.

pub mod color;
pub mod easing;
pub mod geometry;
pub mod gesture;
pub mod logging;
pub mod schedule;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
