#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature enabled this module re-exports the `tracing`
//! macros so downstream crates can log through `popkit_core::debug!` and
//! friends without naming `tracing` directly. Without the feature it is empty
//! and call sites are expected to be gated on `#[cfg(feature = "tracing")]`.
//!
//! Event names follow a dotted `component.action` scheme, e.g.
//! `overlay.transition` or `schedule.fire`.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
