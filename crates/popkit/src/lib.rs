#![forbid(unsafe_code)]

//! popkit public facade crate.
//!
//! Re-exports the overlay controller and the primitives a host needs to
//! drive it, plus a prelude for day-to-day use.
//!
//! ```
//! use popkit::prelude::*;
//! use std::time::Duration;
//!
//! let mut overlay = Overlay::new();
//! overlay.set_style(OverlayStyle::HalfModal);
//! overlay.set_title("Share");
//! overlay.add_sticky_cancel_button();
//! overlay.present(None);
//! overlay.tick(Duration::from_millis(400));
//! assert_eq!(overlay.state(), LifecycleState::Presented);
//! ```

use thiserror::Error;

// --- Core re-exports -------------------------------------------------------

pub use popkit_core::color::Rgba;
pub use popkit_core::easing::Easing;
pub use popkit_core::geometry::{Insets, Point, Rect, Size, Vector, Viewport};
pub use popkit_core::gesture::{PanConfig, PanEvent, PanPhase, PanRecognizer};

// --- Overlay re-exports ----------------------------------------------------

pub use popkit_overlay::{
    AlertAnimations, AutoDismissTimer, ButtonId, ButtonRole, Completion, ConfigError,
    ContentBlock, ContentMetrics, DragDecision, DragRule, DragSession, EntryDirection, Handler,
    LayoutIntent, LifecycleState, OverlayConfig, OverlayContent, OverlayController, OverlayEvent,
    OverlayStyle, Placement, Section, StyleProfile, Transition,
};

/// Short name for the controller.
pub type Overlay = OverlayController;

// --- Errors ---------------------------------------------------------------

/// Top-level error type for popkit hosts.
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected overlay configuration.
    #[error("invalid overlay configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Standard result type for popkit APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Build a controller from `config`, validating it first.
pub fn build_overlay(config: OverlayConfig) -> Result<Overlay> {
    Ok(OverlayController::with_config(config)?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AlertAnimations, ButtonId, ContentBlock, EntryDirection, Error, LifecycleState, Overlay,
        OverlayConfig, OverlayEvent, OverlayStyle, PanEvent, Placement, Result, Rgba, Transition,
        Viewport, build_overlay,
    };

    pub use crate::{core, overlay};
}

pub use popkit_core as core;
pub use popkit_overlay as overlay;
