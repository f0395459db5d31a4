#![forbid(unsafe_code)]

//! Headless overlay presentation controller.
//!
//! An overlay is presented in one of four [`OverlayStyle`]s: a centered
//! alert, a bottom half-sheet, an anchored popover or a top notification
//! banner. [`OverlayController`] owns the lifecycle state machine, the
//! style-to-layout table, drag-to-dismiss, the auto-dismiss timer and the
//! content model. The host supplies geometry, keyboard height, pan events
//! and elapsed time, and renders whatever [`Placement`] the controller
//! reports.
//!
//! # Example
//!
//! ```
//! use popkit_overlay::{OverlayController, OverlayStyle, LifecycleState};
//! use std::time::Duration;
//!
//! let mut overlay = OverlayController::new();
//! overlay.set_style(OverlayStyle::Notification);
//! overlay.set_title("Saved");
//! overlay.present(None);
//! assert_eq!(overlay.state(), LifecycleState::Presenting);
//!
//! overlay.tick(Duration::from_millis(500));
//! assert_eq!(overlay.state(), LifecycleState::Presented);
//! ```

pub mod config;
pub mod content;
pub mod controller;
pub mod drag;
pub mod error;
pub mod event;
pub mod intent;
pub mod lifecycle;
pub mod style;
pub mod timer;

pub use config::OverlayConfig;
pub use content::{ButtonId, ButtonRole, ContentBlock, ContentMetrics, OverlayContent, Section};
pub use controller::OverlayController;
pub use drag::{DragDecision, DragRule, DragSession};
pub use error::ConfigError;
pub use event::{Completion, Handler, OverlayEvent};
pub use intent::{LayoutIntent, Placement, StyleProfile};
pub use lifecycle::{LifecycleState, Transition};
pub use style::{AlertAnimations, EntryDirection, OverlayStyle};
pub use timer::AutoDismissTimer;
