#![forbid(unsafe_code)]

//! Callbacks and host-facing events.
//!
//! Completions run at most once and are dropped uninvoked when the request
//! they belong to is ignored. Handlers are persistent and run each time the
//! interaction they are bound to has finished dismissing the overlay.

use std::time::Duration;

use popkit_core::geometry::Size;

use crate::content::ButtonId;
use crate::lifecycle::LifecycleState;

/// One-shot callback run when a transition finishes.
pub type Completion = Box<dyn FnOnce() + 'static>;

/// Persistent callback replacing a default interaction.
pub type Handler = Box<dyn FnMut() + 'static>;

/// Things the host must act on, collected in order and drained by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent {
    /// Attach the overlay to the host's presentation surface.
    Attach { animated: bool },
    /// Remove the overlay from the presentation surface.
    Detach { animated: bool },
    /// Resign keyboard focus in the host before presenting.
    HideKeyboard,
    /// The lifecycle state changed.
    StateChanged {
        from: LifecycleState,
        to: LifecycleState,
    },
    /// A content button was activated.
    ButtonPressed(ButtonId),
    /// The popover's preferred content size changed.
    PreferredContentSize(Size),
    /// The auto-dismiss countdown started.
    TimerStarted { duration: Duration },
    /// The auto-dismiss countdown reached zero.
    TimerExpired,
}

impl OverlayEvent {
    /// Stable event name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Attach { .. } => "attach",
            Self::Detach { .. } => "detach",
            Self::HideKeyboard => "hide_keyboard",
            Self::StateChanged { .. } => "state_changed",
            Self::ButtonPressed(_) => "button_pressed",
            Self::PreferredContentSize(_) => "preferred_content_size",
            Self::TimerStarted { .. } => "timer_started",
            Self::TimerExpired => "timer_expired",
        }
    }
}
