#![forbid(unsafe_code)]

//! Overlay lifecycle states.
//!
//! State machine:
//!
//! ```text
//! Hidden → Presenting → Presented ⇄ Dragging
//!              │            │          │
//!              └────────→ Dismissing ←─┘ → Hidden
//! ```
//!
//! `Presenting → Dismissing` happens when `dismiss` interrupts an entrance.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current phase of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LifecycleState {
    /// Detached from the host, nothing rendered.
    #[default]
    Hidden,
    /// Attached and animating in.
    Presenting,
    /// Resting on screen.
    Presented,
    /// Following an active pan gesture.
    Dragging,
    /// Animating out; detaches when done.
    Dismissing,
}

impl LifecycleState {
    /// Whether the overlay is attached to the host.
    #[inline]
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Whether an entrance or exit transition is in flight.
    #[inline]
    pub fn is_transitioning(self) -> bool {
        matches!(self, Self::Presenting | Self::Dismissing)
    }

    /// Whether `present` starts a transition from this state.
    #[inline]
    pub fn accepts_present(self) -> bool {
        matches!(self, Self::Hidden)
    }

    /// Whether `dismiss` starts a transition from this state.
    #[inline]
    pub fn accepts_dismiss(self) -> bool {
        matches!(self, Self::Presenting | Self::Presented | Self::Dragging)
    }

    /// Stable lowercase name for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Presenting => "presenting",
            Self::Presented => "presented",
            Self::Dragging => "dragging",
            Self::Dismissing => "dismissing",
        }
    }
}

/// Outcome of a `present`/`dismiss` style request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The request started a transition.
    Started,
    /// The request was a no-op in the current state; its completion was
    /// dropped without being called.
    Ignored,
}

impl Transition {
    #[inline]
    pub fn is_started(self) -> bool {
        matches!(self, Self::Started)
    }
}
