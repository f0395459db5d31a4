#![forbid(unsafe_code)]

//! Drag-to-dismiss rules for banner and sheet styles.
//!
//! A drag follows the pointer along one axis only, in the dismiss direction.
//! When the pan ends the overlay either dismisses or snaps back, decided by
//! release velocity first and then by how much of the frame is still on
//! screen.

use popkit_core::geometry::Vector;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Direction in which a drag dismisses the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DragRule {
    /// Notification: drag up towards the top edge.
    DismissUpward,
    /// Half-modal: drag down towards the bottom edge.
    DismissDownward,
}

/// Outcome of a finished drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragDecision {
    Dismiss,
    SnapBack,
}

impl DragRule {
    /// Clamp a raw vertical translation to the dismiss direction.
    #[inline]
    pub fn clamp(self, translation_y: f64) -> f64 {
        match self {
            Self::DismissUpward => translation_y.min(0.0),
            Self::DismissDownward => translation_y.max(0.0),
        }
    }

    /// Decide whether a released drag dismisses.
    ///
    /// `height` is the overlay frame height. A release faster than
    /// `velocity_threshold` in the dismiss direction always dismisses;
    /// otherwise the overlay dismisses once less than half of it remains.
    pub fn decide(
        self,
        height: f64,
        translation_y: f64,
        velocity_y: f64,
        velocity_threshold: f64,
    ) -> DragDecision {
        let dismiss = match self {
            Self::DismissUpward => {
                velocity_y < -velocity_threshold || height + translation_y < height / 2.0
            }
            Self::DismissDownward => {
                velocity_y > velocity_threshold || height - translation_y < height / 2.0
            }
        };
        if dismiss {
            DragDecision::Dismiss
        } else {
            DragDecision::SnapBack
        }
    }
}

/// Snapshot of an in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragSession {
    /// Translation when the drag began.
    pub start_translation: Vector,
    /// Latest raw translation from the host.
    pub current_translation: Vector,
    /// Latest velocity from the host.
    pub velocity: Vector,
}

impl DragSession {
    /// Vertical offset applied to the resting frame under `rule`.
    #[inline]
    pub fn offset(&self, rule: DragRule) -> f64 {
        rule.clamp(self.current_translation.y)
    }
}
