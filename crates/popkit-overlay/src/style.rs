#![forbid(unsafe_code)]

//! Presentation styles and alert entrance/exit options.

use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::drag::DragRule;
use crate::intent::{HorizontalAnchor, VerticalAnchor};

/// How the overlay is presented.
///
/// Frozen while the overlay is on screen; see
/// [`OverlayController::set_style`](crate::OverlayController::set_style).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OverlayStyle {
    /// Centered dialog.
    #[default]
    Alert,
    /// Sheet rising from the bottom edge, dismissable by dragging down.
    HalfModal,
    /// Anchored popover; entrance and exit are the host's native animation.
    Popover,
    /// Banner dropping from the top edge, dismissable by dragging up.
    Notification,
}

impl OverlayStyle {
    /// All styles, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Alert,
        Self::HalfModal,
        Self::Popover,
        Self::Notification,
    ];

    /// Drag behaviour, if the style supports drag-to-dismiss.
    #[inline]
    pub fn drag_rule(self) -> Option<DragRule> {
        match self {
            Self::Notification => Some(DragRule::DismissUpward),
            Self::HalfModal => Some(DragRule::DismissDownward),
            Self::Alert | Self::Popover => None,
        }
    }

    /// Whether the style supports drag-to-dismiss at all.
    #[inline]
    pub fn is_draggable(self) -> bool {
        self.drag_rule().is_some()
    }

    /// Whether the host performs the entrance/exit animation natively.
    #[inline]
    pub fn is_host_animated(self) -> bool {
        matches!(self, Self::Popover)
    }
}

/// Edge or corner an alert enters from / leaves towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EntryDirection {
    /// Appear in place at the center.
    #[default]
    None,
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl EntryDirection {
    /// Anchors of the hidden alert frame relative to the safe area.
    ///
    /// Corners place the frame diagonally outside the safe area, edges place
    /// it just outside that edge and centered on the other axis.
    pub fn anchors(self) -> (HorizontalAnchor, VerticalAnchor) {
        use HorizontalAnchor as H;
        use VerticalAnchor as V;
        match self {
            Self::None => (H::Center, V::Center),
            Self::TopLeft => (H::BeforeSafeLeft, V::AboveSafeTop),
            Self::Top => (H::Center, V::AboveSafeTop),
            Self::TopRight => (H::AfterSafeRight, V::AboveSafeTop),
            Self::Right => (H::AfterSafeRight, V::Center),
            Self::BottomRight => (H::AfterSafeRight, V::BelowSafeBottom),
            Self::Bottom => (H::Center, V::BelowSafeBottom),
            Self::BottomLeft => (H::BeforeSafeLeft, V::BelowSafeBottom),
            Self::Left => (H::BeforeSafeLeft, V::Center),
        }
    }
}

bitflags! {
    /// Visual effects applied to a hidden alert.
    ///
    /// The empty set means no effect: the alert only moves. An exit with no
    /// effect and [`EntryDirection::None`] disappears immediately.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct AlertAnimations: u8 {
        /// Hidden alpha is 0 (alert and backdrop).
        const FADE = 0b01;
        /// Hidden scale is the configured zoom scale (default 0.01).
        const ZOOM = 0b10;
    }
}

impl Default for AlertAnimations {
    fn default() -> Self {
        Self::FADE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_banner_and_sheet_drag() {
        assert_eq!(
            OverlayStyle::Notification.drag_rule(),
            Some(DragRule::DismissUpward)
        );
        assert_eq!(
            OverlayStyle::HalfModal.drag_rule(),
            Some(DragRule::DismissDownward)
        );
        assert!(!OverlayStyle::Alert.is_draggable());
        assert!(!OverlayStyle::Popover.is_draggable());
    }

    #[test]
    fn popover_is_host_animated() {
        for style in OverlayStyle::ALL {
            assert_eq!(style.is_host_animated(), style == OverlayStyle::Popover);
        }
    }

    #[test]
    fn direction_anchors_cover_every_edge() {
        use HorizontalAnchor as H;
        use VerticalAnchor as V;
        assert_eq!(EntryDirection::None.anchors(), (H::Center, V::Center));
        assert_eq!(
            EntryDirection::TopLeft.anchors(),
            (H::BeforeSafeLeft, V::AboveSafeTop)
        );
        assert_eq!(
            EntryDirection::BottomRight.anchors(),
            (H::AfterSafeRight, V::BelowSafeBottom)
        );
        assert_eq!(EntryDirection::Left.anchors(), (H::BeforeSafeLeft, V::Center));
        assert_eq!(EntryDirection::Bottom.anchors(), (H::Center, V::BelowSafeBottom));
    }

    #[test]
    fn default_alert_animation_is_fade() {
        assert_eq!(AlertAnimations::default(), AlertAnimations::FADE);
        assert!(AlertAnimations::empty().is_empty());
        let both = AlertAnimations::FADE | AlertAnimations::ZOOM;
        assert!(both.contains(AlertAnimations::ZOOM));
    }
}
