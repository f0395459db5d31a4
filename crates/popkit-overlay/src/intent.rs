#![forbid(unsafe_code)]

//! Layout intents and the style → intent table.
//!
//! A [`LayoutIntent`] is a declarative target: which safe-area or screen edge
//! the overlay is pinned to, how wide it may be, how tall it may grow, and
//! its alpha, scale and backdrop alpha. Resolving an intent against a
//! [`ResolveContext`] yields a concrete [`Placement`].
//!
//! Intents stay declarative while an animation runs, so a keyboard or
//! viewport change mid-flight retargets the animation instead of snapping.
//!
//! # Invariants
//!
//! - Every style has exactly one on-screen and one off-screen intent.
//! - Resolved width and height are never negative.
//! - Resolved alpha and backdrop alpha are in [0.0, 1.0].

use popkit_core::geometry::{Rect, Size, Viewport, lerp};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::drag::DragRule;
use crate::style::{AlertAnimations, EntryDirection, OverlayStyle};

/// Horizontal pin of the overlay frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HorizontalAnchor {
    /// Centered on the safe area.
    Center,
    /// Right edge on the safe area's left edge.
    BeforeSafeLeft,
    /// Left edge on the safe area's right edge.
    AfterSafeRight,
    /// Left edge at x = 0 (popover content).
    Leading,
}

/// Vertical pin of the overlay frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VerticalAnchor {
    /// Centered on the safe area above the keyboard.
    Center,
    /// Bottom edge on the safe area's top edge.
    AboveSafeTop,
    /// Top edge on the safe area's bottom edge.
    BelowSafeBottom,
    /// Top edge on the safe area's top edge.
    SafeTop,
    /// Bottom edge on the screen's top edge.
    AboveScreen,
    /// Top edge on the screen's bottom edge.
    BelowScreen,
    /// Bottom edge on the screen's bottom edge, lifted by the keyboard.
    ScreenBottom,
    /// Top edge at y = 0 (popover content).
    Top,
}

/// Width rule.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WidthRule {
    /// Safe width minus `n` margins.
    SafeMinusMargins(f64),
    /// Full screen width.
    Screen,
    /// Popover preferred width.
    Preferred,
}

/// Maximum-height rule. The frame takes the content's height up to this.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HeightRule {
    /// Safe height minus `n` margins minus the keyboard.
    SafeMinusMargins(f64),
    /// Configured fraction of the safe height minus half the keyboard.
    SafeFraction,
    /// Exactly the popover preferred height.
    Preferred,
}

/// Height of the overlay content for a given frame width.
pub trait MeasureHeight {
    fn height_for_width(&self, width: f64) -> f64;
}

impl MeasureHeight for f64 {
    fn height_for_width(&self, _width: f64) -> f64 {
        *self
    }
}

/// Everything an intent needs to become a [`Placement`].
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    pub viewport: Viewport,
    pub keyboard_height: f64,
    pub margin: f64,
    pub notification_fraction: f64,
    pub preferred_size: Size,
    pub content: &'a dyn MeasureHeight,
}

impl std::fmt::Debug for ResolveContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolveContext")
            .field("viewport", &self.viewport)
            .field("keyboard_height", &self.keyboard_height)
            .field("margin", &self.margin)
            .field("preferred_size", &self.preferred_size)
            .finish()
    }
}

/// Declarative target layout for the overlay container.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayoutIntent {
    pub horizontal: HorizontalAnchor,
    pub vertical: VerticalAnchor,
    pub width: WidthRule,
    pub height: HeightRule,
    pub alpha: f64,
    pub scale: f64,
    pub backdrop_alpha: f64,
}

impl LayoutIntent {
    /// Resolve against the host geometry.
    pub fn resolve(&self, ctx: &ResolveContext<'_>) -> Placement {
        let vp = ctx.viewport;
        let safe = vp.safe_rect();
        let keyboard = ctx.keyboard_height.max(0.0);

        let width = match self.width {
            WidthRule::SafeMinusMargins(n) => safe.width - n * ctx.margin,
            WidthRule::Screen => vp.size.width,
            WidthRule::Preferred => ctx.preferred_size.width,
        }
        .max(0.0);

        let height = match self.height {
            HeightRule::SafeMinusMargins(n) => {
                let max = (safe.height - n * ctx.margin - keyboard).max(0.0);
                ctx.content.height_for_width(width).min(max)
            }
            HeightRule::SafeFraction => {
                let max = (ctx.notification_fraction * safe.height - keyboard / 2.0).max(0.0);
                ctx.content.height_for_width(width).min(max)
            }
            HeightRule::Preferred => ctx.preferred_size.height,
        }
        .max(0.0);

        let x = match self.horizontal {
            HorizontalAnchor::Center => safe.center_x() - width / 2.0,
            HorizontalAnchor::BeforeSafeLeft => safe.left() - width,
            HorizontalAnchor::AfterSafeRight => safe.right(),
            HorizontalAnchor::Leading => 0.0,
        };

        let y = match self.vertical {
            VerticalAnchor::Center => {
                let available = (safe.height - keyboard).max(0.0);
                safe.top() + available / 2.0 - height / 2.0
            }
            VerticalAnchor::AboveSafeTop => safe.top() - height,
            VerticalAnchor::BelowSafeBottom => safe.bottom(),
            VerticalAnchor::SafeTop => safe.top(),
            VerticalAnchor::AboveScreen => -height,
            VerticalAnchor::BelowScreen => vp.size.height,
            VerticalAnchor::ScreenBottom => vp.size.height - keyboard - height,
            VerticalAnchor::Top => 0.0,
        };

        Placement {
            frame: Rect::new(x, y, width, height),
            alpha: self.alpha.clamp(0.0, 1.0),
            scale: self.scale,
            backdrop_alpha: self.backdrop_alpha.clamp(0.0, 1.0),
        }
    }

    /// Same intent with alert effects applied on top.
    #[must_use]
    pub fn with_effects(mut self, effects: AlertAnimations, zoom_scale: f64) -> Self {
        if effects.contains(AlertAnimations::FADE) {
            self.alpha = 0.0;
            self.backdrop_alpha = 0.0;
        }
        if effects.contains(AlertAnimations::ZOOM) {
            self.scale = zoom_scale;
        }
        self
    }
}

/// A resolved layout: what the host should render this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub frame: Rect,
    pub alpha: f64,
    pub scale: f64,
    pub backdrop_alpha: f64,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            frame: Rect::default(),
            alpha: 0.0,
            scale: 1.0,
            backdrop_alpha: 0.0,
        }
    }
}

impl Placement {
    /// Interpolate towards `other`; `t` is clamped to [0, 1].
    pub fn lerp(&self, other: &Placement, t: f64) -> Placement {
        let t = t.clamp(0.0, 1.0);
        Placement {
            frame: self.frame.lerp(&other.frame, t),
            alpha: lerp(self.alpha, other.alpha, t),
            scale: lerp(self.scale, other.scale, t),
            backdrop_alpha: lerp(self.backdrop_alpha, other.backdrop_alpha, t),
        }
    }

    /// Shift the frame vertically.
    #[must_use]
    pub fn offset_y(mut self, dy: f64) -> Placement {
        self.frame = self.frame.offset(0.0, dy);
        self
    }

    /// Compare with a tolerance on every component.
    pub fn approx_eq(&self, other: &Placement, epsilon: f64) -> bool {
        self.frame.approx_eq(&other.frame, epsilon)
            && (self.alpha - other.alpha).abs() <= epsilon
            && (self.scale - other.scale).abs() <= epsilon
            && (self.backdrop_alpha - other.backdrop_alpha).abs() <= epsilon
    }
}

/// Per-style presentation data: the only place styles differ in layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleProfile {
    pub style: OverlayStyle,
    pub onscreen: LayoutIntent,
    /// Off-screen intent before direction and effects are applied.
    pub offscreen: LayoutIntent,
    /// Whether [`EntryDirection`] and [`AlertAnimations`] shape the
    /// off-screen intent.
    pub directional: bool,
    pub drag: Option<DragRule>,
}

const ALERT_ONSCREEN: LayoutIntent = LayoutIntent {
    horizontal: HorizontalAnchor::Center,
    vertical: VerticalAnchor::Center,
    width: WidthRule::SafeMinusMargins(2.0),
    height: HeightRule::SafeMinusMargins(2.0),
    alpha: 1.0,
    scale: 1.0,
    backdrop_alpha: 1.0,
};

const NOTIFICATION_ONSCREEN: LayoutIntent = LayoutIntent {
    horizontal: HorizontalAnchor::Center,
    vertical: VerticalAnchor::SafeTop,
    width: WidthRule::SafeMinusMargins(1.0),
    height: HeightRule::SafeFraction,
    alpha: 1.0,
    scale: 1.0,
    backdrop_alpha: 0.0,
};

const HALF_MODAL_ONSCREEN: LayoutIntent = LayoutIntent {
    horizontal: HorizontalAnchor::Center,
    vertical: VerticalAnchor::ScreenBottom,
    width: WidthRule::Screen,
    height: HeightRule::SafeMinusMargins(2.0),
    alpha: 1.0,
    scale: 1.0,
    backdrop_alpha: 1.0,
};

const POPOVER_ONSCREEN: LayoutIntent = LayoutIntent {
    horizontal: HorizontalAnchor::Leading,
    vertical: VerticalAnchor::Top,
    width: WidthRule::Preferred,
    height: HeightRule::Preferred,
    alpha: 1.0,
    scale: 1.0,
    backdrop_alpha: 0.0,
};

static PROFILES: [StyleProfile; 4] = [
    StyleProfile {
        style: OverlayStyle::Alert,
        onscreen: ALERT_ONSCREEN,
        offscreen: ALERT_ONSCREEN,
        directional: true,
        drag: None,
    },
    StyleProfile {
        style: OverlayStyle::HalfModal,
        onscreen: HALF_MODAL_ONSCREEN,
        offscreen: LayoutIntent {
            vertical: VerticalAnchor::BelowScreen,
            backdrop_alpha: 0.0,
            ..HALF_MODAL_ONSCREEN
        },
        directional: false,
        drag: Some(DragRule::DismissDownward),
    },
    StyleProfile {
        style: OverlayStyle::Popover,
        onscreen: POPOVER_ONSCREEN,
        offscreen: LayoutIntent {
            alpha: 0.0,
            ..POPOVER_ONSCREEN
        },
        directional: false,
        drag: None,
    },
    StyleProfile {
        style: OverlayStyle::Notification,
        onscreen: NOTIFICATION_ONSCREEN,
        offscreen: LayoutIntent {
            vertical: VerticalAnchor::AboveScreen,
            ..NOTIFICATION_ONSCREEN
        },
        directional: false,
        drag: Some(DragRule::DismissUpward),
    },
];

impl StyleProfile {
    /// Look up the profile for `style`.
    pub fn for_style(style: OverlayStyle) -> &'static StyleProfile {
        let idx = match style {
            OverlayStyle::Alert => 0,
            OverlayStyle::HalfModal => 1,
            OverlayStyle::Popover => 2,
            OverlayStyle::Notification => 3,
        };
        &PROFILES[idx]
    }

    /// Off-screen intent for the given alert direction and effects.
    ///
    /// Non-directional styles ignore both.
    pub fn offscreen_intent(
        &self,
        direction: EntryDirection,
        effects: AlertAnimations,
        zoom_scale: f64,
    ) -> LayoutIntent {
        if !self.directional {
            return self.offscreen;
        }
        let (horizontal, vertical) = direction.anchors();
        LayoutIntent {
            horizontal,
            vertical,
            ..self.offscreen
        }
        .with_effects(effects, zoom_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use popkit_core::geometry::Insets;

    const MARGIN: f64 = 15.0;

    fn ctx(content: &dyn MeasureHeight, keyboard: f64) -> ResolveContext<'_> {
        ResolveContext {
            viewport: Viewport::new(Size::new(400.0, 800.0), Insets::new(40.0, 0.0, 20.0, 0.0)),
            keyboard_height: keyboard,
            margin: MARGIN,
            notification_fraction: 0.33,
            preferred_size: Size::new(400.0, 180.0),
            content,
        }
    }

    #[test]
    fn profiles_are_indexed_by_style() {
        for style in OverlayStyle::ALL {
            assert_eq!(StyleProfile::for_style(style).style, style);
            assert_eq!(StyleProfile::for_style(style).drag, style.drag_rule());
        }
    }

    #[test]
    fn alert_onscreen_is_centered_with_margins() {
        let content = 200.0;
        let p = ALERT_ONSCREEN.resolve(&ctx(&content, 0.0));
        assert_eq!(p.frame.width, 400.0 - 2.0 * MARGIN);
        assert_eq!(p.frame.height, 200.0);
        // Safe area spans 40..780, center 410.
        assert!((p.frame.center_y() - 410.0).abs() < 1e-9);
        assert!((p.frame.center_x() - 200.0).abs() < 1e-9);
        assert_eq!(p.alpha, 1.0);
    }

    #[test]
    fn alert_height_is_capped_by_safe_area() {
        let content = 5_000.0;
        let p = ALERT_ONSCREEN.resolve(&ctx(&content, 0.0));
        assert_eq!(p.frame.height, 740.0 - 2.0 * MARGIN);
    }

    #[test]
    fn keyboard_recenters_alert_above_it() {
        let content = 200.0;
        let without = ALERT_ONSCREEN.resolve(&ctx(&content, 0.0));
        let with = ALERT_ONSCREEN.resolve(&ctx(&content, 300.0));
        assert!((without.frame.center_y() - with.frame.center_y() - 150.0).abs() < 1e-9);
    }

    #[test]
    fn notification_hidden_sits_above_screen() {
        let content = 100.0;
        let profile = StyleProfile::for_style(OverlayStyle::Notification);
        let hidden = profile
            .offscreen_intent(EntryDirection::Left, AlertAnimations::all(), 0.01)
            .resolve(&ctx(&content, 0.0));
        assert_eq!(hidden.frame.bottom(), 0.0);
        assert_eq!(hidden.scale, 1.0, "non-directional styles ignore effects");
        let shown = profile.onscreen.resolve(&ctx(&content, 0.0));
        assert_eq!(shown.frame.top(), 40.0);
        assert_eq!(shown.frame.width, 400.0 - MARGIN);
    }

    #[test]
    fn notification_height_is_a_fraction_of_safe_area() {
        let content = 10_000.0;
        let shown = NOTIFICATION_ONSCREEN.resolve(&ctx(&content, 0.0));
        assert!((shown.frame.height - 0.33 * 740.0).abs() < 1e-9);
        let with_kb = NOTIFICATION_ONSCREEN.resolve(&ctx(&content, 100.0));
        assert!((with_kb.frame.height - (0.33 * 740.0 - 50.0)).abs() < 1e-9);
    }

    #[test]
    fn half_modal_rests_on_screen_bottom_full_width() {
        let content = 300.0;
        let profile = StyleProfile::for_style(OverlayStyle::HalfModal);
        let shown = profile.onscreen.resolve(&ctx(&content, 0.0));
        assert_eq!(shown.frame.bottom(), 800.0);
        assert_eq!(shown.frame.width, 400.0);
        assert_eq!(shown.backdrop_alpha, 1.0);
        let hidden = profile.offscreen.resolve(&ctx(&content, 0.0));
        assert_eq!(hidden.frame.top(), 800.0);
        assert_eq!(hidden.backdrop_alpha, 0.0);
        let lifted = profile.onscreen.resolve(&ctx(&content, 250.0));
        assert_eq!(lifted.frame.bottom(), 550.0);
    }

    #[test]
    fn popover_fills_preferred_size() {
        let content = 999.0;
        let profile = StyleProfile::for_style(OverlayStyle::Popover);
        let shown = profile.onscreen.resolve(&ctx(&content, 300.0));
        assert_eq!(shown.frame, Rect::new(0.0, 0.0, 400.0, 180.0));
        let hidden = profile.offscreen.resolve(&ctx(&content, 0.0));
        assert_eq!(hidden.frame, shown.frame);
        assert_eq!(hidden.alpha, 0.0);
    }

    #[test]
    fn alert_effects_set_alpha_and_scale() {
        let content = 100.0;
        let profile = StyleProfile::for_style(OverlayStyle::Alert);
        let faded = profile
            .offscreen_intent(EntryDirection::None, AlertAnimations::FADE, 0.01)
            .resolve(&ctx(&content, 0.0));
        assert_eq!(faded.alpha, 0.0);
        assert_eq!(faded.backdrop_alpha, 0.0);
        assert_eq!(faded.scale, 1.0);

        let zoomed = profile
            .offscreen_intent(EntryDirection::None, AlertAnimations::ZOOM, 0.01)
            .resolve(&ctx(&content, 0.0));
        assert_eq!(zoomed.alpha, 1.0);
        assert_eq!(zoomed.scale, 0.01);
    }

    #[test]
    fn alert_directions_place_frame_outside_safe_area() {
        let content = 100.0;
        let c = ctx(&content, 0.0);
        let safe = c.viewport.safe_rect();
        let profile = StyleProfile::for_style(OverlayStyle::Alert);
        let at = |dir| {
            profile
                .offscreen_intent(dir, AlertAnimations::empty(), 0.01)
                .resolve(&c)
                .frame
        };
        let top_left = at(EntryDirection::TopLeft);
        assert_eq!(top_left.right(), safe.left());
        assert_eq!(top_left.bottom(), safe.top());
        let right = at(EntryDirection::Right);
        assert_eq!(right.left(), safe.right());
        let bottom = at(EntryDirection::Bottom);
        assert_eq!(bottom.top(), safe.bottom());
        assert!((bottom.center_x() - safe.center_x()).abs() < 1e-9);
    }

    #[test]
    fn placement_lerp_endpoints() {
        let a = Placement::default();
        let b = Placement {
            frame: Rect::new(10.0, 20.0, 30.0, 40.0),
            alpha: 1.0,
            scale: 1.0,
            backdrop_alpha: 1.0,
        };
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        assert!((a.lerp(&b, 0.5).alpha - 0.5).abs() < 1e-12);
    }
}
