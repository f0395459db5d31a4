#![forbid(unsafe_code)]

//! Overlay configuration.
//!
//! [`OverlayConfig`] carries every tunable of a controller: style and alert
//! options, timings, layout constants, interaction toggles, colors and the
//! labels used by generated buttons. Builder methods consume and return the
//! config; [`OverlayConfig::validate`] checks the numeric fields before a
//! controller accepts it.

use std::time::Duration;

use popkit_core::color::Rgba;
use popkit_core::easing::Easing;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::content::ContentMetrics;
use crate::error::{ConfigError, Result};
use crate::style::{AlertAnimations, EntryDirection, OverlayStyle};

/// Configuration for an [`OverlayController`](crate::OverlayController).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OverlayConfig {
    pub style: OverlayStyle,
    /// Where an alert comes from.
    pub entry_direction: EntryDirection,
    /// Where an alert leaves to.
    pub exit_direction: EntryDirection,
    pub entry_animations: AlertAnimations,
    pub exit_animations: AlertAnimations,
    /// Entrance, exit and snap-back duration.
    pub animation_duration: Duration,
    /// Pause between attach and the start of the entrance.
    pub settle_delay: Duration,
    /// Duration of the relayout after a keyboard change.
    pub keyboard_animation_duration: Duration,
    pub easing: Easing,
    /// Spacing unit for insets and section gaps.
    pub margin: f64,
    /// Notification max height as a fraction of the safe height.
    pub notification_height_fraction: f64,
    /// Release speed (points/s) past which a drag always dismisses.
    pub dismiss_velocity: f64,
    /// Hidden alert scale when zooming.
    pub zoom_scale: f64,
    pub pan_gesture_enabled: bool,
    pub dismiss_on_backdrop_tap: bool,
    pub show_close_button: bool,
    /// `Some(false)` hides the timer bar even when a timer runs.
    pub show_timer_indicator: Option<bool>,
    /// Fully shown backdrop color. The controller scales its alpha by the
    /// placement's backdrop alpha, see `OverlayController::backdrop_color`.
    pub backdrop_color: Rgba,
    pub tint: Rgba,
    pub dismiss_label: String,
    pub cancel_label: String,
    pub error_title: String,
    pub metrics: ContentMetrics,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            style: OverlayStyle::Alert,
            entry_direction: EntryDirection::None,
            exit_direction: EntryDirection::None,
            entry_animations: AlertAnimations::FADE,
            exit_animations: AlertAnimations::FADE,
            animation_duration: Duration::from_millis(300),
            settle_delay: Duration::from_millis(100),
            keyboard_animation_duration: Duration::from_millis(300),
            easing: Easing::EaseInOut,
            margin: 15.0,
            notification_height_fraction: 0.33,
            dismiss_velocity: 1300.0,
            zoom_scale: 0.01,
            pan_gesture_enabled: true,
            dismiss_on_backdrop_tap: true,
            show_close_button: true,
            show_timer_indicator: Some(true),
            backdrop_color: Rgba::BLACK.with_alpha(0.5),
            tint: Rgba::SECONDARY,
            dismiss_label: "Ok".into(),
            cancel_label: "Cancel".into(),
            error_title: "Attention".into(),
            metrics: ContentMetrics::default(),
        }
    }
}

impl OverlayConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the presentation style.
    pub fn style(mut self, style: OverlayStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the alert entry direction.
    pub fn entry_direction(mut self, direction: EntryDirection) -> Self {
        self.entry_direction = direction;
        self
    }

    /// Set the alert exit direction.
    pub fn exit_direction(mut self, direction: EntryDirection) -> Self {
        self.exit_direction = direction;
        self
    }

    /// Set the alert entrance effects.
    pub fn entry_animations(mut self, animations: AlertAnimations) -> Self {
        self.entry_animations = animations;
        self
    }

    /// Set the alert exit effects.
    pub fn exit_animations(mut self, animations: AlertAnimations) -> Self {
        self.exit_animations = animations;
        self
    }

    /// Set the transition duration.
    pub fn animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    /// Set the pause before the entrance.
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Set the keyboard relayout duration.
    pub fn keyboard_animation_duration(mut self, duration: Duration) -> Self {
        self.keyboard_animation_duration = duration;
        self
    }

    /// Set the transition easing.
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the spacing unit.
    pub fn margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Set the notification height fraction.
    pub fn notification_height_fraction(mut self, fraction: f64) -> Self {
        self.notification_height_fraction = fraction;
        self
    }

    /// Set the fling velocity threshold.
    pub fn dismiss_velocity(mut self, velocity: f64) -> Self {
        self.dismiss_velocity = velocity;
        self
    }

    /// Set the hidden alert zoom scale.
    pub fn zoom_scale(mut self, scale: f64) -> Self {
        self.zoom_scale = scale;
        self
    }

    pub fn pan_gesture_enabled(mut self, enabled: bool) -> Self {
        self.pan_gesture_enabled = enabled;
        self
    }

    pub fn dismiss_on_backdrop_tap(mut self, enabled: bool) -> Self {
        self.dismiss_on_backdrop_tap = enabled;
        self
    }

    pub fn show_close_button(mut self, show: bool) -> Self {
        self.show_close_button = show;
        self
    }

    pub fn show_timer_indicator(mut self, show: Option<bool>) -> Self {
        self.show_timer_indicator = show;
        self
    }

    pub fn backdrop_color(mut self, color: Rgba) -> Self {
        self.backdrop_color = color;
        self
    }

    pub fn tint(mut self, tint: Rgba) -> Self {
        self.tint = tint;
        self
    }

    /// Set the labels of generated dismiss and cancel buttons.
    pub fn button_labels(mut self, dismiss: impl Into<String>, cancel: impl Into<String>) -> Self {
        self.dismiss_label = dismiss.into();
        self.cancel_label = cancel.into();
        self
    }

    /// Set the title used by `present_error`.
    pub fn error_title(mut self, title: impl Into<String>) -> Self {
        self.error_title = title.into();
        self
    }

    /// Set the content size constants.
    pub fn metrics(mut self, metrics: ContentMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Check the numeric fields.
    pub fn validate(&self) -> Result<()> {
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(ConfigError::InvalidMargin(self.margin));
        }
        let fraction = self.notification_height_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(ConfigError::InvalidFraction(fraction));
        }
        if !self.dismiss_velocity.is_finite() || self.dismiss_velocity <= 0.0 {
            return Err(ConfigError::InvalidVelocity(self.dismiss_velocity));
        }
        if !(self.zoom_scale > 0.0 && self.zoom_scale <= 1.0) {
            return Err(ConfigError::InvalidZoomScale(self.zoom_scale));
        }
        let m = &self.metrics;
        for (name, value) in [
            ("line_height", m.line_height),
            ("title_line_height", m.title_line_height),
            ("glyph_width", m.glyph_width),
            ("button_height", m.button_height),
            ("text_field_height", m.text_field_height),
            ("close_button_size", m.close_button_size),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidMetric { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = OverlayConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.animation_duration, Duration::from_millis(300));
        assert_eq!(config.settle_delay, Duration::from_millis(100));
        assert_eq!(config.margin, 15.0);
        assert_eq!(config.dismiss_velocity, 1300.0);
        assert_eq!(config.zoom_scale, 0.01);
        assert_eq!(config.backdrop_color.a, 128);
    }

    #[test]
    fn builder_chains() {
        let config = OverlayConfig::new()
            .style(OverlayStyle::HalfModal)
            .margin(8.0)
            .exit_animations(AlertAnimations::empty())
            .button_labels("OK", "Annuler");
        assert_eq!(config.style, OverlayStyle::HalfModal);
        assert_eq!(config.margin, 8.0);
        assert!(config.exit_animations.is_empty());
        assert_eq!(config.cancel_label, "Annuler");
    }

    #[test]
    fn rejects_bad_numbers() {
        assert_eq!(
            OverlayConfig::new().margin(-1.0).validate(),
            Err(ConfigError::InvalidMargin(-1.0))
        );
        assert!(matches!(
            OverlayConfig::new().notification_height_fraction(0.0).validate(),
            Err(ConfigError::InvalidFraction(_))
        ));
        assert!(matches!(
            OverlayConfig::new().dismiss_velocity(f64::NAN).validate(),
            Err(ConfigError::InvalidVelocity(_))
        ));
        assert!(matches!(
            OverlayConfig::new().zoom_scale(1.5).validate(),
            Err(ConfigError::InvalidZoomScale(_))
        ));
        let metrics = ContentMetrics {
            glyph_width: -2.0,
            ..ContentMetrics::default()
        };
        assert_eq!(
            OverlayConfig::new().metrics(metrics).validate(),
            Err(ConfigError::InvalidMetric {
                name: "glyph_width",
                value: -2.0
            })
        );
    }

    #[test]
    fn error_messages_name_the_field() {
        let err = ConfigError::InvalidMetric {
            name: "line_height",
            value: -1.0,
        };
        assert!(err.to_string().contains("line_height"));
    }
}
