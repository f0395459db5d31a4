#![forbid(unsafe_code)]

//! Timing curves for animated transitions.
//!
//! # Invariants
//!
//! - Input progress is clamped to [0.0, 1.0].
//! - Every curve maps 0.0 → 0.0 and 1.0 → 1.0.
//! - Only [`Easing::Back`] can leave [0.0, 1.0] in between.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Easing function applied to linear animation progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Easing {
    /// Linear interpolation. Used by the auto-dismiss timer bar.
    Linear,
    /// Smooth ease-out (decelerating).
    EaseOut,
    /// Smooth ease-in (accelerating).
    EaseIn,
    /// Smooth S-curve. Default for overlay transitions.
    #[default]
    EaseInOut,
    /// Slight overshoot then settle.
    Back,
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0).
    pub fn apply(self, t: f64) -> f64 {
        const BACK_OVERSHOOT: f64 = 1.70158;
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t.powi(3),
            Self::EaseOut => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOut if t < 0.5 => 4.0 * t.powi(3),
            Self::EaseInOut => 1.0 - (2.0 - 2.0 * t).powi(3) / 2.0,
            Self::Back => {
                let u = t - 1.0;
                1.0 + (BACK_OVERSHOOT + 1.0) * u.powi(3) + BACK_OVERSHOOT * u.powi(2)
            }
        }
    }

    /// Check if this easing can produce values outside 0.0-1.0.
    pub fn can_overshoot(self) -> bool {
        matches!(self, Self::Back)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::EaseOut,
        Easing::EaseIn,
        Easing::EaseInOut,
        Easing::Back,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-10, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-10, "{easing:?} at 1");
        }
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::Linear.apply(-0.5), 0.0);
        assert_eq!(Easing::Linear.apply(1.5), 1.0);
    }

    #[test]
    fn ease_in_out_is_symmetric_at_half() {
        let at_half = Easing::EaseInOut.apply(0.5);
        assert!((at_half - 0.5).abs() < 0.001, "got {at_half}");
    }

    #[test]
    fn ease_out_decelerates_and_ease_in_accelerates() {
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
        assert!(Easing::EaseIn.apply(0.5) < 0.5);
    }

    #[test]
    fn only_back_overshoots() {
        for easing in ALL {
            let overshoots = (1..100).any(|i| easing.apply(i as f64 / 100.0) > 1.0);
            assert_eq!(overshoots, easing.can_overshoot(), "{easing:?}");
        }
    }

    #[test]
    fn default_is_ease_in_out() {
        assert_eq!(Easing::default(), Easing::EaseInOut);
    }
}
