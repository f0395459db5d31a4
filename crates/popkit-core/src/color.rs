#![forbid(unsafe_code)]

//! Plain RGBA colors.
//!
//! Colors are carried as values only; resolving them against a platform
//! palette (light/dark appearance, named assets) is left to the host.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An 8-bit-per-channel RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create an opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha scaled by `factor` (clamped to [0, 1]).
    #[must_use]
    pub fn with_alpha(self, factor: f64) -> Self {
        let a = (f64::from(self.a) * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Alpha as a fraction in [0, 1].
    #[inline]
    pub fn alpha(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Error / destructive tint.
    pub const RED: Self = Self::rgb(0xE5, 0x39, 0x35);
    /// Default accent for icons, timer bar and buttons.
    pub const SECONDARY: Self = Self::rgb(0x1E, 0x88, 0xE5);
}
