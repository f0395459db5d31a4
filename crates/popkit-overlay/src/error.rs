#![forbid(unsafe_code)]

//! Configuration errors.
//!
//! Transitions never fail: a request that does not fit the current state is
//! ignored. The only fallible surface is configuration, validated once when a
//! controller is built from an [`OverlayConfig`](crate::OverlayConfig).

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("margin must be finite and non-negative, got {0}")]
    InvalidMargin(f64),

    #[error("notification height fraction must be in (0, 1], got {0}")]
    InvalidFraction(f64),

    #[error("dismiss velocity must be finite and positive, got {0}")]
    InvalidVelocity(f64),

    #[error("zoom scale must be in (0, 1], got {0}")]
    InvalidZoomScale(f64),

    #[error("content metric `{name}` must be finite and non-negative, got {value}")]
    InvalidMetric { name: &'static str, value: f64 },
}
