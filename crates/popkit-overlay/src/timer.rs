#![forbid(unsafe_code)]

//! Auto-dismiss countdown.
//!
//! The timer only records when its countdown began; scheduling the start and
//! expiry belongs to the controller. Progress runs linearly from 0.0 at start
//! to 1.0 at expiry and is what the host draws as the indicator bar.

use std::fmt;
use std::time::Duration;

use crate::event::Handler;

/// Configured auto-dismiss timer.
pub struct AutoDismissTimer {
    duration: Duration,
    started_at: Option<Duration>,
    completion: Option<Handler>,
}

impl fmt::Debug for AutoDismissTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoDismissTimer")
            .field("duration", &self.duration)
            .field("started_at", &self.started_at)
            .field("has_completion", &self.completion.is_some())
            .finish()
    }
}

impl AutoDismissTimer {
    /// A timer of `duration`, or `None` when the duration is zero.
    pub fn new(duration: Duration, completion: Option<Handler>) -> Option<Self> {
        if duration.is_zero() {
            return None;
        }
        Some(Self {
            duration,
            started_at: None,
            completion,
        })
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Clock time at which the countdown began, if running.
    #[inline]
    pub fn started_at(&self) -> Option<Duration> {
        self.started_at
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Begin the countdown at clock time `now`.
    pub fn start(&mut self, now: Duration) {
        self.started_at = Some(now);
    }

    /// Stop the countdown without firing, keeping the configuration.
    pub fn reset(&mut self) {
        self.started_at = None;
    }

    /// Countdown progress at `now`, in [0.0, 1.0].
    pub fn progress(&self, now: Duration) -> f64 {
        let Some(start) = self.started_at else {
            return 0.0;
        };
        let elapsed = now.saturating_sub(start).as_secs_f64();
        (elapsed / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Run the completion. It stays configured for later expiries.
    pub fn run_completion(&mut self) {
        if let Some(f) = self.completion.as_mut() {
            f();
        }
    }
}
