#![forbid(unsafe_code)]

//! Pan gestures: the event stream the overlay's drag handling consumes.
//!
//! Hosts with a native pan recognizer construct [`PanEvent`]s directly from
//! its callbacks. Hosts that only see raw pointer samples (terminals, custom
//! canvases) can feed them through [`PanRecognizer`], which applies a start
//! threshold and estimates velocity.
//!
//! # State Machine
//!
//! `Idle → Pressed → Panning → Idle`. `Began` is emitted once when the
//! pointer leaves the start threshold, followed by zero or more `Changed`
//! and exactly one `Ended` or `Cancelled`.
//!
//! # Invariants
//!
//! 1. Translation is always relative to the pointer-down position.
//! 2. No `Changed`/`Ended` is emitted without a preceding `Began`.
//! 3. After `cancel()` or `reset()` the recognizer is idle.

use std::time::Duration;

use crate::geometry::{Point, Vector};

/// Phase of a pan gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanPhase {
    /// The pointer moved far enough to count as a pan.
    Began,
    /// The pointer moved during an active pan.
    Changed,
    /// The pointer was released.
    Ended,
    /// The system interrupted the gesture.
    Cancelled,
}

/// A single pan update delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanEvent {
    pub phase: PanPhase,
    /// Offset from the gesture's start position.
    pub translation: Vector,
    /// Instantaneous velocity in points per second.
    pub velocity: Vector,
}

impl PanEvent {
    /// Create a new pan event.
    pub const fn new(phase: PanPhase, translation: Vector, velocity: Vector) -> Self {
        Self {
            phase,
            translation,
            velocity,
        }
    }

    /// Gesture start with no translation yet.
    pub const fn began() -> Self {
        Self::new(PanPhase::Began, Vector::ZERO, Vector::ZERO)
    }

    /// Movement update.
    pub const fn changed(translation: Vector, velocity: Vector) -> Self {
        Self::new(PanPhase::Changed, translation, velocity)
    }

    /// Release.
    pub const fn ended(translation: Vector, velocity: Vector) -> Self {
        Self::new(PanPhase::Ended, translation, velocity)
    }

    /// System cancellation.
    pub const fn cancelled(translation: Vector) -> Self {
        Self::new(PanPhase::Cancelled, translation, Vector::ZERO)
    }
}

/// Thresholds for [`PanRecognizer`].
#[derive(Debug, Clone)]
pub struct PanConfig {
    /// Minimum distance (points) before a pan begins (default: 10).
    pub start_threshold: f64,
    /// Samples older than this are ignored for velocity (default: 100ms).
    pub velocity_window: Duration,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            start_threshold: 10.0,
            velocity_window: Duration::from_millis(100),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Sample {
    pos: Point,
    at: Duration,
}

#[derive(Debug, Clone)]
struct PanTracker {
    start: Point,
    last: Sample,
    previous: Option<Sample>,
    started: bool,
}

/// Turns raw pointer samples into [`PanEvent`]s.
///
/// Timestamps are caller-supplied offsets from any fixed epoch, which keeps
/// the recognizer deterministic under test.
#[derive(Debug, Clone, Default)]
pub struct PanRecognizer {
    config: PanConfig,
    tracker: Option<PanTracker>,
}

impl PanRecognizer {
    /// Create a new recognizer with the given configuration.
    #[must_use]
    pub fn new(config: PanConfig) -> Self {
        Self {
            config,
            tracker: None,
        }
    }

    /// Whether a pan is currently in progress.
    #[inline]
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.tracker.as_ref().is_some_and(|t| t.started)
    }

    /// Pointer pressed.
    pub fn pointer_down(&mut self, pos: Point, at: Duration) {
        self.tracker = Some(PanTracker {
            start: pos,
            last: Sample { pos, at },
            previous: None,
            started: false,
        });
    }

    /// Pointer moved while pressed.
    ///
    /// Returns `Began` the first time the threshold is crossed, `Changed`
    /// afterwards, and `None` while still inside the threshold.
    pub fn pointer_move(&mut self, pos: Point, at: Duration) -> Option<PanEvent> {
        let threshold = self.config.start_threshold;
        let tracker = self.tracker.as_mut()?;
        tracker.previous = Some(tracker.last);
        tracker.last = Sample { pos, at };

        let translation = Vector::new(pos.x - tracker.start.x, pos.y - tracker.start.y);
        if !tracker.started {
            if translation.x.hypot(translation.y) < threshold {
                return None;
            }
            tracker.started = true;
            return Some(PanEvent::new(PanPhase::Began, translation, Vector::ZERO));
        }
        let velocity = self.velocity();
        Some(PanEvent::changed(translation, velocity))
    }

    /// Pointer released. Returns `Ended` if a pan was in progress.
    pub fn pointer_up(&mut self, pos: Point, at: Duration) -> Option<PanEvent> {
        let tracker = self.tracker.as_mut()?;
        if tracker.last.pos != pos || tracker.last.at != at {
            tracker.previous = Some(tracker.last);
            tracker.last = Sample { pos, at };
        }
        let velocity = self.velocity();
        let tracker = self.tracker.take()?;
        if !tracker.started {
            return None;
        }
        let translation = Vector::new(pos.x - tracker.start.x, pos.y - tracker.start.y);
        Some(PanEvent::ended(translation, velocity))
    }

    /// Abort the gesture (focus loss, system interruption).
    pub fn cancel(&mut self) -> Option<PanEvent> {
        let tracker = self.tracker.take()?;
        if !tracker.started {
            return None;
        }
        let translation = Vector::new(
            tracker.last.pos.x - tracker.start.x,
            tracker.last.pos.y - tracker.start.y,
        );
        Some(PanEvent::cancelled(translation))
    }

    /// Reset to idle without emitting anything.
    pub fn reset(&mut self) {
        self.tracker = None;
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PanConfig {
        &self.config
    }

    fn velocity(&self) -> Vector {
        let Some(tracker) = self.tracker.as_ref() else {
            return Vector::ZERO;
        };
        let Some(prev) = tracker.previous else {
            return Vector::ZERO;
        };
        let dt = tracker.last.at.saturating_sub(prev.at);
        if dt.is_zero() || dt > self.config.velocity_window {
            return Vector::ZERO;
        }
        let secs = dt.as_secs_f64();
        Vector::new(
            (tracker.last.pos.x - prev.pos.x) / secs,
            (tracker.last.pos.y - prev.pos.y) / secs,
        )
    }
}
