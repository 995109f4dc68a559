//! Swipe gesture recognition
//!
//! Classifies one pointer/touch interaction from its start and end points.
//! Velocity is measured from the horizontal displacement only and is only
//! checked for horizontal swipes.

use serde::Serialize;

pub const MIN_DISTANCE: f64 = 50.0;
/// Distance units per millisecond
pub const MIN_VELOCITY: f64 = 0.3;
pub const MAX_PERPENDICULAR: f64 = 100.0;
pub const MAX_DURATION_MS: i64 = 500;

/// A sampled pointer position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
    /// Milliseconds on any monotonic clock
    pub time_ms: i64,
}

impl TouchPoint {
    pub fn new(x: f64, y: f64, time_ms: i64) -> Self {
        Self { x, y, time_ms }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Gesture {
    SwipeLeft,
    SwipeRight,
    SwipeUp,
    SwipeDown,
    /// Nothing recognized; callers treat this as a tap
    NoGesture,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeThresholds {
    pub min_distance: f64,
    pub min_velocity: f64,
    pub max_perpendicular: f64,
    pub max_duration_ms: i64,
}

impl Default for SwipeThresholds {
    fn default() -> Self {
        Self {
            min_distance: MIN_DISTANCE,
            min_velocity: MIN_VELOCITY,
            max_perpendicular: MAX_PERPENDICULAR,
            max_duration_ms: MAX_DURATION_MS,
        }
    }
}

impl SwipeThresholds {
    pub fn classify(&self, start: TouchPoint, end: TouchPoint) -> Gesture {
        let dt = end.time_ms - start.time_ms;
        if dt < 0 || dt > self.max_duration_ms {
            return Gesture::NoGesture;
        }

        let dx = end.x - start.x;
        let dy = end.y - start.y;
        // dt == 0 gives infinity (or NaN when dx is also 0, which fails the
        // distance check anyway)
        let velocity = dx.abs() / dt as f64;

        if dx.abs() >= self.min_distance
            && dy.abs() <= self.max_perpendicular
            && velocity >= self.min_velocity
        {
            return if dx > 0.0 { Gesture::SwipeRight } else { Gesture::SwipeLeft };
        }

        if dy.abs() >= self.min_distance && dx.abs() <= self.max_perpendicular {
            return if dy > 0.0 { Gesture::SwipeDown } else { Gesture::SwipeUp };
        }

        Gesture::NoGesture
    }
}

/// Classify with the default thresholds
pub fn classify(start: TouchPoint, end: TouchPoint) -> Gesture {
    SwipeThresholds::default().classify(start, end)
}

/// Holds the start point of the single gesture in flight
#[derive(Debug, Default)]
pub struct SwipeTracker {
    thresholds: SwipeThresholds,
    start: Option<TouchPoint>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(thresholds: SwipeThresholds) -> Self {
        Self {
            thresholds,
            start: None,
        }
    }

    /// Touch start. A second `begin` replaces the first.
    pub fn begin(&mut self, point: TouchPoint) {
        self.start = Some(point);
    }

    pub fn in_flight(&self) -> bool {
        self.start.is_some()
    }

    /// Touch end: consume the start point and classify
    pub fn end(&mut self, point: TouchPoint) -> Gesture {
        let gesture = match self.start.take() {
            Some(start) => self.thresholds.classify(start, point),
            None => Gesture::NoGesture,
        };
        log::debug!("Classified gesture as {:?}", gesture);
        gesture
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }
}
