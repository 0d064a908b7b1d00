//! Gesture Recognizer: turns one pointer/touch sequence into a swipe direction.
//!
//! Lifecycle: `Idle → Dragging → Resolved | Cancelled`, then `reset()` back to
//! `Idle`. One recognizer tracks exactly one sequence; concurrent pointers each
//! need their own instance (see `gesture::input`).
//!
//! Timestamps come from the samples, never from a clock, so recognition is
//! reproducible from a recorded event stream.

use serde::{Deserialize, Serialize};

use crate::models::SwipeDirection;

/// Velocity in px/ms.
pub const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.6;
/// Displacement in px.
pub const DEFAULT_DISTANCE_THRESHOLD: f64 = 120.0;
pub const DEFAULT_MAX_SWIPE_TIME_MS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureConfig {
    pub velocity_threshold: f64,
    pub distance_threshold: f64,
    /// Longest sequence whose speed alone can resolve a swipe. Distance-based
    /// swipes are accepted at any duration.
    pub max_swipe_time_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            distance_threshold: DEFAULT_DISTANCE_THRESHOLD,
            max_swipe_time_ms: DEFAULT_MAX_SWIPE_TIME_MS,
        }
    }
}

/// A single position sample. Transient, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureSample {
    pub x: f64,
    pub y: f64,
    pub timestamp_ms: u64,
}

impl GestureSample {
    pub fn new(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self { x, y, timestamp_ms }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    Idle,
    Dragging,
    Resolved,
    Cancelled,
}

/// Live drag feedback for the card view. Never finalizes an action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragState {
    pub start_x: f64,
    pub start_y: f64,
    pub current_x: f64,
    pub current_y: f64,
    pub velocity_x: f64,
    pub velocity_y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<SwipeDirection>,
}

#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    config: GestureConfig,
    phase: GesturePhase,
    origin: GestureSample,
    last: GestureSample,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            phase: GesturePhase::Idle,
            origin: GestureSample::new(0.0, 0.0, 0),
            last: GestureSample::new(0.0, 0.0, 0),
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Begins a sequence at `sample`. Restarts any sequence in progress.
    pub fn start(&mut self, sample: GestureSample) {
        self.origin = sample;
        self.last = sample;
        self.phase = GesturePhase::Dragging;
    }

    /// Records an intermediate sample and returns drag feedback.
    pub fn update(&mut self, sample: GestureSample) -> Option<DragState> {
        if self.phase != GesturePhase::Dragging {
            return None;
        }

        let dt = sample.timestamp_ms.saturating_sub(self.last.timestamp_ms);
        let (velocity_x, velocity_y) = if dt > 0 {
            let v = (
                (sample.x - self.last.x) / dt as f64,
                (sample.y - self.last.y) / dt as f64,
            );
            self.last = sample;
            v
        } else {
            (0.0, 0.0)
        };

        let direction = if dt > 0 {
            self.direction_on_dominant_axis(sample, velocity_x, velocity_y, true)
        } else {
            None
        };

        Some(DragState {
            start_x: self.origin.x,
            start_y: self.origin.y,
            current_x: sample.x,
            current_y: sample.y,
            velocity_x,
            velocity_y,
            direction,
        })
    }

    /// Finishes the sequence. `None` means "no swipe": snap the card back.
    pub fn end(&mut self, sample: GestureSample) -> Option<SwipeDirection> {
        if self.phase != GesturePhase::Dragging {
            return None;
        }

        let elapsed = sample.timestamp_ms.saturating_sub(self.origin.timestamp_ms);
        let (velocity_x, velocity_y) = if elapsed > 0 {
            (
                (sample.x - self.origin.x) / elapsed as f64,
                (sample.y - self.origin.y) / elapsed as f64,
            )
        } else {
            (0.0, 0.0)
        };
        let velocity_counts = elapsed <= self.config.max_swipe_time_ms;

        let direction =
            self.direction_on_dominant_axis(sample, velocity_x, velocity_y, velocity_counts);

        self.phase = if direction.is_some() {
            GesturePhase::Resolved
        } else {
            GesturePhase::Cancelled
        };
        direction
    }

    /// Abandons the sequence (pointer cancel, lost capture).
    pub fn cancel(&mut self) {
        if self.phase == GesturePhase::Dragging {
            self.phase = GesturePhase::Cancelled;
        }
    }

    /// Clears all transient state. Call after every resolved or cancelled sequence.
    pub fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
        self.origin = GestureSample::new(0.0, 0.0, 0);
        self.last = self.origin;
    }

    fn direction_on_dominant_axis(
        &self,
        sample: GestureSample,
        velocity_x: f64,
        velocity_y: f64,
        velocity_counts: bool,
    ) -> Option<SwipeDirection> {
        let dx = sample.x - self.origin.x;
        let dy = sample.y - self.origin.y;
        let GestureConfig {
            velocity_threshold,
            distance_threshold,
            ..
        } = self.config;

        let crosses = |delta: f64, velocity: f64| {
            (velocity_counts && velocity.abs() > velocity_threshold)
                || delta.abs() > distance_threshold
        };

        // Ties go to the vertical axis.
        let (delta, velocity, positive, negative) = if dx.abs() > dy.abs() {
            (dx, velocity_x, SwipeDirection::Right, SwipeDirection::Left)
        } else {
            (dy, velocity_y, SwipeDirection::Down, SwipeDirection::Up)
        };

        if !crosses(delta, velocity) {
            return None;
        }

        // Sign from displacement; fall back to velocity for a zero-length flick.
        let sign = if delta != 0.0 { delta } else { velocity };
        if sign > 0.0 {
            Some(positive)
        } else if sign < 0.0 {
            Some(negative)
        } else {
            None
        }
    }
}
