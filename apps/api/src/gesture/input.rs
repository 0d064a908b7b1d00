//! Input routing: raw pointer, touch and key events in, swipe outcomes out.
//!
//! Every pointer id and touch identifier gets its own `GestureRecognizer`, so a
//! second concurrent touch never corrupts the first one's sequence.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::gesture::keyboard::direction_for_key;
use crate::gesture::recognizer::{DragState, GestureConfig, GestureRecognizer, GestureSample};
use crate::models::SwipeDirection;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchPoint {
    pub identifier: i64,
    pub x: f64,
    pub y: f64,
}

/// Raw input as reported by the browser.
///
/// Touch events carry the `changedTouches` list: the touches that began, moved
/// or ended with this event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum InputEvent {
    PointerDown {
        pointer_id: i64,
        x: f64,
        y: f64,
        timestamp_ms: u64,
    },
    PointerMove {
        pointer_id: i64,
        x: f64,
        y: f64,
        timestamp_ms: u64,
    },
    PointerUp {
        pointer_id: i64,
        x: f64,
        y: f64,
        timestamp_ms: u64,
    },
    PointerCancel {
        pointer_id: i64,
    },
    TouchStart {
        changed_touches: Vec<TouchPoint>,
        timestamp_ms: u64,
    },
    TouchMove {
        changed_touches: Vec<TouchPoint>,
        timestamp_ms: u64,
    },
    TouchEnd {
        changed_touches: Vec<TouchPoint>,
        timestamp_ms: u64,
    },
    KeyDown {
        key: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputOutcome {
    /// A sequence began tracking.
    Started,
    /// Mid-drag feedback for rendering only.
    Drag { state: DragState },
    /// A direction resolved; the deck should swipe.
    Swipe { direction: SwipeDirection },
    /// The sequence ended without a swipe; snap the card back.
    SnapBack,
    /// Nothing to do (unmapped key, untracked pointer).
    Ignored,
}

impl InputOutcome {
    fn priority(&self) -> u8 {
        match self {
            InputOutcome::Swipe { .. } => 4,
            InputOutcome::SnapBack => 3,
            InputOutcome::Drag { .. } => 2,
            InputOutcome::Started => 1,
            InputOutcome::Ignored => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum InputSource {
    Pointer(i64),
    Touch(i64),
}

/// Concurrent sequences tracked per router. Starting one more drops the
/// oldest, so pointers that never report an up or cancel cannot pile up.
pub const MAX_ACTIVE_SEQUENCES: usize = 10;

#[derive(Debug)]
struct Sequence {
    recognizer: GestureRecognizer,
    started: u64,
}

/// Per-deck input router.
#[derive(Debug, Default)]
pub struct InputRouter {
    config: GestureConfig,
    active: HashMap<InputSource, Sequence>,
    next_started: u64,
}

impl InputRouter {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            active: HashMap::new(),
            next_started: 0,
        }
    }

    pub fn active_sequences(&self) -> usize {
        self.active.len()
    }

    pub fn handle(&mut self, event: InputEvent) -> InputOutcome {
        match event {
            InputEvent::PointerDown {
                pointer_id,
                x,
                y,
                timestamp_ms,
            } => self.begin(InputSource::Pointer(pointer_id), GestureSample::new(x, y, timestamp_ms)),
            InputEvent::PointerMove {
                pointer_id,
                x,
                y,
                timestamp_ms,
            } => self.moved(InputSource::Pointer(pointer_id), GestureSample::new(x, y, timestamp_ms)),
            InputEvent::PointerUp {
                pointer_id,
                x,
                y,
                timestamp_ms,
            } => self.finish(InputSource::Pointer(pointer_id), GestureSample::new(x, y, timestamp_ms)),
            InputEvent::PointerCancel { pointer_id } => {
                self.abandon(InputSource::Pointer(pointer_id))
            }
            InputEvent::TouchStart {
                changed_touches,
                timestamp_ms,
            } => self.each_touch(&changed_touches, timestamp_ms, Self::begin),
            InputEvent::TouchMove {
                changed_touches,
                timestamp_ms,
            } => self.each_touch(&changed_touches, timestamp_ms, Self::moved),
            InputEvent::TouchEnd {
                changed_touches,
                timestamp_ms,
            } => self.each_touch(&changed_touches, timestamp_ms, Self::finish),
            InputEvent::KeyDown { key } => match direction_for_key(&key) {
                Some(direction) => InputOutcome::Swipe { direction },
                None => InputOutcome::Ignored,
            },
        }
    }

    /// Drops every in-progress sequence, e.g. when the deck is reset.
    pub fn clear(&mut self) {
        for sequence in self.active.values_mut() {
            sequence.recognizer.cancel();
            sequence.recognizer.reset();
        }
        self.active.clear();
    }

    fn each_touch(
        &mut self,
        touches: &[TouchPoint],
        timestamp_ms: u64,
        step: fn(&mut Self, InputSource, GestureSample) -> InputOutcome,
    ) -> InputOutcome {
        touches
            .iter()
            .map(|t| {
                step(
                    self,
                    InputSource::Touch(t.identifier),
                    GestureSample::new(t.x, t.y, timestamp_ms),
                )
            })
            .fold(InputOutcome::Ignored, |best, outcome| {
                if outcome.priority() > best.priority() {
                    outcome
                } else {
                    best
                }
            })
    }

    fn begin(&mut self, source: InputSource, sample: GestureSample) -> InputOutcome {
        if !self.active.contains_key(&source) && self.active.len() >= MAX_ACTIVE_SEQUENCES {
            self.evict_oldest();
        }

        let config = self.config;
        let started = self.next_started;
        self.next_started += 1;

        let sequence = self.active.entry(source).or_insert_with(|| Sequence {
            recognizer: GestureRecognizer::new(config),
            started,
        });
        sequence.started = started;
        sequence.recognizer.start(sample);
        InputOutcome::Started
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .active
            .iter()
            .min_by_key(|(_, sequence)| sequence.started)
            .map(|(source, _)| *source);
        if let Some(source) = oldest {
            debug!(?source, "dropping oldest input sequence");
            self.abandon(source);
        }
    }

    fn moved(&mut self, source: InputSource, sample: GestureSample) -> InputOutcome {
        match self
            .active
            .get_mut(&source)
            .and_then(|sequence| sequence.recognizer.update(sample))
        {
            Some(state) => InputOutcome::Drag { state },
            None => InputOutcome::Ignored,
        }
    }

    fn finish(&mut self, source: InputSource, sample: GestureSample) -> InputOutcome {
        let Some(Sequence { recognizer, .. }) = self.active.get_mut(&source) else {
            debug!(?source, "end for untracked input source");
            return InputOutcome::Ignored;
        };
        let direction = recognizer.end(sample);
        debug!(?source, phase = ?recognizer.phase(), ?direction, "sequence finished");
        recognizer.reset();
        self.active.remove(&source);

        match direction {
            Some(direction) => InputOutcome::Swipe { direction },
            None => InputOutcome::SnapBack,
        }
    }

    fn abandon(&mut self, source: InputSource) -> InputOutcome {
        let Some(Sequence { recognizer, .. }) = self.active.get_mut(&source) else {
            return InputOutcome::Ignored;
        };
        recognizer.cancel();
        recognizer.reset();
        self.active.remove(&source);
        InputOutcome::SnapBack
    }
}
