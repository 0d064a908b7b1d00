// Gesture recognition: pointer/touch sequences and key presses → swipe directions.
// Recognizers are per-sequence; the input router owns one per active pointer.

pub mod input;
pub mod keyboard;
pub mod recognizer;

pub use input::{InputEvent, InputOutcome, InputRouter};
pub use recognizer::GestureConfig;
