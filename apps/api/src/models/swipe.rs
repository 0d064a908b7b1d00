use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeAction {
    Apply,
    Skip,
    Save,
    Details,
}

impl SwipeDirection {
    /// right = apply, left = skip, up = save, down = details.
    pub fn action(self) -> SwipeAction {
        match self {
            SwipeDirection::Right => SwipeAction::Apply,
            SwipeDirection::Left => SwipeAction::Skip,
            SwipeDirection::Up => SwipeAction::Save,
            SwipeDirection::Down => SwipeAction::Details,
        }
    }
}

/// One entry of the append-only swipe history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeRecord {
    pub job_id: String,
    pub action: SwipeAction,
    pub timestamp: DateTime<Utc>,
}
