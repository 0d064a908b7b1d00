use crate::models::SwipeDirection;

/// Maps a DOM `KeyboardEvent.key` value to a swipe. Unmapped keys return `None`.
pub fn direction_for_key(key: &str) -> Option<SwipeDirection> {
    match key {
        "ArrowRight" | " " | "Enter" => Some(SwipeDirection::Right),
        "ArrowLeft" | "Escape" => Some(SwipeDirection::Left),
        "ArrowUp" => Some(SwipeDirection::Up),
        "ArrowDown" | "?" => Some(SwipeDirection::Down),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_keys() {
        for key in ["ArrowRight", " ", "Enter"] {
            assert_eq!(direction_for_key(key), Some(SwipeDirection::Right), "{key:?}");
        }
    }

    #[test]
    fn test_skip_save_details_keys() {
        assert_eq!(direction_for_key("ArrowLeft"), Some(SwipeDirection::Left));
        assert_eq!(direction_for_key("Escape"), Some(SwipeDirection::Left));
        assert_eq!(direction_for_key("ArrowUp"), Some(SwipeDirection::Up));
        assert_eq!(direction_for_key("ArrowDown"), Some(SwipeDirection::Down));
        assert_eq!(direction_for_key("?"), Some(SwipeDirection::Down));
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(direction_for_key("a"), None);
        assert_eq!(direction_for_key("arrowright"), None);
        assert_eq!(direction_for_key(""), None);
    }
}
