pub mod job;
pub mod profile;
pub mod swipe;

pub use job::{JobPosting, SalaryRange, ScoredJob};
pub use profile::Profile;
pub use swipe::{SwipeAction, SwipeDirection, SwipeRecord};
