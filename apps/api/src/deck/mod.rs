// Swipe deck: pure state machine, the async session that owns it, swipe
// callbacks, hydration and the default job set.

pub mod callbacks;
pub mod handlers;
pub mod hydrate;
pub mod machine;
pub mod sample_jobs;
pub mod session;

pub use callbacks::{LoggingCallbacks, PgSwipeCallbacks, SwipeCallbacks};
pub use session::DeckRegistry;
