//! Study mode: sessions over a deck and the swipe gestures that drive them

pub mod gesture;
pub mod session;

pub use gesture::{classify, Gesture, SwipeThresholds, SwipeTracker, TouchPoint};
pub use session::{Progress, StudySession};
