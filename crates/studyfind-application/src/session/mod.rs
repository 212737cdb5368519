//! Authentication state tracking.

mod tracker;

pub use tracker::SessionTracker;
