//! Cleanup of intermediate artifacts after the final merge.

mod sweep;

pub use sweep::{CleanupError, clean_up};
