//! Merging rendered clips into the final video.

mod manifest;

pub use manifest::{ConcatError, Concatenator, Manifest, is_clip_name, scan_clips};
