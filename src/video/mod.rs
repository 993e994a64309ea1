//! Per-segment video rendering.
//!
//! For every segment with audio: probe the audio length, render a title card
//! of that length showing the segment text, then mux the two into a
//! `merged_` clip.

mod ffmpeg;

pub use ffmpeg::{
    RenderOutcome, RenderReport, TextBox, VideoError, VideoRenderer, escape_filter_value,
    parse_probe_duration,
};
