//! narrate-rs: turn a text file into a narrated slideshow video.
//!
//! The input is split into paragraphs, each paragraph is voiced with the
//! AWS Polly CLI, rendered as a title card with ffmpeg, muxed with its audio,
//! and all clips are concatenated into a single video.

pub mod cleanup;
pub mod cli;
pub mod concat;
pub mod config;
pub mod pipeline;
pub mod process;
pub mod segment;
pub mod speech;
pub mod video;
