//! Run configuration.
//!
//! All tunable values live here as named fields with defaults, so the
//! stages receive them explicitly instead of reading ambient constants.

mod settings;

pub use settings::{Config, LayoutConfig, RenderConfig, SpeechConfig};
