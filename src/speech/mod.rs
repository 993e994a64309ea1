//! Speech synthesis for segment files.
//!
//! Each segment's text is wrapped in an SSML envelope that slows the voice
//! and appends a short pause, then handed to the cloud speech CLI.

mod polly;

pub use polly::{PollySynthesizer, SpeechError, SynthesisReport, escape_xml, ssml_envelope};
