//! End-to-end pipeline.
//!
//! Segmenter, speech synthesizer, video renderer, concatenator and cleanup
//! run one after another; descriptors from the segmenter are handed down
//! explicitly instead of being rediscovered from the directory.

mod orchestrator;

pub use orchestrator::{Pipeline, PipelineError, RunSummary};
