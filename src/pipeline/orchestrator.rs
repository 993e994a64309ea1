//! Linear orchestration of the narration stages.

use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

use crate::cleanup::{CleanupError, clean_up};
use crate::concat::{ConcatError, Concatenator};
use crate::config::Config;
use crate::process::CommandRunner;
use crate::segment::{SegmentError, Segmenter};
use crate::speech::PollySynthesizer;
use crate::video::VideoRenderer;

/// Errors that abort a run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Segmentation failed: {0}")]
    Segment(#[from] SegmentError),

    #[error("{0}")]
    Concat(#[from] ConcatError),

    #[error("Cleanup failed: {0}")]
    Cleanup(#[from] CleanupError),
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub segments: usize,
    pub voiced: usize,
    pub rendered: usize,
    /// Segments without audio at render time, including synthesis failures.
    pub skipped: usize,
    /// Segments lost to a probe, render, or mux failure.
    pub failed: usize,
    pub output: PathBuf,
}

/// Runs every stage in sequence against one input file.
pub struct Pipeline<'a, R: CommandRunner> {
    runner: &'a R,
    config: &'a Config,
}

impl<'a, R: CommandRunner> Pipeline<'a, R> {
    /// Create a pipeline.
    pub fn new(runner: &'a R, config: &'a Config) -> Self {
        Self { runner, config }
    }

    /// Convert `input` into the final video next to it.
    ///
    /// A manifest left by an earlier run is refused before any work starts.
    /// Per-segment failures are logged and counted. Merged clips are only
    /// removed once the final concatenation has succeeded.
    pub fn run(&self, input: &Path) -> Result<RunSummary, PipelineError> {
        let dir = input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let layout = &self.config.layout;
        let concatenator = Concatenator::new(self.runner, layout);

        let manifest = concatenator.manifest(dir);
        if manifest.is_dirty() {
            return Err(ConcatError::DirtyManifest(manifest.path().to_path_buf()).into());
        }

        let segments = Segmenter::new(layout.clone()).split_file(input)?;

        let synthesis =
            PollySynthesizer::new(self.runner, &self.config.speech, layout).synthesize_all(&segments);
        for (segment, _) in &synthesis.failed {
            warn!("{} has no audio and will be skipped", segment.file_name());
        }

        // Only segments voiced in this run are rendered
        let rendering = VideoRenderer::new(self.runner, &self.config.render, layout)
            .render_all(&synthesis.voiced);

        let output = concatenator.concatenate(dir)?;
        clean_up(dir, layout)?;

        let summary = RunSummary {
            segments: segments.len(),
            voiced: synthesis.voiced.len(),
            rendered: rendering.clips.len(),
            skipped: synthesis.failed.len() + rendering.skipped.len(),
            failed: rendering.failed.len(),
            output,
        };
        info!(
            "Run finished: {} segment(s), {} rendered, {} skipped, {} failed",
            summary.segments, summary.rendered, summary.skipped, summary.failed
        );
        Ok(summary)
    }
}
