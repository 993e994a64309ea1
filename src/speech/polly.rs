//! Speech synthesis through the AWS Polly CLI.

use std::path::PathBuf;

use log::{debug, info, warn};
use thiserror::Error;

use crate::config::{LayoutConfig, SpeechConfig};
use crate::process::{CommandRunner, Invocation, ProcessError};
use crate::segment::Segment;

/// Errors that can occur during speech synthesis.
#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("Failed to read segment {path}: {source}")]
    ReadSegment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Speech synthesis failed for {segment}: {source}")]
    SynthesisFailed {
        segment: String,
        #[source]
        source: ProcessError,
    },

    #[error("Failed to remove stale audio {path}: {source}")]
    StaleAudio {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Speech service reported success but wrote no audio to {0}")]
    MissingOutput(PathBuf),
}

/// Escape the characters that would break the SSML document.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wrap segment text in the speech-markup envelope.
///
/// # Examples
/// ```
/// use narrate_rs::config::SpeechConfig;
/// use narrate_rs::speech::ssml_envelope;
///
/// let ssml = ssml_envelope("Hello.", &SpeechConfig::default());
/// assert_eq!(
///     ssml,
///     "<speak><prosody rate='80%'>Hello.<break time='731ms'/></prosody></speak>"
/// );
/// ```
pub fn ssml_envelope(text: &str, config: &SpeechConfig) -> String {
    format!(
        "<speak><prosody rate='{}%'>{}<break time='{}ms'/></prosody></speak>",
        config.rate_percent,
        escape_xml(text.trim()),
        config.trailing_pause_ms
    )
}

/// Outcome of synthesizing a batch of segments.
#[derive(Debug, Default)]
pub struct SynthesisReport {
    /// Segments that now have an audio file, in processing order.
    pub voiced: Vec<Segment>,
    /// Segments left without audio, with the reason.
    pub failed: Vec<(Segment, SpeechError)>,
}

/// Synthesizes segment audio by shelling out to `aws polly`.
pub struct PollySynthesizer<'a, R: CommandRunner> {
    runner: &'a R,
    speech: &'a SpeechConfig,
    layout: &'a LayoutConfig,
}

impl<'a, R: CommandRunner> PollySynthesizer<'a, R> {
    /// Create a synthesizer.
    pub fn new(runner: &'a R, speech: &'a SpeechConfig, layout: &'a LayoutConfig) -> Self {
        Self {
            runner,
            speech,
            layout,
        }
    }

    /// Build the `aws polly synthesize-speech` command for one segment.
    pub fn invocation(&self, segment: &Segment, ssml: &str) -> Invocation {
        let audio_name = segment
            .audio_path(self.layout)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Invocation::new("aws")
            .args(["polly", "synthesize-speech"])
            .args(["--output-format", &self.speech.output_format])
            .args(["--voice-id", &self.speech.voice_id])
            .args(["--engine", &self.speech.engine])
            .args(["--text-type", "ssml"])
            .args(["--text", ssml])
            .arg(audio_name)
            .in_dir(segment.dir())
    }

    /// Synthesize audio for a single segment.
    ///
    /// Audio already on disk for the segment is deleted first, so a failed
    /// call never leaves an earlier run's file in place.
    pub fn synthesize(&self, segment: &Segment) -> Result<PathBuf, SpeechError> {
        let text = std::fs::read_to_string(&segment.text_path).map_err(|source| {
            SpeechError::ReadSegment {
                path: segment.text_path.clone(),
                source,
            }
        })?;
        let ssml = ssml_envelope(&text, self.speech);
        debug!("SSML for {}: {ssml}", segment.file_name());

        let audio_path = segment.audio_path(self.layout);
        if audio_path.exists() {
            debug!("Removing stale {}", audio_path.display());
            std::fs::remove_file(&audio_path).map_err(|source| SpeechError::StaleAudio {
                path: audio_path.clone(),
                source,
            })?;
        }

        self.runner
            .run(&self.invocation(segment, &ssml))
            .map_err(|source| SpeechError::SynthesisFailed {
                segment: segment.file_name(),
                source,
            })?;

        if !audio_path.is_file() {
            return Err(SpeechError::MissingOutput(audio_path));
        }

        Ok(audio_path)
    }

    /// Synthesize every segment in the order given.
    ///
    /// Failures are logged and recorded; they never stop the batch.
    pub fn synthesize_all(&self, segments: &[Segment]) -> SynthesisReport {
        let mut report = SynthesisReport::default();

        for (n, segment) in segments.iter().enumerate() {
            info!(
                "Synthesizing speech {}/{}: {}",
                n + 1,
                segments.len(),
                segment.file_name()
            );

            match self.synthesize(segment) {
                Ok(path) => {
                    debug!("Wrote {}", path.display());
                    report.voiced.push(segment.clone());
                }
                Err(e) => {
                    warn!("{e}");
                    report.failed.push((segment.clone(), e));
                }
            }
        }

        info!(
            "Audio synthesis completed: {} voiced, {} failed",
            report.voiced.len(),
            report.failed.len()
        );
        report
    }
}
