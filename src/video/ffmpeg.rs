//! Title-card rendering and audio muxing with ffmpeg.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::config::{LayoutConfig, RenderConfig};
use crate::process::{CommandRunner, Invocation, ProcessError};
use crate::segment::{Segment, sort_by_file_name};

/// Errors that can occur while rendering a segment clip.
#[derive(Error, Debug)]
pub enum VideoError {
    #[error("Failed to probe duration of {path}: {source}")]
    ProbeFailed {
        path: PathBuf,
        #[source]
        source: ProcessError,
    },

    #[error("Invalid duration for {path}: {reason}")]
    InvalidDuration { path: PathBuf, reason: String },

    #[error("Title card render failed for {segment}: {source}")]
    RenderFailed {
        segment: String,
        #[source]
        source: ProcessError,
    },

    #[error("Mux failed for {segment}: {source}")]
    MuxFailed {
        segment: String,
        #[source]
        source: ProcessError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    format: ProbeFormat,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

/// Parse the JSON written by `ffprobe -show_entries format=duration -of json`.
pub fn parse_probe_duration(path: &Path, json: &str) -> Result<f64, VideoError> {
    let invalid = |reason: String| VideoError::InvalidDuration {
        path: path.to_path_buf(),
        reason,
    };

    let output: ProbeOutput = serde_json::from_str(json).map_err(|e| invalid(e.to_string()))?;
    let raw = output
        .format
        .duration
        .ok_or_else(|| invalid("no duration reported".to_string()))?;
    let seconds: f64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid(format!("not a number: {raw}")))?;

    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(invalid(format!("not a positive length: {seconds}")));
    }

    Ok(seconds)
}

/// Area available to the overlaid text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBox {
    pub width: u32,
    pub height: u32,
}

impl TextBox {
    /// Frame size shrunk by the configured border on each side.
    pub fn for_frame(config: &RenderConfig) -> Self {
        let scale = 1.0 - 2.0 * config.text_border;
        Self {
            width: (scale * f64::from(config.frame_width)) as u32,
            height: (scale * f64::from(config.frame_height)) as u32,
        }
    }
}

/// Escape a value for use inside an ffmpeg filter option.
pub fn escape_filter_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | ':' | '\'' | ',' | ';' | '[' | ']') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn remove_if_exists(path: &Path) -> std::io::Result<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

/// Result of handing one segment to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// Clip written to the given path.
    Rendered(PathBuf),
    /// No paired audio file, nothing produced.
    Skipped,
}

/// Outcome of rendering a batch of segments.
#[derive(Debug, Default)]
pub struct RenderReport {
    /// Rendered clips, in render order.
    pub clips: Vec<PathBuf>,
    /// Segments without audio.
    pub skipped: Vec<Segment>,
    /// Segments whose render or mux failed; their text and audio are kept.
    pub failed: Vec<(Segment, VideoError)>,
}

/// Renders title-card clips for segments and muxes their audio.
pub struct VideoRenderer<'a, R: CommandRunner> {
    runner: &'a R,
    render: &'a RenderConfig,
    layout: &'a LayoutConfig,
}

impl<'a, R: CommandRunner> VideoRenderer<'a, R> {
    /// Create a renderer.
    pub fn new(runner: &'a R, render: &'a RenderConfig, layout: &'a LayoutConfig) -> Self {
        Self {
            runner,
            render,
            layout,
        }
    }

    /// Duration of an audio file in seconds.
    pub fn probe_duration(&self, audio: &Path) -> Result<f64, VideoError> {
        let probe = Invocation::new("ffprobe")
            .args(["-v", "error"])
            .args(["-show_entries", "format=duration"])
            .args(["-of", "json"]);
        let invocation = match audio.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(dir) => probe.arg(file_name(audio)).in_dir(dir),
            None => probe.arg(audio.to_string_lossy()),
        };

        let json = self
            .runner
            .run(&invocation)
            .map_err(|source| VideoError::ProbeFailed {
                path: audio.to_path_buf(),
                source,
            })?;

        parse_probe_duration(audio, &json)
    }

    /// The `drawtext` filter overlaying the segment's text file.
    pub fn drawtext_filter(&self, segment: &Segment) -> String {
        format!(
            "drawtext=textfile={}:fontsize={}:fontcolor={}:x=(w-text_w)/2:y=(h-text_h)/2:line_spacing={}",
            escape_filter_value(&segment.file_name()),
            self.render.font_size,
            self.render.font_color,
            self.render.line_spacing
        )
    }

    /// Command rendering the solid-background title card.
    pub fn title_card_invocation(&self, segment: &Segment, duration: f64) -> Invocation {
        let source = format!(
            "color=c={}:s={}x{}:d={}",
            self.render.background_color,
            self.render.frame_width,
            self.render.frame_height,
            duration
        );

        Invocation::new("ffmpeg")
            .arg("-y")
            .args(["-f", "lavfi", "-i", &source])
            .args(["-vf", &self.drawtext_filter(segment)])
            .args(["-c:v", &self.render.video_codec])
            .arg(file_name(&segment.title_card_path(self.layout)))
            .in_dir(segment.dir())
    }

    /// Command muxing the title card with the segment audio.
    pub fn mux_invocation(&self, segment: &Segment) -> Invocation {
        Invocation::new("ffmpeg")
            .arg("-y")
            .args(["-i", &file_name(&segment.title_card_path(self.layout))])
            .args(["-i", &file_name(&segment.audio_path(self.layout))])
            .args(["-c:v", "copy"])
            .args(["-c:a", &self.render.audio_codec])
            .args(["-strict", "experimental"])
            .arg(file_name(&segment.clip_path(self.layout)))
            .in_dir(segment.dir())
    }

    /// Render one segment into its `merged_` clip.
    ///
    /// Segments without a paired audio file are skipped. After a successful
    /// mux the title card, segment text and audio are deleted.
    pub fn render_segment(&self, segment: &Segment) -> Result<RenderOutcome, VideoError> {
        let audio = segment.audio_path(self.layout);
        if !audio.is_file() {
            warn!(
                "No audio file found for {}. Skipping...",
                segment.file_name()
            );
            return Ok(RenderOutcome::Skipped);
        }

        let duration = self.probe_duration(&audio)?;
        let text_box = TextBox::for_frame(self.render);
        debug!(
            "{}: duration {duration}s, text box {}x{}",
            segment.file_name(),
            text_box.width,
            text_box.height
        );

        let title_card = segment.title_card_path(self.layout);
        let clip = segment.clip_path(self.layout);

        if let Err(source) = self.runner.run(&self.title_card_invocation(segment, duration)) {
            remove_if_exists(&title_card)?;
            return Err(VideoError::RenderFailed {
                segment: segment.file_name(),
                source,
            });
        }

        if let Err(source) = self.runner.run(&self.mux_invocation(segment)) {
            remove_if_exists(&title_card)?;
            remove_if_exists(&clip)?;
            return Err(VideoError::MuxFailed {
                segment: segment.file_name(),
                source,
            });
        }

        remove_if_exists(&title_card)?;
        std::fs::remove_file(&segment.text_path)?;
        std::fs::remove_file(&audio)?;

        Ok(RenderOutcome::Rendered(clip))
    }

    /// Render every segment, walking them in file-name order.
    pub fn render_all(&self, segments: &[Segment]) -> RenderReport {
        let mut ordered = segments.to_vec();
        sort_by_file_name(&mut ordered);

        let mut report = RenderReport::default();
        for segment in ordered {
            match self.render_segment(&segment) {
                Ok(RenderOutcome::Rendered(clip)) => {
                    info!("Rendered {}", clip.display());
                    report.clips.push(clip);
                }
                Ok(RenderOutcome::Skipped) => report.skipped.push(segment),
                Err(e) => {
                    warn!("{e}");
                    report.failed.push((segment, e));
                }
            }
        }

        info!(
            "Video rendering completed: {} rendered, {} skipped, {} failed",
            report.clips.len(),
            report.skipped.len(),
            report.failed.len()
        );
        report
    }
}
