//! Paragraph splitting and segment file naming.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use regex::Regex;
use thiserror::Error;

use crate::config::LayoutConfig;

/// Errors that can occur while segmenting a text file.
#[derive(Error, Debug)]
pub enum SegmentError {
    #[error("Invalid input file name: {0}")]
    InvalidFileName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One paragraph of the input, written to its own numbered text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// 1-based position in the source document.
    pub index: usize,
    /// Path of the `<stem>_NNNN.txt` file holding the paragraph.
    pub text_path: PathBuf,
}

impl Segment {
    /// File name of the segment text file.
    pub fn file_name(&self) -> String {
        self.text_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Directory holding the segment and all its derived artifacts.
    pub fn dir(&self) -> &Path {
        self.text_path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Paired audio file: the text path with the audio extension.
    pub fn audio_path(&self, layout: &LayoutConfig) -> PathBuf {
        self.text_path.with_extension(&layout.audio_extension)
    }

    /// Intermediate title-card video.
    pub fn title_card_path(&self, layout: &LayoutConfig) -> PathBuf {
        self.dir()
            .join(format!("{}{}.mp4", layout.title_card_prefix, self.file_name()))
    }

    /// Whether `name` is a segment file of `stem`, `<stem>_NNNN.<ext>`.
    pub fn is_segment_name(stem: &str, name: &str, layout: &LayoutConfig) -> bool {
        segment_pattern(stem, &layout.text_extension).is_match(name)
    }

    /// Final rendered clip, `merged_<segment-file-name>.mp4`.
    pub fn clip_path(&self, layout: &LayoutConfig) -> PathBuf {
        self.dir()
            .join(format!("{}{}.mp4", layout.clip_prefix, self.file_name()))
    }
}

/// Name of the n-th segment file for `stem`.
pub fn segment_file_name(stem: &str, index: usize, extension: &str) -> String {
    format!("{stem}_{index:04}.{extension}")
}

/// Pattern matching `<stem>_NNNN.<ext>` (four or more digits).
pub fn segment_pattern(stem: &str, extension: &str) -> Regex {
    let pattern = format!(
        r"^{}_(\d{{4,}})\.{}$",
        regex::escape(stem),
        regex::escape(extension)
    );
    Regex::new(&pattern).expect("escaped segment pattern is valid")
}

/// Split text into paragraphs separated by exactly one blank line.
///
/// CRLF line endings are normalised first. Trailing newlines are trimmed from
/// each paragraph and whitespace-only pieces are dropped.
pub fn split_paragraphs(content: &str) -> Vec<String> {
    let normalized = content.replace("\r\n", "\n");

    normalized
        .split("\n\n")
        .map(|piece| piece.trim_end_matches('\n'))
        .filter(|piece| !piece.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// List segment files for `stem` already present in `dir`.
///
/// Results come back in directory-read order, which the filesystem does not
/// guarantee to be sorted.
pub fn discover_segments(
    dir: &Path,
    stem: &str,
    layout: &LayoutConfig,
) -> Result<Vec<Segment>, SegmentError> {
    let mut segments = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !Segment::is_segment_name(stem, &name, layout) {
            continue;
        }

        // Digits sit between `<stem>_` and the extension
        let digits = name[stem.len() + 1..].split('.').next().unwrap_or_default();
        if let Ok(index) = digits.parse::<usize>() {
            segments.push(Segment {
                index,
                text_path: entry.path(),
            });
        }
    }

    Ok(segments)
}

/// Sort segments by file name, the order the renderer walks them in.
pub fn sort_by_file_name(segments: &mut [Segment]) {
    segments.sort_by_key(Segment::file_name);
}

/// Writes one numbered text file per paragraph.
pub struct Segmenter {
    layout: LayoutConfig,
}

impl Segmenter {
    /// Create a segmenter using the given naming conventions.
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Split `input` into segment files next to it.
    ///
    /// The input file is left untouched. Returns the segments in document
    /// order.
    pub fn split_file(&self, input: &Path) -> Result<Vec<Segment>, SegmentError> {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| SegmentError::InvalidFileName(input.display().to_string()))?;
        let dir = input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let stale = discover_segments(dir, stem, &self.layout)?;
        if !stale.is_empty() {
            warn!(
                "{} segment file(s) for '{stem}' left over from a previous run will be overwritten or ignored",
                stale.len()
            );
        }

        let content = std::fs::read_to_string(input)?;
        let paragraphs = split_paragraphs(&content);

        let mut segments = Vec::with_capacity(paragraphs.len());
        for (i, paragraph) in paragraphs.iter().enumerate() {
            let index = i + 1;
            let text_path = dir.join(segment_file_name(stem, index, &self.layout.text_extension));
            std::fs::write(&text_path, format!("{paragraph}\n"))?;
            debug!("Wrote {}", text_path.display());

            segments.push(Segment { index, text_path });
        }

        info!(
            "Text splitting completed: {} segment(s) from {}",
            segments.len(),
            input.display()
        );
        Ok(segments)
    }
}
