//! Concat manifest handling and the final stream-copy merge.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use crate::config::LayoutConfig;
use crate::process::{CommandRunner, Invocation, ProcessError};

/// Errors that can occur while concatenating clips.
#[derive(Error, Debug)]
pub enum ConcatError {
    #[error("Manifest {0} already exists; remove it or clean up the previous run first")]
    DirtyManifest(PathBuf),

    #[error("No rendered clips to concatenate")]
    NoClips,

    #[error("Concatenation failed: {0}")]
    Failed(#[source] ProcessError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The listing file consumed by ffmpeg's concat demuxer.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
}

impl Manifest {
    /// Manifest at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the manifest file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a manifest from an earlier run is still on disk.
    pub fn is_dirty(&self) -> bool {
        self.path.exists()
    }

    /// Format one concat demuxer line.
    pub fn line(name: &str) -> String {
        format!("file '{}'\n", name.replace('\'', "'\\''"))
    }

    /// Append one `file '<name>'` line per clip.
    ///
    /// Opens in append mode, so existing entries are kept.
    pub fn append(&self, clip_names: &[String]) -> Result<(), std::io::Error> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        for name in clip_names {
            file.write_all(Self::line(name).as_bytes())?;
        }

        Ok(())
    }

    /// Clip names listed in the manifest, in file order.
    pub fn entries(&self) -> Result<Vec<String>, std::io::Error> {
        let content = std::fs::read_to_string(&self.path)?;
        Ok(content
            .lines()
            .filter_map(|line| line.strip_prefix("file '")?.strip_suffix('\''))
            .map(|name| name.replace("'\\''", "'"))
            .collect())
    }
}

/// Names of `merged_*.mp4` clips in `dir`, in ascending lexical order.
pub fn scan_clips(dir: &Path, layout: &LayoutConfig) -> Result<Vec<String>, std::io::Error> {
    let mut names = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_clip_name(&name, layout) {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

/// Whether `name` follows the rendered-clip naming convention.
pub fn is_clip_name(name: &str, layout: &LayoutConfig) -> bool {
    name.starts_with(&layout.clip_prefix) && name.ends_with(".mp4")
}

/// Stitches every rendered clip in a directory into the final video.
pub struct Concatenator<'a, R: CommandRunner> {
    runner: &'a R,
    layout: &'a LayoutConfig,
}

impl<'a, R: CommandRunner> Concatenator<'a, R> {
    /// Create a concatenator.
    pub fn new(runner: &'a R, layout: &'a LayoutConfig) -> Self {
        Self { runner, layout }
    }

    /// The manifest used for `dir`.
    pub fn manifest(&self, dir: &Path) -> Manifest {
        Manifest::new(dir.join(&self.layout.manifest_name))
    }

    /// Command running the concat demuxer over the manifest.
    pub fn invocation(&self, dir: &Path) -> Invocation {
        Invocation::new("ffmpeg")
            .arg("-y")
            .args(["-f", "concat", "-safe", "0"])
            .args(["-i", &self.layout.manifest_name])
            .args(["-c", "copy"])
            .arg(&self.layout.output_name)
            .in_dir(dir)
    }

    /// Write the manifest for `dir` and merge the clips into the output file.
    ///
    /// A manifest left over from a previous run is refused rather than
    /// appended to. If the merge fails the manifest is removed again and the
    /// clips are kept.
    pub fn concatenate(&self, dir: &Path) -> Result<PathBuf, ConcatError> {
        let manifest = self.manifest(dir);
        if manifest.is_dirty() {
            return Err(ConcatError::DirtyManifest(manifest.path().to_path_buf()));
        }

        let clips = scan_clips(dir, self.layout)?;
        if clips.is_empty() {
            return Err(ConcatError::NoClips);
        }
        debug!("Concatenating {} clip(s): {:?}", clips.len(), clips);

        manifest.append(&clips)?;
        if let Err(source) = self.runner.run(&self.invocation(dir)) {
            // Clips stay; only the manifest would block the next attempt
            std::fs::remove_file(manifest.path())?;
            return Err(ConcatError::Failed(source));
        }

        let output = dir.join(&self.layout.output_name);
        info!("Processing completed. {} is ready.", output.display());
        Ok(output)
    }
}
