//! Interactive selection of the input text file.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::LayoutConfig;

/// Errors that can occur while choosing the input file.
#[derive(Error, Debug)]
pub enum SelectionError {
    #[error("No .{0} files found in the directory.")]
    NoTextFiles(String),

    #[error("Invalid ID selected!")]
    InvalidSelection(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Candidate input files in `dir`, sorted by name.
///
/// The concat manifest shares the text extension and is never offered.
pub fn list_text_files(dir: &Path, layout: &LayoutConfig) -> Result<Vec<PathBuf>, SelectionError> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_file() {
            continue;
        }
        if path.file_name().is_some_and(|n| n == layout.manifest_name.as_str()) {
            continue;
        }
        if path
            .extension()
            .is_some_and(|ext| ext == layout.text_extension.as_str())
        {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Resolve a typed ID to an index into a list of `len` entries.
pub fn parse_selection(input: &str, len: usize) -> Result<usize, SelectionError> {
    let trimmed = input.trim();
    trimmed
        .parse::<usize>()
        .ok()
        .filter(|&i| i < len)
        .ok_or_else(|| SelectionError::InvalidSelection(trimmed.to_string()))
}

/// Print the indexed listing and resolve the user's choice.
///
/// `preset` answers the prompt directly; otherwise one line is read from
/// `input`. Any invalid answer is an error, there is no second prompt.
pub fn select_file<I, O>(
    files: &[PathBuf],
    layout: &LayoutConfig,
    preset: Option<&str>,
    input: &mut I,
    out: &mut O,
) -> Result<PathBuf, SelectionError>
where
    I: BufRead,
    O: Write,
{
    writeln!(
        out,
        "Found {} .{} files:",
        files.len(),
        layout.text_extension
    )?;
    for (i, file) in files.iter().enumerate() {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());
        writeln!(out, "{i}: {name}")?;
    }

    let answer = match preset {
        Some(answer) => answer.to_string(),
        None => {
            write!(out, "Select a file by typing its ID and pressing Enter: ")?;
            out.flush()?;
            let mut line = String::new();
            input.read_line(&mut line)?;
            line
        }
    };

    let index = parse_selection(&answer, files.len())?;
    Ok(files[index].clone())
}
