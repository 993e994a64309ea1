//! CLI argument definitions.

use clap::Parser;
use std::path::PathBuf;

/// Turn a text file into a narrated title-card slideshow video.
#[derive(Parser, Debug)]
#[command(name = "narrate-rs")]
#[command(about = "Turn a text file into a narrated title-card slideshow video")]
#[command(version)]
pub struct Args {
    /// Directory holding the input text files; all artifacts are written here
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// ID of the file to convert, skipping the interactive prompt
    #[arg(short, long)]
    pub select: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
