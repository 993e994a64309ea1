//! CLI argument parsing and input file selection.

mod args;
mod selector;

pub use args::Args;
pub use selector::{SelectionError, list_text_files, parse_selection, select_file};
