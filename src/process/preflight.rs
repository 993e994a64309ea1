//! Preflight check for required external tools.

use log::debug;
use thiserror::Error;

/// Errors raised before any work starts.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PreflightError {
    #[error("{0} could not be found. Please install {0} and try again.")]
    MissingTool(String),
}

/// Return the tools for which `locate` reports false, in input order.
pub fn missing_tools<'a, F>(tools: &'a [String], locate: F) -> Vec<&'a str>
where
    F: Fn(&str) -> bool,
{
    tools
        .iter()
        .map(String::as_str)
        .filter(|tool| !locate(tool))
        .collect()
}

/// Verify every tool resolves on `PATH`; fails on the first missing one.
pub fn check_requirements(tools: &[String]) -> Result<(), PreflightError> {
    let missing = missing_tools(tools, |tool| match which::which(tool) {
        Ok(path) => {
            debug!("Found {tool} at {}", path.display());
            true
        }
        Err(_) => false,
    });

    match missing.first() {
        Some(tool) => Err(PreflightError::MissingTool(tool.to_string())),
        None => Ok(()),
    }
}
