//! narrate-rs CLI entry point.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use narrate_rs::cli::{Args, SelectionError, list_text_files, select_file};
use narrate_rs::config::Config;
use narrate_rs::pipeline::Pipeline;
use narrate_rs::process::{SystemRunner, check_requirements};

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    print_banner();

    let config = Config::default();
    check_requirements(&config.required_tools)?;

    let files = list_text_files(&args.dir, &config.layout)
        .with_context(|| format!("Failed to list {}", args.dir.display()))?;
    if files.is_empty() {
        return Err(SelectionError::NoTextFiles(config.layout.text_extension.clone()).into());
    }

    let stdin = io::stdin();
    let input = select_file(
        &files,
        &config.layout,
        args.select.as_deref(),
        &mut stdin.lock(),
        &mut io::stdout(),
    )?;
    println!("Converting {}", input.display());

    let runner = SystemRunner;
    let summary = Pipeline::new(&runner, &config)
        .run(&input)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    println!("Video saved to: {}", summary.output.display());
    println!(
        "  Segments: {} ({} rendered, {} skipped, {} failed)",
        summary.segments, summary.rendered, summary.skipped, summary.failed
    );

    Ok(())
}

fn print_banner() {
    println!("-------------------------------------------");
    println!("      Text to Video Conversion Script      ");
    println!("-------------------------------------------");
    println!();
}
