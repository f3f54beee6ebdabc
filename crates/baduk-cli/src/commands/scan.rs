//! Scan command implementation.

use anyhow::{Context, Result};
use baduk_go::Loader;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the scan command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    exclude: Vec<String>,
    strict: bool,
    source: &ConfigSource,
) -> Result<()> {
    let config = source.load()?;

    let root = if config.analyzer.root.is_absolute() {
        config.analyzer.root.clone()
    } else {
        path.join(&config.analyzer.root)
    };

    let mut loader = Loader::from_config(&config)
        .context("Invalid exclude pattern in config")?
        .exclude(exclude)
        .context("Invalid --exclude pattern")?;

    loader
        .scan(&root)
        .with_context(|| format!("Failed to scan {}", root.display()))?;

    let report = loader.finish();
    super::output::print(&report, format)?;

    if strict && report.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}
