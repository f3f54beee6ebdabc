//! Show command implementation.

use anyhow::{Context, Result};
use baduk_go::Loader;
use std::path::PathBuf;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the show command.
pub fn run(
    spec: &str,
    gopath: Option<PathBuf>,
    format: OutputFormat,
    source: &ConfigSource,
) -> Result<()> {
    let mut config = source.load()?;
    if gopath.is_some() {
        config.build.gopath = gopath;
    }

    let mut loader =
        Loader::from_config(&config).context("Invalid exclude pattern in config")?;
    tracing::info!(
        "Resolving {spec} under {}",
        loader.context().go_path().display()
    );
    loader
        .parse_import_spec(spec)
        .with_context(|| format!("Failed to load {spec}"))?;

    super::output::print(&loader.finish(), format)
}
