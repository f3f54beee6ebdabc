//! Configuration file lookup.
//!
//! Priority order:
//!
//! 1. `--config` flag or `$BADUK_CONFIG`
//! 2. `baduk.toml` or `.baduk.toml` in the scanned directory or any ancestor
//! 3. `~/.baduk/config.toml` (or `$BADUK_CONFIG_DIR/config.toml`)
//! 4. built-in defaults

use anyhow::{Context, Result};
use baduk_core::Config;
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line.
    Explicit(PathBuf),
    /// Found next to, or above, the scanned directory.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// The config file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Reads the configuration, or returns the defaults for [`ConfigSource::Default`].
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            tracing::debug!("No config file found, using defaults");
            return Ok(Config::default());
        };
        if matches!(self, Self::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        }
        Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

const PROJECT_CONFIG_NAMES: &[&str] = &["baduk.toml", ".baduk.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Finds the configuration for a run rooted at `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    find(project_dir, explicit, global_config_dir().as_deref())
}

fn find(project_dir: &Path, explicit: Option<&Path>, global_dir: Option<&Path>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    let start = project_dir
        .canonicalize()
        .unwrap_or_else(|_| project_dir.to_path_buf());
    for dir in start.ancestors() {
        if let Some(found) = PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
        {
            tracing::debug!("Found project config: {}", found.display());
            return ConfigSource::Project(found);
        }
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, ConfigSource::Global)
}

/// `$BADUK_CONFIG_DIR`, else `~/.baduk/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("BADUK_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".baduk"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn canonical(dir: &TempDir) -> PathBuf {
        dir.path().canonicalize().unwrap()
    }

    #[test]
    fn explicit_path_is_trusted_as_is() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("baduk.toml"), "").unwrap();

        let result = find(tmp.path(), Some(Path::new("/nonexistent.toml")), None);
        assert_eq!(result, ConfigSource::Explicit(PathBuf::from("/nonexistent.toml")));
    }

    #[test]
    fn plain_name_wins_over_dotted() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("baduk.toml"), "").unwrap();
        fs::write(tmp.path().join(".baduk.toml"), "").unwrap();

        let result = find(tmp.path(), None, None);
        assert_eq!(result, ConfigSource::Project(canonical(&tmp).join("baduk.toml")));
    }

    #[test]
    fn dotted_name_is_found() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".baduk.toml"), "").unwrap();

        let result = find(tmp.path(), None, None);
        assert_eq!(result, ConfigSource::Project(canonical(&tmp).join(".baduk.toml")));
    }

    #[test]
    fn ancestors_are_searched() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("baduk.toml"), "").unwrap();
        let nested = tmp.path().join("pkg/shapes");
        fs::create_dir_all(&nested).unwrap();

        let result = find(&nested, None, None);
        assert_eq!(result, ConfigSource::Project(canonical(&tmp).join("baduk.toml")));
    }

    #[test]
    fn global_is_the_fallback() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let result = find(project.path(), None, Some(global.path()));
        assert_eq!(result, ConfigSource::Global(global.path().join("config.toml")));
    }

    #[test]
    fn empty_global_dir_means_defaults() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();

        assert_eq!(find(project.path(), None, Some(global.path())), ConfigSource::Default);
        assert_eq!(find(project.path(), None, None), ConfigSource::Default);
    }

    #[test]
    fn load_reads_the_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("baduk.toml");
        fs::write(&path, "[extract]\nexported_only = true\n").unwrap();

        let config = ConfigSource::Explicit(path).load().unwrap();
        assert!(config.extract.exported_only);
        assert_eq!(ConfigSource::Default.load().unwrap(), Config::default());
    }

    #[test]
    fn load_reports_missing_explicit_file() {
        let err = ConfigSource::Explicit(PathBuf::from("/nonexistent/baduk.toml"))
            .load()
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/baduk.toml"));
    }
}
