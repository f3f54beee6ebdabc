//! Configuration types for baduk.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default cap on type-expression nesting.
pub const DEFAULT_MAX_TYPE_DEPTH: usize = 64;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory discovery settings.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Declaration extraction settings.
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Import-path resolution settings.
    #[serde(default)]
    pub build: BuildConfig,
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}

/// Directory discovery configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to scan (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from scanning.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Whether `_test.go` files are loaded.
    #[serde(default)]
    pub include_tests: bool,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: default_exclude(),
            include_tests: false,
            respect_gitignore: true,
        }
    }
}

/// Declaration extraction configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Record only exported (upper-case) receiverless functions.
    #[serde(default)]
    pub exported_only: bool,

    /// Maximum modifier nesting accepted in one type expression.
    #[serde(default = "default_max_type_depth")]
    pub max_type_depth: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            exported_only: false,
            max_type_depth: DEFAULT_MAX_TYPE_DEPTH,
        }
    }
}

/// Import-path resolution configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// GOPATH-style root; `<gopath>/src/<import spec>` is the package directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gopath: Option<PathBuf>,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_exclude() -> Vec<String> {
    vec!["**/vendor/**".to_string(), "**/testdata/**".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_max_type_depth() -> usize {
    DEFAULT_MAX_TYPE_DEPTH
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Error parsing TOML.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analyzer.root, PathBuf::from("."));
        assert!(!config.analyzer.include_tests);
        assert!(config.analyzer.respect_gitignore);
        assert!(!config.extract.exported_only);
        assert_eq!(config.extract.max_type_depth, DEFAULT_MAX_TYPE_DEPTH);
        assert!(config.build.gopath.is_none());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[analyzer]
root = "./src"
exclude = ["**/generated/**"]
include_tests = true

[extract]
exported_only = true
max_type_depth = 8

[build]
gopath = "/opt/go"
"#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.analyzer.root, PathBuf::from("./src"));
        assert_eq!(config.analyzer.exclude, vec!["**/generated/**"]);
        assert!(config.analyzer.include_tests);
        assert!(config.extract.exported_only);
        assert_eq!(config.extract.max_type_depth, 8);
        assert_eq!(config.build.gopath, Some(PathBuf::from("/opt/go")));
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let config = Config::parse("[extract]\nexported_only = true\n").unwrap();
        assert_eq!(config.extract.max_type_depth, DEFAULT_MAX_TYPE_DEPTH);
        assert_eq!(config.analyzer, AnalyzerConfig::default());
    }

    #[test]
    fn test_rejects_invalid_toml() {
        let err = Config::parse("[extract\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
