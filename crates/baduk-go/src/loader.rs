//! Loading Go packages from disk into an [`Architecture`].
//!
//! The [`Loader`] is the driver around the extractor: it resolves import
//! specs through a GOPATH-style [`BuildContext`], lists the source files of
//! a package directory, and records each extracted file under a directory
//! key. Failures are collected into the report; they never stop the run.

use baduk_core::{AnalysisReport, Architecture, Config, Failure, Location};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::extractor::{GoExtractor, LanguageExtractor};

/// Where import specs live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    go_path: PathBuf,
}

impl BuildContext {
    /// Creates a context rooted at `go_path`.
    #[must_use]
    pub fn new(go_path: impl Into<PathBuf>) -> Self {
        Self {
            go_path: go_path.into(),
        }
    }

    /// First `$GOPATH` entry, else `~/go`.
    #[must_use]
    pub fn from_env() -> Self {
        let from_var = std::env::var_os("GOPATH")
            .and_then(|value| std::env::split_paths(&value).find(|p| !p.as_os_str().is_empty()));
        let go_path = from_var
            .or_else(|| home::home_dir().map(|h| h.join("go")))
            .unwrap_or_else(|| PathBuf::from("go"));
        Self { go_path }
    }

    /// Uses the configured GOPATH, falling back to [`BuildContext::from_env`].
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        config
            .build
            .gopath
            .clone()
            .map_or_else(Self::from_env, Self::new)
    }

    /// The GOPATH root.
    #[must_use]
    pub fn go_path(&self) -> &Path {
        &self.go_path
    }

    /// Directory holding the package named by `spec`.
    #[must_use]
    pub fn resolve_import(&self, spec: &str) -> PathBuf {
        self.go_path.join("src").join(spec)
    }
}

/// Errors that stop a load step.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// IO error listing a directory.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// Directory that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The import spec does not resolve to a directory.
    #[error("import `{spec}` not found (looked in {path})")]
    ImportNotFound {
        /// Requested import spec.
        spec: String,
        /// Directory that was checked.
        path: PathBuf,
    },

    /// Invalid exclude pattern.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Error walking the scan root.
    #[error("walk error: {0}")]
    Walk(#[from] ignore::Error),
}

/// Drives extraction over package directories.
pub struct Loader {
    context: BuildContext,
    extractor: Box<dyn LanguageExtractor>,
    exclude_patterns: Vec<String>,
    include_tests: bool,
    respect_gitignore: bool,
    report: AnalysisReport,
}

impl Loader {
    /// Creates a loader with default settings.
    #[must_use]
    pub fn new(context: BuildContext) -> Self {
        let config = Config::default();
        Self {
            context,
            extractor: Box::new(GoExtractor::new()),
            exclude_patterns: config.analyzer.exclude,
            include_tests: config.analyzer.include_tests,
            respect_gitignore: config.analyzer.respect_gitignore,
            report: AnalysisReport::new(),
        }
    }

    /// Creates a loader from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Glob`] if an exclude pattern is invalid.
    pub fn from_config(config: &Config) -> Result<Self, LoadError> {
        for pattern in &config.analyzer.exclude {
            glob::Pattern::new(pattern)?;
        }
        Ok(Self {
            context: BuildContext::from_config(config),
            extractor: Box::new(GoExtractor::with_config(config.extract.clone())),
            exclude_patterns: config.analyzer.exclude.clone(),
            include_tests: config.analyzer.include_tests,
            respect_gitignore: config.analyzer.respect_gitignore,
            report: AnalysisReport::new(),
        })
    }

    /// Adds exclude glob patterns.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Glob`] if a pattern is invalid.
    pub fn exclude<I, S>(mut self, patterns: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for pattern in patterns {
            let pattern = pattern.into();
            glob::Pattern::new(&pattern)?;
            self.exclude_patterns.push(pattern);
        }
        Ok(self)
    }

    /// The build context in use.
    #[must_use]
    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    /// The model built so far.
    #[must_use]
    pub fn architecture(&self) -> &Architecture {
        &self.report.architecture
    }

    /// The report built so far.
    #[must_use]
    pub fn report(&self) -> &AnalysisReport {
        &self.report
    }

    /// Hands over the finished report.
    #[must_use]
    pub fn finish(self) -> AnalysisReport {
        self.report
    }

    /// Loads the package named by `spec`, keyed by `spec`.
    ///
    /// Returns the number of files parsed.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::ImportNotFound`] if the spec does not resolve to
    /// a directory, or [`LoadError::Io`] if it cannot be listed.
    pub fn parse_import_spec(&mut self, spec: &str) -> Result<usize, LoadError> {
        let dir = self.context.resolve_import(spec);
        if !dir.is_dir() {
            return Err(LoadError::ImportNotFound {
                spec: spec.to_owned(),
                path: dir,
            });
        }
        self.parse_directory(&dir, spec)
    }

    /// Loads the source files directly inside `dir`, keyed by `key`.
    ///
    /// Returns the number of files parsed.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the directory cannot be listed.
    pub fn parse_directory(&mut self, dir: &Path, key: &str) -> Result<usize, LoadError> {
        let io_err = |source| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.is_file() && self.is_source_file(&path) {
                files.push(path);
            }
        }
        files.sort();

        Ok(self.load_files(&files, key))
    }

    /// Recursively loads every directory under `root` holding source files.
    ///
    /// Directories are keyed by their `/`-separated path relative to
    /// `root`, with `.` for `root` itself. Returns the number of directories.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Walk`] if the walk fails.
    pub fn scan(&mut self, root: &Path) -> Result<usize, LoadError> {
        info!("Scanning {}", root.display());

        let mut builder = ignore::WalkBuilder::new(root);
        builder
            .hidden(true)
            .git_ignore(self.respect_gitignore)
            .require_git(false);

        let mut by_dir: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || !self.is_source_file(path) {
                continue;
            }

            let rel = path.strip_prefix(root).unwrap_or(path);
            if self.should_exclude(rel) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            let key = directory_key(rel.parent().unwrap_or_else(|| Path::new("")));
            by_dir.entry(key).or_default().push(path.to_path_buf());
        }

        let dirs = by_dir.len();
        for (key, mut files) in by_dir {
            files.sort();
            self.load_files(&files, &key);
        }

        info!(
            "Scan complete: {} director(ies), {} file(s), {} failure(s)",
            dirs,
            self.report.files_parsed,
            self.report.failures.len()
        );
        Ok(dirs)
    }

    fn load_files(&mut self, files: &[PathBuf], key: &str) -> usize {
        let before = self.report.files_parsed;
        for path in files {
            self.load_file(path, key);
        }
        let parsed = self.report.files_parsed - before;
        info!("Loaded {parsed} file(s) into {key}");
        parsed
    }

    fn load_file(&mut self, path: &Path, key: &str) {
        let file_location = Location::new(path, 1, 1);

        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                warn!("Failed to read {}: {e}", path.display());
                self.report
                    .failures
                    .push(Failure::new("baduk::load::io", file_location, e.to_string()));
                return;
            }
        };

        let extraction = match self.extractor.extract(path, &source) {
            Ok(extraction) => extraction,
            Err(e) => {
                warn!("Skipping {}: {e}", path.display());
                let location = match &e {
                    crate::ExtractError::Syntax { location } => location.clone(),
                    _ => file_location,
                };
                self.report
                    .failures
                    .push(Failure::new(e.code(), location, e.to_string()));
                return;
            }
        };

        self.report.files_parsed += 1;
        self.report
            .failures
            .extend(extraction.failures.iter().map(Failure::from));

        if let Err(e) = self.report.architecture.record_file(key, extraction.file) {
            warn!("{e}");
            self.report
                .failures
                .push(Failure::new(e.code_str(), file_location, e.to_string()));
        }
    }

    fn is_source_file(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let handled = self
            .extractor
            .extensions()
            .iter()
            .any(|ext| name.ends_with(ext));
        handled && (self.include_tests || !name.ends_with("_test.go"))
    }

    /// Checks a root-relative path against the exclude patterns.
    fn should_exclude(&self, rel: &Path) -> bool {
        let rel_str = rel.to_string_lossy().replace('\\', "/");

        self.exclude_patterns.iter().any(|pattern| {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(&rel_str) {
                    return true;
                }
            }

            // Also check as substring for patterns like "**/vendor/**"
            let normalized = pattern.replace("**/", "").replace("/**", "");
            !normalized.is_empty()
                && rel_str
                    .split('/')
                    .any(|component| component == normalized)
        })
    }
}

/// `/`-joined relative directory, `.` for the root.
fn directory_key(rel_dir: &Path) -> String {
    let parts: Vec<_> = rel_dir
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        ".".to_owned()
    } else {
        parts.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_import_under_src() {
        let ctx = BuildContext::new("/opt/go");
        assert_eq!(
            ctx.resolve_import("github.com/acme/shapes"),
            PathBuf::from("/opt/go/src/github.com/acme/shapes")
        );
    }

    #[test]
    fn configured_gopath_wins() {
        let mut config = Config::default();
        config.build.gopath = Some(PathBuf::from("/srv/go"));
        assert_eq!(BuildContext::from_config(&config).go_path(), Path::new("/srv/go"));
    }

    #[test]
    fn directory_keys_are_slash_joined() {
        assert_eq!(directory_key(Path::new("")), ".");
        assert_eq!(directory_key(Path::new("pkg/shapes")), "pkg/shapes");
    }

    #[test]
    fn test_files_are_skipped_by_default() {
        let loader = Loader::new(BuildContext::new("."));
        assert!(loader.is_source_file(Path::new("shapes/types.go")));
        assert!(!loader.is_source_file(Path::new("shapes/types_test.go")));
        assert!(!loader.is_source_file(Path::new("shapes/README.md")));
    }

    #[test]
    fn exclude_patterns_match_relative_paths() {
        let loader = Loader::new(BuildContext::new("."))
            .exclude(["gen/*.go"])
            .unwrap();
        assert!(loader.should_exclude(Path::new("vendor/x/y.go")));
        assert!(loader.should_exclude(Path::new("a/testdata/b.go")));
        assert!(loader.should_exclude(Path::new("gen/out.go")));
        assert!(!loader.should_exclude(Path::new("pkg/vendored.go")));
        assert!(!loader.should_exclude(Path::new("pkg/shapes/types.go")));
    }

    #[test]
    fn invalid_exclude_pattern_is_rejected() {
        let err = Loader::new(BuildContext::new(".")).exclude(["[oops"]).err();
        assert!(matches!(err, Some(LoadError::Glob(_))));
    }
}
