//! Language extractor seam and the Go implementation.

use baduk_core::{DeclarationError, ExtractConfig, File, Location};
use std::path::{Path, PathBuf};
use tracing::debug;
use tree_sitter::{Language, Node, Parser};

use crate::dispatch::{walk, Context};
use crate::shape::TypeResolver;
use crate::syntax::location;

/// Result of extracting a single source file.
#[derive(Debug, Clone)]
pub struct FileExtraction {
    /// Everything that was recorded.
    pub file: File,
    /// Declarations that were rejected and are absent from `file`.
    pub failures: Vec<DeclarationError>,
}

/// File-level extraction failure; nothing from the file is recorded.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load grammar: {0}")]
    Language(String),

    /// tree-sitter returned no tree.
    #[error("failed to parse {path}")]
    Parse {
        /// File that failed.
        path: PathBuf,
    },

    /// The tree contains syntax errors.
    #[error("syntax error at {location}")]
    Syntax {
        /// First error or missing node.
        location: Location,
    },
}

impl ExtractError {
    /// Diagnostic code used in reports.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Language(_) => "baduk::extract::language",
            Self::Parse { .. } => "baduk::extract::parse",
            Self::Syntax { .. } => "baduk::extract::syntax",
        }
    }
}

/// Trait for language-specific extraction.
///
/// The extractor receives raw source text and returns the [`File`] record
/// for it; the caller decides which directory it belongs to.
pub trait LanguageExtractor: Send + Sync {
    /// Language identifier (e.g., `"go"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this extractor handles (e.g., `&[".go"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Extracts declarations from `source`, read from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError`] if the file as a whole cannot be analysed.
    fn extract(&self, path: &Path, source: &str) -> Result<FileExtraction, ExtractError>;
}

/// Extracts functions, methods and interfaces from Go source.
pub struct GoExtractor {
    language: Language,
    config: ExtractConfig,
}

impl GoExtractor {
    /// Creates a Go extractor with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ExtractConfig::default())
    }

    /// Creates a Go extractor with explicit settings.
    #[must_use]
    pub fn with_config(config: ExtractConfig) -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
            config,
        }
    }
}

impl Default for GoExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageExtractor for GoExtractor {
    fn language_id(&self) -> &'static str {
        "go"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".go"]
    }

    fn extract(&self, path: &Path, source: &str) -> Result<FileExtraction, ExtractError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ExtractError::Language(e.to_string()))?;

        let src = source.as_bytes();
        let tree = parser.parse(src, None).ok_or_else(|| ExtractError::Parse {
            path: path.to_path_buf(),
        })?;
        let root = tree.root_node();
        if root.has_error() {
            return Err(ExtractError::Syntax {
                location: location(first_error(root), path),
            });
        }

        let ctx = Context {
            src,
            path,
            resolver: TypeResolver::new(src).with_max_depth(self.config.max_type_depth),
            exported_only: self.config.exported_only,
        };

        let mut file = File::new(path);
        let failures = walk(&ctx, root, &mut file);
        debug!(
            "Extracted {}: {} func(s), {} method(s), {} interface(s), {} rejected",
            path.display(),
            file.public_funcs.len(),
            file.methods.len(),
            file.interfaces.len(),
            failures.len()
        );

        Ok(FileExtraction { file, failures })
    }
}

/// Descends along `has_error` to the first error or missing node.
fn first_error(root: Node<'_>) -> Node<'_> {
    let mut node = root;
    loop {
        if node.is_error() || node.is_missing() {
            return node;
        }
        let mut cursor = node.walk();
        let next = node.children(&mut cursor).find(Node::has_error);
        match next {
            Some(child) => node = child,
            None => return node,
        }
    }
}
