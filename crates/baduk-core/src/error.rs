//! Errors raised while turning declarations into model entities.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path as handed to the extractor.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// Failure to resolve a type expression or signature.
///
/// Every variant rejects the whole declaration it occurred in.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum ResolveError {
    /// A type expression form the resolver does not model.
    #[error("unsupported type shape: {kind}")]
    #[diagnostic(
        code(baduk::resolve::unsupported_type_shape),
        help("only named, qualified, pointer, slice, array and variadic types are modeled")
    )]
    UnsupportedTypeShape {
        /// Syntax kind of the offending expression.
        kind: String,
    },

    /// Nesting exceeded the configured cap.
    #[error("type expression nested deeper than {limit} levels")]
    #[diagnostic(code(baduk::resolve::too_deeply_nested))]
    TooDeeplyNested {
        /// The cap that was hit.
        limit: usize,
    },

    /// `...T` somewhere other than the last parameter.
    #[error("variadic type at position {position} is not the last parameter")]
    #[diagnostic(code(baduk::resolve::misplaced_variadic))]
    MisplacedVariadic {
        /// Zero-based position of the offending entry.
        position: usize,
    },

    /// A receiver whose type is not a (pointer to a) named type.
    #[error("unsupported receiver type: {kind}")]
    #[diagnostic(code(baduk::resolve::unsupported_receiver))]
    UnsupportedReceiver {
        /// Syntax kind of the receiver type.
        kind: String,
    },

    /// A receiver list naming more than one receiver.
    #[error("expected exactly one receiver, found {count}")]
    #[diagnostic(code(baduk::resolve::multiple_receivers))]
    MultipleReceivers {
        /// Number of receivers found.
        count: usize,
    },
}

impl ResolveError {
    /// Shorthand for [`ResolveError::UnsupportedTypeShape`].
    #[must_use]
    pub fn unsupported(kind: impl Into<String>) -> Self {
        Self::UnsupportedTypeShape { kind: kind.into() }
    }

    /// Stable diagnostic code, e.g. `baduk::resolve::too_deeply_nested`.
    #[must_use]
    pub fn code_str(&self) -> String {
        self.code().map_or_else(|| "baduk::resolve".to_owned(), |c| c.to_string())
    }
}

/// A declaration that was rejected, with enough context to find it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{location}: `{declaration}` rejected: {source}")]
pub struct DeclarationError {
    /// Where the declaration starts.
    pub location: Location,
    /// Declared name (`Type.Method` for methods, the type name for interfaces).
    pub declaration: String,
    /// What went wrong.
    pub source: ResolveError,
}

impl DeclarationError {
    /// Creates a new declaration error.
    #[must_use]
    pub fn new(location: Location, declaration: impl Into<String>, source: ResolveError) -> Self {
        Self {
            location,
            declaration: declaration.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_codes_are_stable() {
        assert_eq!(
            ResolveError::unsupported("map_type").code_str(),
            "baduk::resolve::unsupported_type_shape"
        );
        assert_eq!(
            ResolveError::TooDeeplyNested { limit: 4 }.code_str(),
            "baduk::resolve::too_deeply_nested"
        );
    }

    #[test]
    fn declaration_error_names_file_and_declaration() {
        let err = DeclarationError::new(
            Location::new("pkg/types.go", 12, 1),
            "Types.Lookup",
            ResolveError::unsupported("map_type"),
        );
        let message = err.to_string();
        assert!(message.contains("pkg/types.go:12:1"));
        assert!(message.contains("Types.Lookup"));
        assert!(message.contains("map_type"));
    }
}
