//! Canonical type shapes.
//!
//! A [`Type`] is the purely structural encoding of a type expression as it
//! was written in source: pointer, slice, fixed-array and variadic
//! modifiers wrapped around a bare or package-qualified name. Its
//! [`Display`](std::fmt::Display) output is the source language's own
//! notation, and [`FromStr`] reads that notation back.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::config::DEFAULT_MAX_TYPE_DEPTH;

/// A parsed type expression.
///
/// Two types are equal iff their canonical renderings are equal, so
/// `Type::named("io.Reader") == Type::qualified("io", "Reader")`.
#[derive(Debug, Clone)]
pub enum Type {
    /// A bare type name: `int`, `T`.
    Named(String),
    /// An imported type: `io.Reader`.
    Qualified {
        /// Package identifier as written at the use site (never resolved).
        package: String,
        /// Type name within that package.
        name: String,
    },
    /// `*T`
    Pointer(Box<Type>),
    /// `[]T`
    Slice(Box<Type>),
    /// `[N]T`
    Array {
        /// Literal length.
        len: u64,
        /// Element type.
        elem: Box<Type>,
    },
    /// `...T`, only valid as the last entry of a parameter list.
    Variadic(Box<Type>),
}

impl Type {
    /// Creates a bare named type.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Creates a package-qualified type.
    #[must_use]
    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Qualified {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Wraps `inner` in a pointer.
    #[must_use]
    pub fn pointer(inner: Type) -> Self {
        Self::Pointer(Box::new(inner))
    }

    /// Wraps `inner` in a slice.
    #[must_use]
    pub fn slice(inner: Type) -> Self {
        Self::Slice(Box::new(inner))
    }

    /// Wraps `elem` in a fixed-length array.
    #[must_use]
    pub fn array(len: u64, elem: Type) -> Self {
        Self::Array {
            len,
            elem: Box::new(elem),
        }
    }

    /// Wraps `inner` in a variadic marker.
    #[must_use]
    pub fn variadic(inner: Type) -> Self {
        Self::Variadic(Box::new(inner))
    }

    /// Returns `true` for the outermost `...` marker.
    #[must_use]
    pub fn is_variadic(&self) -> bool {
        matches!(self, Self::Variadic(_))
    }

    /// Number of modifiers wrapped around the innermost name.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Some(inner) = current.inner() {
            depth += 1;
            current = inner;
        }
        depth
    }

    /// The innermost named or qualified type.
    #[must_use]
    pub fn base(&self) -> &Type {
        let mut current = self;
        while let Some(inner) = current.inner() {
            current = inner;
        }
        current
    }

    fn inner(&self) -> Option<&Type> {
        match self {
            Self::Pointer(inner) | Self::Slice(inner) | Self::Variadic(inner) => Some(inner),
            Self::Array { elem, .. } => Some(elem),
            Self::Named(_) | Self::Qualified { .. } => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current = self;
        loop {
            match current {
                Self::Named(name) => return f.write_str(name),
                Self::Qualified { package, name } => return write!(f, "{package}.{name}"),
                Self::Pointer(inner) => {
                    f.write_str("*")?;
                    current = inner;
                }
                Self::Slice(inner) => {
                    f.write_str("[]")?;
                    current = inner;
                }
                Self::Array { len, elem } => {
                    write!(f, "[{len}]")?;
                    current = elem;
                }
                Self::Variadic(inner) => {
                    f.write_str("...")?;
                    current = inner;
                }
            }
        }
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl PartialEq<str> for Type {
    fn eq(&self, other: &str) -> bool {
        self.to_string() == other
    }
}

impl PartialEq<&str> for Type {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

/// Errors produced when reading canonical type text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeParseError {
    /// Nothing left to parse where a name was expected.
    #[error("missing type name in `{0}`")]
    MissingName(String),
    /// A name that is not a valid identifier.
    #[error("invalid identifier `{0}`")]
    InvalidIdentifier(String),
    /// `[` without a matching `]`.
    #[error("unclosed `[` in `{0}`")]
    UnclosedBracket(String),
    /// Array length that is not a decimal integer.
    #[error("invalid array length `{0}`")]
    InvalidArrayLength(String),
    /// `...` anywhere but the outermost position.
    #[error("`...` must be the outermost modifier in `{0}`")]
    MisplacedEllipsis(String),
    /// More modifiers than the nesting cap allows.
    #[error("type nested deeper than {limit} modifiers")]
    TooDeeplyNested {
        /// The cap that was exceeded.
        limit: usize,
    },
}

enum Modifier {
    Pointer,
    Slice,
    Array(u64),
}

impl FromStr for Type {
    type Err = TypeParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (variadic, mut rest) = match text.strip_prefix("...") {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let mut modifiers = Vec::new();
        loop {
            if let Some(r) = rest.strip_prefix('*') {
                modifiers.push(Modifier::Pointer);
                rest = r;
            } else if let Some(r) = rest.strip_prefix("[]") {
                modifiers.push(Modifier::Slice);
                rest = r;
            } else if let Some(r) = rest.strip_prefix('[') {
                let (len, r) = r
                    .split_once(']')
                    .ok_or_else(|| TypeParseError::UnclosedBracket(text.to_owned()))?;
                if len.is_empty() || !len.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(TypeParseError::InvalidArrayLength(len.to_owned()));
                }
                let len = len
                    .parse()
                    .map_err(|_| TypeParseError::InvalidArrayLength(len.to_owned()))?;
                modifiers.push(Modifier::Array(len));
                rest = r;
            } else if rest.starts_with("...") {
                return Err(TypeParseError::MisplacedEllipsis(text.to_owned()));
            } else {
                break;
            }
            if modifiers.len() + usize::from(variadic) > DEFAULT_MAX_TYPE_DEPTH {
                return Err(TypeParseError::TooDeeplyNested {
                    limit: DEFAULT_MAX_TYPE_DEPTH,
                });
            }
        }

        if rest.is_empty() {
            return Err(TypeParseError::MissingName(text.to_owned()));
        }

        let mut ty = match rest.split_once('.') {
            Some((package, name)) => {
                for part in [package, name] {
                    if !is_identifier(part) {
                        return Err(TypeParseError::InvalidIdentifier(part.to_owned()));
                    }
                }
                Type::qualified(package, name)
            }
            None if is_identifier(rest) => Type::named(rest),
            None => return Err(TypeParseError::InvalidIdentifier(rest.to_owned())),
        };

        for modifier in modifiers.into_iter().rev() {
            ty = match modifier {
                Modifier::Pointer => Type::pointer(ty),
                Modifier::Slice => Type::slice(ty),
                Modifier::Array(len) => Type::array(len, ty),
            };
        }

        Ok(if variadic { Type::variadic(ty) } else { ty })
    }
}

/// Letter or underscore, then letters, digits, underscores.
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

impl Serialize for Type {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Type {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
