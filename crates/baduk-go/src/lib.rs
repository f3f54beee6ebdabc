//! # baduk-go
//!
//! Tree-sitter based Go front end for `baduk-core`.
//!
//! Parses Go source files and records their top-level declarations into the
//! architecture model:
//!
//! - [`TypeResolver`] turns type expressions into canonical [`Type`](baduk_core::Type) shapes
//! - [`resolve_signature`] resolves parameter and result lists
//! - [`GoExtractor`] walks one file into a [`File`](baduk_core::File) record
//! - [`Loader`] resolves import specs through a [`BuildContext`] and scans
//!   directory trees into an [`Architecture`](baduk_core::Architecture)
//!
//! ## Example
//!
//! ```
//! use baduk_go::{GoExtractor, LanguageExtractor};
//! use std::path::Path;
//!
//! let src = "package geo\n\ntype Point struct{}\n\nfunc (p *Point) Move(dx, dy int) {}\n";
//! let extraction = GoExtractor::new().extract(Path::new("point.go"), src).unwrap();
//!
//! let method = &extraction.file.methods[0];
//! assert_eq!(method.to_string(), "(*Point) Move(int, int)");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dispatch;
pub mod extractor;
pub mod loader;
pub mod shape;
pub mod signature;
mod syntax;
mod type_decl;

pub use extractor::{ExtractError, FileExtraction, GoExtractor, LanguageExtractor};
pub use loader::{BuildContext, LoadError, Loader};
pub use shape::TypeResolver;
pub use signature::{resolve_signature, Signature};
