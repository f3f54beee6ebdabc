//! # baduk-core
//!
//! Language-neutral architecture model extracted from statically-typed
//! source code.
//!
//! This crate holds everything a front end produces and a caller queries:
//!
//! - [`Type`] canonical type shapes, rendered in source notation
//! - [`Method`], [`Interface`], [`File`], [`Package`] entities
//! - [`Architecture`], the directory-keyed store with [`Architecture::find_directory`]
//! - [`ResolveError`] and [`DeclarationError`] for rejected declarations
//! - [`Config`] loaded from `baduk.toml`
//! - [`AnalysisReport`] bundling the model with skipped declarations
//!
//! ## Example
//!
//! ```
//! use baduk_core::{Architecture, File, Method, Type};
//!
//! let mut file = File::new("reader.go");
//! file.methods.push(
//!     Method::new("Read", vec![Type::slice(Type::named("byte"))], vec![Type::named("int")])
//!         .with_receiver("Buffer", true),
//! );
//!
//! let mut arch = Architecture::new();
//! arch.record_file("bufio", file).unwrap();
//!
//! let package = &arch.find_directory("bufio").unwrap().package;
//! assert_eq!(package.find_method("Read").unwrap().parm_types[0], "[]byte");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod model;
mod report;
mod shape;

pub use config::{
    AnalyzerConfig, BuildConfig, Config, ConfigError, ExtractConfig, DEFAULT_MAX_TYPE_DEPTH,
};
pub use error::{DeclarationError, Location, ResolveError};
pub use model::{Architecture, Directory, File, Interface, Method, ModelError, Package};
pub use report::{AnalysisReport, Failure};
pub use shape::{Type, TypeParseError};
