//! The architecture model: files, packages and directories.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

use crate::shape::Type;

/// A function bound to a receiver, or an entry in an interface's method set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    /// Method name.
    pub name: String,
    /// Receiver's declared type name, pointer modifier stripped.
    /// `None` for interface method-set entries.
    pub receiver_type: Option<String>,
    /// Whether the receiver was declared as a pointer (`func (t *T) ...`).
    #[serde(default)]
    pub pointer_receiver: bool,
    /// Parameter types in declared order.
    pub parm_types: Vec<Type>,
    /// Result types in declared order.
    pub return_types: Vec<Type>,
}

impl Method {
    /// Creates an interface method-set entry (no receiver).
    #[must_use]
    pub fn new(name: impl Into<String>, parm_types: Vec<Type>, return_types: Vec<Type>) -> Self {
        Self {
            name: name.into(),
            receiver_type: None,
            pointer_receiver: false,
            parm_types,
            return_types,
        }
    }

    /// Binds this method to a receiver type.
    #[must_use]
    pub fn with_receiver(mut self, receiver_type: impl Into<String>, pointer: bool) -> Self {
        self.receiver_type = Some(receiver_type.into());
        self.pointer_receiver = pointer;
        self
    }
}

fn write_types(f: &mut fmt::Formatter<'_>, types: &[Type]) -> fmt::Result {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{ty}")?;
    }
    Ok(())
}

impl fmt::Display for Method {
    /// `(*T) Name(int, string) (int64, error)`, or `Name()` without receiver.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(receiver) = &self.receiver_type {
            let star = if self.pointer_receiver { "*" } else { "" };
            write!(f, "({star}{receiver}) ")?;
        }
        write!(f, "{}(", self.name)?;
        write_types(f, &self.parm_types)?;
        f.write_str(")")?;
        match self.return_types.as_slice() {
            [] => Ok(()),
            [single] => write!(f, " {single}"),
            many => {
                f.write_str(" (")?;
                write_types(f, many)?;
                f.write_str(")")
            }
        }
    }
}

/// An interface and its method set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    /// Declared name.
    pub name: String,
    /// Method set in declared order.
    pub methods: Vec<Method>,
}

impl Interface {
    /// Looks up a method-set entry by name.
    #[must_use]
    pub fn find_method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// Everything declared directly in one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    /// Path the file was read from.
    pub path: PathBuf,
    /// Name from the file's package clause.
    pub package_name: Option<String>,
    /// Receiverless functions, in source order.
    pub public_funcs: Vec<String>,
    /// Methods, in source order.
    pub methods: Vec<Method>,
    /// Interfaces, in source order.
    pub interfaces: Vec<Interface>,
}

impl File {
    /// Creates an empty file record.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Returns `true` if nothing was collected from this file.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.public_funcs.is_empty() && self.methods.is_empty() && self.interfaces.is_empty()
    }
}

/// All files of one declaring package within a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Package name from the first recorded file's package clause.
    pub name: Option<String>,
    /// Files in discovery order.
    pub files: Vec<File>,
}

impl Package {
    /// Methods of every file, in file-discovery then source order.
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.files.iter().flat_map(|f| f.methods.iter())
    }

    /// Interfaces of every file, in file-discovery then source order.
    pub fn interfaces(&self) -> impl Iterator<Item = &Interface> {
        self.files.iter().flat_map(|f| f.interfaces.iter())
    }

    /// Receiverless function names of every file.
    pub fn public_funcs(&self) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .flat_map(|f| f.public_funcs.iter().map(String::as_str))
    }

    /// First method with this name, across all receivers.
    #[must_use]
    pub fn find_method(&self, name: &str) -> Option<&Method> {
        self.methods().find(|m| m.name == name)
    }

    /// Interface by name.
    #[must_use]
    pub fn find_interface(&self, name: &str) -> Option<&Interface> {
        self.interfaces().find(|i| i.name == name)
    }

    /// Methods declared on `receiver`, regardless of pointer-ness.
    pub fn methods_of<'a>(&'a self, receiver: &'a str) -> impl Iterator<Item = &'a Method> {
        self.methods()
            .filter(move |m| m.receiver_type.as_deref() == Some(receiver))
    }
}

/// A directory and the package it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    /// Key the directory was recorded under.
    pub path: String,
    /// Its package.
    pub package: Package,
}

/// Errors from recording into or querying the model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum ModelError {
    /// No directory was recorded under this key.
    #[error("directory `{directory}` not found")]
    #[diagnostic(code(baduk::model::not_found))]
    NotFound {
        /// Key that was queried.
        directory: String,
    },

    /// A file declares a different package than the rest of its directory.
    #[error("{file}: package `{found}` does not match `{expected}` in directory `{directory}`")]
    #[diagnostic(
        code(baduk::model::package_mismatch),
        help("directories are keyed by path; only one package per directory is recorded")
    )]
    PackageMismatch {
        /// Directory key.
        directory: String,
        /// Offending file.
        file: String,
        /// Package already recorded for the directory.
        expected: String,
        /// Package named by the offending file.
        found: String,
    },
}

impl ModelError {
    /// Stable diagnostic code, e.g. `baduk::model::package_mismatch`.
    #[must_use]
    pub fn code_str(&self) -> String {
        self.code().map_or_else(|| "baduk::model".to_owned(), |c| c.to_string())
    }
}

/// Root of the model: directory key to directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Architecture {
    directories: BTreeMap<String, Directory>,
}

impl Architecture {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `file` to the package owned by `directory`, creating it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::PackageMismatch`] if the file's package clause
    /// names a different package than the one already recorded; the file is
    /// not merged in that case.
    pub fn record_file(&mut self, directory: &str, file: File) -> Result<(), ModelError> {
        let entry = self
            .directories
            .entry(directory.to_owned())
            .or_insert_with(|| Directory {
                path: directory.to_owned(),
                package: Package::default(),
            });
        let package = &mut entry.package;

        match (&package.name, &file.package_name) {
            (Some(expected), Some(found)) if expected != found => {
                return Err(ModelError::PackageMismatch {
                    directory: directory.to_owned(),
                    file: file.path.display().to_string(),
                    expected: expected.clone(),
                    found: found.clone(),
                });
            }
            (None, Some(found)) => package.name = Some(found.clone()),
            _ => {}
        }

        debug!(
            "Recorded {} into {directory}: {} func(s), {} method(s), {} interface(s)",
            file.path.display(),
            file.public_funcs.len(),
            file.methods.len(),
            file.interfaces.len()
        );
        package.files.push(file);
        Ok(())
    }

    /// Looks up a directory by key.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] if nothing was recorded under `name`.
    pub fn find_directory(&self, name: &str) -> Result<&Directory, ModelError> {
        self.directories.get(name).ok_or_else(|| ModelError::NotFound {
            directory: name.to_owned(),
        })
    }

    /// Looks up a directory by key.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Directory> {
        self.directories.get(name)
    }

    /// Directories in key order.
    pub fn directories(&self) -> impl Iterator<Item = &Directory> {
        self.directories.values()
    }

    /// Number of recorded directories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.directories.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }
}
