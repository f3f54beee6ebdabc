//! Results of an analysis run.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DeclarationError, Location};
use crate::model::Architecture;

/// A declaration or file that could not be recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// Diagnostic code (e.g. `baduk::resolve::unsupported_type_shape`).
    pub code: String,
    /// Where it happened.
    pub location: Location,
    /// Rejected declaration, if the failure is scoped to one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaration: Option<String>,
    /// Human-readable message.
    pub message: String,
}

impl Failure {
    /// Creates a file-level failure.
    #[must_use]
    pub fn new(code: impl Into<String>, location: Location, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            location,
            declaration: None,
            message: message.into(),
        }
    }
}

impl From<&DeclarationError> for Failure {
    fn from(err: &DeclarationError) -> Self {
        Self {
            code: err.source.code_str(),
            location: err.location.clone(),
            declaration: Some(err.declaration.clone()),
            message: err.source.to_string(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [{}] ", self.location, self.code)?;
        if let Some(decl) = &self.declaration {
            write!(f, "`{decl}`: ")?;
        }
        f.write_str(&self.message)
    }
}

/// The finished model plus everything that was skipped on the way.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// The extracted model.
    pub architecture: Architecture,
    /// Rejected declarations and files.
    pub failures: Vec<Failure>,
    /// Number of files successfully parsed.
    pub files_parsed: usize,
}

impl AnalysisReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if anything was skipped.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Formats the model as an indented listing followed by failures.
    #[must_use]
    pub fn format_text(&self) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        for dir in self.architecture.directories() {
            let package = &dir.package;
            let _ = writeln!(
                out,
                "{} (package {})",
                dir.path,
                package.name.as_deref().unwrap_or("?")
            );
            for file in &package.files {
                let _ = writeln!(out, "  {}", file.path.display());
                for func in &file.public_funcs {
                    let _ = writeln!(out, "    func {func}");
                }
                for method in &file.methods {
                    let _ = writeln!(out, "    method {method}");
                }
                for iface in &file.interfaces {
                    let _ = writeln!(out, "    interface {}", iface.name);
                    for method in &iface.methods {
                        let _ = writeln!(out, "      {method}");
                    }
                }
            }
        }

        for failure in &self.failures {
            let _ = writeln!(out, "skipped {failure}");
        }

        let _ = writeln!(
            out,
            "{} director(ies), {} file(s), {} failure(s)",
            self.architecture.len(),
            self.files_parsed,
            self.failures.len()
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;
    use crate::model::{File, Method};
    use crate::shape::Type;

    #[test]
    fn failure_from_declaration_error_keeps_context() {
        let err = DeclarationError::new(
            Location::new("types.go", 7, 1),
            "Types.Lookup",
            ResolveError::unsupported("map_type"),
        );
        let failure = Failure::from(&err);
        assert_eq!(failure.code, "baduk::resolve::unsupported_type_shape");
        assert_eq!(failure.declaration.as_deref(), Some("Types.Lookup"));
        assert_eq!(
            failure.to_string(),
            "types.go:7:1: [baduk::resolve::unsupported_type_shape] `Types.Lookup`: unsupported type shape: map_type"
        );
    }

    #[test]
    fn format_text_lists_entities() {
        let mut report = AnalysisReport::new();
        let mut file = File::new("types.go");
        file.package_name = Some("shapes".into());
        file.public_funcs.push("New".into());
        file.methods.push(
            Method::new("Len", vec![], vec![Type::named("int")]).with_receiver("List", false),
        );
        report.architecture.record_file("shapes", file).unwrap();
        report.files_parsed = 1;

        insta::assert_snapshot!(report.format_text(), @r"
        shapes (package shapes)
          types.go
            func New
            method (List) Len() int
        1 director(ies), 1 file(s), 0 failure(s)
        ");
    }
}
