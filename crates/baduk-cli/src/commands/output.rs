//! Shared output formatting for analysis reports.

use anyhow::Result;
use baduk_core::AnalysisReport;

use crate::OutputFormat;

/// Print a report in the specified format.
pub fn print(report: &AnalysisReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => {
            for line in compact_lines(report) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn print_text(report: &AnalysisReport) {
    let text = report.format_text();
    let (body, summary) = text
        .trim_end()
        .rsplit_once('\n')
        .unwrap_or(("", text.trim_end()));
    if !body.is_empty() {
        println!("{body}");
    }

    let summary_color = if report.has_failures() {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };
    println!("{summary_color}{summary}\x1b[0m");
}

fn print_json(report: &AnalysisReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

/// One line per recorded entity, then one per failure.
fn compact_lines(report: &AnalysisReport) -> Vec<String> {
    let mut lines = Vec::new();
    for dir in report.architecture.directories() {
        let package = &dir.package;
        for func in package.public_funcs() {
            lines.push(format!("{}: func {func}", dir.path));
        }
        for method in package.methods() {
            lines.push(format!("{}: method {method}", dir.path));
        }
        for iface in package.interfaces() {
            for method in &iface.methods {
                lines.push(format!("{}: interface {}.{method}", dir.path, iface.name));
            }
            if iface.methods.is_empty() {
                lines.push(format!("{}: interface {}", dir.path, iface.name));
            }
        }
    }
    for failure in &report.failures {
        lines.push(failure.to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use baduk_core::{Failure, File, Interface, Location, Method, Type};

    #[test]
    fn compact_lists_entities_then_failures() {
        let mut report = AnalysisReport::new();
        let mut file = File::new("shapes/shape.go");
        file.package_name = Some("shapes".into());
        file.public_funcs.push("NewSquare".into());
        file.methods.push(
            Method::new("Area", vec![], vec![Type::named("float64")]).with_receiver("Square", true),
        );
        file.interfaces.push(Interface {
            name: "Shape".into(),
            methods: vec![Method::new("Area", vec![], vec![Type::named("float64")])],
        });
        file.interfaces.push(Interface {
            name: "Any".into(),
            methods: vec![],
        });
        report.architecture.record_file("shapes", file).unwrap();
        report.failures.push(Failure::new(
            "baduk::extract::syntax",
            Location::new("broken.go", 3, 7),
            "syntax error at broken.go:3:7",
        ));

        assert_eq!(
            compact_lines(&report),
            [
                "shapes: func NewSquare",
                "shapes: method (*Square) Area() float64",
                "shapes: interface Shape.Area() float64",
                "shapes: interface Any",
                "broken.go:3:7: [baduk::extract::syntax] syntax error at broken.go:3:7",
            ]
        );
    }
}
