//! Recursive scans over a throwaway source tree.

use baduk_go::{BuildContext, Loader};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn sample_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "main.go", "package main\n\nfunc main() {}\n");
    write(
        root,
        "pkg/shapes/shape.go",
        "package shapes\n\ntype Shape interface {\n\tArea() float64\n}\n\ntype Square struct{}\n\nfunc (s *Square) Area() float64 { return 0 }\n",
    );
    write(root, "pkg/shapes/shape_test.go", "package shapes\n\nfunc TestArea() {}\n");
    write(root, "vendor/dep/dep.go", "package dep\n\nfunc Dep() {}\n");
    write(root, ".hidden/h.go", "package hidden\n\nfunc H() {}\n");
    write(root, ".gitignore", "generated/\n");
    write(root, "generated/gen.go", "package generated\n\nfunc Gen() {}\n");
    write(root, "broken/broken.go", "package broken\n\nfunc (\n");
    write(root, "docs/README.md", "# not go\n");
    dir
}

#[test]
fn scan_keys_directories_relative_to_root() {
    let dir = sample_tree();
    let mut loader = Loader::new(BuildContext::new(dir.path()));
    let dirs = loader.scan(dir.path()).unwrap();
    assert_eq!(dirs, 3);

    let report = loader.finish();
    let keys: Vec<&str> = report
        .architecture
        .directories()
        .map(|d| d.path.as_str())
        .collect();
    assert_eq!(keys, [".", "pkg/shapes"]);
    assert_eq!(report.files_parsed, 2);

    let shapes = &report.architecture.find_directory("pkg/shapes").unwrap().package;
    assert_eq!(shapes.name.as_deref(), Some("shapes"));
    assert_eq!(shapes.find_interface("Shape").unwrap().methods.len(), 1);
    assert_eq!(
        shapes.find_method("Area").unwrap().to_string(),
        "(*Square) Area() float64"
    );

    let root_pkg = &report.architecture.find_directory(".").unwrap().package;
    assert_eq!(root_pkg.public_funcs().collect::<Vec<_>>(), ["main"]);
}

#[test]
fn syntax_errors_are_reported_per_file() {
    let dir = sample_tree();
    let mut loader = Loader::new(BuildContext::new(dir.path()));
    loader.scan(dir.path()).unwrap();

    let failures = &loader.report().failures;
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].code, "baduk::extract::syntax");
    assert!(failures[0].location.file.ends_with("broken/broken.go"));
    assert!(loader.architecture().get("broken").is_none());
}

#[test]
fn extra_excludes_apply_to_scans() {
    let dir = sample_tree();
    let mut loader = Loader::new(BuildContext::new(dir.path()))
        .exclude(["broken/**"])
        .unwrap();
    assert_eq!(loader.scan(dir.path()).unwrap(), 2);
    assert!(!loader.report().has_failures());
}

#[test]
fn parse_directory_uses_the_given_key() {
    let dir = sample_tree();
    let mut loader = Loader::new(BuildContext::new(dir.path()));
    let parsed = loader
        .parse_directory(&dir.path().join("pkg/shapes"), "example.com/shapes")
        .unwrap();
    assert_eq!(parsed, 1);
    assert!(loader.architecture().get("example.com/shapes").is_some());
    assert!(loader.architecture().get("pkg/shapes").is_none());
}
