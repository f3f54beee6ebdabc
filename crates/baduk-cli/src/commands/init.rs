//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# baduk configuration

[analyzer]
# Root directory to scan (default: current directory)
# root = "."

# Glob patterns to exclude from scanning
exclude = [
    "**/vendor/**",
    "**/testdata/**",
]

# Also load *_test.go files
include_tests = false

# Respect .gitignore files
respect_gitignore = true

[extract]
# Only record exported (upper-case) receiverless functions
exported_only = false

# Maximum nesting of pointer, slice and array modifiers per type
max_type_depth = 64

[build]
# GOPATH root used by `baduk show` (default: $GOPATH, else ~/go)
# gopath = "/home/me/go"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("baduk.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created baduk.toml");
    println!("\nNext steps:");
    println!("  1. Edit baduk.toml to adjust exclusions");
    println!("  2. Run: baduk scan");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use baduk_core::Config;

    #[test]
    fn template_matches_defaults() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, Config::default());
    }
}
