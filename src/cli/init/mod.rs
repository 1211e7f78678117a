//! Project initialization.
//!
//! Writes a commented default `iconsmith.toml` into the current directory.

mod config;

use crate::log;
use anyhow::{Result, bail};
use std::path::Path;

pub use config::generate_config_template;

/// Write the default config into `root`.
///
/// If `dry_run` is true, only prints the config template to stdout.
pub fn new_project(root: &Path, config_name: &Path, dry_run: bool) -> Result<()> {
    if dry_run {
        print!("{}", generate_config_template());
        return Ok(());
    }

    let path = root.join(config_name);
    if path.exists() {
        bail!(
            "'{}' already exists.\n\
             Remove it first, or use `iconsmith init --dry` to print the defaults.",
            path.display()
        );
    }

    config::write_config(&path)?;
    log!("init"; "wrote {}", config_name.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_new_project_writes_config() {
        let temp = TempDir::new().unwrap();
        new_project(temp.path(), Path::new("iconsmith.toml"), false).unwrap();
        assert!(temp.path().join("iconsmith.toml").exists());
    }

    #[test]
    fn test_existing_config_not_overwritten() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("iconsmith.toml");
        fs::write(&path, "custom content").unwrap();

        let err = new_project(temp.path(), Path::new("iconsmith.toml"), false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "custom content");
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        new_project(temp.path(), Path::new("iconsmith.toml"), true).unwrap();
        assert!(!temp.path().join("iconsmith.toml").exists());
    }
}
