//! Project configuration for `iconsmith.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── matte      # [matte]
//! │   ├── placement  # [placement]
//! │   └── output     # [[target]], [[bundle]]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # IconConfig (this file)
//! ```
//!
//! # Top-level keys
//!
//! | Key        | Purpose                                            |
//! |------------|----------------------------------------------------|
//! | `source`   | Source image, relative to the config file          |
//! | `output`   | Output root, relative to the config file           |
//! | `presets`  | Built-in platform outputs to render                |
//! | `ios_dir`  | App-icon set directory used by the `ios` preset    |
//!
//! A missing config file is not an error: built-in defaults apply.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{
    BundleConfig, MatteConfig, PlacementConfig, PolicyKind, TargetConfig, parse_background,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::catalog::{Catalog, Job, MatteStep, Preset, preset::IOS_ICON_DIR};
use crate::cli::{Cli, Commands, GenerateArgs};
use crate::{debug, log};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

/// Default config filename
pub const CONFIG_FILE: &str = "iconsmith.toml";

/// Default source image, relative to the project root
pub const DEFAULT_SOURCE: &str = "custom_icon.png";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing iconsmith.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    /// Absolute path to the config file, empty for built-in defaults (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    pub source: PathBuf,

    pub output: PathBuf,

    pub presets: Vec<Preset>,

    pub ios_dir: String,

    pub matte: MatteConfig,

    pub placement: PlacementConfig,

    #[serde(rename = "target")]
    pub targets: Vec<TargetConfig>,

    #[serde(rename = "bundle")]
    pub bundles: Vec<BundleConfig>,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            source: PathBuf::from(DEFAULT_SOURCE),
            output: PathBuf::from("."),
            presets: Preset::ALL.to_vec(),
            ios_dir: IOS_ICON_DIR.to_string(),
            matte: MatteConfig::default(),
            placement: PlacementConfig::default(),
            targets: Vec::new(),
            bundles: Vec::new(),
        }
    }
}

impl IconConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. The project root is the
    /// config file's parent directory, or cwd when running on defaults.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                debug!("config"; "using {}", path.display());
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                config.config_path = path;
                config
            }
            None if cli.config != Path::new(CONFIG_FILE) => {
                bail!(ConfigError::Validation(format!(
                    "config file `{}` not found",
                    cli.config.display()
                )));
            }
            None => {
                debug!("config"; "no {} found, using built-in defaults", CONFIG_FILE);
                Self {
                    root: cwd.clone(),
                    ..Self::default()
                }
            }
        };

        config.normalize_paths();
        if let Commands::Generate { args } = &cli.command {
            config.apply_generate_args(args, &cwd);
        }
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("Failed to parse `{}`", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Get path relative to the project root, for display.
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply `generate` overrides. CLI paths are relative to cwd.
    fn apply_generate_args(&mut self, args: &GenerateArgs, cwd: &Path) {
        if let Some(source) = &args.source {
            self.source = cwd.join(source);
        }
        if let Some(output) = &args.output {
            self.output = cwd.join(output);
        }
        if !args.presets.is_empty() {
            self.presets = args.presets.clone();
        }
        if let Some(threshold) = args.threshold {
            self.matte.enable = true;
            self.matte.threshold = i64::from(threshold);
        }
        if args.no_matte {
            self.matte.enable = false;
        }
    }

    /// Resolve `source` and `output` against the root directory.
    fn normalize_paths(&mut self) {
        self.source = self.root_join(&self.source);
        self.output = self.root_join(&self.output);
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        if self.source.as_os_str().is_empty() {
            diag.error(FieldPath::new("source"), "source image path must not be empty");
        }
        if self.ios_dir.trim().is_empty() && self.presets.contains(&Preset::Ios) {
            diag.error_with_hint(
                FieldPath::new("ios_dir"),
                "ios_dir must not be empty",
                format!("the default is \"{IOS_ICON_DIR}\""),
            );
        }

        self.matte.validate(&mut diag);
        self.placement.validate_at("placement", &mut diag);
        for (i, target) in self.targets.iter().enumerate() {
            target.validate(i, &self.placement, &mut diag);
        }
        for (i, bundle) in self.bundles.iter().enumerate() {
            bundle.validate(i, &self.placement, &mut diag);
        }

        if self.presets.is_empty() && self.targets.is_empty() && self.bundles.is_empty() {
            diag.warn(FieldPath::new("presets"), "no presets, targets or bundles configured");
        }
        let mut seen = HashSet::new();
        for preset in &self.presets {
            if !seen.insert(preset) {
                diag.warn(
                    FieldPath::new("presets"),
                    format!("`{}` listed more than once", preset.name()),
                );
            }
        }

        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }

    // ========================================================================
    // catalog
    // ========================================================================

    /// Background matting applied by `generate`.
    pub fn matte_step(&self) -> Option<MatteStep> {
        self.matte.step()
    }

    /// Expand presets, targets and bundles into render jobs.
    ///
    /// Repeated presets are rendered once; paths stay relative to `output`.
    pub fn catalog(&self) -> Result<Catalog> {
        let layout = self.placement.layout().context("invalid [placement]")?;

        let mut catalog = Catalog::new();
        let mut seen = HashSet::new();
        for &preset in &self.presets {
            if seen.insert(preset) {
                catalog.add_preset(preset, &self.ios_dir, layout);
            }
        }
        for (i, target) in self.targets.iter().enumerate() {
            let job = target
                .job(&self.placement)
                .with_context(|| format!("invalid target[{i}]"))?;
            catalog.push(Job::Png(job));
        }
        for (i, bundle) in self.bundles.iter().enumerate() {
            let job = bundle
                .job(&self.placement)
                .with_context(|| format!("invalid bundle[{i}]"))?;
            catalog.push(Job::Ico(job));
        }

        catalog.validate()?;
        Ok(catalog)
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> IconConfig {
    let (parsed, ignored) = IconConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
