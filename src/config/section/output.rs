//! `[[target]]` and `[[bundle]]` custom outputs.
//!
//! # Example
//!
//! ```toml
//! [[target]]
//! path = "web/icon-{size}.png"    # {size} is replaced by the size
//! size = 192
//! policy = "cover"                # Optional [placement] overrides
//! shape = "circle"                # square | circle
//!
//! [[bundle]]
//! path = "favicon.ico"
//! sizes = [16, 32, 48]            # Ascending, at most 256
//! ```

use serde::{Deserialize, Serialize};

use super::placement::{PlacementConfig, PolicyKind};
use crate::catalog::{IcoJob, PngJob, expand_path};
use crate::config::{ConfigDiagnostics, FieldPath};
use crate::icon::pack::{DEFAULT_ICO_SIZES, MAX_ICO_SIZE, validate_sizes};
use crate::icon::{self, Shape};

/// One extra PNG output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    pub path: String,
    pub size: u32,
    #[serde(default)]
    pub policy: Option<PolicyKind>,
    #[serde(default)]
    pub padding: Option<f64>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub shape: Shape,
}

impl TargetConfig {
    fn placement(&self, base: &PlacementConfig) -> PlacementConfig {
        base.merged(self.policy, self.padding, self.background.as_deref())
    }

    pub fn validate(&self, index: usize, base: &PlacementConfig, diag: &mut ConfigDiagnostics) {
        let field = format!("target[{index}]");
        if self.path.trim().is_empty() {
            diag.error(FieldPath::owned(format!("{field}.path")), "path must not be empty");
        }
        if self.size == 0 {
            diag.error(FieldPath::owned(format!("{field}.size")), "size must be positive");
        }
        self.placement(base).validate_at(&field, diag);
    }

    pub fn job(&self, base: &PlacementConfig) -> icon::Result<PngJob> {
        Ok(PngJob {
            path: expand_path(&self.path, self.size),
            size: self.size,
            layout: self.placement(base).layout()?,
            shape: self.shape,
        })
    }
}

/// One extra multi-resolution ICO output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleConfig {
    pub path: String,
    #[serde(default = "default_ico_sizes")]
    pub sizes: Vec<u32>,
    #[serde(default)]
    pub policy: Option<PolicyKind>,
    #[serde(default)]
    pub padding: Option<f64>,
    #[serde(default)]
    pub background: Option<String>,
}

fn default_ico_sizes() -> Vec<u32> {
    DEFAULT_ICO_SIZES.to_vec()
}

impl BundleConfig {
    fn placement(&self, base: &PlacementConfig) -> PlacementConfig {
        base.merged(self.policy, self.padding, self.background.as_deref())
    }

    pub fn validate(&self, index: usize, base: &PlacementConfig, diag: &mut ConfigDiagnostics) {
        let field = format!("bundle[{index}]");
        if self.path.trim().is_empty() {
            diag.error(FieldPath::owned(format!("{field}.path")), "path must not be empty");
        }

        let sizes_field = || FieldPath::owned(format!("{field}.sizes"));
        if self.sizes.is_empty() {
            diag.error(sizes_field(), "at least one size is required");
        } else if let Err(err) = validate_sizes(&self.sizes) {
            diag.error_with_hint(sizes_field(), err.to_string(), "e.g. sizes = [16, 32, 48]");
        }
        if let Some(&size) = self.sizes.iter().find(|&&s| s > MAX_ICO_SIZE) {
            diag.error(
                sizes_field(),
                format!("size {size} exceeds the ICO limit of {MAX_ICO_SIZE}"),
            );
        }
        self.placement(base).validate_at(&field, diag);
    }

    pub fn job(&self, base: &PlacementConfig) -> icon::Result<IcoJob> {
        Ok(IcoJob {
            path: expand_path(&self.path, self.sizes.last().copied().unwrap_or_default()),
            sizes: self.sizes.clone(),
            layout: self.placement(base).layout()?,
        })
    }
}
