//! `[placement]` section configuration.
//!
//! Shared canvas layout for preset outputs. `[[target]]` and `[[bundle]]`
//! entries may override any field.
//!
//! # Example
//!
//! ```toml
//! [placement]
//! policy = "fit"              # stretch | fit | cover
//! padding = 0.1               # Margin per side, fraction of the canvas (fit only)
//! background = "#E8B4B8"      # Canvas fill; omit or "transparent" for none
//! ```

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::catalog::Layout;
use crate::config::{ConfigDiagnostics, FieldPath};
use crate::icon::color::color_from_hex;
use crate::icon::{self, PlacementPolicy};

/// Default margin for fit placement.
pub const DEFAULT_PADDING: f64 = 0.1;

/// Placement policy as written in config files and on the command line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Fill the canvas, ignoring aspect ratio
    Stretch,
    /// Fit inside the padded canvas, centered
    #[default]
    Fit,
    /// Cover the whole canvas, centered, cropping overflow
    Cover,
}

impl PolicyKind {
    /// `padding` only matters (and is only checked) for [`PolicyKind::Fit`].
    pub fn with_padding(self, padding: f64) -> icon::Result<PlacementPolicy> {
        match self {
            Self::Stretch => Ok(PlacementPolicy::Stretch),
            Self::Fit => PlacementPolicy::fit(padding),
            Self::Cover => Ok(PlacementPolicy::CoverCentered),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub policy: PolicyKind,
    pub padding: f64,
    pub background: Option<String>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::Fit,
            padding: DEFAULT_PADDING,
            background: None,
        }
    }
}

impl PlacementConfig {
    /// Copy with per-entry overrides applied.
    pub fn merged(
        &self,
        policy: Option<PolicyKind>,
        padding: Option<f64>,
        background: Option<&str>,
    ) -> Self {
        Self {
            policy: policy.unwrap_or(self.policy),
            padding: padding.unwrap_or(self.padding),
            background: background
                .map(str::to_owned)
                .or_else(|| self.background.clone()),
        }
    }

    pub fn layout(&self) -> icon::Result<Layout> {
        let policy = self.policy.with_padding(self.padding)?;
        Ok(Layout {
            policy,
            background: parse_background(self.background.as_deref())?,
        })
    }

    /// Report problems under `field` (e.g. `placement`, `target[2]`).
    pub fn validate_at(&self, field: &str, diag: &mut ConfigDiagnostics) {
        if !(0.0..1.0).contains(&self.padding) {
            diag.error_with_hint(
                FieldPath::owned(format!("{field}.padding")),
                format!("padding must be in [0, 1), got {}", self.padding),
                "0.1 leaves a 10% margin on every side",
            );
        }
        if let Err(err) = parse_background(self.background.as_deref()) {
            diag.error(FieldPath::owned(format!("{field}.background")), err.to_string());
        }
    }
}

/// Parse a canvas fill. Missing, `"transparent"` and `"none"` mean no fill.
pub fn parse_background(value: Option<&str>) -> icon::Result<Option<Rgba<u8>>> {
    match value.map(str::trim) {
        None => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("transparent") || v.eq_ignore_ascii_case("none") => {
            Ok(None)
        }
        Some(hex) => color_from_hex(hex).map(Some),
    }
}
