//! `[matte]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [matte]
//! enable = true               # Make the near-white background transparent
//! threshold = 240             # Channels above this count as background
//! stage = "before-resize"     # before-resize | after-resize
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{MatteStage, MatteStep};
use crate::config::{ConfigDiagnostics, FieldPath};
use crate::icon::Threshold;
use crate::icon::matte::DEFAULT_THRESHOLD;

/// Background matting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatteConfig {
    pub enable: bool,

    /// Kept wide so out-of-range values reach validation instead of
    /// failing to parse.
    pub threshold: i64,

    pub stage: MatteStage,
}

impl Default for MatteConfig {
    fn default() -> Self {
        Self {
            enable: true,
            threshold: i64::from(DEFAULT_THRESHOLD),
            stage: MatteStage::default(),
        }
    }
}

impl MatteConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Err(err) = Threshold::try_from(self.threshold) {
            diag.error_with_hint(
                FieldPath::new("matte.threshold"),
                err.to_string(),
                "use a value between 0 and 255; 240 suits white backgrounds",
            );
        }
    }

    /// `None` when matting is disabled.
    pub fn step(&self) -> Option<MatteStep> {
        if !self.enable {
            return None;
        }
        let threshold = Threshold::try_from(self.threshold).unwrap_or_default();
        Some(MatteStep {
            threshold,
            stage: self.stage,
        })
    }
}
