//! Common utilities shared across CLI commands.

use std::path::Path;

use anyhow::{Context, Result};

use super::args::CanvasArgs;
use crate::catalog::Layout;
use crate::config::parse_background;
use crate::icon::{self, RasterImage, Threshold, matte};

impl CanvasArgs {
    /// Placement and fill from `--policy`, `--padding` and `--background`.
    pub fn layout(&self) -> Result<Layout> {
        let policy = self.policy.with_padding(self.padding)?;
        let background = parse_background(self.background.as_deref())?;
        Ok(Layout { policy, background })
    }

    /// Load `path`, matted when `--threshold` was given.
    pub fn load_source(&self, path: &Path) -> Result<RasterImage> {
        let image =
            icon::open(path).with_context(|| format!("Failed to load '{}'", path.display()))?;
        Ok(match self.threshold {
            Some(t) => matte(image, Threshold::new(t)),
            None => image,
        })
    }
}
