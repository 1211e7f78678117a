//! Output catalog: what to render, where, and how.
//!
//! A [`Catalog`] is a flat list of [`Job`]s. Presets and config entries are
//! expanded into jobs up front; [`pipeline::run`] renders them.

pub mod pipeline;
pub mod preset;


use std::collections::HashSet;
use std::path::{Path, PathBuf};

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::icon::{CanvasSpec, IconError, PlacementPolicy, Result, Shape, Threshold};

pub use pipeline::run;
pub use preset::Preset;

/// Placeholder replaced by the rendition size in output paths.
pub const SIZE_PLACEHOLDER: &str = "{size}";

/// When background matting happens relative to resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatteStage {
    /// Matte the full-resolution source once.
    #[default]
    BeforeResize,
    /// Matte each resampled rendition before it is pasted.
    AfterResize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatteStep {
    pub threshold: Threshold,
    pub stage: MatteStage,
}

/// Placement and canvas fill shared by a group of outputs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    pub policy: PlacementPolicy,
    pub background: Option<Rgba<u8>>,
}

impl Layout {
    pub const fn canvas(&self, size: u32) -> CanvasSpec {
        match self.background {
            Some(fill) => CanvasSpec::filled(size, fill),
            None => CanvasSpec::transparent(size),
        }
    }
}

/// A single PNG file.
#[derive(Debug, Clone, PartialEq)]
pub struct PngJob {
    pub path: PathBuf,
    pub size: u32,
    pub layout: Layout,
    pub shape: Shape,
}

/// A multi-resolution ICO file.
#[derive(Debug, Clone, PartialEq)]
pub struct IcoJob {
    pub path: PathBuf,
    pub sizes: Vec<u32>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    Png(PngJob),
    Ico(IcoJob),
}

impl Job {
    /// Output path, relative to the output root.
    pub fn path(&self) -> &Path {
        match self {
            Self::Png(job) => &job.path,
            Self::Ico(job) => &job.path,
        }
    }

    /// Progress counter name.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Png(_) => "png",
            Self::Ico(_) => "ico",
        }
    }

    /// Short size description for listings, e.g. `48` or `16,32,48`.
    pub fn describe_sizes(&self) -> String {
        match self {
            Self::Png(job) => job.size.to_string(),
            Self::Ico(job) => job
                .sizes
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

/// Ordered set of jobs with unique output paths.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    jobs: Vec<Job>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, job: Job) {
        self.jobs.push(job);
    }

    /// Expand a built-in preset with the shared layout.
    pub fn add_preset(&mut self, preset: Preset, ios_dir: &str, layout: Layout) {
        for output in preset.png_outputs(ios_dir) {
            self.push(Job::Png(PngJob {
                path: output.path,
                size: output.size,
                layout,
                shape: output.shape,
            }));
        }
        for (path, sizes) in preset.ico_outputs() {
            self.push(Job::Ico(IcoJob {
                path,
                sizes,
                layout,
            }));
        }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Number of jobs of the given kind (`"png"` or `"ico"`).
    pub fn count(&self, kind: &str) -> usize {
        self.jobs.iter().filter(|job| job.kind() == kind).count()
    }

    /// Two jobs must never write the same file.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for job in &self.jobs {
            if !seen.insert(job.path()) {
                return Err(IconError::validation(format!(
                    "output `{}` is produced more than once",
                    job.path().display()
                )));
            }
        }
        Ok(())
    }
}

/// Substitute [`SIZE_PLACEHOLDER`] in a path template.
pub fn expand_path(template: &str, size: u32) -> PathBuf {
    PathBuf::from(template.replace(SIZE_PLACEHOLDER, &size.to_string()))
}
