//! Parallel rendering of catalog jobs.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use super::{Catalog, IcoJob, Job, Layout, MatteStage, MatteStep, PngJob};
use crate::debug;
use crate::icon::{
    self, IconError, IconResolutionSet, RasterImage, Threshold, composite_matted, matte, pack,
};
use crate::logger::ProgressLine;

/// Result of one job.
#[derive(Debug)]
pub struct Outcome {
    pub path: PathBuf,
    pub result: icon::Result<()>,
}

/// Per-job outcomes of a run, in catalog order.
#[derive(Debug, Default)]
pub struct Report {
    outcomes: Vec<Outcome>,
}

impl Report {
    pub fn written(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| o.result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &IconError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|err| (o.path.as_path(), err)))
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Apply the before-resize matte; return the threshold still to apply per
/// rendition, if any.
pub fn prepare(source: RasterImage, step: Option<MatteStep>) -> (RasterImage, Option<Threshold>) {
    match step {
        Some(MatteStep {
            threshold,
            stage: MatteStage::BeforeResize,
        }) => (matte(source, threshold), None),
        Some(MatteStep {
            threshold,
            stage: MatteStage::AfterResize,
        }) => (source, Some(threshold)),
        None => (source, None),
    }
}

/// Render one square rendition.
pub fn render_square(
    source: &RasterImage,
    size: u32,
    layout: Layout,
    matte_after: Option<Threshold>,
) -> icon::Result<RasterImage> {
    composite_matted(source.clone(), &layout.canvas(size), layout.policy, matte_after)
}

/// Encode the bytes for a job without touching the filesystem.
pub fn render(
    job: &Job,
    source: &RasterImage,
    matte_after: Option<Threshold>,
) -> icon::Result<Vec<u8>> {
    match job {
        Job::Png(PngJob {
            size,
            layout,
            shape,
            ..
        }) => {
            let canvas = render_square(source, *size, *layout, matte_after)?;
            icon::encode_png(&shape.apply(canvas))
        }
        Job::Ico(IcoJob { sizes, layout, .. }) => {
            let mut set = IconResolutionSet::new();
            for &size in sizes {
                set.push(render_square(source, size, *layout, matte_after)?, size);
            }
            pack(&set)
        }
    }
}

/// Render every job in parallel and write it under `root`.
///
/// A failing job is recorded in the report; the others still run.
pub fn run(catalog: &Catalog, source: RasterImage, step: Option<MatteStep>, root: &Path) -> Report {
    let (source, matte_after) = prepare(source, step);
    let progress = ProgressLine::new(
        "generate",
        &[("png", catalog.count("png")), ("ico", catalog.count("ico"))],
    );

    let outcomes = catalog
        .jobs()
        .par_iter()
        .map(|job| {
            let path = root.join(job.path());
            let result = render(job, &source, matte_after)
                .and_then(|bytes| icon::write_file(&path, &bytes));
            if result.is_ok() {
                debug!("write"; "{}", path.display());
            }
            progress.inc(job.kind());
            Outcome { path, result }
        })
        .collect();

    progress.finish();
    Report { outcomes }
}
