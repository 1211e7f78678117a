//! `generate`: render the whole output catalog.
//!
//! Pipeline: config -> catalog -> load source -> parallel render -> report

use std::error::Error;

use anyhow::{Context, Result, bail};

use crate::catalog::{self, Catalog};
use crate::config::IconConfig;
use crate::icon::{self, IconError};
use crate::logger::plural_count;
use crate::{debug, log};

/// Render every configured output, or list them when `dry` is set.
pub fn generate(config: &IconConfig, dry: bool) -> Result<()> {
    let catalog = config.catalog()?;
    if catalog.is_empty() {
        log!("generate"; "nothing to generate");
        return Ok(());
    }

    if dry {
        list_outputs(config, &catalog);
        return Ok(());
    }

    let source = icon::open(&config.source).with_context(|| {
        format!(
            "Failed to load source image '{}'",
            config.root_relative(&config.source).display()
        )
    })?;
    if !config.config_path.as_os_str().is_empty() {
        debug!("generate"; "config {}", config.config_path.display());
    }
    debug!("generate"; "source is {}x{}", source.width(), source.height());
    if let Some(step) = config.matte_step() {
        debug!("generate"; "matte {:?} at {}", step.stage, step.threshold.value());
    }
    log!(
        "generate";
        "{} from {}",
        plural_count(catalog.len(), "output"),
        config.root_relative(&config.source).display()
    );

    let report = catalog::run(&catalog, source, config.matte_step(), &config.output);

    if !report.is_success() {
        let mut failed = 0;
        let mut only_validation = true;
        for (path, err) in report.failures() {
            failed += 1;
            only_validation &= err.is_validation();
            log!("error"; "{}: {}", config.root_relative(path).display(), describe(err));
        }
        if only_validation {
            log!("hint"; "check the [placement], [[target]] and [[bundle]] settings");
        }
        bail!(
            "{} of {} failed",
            failed,
            plural_count(catalog.len(), "output")
        );
    }

    log!(
        "done";
        "wrote {} to {}",
        plural_count(report.written().count(), "file"),
        config.output.display()
    );
    Ok(())
}

/// Print each output path with its sizes.
fn list_outputs(config: &IconConfig, catalog: &Catalog) {
    for job in catalog.jobs() {
        let path = config.output.join(job.path());
        log!(
            job.kind();
            "{} ({})",
            config.root_relative(&path).display(),
            job.describe_sizes()
        );
    }
    log!("generate"; "{} (dry run)", plural_count(catalog.len(), "output"));
}

/// Error message including its direct cause.
fn describe(err: &IconError) -> String {
    match err.source() {
        Some(cause) => format!("{err}: {cause}"),
        None => err.to_string(),
    }
}
