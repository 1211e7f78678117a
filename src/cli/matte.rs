//! `matte`: make the near-white background of one image transparent.

use anyhow::{Context, Result};
use std::path::Path;

use crate::icon::{self, Threshold, matte};
use crate::log;

pub fn matte_file(input: &Path, output: &Path, threshold: u8) -> Result<()> {
    let image = icon::open(input)
        .with_context(|| format!("Failed to load '{}'", input.display()))?;
    let (width, height) = image.dimensions();

    let matted = matte(image, Threshold::new(threshold));
    let cleared = matted.pixels().filter(|p| p[3] == 0).count();

    icon::write_file(output, &icon::encode_png(&matted)?)?;
    log!(
        "matte";
        "{} ({width}x{height}, {cleared} transparent pixels)",
        output.display()
    );
    Ok(())
}
