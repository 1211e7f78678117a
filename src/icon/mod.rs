//! Icon image transforms.
//!
//! # Modules
//!
//! - [`matte`]: Threshold background removal
//! - [`placement`]: Canvas placement geometry (stretch, fit, cover)
//! - [`canvas`]: Square canvas compositing
//! - [`resample`]: Alpha-correct Lanczos resizing
//! - [`shape`]: Circular output masks
//! - [`pack`]: Multi-resolution ICO containers
//!
//! Every transform takes a [`RasterImage`] by value and returns a new one.

pub mod canvas;
pub mod color;
pub mod error;
pub mod matte;
pub mod pack;
pub mod placement;
pub mod resample;
pub mod shape;

use std::fs;
use std::path::Path;

use image::{ImageFormat, RgbaImage};

pub use canvas::{CanvasSpec, composite, composite_matted};
pub use error::{IconError, Result};
pub use matte::{Threshold, matte};
pub use pack::{IconResolutionSet, pack};
pub use placement::PlacementPolicy;
pub use shape::Shape;

/// 8-bit RGBA pixel grid.
pub type RasterImage = RgbaImage;

/// Decode image bytes, promoting any color type to RGBA.
///
/// Sources without alpha come out fully opaque.
pub fn decode(bytes: &[u8]) -> Result<RasterImage> {
    image::load_from_memory(bytes)
        .map(|img| img.into_rgba8())
        .map_err(IconError::Decode)
}

/// Read and decode an image file.
pub fn open(path: &Path) -> Result<RasterImage> {
    let bytes = fs::read(path).map_err(|err| IconError::Io(path.to_path_buf(), err))?;
    decode(&bytes)
}

/// Encode as PNG.
pub fn encode_png(image: &RasterImage) -> Result<Vec<u8>> {
    let mut bytes = std::io::Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageFormat::Png)
        .map_err(|err| IconError::encode("png", err))?;
    Ok(bytes.into_inner())
}

/// Write bytes to `path`, creating parent directories.
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|err| IconError::Io(parent.to_path_buf(), err))?;
    }
    fs::write(path, bytes).map_err(|err| IconError::Io(path.to_path_buf(), err))
}
