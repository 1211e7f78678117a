//! Threshold background matte.
//!
//! A pixel whose red, green and blue channels all exceed the threshold is
//! treated as background and replaced by transparent black. Everything else
//! passes through untouched, alpha included.

use rayon::prelude::*;

use super::RasterImage;
use super::error::{IconError, Result};

/// Default near-white cutoff.
pub const DEFAULT_THRESHOLD: u8 = 240;

const PARALLEL_PIXEL_THRESHOLD: usize = 32 * 1024;

/// Per-channel brightness cutoff, shared by all three color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Threshold(u8);

impl Threshold {
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn is_background(self, pixel: &[u8]) -> bool {
        pixel[0] > self.0 && pixel[1] > self.0 && pixel[2] > self.0
    }

    #[inline]
    fn apply(self, pixel: &mut [u8]) {
        if self.is_background(pixel) {
            pixel.copy_from_slice(&[0, 0, 0, 0]);
        }
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(DEFAULT_THRESHOLD)
    }
}

impl TryFrom<i64> for Threshold {
    type Error = IconError;

    fn try_from(value: i64) -> Result<Self> {
        u8::try_from(value)
            .map(Self)
            .map_err(|_| IconError::validation(format!("threshold must be in 0..=255, got {value}")))
    }
}

/// Make every near-white pixel fully transparent.
///
/// Dimensions are preserved. Large images are classified in parallel; the
/// result is the same as a sequential scan.
pub fn matte(mut image: RasterImage, threshold: Threshold) -> RasterImage {
    let len = image.width() as usize * image.height() as usize;
    let raw: &mut [u8] = &mut image;

    if len >= PARALLEL_PIXEL_THRESHOLD {
        raw.par_chunks_exact_mut(4)
            .for_each(|pixel| threshold.apply(pixel));
    } else {
        raw.chunks_exact_mut(4)
            .for_each(|pixel| threshold.apply(pixel));
    }

    image
}
