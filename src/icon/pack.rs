//! Multi-resolution ICO packing.

use image::ExtendedColorType;
use image::codecs::ico::{IcoEncoder, IcoFrame};

use super::RasterImage;
use super::error::{IconError, Result};

/// Largest edge an ICO directory entry can describe.
pub const MAX_ICO_SIZE: u32 = 256;

/// Sizes written by the Windows preset.
pub const DEFAULT_ICO_SIZES: [u32; 7] = [16, 24, 32, 48, 64, 128, 256];

/// One square rendition in a resolution set.
#[derive(Debug, Clone)]
pub struct IconEntry {
    pub image: RasterImage,
    pub size: u32,
}

/// Renditions of the same subject, in strictly ascending size order.
///
/// The set does not sort; [`pack`] rejects out-of-order input.
#[derive(Debug, Clone, Default)]
pub struct IconResolutionSet {
    entries: Vec<IconEntry>,
}

impl IconResolutionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, image: RasterImage, size: u32) {
        self.entries.push(IconEntry { image, size });
    }

    pub fn entries(&self) -> &[IconEntry] {
        &self.entries
    }

    pub fn sizes(&self) -> Vec<u32> {
        self.entries.iter().map(|e| e.size).collect()
    }

    /// Non-empty, strictly ascending, every image exactly `size × size`.
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(IconError::validation("resolution set is empty"));
        }
        validate_sizes(&self.sizes())?;
        for entry in &self.entries {
            let (w, h) = entry.image.dimensions();
            if (w, h) != (entry.size, entry.size) {
                return Err(IconError::validation(format!(
                    "entry for size {} is {w}x{h}, expected {0}x{0}",
                    entry.size
                )));
            }
        }
        Ok(())
    }
}

/// Sizes must be positive and strictly ascending (so no duplicates).
pub fn validate_sizes(sizes: &[u32]) -> Result<()> {
    if let Some(&first) = sizes.first()
        && first == 0
    {
        return Err(IconError::validation("icon size must be positive"));
    }
    for pair in sizes.windows(2) {
        if pair[0] == pair[1] {
            return Err(IconError::validation(format!("duplicate size {}", pair[0])));
        }
        if pair[0] > pair[1] {
            return Err(IconError::validation(format!(
                "sizes must be ascending, {} comes before {}",
                pair[0], pair[1]
            )));
        }
    }
    Ok(())
}

/// Serialize the set as a Windows ICO container.
///
/// Entries are PNG-compressed and written in input order.
pub fn pack(set: &IconResolutionSet) -> Result<Vec<u8>> {
    set.validate()?;

    let frames = set
        .entries()
        .iter()
        .map(|entry| {
            if entry.size > MAX_ICO_SIZE {
                return Err(IconError::encode(
                    "ico",
                    format!("size {} exceeds {MAX_ICO_SIZE}", entry.size),
                ));
            }
            IcoFrame::as_png(
                entry.image.as_raw(),
                entry.size,
                entry.size,
                ExtendedColorType::Rgba8,
            )
            .map_err(|err| IconError::encode("ico", err))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut bytes = Vec::new();
    IcoEncoder::new(&mut bytes)
        .encode_images(&frames)
        .map_err(|err| IconError::encode("ico", err))?;
    Ok(bytes)
}
