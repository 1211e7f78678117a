//! Placement geometry for square canvases.
//!
//! Computes where, and at what size, a source lands on a `size × size`
//! canvas. Offsets may be negative (cover placement overflows the canvas);
//! the compositor clips them.

use super::error::{IconError, Result};

/// How a source is fitted onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementPolicy {
    /// Resize to the full canvas, ignoring aspect ratio.
    Stretch,
    /// Shrink to fit inside the canvas minus `padding` on every side, then
    /// center. Sources that already fit keep their size.
    FitCentered { padding: f64 },
    /// Scale to cover the whole canvas, then center; overflow is clipped.
    CoverCentered,
}

/// Resolved position and size of the scaled source on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl PlacementPolicy {
    pub fn fit(padding: f64) -> Result<Self> {
        let policy = Self::FitCentered { padding };
        policy.validate()?;
        Ok(policy)
    }

    /// Padding fraction must be finite and in `[0, 1)`.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::FitCentered { padding } if !(0.0..1.0).contains(&padding) => Err(
                IconError::validation(format!("padding must be in [0, 1), got {padding}")),
            ),
            _ => Ok(()),
        }
    }

    /// Place a `src_width × src_height` source on a `size × size` canvas.
    ///
    /// Empty sources and canvases yield an empty placement at the origin.
    pub fn place(&self, src_width: u32, src_height: u32, size: u32) -> Placement {
        if src_width == 0 || src_height == 0 || size == 0 {
            return Placement {
                x: 0,
                y: 0,
                width: 0,
                height: 0,
            };
        }

        let (width, height) = match *self {
            Self::Stretch => (size, size),
            Self::FitCentered { padding } => {
                let padding_px = (f64::from(size) * padding).floor() as u32;
                let usable = size.saturating_sub(padding_px * 2).max(1);
                // Shrinks to fit, never enlarges.
                let target = usable.min(src_width.max(src_height));
                scale_longer_to(src_width, src_height, target)
            }
            Self::CoverCentered => scale_shorter_to(src_width, src_height, size),
        };

        Placement {
            x: centered_offset(size, width),
            y: centered_offset(size, height),
            width,
            height,
        }
    }
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        Self::FitCentered { padding: 0.1 }
    }
}

/// Longer side becomes `target`, shorter side scales proportionally (rounded).
fn scale_longer_to(width: u32, height: u32, target: u32) -> (u32, u32) {
    if width >= height {
        (target, proportional(height, target, width).max(1))
    } else {
        (proportional(width, target, height).max(1), target)
    }
}

/// Shorter side becomes `target`, longer side scales proportionally (floored).
fn scale_shorter_to(width: u32, height: u32, target: u32) -> (u32, u32) {
    if width >= height {
        let scaled = u64::from(width) * u64::from(target) / u64::from(height);
        (clamp_u32(scaled).max(target), target)
    } else {
        let scaled = u64::from(height) * u64::from(target) / u64::from(width);
        (target, clamp_u32(scaled).max(target))
    }
}

/// `value * numerator / denominator`, rounded half up.
fn proportional(value: u32, numerator: u32, denominator: u32) -> u32 {
    let den = u64::from(denominator);
    clamp_u32((u64::from(value) * u64::from(numerator) + den / 2) / den)
}

fn clamp_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// `floor((size - extent) / 2)`, negative when the extent overflows.
fn centered_offset(size: u32, extent: u32) -> i64 {
    (i64::from(size) - i64::from(extent)).div_euclid(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(x: i64, y: i64, width: u32, height: u32) -> Placement {
        Placement {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn fit_wide_source_with_padding() {
        let policy = PlacementPolicy::fit(0.1).unwrap();
        assert_eq!(policy.place(100, 50, 100), placement(10, 30, 80, 40));
    }

    #[test]
    fn fit_tall_source_without_padding() {
        let policy = PlacementPolicy::fit(0.0).unwrap();
        assert_eq!(policy.place(30, 90, 48), placement(16, 0, 16, 48));
    }

    #[test]
    fn fit_square_source_at_canvas_size_is_identity() {
        let policy = PlacementPolicy::fit(0.0).unwrap();
        assert_eq!(policy.place(64, 64, 64), placement(0, 0, 64, 64));
    }

    #[test]
    fn fit_padding_is_floored_in_pixels() {
        // 48 * 0.1 = 4.8 -> 4px each side.
        let policy = PlacementPolicy::fit(0.1).unwrap();
        assert_eq!(policy.place(512, 512, 48), placement(4, 4, 40, 40));
    }

    #[test]
    fn fit_keeps_small_sources_at_native_size() {
        let policy = PlacementPolicy::fit(0.1).unwrap();
        assert_eq!(policy.place(20, 10, 432), placement(206, 211, 20, 10));
        assert_eq!(policy.place(1, 1, 32), placement(15, 15, 1, 1));
    }

    #[test]
    fn fit_shrinks_only_to_the_usable_area() {
        // Usable area on 100 with 10% padding is 80.
        let policy = PlacementPolicy::fit(0.1).unwrap();
        assert_eq!(policy.place(90, 30, 100), placement(10, 36, 80, 27));
        assert_eq!(policy.place(80, 30, 100), placement(10, 35, 80, 30));
    }

    #[test]
    fn fit_huge_padding_keeps_one_pixel() {
        let policy = PlacementPolicy::fit(0.75).unwrap();
        let p = policy.place(10, 10, 16);
        assert_eq!((p.width, p.height), (1, 1));
        assert_eq!((p.x, p.y), (7, 7));
    }

    #[test]
    fn cover_wide_source_overflows_horizontally() {
        let p = PlacementPolicy::CoverCentered.place(200, 100, 48);
        assert_eq!(p, placement(-24, 0, 96, 48));
    }

    #[test]
    fn cover_uses_floor_division_for_odd_overflow() {
        // 73 wide on 48: (48 - 73) / 2 = -12.5 -> -13
        let p = PlacementPolicy::CoverCentered.place(146, 96, 48);
        assert_eq!(p, placement(-13, 0, 73, 48));
    }

    #[test]
    fn cover_tall_source_overflows_vertically() {
        let p = PlacementPolicy::CoverCentered.place(50, 100, 100);
        assert_eq!(p, placement(0, -50, 100, 200));
    }

    #[test]
    fn stretch_ignores_aspect() {
        let p = PlacementPolicy::Stretch.place(300, 20, 72);
        assert_eq!(p, placement(0, 0, 72, 72));
    }

    #[test]
    fn empty_source_places_nothing() {
        let p = PlacementPolicy::CoverCentered.place(0, 10, 48);
        assert_eq!((p.width, p.height), (0, 0));
    }

    #[test]
    fn padding_is_validated() {
        assert!(PlacementPolicy::fit(1.0).unwrap_err().is_validation());
        assert!(PlacementPolicy::fit(-0.1).unwrap_err().is_validation());
        assert!(PlacementPolicy::fit(f64::NAN).unwrap_err().is_validation());
        assert!(PlacementPolicy::Stretch.validate().is_ok());
    }
}
