//! Square canvas compositing.

use image::{Rgba, imageops};

use super::RasterImage;
use super::color::TRANSPARENT;
use super::error::{IconError, Result};
use super::matte::{Threshold, matte};
use super::placement::{Placement, PlacementPolicy};
use super::resample::resize;

/// Target canvas: a `size × size` square with an optional solid fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSpec {
    pub size: u32,
    pub background: Option<Rgba<u8>>,
}

impl CanvasSpec {
    pub const fn transparent(size: u32) -> Self {
        Self {
            size,
            background: None,
        }
    }

    pub const fn filled(size: u32, background: Rgba<u8>) -> Self {
        Self {
            size,
            background: Some(background),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(IconError::validation("canvas size must be positive"));
        }
        Ok(())
    }

    fn blank(&self) -> RasterImage {
        RasterImage::from_pixel(self.size, self.size, self.background.unwrap_or(TRANSPARENT))
    }
}

/// Place `image` on the canvas according to `policy`.
///
/// The output is always exactly `canvas.size × canvas.size`.
pub fn composite(
    image: RasterImage,
    canvas: &CanvasSpec,
    policy: PlacementPolicy,
) -> Result<RasterImage> {
    composite_matted(image, canvas, policy, None)
}

/// Like [`composite`], optionally matting the source after it was resampled
/// and before it is pasted.
pub fn composite_matted(
    image: RasterImage,
    canvas: &CanvasSpec,
    policy: PlacementPolicy,
    matte_after_resize: Option<Threshold>,
) -> Result<RasterImage> {
    canvas.validate()?;
    policy.validate()?;

    let mut output = canvas.blank();
    let placement = policy.place(image.width(), image.height(), canvas.size);
    if placement.width == 0 || placement.height == 0 {
        return Ok(output);
    }

    let (visible, placement) = crop_to_canvas(image, placement, canvas.size);
    let mut scaled = resize(visible, placement.width, placement.height);
    if let Some(threshold) = matte_after_resize {
        scaled = matte(scaled, threshold);
    }

    paste_over(&mut output, &scaled, placement.x, placement.y);
    Ok(output)
}

/// Cut an overflowing placement down to the part that lands on the canvas.
///
/// Returns the matching source window and the clipped placement, so cover
/// never resamples pixels that would be clipped anyway.
fn crop_to_canvas(
    image: RasterImage,
    placement: Placement,
    size: u32,
) -> (RasterImage, Placement) {
    if placement.width <= size && placement.height <= size {
        return (image, placement);
    }

    // Centered window of `src` covering `min(scaled, size)` scaled pixels.
    let window = |src: u32, scaled: u32| {
        let visible = u64::from(scaled.min(size));
        let scaled = u64::from(scaled);
        let extent = (u64::from(src) * visible + scaled / 2) / scaled;
        let extent = u32::try_from(extent).unwrap_or(src).clamp(1, src);
        ((src - extent) / 2, extent)
    };
    let (x, width) = window(image.width(), placement.width);
    let (y, height) = window(image.height(), placement.height);
    let cropped = imageops::crop_imm(&image, x, y, width, height).to_image();

    let clipped = Placement {
        x: placement.x.max(0),
        y: placement.y.max(0),
        width: placement.width.min(size),
        height: placement.height.min(size),
    };
    (cropped, clipped)
}

/// Source-over paste of `top` at `(x, y)`, clipped to `bottom`'s bounds.
pub fn paste_over(bottom: &mut RasterImage, top: &RasterImage, x: i64, y: i64) {
    let (bw, bh) = (i64::from(bottom.width()), i64::from(bottom.height()));
    let (tw, th) = (i64::from(top.width()), i64::from(top.height()));

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + tw).min(bw);
    let y1 = (y + th).min(bh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for by in y0..y1 {
        for bx in x0..x1 {
            let src = top.get_pixel((bx - x) as u32, (by - y) as u32);
            let dst = bottom.get_pixel_mut(bx as u32, by as u32);
            *dst = blend_over(*dst, *src);
        }
    }
}

/// Straight-alpha source-over, in integer arithmetic with rounding.
pub fn blend_over(bottom: Rgba<u8>, top: Rgba<u8>) -> Rgba<u8> {
    let top_a = u32::from(top[3]);
    if top_a == 255 {
        return top;
    }
    if top_a == 0 {
        return bottom;
    }

    let bottom_a = u32::from(bottom[3]);
    // Both weights are scaled by 255.
    let top_w = top_a * 255;
    let bottom_w = bottom_a * (255 - top_a);
    let out_w = top_w + bottom_w;
    if out_w == 0 {
        return TRANSPARENT;
    }

    let channel = |i: usize| {
        let sum = u32::from(top[i]) * top_w + u32::from(bottom[i]) * bottom_w;
        ((sum + out_w / 2) / out_w) as u8
    };
    let alpha = ((out_w + 127) / 255) as u8;

    Rgba([channel(0), channel(1), channel(2), alpha])
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSE_GOLD: Rgba<u8> = Rgba([232, 180, 184, 255]);
    const INK: Rgba<u8> = Rgba([20, 40, 60, 255]);

    fn fit(padding: f64) -> PlacementPolicy {
        PlacementPolicy::fit(padding).unwrap()
    }

    #[test]
    fn output_is_always_canvas_sized() {
        let sources = [(1, 1), (100, 50), (7, 300), (512, 512)];
        let policies = [PlacementPolicy::Stretch, fit(0.1), PlacementPolicy::CoverCentered];

        for (w, h) in sources {
            for policy in policies {
                let img = RasterImage::from_pixel(w, h, INK);
                let out = composite(img, &CanvasSpec::transparent(48), policy).unwrap();
                assert_eq!(out.dimensions(), (48, 48), "{w}x{h} {policy:?}");
            }
        }
    }

    #[test]
    fn fit_without_padding_at_canvas_size_is_exact_copy() {
        let img = RasterImage::from_fn(32, 32, |x, y| Rgba([x as u8 * 8, y as u8 * 8, 3, 255]));
        let out = composite(img.clone(), &CanvasSpec::transparent(32), fit(0.0)).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn fit_with_padding_centers_wide_source() {
        let img = RasterImage::from_pixel(100, 50, INK);
        let out = composite(img, &CanvasSpec::transparent(100), fit(0.1)).unwrap();

        // Placed at x=10..90, y=30..70.
        assert_eq!(out.get_pixel(9, 50)[3], 0);
        assert_eq!(out.get_pixel(10, 50)[3], 255);
        assert_eq!(out.get_pixel(89, 50)[3], 255);
        assert_eq!(out.get_pixel(90, 50)[3], 0);
        assert_eq!(out.get_pixel(50, 29)[3], 0);
        assert_eq!(out.get_pixel(50, 30)[3], 255);
        assert_eq!(out.get_pixel(50, 69)[3], 255);
        assert_eq!(out.get_pixel(50, 70)[3], 0);
    }

    #[test]
    fn cover_of_opaque_source_leaves_no_transparent_pixel() {
        for (w, h) in [(200, 100), (37, 91), (1, 1), (48, 48)] {
            let img = RasterImage::from_pixel(w, h, INK);
            let out =
                composite(img, &CanvasSpec::transparent(48), PlacementPolicy::CoverCentered)
                    .unwrap();
            assert!(out.pixels().all(|p| p[3] == 255), "{w}x{h}");
        }
    }

    #[test]
    fn cover_of_extreme_aspect_source_stays_canvas_sized() {
        let img = RasterImage::from_pixel(4096, 1, INK);
        let out =
            composite(img, &CanvasSpec::transparent(1024), PlacementPolicy::CoverCentered)
                .unwrap();
        assert_eq!(out.dimensions(), (1024, 1024));
        assert!(out.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn cover_keeps_the_center_of_the_source() {
        // Left third red, middle third ink, right third blue; cover on 30
        // shows only the middle band.
        let img = RasterImage::from_fn(90, 30, |x, _| match x / 30 {
            0 => Rgba([255, 0, 0, 255]),
            1 => INK,
            _ => Rgba([0, 0, 255, 255]),
        });
        let out = composite(img, &CanvasSpec::transparent(30), PlacementPolicy::CoverCentered)
            .unwrap();
        assert_eq!(*out.get_pixel(15, 15), INK);
        assert_eq!(*out.get_pixel(0, 0), INK);
        assert_eq!(*out.get_pixel(29, 29), INK);
    }

    #[test]
    fn background_shows_through_transparent_source() {
        let mut img = RasterImage::from_pixel(10, 10, Rgba([0, 0, 0, 0]));
        img.put_pixel(5, 5, INK);

        let canvas = CanvasSpec::filled(10, ROSE_GOLD);
        let out = composite(img, &canvas, fit(0.0)).unwrap();
        assert_eq!(*out.get_pixel(0, 0), ROSE_GOLD);
        assert_eq!(*out.get_pixel(5, 5), INK);
    }

    #[test]
    fn matte_after_resize_removes_white_before_paste() {
        let img = RasterImage::from_pixel(20, 20, Rgba([255, 255, 255, 255]));
        let canvas = CanvasSpec::filled(10, ROSE_GOLD);

        let out =
            composite_matted(img, &canvas, fit(0.0), Some(Threshold::new(240))).unwrap();
        assert!(out.pixels().all(|p| *p == ROSE_GOLD));
    }

    #[test]
    fn zero_canvas_is_rejected() {
        let img = RasterImage::new(4, 4);
        let err = composite(img, &CanvasSpec::transparent(0), PlacementPolicy::Stretch)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn bad_padding_is_rejected() {
        let img = RasterImage::new(4, 4);
        let policy = PlacementPolicy::FitCentered { padding: 1.2 };
        let err = composite(img, &CanvasSpec::transparent(8), policy).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn composite_is_deterministic() {
        let img = RasterImage::from_fn(90, 61, |x, y| {
            Rgba([(x * 3) as u8, (y * 4) as u8, ((x + y) % 256) as u8, ((x * y) % 256) as u8])
        });
        let canvas = CanvasSpec::filled(37, ROSE_GOLD);
        let a = composite(img.clone(), &canvas, PlacementPolicy::CoverCentered).unwrap();
        let b = composite(img, &canvas, PlacementPolicy::CoverCentered).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn blend_over_rules() {
        let half = Rgba([200, 100, 50, 128]);
        // Onto transparent: color is kept exactly.
        assert_eq!(blend_over(TRANSPARENT, half), half);
        // Opaque top replaces.
        assert_eq!(blend_over(ROSE_GOLD, INK), INK);
        // Transparent top keeps bottom.
        assert_eq!(blend_over(ROSE_GOLD, TRANSPARENT), ROSE_GOLD);
        // Half over opaque white lands in between and stays opaque.
        let out = blend_over(Rgba([255, 255, 255, 255]), half);
        assert_eq!(out[3], 255);
        assert!((out[0] as i32 - 227).abs() <= 1);
        assert!((out[1] as i32 - 177).abs() <= 1);
    }

    #[test]
    fn paste_clips_negative_offsets() {
        let mut bottom = RasterImage::new(4, 4);
        let top = RasterImage::from_pixel(6, 2, INK);
        paste_over(&mut bottom, &top, -3, 3);

        assert_eq!(*bottom.get_pixel(0, 3), INK);
        assert_eq!(*bottom.get_pixel(2, 3), INK);
        assert_eq!(bottom.get_pixel(3, 3)[3], 0);
        assert_eq!(bottom.get_pixel(0, 2)[3], 0);
    }
}
