//! Alpha-correct resampling.
//!
//! Lanczos on straight alpha drags the color of transparent pixels (black,
//! after matting) into the visible edge. Filtering premultiplied values and
//! dividing back afterwards keeps edges clean.

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgba, Rgba32FImage};

use super::RasterImage;

/// Resampled alpha below half a code value is treated as fully transparent.
const MIN_ALPHA: f32 = 0.5 / 255.0;

/// Resize to exactly `width × height` with Lanczos3.
///
/// Returns the input untouched when the size already matches.
pub fn resize(image: RasterImage, width: u32, height: u32) -> RasterImage {
    if image.dimensions() == (width, height) {
        return image;
    }
    if image.width() == 0 || image.height() == 0 || width == 0 || height == 0 {
        return RasterImage::new(width, height);
    }

    let premultiplied = premultiply(&image);
    let resized = imageops::resize(&premultiplied, width, height, FilterType::Lanczos3);
    unpremultiply(&resized)
}

fn premultiply(image: &RasterImage) -> Rgba32FImage {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0.map(|c| f32::from(c) / 255.0);
        Rgba([r * a, g * a, b * a, a])
    })
}

fn unpremultiply(image: &Rgba32FImage) -> RasterImage {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        if a < MIN_ALPHA {
            return Rgba([0, 0, 0, 0]);
        }
        Rgba([
            to_u8(r / a),
            to_u8(g / a),
            to_u8(b / a),
            to_u8(a),
        ])
    })
}

#[inline]
fn to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_size_is_identity() {
        let img = RasterImage::from_fn(5, 3, |x, y| Rgba([x as u8, y as u8, 7, 99]));
        assert_eq!(resize(img.clone(), 5, 3), img);
    }

    #[test]
    fn transparent_area_stays_transparent() {
        let img = RasterImage::new(64, 64);
        let out = resize(img, 17, 17);
        assert!(out.pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn matte_edge_has_no_dark_halo() {
        // Red disk on transparent black, like a matted icon.
        let img = RasterImage::from_fn(128, 128, |x, y| {
            let dx = x as i32 - 64;
            let dy = y as i32 - 64;
            if dx * dx + dy * dy < 40 * 40 {
                Rgba([220, 30, 40, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });

        let out = resize(img, 24, 24);
        for pixel in out.pixels() {
            let [r, g, b, a] = pixel.0;
            if a == 0 {
                assert_eq!([r, g, b], [0, 0, 0]);
            } else if a > 16 {
                // Straight color along the edge stays close to the disk color.
                assert!(r >= 180, "dark fringe: {:?}", pixel.0);
                assert!(g <= 70 && b <= 80, "color bleed: {:?}", pixel.0);
            }
        }
        // Corners are far from the disk.
        assert_eq!(out.get_pixel(0, 0)[3], 0);
        assert_eq!(out.get_pixel(23, 23)[3], 0);
        // Center is solid.
        assert_eq!(out.get_pixel(12, 12)[3], 255);
    }

    #[test]
    fn opaque_input_stays_opaque() {
        let img = RasterImage::from_fn(40, 20, |x, _| Rgba([(x * 6) as u8, 90, 200, 255]));
        let out = resize(img, 13, 31);
        assert_eq!(out.dimensions(), (13, 31));
        assert!(out.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn empty_source_yields_transparent_target() {
        let out = resize(RasterImage::new(0, 0), 4, 4);
        assert_eq!(out.dimensions(), (4, 4));
        assert!(out.pixels().all(|p| p[3] == 0));
    }
}
