//! Output shape masks.

use serde::{Deserialize, Serialize};

use super::RasterImage;

/// Outline applied to a finished canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Square,
    /// Ellipse inset by an eighth of each side; outside pixels are cleared.
    Circle,
}

impl Shape {
    pub fn apply(self, image: RasterImage) -> RasterImage {
        match self {
            Self::Square => image,
            Self::Circle => circle_mask(image),
        }
    }
}

/// Clear every pixel whose center lies outside the inset ellipse.
///
/// Pixels inside keep their color and alpha.
fn circle_mask(mut image: RasterImage) -> RasterImage {
    let (width, height) = image.dimensions();
    let margin_x = f64::from(width / 8);
    let margin_y = f64::from(height / 8);
    let rx = (f64::from(width) - 2.0 * margin_x) / 2.0;
    let ry = (f64::from(height) - 2.0 * margin_y) / 2.0;
    if rx <= 0.0 || ry <= 0.0 {
        return image;
    }
    let cx = f64::from(width) / 2.0;
    let cy = f64::from(height) / 2.0;

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let dx = (f64::from(x) + 0.5 - cx) / rx;
        let dy = (f64::from(y) + 0.5 - cy) / ry;
        if dx * dx + dy * dy > 1.0 {
            pixel.0 = [0, 0, 0, 0];
        }
    }
    image
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    #[test]
    fn square_is_passthrough() {
        let img = RasterImage::from_pixel(16, 16, Rgba([1, 2, 3, 255]));
        assert_eq!(Shape::Square.apply(img.clone()), img);
    }

    #[test]
    fn circle_clears_corners_and_margin() {
        let img = RasterImage::from_pixel(48, 48, Rgba([9, 9, 9, 255]));
        let out = Shape::Circle.apply(img);

        assert_eq!(out.dimensions(), (48, 48));
        // Margin is 6px; the ring edge at the middle row starts there.
        assert_eq!(out.get_pixel(5, 24)[3], 0);
        assert_eq!(out.get_pixel(6, 24)[3], 255);
        assert_eq!(out.get_pixel(24, 24)[3], 255);
        assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(out.get_pixel(47, 47).0, [0, 0, 0, 0]);
        assert_eq!(out.get_pixel(10, 10)[3], 0);
    }

    #[test]
    fn circle_keeps_partial_alpha_inside() {
        let img = RasterImage::from_pixel(16, 16, Rgba([100, 50, 25, 77]));
        let out = Shape::Circle.apply(img);
        assert_eq!(out.get_pixel(8, 8).0, [100, 50, 25, 77]);
    }

    #[test]
    fn tiny_images_survive() {
        let img = RasterImage::from_pixel(1, 1, Rgba([5, 5, 5, 255]));
        let out = Shape::Circle.apply(img);
        assert_eq!(out.get_pixel(0, 0)[3], 255);
    }
}
