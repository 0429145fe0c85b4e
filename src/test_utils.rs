//! Test utilities for imageops-cutout
//!
//! This module provides common fixtures for testing the cutout stages.
//! It is only compiled when running tests.

use std::ops::Range;

use image::{Luma, Rgb};
use imageproc::definitions::Image;

/// Light, nearly neutral backdrop color
pub const BACKGROUND: [u8; 3] = [196, 198, 202];

/// Saturated subject color, far from the backdrop in every cue
pub const SUBJECT: [u8; 3] = [180, 40, 60];

/// Creates a test RGB image with predefined pixel values for testing.
///
/// This function creates a 2x2 test image with known pixel values:
/// - (0,0): [200, 150, 100]
/// - (1,0): [100, 200, 150]
/// - (0,1): [150, 100, 200]
/// - (1,1): [50, 75, 25]
pub fn create_test_rgb_image() -> Image<Rgb<u8>> {
    let mut image: Image<Rgb<u8>> = Image::new(2, 2);
    image.put_pixel(0, 0, Rgb([200, 150, 100]));
    image.put_pixel(1, 0, Rgb([100, 200, 150]));
    image.put_pixel(0, 1, Rgb([150, 100, 200]));
    image.put_pixel(1, 1, Rgb([50, 75, 25]));
    image
}

/// Creates a 2x2 alpha matte with varying transparency levels:
/// - (0,0): [255] (fully opaque)
/// - (1,0): [192] (mostly opaque)
/// - (0,1): [128] (semi-transparent)
/// - (1,1): [64]  (mostly transparent)
pub fn create_test_alpha_mask() -> Image<Luma<u8>> {
    let mut mask: Image<Luma<u8>> = Image::new(2, 2);
    mask.put_pixel(0, 0, Luma([255]));
    mask.put_pixel(1, 0, Luma([192]));
    mask.put_pixel(0, 1, Luma([128]));
    mask.put_pixel(1, 1, Luma([64]));
    mask
}

/// Creates a `BACKGROUND` image with a `SUBJECT` rectangle at `xs` × `ys`.
pub fn create_subject_on_background(
    width: u32,
    height: u32,
    xs: Range<u32>,
    ys: Range<u32>,
) -> Image<Rgb<u8>> {
    Image::from_fn(width, height, |x, y| {
        if xs.contains(&x) && ys.contains(&y) {
            Rgb(SUBJECT)
        } else {
            Rgb(BACKGROUND)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_test_rgb_image_with_valid_input_creates_image() {
        let image = create_test_rgb_image();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(0, 0), &Rgb([200, 150, 100]));
        assert_eq!(image.get_pixel(1, 1), &Rgb([50, 75, 25]));
    }

    #[test]
    fn create_subject_on_background_places_the_rectangle() {
        let image = create_subject_on_background(10, 8, 2..5, 3..6);
        assert_eq!(image.get_pixel(2, 3), &Rgb(SUBJECT));
        assert_eq!(image.get_pixel(4, 5), &Rgb(SUBJECT));
        assert_eq!(image.get_pixel(5, 5), &Rgb(BACKGROUND));
        assert_eq!(image.get_pixel(2, 6), &Rgb(BACKGROUND));
    }
}
