//! Per-pixel cues used to tell background from subject.
//!
//! Each map is an independent `Image<Luma<f32>>` computed from the source
//! pixels (and, for the color distance, the background statistics).

use image::{Luma, Rgb};
use imageproc::definitions::Image;
use imageproc::map::map_colors;

use crate::error::CutoutError;
use crate::imageops_cutout::background_stats::BackgroundStats;
use crate::imageops_cutout::config::EdgeMode;
use crate::utils::rgb_to_luminance;

/// The four cue maps of one image
#[derive(Debug, Clone)]
pub struct CueMaps {
    /// Whitened distance from the background median color
    pub color_distance: Image<Luma<f32>>,
    /// `(max - min) / max(max, 1)` over the RGB channels
    pub saturation: Image<Luma<f32>>,
    /// Grayscale luminance, 0-255
    pub luminance: Image<Luma<f32>>,
    /// Central-difference gradient magnitude of the luminance
    pub gradient: Image<Luma<f32>>,
}

impl CueMaps {
    /// Computes all cue maps, reusing an already computed luminance map.
    pub fn compute(
        image: &Image<Rgb<u8>>,
        luminance: Image<Luma<f32>>,
        stats: &BackgroundStats,
        edges: EdgeMode,
    ) -> Self {
        let gradient = gradient_map(&luminance, edges);
        Self {
            color_distance: color_distance_map(image, stats),
            saturation: saturation_map(image),
            luminance,
            gradient,
        }
    }

    /// Shared dimensions of the four maps.
    ///
    /// # Errors
    ///
    /// * `CutoutError::DimensionMismatch` - a map differs in size from
    ///   `color_distance`
    pub fn dimensions(&self) -> Result<(u32, u32), CutoutError> {
        let expected = self.color_distance.dimensions();
        for map in [&self.saturation, &self.luminance, &self.gradient] {
            if map.dimensions() != expected {
                return Err(CutoutError::DimensionMismatch {
                    expected,
                    actual: map.dimensions(),
                });
            }
        }
        Ok(expected)
    }
}

/// Grayscale luminance of every pixel.
pub fn luminance_map(image: &Image<Rgb<u8>>) -> Image<Luma<f32>> {
    map_colors(image, |Rgb([r, g, b])| {
        Luma([rgb_to_luminance(f32::from(r), f32::from(g), f32::from(b))])
    })
}

/// Saturation of every pixel.
pub fn saturation_map(image: &Image<Rgb<u8>>) -> Image<Luma<f32>> {
    map_colors(image, |Rgb(rgb)| {
        let max = f32::from(rgb.iter().copied().max().unwrap_or(0));
        let min = f32::from(rgb.iter().copied().min().unwrap_or(0));
        Luma([(max - min) / max.max(1.0)])
    })
}

/// Whitened Euclidean distance of every pixel from the background median.
///
/// Each channel difference is divided by that channel's spread before the
/// norm is taken, so the result is in "standard deviations", not RGB units.
pub fn color_distance_map(image: &Image<Rgb<u8>>, stats: &BackgroundStats) -> Image<Luma<f32>> {
    map_colors(image, |Rgb(rgb)| {
        let sum_sq: f32 = rgb
            .iter()
            .zip(stats.median.iter().zip(&stats.spread))
            .map(|(&value, (&median, &spread))| {
                let z = (f32::from(value) - median) / spread;
                z * z
            })
            .sum();
        Luma([sum_sq.sqrt()])
    })
}

/// Gradient magnitude from central differences of the luminance.
///
/// `gx = |L(x+1) - L(x-1)|`, `gy = |L(y+1) - L(y-1)|`, magnitude
/// `sqrt(gx² + gy²)`. Neighbours outside the image follow `edges`.
pub fn gradient_map(luminance: &Image<Luma<f32>>, edges: EdgeMode) -> Image<Luma<f32>> {
    let (width, height) = luminance.dimensions();
    if width == 0 || height == 0 {
        return Image::new(width, height);
    }

    Image::from_fn(width, height, |x, y| {
        let (left, right) = neighbours(x, width, edges);
        let (up, down) = neighbours(y, height, edges);

        let gx = (luminance.get_pixel(right, y)[0] - luminance.get_pixel(left, y)[0]).abs();
        let gy = (luminance.get_pixel(x, down)[0] - luminance.get_pixel(x, up)[0]).abs();
        Luma([gx.hypot(gy)])
    })
}

/// Previous and next index along one axis of length `len`.
#[inline]
fn neighbours(i: u32, len: u32, edges: EdgeMode) -> (u32, u32) {
    match edges {
        EdgeMode::Wrap => ((i + len - 1) % len, (i + 1) % len),
        EdgeMode::Clamp => (i.saturating_sub(1), (i + 1).min(len - 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_rgb_image;

    fn flat_stats(median: [f32; 3], spread: [f32; 3]) -> BackgroundStats {
        BackgroundStats {
            median,
            spread,
            median_luminance: 0.0,
            margin: 1,
        }
    }

    #[test]
    fn saturation_of_gray_is_zero_and_of_pure_color_is_one() {
        let image = create_test_rgb_image();
        let saturation = saturation_map(&image);

        // (200, 150, 100): (200 - 100) / 200
        assert!((saturation.get_pixel(0, 0)[0] - 0.5).abs() < 1e-6);

        let gray: Image<Rgb<u8>> = Image::from_pixel(1, 1, Rgb([90, 90, 90]));
        assert_eq!(saturation_map(&gray).get_pixel(0, 0)[0], 0.0);

        let red: Image<Rgb<u8>> = Image::from_pixel(1, 1, Rgb([255, 0, 0]));
        assert_eq!(saturation_map(&red).get_pixel(0, 0)[0], 1.0);

        let black: Image<Rgb<u8>> = Image::from_pixel(1, 1, Rgb([0, 0, 0]));
        assert_eq!(saturation_map(&black).get_pixel(0, 0)[0], 0.0);
    }

    #[test]
    fn color_distance_is_whitened_per_channel() {
        let image: Image<Rgb<u8>> = Image::from_pixel(1, 1, Rgb([110, 100, 100]));

        let even = color_distance_map(&image, &flat_stats([100.0; 3], [5.0; 3]));
        assert!((even.get_pixel(0, 0)[0] - 2.0).abs() < 1e-6);

        // A wide red spread shrinks the same difference
        let wide_red = color_distance_map(&image, &flat_stats([100.0; 3], [20.0, 5.0, 5.0]));
        assert!((wide_red.get_pixel(0, 0)[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn gradient_is_zero_on_flat_images() {
        let luminance: Image<Luma<f32>> = Image::from_pixel(5, 4, Luma([42.0]));
        let gradient = gradient_map(&luminance, EdgeMode::Wrap);
        assert!(gradient.pixels().all(|p| p[0] == 0.0));
    }

    #[test]
    fn gradient_uses_central_differences() {
        // Horizontal ramp 0, 10, 20, 30, 40
        let luminance: Image<Luma<f32>> = Image::from_fn(5, 3, |x, _| Luma([x as f32 * 10.0]));
        let gradient = gradient_map(&luminance, EdgeMode::Wrap);
        assert_eq!(gradient.get_pixel(2, 1)[0], 20.0);
    }

    #[test]
    fn gradient_wraps_or_clamps_at_the_edge() {
        let luminance: Image<Luma<f32>> = Image::from_fn(5, 3, |x, _| Luma([x as f32 * 10.0]));

        // Wrap: column 0 compares column 1 (10) with column 4 (40)
        let wrapped = gradient_map(&luminance, EdgeMode::Wrap);
        assert_eq!(wrapped.get_pixel(0, 1)[0], 30.0);
        assert_eq!(wrapped.get_pixel(4, 1)[0], 30.0);

        // Clamp: column 0 compares column 1 (10) with itself (0)
        let clamped = gradient_map(&luminance, EdgeMode::Clamp);
        assert_eq!(clamped.get_pixel(0, 1)[0], 10.0);
        assert_eq!(clamped.get_pixel(4, 1)[0], 10.0);
    }

    #[test]
    fn gradient_handles_single_pixel_images() {
        let luminance: Image<Luma<f32>> = Image::from_pixel(1, 1, Luma([7.0]));
        assert_eq!(gradient_map(&luminance, EdgeMode::Wrap).get_pixel(0, 0)[0], 0.0);
        assert_eq!(gradient_map(&luminance, EdgeMode::Clamp).get_pixel(0, 0)[0], 0.0);
    }

    #[test]
    fn compute_keeps_the_given_luminance() {
        let image = create_test_rgb_image();
        let luminance = luminance_map(&image);
        let cues = CueMaps::compute(
            &image,
            luminance.clone(),
            &flat_stats([0.0; 3], [1.0; 3]),
            EdgeMode::Wrap,
        );
        assert_eq!(cues.luminance, luminance);
        assert_eq!(cues.gradient.dimensions(), (2, 2));
        assert_eq!(cues.dimensions(), Ok((2, 2)));
    }
}
