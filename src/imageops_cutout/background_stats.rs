use image::{Luma, Rgb};
use imageproc::definitions::Image;
use tracing::debug;

use crate::error::CutoutError;
use crate::imageops_cutout::config::CutoutConfig;
use crate::imageops_cutout::mask::Mask;
use crate::utils::{median_in_place, population_std};

/// Color statistics of the background, sampled from the border band
///
/// Estimated once per image and read by every downstream cue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundStats {
    /// Per-channel (R, G, B) median of the border band
    pub median: [f32; 3],
    /// Per-channel population standard deviation plus the spread floor
    pub spread: [f32; 3],
    /// Median luminance of the border band
    pub median_luminance: f32,
    /// Width of the border band in pixels
    pub margin: u32,
}

impl BackgroundStats {
    /// Estimates background statistics for `image`.
    ///
    /// # Arguments
    ///
    /// * `image` - Source pixels
    /// * `luminance` - Image-wide luminance map of `image`
    /// * `config` - Supplies the margin rule and spread floor
    ///
    /// # Errors
    ///
    /// * `CutoutError::ImageTooSmall` - either side is shorter than twice the margin
    /// * `CutoutError::DimensionMismatch` - `luminance` is not the size of `image`
    pub fn estimate(
        image: &Image<Rgb<u8>>,
        luminance: &Image<Luma<f32>>,
        config: &CutoutConfig,
    ) -> Result<Self, CutoutError> {
        let (width, height) = image.dimensions();
        if luminance.dimensions() != (width, height) {
            return Err(CutoutError::DimensionMismatch {
                expected: (width, height),
                actual: luminance.dimensions(),
            });
        }

        let margin = check_margin(width, height, config)?;
        let band = border_band(width, height, margin);

        let sample_len = band.count();
        let mut channels: [Vec<f32>; 3] = std::array::from_fn(|_| Vec::with_capacity(sample_len));
        let mut border_luminance = Vec::with_capacity(sample_len);

        for ((Rgb(rgb), Luma([luma])), &in_band) in image
            .pixels()
            .zip(luminance.pixels())
            .zip(band.as_slice())
        {
            if !in_band {
                continue;
            }
            for (channel, &value) in channels.iter_mut().zip(rgb) {
                channel.push(f32::from(value));
            }
            border_luminance.push(*luma);
        }

        let mut median = [0.0; 3];
        let mut spread = [0.0; 3];
        for (c, channel) in channels.iter_mut().enumerate() {
            // The band is never empty once the margin check has passed
            spread[c] = population_std(channel).unwrap_or(0.0) + config.spread_floor;
            median[c] = median_in_place(channel).unwrap_or(0.0);
        }
        let median_luminance = median_in_place(&mut border_luminance).unwrap_or(0.0);

        debug!(
            margin,
            samples = sample_len,
            ?median,
            ?spread,
            median_luminance,
            "estimated background statistics"
        );

        Ok(Self {
            median,
            spread,
            median_luminance,
            margin,
        })
    }
}

/// Computes the border band width and checks that it fits the image.
///
/// # Errors
///
/// * `CutoutError::ImageTooSmall` - either side is shorter than twice the margin
pub fn check_margin(width: u32, height: u32, config: &CutoutConfig) -> Result<u32, CutoutError> {
    let margin = config.margin_for(width, height);
    let band = 2 * u64::from(margin);
    if width == 0 || height == 0 || u64::from(width) < band || u64::from(height) < band {
        return Err(CutoutError::ImageTooSmall {
            width,
            height,
            margin,
        });
    }
    Ok(margin)
}

/// Mask of the outer `margin`-pixel frame on all four sides.
pub fn border_band(width: u32, height: u32, margin: u32) -> Mask {
    Mask::from_fn(width, height, |x, y| {
        x < margin
            || y < margin
            || x >= width.saturating_sub(margin)
            || y >= height.saturating_sub(margin)
    })
}
