//! Border-seeded background removal.
//!
//! ## Overview
//!
//! The pipeline assumes the background touches the image border and differs
//! from the subject in color, saturation or texture:
//!
//! 1. **Background statistics** are sampled from the outer border band.
//! 2. **Cue maps** measure, per pixel, whitened color distance to the
//!    background, saturation, luminance and gradient magnitude.
//! 3. **Candidates** are pixels where every cue looks like background.
//! 4. **Flood fill** keeps only candidates connected to the border, so
//!    background-colored regions enclosed by the subject are kept.
//! 5. **Cleanup passes** add residue on the frame, in the top/bottom strips
//!    and, when enabled, a relaxed fill of the lower region.
//! 6. **Alpha** is a hard matte softened by a small Gaussian and clamped back
//!    toward 0/255; the RGB channels are never touched.
//!
//! ## Usage
//!
//! ```no_run
//! use imageops_cutout::{BackgroundCutout, CutoutConfig, Image};
//! use image::Rgb;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let image: Image<Rgb<u8>> = Image::new(640, 960);
//! let config = CutoutConfig::default().with_lower_region_relaxed_fill(true);
//! let cutout = image.cut_out_background(&config)?;
//! # Ok(())
//! # }
//! ```

use image::{Luma, Rgb, Rgba};
use imageproc::definitions::Image;
use tracing::debug;

use crate::error::CutoutError;
use crate::imageops_cutout::alpha_compositor::{compose_alpha, transparency_ratio};
use crate::imageops_cutout::apply_alpha_mask::ApplyAlphaMask;
use crate::imageops_cutout::background_stats::{check_margin, BackgroundStats};
use crate::imageops_cutout::classifier::classify;
use crate::imageops_cutout::cleanup::apply_cleanup_passes;
use crate::imageops_cutout::config::CutoutConfig;
use crate::imageops_cutout::cue_maps::{luminance_map, CueMaps};
use crate::imageops_cutout::flood_fill::flood_fill_from_border;
use crate::imageops_cutout::mask::Mask;

/// Every intermediate mask of one segmentation run
#[derive(Debug, Clone)]
pub struct Segmentation {
    pub stats: BackgroundStats,
    /// Raw classifier output, before connectivity
    pub candidates: Mask,
    /// Candidates reachable from the border
    pub connected: Mask,
    /// Final background mask after the cleanup passes
    pub background: Mask,
}

/// Result of a full cutout
#[derive(Debug, Clone)]
pub struct Cutout {
    /// Source RGB with the computed alpha
    pub image: Image<Rgba<u8>>,
    pub alpha: Image<Luma<u8>>,
    /// Fraction of pixels with alpha below the background ceiling
    pub transparency_ratio: f64,
}

/// Runs statistics, cues, classification, flood fill and cleanup.
///
/// # Errors
///
/// * `CutoutError::InvalidParameter` - `config` fails validation
/// * `CutoutError::ImageTooSmall` - the image cannot hold the border band
pub fn segment(
    image: &Image<Rgb<u8>>,
    config: &CutoutConfig,
) -> Result<Segmentation, CutoutError> {
    config.validate()?;
    let (width, height) = image.dimensions();
    check_margin(width, height, config)?;

    let luminance = luminance_map(image);
    let stats = BackgroundStats::estimate(image, &luminance, config)?;
    let cues = CueMaps::compute(image, luminance, &stats, config.gradient_edges);

    let candidates = classify(&cues, &stats, &config.primary)?;
    let connected = flood_fill_from_border(&candidates);

    let mut background = connected.clone();
    apply_cleanup_passes(&mut background, &cues, &stats, config)?;

    debug!(
        width,
        height,
        candidates = candidates.count(),
        connected = connected.count(),
        background = background.count(),
        "segmented background"
    );

    Ok(Segmentation {
        stats,
        candidates,
        connected,
        background,
    })
}

/// Removes the border-connected background of `image`.
///
/// Pure function: the input is not modified and nothing is read from or
/// written to disk.
///
/// # Errors
///
/// * `CutoutError::InvalidParameter` - `config` fails validation
/// * `CutoutError::ImageTooSmall` - the image cannot hold the border band
pub fn segment_and_cut(
    image: &Image<Rgb<u8>>,
    config: &CutoutConfig,
) -> Result<Cutout, CutoutError> {
    let segmentation = segment(image, config)?;
    let alpha = compose_alpha(&segmentation.background, config);
    let ratio = transparency_ratio(&alpha, config.background_ceiling);
    debug!(transparency_ratio = ratio, "composed alpha");

    let rgba = image.clone().apply_alpha_mask(&alpha)?;
    Ok(Cutout {
        image: rgba,
        alpha,
        transparency_ratio: ratio,
    })
}

/// Trait for removing a uniform, border-touching background from RGB images
pub trait BackgroundCutout {
    /// Returns the image with its background made transparent
    ///
    /// # Errors
    ///
    /// See [`segment_and_cut`].
    fn cut_out_background(&self, config: &CutoutConfig)
        -> Result<Image<Rgba<u8>>, CutoutError>;
}

impl BackgroundCutout for Image<Rgb<u8>> {
    fn cut_out_background(
        &self,
        config: &CutoutConfig,
    ) -> Result<Image<Rgba<u8>>, CutoutError> {
        segment_and_cut(self, config).map(|cutout| cutout.image)
    }
}
