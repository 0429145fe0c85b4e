//! Relaxed passes that pick up background left behind by the primary fill.
//!
//! Every pass only adds pixels to the background mask.

use tracing::debug;

use crate::error::CutoutError;
use crate::imageops_cutout::background_stats::{border_band, BackgroundStats};
use crate::imageops_cutout::classifier::classify;
use crate::imageops_cutout::config::CutoutConfig;
use crate::imageops_cutout::cue_maps::CueMaps;
use crate::imageops_cutout::flood_fill::flood_fill_from_border;
use crate::imageops_cutout::mask::Mask;

/// Pixels in the border band that pass the border residue thresholds.
///
/// No connectivity or gradient check: this catches leftovers sitting
/// directly on the frame.
///
/// # Errors
///
/// * `CutoutError::DimensionMismatch` - the cue maps differ in size
pub fn border_residue(
    cues: &CueMaps,
    stats: &BackgroundStats,
    config: &CutoutConfig,
) -> Result<Mask, CutoutError> {
    let mut residue = classify(cues, stats, &config.border_residue)?;
    let (width, height) = residue.dimensions();
    intersect(&mut residue, &border_band(width, height, stats.margin));
    Ok(residue)
}

/// Pixels in the top and bottom strips that pass the strip thresholds.
///
/// # Errors
///
/// * `CutoutError::DimensionMismatch` - the cue maps differ in size
pub fn edge_strips(
    cues: &CueMaps,
    stats: &BackgroundStats,
    config: &CutoutConfig,
) -> Result<Mask, CutoutError> {
    let mut strips = classify(cues, stats, &config.strip.thresholds)?;
    let (width, height) = strips.dimensions();
    let strip = config.strip.height_for(height);
    let rows = Mask::from_fn(width, height, |_, y| {
        y < strip || y >= height.saturating_sub(strip)
    });

    intersect(&mut strips, &rows);
    Ok(strips)
}

/// Relaxed candidates in the lower region, flood-filled from the border.
///
/// # Errors
///
/// * `CutoutError::DimensionMismatch` - the cue maps differ in size
pub fn lower_region_fill(
    cues: &CueMaps,
    stats: &BackgroundStats,
    config: &CutoutConfig,
) -> Result<Mask, CutoutError> {
    let mut relaxed = classify(cues, stats, &config.lower_region.thresholds)?;
    let (width, height) = relaxed.dimensions();
    let start = config.lower_region.start_row(height);
    let region = Mask::from_fn(width, height, |_, y| y > start);

    intersect(&mut relaxed, &region);
    Ok(flood_fill_from_border(&relaxed))
}

/// Applies every enabled cleanup pass to `mask` in order.
///
/// # Errors
///
/// * `CutoutError::DimensionMismatch` - the cue maps differ in size, or
///   `mask` does not match them
pub fn apply_cleanup_passes(
    mask: &mut Mask,
    cues: &CueMaps,
    stats: &BackgroundStats,
    config: &CutoutConfig,
) -> Result<(), CutoutError> {
    let expected = cues.dimensions()?;
    if mask.dimensions() != expected {
        return Err(CutoutError::DimensionMismatch {
            expected,
            actual: mask.dimensions(),
        });
    }
    let before = mask.count();

    mask.union_with(&border_residue(cues, stats, config)?);
    let after_residue = mask.count();

    mask.union_with(&edge_strips(cues, stats, config)?);
    let after_strips = mask.count();

    if config.lower_region_relaxed_fill {
        mask.union_with(&lower_region_fill(cues, stats, config)?);
    }

    debug!(
        border_residue = after_residue - before,
        edge_strips = after_strips - after_residue,
        lower_region = mask.count() - after_strips,
        "cleanup passes added background pixels"
    );
    Ok(())
}

fn intersect(mask: &mut Mask, region: &Mask) {
    let (width, height) = mask.dimensions();
    for y in 0..height {
        for x in 0..width {
            if mask.get(x, y) && !region.get(x, y) {
                mask.set(x, y, false);
            }
        }
    }
}
