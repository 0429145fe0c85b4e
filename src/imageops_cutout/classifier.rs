use itertools::izip;

use crate::error::CutoutError;
use crate::imageops_cutout::background_stats::BackgroundStats;
use crate::imageops_cutout::config::CueThresholds;
use crate::imageops_cutout::cue_maps::CueMaps;
use crate::imageops_cutout::mask::Mask;

/// Classifies every pixel against `thresholds`.
///
/// A pixel is a candidate only if every checked cue is strictly below its
/// bound; one foreground-like cue is enough to veto it.
///
/// # Errors
///
/// * `CutoutError::DimensionMismatch` - the cue maps differ in size
pub fn classify(
    cues: &CueMaps,
    stats: &BackgroundStats,
    thresholds: &CueThresholds,
) -> Result<Mask, CutoutError> {
    let (width, height) = cues.dimensions()?;

    let data = izip!(
        cues.color_distance.iter(),
        cues.saturation.iter(),
        cues.luminance.iter(),
        cues.gradient.iter()
    )
    .map(|(&distance, &saturation, &luminance, &gradient)| {
        distance < thresholds.color_distance
            && saturation < thresholds.saturation
            && thresholds
                .luminance_delta
                .map_or(true, |max| (luminance - stats.median_luminance).abs() < max)
            && thresholds.gradient.map_or(true, |max| gradient < max)
    })
    .collect();

    Mask::from_vec(width, height, data).ok_or(CutoutError::DimensionMismatch {
        expected: (width, height),
        actual: (width, height),
    })
}
