//! Internal utility functions for imageops-cutout.
//!
//! This module contains numeric helpers shared by the segmentation stages.

/// ITU-R BT.601 luma weights for R, G and B.
pub const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Converts an RGB triple to grayscale luminance on the 0-255 scale.
#[inline]
pub fn rgb_to_luminance(red: f32, green: f32, blue: f32) -> f32 {
    LUMA_WEIGHTS[0] * red + LUMA_WEIGHTS[1] * green + LUMA_WEIGHTS[2] * blue
}

/// Computes the median of a sample, reordering it in place.
///
/// For an even number of values the two middle values are averaged.
///
/// # Returns
///
/// `None` if the sample is empty
pub fn median_in_place(values: &mut [f32]) -> Option<f32> {
    let len = values.len();
    if len == 0 {
        return None;
    }

    let mid = len / 2;
    let (lower, upper_mid, _) = values.select_nth_unstable_by(mid, f32::total_cmp);
    let upper_mid = *upper_mid;

    if len % 2 == 1 {
        return Some(upper_mid);
    }

    // The lower half is unordered; its maximum is the other middle value.
    let lower_mid = lower.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    Some((lower_mid + upper_mid) / 2.0)
}

/// Computes the population (ddof = 0) standard deviation of a sample.
///
/// # Returns
///
/// `None` if the sample is empty
pub fn population_std(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }

    let count = values.len() as f64;
    let mean = values.iter().map(|&v| f64::from(v)).sum::<f64>() / count;
    let variance = values
        .iter()
        .map(|&v| {
            let diff = f64::from(v) - mean;
            diff * diff
        })
        .sum::<f64>()
        / count;

    Some(variance.sqrt() as f32)
}
