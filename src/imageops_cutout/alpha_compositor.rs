use image::Luma;
use imageproc::definitions::Image;
use imageproc::filter::gaussian_blur_f32;
use imageproc::map::{map_colors, map_colors2};

use crate::imageops_cutout::config::CutoutConfig;
use crate::imageops_cutout::mask::Mask;

/// Turns a background mask into an alpha matte with a thin soft edge.
///
/// The hard matte (0 for background, 255 for subject) is blurred with
/// `config.blur_sigma`, then pushed back toward its hard value: subject
/// pixels keep at least `foreground_floor`, background pixels at most
/// `background_ceiling`. Only pixels next to a mask transition land away
/// from 0 or 255.
///
/// `config` must have passed [`CutoutConfig::validate`].
pub fn compose_alpha(mask: &Mask, config: &CutoutConfig) -> Image<Luma<u8>> {
    let hard = mask.to_alpha(u8::MAX, 0);
    // Blur in f32 so flat regions round back to exactly 0 and 255
    let hard_f32: Image<Luma<f32>> = map_colors(&hard, |Luma([a])| Luma([f32::from(a)]));
    let soft = gaussian_blur_f32(&hard_f32, config.blur_sigma);

    let floor = config.foreground_floor;
    let ceiling = config.background_ceiling;
    map_colors2(&hard, &soft, |Luma([hard]), Luma([soft])| {
        let soft = soft.round().clamp(0.0, 255.0) as u8;
        Luma([if hard == u8::MAX {
            soft.max(floor)
        } else {
            soft.min(ceiling)
        }])
    })
}

/// Fraction of pixels whose alpha is strictly below `threshold`.
///
/// Returns `0.0` for an empty matte.
pub fn transparency_ratio(alpha: &Image<Luma<u8>>, threshold: u8) -> f64 {
    let total = alpha.len();
    if total == 0 {
        return 0.0;
    }
    let transparent = alpha.iter().filter(|&&a| a < threshold).count();
    transparent as f64 / total as f64
}
