//! # imageops-cutout
//!
//! Background removal for character art on near-uniform backgrounds.
//!
//! The background is characterised from the image border, candidate pixels
//! are picked by color distance, saturation, luminance and gradient, and only
//! candidates connected to the border are removed. The resulting mask becomes
//! an alpha channel with a one-to-two pixel soft edge.
//!
//! ## Example Usage
//!
//! ```no_run
//! use imageops_cutout::{segment_and_cut, CutoutConfig, Image};
//! use image::Rgb;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let image: Image<Rgb<u8>> = image::open("character.png")?.to_rgb8();
//! let cutout = segment_and_cut(&image, &CutoutConfig::default())?;
//! println!("transparent: {:.3}", cutout.transparency_ratio);
//! cutout.image.save("character-cutout.png")?;
//! # Ok(())
//! # }
//! ```

mod error;
mod imageops_cutout;
mod utils;

#[cfg(test)]
mod test_utils;

pub use error::CutoutError;
pub use imageops_cutout::alpha_compositor::{compose_alpha, transparency_ratio};
pub use imageops_cutout::apply_alpha_mask::ApplyAlphaMask;
pub use imageops_cutout::background_stats::{border_band, BackgroundStats};
pub use imageops_cutout::classifier::classify;
pub use imageops_cutout::cleanup::{
    apply_cleanup_passes, border_residue, edge_strips, lower_region_fill,
};
pub use imageops_cutout::config;
pub use imageops_cutout::config::{
    CueThresholds, CutoutConfig, EdgeMode, LowerRegionFill, StripPass,
};
pub use imageops_cutout::cue_maps::{
    color_distance_map, gradient_map, luminance_map, saturation_map, CueMaps,
};
pub use imageops_cutout::flood_fill::flood_fill_from_border;
pub use imageops_cutout::mask::Mask;
pub use imageops_cutout::segment::{
    segment, segment_and_cut, BackgroundCutout, Cutout, Segmentation,
};

pub use imageproc::definitions::Image;
