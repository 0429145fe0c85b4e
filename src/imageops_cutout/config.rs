//! Tunables for the background cutout pipeline.
//!
//! Every numeric default is a named constant. Distances are whitened
//! (per-channel standard deviations of the border sample), saturation is the
//! HSV-style ratio in `[0, 1]`, luminance and gradient are on the 0-255 scale.
//! Lower thresholds remove less background; higher thresholds start eating
//! into pale or flat regions of the subject.

use serde::Deserialize;

use crate::error::CutoutError;

/// Smallest border band width in pixels.
pub const MIN_MARGIN: u32 = 16;
/// The border band is `min(width, height) / MARGIN_DIVISOR` wide on large images.
pub const MARGIN_DIVISOR: u32 = 22;
/// Added to each channel's border standard deviation so flat backgrounds
/// do not make the whitened distance explode.
pub const SPREAD_FLOOR: f32 = 6.5;

/// Whitened color distance below which a pixel resembles the background.
pub const PRIMARY_COLOR_DISTANCE: f32 = 1.86;
/// Saturation below which a pixel is considered grayish enough.
pub const PRIMARY_SATURATION: f32 = 0.14;
/// Maximum luminance difference from the median border luminance.
pub const PRIMARY_LUMINANCE_DELTA: f32 = 34.0;
/// Gradient magnitude above which a pixel is treated as an edge.
pub const PRIMARY_GRADIENT: f32 = 14.0;

/// Whitened distance bound on the border band; looser than the primary pass
/// because the band is assumed to be background.
pub const BORDER_RESIDUE_COLOR_DISTANCE: f32 = 2.7;
/// Saturation bound on the border band; tolerates faintly tinted frames.
pub const BORDER_RESIDUE_SATURATION: f32 = 0.24;

/// Strip height is `max(STRIP_MIN_HEIGHT, height / STRIP_HEIGHT_DIVISOR)`.
pub const STRIP_MIN_HEIGHT: u32 = 8;
/// Strips grow by one row per `STRIP_HEIGHT_DIVISOR` rows of image height.
pub const STRIP_HEIGHT_DIVISOR: u32 = 120;
/// Whitened distance bound in the top and bottom strips.
pub const STRIP_COLOR_DISTANCE: f32 = 2.5;
/// Saturation bound in the strips; between the primary and border values.
pub const STRIP_SATURATION: f32 = 0.2;
/// Gradient bound in the strips, on the 0-255 luminance scale; keeps hair
/// and shoe edges touching the frame.
pub const STRIP_GRADIENT: f32 = 18.0;

/// Rows with `y > floor(height * LOWER_REGION_START)` form the lower region.
pub const LOWER_REGION_START: f64 = 0.52;
/// Whitened distance bound of the lower-region fill; wide enough for
/// skyline and floor bands a few levels off the backdrop.
pub const LOWER_REGION_COLOR_DISTANCE: f32 = 2.45;
/// Saturation bound of the lower-region fill.
pub const LOWER_REGION_SATURATION: f32 = 0.22;
/// Gradient bound of the lower-region fill, on the 0-255 luminance scale;
/// the fill stops at real edges of the subject.
pub const LOWER_REGION_GRADIENT: f32 = 20.0;

/// Gaussian sigma, in pixels, used to soften the hard alpha.
pub const BLUR_SIGMA: f32 = 0.9;
/// Kept pixels never drop below this alpha after blurring.
pub const FOREGROUND_FLOOR: u8 = 246;
/// Removed pixels never rise above this alpha after blurring.
pub const BACKGROUND_CEILING: u8 = 12;

/// How the gradient cue looks up neighbours past the image edge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeMode {
    /// Column 0 sees the last column as its left neighbour, row 0 the last row.
    #[default]
    Wrap,
    /// Edge pixels are their own outside neighbour.
    Clamp,
}

/// Upper bounds for the per-pixel cues of one classification pass
///
/// A pixel passes when every present cue is strictly below its bound.
/// `None` skips that cue entirely.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CueThresholds {
    pub color_distance: f32,
    pub saturation: f32,
    #[serde(default)]
    pub luminance_delta: Option<f32>,
    #[serde(default)]
    pub gradient: Option<f32>,
}

impl CueThresholds {
    /// Thresholds of the primary candidate classifier.
    pub const PRIMARY: Self = Self {
        color_distance: PRIMARY_COLOR_DISTANCE,
        saturation: PRIMARY_SATURATION,
        luminance_delta: Some(PRIMARY_LUMINANCE_DELTA),
        gradient: Some(PRIMARY_GRADIENT),
    };

    /// Thresholds of the border residue pass.
    pub const BORDER_RESIDUE: Self = Self {
        color_distance: BORDER_RESIDUE_COLOR_DISTANCE,
        saturation: BORDER_RESIDUE_SATURATION,
        luminance_delta: None,
        gradient: None,
    };

    /// Thresholds of the top/bottom strip pass.
    pub const STRIP: Self = Self {
        color_distance: STRIP_COLOR_DISTANCE,
        saturation: STRIP_SATURATION,
        luminance_delta: None,
        gradient: Some(STRIP_GRADIENT),
    };

    /// Thresholds of the lower-region relaxed fill.
    pub const LOWER_REGION: Self = Self {
        color_distance: LOWER_REGION_COLOR_DISTANCE,
        saturation: LOWER_REGION_SATURATION,
        luminance_delta: None,
        gradient: Some(LOWER_REGION_GRADIENT),
    };

    fn validate(&self, pass: &str) -> Result<(), CutoutError> {
        let bounds = [
            ("color_distance", Some(self.color_distance)),
            ("saturation", Some(self.saturation)),
            ("luminance_delta", self.luminance_delta),
            ("gradient", self.gradient),
        ];

        for (name, bound) in bounds {
            if let Some(value) = bound {
                if !value.is_finite() || value <= 0.0 {
                    return Err(CutoutError::InvalidParameter(format!(
                        "{pass}.{name} must be a positive finite number, got {value}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Top/bottom strip pass settings
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct StripPass {
    pub min_height: u32,
    pub height_divisor: u32,
    pub thresholds: CueThresholds,
}

impl Default for StripPass {
    fn default() -> Self {
        Self {
            min_height: STRIP_MIN_HEIGHT,
            height_divisor: STRIP_HEIGHT_DIVISOR,
            thresholds: CueThresholds::STRIP,
        }
    }
}

impl StripPass {
    /// Strip height in rows for an image of the given height.
    #[inline]
    pub fn height_for(&self, image_height: u32) -> u32 {
        self.min_height.max(image_height / self.height_divisor)
    }
}

/// Lower-region relaxed flood fill settings
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LowerRegionFill {
    /// Fraction of the image height where the lower region begins
    pub start_fraction: f64,
    pub thresholds: CueThresholds,
}

impl Default for LowerRegionFill {
    fn default() -> Self {
        Self {
            start_fraction: LOWER_REGION_START,
            thresholds: CueThresholds::LOWER_REGION,
        }
    }
}

impl LowerRegionFill {
    /// First row index that is NOT part of the lower region.
    ///
    /// Rows with `y > start_row` belong to the region.
    #[inline]
    pub fn start_row(&self, image_height: u32) -> u32 {
        (f64::from(image_height) * self.start_fraction).floor() as u32
    }
}

/// Configuration of the whole cutout pipeline
///
/// The default reproduces the tuned behaviour for character art on
/// near-uniform backgrounds. Partial TOML documents deserialize on top of
/// the defaults.
///
/// # Examples
///
/// ```
/// use imageops_cutout::CutoutConfig;
///
/// let config = CutoutConfig::default().with_lower_region_relaxed_fill(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CutoutConfig {
    pub min_margin: u32,
    pub margin_divisor: u32,
    pub spread_floor: f32,
    pub primary: CueThresholds,
    pub border_residue: CueThresholds,
    pub strip: StripPass,
    /// Run the relaxed flood fill over the lower part of the image
    ///
    /// Meant for full-body shots whose background has a skyline band below
    /// the waist that the primary pass leaves behind.
    pub lower_region_relaxed_fill: bool,
    pub lower_region: LowerRegionFill,
    pub gradient_edges: EdgeMode,
    pub blur_sigma: f32,
    pub foreground_floor: u8,
    pub background_ceiling: u8,
}

impl Default for CutoutConfig {
    fn default() -> Self {
        Self {
            min_margin: MIN_MARGIN,
            margin_divisor: MARGIN_DIVISOR,
            spread_floor: SPREAD_FLOOR,
            primary: CueThresholds::PRIMARY,
            border_residue: CueThresholds::BORDER_RESIDUE,
            strip: StripPass::default(),
            lower_region_relaxed_fill: false,
            lower_region: LowerRegionFill::default(),
            gradient_edges: EdgeMode::default(),
            blur_sigma: BLUR_SIGMA,
            foreground_floor: FOREGROUND_FLOOR,
            background_ceiling: BACKGROUND_CEILING,
        }
    }
}

impl CutoutConfig {
    #[must_use]
    pub fn with_lower_region_relaxed_fill(mut self, enabled: bool) -> Self {
        self.lower_region_relaxed_fill = enabled;
        self
    }

    #[must_use]
    pub fn with_gradient_edges(mut self, mode: EdgeMode) -> Self {
        self.gradient_edges = mode;
        self
    }

    #[must_use]
    pub fn with_blur_sigma(mut self, sigma: f32) -> Self {
        self.blur_sigma = sigma;
        self
    }

    /// Parses a TOML document on top of the defaults.
    ///
    /// # Errors
    ///
    /// * `CutoutError::InvalidParameter` - the document is malformed or a
    ///   value fails [`CutoutConfig::validate`]
    pub fn from_toml_str(document: &str) -> Result<Self, CutoutError> {
        let config: Self = toml::from_str(document)
            .map_err(|e| CutoutError::InvalidParameter(format!("config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Border band width for an image of the given size.
    #[inline]
    pub fn margin_for(&self, width: u32, height: u32) -> u32 {
        self.min_margin.max(width.min(height) / self.margin_divisor)
    }

    /// Checks that every value is usable by the pipeline.
    ///
    /// # Errors
    ///
    /// * `CutoutError::InvalidParameter` - naming the first offending field
    pub fn validate(&self) -> Result<(), CutoutError> {
        if self.min_margin == 0 {
            return Err(invalid("min_margin must be at least 1"));
        }
        if self.margin_divisor == 0 {
            return Err(invalid("margin_divisor must be at least 1"));
        }
        if self.strip.height_divisor == 0 {
            return Err(invalid("strip.height_divisor must be at least 1"));
        }
        if !self.spread_floor.is_finite() || self.spread_floor <= 0.0 {
            return Err(invalid("spread_floor must be a positive finite number"));
        }
        if !self.blur_sigma.is_finite() || self.blur_sigma <= 0.0 {
            return Err(invalid("blur_sigma must be a positive finite number"));
        }
        if !(0.0..=1.0).contains(&self.lower_region.start_fraction) {
            return Err(invalid("lower_region.start_fraction must lie in [0, 1]"));
        }
        if self.background_ceiling >= self.foreground_floor {
            return Err(invalid(
                "background_ceiling must be lower than foreground_floor",
            ));
        }

        self.primary.validate("primary")?;
        self.border_residue.validate("border_residue")?;
        self.strip.thresholds.validate("strip.thresholds")?;
        self.lower_region.thresholds.validate("lower_region.thresholds")
    }
}

fn invalid(message: &str) -> CutoutError {
    CutoutError::InvalidParameter(message.to_owned())
}
