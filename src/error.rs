use thiserror::Error;

/// Error type for background cutout operations
///
/// Every fallible operation of the crate reports one of these variants.
/// They are raised before any cue map is computed, so a failed call never
/// produces a partially segmented image.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CutoutError {
    /// The image is too small to hold the border band on both sides
    ///
    /// Background statistics are sampled from a `margin`-pixel frame, so both
    /// dimensions must be at least `2 * margin`.
    #[error("Image {width}x{height} is too small for a {margin}px border band on every side")]
    ImageTooSmall {
        width: u32,
        height: u32,
        margin: u32,
    },

    /// Image and mask dimensions do not match
    ///
    /// This error occurs when attempting to apply an alpha mask
    /// to an image where the dimensions don't align properly.
    #[error("Image and mask dimensions do not match: expected {expected:?}, actual {actual:?}")]
    DimensionMismatch {
        /// Expected dimensions (width, height)
        expected: (u32, u32),
        /// Actual dimensions (width, height)
        actual: (u32, u32),
    },

    /// Invalid parameter provided to the operation
    ///
    /// This error is returned when a configuration value is invalid
    /// or outside the acceptable range for the operation.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
