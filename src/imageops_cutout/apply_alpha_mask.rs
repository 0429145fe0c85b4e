use image::{GenericImageView, Luma, Pixel, Primitive, Rgb, Rgba};
use imageproc::{definitions::Image, map::map_colors2};

use crate::error::CutoutError;

/// Trait providing functionality to attach an alpha matte to an RGB image
///
/// The color channels are copied unchanged; only the alpha channel comes
/// from the matte. This consumes the original image.
pub trait ApplyAlphaMask {
    type Mask: GenericImageView<Pixel = Luma<Self::Subpixel>>;
    type Subpixel: Primitive;
    /// Applies the specified matte to the image and generates an image with alpha channel
    ///
    /// # Arguments
    ///
    /// * `mask` - The alpha matte to apply (grayscale image)
    ///
    /// # Returns
    ///
    /// RGBA image with added alpha channel
    ///
    /// # Errors
    ///
    /// * `CutoutError::DimensionMismatch` - When image and matte dimensions don't match
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use imageops_cutout::{Image, ApplyAlphaMask};
    /// use image::{ImageBuffer, Rgb, Luma};
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// // RGB image and matte must have the same dimensions
    /// let rgb_image: Image<Rgb<u8>> = ImageBuffer::new(10, 10);
    /// let mask: Image<Luma<u8>> = ImageBuffer::new(10, 10);
    ///
    /// let rgba_image = rgb_image.apply_alpha_mask(&mask)?;
    /// # Ok(())
    /// # }
    /// ```
    fn apply_alpha_mask(
        self,
        mask: &Self::Mask,
    ) -> Result<Image<Rgba<Self::Subpixel>>, CutoutError>
    where
        Rgba<Self::Subpixel>: Pixel<Subpixel = Self::Subpixel>;
}

impl<S> ApplyAlphaMask for Image<Rgb<S>>
where
    Rgb<S>: Pixel<Subpixel = S>,
    S: Primitive,
{
    type Mask = Image<Luma<S>>;
    type Subpixel = S;

    fn apply_alpha_mask(
        self,
        mask: &Self::Mask,
    ) -> Result<Image<Rgba<Self::Subpixel>>, CutoutError>
    where
        Rgba<Self::Subpixel>: Pixel<Subpixel = Self::Subpixel>,
    {
        validate_dimensions(&self, mask)?;

        let result = map_colors2(&self, mask, |Rgb([red, green, blue]), Luma([alpha])| {
            Rgba([red, green, blue, alpha])
        });

        Ok(result)
    }
}

/// Checks that the matte covers the image exactly
#[inline]
fn validate_dimensions<I1, I2>(image: &I1, mask: &I2) -> Result<(), CutoutError>
where
    I1: GenericImageView,
    I2: GenericImageView,
{
    let expected = image.dimensions();
    let actual = mask.dimensions();
    if expected != actual {
        return Err(CutoutError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
