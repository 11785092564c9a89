use crate::error::{Error, Result};
use crate::utils::validate_matching_dimensions;
use crate::{AlphaMask, PixelBuffer};
use image::{ImageBuffer, Luma};
use imageproc::map::map_colors;

/// Splitting and merging of the alpha channel of an RGBA image
///
/// The refinement stages treat alpha as an independent scalar field. This
/// trait moves alpha out of a [`PixelBuffer`] into an [`AlphaMask`] and back.
pub trait AlphaChannel {
    /// Copies the alpha channel into a standalone mask
    fn alpha_mask(&self) -> AlphaMask;

    /// Returns a new image with the RGB of `self` and the alpha of `mask`
    ///
    /// # Errors
    ///
    /// * `Error::DimensionMismatch` - image and mask sizes differ
    /// * `Error::ImageBufferCreationFailed` - the result buffer could not be built
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use imageops_cutout::{AlphaChannel, AlphaMask, PixelBuffer};
    /// use image::Luma;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let image = PixelBuffer::new(10, 10);
    /// let mask = AlphaMask::from_pixel(10, 10, Luma([255]));
    ///
    /// let opaque = image.with_alpha_mask(&mask)?;
    /// # Ok(())
    /// # }
    /// ```
    fn with_alpha_mask(&self, mask: &AlphaMask) -> Result<PixelBuffer>;
}

impl AlphaChannel for PixelBuffer {
    fn alpha_mask(&self) -> AlphaMask {
        map_colors(self, |pixel| Luma([pixel[3]]))
    }

    fn with_alpha_mask(&self, mask: &AlphaMask) -> Result<PixelBuffer> {
        validate_matching_dimensions(self.dimensions(), mask.dimensions())?;

        let samples = self
            .pixels()
            .zip(mask.pixels())
            .flat_map(|(pixel, Luma([alpha]))| [pixel[0], pixel[1], pixel[2], *alpha])
            .collect();

        ImageBuffer::from_raw(self.width(), self.height(), samples)
            .ok_or(Error::ImageBufferCreationFailed)
    }
}
