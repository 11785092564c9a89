//! Sobel gradient magnitude over unweighted luma.
//!
//! The detector is an available operation of the pipeline, but no removal
//! strategy consumes its output. Callers that need edge data invoke it
//! directly.

use crate::error::Result;
use crate::utils::{round_to_u8, validate_non_empty_image};
use crate::PixelBuffer;
use image::{ImageBuffer, Luma, Rgba};
use imageproc::definitions::Image;
use imageproc::map::map_colors;
use itertools::iproduct;

const SOBEL_X: [f32; 9] = [-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0];
const SOBEL_Y: [f32; 9] = [-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0];

/// Edge detection for RGBA images
pub trait DetectEdges {
    /// Computes the Sobel gradient magnitude of the image
    ///
    /// The output has the same dimensions as the input. Every pixel holds the
    /// magnitude in R, G and B with A = 255. Pixels on the outermost rows and
    /// columns have no full 3×3 window and are written as `Rgba([0, 0, 0, 255])`,
    /// so the whole map is opaque.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidInput` - the image is empty
    fn sobel_edges(&self) -> Result<PixelBuffer>;
}

impl DetectEdges for PixelBuffer {
    fn sobel_edges(&self) -> Result<PixelBuffer> {
        let (width, height) = self.dimensions();
        validate_non_empty_image(width, height)?;

        let gray = unweighted_luma(self);
        let mut output = ImageBuffer::from_pixel(width, height, Rgba([0, 0, 0, 255]));

        for (y, x) in iproduct!(1..height.saturating_sub(1), 1..width.saturating_sub(1)) {
            let (gx, gy) = sobel_at(&gray, x, y);
            let magnitude = round_to_u8(gx.hypot(gy));
            output.put_pixel(x, y, Rgba([magnitude, magnitude, magnitude, 255]));
        }

        tracing::debug!(width, height, "computed sobel edge map");
        Ok(output)
    }
}

/// Grayscale as the plain mean of R, G and B, kept fractional
fn unweighted_luma(image: &PixelBuffer) -> Image<Luma<f32>> {
    map_colors(image, |pixel| {
        let sum = f32::from(pixel[0]) + f32::from(pixel[1]) + f32::from(pixel[2]);
        Luma([sum / 3.0])
    })
}

/// Horizontal and vertical gradients at an interior pixel
#[inline]
fn sobel_at(gray: &Image<Luma<f32>>, x: u32, y: u32) -> (f32, f32) {
    iproduct!(0..3u32, 0..3u32).fold((0.0, 0.0), |(gx, gy), (ky, kx)| {
        let value = gray.get_pixel(x + kx - 1, y + ky - 1)[0];
        let k = (ky * 3 + kx) as usize;
        (gx + value * SOBEL_X[k], gy + value * SOBEL_Y[k])
    })
}
