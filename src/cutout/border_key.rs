//! Background keying on the dominant border colors.
//!
//! The frame of the image is assumed to show mostly background. The most
//! frequent quantized border colors become the background set, and every pixel
//! whose color matches or lies close to one of them is made transparent.
//!
//! This is a heuristic and only suits images whose roughly uniform,
//! high-contrast background touches the frame. A subject touching the border,
//! or a background that is not among the top border colors, is misclassified.
//! No confidence score is computed.

use crate::config::KeyingConfig;
use crate::cutout::color_bucket::{ColorBucket, ColorHistogram};
use crate::error::{Error, Result};
use crate::utils::validate_non_empty_image;
use crate::PixelBuffer;
use image::{ImageBuffer, Rgba};

const OPAQUE: u8 = 255;
const TRANSPARENT: u8 = 0;

/// Border color keying for RGBA images
pub trait KeyBorderColor {
    /// Makes the pixels matching the dominant border colors transparent
    ///
    /// RGB is copied unchanged; alpha of the result is exactly 0 for
    /// background pixels and 255 for everything else.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidInput` - the image is empty
    /// * `Error::InvalidParameter` - the configuration is invalid
    fn key_border_color(&self, config: &KeyingConfig) -> Result<PixelBuffer>;
}

impl KeyBorderColor for PixelBuffer {
    fn key_border_color(&self, config: &KeyingConfig) -> Result<PixelBuffer> {
        let (width, height) = self.dimensions();
        validate_non_empty_image(width, height)?;
        config.validate()?;

        let step = config.quantization_step;
        let global = ColorHistogram::of_image(self, step);
        let border = ColorHistogram::of_border(self, step);
        let background = border.most_frequent(config.border_colors);

        tracing::debug!(
            width,
            height,
            distinct_colors = global.len(),
            border_colors = border.len(),
            background = ?background.iter().map(|b| b.rgb()).collect::<Vec<_>>(),
            "keying border colors"
        );

        let samples = self
            .pixels()
            .flat_map(|pixel| {
                let Rgba([r, g, b, _]) = *pixel;
                let alpha = if is_background([r, g, b], &background, config) {
                    TRANSPARENT
                } else {
                    OPAQUE
                };
                [r, g, b, alpha]
            })
            .collect();

        ImageBuffer::from_raw(width, height, samples).ok_or(Error::ImageBufferCreationFailed)
    }
}

#[inline]
fn is_background(rgb: [u8; 3], background: &[ColorBucket], config: &KeyingConfig) -> bool {
    let bucket = ColorBucket::quantize(rgb, config.quantization_step);
    background
        .iter()
        .any(|&bg| bg == bucket || bg.distance_to(rgb) < config.distance_threshold)
}
