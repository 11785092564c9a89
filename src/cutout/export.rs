//! Turning a cutout into downloadable bytes.
//!
//! A cutout is either kept transparent (PNG) or flattened onto an opaque
//! background color first, the way a preview canvas paints the color and then
//! draws the cutout on top.

use crate::config::{BackgroundColor, ExportFormat, ExportOptions};
use crate::cutout::pipeline::encode_png;
use crate::error::{Error, Result};
use crate::utils::{round_to_u8, validate_non_empty_image};
use crate::PixelBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use imageproc::map::map_colors;
use std::io::Cursor;

/// Composites the cutout over an opaque color (source-over)
pub fn flatten(image: &PixelBuffer, background: BackgroundColor) -> RgbImage {
    let BackgroundColor { r, g, b } = background;
    map_colors(image, |pixel| {
        let alpha = f32::from(pixel[3]) / 255.0;
        let blend = |fg: u8, bg: u8| round_to_u8(f32::from(fg) * alpha + f32::from(bg) * (1.0 - alpha));
        Rgb([blend(pixel[0], r), blend(pixel[1], g), blend(pixel[2], b)])
    })
}

/// Encodes the cutout according to the export options
///
/// * PNG without background keeps the alpha channel.
/// * PNG with background is flattened and written without alpha.
/// * JPEG is always flattened, onto white when no background is given.
///
/// # Errors
///
/// * `Error::InvalidInput` - the image is empty
/// * `Error::InvalidParameter` - the options are invalid
/// * `Error::Encode` - the encoder failed
pub fn export(image: &PixelBuffer, options: &ExportOptions) -> Result<Vec<u8>> {
    validate_non_empty_image(image.width(), image.height())?;
    options.validate()?;

    tracing::debug!(
        format = ?options.format,
        background = ?options.background,
        "exporting cutout"
    );

    match (options.format, options.background) {
        (ExportFormat::Png, None) => encode_png(image),
        (ExportFormat::Png, Some(color)) => {
            let mut bytes = Vec::new();
            DynamicImage::ImageRgb8(flatten(image, color))
                .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
                .map_err(Error::Encode)?;
            Ok(bytes)
        }
        (ExportFormat::Jpeg, background) => {
            let flat = flatten(image, background.unwrap_or_default());
            let mut bytes = Vec::new();
            JpegEncoder::new_with_quality(&mut bytes, options.jpeg_quality)
                .encode_image(&flat)
                .map_err(Error::Encode)?;
            Ok(bytes)
        }
    }
}
