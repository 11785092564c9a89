//! Test utilities for imageops-cutout
//!
//! This module provides common fixtures for testing the cutout stages.
//! It is only compiled when running tests.

use crate::PixelBuffer;
use image::{ImageBuffer, ImageFormat, Rgba};
use std::io::Cursor;

/// Creates a 2x2 RGBA image with known pixel values:
/// - (0,0): [200, 150, 100, 255] (opaque)
/// - (1,0): [100, 200, 150, 128] (semi-transparent)
/// - (0,1): [150, 100, 200, 64]  (more transparent)
/// - (1,1): [50, 75, 25, 0]      (fully transparent)
pub fn create_test_rgba_image() -> PixelBuffer {
    let mut image: PixelBuffer = ImageBuffer::new(2, 2);
    image.put_pixel(0, 0, Rgba([200, 150, 100, 255]));
    image.put_pixel(1, 0, Rgba([100, 200, 150, 128]));
    image.put_pixel(0, 1, Rgba([150, 100, 200, 64]));
    image.put_pixel(1, 1, Rgba([50, 75, 25, 0]));
    image
}

/// Creates an image filled with a single color
pub fn create_uniform_image(width: u32, height: u32, color: Rgba<u8>) -> PixelBuffer {
    ImageBuffer::from_pixel(width, height, color)
}

/// Creates an image with a square of `foreground` on `background`
///
/// `square` is `(x, y, side)` of the top-left corner and the side length.
pub fn create_square_on_background(
    width: u32,
    height: u32,
    background: Rgba<u8>,
    square: (u32, u32, u32),
    foreground: Rgba<u8>,
) -> PixelBuffer {
    let (sx, sy, side) = square;
    ImageBuffer::from_fn(width, height, |x, y| {
        if (sx..sx + side).contains(&x) && (sy..sy + side).contains(&y) {
            foreground
        } else {
            background
        }
    })
}

/// Encodes an image as PNG bytes for decode tests
pub fn encode_test_png(image: &PixelBuffer) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("PNG encoding of a test image");
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_test_rgba_image_with_valid_input_creates_image() {
        let image = create_test_rgba_image();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(0, 0), &Rgba([200, 150, 100, 255]));
        assert_eq!(image.get_pixel(1, 1), &Rgba([50, 75, 25, 0]));
    }

    #[test]
    fn create_square_on_background_places_square() {
        let image = create_square_on_background(
            6,
            6,
            Rgba([0, 0, 0, 255]),
            (2, 1, 3),
            Rgba([9, 9, 9, 255]),
        );
        assert_eq!(image.get_pixel(2, 1), &Rgba([9, 9, 9, 255]));
        assert_eq!(image.get_pixel(4, 3), &Rgba([9, 9, 9, 255]));
        assert_eq!(image.get_pixel(5, 3), &Rgba([0, 0, 0, 255]));
        assert_eq!(image.get_pixel(2, 4), &Rgba([0, 0, 0, 255]));
    }
}
