//! Internal utility functions for imageops-cutout.
//!
//! This module contains common functionality used across the cutout stages.

use crate::error::{Error, Result};
use imageproc::definitions::Clamp;

/// Rounds a floating-point value and clamps it into the `u8` range.
///
/// Negative values map to 0, values above 255 map to 255.
#[inline]
pub fn round_to_u8(value: f32) -> u8 {
    <u8 as Clamp<f32>>::clamp(value.round())
}

/// Validates that an image has non-zero dimensions.
///
/// # Arguments
///
/// * `width` - The width of the image
/// * `height` - The height of the image
///
/// # Returns
///
/// `Ok(())` if the dimensions are valid, otherwise `Error::InvalidInput`
pub fn validate_non_empty_image(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        Err(Error::InvalidInput { width, height })
    } else {
        Ok(())
    }
}

/// Validates that two images have matching dimensions.
pub fn validate_matching_dimensions(expected: (u32, u32), actual: (u32, u32)) -> Result<()> {
    if expected != actual {
        Err(Error::DimensionMismatch { expected, actual })
    } else {
        Ok(())
    }
}
