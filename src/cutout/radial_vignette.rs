//! Color-independent cutout fallback.
//!
//! Alpha follows the distance to the image center: opaque inside
//! `inner_radius` (normalized by the center-to-corner distance), then a linear
//! fade to 0 at the corners. A frame of `edge_margin` pixels is additionally
//! capped at `edge_alpha_cap`. The result is a vignette with no relation to
//! the actual subject.

use crate::config::VignetteConfig;
use crate::error::{Error, Result};
use crate::utils::{round_to_u8, validate_non_empty_image};
use crate::PixelBuffer;
use image::ImageBuffer;

pub trait RadialVignette {
    /// Replaces alpha with the radial falloff, keeping RGB
    ///
    /// # Errors
    ///
    /// * `Error::InvalidInput` - the image is empty
    /// * `Error::InvalidParameter` - the configuration is invalid
    fn radial_vignette(&self, config: &VignetteConfig) -> Result<PixelBuffer>;
}

impl RadialVignette for PixelBuffer {
    fn radial_vignette(&self, config: &VignetteConfig) -> Result<PixelBuffer> {
        let (width, height) = self.dimensions();
        validate_non_empty_image(width, height)?;
        config.validate()?;

        let center_x = width as f32 / 2.0;
        let center_y = height as f32 / 2.0;
        let max_distance = center_x.hypot(center_y);

        let samples = self
            .enumerate_pixels()
            .flat_map(|(x, y, pixel)| {
                let distance = (x as f32 - center_x).hypot(y as f32 - center_y);
                let mut alpha = falloff(distance / max_distance, config.inner_radius);
                if near_edge(x, y, width, height, config.edge_margin) {
                    alpha = alpha.min(config.edge_alpha_cap);
                }
                [pixel[0], pixel[1], pixel[2], alpha]
            })
            .collect();

        tracing::debug!(width, height, "applied radial vignette");
        ImageBuffer::from_raw(width, height, samples).ok_or(Error::ImageBufferCreationFailed)
    }
}

/// Alpha for a normalized center distance
#[inline]
fn falloff(normalized: f32, inner_radius: f32) -> u8 {
    if normalized <= inner_radius {
        255
    } else {
        round_to_u8(255.0 * (1.0 - (normalized - inner_radius) / (1.0 - inner_radius)))
    }
}

#[inline]
fn near_edge(x: u32, y: u32, width: u32, height: u32, margin: u32) -> bool {
    x < margin
        || y < margin
        || x >= width.saturating_sub(margin)
        || y >= height.saturating_sub(margin)
}
