use crate::cutout::alpha_channel::AlphaChannel;
use crate::error::Result;
use crate::utils::{round_to_u8, validate_non_empty_image};
use crate::{AlphaMask, PixelBuffer};
use image::Luma;
use itertools::iproduct;

/// Gaussian-weighted smoothing restricted to alpha
///
/// Each output value is the weighted mean of the alpha values inside a disc of
/// the given radius, with weight `exp(-d² / (2r²))` for an offset at distance
/// `d ≤ r`. The mean is normalized by the weights actually used, so the result
/// always stays within the local minimum and maximum.
///
/// Pixels closer than `radius` to the frame are copied unchanged, so a radius
/// of at least half the smaller dimension returns the input as is.
pub trait SmoothAlpha {
    type Output;

    /// # Errors
    ///
    /// * `Error::InvalidInput` - the image is empty
    fn smooth_alpha(&self, radius: u32) -> Result<Self::Output>;
}

impl SmoothAlpha for AlphaMask {
    type Output = Self;

    fn smooth_alpha(&self, radius: u32) -> Result<Self::Output> {
        let (width, height) = self.dimensions();
        validate_non_empty_image(width, height)?;

        // no pixel lies outside the margin
        if radius == 0 || radius.saturating_mul(2) >= width.min(height) {
            return Ok(self.clone());
        }

        let kernel = disc_kernel(radius);
        let mut output = self.clone();

        let x_range = radius..width.saturating_sub(radius);
        let y_range = radius..height.saturating_sub(radius);
        for (y, x) in iproduct!(y_range, x_range) {
            let (sum, weight_sum) =
                kernel
                    .iter()
                    .fold((0.0f32, 0.0f32), |(sum, weight_sum), &(dx, dy, weight)| {
                        let alpha = self.get_pixel(offset(x, dx), offset(y, dy))[0];
                        (sum + f32::from(alpha) * weight, weight_sum + weight)
                    });
            output.put_pixel(x, y, Luma([round_to_u8(sum / weight_sum)]));
        }

        Ok(output)
    }
}

impl SmoothAlpha for PixelBuffer {
    type Output = Self;

    fn smooth_alpha(&self, radius: u32) -> Result<Self::Output> {
        let smoothed = self.alpha_mask().smooth_alpha(radius)?;
        self.with_alpha_mask(&smoothed)
    }
}

/// Offsets and weights of the circular footprint
fn disc_kernel(radius: u32) -> Vec<(i32, i32, f32)> {
    let r = radius as i32;
    let two_sigma_sq = 2.0 * (radius as f32).powi(2);
    iproduct!(-r..=r, -r..=r)
        .filter_map(|(dy, dx)| {
            let d_sq = (dx * dx + dy * dy) as f32;
            (d_sq.sqrt() <= radius as f32).then(|| (dx, dy, (-d_sq / two_sigma_sq).exp()))
        })
        .collect()
}

#[inline]
fn offset(base: u32, delta: i32) -> u32 {
    base.saturating_add_signed(delta)
}
