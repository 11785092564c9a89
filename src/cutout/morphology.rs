//! Morphological opening of the alpha channel.
//!
//! Erosion takes the 3×3 minimum, dilation the 3×3 maximum of the eroded
//! field. Together they remove isolated specks narrower than the structuring
//! element and smooth jagged boundaries. Pixels on the 1-pixel frame keep
//! their input alpha.

use crate::cutout::alpha_channel::AlphaChannel;
use crate::error::Result;
use crate::utils::validate_non_empty_image;
use crate::{AlphaMask, PixelBuffer};
use image::Luma;
use itertools::iproduct;

/// Morphological opening of alpha values
pub trait MorphologicalOpening {
    /// Output of the opening
    type Output;

    /// Applies erosion followed by dilation with a 3×3 square element
    ///
    /// # Errors
    ///
    /// * `Error::InvalidInput` - the image is empty
    fn open_alpha(&self) -> Result<Self::Output>;
}

impl MorphologicalOpening for AlphaMask {
    type Output = Self;

    fn open_alpha(&self) -> Result<Self::Output> {
        validate_non_empty_image(self.width(), self.height())?;
        let eroded = erode(self);
        Ok(dilate(&eroded))
    }
}

impl MorphologicalOpening for PixelBuffer {
    type Output = Self;

    fn open_alpha(&self) -> Result<Self::Output> {
        let opened = self.alpha_mask().open_alpha()?;
        self.with_alpha_mask(&opened)
    }
}

/// 3×3 minimum over interior pixels
pub fn erode(mask: &AlphaMask) -> AlphaMask {
    apply_interior(mask, |window| window.into_iter().min().unwrap_or(0))
}

/// 3×3 maximum over interior pixels
pub fn dilate(mask: &AlphaMask) -> AlphaMask {
    apply_interior(mask, |window| window.into_iter().max().unwrap_or(0))
}

fn apply_interior<F>(mask: &AlphaMask, reduce: F) -> AlphaMask
where
    F: Fn([u8; 9]) -> u8,
{
    let (width, height) = mask.dimensions();
    let mut output = mask.clone();

    for (y, x) in iproduct!(1..height.saturating_sub(1), 1..width.saturating_sub(1)) {
        let mut window = [0u8; 9];
        for (slot, (dy, dx)) in window.iter_mut().zip(iproduct!(0..3u32, 0..3u32)) {
            *slot = mask.get_pixel(x + dx - 1, y + dy - 1)[0];
        }
        output.put_pixel(x, y, Luma([reduce(window)]));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_square_on_background;
    use image::{ImageBuffer, Rgba};

    fn block_mask(size: u32, start: u32, side: u32) -> AlphaMask {
        ImageBuffer::from_fn(size, size, |x, y| {
            let inside = (start..start + side).contains(&x) && (start..start + side).contains(&y);
            Luma([if inside { 255 } else { 0 }])
        })
    }

    #[test]
    fn opening_removes_isolated_speck() {
        let mut mask = AlphaMask::from_pixel(7, 7, Luma([0]));
        mask.put_pixel(3, 3, Luma([255]));

        let opened = mask.open_alpha().unwrap();
        assert!(opened.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn erosion_widens_hole_and_dilation_restores_it() {
        let mut mask = AlphaMask::from_pixel(9, 9, Luma([255]));
        mask.put_pixel(4, 4, Luma([0]));

        let eroded = erode(&mask);
        assert_eq!(eroded.get_pixel(3, 3)[0], 0);
        assert_eq!(eroded.get_pixel(5, 5)[0], 0);
        assert_eq!(eroded.get_pixel(1, 1)[0], 255);

        assert_eq!(dilate(&eroded), mask);
    }

    #[test]
    fn opening_preserves_large_block() {
        let mask = block_mask(12, 3, 6);
        let opened = mask.open_alpha().unwrap();
        assert_eq!(opened, mask);
    }

    #[test]
    fn opening_is_idempotent() {
        let mut mask = block_mask(16, 4, 7);
        mask.put_pixel(13, 2, Luma([255]));
        mask.put_pixel(6, 6, Luma([0]));

        let once = mask.open_alpha().unwrap();
        let twice = once.open_alpha().unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn frame_keeps_input_alpha() {
        let mut mask = AlphaMask::from_pixel(5, 5, Luma([0]));
        mask.put_pixel(0, 2, Luma([255]));
        mask.put_pixel(4, 4, Luma([255]));

        let opened = mask.open_alpha().unwrap();
        assert_eq!(opened.get_pixel(0, 2)[0], 255);
        assert_eq!(opened.get_pixel(4, 4)[0], 255);
    }

    #[test]
    fn rgba_opening_leaves_rgb_untouched() {
        let mut image = create_square_on_background(
            10,
            10,
            Rgba([10, 20, 30, 0]),
            (3, 3, 4),
            Rgba([200, 100, 50, 255]),
        );
        image.put_pixel(7, 1, Rgba([1, 2, 3, 255]));

        let opened = image.open_alpha().unwrap();
        for (before, after) in image.pixels().zip(opened.pixels()) {
            assert_eq!(before.0[..3], after.0[..3]);
        }
        assert_eq!(opened.get_pixel(7, 1)[3], 0);
        assert_eq!(opened.get_pixel(4, 4)[3], 255);
    }
}
