use crate::PixelBuffer;
use image::Rgba;
use std::collections::HashMap;

/// A quantized RGB color used as a histogram key
///
/// Each channel is floored to a multiple of the quantization step, then the
/// three channels are packed into one integer (`r << 16 | g << 8 | b`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorBucket(u32);

impl ColorBucket {
    /// Quantizes an RGB triple with the given step
    ///
    /// # Panics
    ///
    /// Panics if `step` is 0. [`KeyingConfig::validate`](crate::KeyingConfig::validate)
    /// rejects such a step before keying.
    #[inline]
    pub fn quantize(rgb: [u8; 3], step: u8) -> Self {
        let [r, g, b] = rgb.map(|c| u32::from(c / step * step));
        Self(r << 16 | g << 8 | b)
    }

    /// Quantizes the RGB part of an RGBA pixel, alpha is ignored
    #[inline]
    pub fn of_pixel(pixel: &Rgba<u8>, step: u8) -> Self {
        Self::quantize([pixel[0], pixel[1], pixel[2]], step)
    }

    /// The representative color of the bucket
    #[inline]
    pub fn rgb(self) -> [u8; 3] {
        [(self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8]
    }

    /// Euclidean distance between a raw RGB color and the bucket's representative
    #[inline]
    pub fn distance_to(self, rgb: [u8; 3]) -> f32 {
        self.rgb()
            .iter()
            .zip(rgb.iter())
            .map(|(&a, &b)| {
                let d = f32::from(a) - f32::from(b);
                d * d
            })
            .sum::<f32>()
            .sqrt()
    }
}

/// Occurrence counts of quantized colors
///
/// Buckets remember the order in which they were first seen, so ranking is
/// deterministic: buckets with equal counts rank in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct ColorHistogram {
    index: HashMap<ColorBucket, usize>,
    entries: Vec<(ColorBucket, u32)>,
}

impl ColorHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Histogram of every pixel of the image in row-major order
    ///
    /// # Panics
    ///
    /// Panics if `step` is 0, see [`ColorBucket::quantize`].
    pub fn of_image(image: &PixelBuffer, step: u8) -> Self {
        let mut histogram = Self::new();
        for pixel in image.pixels() {
            histogram.add(ColorBucket::of_pixel(pixel, step));
        }
        histogram
    }

    /// Histogram of the frame pixels of the image
    ///
    /// Visits, for every column, the top then the bottom pixel, and then, for
    /// every row, the left then the right pixel. Corners are therefore counted
    /// twice, and a single row or column is counted from both sides.
    ///
    /// # Panics
    ///
    /// Panics if `step` is 0 and the image is not empty, see
    /// [`ColorBucket::quantize`].
    pub fn of_border(image: &PixelBuffer, step: u8) -> Self {
        let (width, height) = image.dimensions();
        let mut histogram = Self::new();
        if width == 0 || height == 0 {
            return histogram;
        }

        for x in 0..width {
            histogram.add(ColorBucket::of_pixel(image.get_pixel(x, 0), step));
            histogram.add(ColorBucket::of_pixel(image.get_pixel(x, height - 1), step));
        }
        for y in 0..height {
            histogram.add(ColorBucket::of_pixel(image.get_pixel(0, y), step));
            histogram.add(ColorBucket::of_pixel(image.get_pixel(width - 1, y), step));
        }
        histogram
    }

    pub fn add(&mut self, bucket: ColorBucket) {
        match self.index.get(&bucket) {
            Some(&i) => {
                if let Some(entry) = self.entries.get_mut(i) {
                    entry.1 += 1;
                }
            }
            None => {
                self.index.insert(bucket, self.entries.len());
                self.entries.push((bucket, 1));
            }
        }
    }

    pub fn count(&self, bucket: ColorBucket) -> u32 {
        self.index
            .get(&bucket)
            .and_then(|&i| self.entries.get(i))
            .map_or(0, |&(_, count)| count)
    }

    /// Number of distinct buckets
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `n` most frequent buckets, most frequent first
    pub fn most_frequent(&self, n: usize) -> Vec<ColorBucket> {
        let mut ranked = self.entries.clone();
        // stable: ties keep first-seen order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().take(n).map(|(bucket, _)| bucket).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageBuffer;

    #[test]
    fn quantize_floors_to_step() {
        assert_eq!(
            ColorBucket::quantize([255, 255, 255], 32).rgb(),
            [224, 224, 224]
        );
        assert_eq!(ColorBucket::quantize([31, 32, 63], 32).rgb(), [0, 32, 32]);
        assert_eq!(ColorBucket::quantize([0, 255, 0], 32).rgb(), [0, 224, 0]);
        assert_eq!(ColorBucket::quantize([17, 200, 99], 1).rgb(), [17, 200, 99]);
    }

    #[test]
    #[should_panic(expected = "divide by zero")]
    fn zero_step_panics() {
        let image: PixelBuffer = ImageBuffer::from_pixel(2, 2, Rgba([10, 20, 30, 255]));
        let _ = ColorHistogram::of_image(&image, 0);
    }

    #[test]
    fn nearby_colors_share_a_bucket() {
        assert_eq!(
            ColorBucket::quantize([230, 240, 250], 32),
            ColorBucket::quantize([255, 224, 231], 32)
        );
        assert_ne!(
            ColorBucket::quantize([223, 240, 250], 32),
            ColorBucket::quantize([224, 240, 250], 32)
        );
    }

    #[test]
    fn distance_uses_representative_color() {
        let white = ColorBucket::quantize([255, 255, 255], 32);
        let d = white.distance_to([255, 255, 255]);
        assert!((d - (3.0f32 * 31.0 * 31.0).sqrt()).abs() < 1e-3);
        assert!(white.distance_to([0, 255, 0]) > 80.0);
    }

    #[test]
    fn most_frequent_breaks_ties_by_first_seen() {
        let mut histogram = ColorHistogram::new();
        let a = ColorBucket::quantize([0, 0, 0], 32);
        let b = ColorBucket::quantize([64, 0, 0], 32);
        let c = ColorBucket::quantize([128, 0, 0], 32);
        histogram.add(b);
        histogram.add(a);
        histogram.add(c);
        histogram.add(c);

        assert_eq!(histogram.most_frequent(3), vec![c, b, a]);
        assert_eq!(histogram.most_frequent(1), vec![c]);
        assert_eq!(histogram.count(c), 2);
        assert_eq!(histogram.count(ColorBucket::quantize([255, 0, 0], 32)), 0);
    }

    #[test]
    fn border_histogram_counts_frame_pixels() {
        let mut image: PixelBuffer = ImageBuffer::from_pixel(4, 3, Rgba([255, 255, 255, 255]));
        image.put_pixel(1, 1, Rgba([0, 0, 0, 255]));
        image.put_pixel(2, 1, Rgba([0, 0, 0, 255]));

        let border = ColorHistogram::of_border(&image, 32);
        assert_eq!(border.len(), 1);
        // 2 * width + 2 * height visits
        assert_eq!(border.count(ColorBucket::quantize([255, 255, 255], 32)), 14);

        let global = ColorHistogram::of_image(&image, 32);
        assert_eq!(global.len(), 2);
        assert_eq!(global.count(ColorBucket::quantize([0, 0, 0], 32)), 2);
    }
}
