//! Configuration types for cutout operations

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Parameters of the border color keying strategy
///
/// The defaults reproduce the tuned behavior of the keying heuristic:
/// 32-unit color buckets, the 3 most frequent border colors, an 80 unit RGB
/// distance tolerance and a 2 pixel alpha smoothing radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyingConfig {
    /// Bucket width used to quantize each RGB channel
    pub quantization_step: u8,
    /// Raw RGB distance below which a pixel matches a background bucket
    pub distance_threshold: f32,
    /// Number of most frequent border buckets treated as background
    pub border_colors: usize,
    /// Radius of the Gaussian alpha smoothing pass, 0 disables it
    pub blur_radius: u32,
}

impl Default for KeyingConfig {
    fn default() -> Self {
        Self {
            quantization_step: 32,
            distance_threshold: 80.0,
            border_colors: 3,
            blur_radius: 2,
        }
    }
}

impl KeyingConfig {
    #[must_use]
    pub fn with_quantization_step(mut self, step: u8) -> Self {
        self.quantization_step = step;
        self
    }

    #[must_use]
    pub fn with_distance_threshold(mut self, threshold: f32) -> Self {
        self.distance_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_border_colors(mut self, count: usize) -> Self {
        self.border_colors = count;
        self
    }

    #[must_use]
    pub fn with_blur_radius(mut self, radius: u32) -> Self {
        self.blur_radius = radius;
        self
    }

    /// Checks every parameter against its valid range
    ///
    /// # Errors
    ///
    /// * `Error::InvalidParameter` - step is 0, border color count is 0 or the
    ///   distance threshold is negative or not finite
    pub fn validate(&self) -> Result<()> {
        if self.quantization_step == 0 {
            return Err(Error::invalid_parameter(
                "quantization_step must be greater than 0",
            ));
        }
        if self.border_colors == 0 {
            return Err(Error::invalid_parameter(
                "border_colors must be greater than 0",
            ));
        }
        if !self.distance_threshold.is_finite() || self.distance_threshold < 0.0 {
            return Err(Error::invalid_parameter(format!(
                "distance_threshold must be a finite, non-negative number, got {}",
                self.distance_threshold
            )));
        }
        Ok(())
    }
}

/// Parameters of the radial vignette fallback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VignetteConfig {
    /// Normalized distance from the center inside which pixels stay opaque
    pub inner_radius: f32,
    /// Width in pixels of the frame whose alpha is capped
    pub edge_margin: u32,
    /// Maximum alpha of pixels inside the edge margin
    pub edge_alpha_cap: u8,
}

impl Default for VignetteConfig {
    fn default() -> Self {
        Self {
            inner_radius: 0.6,
            edge_margin: 10,
            edge_alpha_cap: 50,
        }
    }
}

impl VignetteConfig {
    #[must_use]
    pub fn with_inner_radius(mut self, radius: f32) -> Self {
        self.inner_radius = radius;
        self
    }

    #[must_use]
    pub fn with_edge_margin(mut self, margin: u32) -> Self {
        self.edge_margin = margin;
        self
    }

    #[must_use]
    pub fn with_edge_alpha_cap(mut self, cap: u8) -> Self {
        self.edge_alpha_cap = cap;
        self
    }

    /// # Errors
    ///
    /// * `Error::InvalidParameter` - inner radius outside `[0, 1)`
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.inner_radius) {
            return Err(Error::invalid_parameter(format!(
                "inner_radius must be within [0, 1), got {}",
                self.inner_radius
            )));
        }
        Ok(())
    }
}

/// Opaque color placed behind a cutout when it is flattened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for BackgroundColor {
    fn default() -> Self {
        Self::white()
    }
}

impl BackgroundColor {
    #[must_use]
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub fn white() -> Self {
        Self::new(255, 255, 255)
    }

    #[must_use]
    pub fn black() -> Self {
        Self::new(0, 0, 0)
    }

    /// Parses a `#rrggbb` or `rrggbb` hex string, as produced by color pickers
    ///
    /// # Errors
    ///
    /// * `Error::InvalidParameter` - the string is not six hex digits
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let channel = |range: std::ops::Range<usize>| {
            digits
                .get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| Error::invalid_parameter(format!("invalid hex color: {hex}")))
        };
        if digits.len() != 6 {
            return Err(Error::invalid_parameter(format!("invalid hex color: {hex}")));
        }
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// Encoding used when exporting a cutout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportFormat {
    /// PNG, keeps transparency unless a background is given
    #[default]
    Png,
    /// JPEG, always flattened onto a background
    Jpeg,
}

/// How a cutout is turned into downloadable bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Background to flatten onto, `None` keeps transparency where the format allows
    pub background: Option<BackgroundColor>,
    /// JPEG quality in `1..=100`
    pub jpeg_quality: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Png,
            background: None,
            jpeg_quality: 90,
        }
    }
}

impl ExportOptions {
    #[must_use]
    pub fn png() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn jpeg() -> Self {
        Self {
            format: ExportFormat::Jpeg,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_background(mut self, color: BackgroundColor) -> Self {
        self.background = Some(color);
        self
    }

    #[must_use]
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// # Errors
    ///
    /// * `Error::InvalidParameter` - JPEG quality outside `1..=100`
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(Error::invalid_parameter(format!(
                "jpeg_quality must be within 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}
