//! Local background removal for RGBA images.
//!
//! Two strategies are available through [`CutoutPipeline`]:
//!
//! - [`Strategy::BorderColorKeying`]: keys out the dominant border colors,
//!   opens the alpha channel to drop specks and smooths its edges.
//! - [`Strategy::RadialVignette`]: a color-independent, center-weighted
//!   falloff used as a fallback.
//!
//! Every stage is also available on its own as a trait implemented for
//! [`PixelBuffer`] (and, for the refinement stages, for [`AlphaMask`]).

mod config;
mod cutout;
mod error;
#[cfg(test)]
mod test_utils;
mod utils;

use image::{ImageBuffer, Luma, Pixel, Rgba};

pub use config::{BackgroundColor, ExportFormat, ExportOptions, KeyingConfig, VignetteConfig};
pub use cutout::alpha_channel::AlphaChannel;
pub use cutout::alpha_smooth::SmoothAlpha;
pub use cutout::batch::{process_batch, BatchItem, MAX_BATCH_SIZE};
pub use cutout::border_key::KeyBorderColor;
pub use cutout::color_bucket::{ColorBucket, ColorHistogram};
pub use cutout::edge_detect::DetectEdges;
pub use cutout::export::{export, flatten};
pub use cutout::morphology::{dilate, erode, MorphologicalOpening};
pub use cutout::pipeline::{CutoutPipeline, ImageSource, Strategy};
pub use cutout::radial_vignette::RadialVignette;
pub use error::{Error, Result};

pub type Image<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;

/// RGBA image, 8 bits per channel, row-major
pub type PixelBuffer = Image<Rgba<u8>>;

/// Alpha channel as a standalone scalar field
pub type AlphaMask = Image<Luma<u8>>;
