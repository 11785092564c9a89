use crate::config::{KeyingConfig, VignetteConfig};
use crate::cutout::alpha_smooth::SmoothAlpha;
use crate::cutout::border_key::KeyBorderColor;
use crate::cutout::edge_detect::DetectEdges;
use crate::cutout::morphology::MorphologicalOpening;
use crate::cutout::radial_vignette::RadialVignette;
use crate::error::{Error, Result};
use crate::utils::validate_non_empty_image;
use crate::PixelBuffer;
use image::ImageFormat;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::PathBuf;
use tracing::instrument;

/// Background removal strategy
///
/// The two variants are alternative implementations of the same capability
/// and share no state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Strategy {
    /// Border color keying, then morphological opening and alpha smoothing
    BorderColorKeying(KeyingConfig),
    /// Center-weighted alpha falloff, independent of pixel color
    RadialVignette(VignetteConfig),
}

impl Default for Strategy {
    fn default() -> Self {
        Self::BorderColorKeying(KeyingConfig::default())
    }
}

impl Strategy {
    /// Runs the strategy on decoded pixels
    ///
    /// Every stage allocates a new buffer; the input is never modified.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidInput` - the image is empty
    /// * `Error::InvalidParameter` - the strategy configuration is invalid
    pub fn apply(&self, image: &PixelBuffer) -> Result<PixelBuffer> {
        match self {
            Self::BorderColorKeying(config) => {
                let keyed = image.key_border_color(config)?;
                let opened = keyed.open_alpha()?;
                opened.smooth_alpha(config.blur_radius)
            }
            Self::RadialVignette(config) => image.radial_vignette(config),
        }
    }
}

/// Where an input image comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A file on disk, format guessed from its contents and extension
    Path(PathBuf),
    /// Encoded image bytes, format guessed from the contents
    Bytes(Vec<u8>),
}

impl ImageSource {
    /// Decodes the source into RGBA pixels
    ///
    /// # Errors
    ///
    /// * `Error::Decode` - the source cannot be read or decoded
    /// * `Error::InvalidInput` - the decoded image is empty
    pub fn decode(&self) -> Result<PixelBuffer> {
        let image = match self {
            Self::Path(path) => image::open(path),
            Self::Bytes(bytes) => image::load_from_memory(bytes),
        }
        .map_err(Error::Decode)?
        .to_rgba8();

        validate_non_empty_image(image.width(), image.height())?;
        Ok(image)
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

/// Local background removal pipeline
///
/// ```no_run
/// use imageops_cutout::{CutoutPipeline, ImageSource, Strategy};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pipeline = CutoutPipeline::new(Strategy::default());
/// let png = pipeline.remove_background(&ImageSource::Path("photo.jpg".into()))?;
/// std::fs::write("photo.png", png)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CutoutPipeline {
    strategy: Strategy,
}

impl CutoutPipeline {
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Produces the transparent image for already decoded pixels
    #[instrument(level = "debug", skip_all, fields(width = image.width(), height = image.height()))]
    pub fn process(&self, image: &PixelBuffer) -> Result<PixelBuffer> {
        validate_non_empty_image(image.width(), image.height())?;
        self.strategy.apply(image)
    }

    /// Sobel edge map of the image
    ///
    /// Not part of either strategy; exposed for callers that need edge data.
    pub fn edges(&self, image: &PixelBuffer) -> Result<PixelBuffer> {
        image.sobel_edges()
    }

    /// Decodes, processes and encodes the result as PNG
    ///
    /// The output keeps the input dimensions and carries an alpha channel.
    ///
    /// # Errors
    ///
    /// * `Error::Decode` - the source could not be decoded, no partial result
    /// * `Error::Encode` - PNG encoding failed
    /// * any error of [`Strategy::apply`]
    #[instrument(level = "debug", skip_all)]
    pub fn remove_background(&self, source: &ImageSource) -> Result<Vec<u8>> {
        let image = source.decode()?;
        let cutout = self.process(&image)?;
        encode_png(&cutout)
    }

    /// Async variant of [`remove_background`](Self::remove_background)
    ///
    /// The whole call runs on a blocking worker so that the caller's executor
    /// thread is never stalled by pixel work. Calls are independent; the
    /// pipeline neither limits nor orders concurrently running calls.
    ///
    /// # Errors
    ///
    /// * `Error::TaskFailed` - the worker panicked or was cancelled
    /// * any error of [`remove_background`](Self::remove_background)
    pub async fn remove_background_async(&self, source: ImageSource) -> Result<Vec<u8>> {
        let pipeline = *self;
        tokio::task::spawn_blocking(move || pipeline.remove_background(&source)).await?
    }

    /// Async variant of [`process`](Self::process) for decoded pixels
    pub async fn process_async(&self, image: PixelBuffer) -> Result<PixelBuffer> {
        let pipeline = *self;
        tokio::task::spawn_blocking(move || pipeline.process(&image)).await?
    }
}

/// Encodes RGBA pixels as PNG
pub(crate) fn encode_png(image: &PixelBuffer) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(Error::Encode)?;
    Ok(bytes)
}
