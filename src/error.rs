use thiserror::Error;

/// Result type for cutout operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for cutout operations
///
/// Every stage of the pipeline reports failures through this type. There is no
/// distinction between recoverable and fatal errors: a call either yields a
/// complete image or fails outright.
#[derive(Debug, Error)]
pub enum Error {
    /// The image has a zero width or height
    ///
    /// All operations require `width > 0` and `height > 0`.
    #[error("Invalid input: image dimensions must be non-zero, got {width}x{height}")]
    InvalidInput { width: u32, height: u32 },

    /// Invalid parameter provided to the operation
    ///
    /// This error is returned when a configuration value is invalid
    /// or outside the acceptable range for the operation.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Image and mask dimensions do not match
    #[error("Image and mask dimensions do not match: expected {expected:?}, actual {actual:?}")]
    DimensionMismatch {
        /// Expected dimensions (width, height)
        expected: (u32, u32),
        /// Actual dimensions (width, height)
        actual: (u32, u32),
    },

    /// Failed to create ImageBuffer from processed pixels
    #[error("Failed to create ImageBuffer from processed pixels")]
    ImageBufferCreationFailed,

    /// The image source could not be decoded into pixel samples
    ///
    /// Decode failures are terminal for the whole call.
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// The result could not be encoded into the requested format
    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    /// More images were submitted to a batch than it accepts
    #[error("Batch of {len} images exceeds the limit of {max}")]
    BatchTooLarge { len: usize, max: usize },

    /// The blocking worker running an async call panicked or was cancelled
    #[error("Background task failed: {0}")]
    TaskFailed(String),
}

impl Error {
    /// Create a new invalid parameter error
    pub fn invalid_parameter<S: Into<String>>(msg: S) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::TaskFailed(err.to_string())
    }
}
