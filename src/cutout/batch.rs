use crate::config::ExportOptions;
use crate::cutout::export::export;
use crate::cutout::pipeline::{CutoutPipeline, ImageSource};
use crate::error::{Error, Result};
use futures::future::join_all;

/// Maximum number of images accepted by one batch
pub const MAX_BATCH_SIZE: usize = 10;

/// One image of a batch with its own output settings
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub source: ImageSource,
    pub export: ExportOptions,
}

impl BatchItem {
    pub fn new(source: impl Into<ImageSource>, export: ExportOptions) -> Self {
        Self {
            source: source.into(),
            export,
        }
    }
}

/// Processes every item as an independent call
///
/// Results come back in input order. One item failing does not affect the
/// others; its error is returned in its slot.
///
/// # Errors
///
/// * `Error::BatchTooLarge` - more than [`MAX_BATCH_SIZE`] items
pub async fn process_batch(
    pipeline: &CutoutPipeline,
    items: Vec<BatchItem>,
) -> Result<Vec<Result<Vec<u8>>>> {
    if items.len() > MAX_BATCH_SIZE {
        return Err(Error::BatchTooLarge {
            len: items.len(),
            max: MAX_BATCH_SIZE,
        });
    }

    let calls = items.into_iter().enumerate().map(|(index, item)| {
        let pipeline = *pipeline;
        async move {
            let result = process_item(pipeline, item).await;
            if let Err(err) = &result {
                tracing::warn!(index, error = %err, "batch item failed");
            }
            result
        }
    });

    Ok(join_all(calls).await)
}

async fn process_item(pipeline: CutoutPipeline, item: BatchItem) -> Result<Vec<u8>> {
    let BatchItem { source, export: options } = item;
    tokio::task::spawn_blocking(move || {
        let image = source.decode()?;
        let cutout = pipeline.process(&image)?;
        export(&cutout, &options)
    })
    .await?
}
