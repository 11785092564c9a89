pub mod alpha_channel;
pub mod alpha_smooth;
pub mod batch;
pub mod border_key;
pub mod color_bucket;
pub mod edge_detect;
pub mod export;
pub mod morphology;
pub mod pipeline;
pub mod radial_vignette;
