use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("raster capture failed: {0}")]
    Capture(String),

    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("document conversion failed: {detail}")]
    Conversion { detail: String },

    #[error("file save failed: {0}")]
    Io(#[from] std::io::Error),
}
