use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Video decode error: {0}")]
    Decode(String),
    #[error("Frame has zero area ({width}x{height})")]
    EmptyFrame { width: u32, height: u32 },
    #[error("Frame buffer size mismatch: expected {expected} bytes, got {actual}")]
    FrameSize { expected: usize, actual: usize },
    #[error("Invalid config: {0}")]
    Config(String),
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] json5::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
