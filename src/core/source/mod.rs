//! 帧来源 - 静态图片单帧 / 视频按步长抽帧

pub mod ffmpeg;
pub mod sampler;

pub use ffmpeg::{FfmpegDecoder, VideoInfo};
pub use sampler::{FrameDecoder, MemoryDecoder, SampledFrames, StreamEnd};

use crate::core::error::AnalysisError;
use crate::core::vision::Frame;
use log::info;
use std::path::Path;

/// Extensions an upload may carry.
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "mp4"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Dispatch by extension only: `.mp4` is a video, anything else is
    /// treated as an image and will fail later if it does not decode.
    pub fn from_path(path: &Path) -> Self {
        match extension_of(path).as_deref() {
            Some("mp4") => MediaKind::Video,
            _ => MediaKind::Image,
        }
    }
}

pub fn is_accepted_upload(path: &Path) -> bool {
    extension_of(path)
        .map(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Decodes a still image into the single frame (index 0) it contributes.
pub fn load_still_image(path: &Path) -> Result<Frame, AnalysisError> {
    info!("🖼️ Loading image: {}", path.display());
    let image = image::io::Reader::open(path)?
        .with_guessed_format()?
        .decode()?;
    let frame = Frame::from_rgb_image(image.to_rgb8(), 0)?;
    info!("📐 Image size: {}x{}", frame.width, frame.height);
    Ok(frame)
}

pub fn decode_still_image(bytes: &[u8]) -> Result<Frame, AnalysisError> {
    let image = image::load_from_memory(bytes)?;
    Frame::from_rgb_image(image.to_rgb8(), 0)
}
