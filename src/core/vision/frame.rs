use crate::core::error::AnalysisError;
use image::RgbImage;

/// 帧数据结构
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    data: Vec<u8>, // RGB 格式
    pub frame_number: u64,
}

impl Frame {
    /// Wraps a packed RGB8 buffer. Zero-area frames are rejected so every
    /// frame that exists has a well-defined vessel density.
    pub fn new(
        width: u32,
        height: u32,
        data: Vec<u8>,
        frame_number: u64,
    ) -> Result<Self, AnalysisError> {
        if width == 0 || height == 0 {
            return Err(AnalysisError::EmptyFrame { width, height });
        }

        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(AnalysisError::FrameSize {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
            frame_number,
        })
    }

    /// Solid-color frame, mostly useful for synthetic inputs.
    pub fn filled(
        width: u32,
        height: u32,
        rgb: [u8; 3],
        frame_number: u64,
    ) -> Result<Self, AnalysisError> {
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        Self::new(width, height, data, frame_number)
    }

    pub fn from_rgb_image(image: RgbImage, frame_number: u64) -> Result<Self, AnalysisError> {
        let (width, height) = image.dimensions();
        Self::new(width, height, image.into_raw(), frame_number)
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_raw(self.width, self.height, self.data.clone())
            .unwrap_or_else(|| RgbImage::new(self.width, self.height))
    }

    pub fn with_frame_number(mut self, frame_number: u64) -> Self {
        self.frame_number = frame_number;
        self
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Single-channel intensity, row-major, one byte per pixel.
    pub fn luminance(&self) -> Vec<u8> {
        self.data
            .chunks_exact(3)
            .map(|rgb| luma(rgb[0], rgb[1], rgb[2]))
            .collect()
    }
}

const LUMA_SHIFT: u32 = 14;
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;

/// BT.601 luma in 14-bit fixed point, rounded to nearest. Same integer
/// result as OpenCV's RGB to gray conversion.
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let sum = r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B;
    ((sum + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}
