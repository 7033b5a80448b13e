use crate::core::error::AnalysisError;
use crate::core::vision::frame::Frame;

/// Binary vessel mask, same dimensions as the frame it was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Mask {
    /// Marks every intensity strictly above `threshold` as vessel.
    /// `luminance` must hold exactly `width * height` values.
    pub fn from_luminance(
        width: u32,
        height: u32,
        luminance: &[u8],
        threshold: u8,
    ) -> Result<Self, AnalysisError> {
        let expected = width as usize * height as usize;
        if luminance.len() != expected {
            return Err(AnalysisError::FrameSize {
                expected,
                actual: luminance.len(),
            });
        }
        Ok(Self::binarize(width, height, luminance, threshold))
    }

    /// Thresholds a frame's luminance; sizes always agree.
    pub fn from_frame(frame: &Frame, threshold: u8) -> Self {
        Self::binarize(frame.width, frame.height, &frame.luminance(), threshold)
    }

    fn binarize(width: u32, height: u32, luminance: &[u8], threshold: u8) -> Self {
        let data = luminance
            .iter()
            .map(|&value| u8::from(value > threshold))
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// 0 or 1; `None` outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn vessel_pixels(&self) -> usize {
        self.data.iter().filter(|&&v| v == 1).count()
    }

    pub fn total_pixels(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn density(&self) -> f64 {
        let total = self.total_pixels();
        if total == 0 {
            return 0.0;
        }
        self.vessel_pixels() as f64 / total as f64
    }
}
