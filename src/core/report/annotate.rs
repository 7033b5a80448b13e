use crate::core::error::AnalysisError;
use crate::core::vision::{Frame, Mask};
use image::{Rgb, RgbImage};

/// Copy of `frame` with every vessel pixel overwritten by `color`.
pub fn highlight_vessels(
    frame: &Frame,
    mask: &Mask,
    color: [u8; 3],
) -> Result<RgbImage, AnalysisError> {
    if mask.dimensions() != frame.dimensions() {
        return Err(AnalysisError::FrameSize {
            expected: frame.pixel_count(),
            actual: mask.total_pixels(),
        });
    }

    let mut image = frame.to_rgb_image();
    for (pixel, &vessel) in image.pixels_mut().zip(mask.as_slice()) {
        if vessel == 1 {
            *pixel = Rgb(color);
        }
    }
    Ok(image)
}
