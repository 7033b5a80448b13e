use crate::core::vision::FrameResult;
use image::RgbImage;

/// Single-image outcome: annotated pixels plus the fixed-template texts.
#[derive(Debug, Clone)]
pub struct ImageReport {
    result: FrameResult,
    annotated: RgbImage,
}

impl ImageReport {
    pub fn new(result: FrameResult, annotated: RgbImage) -> Self {
        Self { result, annotated }
    }

    pub fn result(&self) -> &FrameResult {
        &self.result
    }

    pub fn annotated(&self) -> &RgbImage {
        &self.annotated
    }

    pub fn caption(&self) -> String {
        format!(
            "AI Highlighted Vessels - {} - Estimated Stenosis: {}",
            self.result.artery, self.result.stenosis
        )
    }

    /// On-screen interpretation draft (markdown bullets).
    pub fn interpretation(&self) -> String {
        format!(
            "- Vessel segmentation completed.\n\
             - Detected artery: {}\n\
             - Estimated stenosis: {}\n\
             - Potential lesion zones marked in red.\n\
             - Suggested next step: Clinical correlation and possible further evaluation.\n",
            self.result.artery, self.result.stenosis
        )
    }

    /// Downloadable plain-text report.
    pub fn text(&self) -> String {
        format!(
            "
AI Coronary Angiography Preliminary Report
-------------------------------------------

Patient Image analyzed.
Vessels identified and mapped with AI model.
Detected artery: {}
Estimated stenosis: {}

* Areas of possible narrowing highlighted (requires confirmation).
* Recommend clinical evaluation.

---

This is an AI-assisted draft. Not for clinical decision making.
",
            self.result.artery, self.result.stenosis
        )
    }
}
