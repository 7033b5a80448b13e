use crate::core::vision::FrameResult;
use image::RgbImage;
use log::debug;

/// Everything produced for one sampled video frame, handed to the display.
#[derive(Debug, Clone)]
pub struct FrameOutcome {
    pub result: FrameResult,
    pub annotated: RgbImage,
    pub caption: String,
}

pub fn frame_caption(result: &FrameResult) -> String {
    format!(
        "Frame {} - {} - Estimated Stenosis: {}",
        result.frame_index, result.artery, result.stenosis
    )
}

pub fn frame_line(result: &FrameResult) -> String {
    format!(
        "Frame {}: {} - Estimated Stenosis = {}",
        result.frame_index, result.artery, result.stenosis
    )
}

/// Accumulates per-frame results for one video session.
#[derive(Debug, Default)]
pub struct VideoReportBuilder {
    results: Vec<FrameResult>,
}

impl VideoReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: FrameResult) {
        debug!("📝 Report line: {}", frame_line(&result));
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn finish(mut self) -> VideoReport {
        self.results.sort_by_key(|r| r.frame_index);
        VideoReport {
            results: self.results,
        }
    }
}

/// Write-once video report: one line per sampled frame, no aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoReport {
    results: Vec<FrameResult>,
}

impl VideoReport {
    pub fn results(&self) -> &[FrameResult] {
        &self.results
    }

    pub fn lines(&self) -> Vec<String> {
        self.results.iter().map(frame_line).collect()
    }

    pub fn text(&self) -> String {
        self.lines().join("\n")
    }
}
