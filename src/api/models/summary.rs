use crate::api::assistant::AssistantReport;
use crate::core::source::StreamEnd;
use crate::core::vision::FrameResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Image,
    Video,
}

/// Machine-readable companion to the text report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub mode: AnalysisMode,
    pub frames: Vec<FrameResult>,
    /// Decoded frames including the skipped ones; video only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frames_decoded: Option<u64>,
    /// True when decoding failed before the end of the stream.
    pub truncated: bool,
    pub report: String,
}

impl AnalysisSummary {
    pub fn from_report(report: &AssistantReport) -> Self {
        match report {
            AssistantReport::Image(image) => Self {
                mode: AnalysisMode::Image,
                frames: vec![*image.result()],
                frames_decoded: None,
                truncated: false,
                report: image.text(),
            },
            AssistantReport::Video(video) => Self {
                mode: AnalysisMode::Video,
                frames: video.report.results().to_vec(),
                frames_decoded: Some(video.frames_decoded),
                truncated: matches!(video.stream_end, StreamEnd::DecodeFailed(_)),
                report: video.report.text(),
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
