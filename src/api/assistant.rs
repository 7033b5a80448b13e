//! 冠脉造影辅助分析器 - 上传文件 → 标注图 + 报告
//!
//! ```ignore
//! let assistant = AngiographyAssistant::create();
//! let report = assistant.analyze_file(Path::new("run.mp4"), |frame| {
//!     println!("{}", frame.caption);
//! })?;
//! std::fs::write("report.txt", report.text())?;
//! ```

use crate::core::config::AssistantConfig;
use crate::core::error::AnalysisError;
use crate::core::pipeline::AnalysisPipeline;
use crate::core::report::{FrameOutcome, ImageReport, VideoReport, VideoReportBuilder};
use crate::core::source::{self, FfmpegDecoder, FrameDecoder, MediaKind, StreamEnd};
use crate::core::vision::FrameResult;
use log::{info, warn};
use std::path::Path;

/// Video session result: the report plus how the stream ended.
#[derive(Debug, Clone)]
pub struct VideoOutcome {
    pub report: VideoReport,
    pub frames_decoded: u64,
    pub stream_end: StreamEnd,
}

#[derive(Debug, Clone)]
pub enum AssistantReport {
    Image(ImageReport),
    Video(VideoOutcome),
}

impl AssistantReport {
    /// Text offered for download.
    pub fn text(&self) -> String {
        match self {
            AssistantReport::Image(report) => report.text(),
            AssistantReport::Video(outcome) => outcome.report.text(),
        }
    }

    pub fn results(&self) -> Vec<FrameResult> {
        match self {
            AssistantReport::Image(report) => vec![*report.result()],
            AssistantReport::Video(outcome) => outcome.report.results().to_vec(),
        }
    }
}

pub struct AngiographyAssistant {
    config: AssistantConfig,
    pipeline: AnalysisPipeline,
}

impl AngiographyAssistant {
    pub fn create() -> Self {
        Self::with_config(AssistantConfig::default())
    }

    pub fn with_config(config: AssistantConfig) -> Self {
        info!(
            "🫀 AngiographyAssistant: created (threshold {}, stride {})",
            config.analyzer.threshold, config.sampling.stride
        );
        Self {
            pipeline: AnalysisPipeline::with_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Dispatches on the extension: `.mp4` goes through the video path,
    /// anything else is decoded as a still image.
    pub fn analyze_file<F>(&self, path: &Path, on_frame: F) -> Result<AssistantReport, AnalysisError>
    where
        F: FnMut(&FrameOutcome),
    {
        match MediaKind::from_path(path) {
            MediaKind::Video => {
                let decoder = self.open_video(path)?;
                self.analyze_video(decoder, on_frame)
                    .map(AssistantReport::Video)
            }
            MediaKind::Image => self.analyze_image_file(path).map(AssistantReport::Image),
        }
    }

    pub fn analyze_image_file(&self, path: &Path) -> Result<ImageReport, AnalysisError> {
        let frame = source::load_still_image(path)?;
        let report = self.pipeline.process_still(&frame)?;
        info!("✅ {}", report.caption());
        Ok(report)
    }

    pub fn open_video(&self, path: &Path) -> Result<FfmpegDecoder, AnalysisError> {
        let decoder = FfmpegDecoder::open(path)?;
        if let Some(total) = decoder.info().frame_count {
            info!("🎞️ Total Frames in Video: {}", total);
        }
        Ok(decoder)
    }

    /// Runs the sampled stream to completion, calling `on_frame` for each
    /// analyzed frame as soon as it is ready.
    pub fn analyze_video<D, F>(&self, decoder: D, mut on_frame: F) -> Result<VideoOutcome, AnalysisError>
    where
        D: FrameDecoder,
        F: FnMut(&FrameOutcome),
    {
        let mut builder = VideoReportBuilder::new();
        let mut video = self.pipeline.video(decoder);

        for outcome in video.by_ref() {
            let outcome = outcome?;
            on_frame(&outcome);
            builder.push(outcome.result);
        }

        let frames_decoded = video.frames_decoded();
        let stream_end = video
            .end_reason()
            .cloned()
            .unwrap_or(StreamEnd::Exhausted);
        if let StreamEnd::DecodeFailed(reason) = &stream_end {
            warn!(
                "⚠️ Video ended early after {} frames, report is partial: {}",
                frames_decoded, reason
            );
        }

        let report = builder.finish();
        info!(
            "✅ Video analysis complete: {} of {} frames analyzed",
            report.results().len(),
            frames_decoded
        );

        Ok(VideoOutcome {
            report,
            frames_decoded,
            stream_end,
        })
    }
}

impl Default for AngiographyAssistant {
    fn default() -> Self {
        Self::create()
    }
}

impl Drop for AngiographyAssistant {
    fn drop(&mut self) {
        info!("🗑️ AngiographyAssistant: released");
    }
}
