use crate::core::config::AssistantConfig;
use crate::core::error::AnalysisError;
use crate::core::report::{FrameOutcome, ImageReport, ReportBuilder};
use crate::core::source::{FrameDecoder, SampledFrames, StreamEnd};
use crate::core::vision::{Frame, VesselAnalyzer};

/// Analyzer + report builder wired together for one configuration.
#[derive(Debug, Clone)]
pub struct AnalysisPipeline {
    analyzer: VesselAnalyzer,
    reports: ReportBuilder,
    stride: u64,
}

impl AnalysisPipeline {
    pub fn new() -> Self {
        Self::with_config(&AssistantConfig::default())
    }

    pub fn with_config(config: &AssistantConfig) -> Self {
        Self {
            analyzer: VesselAnalyzer::with_config(config.analyzer.clone()),
            reports: ReportBuilder::with_config(config.annotation.clone()),
            stride: config.sampling.stride,
        }
    }

    pub fn analyzer(&self) -> &VesselAnalyzer {
        &self.analyzer
    }

    pub fn process_still(&self, frame: &Frame) -> Result<ImageReport, AnalysisError> {
        let analysis = self.analyzer.analyze(frame);
        self.reports.image_report(frame, &analysis)
    }

    pub fn process_frame(&self, index: u64, frame: &Frame) -> Result<FrameOutcome, AnalysisError> {
        let analysis = self.analyzer.analyze(frame);
        self.reports.frame_outcome(index, frame, &analysis)
    }

    /// Sampled, analyzed frames of a decoded stream, pulled by the caller.
    pub fn video<D: FrameDecoder>(&self, decoder: D) -> VideoAnalysis<'_, D> {
        VideoAnalysis {
            pipeline: self,
            frames: SampledFrames::new(decoder, self.stride),
        }
    }
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new()
    }
}

pub struct VideoAnalysis<'a, D> {
    pipeline: &'a AnalysisPipeline,
    frames: SampledFrames<D>,
}

impl<D: FrameDecoder> VideoAnalysis<'_, D> {
    pub fn frames_decoded(&self) -> u64 {
        self.frames.frames_decoded()
    }

    pub fn end_reason(&self) -> Option<&StreamEnd> {
        self.frames.end_reason()
    }
}

impl<D: FrameDecoder> Iterator for VideoAnalysis<'_, D> {
    type Item = Result<FrameOutcome, AnalysisError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, frame) = self.frames.next()?;
        Some(self.pipeline.process_frame(index, &frame))
    }
}
