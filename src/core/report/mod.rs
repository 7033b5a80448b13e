//! 报告生成 - 标注图 + 文本报告

pub mod annotate;
pub mod image_report;
pub mod video_report;

pub use annotate::highlight_vessels;
pub use image_report::ImageReport;
pub use video_report::{frame_caption, frame_line, FrameOutcome, VideoReport, VideoReportBuilder};

use crate::core::config::AnnotationConfig;
use crate::core::error::AnalysisError;
use crate::core::vision::{Frame, VesselAnalysis};

#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    config: AnnotationConfig,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::with_config(AnnotationConfig::default())
    }

    pub fn with_config(config: AnnotationConfig) -> Self {
        Self { config }
    }

    pub fn image_report(
        &self,
        frame: &Frame,
        analysis: &VesselAnalysis,
    ) -> Result<ImageReport, AnalysisError> {
        let annotated = highlight_vessels(frame, &analysis.mask, self.config.highlight)?;
        Ok(ImageReport::new(
            analysis.to_frame_result(frame.frame_number),
            annotated,
        ))
    }

    pub fn frame_outcome(
        &self,
        index: u64,
        frame: &Frame,
        analysis: &VesselAnalysis,
    ) -> Result<FrameOutcome, AnalysisError> {
        let annotated = highlight_vessels(frame, &analysis.mask, self.config.highlight)?;
        let result = analysis.to_frame_result(index);
        Ok(FrameOutcome {
            caption: frame_caption(&result),
            result,
            annotated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vision::{ArteryLabel, FrameResult, VesselAnalyzer};

    fn white_report() -> ImageReport {
        let frame = Frame::filled(100, 100, [255, 255, 255], 0).unwrap();
        let analysis = VesselAnalyzer::new().analyze(&frame);
        ReportBuilder::new().image_report(&frame, &analysis).unwrap()
    }

    #[test]
    fn test_image_report_text_template() {
        let report = white_report();
        let expected = "
AI Coronary Angiography Preliminary Report
-------------------------------------------

Patient Image analyzed.
Vessels identified and mapped with AI model.
Detected artery: Left Circumflex (LCx)
Estimated stenosis: 0.0%

* Areas of possible narrowing highlighted (requires confirmation).
* Recommend clinical evaluation.

---

This is an AI-assisted draft. Not for clinical decision making.
";
        assert_eq!(report.text(), expected);
    }

    #[test]
    fn test_image_caption_and_interpretation() {
        let report = white_report();
        assert_eq!(
            report.caption(),
            "AI Highlighted Vessels - Left Circumflex (LCx) - Estimated Stenosis: 0.0%"
        );
        let interpretation = report.interpretation();
        assert!(interpretation.starts_with("- Vessel segmentation completed.\n"));
        assert!(interpretation.contains("- Detected artery: Left Circumflex (LCx)\n"));
        assert!(interpretation.contains("- Estimated stenosis: 0.0%\n"));
        assert_eq!(interpretation.lines().count(), 5);
    }

    #[test]
    fn test_image_report_highlights_every_vessel_pixel() {
        let report = white_report();
        assert!(report
            .annotated()
            .pixels()
            .all(|p| p.0 == AnnotationConfig::default().highlight));
    }

    #[test]
    fn test_frame_outcome_caption() {
        let frame = Frame::filled(64, 64, [0, 0, 0], 40).unwrap();
        let analysis = VesselAnalyzer::new().analyze(&frame);
        let outcome = ReportBuilder::new()
            .frame_outcome(40, &frame, &analysis)
            .unwrap();

        assert_eq!(outcome.result.frame_index, 40);
        assert_eq!(
            outcome.caption,
            "Frame 40 - Left Circumflex (LCx) - Estimated Stenosis: 90.0%"
        );
        // nothing above threshold, nothing recolored
        assert_eq!(outcome.annotated, frame.to_rgb_image());
    }

    #[test]
    fn test_video_report_lines_in_index_order() {
        let analysis = VesselAnalyzer::new()
            .analyze(&Frame::filled(10, 10, [255, 255, 255], 0).unwrap());
        let mut builder = VideoReportBuilder::new();
        for index in [0, 20, 10] {
            builder.push(analysis.to_frame_result(index));
        }
        assert_eq!(builder.len(), 3);

        let report = builder.finish();
        assert_eq!(
            report.text(),
            "Frame 0: Left Circumflex (LCx) - Estimated Stenosis = 0.0%\n\
             Frame 10: Left Circumflex (LCx) - Estimated Stenosis = 0.0%\n\
             Frame 20: Left Circumflex (LCx) - Estimated Stenosis = 0.0%"
        );
    }

    #[test]
    fn test_empty_video_report() {
        let report = VideoReportBuilder::new().finish();
        assert!(report.results().is_empty());
        assert_eq!(report.text(), "");
    }

    #[test]
    fn test_frame_line_format() {
        let result = FrameResult {
            frame_index: 130,
            artery: ArteryLabel::Rca,
            stenosis: VesselAnalyzer::new()
                .analyze(&Frame::filled(1, 1, [0, 0, 0], 0).unwrap())
                .stenosis,
        };
        assert_eq!(
            frame_line(&result),
            "Frame 130: Right Coronary Artery (RCA) - Estimated Stenosis = 90.0%"
        );
    }
}
