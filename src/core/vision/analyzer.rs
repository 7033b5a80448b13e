use crate::core::config::AnalyzerConfig;
use crate::core::vision::artery::{recognize_midpoint, ArteryLabel};
use crate::core::vision::frame::Frame;
use crate::core::vision::mask::Mask;
use crate::core::vision::result::{FrameResult, StenosisEstimate, MAX_PERCENT};
use log::debug;

/// Output of one analysis pass over a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct VesselAnalysis {
    pub mask: Mask,
    pub stenosis: StenosisEstimate,
    pub artery: ArteryLabel,
}

impl VesselAnalysis {
    pub fn to_frame_result(&self, frame_index: u64) -> FrameResult {
        FrameResult {
            frame_index,
            artery: self.artery,
            stenosis: self.stenosis,
        }
    }
}

/// Global-threshold vessel analyzer.
///
/// One fixed intensity cutoff, a linear density-to-percentage proxy and a
/// position lookup for the label. Pure: the same frame always yields the
/// same mask, estimate and label.
#[derive(Debug, Clone, Default)]
pub struct VesselAnalyzer {
    config: AnalyzerConfig,
}

impl VesselAnalyzer {
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn analyze(&self, frame: &Frame) -> VesselAnalysis {
        let mask = self.threshold(frame);
        let stenosis = self.estimate_stenosis(&mask);
        let artery = recognize_midpoint(frame.width, frame.height);

        debug!(
            "🩺 Frame {}: density {:.4}, {} - stenosis {}",
            frame.frame_number,
            mask.density(),
            artery.abbreviation(),
            stenosis
        );

        VesselAnalysis {
            mask,
            stenosis,
            artery,
        }
    }

    pub fn threshold(&self, frame: &Frame) -> Mask {
        Mask::from_frame(frame, self.config.threshold)
    }

    /// `clamp((ceiling - density) * scale, 0, max)`
    pub fn estimate_stenosis(&self, mask: &Mask) -> StenosisEstimate {
        let raw = (self.config.density_ceiling - mask.density()) * self.config.stenosis_scale;
        // NaN and -0.0 both collapse to a plain zero here.
        let percent = if raw > 0.0 {
            raw.min(self.config.max_stenosis.max(0.0).min(MAX_PERCENT))
        } else {
            0.0
        };
        StenosisEstimate::new(percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with_vessel_rows(width: u32, height: u32, vessel_rows: u32) -> Frame {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            let value = if y < vessel_rows { 200 } else { 10 };
            for _ in 0..width {
                data.extend_from_slice(&[value, value, value]);
            }
        }
        Frame::new(width, height, data, 0).unwrap()
    }

    #[test]
    fn test_all_black_frame() {
        let analyzer = VesselAnalyzer::new();
        let frame = Frame::filled(100, 100, [0, 0, 0], 0).unwrap();
        let analysis = analyzer.analyze(&frame);

        assert_eq!(analysis.mask.vessel_pixels(), 0);
        assert_eq!(analysis.mask.density(), 0.0);
        assert!((analysis.stenosis.percent() - 90.0).abs() < 1e-9);
        assert_eq!(analysis.artery, ArteryLabel::Lcx);
    }

    #[test]
    fn test_all_white_frame() {
        let analyzer = VesselAnalyzer::new();
        let frame = Frame::filled(100, 100, [255, 255, 255], 0).unwrap();
        let analysis = analyzer.analyze(&frame);

        assert_eq!(analysis.mask.vessel_pixels(), 100 * 100);
        assert_eq!(analysis.mask.density(), 1.0);
        assert_eq!(analysis.stenosis.percent(), 0.0);
        assert_eq!(analysis.stenosis.to_string(), "0.0%");
        assert_eq!(analysis.artery, ArteryLabel::Lcx);
    }

    #[test]
    fn test_linear_region() {
        // 10 of 100 rows above threshold: density 0.1 → (0.3 - 0.1) * 300 = 60
        let analyzer = VesselAnalyzer::new();
        let frame = frame_with_vessel_rows(20, 100, 10);
        let analysis = analyzer.analyze(&frame);

        assert!((analysis.mask.density() - 0.1).abs() < 1e-12);
        assert!((analysis.stenosis.percent() - 60.0).abs() < 1e-9);
        assert_eq!(analysis.stenosis.to_string(), "60.0%");
    }

    #[test]
    fn test_density_at_ceiling_is_zero() {
        let analyzer = VesselAnalyzer::new();
        let frame = frame_with_vessel_rows(10, 10, 3);
        let analysis = analyzer.analyze(&frame);
        assert_eq!(analysis.stenosis.percent(), 0.0);
        assert_eq!(analysis.stenosis.to_string(), "0.0%");
    }

    #[test]
    fn test_cap_applies() {
        let analyzer = VesselAnalyzer::with_config(AnalyzerConfig {
            stenosis_scale: 1000.0,
            ..Default::default()
        });
        let frame = Frame::filled(8, 8, [0, 0, 0], 0).unwrap();
        assert_eq!(analyzer.analyze(&frame).stenosis.percent(), 99.0);
    }

    #[test]
    fn test_unvalidated_cap_still_bounded() {
        let analyzer = VesselAnalyzer::with_config(AnalyzerConfig {
            stenosis_scale: 10_000.0,
            max_stenosis: 500.0,
            ..Default::default()
        });
        let frame = Frame::filled(8, 8, [0, 0, 0], 0).unwrap();
        assert_eq!(analyzer.analyze(&frame).stenosis.percent(), MAX_PERCENT);
    }

    #[test]
    fn test_estimate_always_in_range() {
        let analyzer = VesselAnalyzer::new();
        for rows in 0..=50 {
            let frame = frame_with_vessel_rows(7, 50, rows);
            let percent = analyzer.analyze(&frame).stenosis.percent();
            assert!((0.0..=99.0).contains(&percent), "rows={} percent={}", rows, percent);
        }
    }

    #[test]
    fn test_mask_matches_frame_dimensions() {
        let analyzer = VesselAnalyzer::new();
        let frame = frame_with_vessel_rows(13, 7, 2);
        let analysis = analyzer.analyze(&frame);
        assert_eq!(analysis.mask.dimensions(), frame.dimensions());
        assert!(analysis.mask.as_slice().iter().all(|&v| v <= 1));
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let analyzer = VesselAnalyzer::new();
        let frame = frame_with_vessel_rows(31, 17, 5);
        assert_eq!(analyzer.analyze(&frame), analyzer.analyze(&frame));
    }

    #[test]
    fn test_custom_threshold() {
        let analyzer = VesselAnalyzer::with_config(AnalyzerConfig {
            threshold: 250,
            ..Default::default()
        });
        let frame = Frame::filled(4, 4, [240, 240, 240], 0).unwrap();
        assert_eq!(analyzer.threshold(&frame).vessel_pixels(), 0);
    }
}
