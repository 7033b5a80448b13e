use crate::core::vision::artery::ArteryLabel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound of any estimate, whatever cap the analyzer is configured with.
pub const MAX_PERCENT: f64 = 100.0;

/// Heuristic narrowing percentage derived from vessel pixel density.
/// Not a clinical measurement.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct StenosisEstimate(f64);

impl StenosisEstimate {
    pub(crate) fn new(percent: f64) -> Self {
        Self(percent)
    }

    pub fn percent(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for StenosisEstimate {
    type Error = String;

    fn try_from(percent: f64) -> Result<Self, Self::Error> {
        if percent.is_finite() && (0.0..=MAX_PERCENT).contains(&percent) {
            Ok(Self(percent))
        } else {
            Err(format!(
                "stenosis estimate {} outside 0..={}",
                percent, MAX_PERCENT
            ))
        }
    }
}

impl From<StenosisEstimate> for f64 {
    fn from(estimate: StenosisEstimate) -> Self {
        estimate.0
    }
}

impl fmt::Display for StenosisEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

/// One analyzed frame. `frame_index` is the position in the source stream,
/// not the count of analyzed frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameResult {
    pub frame_index: u64,
    pub artery: ArteryLabel,
    pub stenosis: StenosisEstimate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_serializes_as_plain_number() {
        let json = serde_json::to_string(&StenosisEstimate::new(42.5)).unwrap();
        assert_eq!(json, "42.5");
        let back: StenosisEstimate = serde_json::from_str(&json).unwrap();
        assert_eq!(back.percent(), 42.5);
    }

    #[test]
    fn test_out_of_range_estimate_rejected() {
        assert!(serde_json::from_str::<StenosisEstimate>("-5.0").is_err());
        assert!(serde_json::from_str::<StenosisEstimate>("100.5").is_err());
        assert!(StenosisEstimate::try_from(f64::NAN).is_err());

        let result: Result<FrameResult, _> = serde_json::from_str(
            r#"{ "frame_index": 0, "artery": "LAD", "stenosis": 250.0 }"#,
        );
        assert!(result.is_err());
    }
}
