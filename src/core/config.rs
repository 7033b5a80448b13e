//! 分析参数配置
//!
//! Every constant of the pipeline lives here with its historical default.
//! None of them is calibrated; they are kept configurable so experiments do
//! not need a rebuild.

use crate::core::error::AnalysisError;
use crate::core::vision::result::MAX_PERCENT;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Luminance strictly above this value marks a vessel pixel.
    pub threshold: u8,
    /// Vessel density at or above which no narrowing is reported.
    pub density_ceiling: f64,
    pub stenosis_scale: f64,
    pub max_stenosis: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            threshold: 50,
            density_ceiling: 0.3,
            stenosis_scale: 300.0,
            max_stenosis: 99.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Analyze every `stride`-th decoded video frame.
    pub stride: u64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self { stride: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// RGB color written over every vessel pixel.
    pub highlight: [u8; 3],
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            highlight: [255, 0, 0],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub analyzer: AnalyzerConfig,
    pub sampling: SamplingConfig,
    pub annotation: AnnotationConfig,
}

impl AssistantConfig {
    pub fn from_json5_str(text: &str) -> Result<Self, AnalysisError> {
        let config: AssistantConfig = json5::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, AnalysisError> {
        info!("📖 Loading config: {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_json5_str(&text)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.sampling.stride == 0 {
            return Err(AnalysisError::Config(
                "sampling.stride must be at least 1".to_string(),
            ));
        }

        let analyzer = &self.analyzer;
        let numbers = [
            ("analyzer.density_ceiling", analyzer.density_ceiling),
            ("analyzer.stenosis_scale", analyzer.stenosis_scale),
            ("analyzer.max_stenosis", analyzer.max_stenosis),
        ];
        for (name, value) in numbers {
            if !value.is_finite() {
                return Err(AnalysisError::Config(format!("{} must be finite", name)));
            }
        }
        if !(0.0..=MAX_PERCENT).contains(&analyzer.max_stenosis) {
            return Err(AnalysisError::Config(format!(
                "analyzer.max_stenosis must be within 0..={}",
                MAX_PERCENT
            )));
        }

        Ok(())
    }
}
