pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod vision;

pub use config::{AnalyzerConfig, AnnotationConfig, AssistantConfig, SamplingConfig};
pub use error::AnalysisError;
pub use pipeline::{AnalysisPipeline, VideoAnalysis};
