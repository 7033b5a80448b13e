pub mod assistant;
pub mod models;

pub use assistant::{AngiographyAssistant, AssistantReport, VideoOutcome};
pub use models::summary::{AnalysisMode, AnalysisSummary};
