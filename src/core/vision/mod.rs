//! 血管分析 - 固定阈值二值化 + 密度换算狭窄率 + 位置推断血管分支

pub mod analyzer;
pub mod artery;
pub mod frame;
pub mod mask;
pub mod result;

pub use analyzer::{VesselAnalysis, VesselAnalyzer};
pub use artery::{recognize_artery, recognize_midpoint, ArteryLabel};
pub use frame::{luma, Frame};
pub use mask::Mask;
pub use result::{FrameResult, StenosisEstimate};
