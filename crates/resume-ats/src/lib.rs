pub mod ats;
pub mod config;
pub mod error;
pub mod telemetry;

pub use ats::{AtsAnalysisResult, AtsAnalyzer, FileInfo, Issue, IssueType, SkillMatcher};
pub use config::AppConfig;
pub use error::AppError;
