//! ATS compatibility analysis for plain resume text.
//!
//! Text rules raise [`Issue`]s, the scoring rubric turns them into a 0-100
//! score, and the taxonomy and alignment modules compare resume content with a
//! target job. [`AtsAnalyzer`] ties the pieces together; [`ScoreResumeTool`]
//! and [`ats_router`] expose it to agents and HTTP clients.

pub mod alignment;
pub mod analyzer;
pub mod domain;
pub mod extract;
pub mod keywords;
pub mod router;
pub mod scoring;
pub mod service;
pub mod taxonomy;
pub mod tool;

#[cfg(test)]
mod tests;

pub use alignment::{
    AlignmentWeights, ContentItem, ContentMetadata, ContentScore, ContentType, DateRange,
    JobAlignmentScorer, JobContext, Organization, ScoreComponents, Sector,
};
pub use analyzer::{extract_sections, Section, TextAnalysis, TextAnalyzer};
pub use domain::{
    AtsAnalysisResult, FileInfo, Issue, IssueType, KeywordAnalysis, MissingSkill, Severity,
};
pub use extract::{extract_text, JobPosting, JobSections};
pub use router::ats_router;
pub use scoring::{DeductionRule, Recommendation, ScoringConfig, ScoringEngine};
pub use service::{AtsAnalyzer, AtsService};
pub use taxonomy::{SkillCategory, SkillDefinition, SkillMatcher, TaxonomyError};
pub use tool::{AgentTool, ScoreResumeInput, ScoreResumeTool, ToolError};
