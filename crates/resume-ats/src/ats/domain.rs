use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::taxonomy::SkillDefinition;

/// Metadata about the source document; only used for format-specific checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub format: String,
    pub size: u64,
}

impl FileInfo {
    pub fn new(format: impl Into<String>, size: u64) -> Self {
        Self {
            format: format.into(),
            size,
        }
    }

    /// Lower-cased format token with any leading dot or MIME prefix removed.
    pub fn normalized_format(&self) -> String {
        let trimmed = self.format.trim().trim_start_matches('.').to_ascii_lowercase();
        match trimmed.as_str() {
            "application/pdf" => "pdf".to_string(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                "docx".to_string()
            }
            "application/msword" => "doc".to_string(),
            "text/plain" => "txt".to_string(),
            "text/markdown" | "text/x-markdown" => "md".to_string(),
            "text/html" => "html".to_string(),
            "application/rtf" | "text/rtf" => "rtf".to_string(),
            _ => trimmed
                .rsplit('/')
                .next()
                .unwrap_or_default()
                .to_string(),
        }
    }
}

impl Default for FileInfo {
    fn default() -> Self {
        Self::new("txt", 0)
    }
}

/// Categories of ATS compatibility problems, each with its own deduction rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueType {
    ComplexFormatting,
    MissingDates,
    NonstandardHeaders,
    TableLayouts,
    ContactFormat,
    MissingKeywords,
    IncompatibleFileFormat,
    FileSizeLarge,
}

impl IssueType {
    pub const ALL: [IssueType; 8] = [
        IssueType::ComplexFormatting,
        IssueType::MissingDates,
        IssueType::NonstandardHeaders,
        IssueType::TableLayouts,
        IssueType::ContactFormat,
        IssueType::MissingKeywords,
        IssueType::IncompatibleFileFormat,
        IssueType::FileSizeLarge,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            IssueType::ComplexFormatting => "COMPLEX_FORMATTING",
            IssueType::MissingDates => "MISSING_DATES",
            IssueType::NonstandardHeaders => "NONSTANDARD_HEADERS",
            IssueType::TableLayouts => "TABLE_LAYOUTS",
            IssueType::ContactFormat => "CONTACT_FORMAT",
            IssueType::MissingKeywords => "MISSING_KEYWORDS",
            IssueType::IncompatibleFileFormat => "INCOMPATIBLE_FILE_FORMAT",
            IssueType::FileSizeLarge => "FILE_SIZE_LARGE",
        }
    }

    pub const fn severity(self) -> Severity {
        match self {
            IssueType::MissingDates
            | IssueType::MissingKeywords
            | IssueType::IncompatibleFileFormat => Severity::High,
            IssueType::ComplexFormatting | IssueType::TableLayouts | IssueType::ContactFormat => {
                Severity::Medium
            }
            IssueType::NonstandardHeaders | IssueType::FileSizeLarge => Severity::Low,
        }
    }

    /// Formatting-class issues are mirrored into the analyzer's `formatting_issues` list.
    pub const fn is_formatting(self) -> bool {
        matches!(
            self,
            IssueType::ComplexFormatting | IssueType::TableLayouts | IssueType::NonstandardHeaders
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

/// Atomic penalty unit produced by the analyzers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub message: String,
    pub severity: Severity,
    pub fix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl Issue {
    pub fn new(issue_type: IssueType, message: impl Into<String>, fix: impl Into<String>) -> Self {
        Self {
            issue_type,
            message: message.into(),
            severity: issue_type.severity(),
            fix: fix.into(),
            detected: None,
            section: None,
        }
    }

    pub fn with_detected(mut self, detected: impl Into<String>) -> Self {
        self.detected = Some(detected.into());
        self
    }

    pub fn in_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Human-readable improvement derived from this issue.
    pub fn improvement(&self) -> String {
        format!("Suggestion: {} ({})", self.fix, self.message)
    }
}

/// Keyword overlap between the resume and a target job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordAnalysis {
    pub found: Vec<String>,
    pub missing: Vec<String>,
    pub relevance_score: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_years: Option<u32>,
    pub detected_years: u32,
}

/// A required skill the resume lacks, with related skills it already shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingSkill {
    pub skill: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<Vec<SkillDefinition>>,
}

/// Complete output of one analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsAnalysisResult {
    pub score: u8,
    pub issues: Vec<Issue>,
    pub improvements: Vec<String>,
    pub section_scores: BTreeMap<String, u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<KeywordAnalysis>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_skills: Vec<MissingSkill>,
    pub parse_rate: u8,
    pub recommendation: String,
}

impl AtsAnalysisResult {
    pub fn has_issue(&self, issue_type: IssueType) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.issue_type == issue_type)
    }

    pub fn issues_of(&self, issue_type: IssueType) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(move |issue| issue.issue_type == issue_type)
    }
}
