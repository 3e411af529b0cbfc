mod rules;
mod sections;

pub use sections::{
    extract_sections, is_standard_header, normalize_header, HeaderStyle, Section,
    UNNAMED_SECTION,
};

pub(crate) use rules::{
    bullet_marker, file_issues, has_markup, is_decorative, is_table_line, years_of_experience,
};

use super::domain::Issue;
use tracing::debug;

/// Stateless inspector for plain resume text.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextAnalyzer;

impl TextAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, resume_text: &str) -> TextAnalysis {
        if resume_text.trim().is_empty() {
            return TextAnalysis::default();
        }

        let sections = extract_sections(resume_text);

        let mut issues = Vec::new();
        issues.extend(rules::decorative_glyph_issues(resume_text));
        issues.extend(rules::markup_issues(resume_text));
        issues.extend(rules::table_issues(resume_text));
        issues.extend(rules::header_issues(&sections));
        issues.extend(rules::date_issues(&sections));
        issues.extend(rules::contact_issues(resume_text));

        let formatting_issues = issues
            .iter()
            .filter(|issue| issue.issue_type.is_formatting())
            .map(|issue| issue.message.clone())
            .collect();

        debug!(
            sections = sections.len(),
            issues = issues.len(),
            "analyzed resume text"
        );

        TextAnalysis {
            issues,
            formatting_issues,
            sections,
        }
    }
}

/// Findings from one pass over the resume text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextAnalysis {
    pub issues: Vec<Issue>,
    pub formatting_issues: Vec<String>,
    pub sections: Vec<Section>,
}
