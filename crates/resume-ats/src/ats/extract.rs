use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static SCRIPT_OR_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>")
        .expect("valid script pattern")
});

static COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment pattern"));

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag pattern"));

/// Visible text of an HTML document with entities decoded and whitespace collapsed.
pub fn extract_text(html: &str) -> String {
    let without_scripts = SCRIPT_OR_STYLE.replace_all(html, " ");
    let without_comments = COMMENT.replace_all(&without_scripts, " ");
    let without_tags = TAG.replace_all(&without_comments, " ");
    let decoded = html_escape::decode_html_entities(&without_tags);

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A scraped or hand-written job posting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifications: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsibilities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSections {
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
}

impl JobSections {
    /// Flattened text suitable as a job description for keyword matching.
    pub fn to_text(&self) -> String {
        std::iter::once(self.title.as_str())
            .chain(std::iter::once(self.description.as_str()))
            .chain(self.requirements.iter().map(String::as_str))
            .chain(self.responsibilities.iter().map(String::as_str))
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn extract_sections(posting: &JobPosting) -> JobSections {
    JobSections {
        title: posting.title.clone(),
        description: posting.description.clone().unwrap_or_default(),
        requirements: posting.qualifications.clone().unwrap_or_default(),
        responsibilities: posting.responsibilities.clone().unwrap_or_default(),
    }
}
