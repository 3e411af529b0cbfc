use once_cell::sync::Lazy;
use regex::Regex;

/// Key used for content that sits outside any recognized header.
pub const UNNAMED_SECTION: &str = "document";

static MARKDOWN_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+?)\s*#*\s*$").expect("valid heading pattern"));

const STANDARD_HEADERS: &[&str] = &[
    "summary",
    "professional summary",
    "executive summary",
    "career summary",
    "profile",
    "professional profile",
    "objective",
    "career objective",
    "experience",
    "professional experience",
    "work experience",
    "relevant experience",
    "employment history",
    "employment",
    "work history",
    "career history",
    "volunteer experience",
    "education",
    "education and training",
    "skills",
    "technical skills",
    "core competencies",
    "key skills",
    "certifications",
    "licenses and certifications",
    "licenses",
    "projects",
    "publications",
    "awards",
    "honors and awards",
    "languages",
    "interests",
    "references",
    "contact",
    "contact information",
    "training",
    "professional development",
    "affiliations",
];

/// How a section header was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    Markdown { level: usize },
    AllCaps,
    Unnamed,
}

/// A contiguous block of resume text under one header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub header: Option<String>,
    pub style: HeaderStyle,
    /// 1-based line number of the header (or first content line when unnamed).
    pub line: usize,
    pub lines: Vec<String>,
}

impl Section {
    /// Normalized key used for section scores.
    pub fn key(&self) -> String {
        self.header
            .as_deref()
            .map(normalize_header)
            .unwrap_or_else(|| UNNAMED_SECTION.to_string())
    }

    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_standard(&self) -> bool {
        match &self.header {
            Some(header) => is_standard_header(header),
            None => true,
        }
    }

    pub fn is_experience(&self) -> bool {
        let key = self.key();
        key.contains("experience") || key.contains("employment") || key.contains("work history")
    }

    pub fn has_content(&self) -> bool {
        self.lines.iter().any(|line| !line.trim().is_empty())
    }
}

pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(':')
        .replace('&', " and ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub fn is_standard_header(raw: &str) -> bool {
    let normalized = normalize_header(raw);
    STANDARD_HEADERS.contains(&normalized.as_str())
}

/// Split resume text into sections.
///
/// Markdown headings win when present; otherwise ALL-CAPS lines act as
/// headers. Text before the first header (or the whole document when no
/// header exists) lands in one unnamed section.
pub fn extract_sections(text: &str) -> Vec<Section> {
    let lines: Vec<&str> = text.lines().collect();

    let markdown: Vec<(usize, usize, String)> = lines
        .iter()
        .enumerate()
        .filter_map(|(index, line)| {
            MARKDOWN_HEADING.captures(line.trim()).map(|caps| {
                (index, caps[1].len(), caps[2].trim().to_string())
            })
        })
        .collect();

    let headers: Vec<(usize, HeaderStyle, String)> = if markdown.is_empty() {
        all_caps_headers(&lines)
    } else {
        let title = document_title(&markdown, &lines);
        markdown
            .into_iter()
            .filter(|(index, _, _)| Some(*index) != title)
            .map(|(index, level, text)| (index, HeaderStyle::Markdown { level }, text))
            .collect()
    };

    build_sections(&lines, &headers)
}

/// A lone `#` heading on the first line, followed only by deeper headings, is
/// the document title (usually the candidate's name) rather than a section.
fn document_title(markdown: &[(usize, usize, String)], lines: &[&str]) -> Option<usize> {
    let (first_index, first_level, text) = markdown.first()?;
    let first_content = lines.iter().position(|line| !line.trim().is_empty())?;
    if *first_level != 1 || *first_index != first_content || markdown.len() < 2 {
        return None;
    }
    if is_standard_header(text) {
        return None;
    }
    let only_top = markdown.iter().filter(|(_, level, _)| *level == 1).count() == 1;
    only_top.then_some(*first_index)
}

fn all_caps_headers(lines: &[&str]) -> Vec<(usize, HeaderStyle, String)> {
    let first_content = lines.iter().position(|line| !line.trim().is_empty());

    lines
        .iter()
        .enumerate()
        .filter(|(index, line)| {
            // A leading banner is the candidate's name unless it is itself a section header.
            (Some(*index) != first_content || is_standard_header(line)) && is_all_caps_heading(line)
        })
        .map(|(index, line)| (index, HeaderStyle::AllCaps, line.trim().to_string()))
        .collect()
}

fn is_all_caps_heading(line: &str) -> bool {
    let trimmed = line.trim().trim_end_matches(':');
    if trimmed.is_empty() || trimmed.chars().count() > 60 {
        return false;
    }

    let letters: Vec<char> = trimmed.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 3
        && letters.iter().all(|c| c.is_uppercase())
        && trimmed
            .chars()
            .all(|c| c.is_alphabetic() || c == ' ' || c == '&' || c == '/' || c == '-' || c == ',')
}

fn build_sections(lines: &[&str], headers: &[(usize, HeaderStyle, String)]) -> Vec<Section> {
    let mut sections = Vec::new();

    let first_header = headers.first().map(|(index, _, _)| *index).unwrap_or(lines.len());
    let preamble: Vec<String> = lines[..first_header]
        .iter()
        .filter(|line| !is_title_line(line))
        .map(|line| line.to_string())
        .collect();
    let preamble_start = lines[..first_header]
        .iter()
        .position(|line| !line.trim().is_empty() && !is_title_line(line));
    if let Some(start) = preamble_start {
        sections.push(Section {
            header: None,
            style: HeaderStyle::Unnamed,
            line: start + 1,
            lines: preamble,
        });
    }

    for (position, (index, style, text)) in headers.iter().enumerate() {
        let end = headers
            .get(position + 1)
            .map(|(next, _, _)| *next)
            .unwrap_or(lines.len());
        let body = lines[index + 1..end]
            .iter()
            .map(|line| line.to_string())
            .collect();
        sections.push(Section {
            header: Some(text.clone()),
            style: *style,
            line: index + 1,
            lines: body,
        });
    }

    sections
}

/// Only the excluded document title can still look like a heading at this point.
fn is_title_line(line: &str) -> bool {
    line.trim_start().starts_with("# ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_markdown_sections() {
        let text = "Jane Doe\njane@example.com\n\n# Experience\nAcme | 2020 - Present\n\n## Education\nState U";
        let sections = extract_sections(text);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].key(), UNNAMED_SECTION);
        assert_eq!(sections[1].key(), "experience");
        assert!(sections[1].is_experience());
        assert_eq!(sections[2].key(), "education");
        assert_eq!(sections[2].line, 7);
    }

    #[test]
    fn single_top_heading_is_treated_as_title() {
        let text = "# Jane Doe\n## Summary\nBuilder.\n## Skills\n- Rust";
        let sections = extract_sections(text);
        let keys: Vec<String> = sections.iter().map(Section::key).collect();
        assert_eq!(keys, vec!["summary", "skills"]);
    }

    #[test]
    fn falls_back_to_all_caps_headers() {
        let text = "JANE DOE\njane@example.com\nEXPERIENCE\nAcme 2019 - 2021\nEDUCATION\nState U";
        let sections = extract_sections(text);
        let keys: Vec<String> = sections.iter().map(Section::key).collect();
        assert_eq!(keys, vec![UNNAMED_SECTION, "experience", "education"]);
    }

    #[test]
    fn headerless_text_is_one_unnamed_section() {
        let sections = extract_sections("just a paragraph of text\nand another line");
        assert_eq!(sections.len(), 1);
        assert!(sections[0].header.is_none());
        assert!(sections[0].is_standard());
    }

    #[test]
    fn normalizes_header_variants() {
        assert!(is_standard_header("Professional Experience:"));
        assert!(is_standard_header("  SKILLS "));
        assert!(is_standard_header("Licenses & Certifications"));
        assert!(!is_standard_header("My Amazing Journey"));
    }
}
