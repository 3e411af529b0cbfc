use once_cell::sync::Lazy;
use regex::Regex;

use super::super::domain::{FileInfo, Issue, IssueType};
use super::super::scoring::ScoringConfig;
use super::sections::Section;

const MONTH: &str = r"(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?";

static DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    let date = format!(r"(?:(?:0?[1-9]|1[0-2])/(?:19|20)\d{{2}}|{MONTH}\s+(?:19|20)\d{{2}}|(?:19|20)\d{{2}})");
    Regex::new(&format!(
        r"(?i)\b({date})\s*(?:-|–|—|\bto\b)\s*({date}|present\b|current\b)"
    ))
    .expect("valid date range pattern")
});

static DATE_FRAGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:19|20)\d{2}\b(?:\s*(?:-|–|—|to|until|till)\s*[a-z0-9/]+)?")
        .expect("valid date fragment pattern")
});

static YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(19|20)\d{2}").expect("valid year pattern"));

static HTML_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?[a-zA-Z][^>]*>").expect("valid tag pattern"));

static STYLE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[^}]*\}").expect("valid style pattern"));

static TABLE_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\|?\s*:?-{3,}:?\s*(\|\s*:?-{3,}:?\s*)+\|?$").expect("valid table pattern")
});

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}")
        .expect("valid email pattern")
});

static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]\d{4}").expect("valid phone pattern"));

const ACCEPTED_FORMATS: &[&str] = &["pdf", "docx", "doc", "txt", "rtf", "md", "markdown", "html", "htm"];

const CONTACT_WINDOW: usize = 5;

/// Symbols that ATS parsers drop or mangle. Ordinary accented letters and
/// typographic dashes are not decorative.
pub(crate) fn is_decorative(c: char) -> bool {
    matches!(
        c as u32,
        0x2022 | 0x2023 | 0x2043 | 0x2219 | 0x25A0..=0x25FF
            | 0x2190..=0x21FF
            | 0x2500..=0x257F
            | 0x2600..=0x27BF
            | 0x2B00..=0x2BFF
            | 0xE000..=0xF8FF
            | 0xFE0F
            | 0x1F000..=0x1FAFF
    )
}

pub(crate) fn is_bullet_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some('-' | '*' | '+') => chars.next().map_or(true, char::is_whitespace),
        Some(c) if is_decorative(c) => true,
        Some(c) if c.is_ascii_digit() => {
            let rest = trimmed.trim_start_matches(|d: char| d.is_ascii_digit());
            rest.starts_with(". ") || rest.starts_with(") ")
        }
        _ => false,
    }
}

pub(crate) fn bullet_marker(line: &str) -> Option<char> {
    if !is_bullet_line(line) {
        return None;
    }
    line.trim_start()
        .chars()
        .next()
        .filter(|c| !c.is_ascii_digit())
}

pub(crate) fn decorative_glyph_issues(text: &str) -> Vec<Issue> {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let mut glyphs: Vec<char> = line.chars().filter(|c| is_decorative(*c)).collect();
            if glyphs.is_empty() {
                return None;
            }
            glyphs.sort_unstable();
            glyphs.dedup();
            let detected: String = glyphs
                .iter()
                .map(char::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            Some(
                Issue::new(
                    IssueType::ComplexFormatting,
                    format!("Decorative glyphs on line {}", index + 1),
                    "Replace decorative symbols with plain hyphen (-) bullets and standard characters",
                )
                .with_detected(detected),
            )
        })
        .collect()
}

fn find_markup(line: &str) -> Option<regex::Match<'_>> {
    HTML_TAG.find(line).or_else(|| STYLE_BLOCK.find(line))
}

pub(crate) fn has_markup(line: &str) -> bool {
    find_markup(line).is_some()
}

pub(crate) fn markup_issues(text: &str) -> Vec<Issue> {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let found = find_markup(line)?;
            Some(
                Issue::new(
                    IssueType::ComplexFormatting,
                    format!("Markup or styling code on line {}", index + 1),
                    "Use plain text without HTML tags or inline styling",
                )
                .with_detected(found.as_str()),
            )
        })
        .collect()
}

pub(crate) fn is_table_line(line: &str) -> bool {
    let trimmed = line.trim();
    if TABLE_SEPARATOR.is_match(trimmed) {
        return true;
    }
    trimmed.len() > 1
        && trimmed.starts_with('|')
        && trimmed.ends_with('|')
        && trimmed.matches('|').count() >= 3
}

pub(crate) fn table_issues(text: &str) -> Vec<Issue> {
    let rows = text.lines().filter(|line| is_table_line(line)).count();
    if rows == 0 {
        return Vec::new();
    }
    vec![Issue::new(
        IssueType::TableLayouts,
        "Table layout detected",
        "Convert tables into bullet points or short paragraphs",
    )
    .with_detected(format!("{rows} table row(s)"))]
}

pub(crate) fn header_issues(sections: &[Section]) -> Vec<Issue> {
    sections
        .iter()
        .filter(|section| !section.is_standard())
        .filter_map(|section| {
            let header = section.header.as_deref()?;
            Some(
                Issue::new(
                    IssueType::NonstandardHeaders,
                    format!("Non-standard section header \"{header}\" on line {}", section.line),
                    "Use standard section headings such as Professional Summary, Experience, Education and Skills",
                )
                .with_detected(header)
                .in_section(section.key()),
            )
        })
        .collect()
}

/// Group experience lines into entries: a plain line after a blank line or
/// after bullet lines starts a new entry.
pub(crate) fn experience_entries(section: &Section) -> Vec<Vec<&str>> {
    let mut entries: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut previous_blank = true;
    let mut previous_bullet = false;

    for line in &section.lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            previous_blank = true;
            continue;
        }

        let bullet = is_bullet_line(trimmed);
        if !bullet && (previous_blank || previous_bullet) && !current.is_empty() {
            entries.push(std::mem::take(&mut current));
        }
        current.push(trimmed);
        previous_blank = false;
        previous_bullet = bullet;
    }

    if !current.is_empty() {
        entries.push(current);
    }

    entries
}

pub(crate) fn has_approved_date_range(text: &str) -> bool {
    DATE_RANGE.is_match(text)
}

pub(crate) fn date_issues(sections: &[Section]) -> Vec<Issue> {
    let mut issues = Vec::new();

    for section in sections.iter().filter(|section| section.is_experience()) {
        for (index, entry) in experience_entries(section).iter().enumerate() {
            let joined = entry.join("\n");
            if has_approved_date_range(&joined) {
                continue;
            }

            let mut issue = Issue::new(
                IssueType::MissingDates,
                format!("Missing or unclear dates in experience entry {}", index + 1),
                "Add start and end dates such as MM/YYYY - MM/YYYY or MM/YYYY - Present",
            )
            .in_section(section.key());
            if let Some(fragment) = DATE_FRAGMENT.find(&joined) {
                issue = issue.with_detected(fragment.as_str());
            }
            issues.push(issue);
        }
    }

    issues
}

pub(crate) fn contact_issues(text: &str) -> Vec<Issue> {
    let window: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(CONTACT_WINDOW)
        .collect();
    if window.is_empty() {
        return Vec::new();
    }

    let header = window.join("\n");
    if EMAIL.is_match(&header) || PHONE.is_match(&header) {
        return Vec::new();
    }

    vec![Issue::new(
        IssueType::ContactFormat,
        "Contact information not found at the top of the document",
        "Place your e-mail address and phone number in the first lines as plain text",
    )]
}

/// Issues derived from the source file's metadata rather than its text.
pub(crate) fn file_issues(file: &FileInfo, config: &ScoringConfig) -> Vec<Issue> {
    let mut issues = Vec::new();
    let format = file.normalized_format();

    if !format.is_empty() && !ACCEPTED_FORMATS.contains(&format.as_str()) {
        issues.push(
            Issue::new(
                IssueType::IncompatibleFileFormat,
                format!("File format '{format}' is not reliably parsed by ATS software"),
                "Submit the resume as a text-based PDF or DOCX file",
            )
            .with_detected(format.clone()),
        );
    }

    let limit = if format == "docx" || format == "doc" {
        config.max_docx_bytes
    } else {
        config.max_file_bytes
    };
    if file.size > limit {
        issues.push(
            Issue::new(
                IssueType::FileSizeLarge,
                format!(
                    "File size {} KB exceeds the {} KB limit for {} uploads",
                    file.size / 1024,
                    limit / 1024,
                    if format.is_empty() { "resume" } else { format.as_str() }
                ),
                "Remove embedded images and fonts to reduce the file size",
            )
            .with_detected(file.size.to_string()),
        );
    }

    issues
}

/// Sum of years covered by approved date ranges; open ranges end at `current_year`.
/// Ranges are read per experience entry, so a range may wrap onto the next line.
pub(crate) fn years_of_experience(sections: &[Section], current_year: i32) -> u32 {
    sections
        .iter()
        .filter(|section| section.is_experience())
        .flat_map(|section| {
            experience_entries(section)
                .into_iter()
                .map(|entry| entry.join("\n"))
                .collect::<Vec<_>>()
        })
        .map(|entry| {
            DATE_RANGE
                .captures_iter(&entry)
                .map(|caps| range_years(&caps[1], &caps[2], current_year))
                .sum::<u32>()
        })
        .sum()
}

fn range_years(start: &str, end: &str, current_year: i32) -> u32 {
    let start = YEAR
        .find(start)
        .and_then(|year| year.as_str().parse::<i32>().ok());
    let end = YEAR
        .find(end)
        .and_then(|year| year.as_str().parse::<i32>().ok())
        .unwrap_or(current_year);
    match start {
        Some(start) if end >= start => (end - start) as u32,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::super::sections::extract_sections;
    use super::*;

    #[test]
    fn approves_standard_date_ranges() {
        assert!(has_approved_date_range("Acme | 01/2020 - Present"));
        assert!(has_approved_date_range("Acme | 03/2018 - 11/2021"));
        assert!(has_approved_date_range("Acme, January 2019 – March 2022"));
        assert!(has_approved_date_range("Acme 2020 - Present"));
        assert!(has_approved_date_range("Acme 2016 to 2019"));
        assert!(has_approved_date_range("Acme Sept. 2021 - current"));
    }

    #[test]
    fn rejects_informal_dates() {
        assert!(!has_approved_date_range("Acme | 2023 to now"));
        assert!(!has_approved_date_range("Acme | since 2019"));
        assert!(!has_approved_date_range("Acme | 2015"));
    }

    #[test]
    fn decorative_glyphs_flag_each_line() {
        let issues = decorative_glyph_issues("★ Star Performer ★\n• Managed team\n- Normal bullet\nRésumé – café");
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].detected.as_deref(), Some("★"));
        assert_eq!(issues[1].detected.as_deref(), Some("•"));
    }

    #[test]
    fn single_pipe_is_not_a_table() {
        assert!(!is_table_line("Company Name | 2020 - Present"));
        assert!(is_table_line("| Skill | Years |"));
        assert!(is_table_line("|---|---|"));
        assert_eq!(table_issues("| a | b |\n|---|---|\n| 1 | 2 |").len(), 1);
    }

    #[test]
    fn splits_experience_entries() {
        let sections = extract_sections(
            "# Experience\nSenior Engineer\nAcme | 2019 - 2021\n- Shipped\n\nEngineer\nBeta | 2017 - 2019\n- Fixed",
        );
        let entries = experience_entries(&sections[0]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0][0], "Senior Engineer");
        assert_eq!(entries[1][1], "Beta | 2017 - 2019");
    }

    #[test]
    fn reports_informal_fragment_as_detected() {
        let sections = extract_sections("# Experience\nAcme | 2023 to now\n- Shipped");
        let issues = date_issues(&sections);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue_type, IssueType::MissingDates);
        assert_eq!(issues[0].detected.as_deref(), Some("2023 to now"));
    }

    #[test]
    fn dates_outside_experience_are_ignored() {
        let sections = extract_sections("# Education\nState University | 2015");
        assert!(date_issues(&sections).is_empty());
    }

    #[test]
    fn contact_requires_email_or_phone_near_top() {
        assert!(contact_issues("Jane Doe\njane@example.com | 555-123-4567").is_empty());
        assert!(contact_issues("Jane Doe\n(555) 123-4567").is_empty());
        assert_eq!(contact_issues("Jane Doe\nChicago, IL").len(), 1);
        assert!(contact_issues("   \n").is_empty());
    }

    #[test]
    fn flags_unsupported_format_and_large_docx() {
        let config = ScoringConfig::default();
        let issues = file_issues(&FileInfo::new("png", 10), &config);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue_type, IssueType::IncompatibleFileFormat);

        let issues = file_issues(&FileInfo::new("docx", config.max_docx_bytes + 1), &config);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue_type, IssueType::FileSizeLarge);

        assert!(file_issues(&FileInfo::new("pdf", config.max_docx_bytes + 1), &config).is_empty());
    }

    #[test]
    fn sums_years_from_experience_ranges() {
        let sections = extract_sections(
            "# Experience\nAcme | 01/2018 - 12/2020\nBeta | 2021 - Present\n# Education\nState | 2010 - 2014",
        );
        assert_eq!(years_of_experience(&sections, 2024), 5);
    }

    #[test]
    fn wrapped_range_counts_toward_years() {
        let sections = extract_sections("# Experience\nAcme | 01/2015 -\nPresent\n- Shipped");
        assert!(date_issues(&sections).is_empty());
        assert_eq!(years_of_experience(&sections, 2025), 10);
    }
}
