use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::analyzer::{years_of_experience, Section};
use super::domain::{Issue, IssueType, KeywordAnalysis, MissingSkill};
use super::scoring::ScoringConfig;
use super::taxonomy::{contains_term, SkillMatcher};

const MIN_KEYWORD_LEN: usize = 3;
const MAX_LISTED_KEYWORDS: usize = 10;

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9+#]*").expect("valid word pattern"));

static REQUIRED_YEARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})\s*\+?\s*(?:years?|yrs?)\b").expect("valid years pattern")
});

const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her", "was",
    "one", "our", "out", "has", "have", "his", "how", "its", "may", "new", "now", "own", "who",
    "did", "get", "let", "put", "say", "she", "too", "use", "with", "that", "this", "will",
    "your", "from", "they", "been", "were", "what", "when", "where", "which", "while", "into",
    "than", "then", "them", "these", "those", "their", "there", "about", "also", "must",
    "should", "would", "could", "such", "each", "other", "more", "most", "some", "very", "just",
    "over", "only", "well", "able", "work", "working", "team", "join", "role", "looking",
    "including", "experience", "years", "year", "plus", "strong", "skills", "ability",
    "knowledge", "required", "preferred", "responsibilities", "requirements", "candidate",
    "ideal", "etc", "within", "across", "using", "like", "based", "help", "make", "who",
];

/// Everything derived from comparing a resume with one job description.
#[derive(Debug, Clone, PartialEq)]
pub struct JobMatch {
    pub keywords: KeywordAnalysis,
    pub issues: Vec<Issue>,
    pub missing_skills: Vec<MissingSkill>,
    pub suggestions: Vec<String>,
}

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Distinct lower-cased job keywords in first-seen order, followed by any
/// taxonomy skills the description mentions.
pub fn extract_keywords(job_description: &str, matcher: &SkillMatcher) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();

    for word in WORD.find_iter(job_description) {
        let word = word.as_str().to_lowercase();
        if word.chars().count() < MIN_KEYWORD_LEN || is_stop_word(&word) {
            continue;
        }
        if seen.insert(word.clone()) {
            keywords.push(word);
        }
    }

    for skill in matcher.skills_in_text(job_description) {
        let name = skill.name.to_lowercase();
        if seen.insert(name.clone()) {
            keywords.push(name);
        }
    }

    keywords
}

/// Largest `N years` / `N+ years` figure in the description.
pub fn required_years(job_description: &str) -> Option<u32> {
    REQUIRED_YEARS
        .captures_iter(job_description)
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .max()
}

pub fn match_job(
    resume_text: &str,
    sections: &[Section],
    job_description: &str,
    matcher: &SkillMatcher,
    config: &ScoringConfig,
    current_year: i32,
) -> JobMatch {
    let resume = resume_text.to_lowercase();
    let resume_skills: Vec<String> = matcher
        .skills_in_text(resume_text)
        .into_iter()
        .map(|skill| skill.name.clone())
        .collect();

    let (found, missing): (Vec<String>, Vec<String>) = extract_keywords(job_description, matcher)
        .into_iter()
        .partition(|keyword| {
            contains_term(&resume, keyword)
                || resume_skills
                    .iter()
                    .any(|skill| matcher.same_skill(skill, keyword))
        });

    let total = found.len() + missing.len();
    let relevance_score = if total == 0 {
        1.0
    } else {
        found.len() as f32 / total as f32
    };

    let mut issues = Vec::new();
    if relevance_score < config.keyword_relevance_floor && !missing.is_empty() {
        let listed: Vec<&str> = missing
            .iter()
            .take(MAX_LISTED_KEYWORDS)
            .map(String::as_str)
            .collect();
        issues.push(
            Issue::new(
                IssueType::MissingKeywords,
                format!(
                    "Only {:.0}% of job keywords found in resume",
                    relevance_score * 100.0
                ),
                format!("Add relevant keywords: {}", listed.join(", ")),
            )
            .with_detected(listed.join(", ")),
        );
    }

    let required_skills: Vec<String> = matcher
        .skills_in_text(job_description)
        .into_iter()
        .map(|skill| skill.name.clone())
        .collect();
    let missing_skills = matcher.missing_skills(&resume_skills, &required_skills);
    let suggestions = missing_skills.iter().filter_map(skill_suggestion).collect();

    JobMatch {
        keywords: KeywordAnalysis {
            found,
            missing,
            relevance_score,
            required_years: required_years(job_description),
            detected_years: years_of_experience(sections, current_year),
        },
        issues,
        missing_skills,
        suggestions,
    }
}

fn skill_suggestion(missing: &MissingSkill) -> Option<String> {
    let alternatives = missing.alternatives.as_ref()?;
    if alternatives.is_empty() {
        return None;
    }
    let names: Vec<&str> = alternatives.iter().map(|skill| skill.name.as_str()).collect();
    Some(format!(
        "Suggestion: Consider adding \"{}\" or related skills: {}",
        missing.skill,
        names.join(", ")
    ))
}
