use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::taxonomy::SkillMatcher;

const SECTOR_FALLBACK: f64 = 0.3;
const CONFIDENCE: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Experience,
    Education,
    Skill,
    Achievement,
    Certification,
    Project,
    Responsibility,
    Summary,
    PersonalInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    Federal,
    State,
    Private,
    Healthcare,
    Tech,
    Other,
}

/// Inclusive span of a role or credential; an open end means ongoing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Whole calendar years between start and end (or `today` when open).
    pub fn years(&self, today: NaiveDate) -> f64 {
        let end = self.end.unwrap_or(today);
        f64::from((end.year() - self.start.year()).max(0))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    #[serde(default)]
    pub recency: f64,
    #[serde(default)]
    pub impact: f64,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub sectors: Vec<Sector>,
}

/// One CV bullet, skill or entry to be rated against a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub content: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub metadata: ContentMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobContext {
    pub title: String,
    pub sector: Sector,
    pub description: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub education_requirements: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
}

impl JobContext {
    /// First number in the experience level ("5+ years" -> 5). A level without
    /// digits requires zero years.
    pub fn required_years(&self) -> Option<f64> {
        let level = self.experience_level.as_deref()?;
        let digits: String = level
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(char::is_ascii_digit)
            .collect();
        Some(digits.parse::<f64>().unwrap_or(0.0))
    }
}

/// Relative weight of each sub-score; omitted fields keep their default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlignmentWeights {
    pub keyword_relevance: f64,
    pub skill_alignment: f64,
    pub experience_relevance: f64,
    pub recency_score: f64,
    pub impact_score: f64,
    pub sector_relevance: f64,
}

impl Default for AlignmentWeights {
    fn default() -> Self {
        Self {
            keyword_relevance: 0.3,
            skill_alignment: 0.2,
            experience_relevance: 0.2,
            recency_score: 0.1,
            impact_score: 0.1,
            sector_relevance: 0.1,
        }
    }
}

impl AlignmentWeights {
    /// Negative or non-finite weights count as zero.
    pub fn sanitized(self) -> Self {
        let clean = |value: f64| if value.is_finite() && value > 0.0 { value } else { 0.0 };
        Self {
            keyword_relevance: clean(self.keyword_relevance),
            skill_alignment: clean(self.skill_alignment),
            experience_relevance: clean(self.experience_relevance),
            recency_score: clean(self.recency_score),
            impact_score: clean(self.impact_score),
            sector_relevance: clean(self.sector_relevance),
        }
    }

    pub fn combine(&self, components: &ScoreComponents) -> f64 {
        components.keyword_relevance * self.keyword_relevance
            + components.skill_alignment * self.skill_alignment
            + components.experience_relevance * self.experience_relevance
            + components.recency_score * self.recency_score
            + components.impact_score * self.impact_score
            + components.sector_relevance * self.sector_relevance
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreComponents {
    pub keyword_relevance: f64,
    pub skill_alignment: f64,
    pub experience_relevance: f64,
    pub recency_score: f64,
    pub impact_score: f64,
    pub sector_relevance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentScore {
    pub content_id: String,
    pub overall_score: f64,
    pub components: ScoreComponents,
    pub confidence: f64,
    pub reasoning: Vec<String>,
}

/// Rates CV content items against a job with six weighted sub-scores.
#[derive(Debug, Clone)]
pub struct JobAlignmentScorer {
    weights: AlignmentWeights,
    matcher: Arc<SkillMatcher>,
    reference_date: Option<NaiveDate>,
}

impl Default for JobAlignmentScorer {
    fn default() -> Self {
        Self::new(AlignmentWeights::default())
    }
}

impl JobAlignmentScorer {
    pub fn new(weights: AlignmentWeights) -> Self {
        Self {
            weights: weights.sanitized(),
            matcher: Arc::new(SkillMatcher::default()),
            reference_date: None,
        }
    }

    pub fn with_matcher(mut self, matcher: Arc<SkillMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    /// Pins "today" for open-ended date ranges.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn weights(&self) -> &AlignmentWeights {
        &self.weights
    }

    pub fn reference_date(&self) -> Option<NaiveDate> {
        self.reference_date
    }

    pub fn score_content_items(&self, items: &[ContentItem], job: &JobContext) -> Vec<ContentScore> {
        let today = self
            .reference_date
            .unwrap_or_else(|| Local::now().date_naive());
        let job_words = description_words(&job.description);

        items
            .iter()
            .map(|item| self.score_item(item, job, &job_words, today))
            .collect()
    }

    fn score_item(
        &self,
        item: &ContentItem,
        job: &JobContext,
        job_words: &[String],
        today: NaiveDate,
    ) -> ContentScore {
        let components = ScoreComponents {
            keyword_relevance: keyword_relevance(item, job_words),
            skill_alignment: self.skill_alignment(item, job),
            experience_relevance: experience_relevance(item, job, today),
            recency_score: unit(item.metadata.recency),
            impact_score: unit(item.metadata.impact),
            sector_relevance: sector_relevance(item, job),
        };

        let reasoning = vec![
            format!("Matched keywords: {:.2}", components.keyword_relevance),
            format!("Skill alignment: {}", components.skill_alignment),
            format!("Experience relevance: {:.2}", components.experience_relevance),
            if components.sector_relevance >= 1.0 {
                format!("Sector match: {:?}", job.sector)
            } else {
                "Sector not explicitly matched".to_string()
            },
        ];

        ContentScore {
            content_id: item.id.clone(),
            overall_score: self.weights.combine(&components),
            components,
            confidence: CONFIDENCE,
            reasoning,
        }
    }

    fn skill_alignment(&self, item: &ContentItem, job: &JobContext) -> f64 {
        if item.content_type != ContentType::Skill {
            return 0.0;
        }
        let skill = item.content.trim().to_lowercase();
        let matched = job.required_skills.iter().any(|required| {
            required.trim().to_lowercase() == skill || self.matcher.same_skill(required, &skill)
        });
        if matched {
            1.0
        } else {
            0.0
        }
    }
}

fn description_words(description: &str) -> Vec<String> {
    description
        .split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
                .to_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect()
}

fn keyword_relevance(item: &ContentItem, job_words: &[String]) -> f64 {
    let keywords = &item.metadata.keywords;
    let matches = keywords
        .iter()
        .filter(|keyword| job_words.contains(&keyword.to_lowercase()))
        .count();
    matches as f64 / keywords.len().max(1) as f64
}

fn experience_relevance(item: &ContentItem, job: &JobContext, today: NaiveDate) -> f64 {
    if item.content_type != ContentType::Experience {
        return 0.0;
    }
    let Some(required) = job.required_years() else {
        return 0.0;
    };
    let years = item
        .metadata
        .date_range
        .map(|range| range.years(today))
        .unwrap_or(0.0);

    if years >= required {
        1.0
    } else {
        years / required.max(1.0)
    }
}

fn sector_relevance(item: &ContentItem, job: &JobContext) -> f64 {
    if item.metadata.sectors.contains(&job.sector) {
        1.0
    } else {
        SECTOR_FALLBACK
    }
}

fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
