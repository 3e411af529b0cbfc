use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Datelike, Local};
use tracing::debug;

use super::alignment::{AlignmentWeights, ContentItem, ContentScore, JobAlignmentScorer, JobContext};
use super::analyzer::{file_issues, TextAnalyzer};
use super::domain::{AtsAnalysisResult, FileInfo, Issue};
use super::keywords::match_job;
use super::scoring::{parse_rate, Recommendation, ScoringConfig, ScoringEngine};
use super::taxonomy::{SkillMatcher, TaxonomyError};
use crate::config::ScoringSettings;

/// Facade running text analysis, file checks, job matching and scoring.
#[derive(Debug, Clone)]
pub struct AtsAnalyzer {
    analyzer: TextAnalyzer,
    engine: ScoringEngine,
    matcher: Arc<SkillMatcher>,
    reference_year: Option<i32>,
}

impl Default for AtsAnalyzer {
    fn default() -> Self {
        Self::new(ScoringConfig::default(), Arc::new(SkillMatcher::default()))
    }
}

impl AtsAnalyzer {
    pub fn new(config: ScoringConfig, matcher: Arc<SkillMatcher>) -> Self {
        Self {
            analyzer: TextAnalyzer::new(),
            engine: ScoringEngine::new(config),
            matcher,
            reference_year: None,
        }
    }

    /// Applies environment overrides: passing score and an optional CSV taxonomy.
    pub fn from_settings(settings: &ScoringSettings) -> Result<Self, TaxonomyError> {
        let mut config = ScoringConfig::default();
        if let Some(passing_score) = settings.passing_score {
            config = config.with_passing_score(passing_score);
        }

        let matcher = match &settings.skills_csv {
            Some(path) => {
                let matcher = SkillMatcher::from_path(path)?;
                debug!(path = %path.display(), skills = matcher.len(), "loaded skill taxonomy");
                matcher
            }
            None => SkillMatcher::default(),
        };

        Ok(Self::new(config, Arc::new(matcher)))
    }

    /// Pins the year used for open-ended ranges such as `2020 - Present`.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        self.engine.config()
    }

    pub fn matcher(&self) -> &Arc<SkillMatcher> {
        &self.matcher
    }

    pub fn analyze(
        &self,
        resume_text: &str,
        file: &FileInfo,
        job_description: Option<&str>,
    ) -> AtsAnalysisResult {
        if resume_text.trim().is_empty() {
            return AtsAnalysisResult {
                score: 100,
                issues: Vec::new(),
                improvements: Vec::new(),
                section_scores: Default::default(),
                keywords: None,
                missing_skills: Vec::new(),
                parse_rate: 100,
                recommendation: Recommendation::from_score(100).summary().to_string(),
            };
        }

        let analysis = self.analyzer.analyze(resume_text);
        let mut issues = analysis.issues;
        issues.extend(file_issues(file, self.engine.config()));

        let job_match = job_description
            .filter(|job| !job.trim().is_empty())
            .map(|job| {
                match_job(
                    resume_text,
                    &analysis.sections,
                    job,
                    &self.matcher,
                    self.engine.config(),
                    self.current_year(),
                )
            });

        let (keywords, missing_skills, suggestions) = match job_match {
            Some(job_match) => {
                issues.extend(job_match.issues);
                (
                    Some(job_match.keywords),
                    job_match.missing_skills,
                    job_match.suggestions,
                )
            }
            None => (None, Vec::new(), Vec::new()),
        };

        let score = self.engine.score(&issues);
        let mut improvements = improvements_for(&issues);
        improvements.extend(suggestions);

        debug!(
            score,
            issues = issues.len(),
            format = %file.normalized_format(),
            job_description = keywords.is_some(),
            "scored resume"
        );

        AtsAnalysisResult {
            score,
            section_scores: self.engine.section_scores(&analysis.sections),
            parse_rate: parse_rate(resume_text),
            recommendation: Recommendation::from_score(score).summary().to_string(),
            issues,
            improvements,
            keywords,
            missing_skills,
        }
    }

    pub fn meets_requirements(
        &self,
        resume_text: &str,
        file: &FileInfo,
        job_description: Option<&str>,
    ) -> bool {
        let result = self.analyze(resume_text, file, job_description);
        self.passes(result.score)
    }

    /// Whether a score already computed by `analyze` reaches the passing score.
    pub fn passes(&self, score: u8) -> bool {
        self.engine.meets_requirements(score)
    }

    fn current_year(&self) -> i32 {
        self.reference_year
            .unwrap_or_else(|| Local::now().date_naive().year())
    }
}

/// One improvement per distinct fix, in the order issues were raised.
fn improvements_for(issues: &[Issue]) -> Vec<String> {
    let mut seen = HashSet::new();
    issues
        .iter()
        .filter(|issue| seen.insert(issue.fix.as_str()))
        .map(Issue::improvement)
        .collect()
}

/// Shared state behind the HTTP routes.
#[derive(Debug, Clone)]
pub struct AtsService {
    analyzer: Arc<AtsAnalyzer>,
    scorer: Arc<JobAlignmentScorer>,
}

impl AtsService {
    pub fn new(analyzer: Arc<AtsAnalyzer>) -> Self {
        let scorer = JobAlignmentScorer::default().with_matcher(analyzer.matcher().clone());
        Self {
            analyzer,
            scorer: Arc::new(scorer),
        }
    }

    pub fn with_scorer(mut self, scorer: JobAlignmentScorer) -> Self {
        self.scorer = Arc::new(scorer);
        self
    }

    pub fn analyzer(&self) -> &Arc<AtsAnalyzer> {
        &self.analyzer
    }

    pub fn matcher(&self) -> &Arc<SkillMatcher> {
        self.analyzer.matcher()
    }

    /// Uses the configured scorer unless the caller overrides weights.
    pub fn align(
        &self,
        items: &[ContentItem],
        job: &JobContext,
        weights: Option<AlignmentWeights>,
    ) -> Vec<ContentScore> {
        match weights {
            Some(weights) => {
                let mut scorer =
                    JobAlignmentScorer::new(weights).with_matcher(self.matcher().clone());
                if let Some(date) = self.scorer.reference_date() {
                    scorer = scorer.with_reference_date(date);
                }
                scorer.score_content_items(items, job)
            }
            None => self.scorer.score_content_items(items, job),
        }
    }
}

impl Default for AtsService {
    fn default() -> Self {
        Self::new(Arc::new(AtsAnalyzer::default()))
    }
}
