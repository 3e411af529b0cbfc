use crate::infra::{build_analyzer, load_job_description, read_json, read_resume};
use clap::Args;
use resume_ats::ats::{
    AlignmentWeights, AtsAnalysisResult, AtsAnalyzer, ContentItem, ContentScore, FileInfo,
    JobAlignmentScorer, JobContext, SkillDefinition, SkillMatcher,
};
use resume_ats::config::AppConfig;
use resume_ats::error::AppError;
use resume_ats::telemetry::{self, LogTarget};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Resume file (plain text, markdown or HTML)
    pub(crate) file: PathBuf,
    /// Job description file (text, HTML or JSON posting) for keyword matching
    #[arg(long)]
    pub(crate) job: Option<PathBuf>,
    /// Format of the original document, when the text was extracted from e.g. a PDF
    #[arg(long)]
    pub(crate) format: Option<String>,
    /// Print the full analysis as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AlignArgs {
    /// JSON array of CV content items
    pub(crate) items: PathBuf,
    /// JSON job context
    pub(crate) job: PathBuf,
    /// Optional JSON object overriding alignment weights
    #[arg(long)]
    pub(crate) weights: Option<PathBuf>,
    /// Print the scores as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SkillArgs {
    /// Skill name or alias
    pub(crate) name: String,
}

fn load_cli_config() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init_with_target(&config.telemetry, LogTarget::Stderr)?;
    Ok(config)
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = load_cli_config()?;
    let analyzer = build_analyzer(&config)?;

    let (text, file) = read_resume(&args.file, args.format.as_deref())?;
    let job = args
        .job
        .as_deref()
        .map(load_job_description)
        .transpose()?;

    let result = analyzer.analyze(&text, &file, job.as_deref());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "{}",
            render_score_report(&args.file, &file, &result, &analyzer)
        );
    }
    Ok(())
}

pub(crate) fn run_align(args: AlignArgs) -> Result<(), AppError> {
    let config = load_cli_config()?;
    let analyzer = build_analyzer(&config)?;

    let items: Vec<ContentItem> = read_json(&args.items)?;
    let job: JobContext = read_json(&args.job)?;
    let weights = match args.weights.as_deref() {
        Some(path) => read_json::<AlignmentWeights>(path)?,
        None => AlignmentWeights::default(),
    };

    let scorer = JobAlignmentScorer::new(weights).with_matcher(Arc::clone(analyzer.matcher()));
    let scores = scorer.score_content_items(&items, &job);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&scores)?);
    } else {
        println!("{}", render_alignment(&job, &scores));
    }
    Ok(())
}

pub(crate) fn run_skill(args: SkillArgs) -> Result<(), AppError> {
    let config = load_cli_config()?;
    let analyzer = build_analyzer(&config)?;
    let matcher = analyzer.matcher();

    let skill = matcher
        .find_skill(&args.name)
        .ok_or_else(|| AppError::UnknownSkill(args.name.clone()))?;
    println!("{}", render_skill(matcher, skill));
    Ok(())
}

pub(crate) fn render_score_report(
    path: &Path,
    file: &FileInfo,
    result: &AtsAnalysisResult,
    analyzer: &AtsAnalyzer,
) -> String {
    let mut lines = vec![
        "ATS compatibility report".to_string(),
        format!(
            "File: {} ({}, {} KB)",
            path.display(),
            file.normalized_format(),
            file.size.div_ceil(1024)
        ),
        format!("Score: {}/100 | Parse rate {}%", result.score, result.parse_rate),
        result.recommendation.clone(),
        format!(
            "Passing score {}: {}",
            analyzer.config().passing_score,
            if analyzer.passes(result.score) { "met" } else { "not met" }
        ),
    ];

    if result.issues.is_empty() {
        lines.push("\nIssues: none".to_string());
    } else {
        lines.push("\nIssues".to_string());
        for issue in &result.issues {
            let mut line = format!(
                "- [{}] {}: {}",
                issue.severity.label(),
                issue.issue_type.label(),
                issue.message
            );
            if let Some(detected) = &issue.detected {
                line.push_str(&format!(" (found: {detected})"));
            }
            lines.push(line);
        }
    }

    if !result.improvements.is_empty() {
        lines.push("\nImprovements".to_string());
        lines.extend(result.improvements.iter().map(|line| format!("- {line}")));
    }

    if !result.section_scores.is_empty() {
        lines.push("\nSection scores".to_string());
        for (section, score) in &result.section_scores {
            lines.push(format!("- {section}: {score}"));
        }
    }

    if let Some(keywords) = &result.keywords {
        lines.push(format!(
            "\nKeyword match: {:.0}% ({} found, {} missing)",
            keywords.relevance_score * 100.0,
            keywords.found.len(),
            keywords.missing.len()
        ));
        if !keywords.missing.is_empty() {
            lines.push(format!("Missing: {}", keywords.missing.join(", ")));
        }
        match keywords.required_years {
            Some(required) => lines.push(format!(
                "Experience: {} years detected, {} required",
                keywords.detected_years, required
            )),
            None => lines.push(format!(
                "Experience: {} years detected",
                keywords.detected_years
            )),
        }
    }

    lines.join("\n")
}

pub(crate) fn render_alignment(job: &JobContext, scores: &[ContentScore]) -> String {
    let mut lines = vec![format!("Alignment against {} ({:?})", job.title, job.sector)];
    for score in scores {
        let c = &score.components;
        lines.push(format!(
            "- {}: {:.2} (keywords {:.2}, skill {:.0}, experience {:.2}, recency {:.2}, impact {:.2}, sector {:.2})",
            score.content_id,
            score.overall_score,
            c.keyword_relevance,
            c.skill_alignment,
            c.experience_relevance,
            c.recency_score,
            c.impact_score,
            c.sector_relevance
        ));
    }
    lines.join("\n")
}

pub(crate) fn render_skill(matcher: &SkillMatcher, skill: &SkillDefinition) -> String {
    let related: Vec<&str> = matcher
        .get_related_skills(&skill.name)
        .into_iter()
        .map(|related| related.name.as_str())
        .collect();

    let mut lines = vec![format!("{} ({})", skill.name, skill.category.label())];
    if !skill.aliases.is_empty() {
        lines.push(format!("Aliases: {}", skill.aliases.join(", ")));
    }
    if related.is_empty() {
        lines.push("Related: none".to_string());
    } else {
        lines.push(format!("Related: {}", related.join(", ")));
    }
    lines.join("\n")
}
