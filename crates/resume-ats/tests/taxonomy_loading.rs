use std::io::Write;

use resume_ats::ats::{SkillCategory, TaxonomyError};
use resume_ats::config::ScoringSettings;
use resume_ats::{AtsAnalyzer, FileInfo, SkillMatcher};

const TAXONOMY: &str = "\
name,aliases,category,related
Elixir,ex;exs,programming,Erlang;Phoenix
Erlang,OTP,programming,Elixir
Phoenix,,programming,Elixir
";

#[test]
fn csv_taxonomy_supports_aliases_and_relations() {
    let matcher = SkillMatcher::from_csv_reader(TAXONOMY.as_bytes()).expect("taxonomy loads");
    assert_eq!(matcher.len(), 3);
    assert_eq!(matcher.find_skill("OTP").map(|skill| skill.name.as_str()), Some("Erlang"));
    assert!(matcher.are_related("phoenix", "ELIXIR"));
    assert_eq!(matcher.find_by_category(SkillCategory::Programming).len(), 3);
}

#[test]
fn unknown_category_is_rejected() {
    let csv = "name,aliases,category,related\nElixir,,alchemy,\n";
    match SkillMatcher::from_csv_reader(csv.as_bytes()) {
        Err(TaxonomyError::UnknownCategory(category)) => assert_eq!(category, "alchemy"),
        other => panic!("expected unknown category, got {other:?}"),
    }
}

#[test]
fn settings_load_taxonomy_and_passing_score() {
    let path = std::env::temp_dir().join(format!("resume-ats-skills-{}.csv", std::process::id()));
    {
        let mut file = std::fs::File::create(&path).expect("create taxonomy file");
        file.write_all(TAXONOMY.as_bytes()).expect("write taxonomy");
    }

    let settings = ScoringSettings {
        passing_score: Some(96),
        skills_csv: Some(path.clone()),
    };
    let analyzer = AtsAnalyzer::from_settings(&settings).expect("analyzer builds");
    std::fs::remove_file(&path).ok();

    assert_eq!(analyzer.config().passing_score, 96);
    assert!(analyzer.matcher().find_skill("Elixir").is_some());
    assert!(analyzer.matcher().find_skill("JavaScript").is_none());

    let resume = "Sam Lee\nsam@example.com\n\n## Experience\nAcme | 2020 - Present\n★ Built Phoenix apps";
    assert!(!analyzer.meets_requirements(resume, &FileInfo::new("pdf", 1_000), None));
}

#[test]
fn missing_taxonomy_file_is_an_error() {
    let settings = ScoringSettings {
        passing_score: None,
        skills_csv: Some("/nonexistent/skills.csv".into()),
    };
    assert!(matches!(
        AtsAnalyzer::from_settings(&settings),
        Err(TaxonomyError::Io(_))
    ));
}
