//! Static skill taxonomy and case-insensitive skill lookup.
//!
//! The matcher keeps two maps: canonical name to definition and alias to
//! canonical name. Every public lookup goes through [`SkillMatcher::find_skill`]
//! so aliases resolve the same way everywhere.

use std::collections::{BTreeSet, HashMap};
use std::io::Read;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::MissingSkill;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Programming,
    Database,
    Cloud,
    DevOps,
    Management,
    Design,
    Communication,
    Soft,
}

impl SkillCategory {
    pub const fn label(self) -> &'static str {
        match self {
            SkillCategory::Programming => "programming",
            SkillCategory::Database => "database",
            SkillCategory::Cloud => "cloud",
            SkillCategory::DevOps => "devops",
            SkillCategory::Management => "management",
            SkillCategory::Design => "design",
            SkillCategory::Communication => "communication",
            SkillCategory::Soft => "soft",
        }
    }
}

impl FromStr for SkillCategory {
    type Err = TaxonomyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "programming" => Ok(Self::Programming),
            "database" => Ok(Self::Database),
            "cloud" => Ok(Self::Cloud),
            "devops" => Ok(Self::DevOps),
            "management" => Ok(Self::Management),
            "design" => Ok(Self::Design),
            "communication" => Ok(Self::Communication),
            "soft" => Ok(Self::Soft),
            other => Err(TaxonomyError::UnknownCategory(other.to_string())),
        }
    }
}

/// Taxonomy entry: canonical name, alternative spellings and related skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDefinition {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub category: SkillCategory,
    #[serde(default)]
    pub related: Vec<String>,
}

impl SkillDefinition {
    pub fn new(name: &str, aliases: &[&str], category: SkillCategory, related: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            aliases: aliases.iter().map(|alias| alias.to_string()).collect(),
            category,
            related: related.iter().map(|skill| skill.to_string()).collect(),
        }
    }

    fn terms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TaxonomyError {
    #[error("unable to read skill taxonomy: {0}")]
    Csv(#[from] csv::Error),
    #[error("unknown skill category '{0}'")]
    UnknownCategory(String),
    #[error("skill taxonomy row {row} is missing a name")]
    MissingName { row: usize },
    #[error("unable to open skill taxonomy: {0}")]
    Io(#[from] std::io::Error),
}

/// Case-insensitive lookup over a skill taxonomy.
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    skills: Vec<SkillDefinition>,
    by_name: HashMap<String, usize>,
    aliases: HashMap<String, String>,
}

impl Default for SkillMatcher {
    fn default() -> Self {
        Self::new(default_skills())
    }
}

impl SkillMatcher {
    pub fn new(skills: Vec<SkillDefinition>) -> Self {
        let mut by_name = HashMap::new();
        let mut aliases = HashMap::new();
        let mut stored: Vec<SkillDefinition> = Vec::with_capacity(skills.len());

        for skill in skills {
            let key = skill.name.to_lowercase();
            for alias in &skill.aliases {
                aliases.insert(alias.to_lowercase(), key.clone());
            }
            match by_name.get(&key) {
                Some(&index) => stored[index] = skill,
                None => {
                    by_name.insert(key, stored.len());
                    stored.push(skill);
                }
            }
        }

        Self {
            skills: stored,
            by_name,
            aliases,
        }
    }

    /// Load a taxonomy from CSV with `name,aliases,category,related` columns.
    /// List columns use `;` as separator.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, TaxonomyError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut skills = Vec::new();

        for (index, record) in csv_reader.deserialize::<SkillRow>().enumerate() {
            let row = record?;
            if row.name.trim().is_empty() {
                return Err(TaxonomyError::MissingName { row: index + 1 });
            }
            skills.push(SkillDefinition {
                name: row.name.trim().to_string(),
                aliases: split_list(row.aliases.as_deref()),
                category: row.category.parse()?,
                related: split_list(row.related.as_deref()),
            });
        }

        Ok(Self::new(skills))
    }

    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, TaxonomyError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn skills(&self) -> &[SkillDefinition] {
        &self.skills
    }

    /// Find a skill by canonical name or alias.
    pub fn find_skill(&self, name: &str) -> Option<&SkillDefinition> {
        let key = name.trim().to_lowercase();
        let index = self.by_name.get(&key).or_else(|| {
            self.aliases
                .get(&key)
                .and_then(|canonical| self.by_name.get(canonical))
        })?;
        self.skills.get(*index)
    }

    /// Related skills that are themselves part of the taxonomy.
    pub fn get_related_skills(&self, name: &str) -> Vec<&SkillDefinition> {
        match self.find_skill(name) {
            Some(skill) => skill
                .related
                .iter()
                .filter_map(|related| self.find_skill(related))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn find_by_category(&self, category: SkillCategory) -> Vec<&SkillDefinition> {
        self.skills
            .iter()
            .filter(|skill| skill.category == category)
            .collect()
    }

    pub fn are_related(&self, first: &str, second: &str) -> bool {
        let (Some(a), Some(b)) = (self.find_skill(first), self.find_skill(second)) else {
            return false;
        };

        let lists = |from: &SkillDefinition, to: &SkillDefinition| {
            from.related
                .iter()
                .any(|related| related.eq_ignore_ascii_case(&to.name))
        };

        lists(a, b) || lists(b, a)
    }

    /// True when both names resolve to the same canonical skill.
    pub fn same_skill(&self, first: &str, second: &str) -> bool {
        match (self.find_skill(first), self.find_skill(second)) {
            (Some(a), Some(b)) => a.name == b.name,
            _ => false,
        }
    }

    /// Canonical skills whose name or alias appears in `text` as a whole term.
    pub fn skills_in_text(&self, text: &str) -> Vec<&SkillDefinition> {
        let haystack = text.to_lowercase();
        self.skills
            .iter()
            .filter(|skill| {
                skill
                    .terms()
                    .any(|term| contains_term(&haystack, &term.to_lowercase()))
            })
            .collect()
    }

    /// Required skills the CV lacks, each with related skills the CV already shows.
    pub fn missing_skills(&self, cv_skills: &[String], required: &[String]) -> Vec<MissingSkill> {
        let present: BTreeSet<String> = cv_skills
            .iter()
            .map(|skill| self.canonical_key(skill))
            .collect();

        required
            .iter()
            .filter(|skill| !present.contains(&self.canonical_key(skill)))
            .map(|skill| {
                let alternatives = self.find_skill(skill).map(|_| {
                    self.get_related_skills(skill)
                        .into_iter()
                        .filter(|related| present.contains(&related.name.to_lowercase()))
                        .cloned()
                        .collect::<Vec<_>>()
                });

                MissingSkill {
                    skill: skill.clone(),
                    alternatives,
                }
            })
            .collect()
    }

    fn canonical_key(&self, name: &str) -> String {
        self.find_skill(name)
            .map(|skill| skill.name.to_lowercase())
            .unwrap_or_else(|| name.trim().to_lowercase())
    }
}

/// Whole-term containment: the match may not be glued to other word characters.
pub(crate) fn contains_term(haystack: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }

    haystack.match_indices(term).any(|(start, matched)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + matched.len()..].chars().next();
        !before.is_some_and(is_term_char) && !after.is_some_and(is_term_char)
    })
}

fn is_term_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '+' || c == '#'
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(';')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Deserialize)]
struct SkillRow {
    name: String,
    #[serde(default)]
    aliases: Option<String>,
    category: String,
    #[serde(default)]
    related: Option<String>,
}

/// Built-in taxonomy used when no CSV override is configured.
pub fn default_skills() -> Vec<SkillDefinition> {
    use SkillCategory::*;

    vec![
        SkillDefinition::new(
            "JavaScript",
            &["JS", "ECMAScript", "Node.js", "NodeJS"],
            Programming,
            &["TypeScript", "React", "Vue", "Angular"],
        ),
        SkillDefinition::new("TypeScript", &["TS"], Programming, &["JavaScript", "Angular"]),
        SkillDefinition::new("Python", &["py"], Programming, &["Django", "Flask", "FastAPI"]),
        SkillDefinition::new("Rust", &["rustlang"], Programming, &["C++", "Go"]),
        SkillDefinition::new("Go", &["Golang"], Programming, &["Rust", "Kubernetes"]),
        SkillDefinition::new("Java", &["JVM"], Programming, &["Kotlin", "Spring"]),
        SkillDefinition::new("C++", &["cpp"], Programming, &["Rust", "C"]),
        SkillDefinition::new("React", &["ReactJS", "React.js"], Programming, &["JavaScript", "TypeScript"]),
        SkillDefinition::new("Django", &[], Programming, &["Python"]),
        SkillDefinition::new(
            "PostgreSQL",
            &["Postgres", "PSQL"],
            Database,
            &["SQL", "Database Design"],
        ),
        SkillDefinition::new(
            "MongoDB",
            &["Mongo", "Document DB"],
            Database,
            &["NoSQL", "Database Design"],
        ),
        SkillDefinition::new("SQL", &["Structured Query Language"], Database, &["PostgreSQL", "MySQL"]),
        SkillDefinition::new("MySQL", &["MariaDB"], Database, &["SQL", "Database Design"]),
        SkillDefinition::new(
            "AWS",
            &["Amazon Web Services", "Amazon Cloud"],
            Cloud,
            &["Cloud Computing", "DevOps", "Azure", "GCP"],
        ),
        SkillDefinition::new(
            "Azure",
            &["Microsoft Azure", "MS Azure"],
            Cloud,
            &["Cloud Computing", "DevOps", "AWS"],
        ),
        SkillDefinition::new(
            "GCP",
            &["Google Cloud", "Google Cloud Platform"],
            Cloud,
            &["Cloud Computing", "AWS"],
        ),
        SkillDefinition::new("Docker", &["Containers"], DevOps, &["Kubernetes", "DevOps"]),
        SkillDefinition::new("Kubernetes", &["K8s"], DevOps, &["Docker", "DevOps"]),
        SkillDefinition::new(
            "DevOps",
            &["CI/CD", "Continuous Integration"],
            DevOps,
            &["Docker", "Kubernetes", "AWS"],
        ),
        SkillDefinition::new(
            "Leadership",
            &["Team Lead", "Project Lead"],
            Management,
            &["Management", "Team Building", "Project Management"],
        ),
        SkillDefinition::new(
            "Project Management",
            &["PMP", "Program Management"],
            Management,
            &["Leadership", "Strategic Planning"],
        ),
        SkillDefinition::new(
            "Strategic Planning",
            &["Strategy"],
            Management,
            &["Project Management", "Leadership"],
        ),
        SkillDefinition::new("UX Design", &["UX", "User Experience"], Design, &["UI Design", "Figma"]),
        SkillDefinition::new("Figma", &[], Design, &["UX Design"]),
        SkillDefinition::new(
            "Communication",
            &["Written Communication", "Verbal Communication"],
            Communication,
            &["Presentation", "Documentation"],
        ),
        SkillDefinition::new(
            "Presentation",
            &["Public Speaking"],
            Communication,
            &["Communication"],
        ),
        SkillDefinition::new("Problem Solving", &["Troubleshooting"], Soft, &["Critical Thinking"]),
        SkillDefinition::new("Critical Thinking", &["Analytical Thinking"], Soft, &["Problem Solving"]),
    ]
}
