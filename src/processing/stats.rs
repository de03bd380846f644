//! Resume content analysis: skill extraction, experience level, and scoring

use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Keyword-based analyzer for resume text.
pub struct ResumeAnalyzer {
    skill_matcher: AhoCorasick,
    skill_names: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Junior,
    MidLevel,
    Senior,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "Junior",
            ExperienceLevel::MidLevel => "Mid-level",
            ExperienceLevel::Senior => "Senior",
        }
    }
}

/// Scores on a 0-100 scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeScore {
    pub skills_diversity: f32,
    pub experience_level: f32,
    pub completeness: f32,
    pub overall: f32,
}

/// Basic size statistics shown in the resume preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStats {
    pub characters: usize,
    pub words: usize,
    pub lines: usize,
}

const SENIOR_KEYWORDS: &[&str] = &[
    "senior",
    "lead",
    "principal",
    "architect",
    "manager",
    "director",
    "10+ years",
    "15+ years",
    "20+ years",
    "extensive experience",
    "team lead",
    "technical lead",
    "mentor",
    "coach",
];

const MID_KEYWORDS: &[&str] = &[
    "mid-level",
    "intermediate",
    "3+ years",
    "5+ years",
    "7+ years",
    "experienced",
    "proficient",
    "skilled",
];

const JUNIOR_KEYWORDS: &[&str] = &[
    "junior",
    "entry-level",
    "graduate",
    "intern",
    "0-2 years",
    "recent graduate",
    "new graduate",
    "student",
];

const RESUME_SECTIONS: &[&str] = &["experience", "education", "skills", "projects"];

impl Default for ResumeAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ResumeAnalyzer {
    pub fn new() -> Self {
        let mut skill_names = Self::skill_database();
        // Longest patterns first so "JavaScript" wins over "Java".
        skill_names.sort_by(|a, b| b.len().cmp(&a.len()));

        let skill_matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(aho_corasick::MatchKind::LeftmostLongest)
            .build(&skill_names)
            .expect("Invalid skill matcher patterns");

        Self {
            skill_matcher,
            skill_names,
        }
    }

    /// Extract recognized technical skills, deduplicated, in canonical casing.
    pub fn extract_skills(&self, text: &str) -> Vec<String> {
        let bytes = text.as_bytes();
        let mut found: Vec<String> = Vec::new();

        for mat in self.skill_matcher.find_iter(text) {
            if !is_word_boundary(bytes, mat.start(), mat.end()) {
                continue;
            }
            let name = &self.skill_names[mat.pattern().as_usize()];
            if !found.iter().any(|s| s == name) {
                found.push(name.clone());
            }
        }

        found
    }

    /// Estimate candidate seniority from keyword density.
    pub fn estimate_experience_level(&self, text: &str) -> ExperienceLevel {
        let lower = text.to_lowercase();

        let senior = count_keywords(&lower, SENIOR_KEYWORDS);
        let mid = count_keywords(&lower, MID_KEYWORDS);
        let junior = count_keywords(&lower, JUNIOR_KEYWORDS);

        if senior > mid && senior > junior {
            ExperienceLevel::Senior
        } else if mid > junior {
            ExperienceLevel::MidLevel
        } else {
            ExperienceLevel::Junior
        }
    }

    /// Compute resume scores. The skills-diversity component is monotonic:
    /// recognizing more skills never lowers it.
    pub fn calculate_score(&self, text: &str) -> ResumeScore {
        let skills = self.extract_skills(text);
        let skills_diversity = (skills.len() as f32 * 5.0).min(100.0);

        let experience_level = match self.estimate_experience_level(text) {
            ExperienceLevel::Junior => 30.0,
            ExperienceLevel::MidLevel => 60.0,
            ExperienceLevel::Senior => 90.0,
        };

        let lower = text.to_lowercase();
        let sections_present = RESUME_SECTIONS
            .iter()
            .filter(|section| lower.contains(*section))
            .count();
        let completeness = (sections_present as f32 / RESUME_SECTIONS.len() as f32) * 100.0;

        let overall = (skills_diversity + experience_level + completeness) / 3.0;

        ResumeScore {
            skills_diversity,
            experience_level,
            completeness,
            overall,
        }
    }

    /// Size statistics for the preview panel.
    pub fn text_stats(&self, text: &str) -> TextStats {
        TextStats {
            characters: text.chars().count(),
            words: text.unicode_words().count(),
            lines: text.lines().count().max(usize::from(!text.is_empty())),
        }
    }

    fn skill_database() -> Vec<String> {
        [
            // Languages
            "Python", "Java", "JavaScript", "C++", "C#", "Go", "Rust", "Swift", "Kotlin",
            "TypeScript",
            // Frameworks
            "React", "Angular", "Vue.js", "Node.js", "Express", "Django", "Flask", "Spring",
            "Laravel",
            // Cloud and DevOps
            "AWS", "Azure", "GCP", "Docker", "Kubernetes", "Jenkins", "Git", "GitHub", "GitLab",
            // Data stores
            "SQL", "MySQL", "PostgreSQL", "MongoDB", "Redis", "Elasticsearch", "Cassandra",
            // ML
            "Machine Learning", "Deep Learning", "TensorFlow", "PyTorch", "Scikit-learn",
            // Web
            "HTML", "CSS", "Bootstrap", "Sass", "Less", "Webpack", "Babel", "npm", "yarn",
            // Platforms
            "Linux", "Unix", "Windows", "macOS", "Shell", "Bash", "PowerShell",
            // Process
            "Agile", "Scrum", "Kanban", "JIRA", "Confluence", "Slack",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
}

fn count_keywords(lower_text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| lower_text.contains(*k)).count()
}

/// True when the byte range is not embedded inside a larger alphanumeric word.
fn is_word_boundary(bytes: &[u8], start: usize, end: usize) -> bool {
    let before_ok = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
    let after_ok = end >= bytes.len() || !bytes[end].is_ascii_alphanumeric();
    before_ok && after_ok
}
