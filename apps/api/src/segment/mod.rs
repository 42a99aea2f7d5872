// Résumé segmentation: plain text → ResumeRecord.
// Pure and synchronous; never fails. Anything unrecognizable becomes a default.

pub mod experience;
pub mod fields;
pub mod normalize;
pub mod sections;

use tracing::debug;

use crate::models::{Project, ResumeRecord, SocialLink};

pub use experience::{ExperienceHeuristic, PositionalHeuristic};
use sections::SectionIndex;

const SUMMARY_START: &[&str] = &["summary", "profile"];
const SKILLS_START: &[&str] = &["skills", "technologies"];
const EXPERIENCE_START: &[&str] = &["experience", "work history", "employment"];
const EDUCATION_START: &[&str] = &["education"];

const DEFAULT_TITLE: &str = "Professional";
const DEFAULT_LOCATION: &str = "Remote";

/// Segments with the default positional experience heuristic.
pub fn segment(text: &str) -> ResumeRecord {
    segment_with(text, &PositionalHeuristic)
}

/// Segments text into a fully populated record.
///
/// Steps:
/// 1. Normalize into trimmed non-empty lines
/// 2. Name (line position) and email (pattern over the whole text)
/// 3. Index section headings
/// 4. Slice and extract bio, skills, experience, education
/// 5. Assemble with fixed location, social links and projects
pub fn segment_with(text: &str, heuristic: &dyn ExperienceHeuristic) -> ResumeRecord {
    let lines = normalize::normalize_lines(text);
    let index = SectionIndex::build(&lines);

    debug!(
        lines = lines.len(),
        sections = ?index.keywords().collect::<Vec<_>>(),
        heuristic = heuristic.name(),
        "Segmenting resume text"
    );

    let bio = fields::extract_bio(index.slice(&lines, SUMMARY_START, &["experience", "education", "skills"]));
    let skills = fields::extract_skills(index.slice(&lines, SKILLS_START, &["experience", "education"]));
    let experience = experience::extract_experience(
        index.slice(&lines, EXPERIENCE_START, &["education", "skills", "projects"]),
        heuristic,
    );
    let education = fields::extract_education(index.slice(&lines, EDUCATION_START, &["skills", "experience"]));

    let title = experience
        .first()
        .map_or_else(|| DEFAULT_TITLE.to_string(), |e| e.role.clone());

    ResumeRecord {
        name: fields::extract_name(&lines),
        title,
        bio,
        email: fields::extract_email(text),
        location: Some(DEFAULT_LOCATION.to_string()),
        social_links: placeholder_social_links(),
        skills,
        experience,
        education,
        projects: Some(placeholder_projects()),
    }
}

fn placeholder_social_links() -> Vec<SocialLink> {
    ["LinkedIn", "GitHub"]
        .into_iter()
        .map(|platform| SocialLink {
            platform: platform.to_string(),
            url: "#".to_string(),
        })
        .collect()
}

fn placeholder_projects() -> Vec<Project> {
    vec![Project {
        name: "Portfolio Project".to_string(),
        description: "Generated using automatic résumé parsing.".to_string(),
        technologies: vec!["Rust".to_string(), "Heuristics".to_string()],
    }]
}
