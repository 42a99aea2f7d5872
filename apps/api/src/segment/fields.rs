//! Per-field extractors. Each one degrades to a fixed default instead of failing.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::Education;
use crate::segment::normalize::truncate_chars;

pub const DEFAULT_NAME: &str = "Your Name";
pub const DEFAULT_EMAIL: &str = "contact@example.com";
pub const DEFAULT_BIO: &str = "Professional with a passion for building great products.";
pub const DEFAULT_SKILLS: &[&str] = &["Communication", "Leadership", "Problem Solving"];

const MAX_NAME_CHARS: usize = 30;
const MAX_BIO_CHARS: usize = 300;
const MAX_SKILLS: usize = 12;
const MIN_SKILL_CHARS: usize = 2;
const MAX_SKILL_CHARS: usize = 30;
/// Header words that mean line one is a document title, not a name.
const HEADER_NOISE: &[&str] = &["resume", "curriculum"];

lazy_static! {
    static ref EMAIL: Regex =
        Regex::new(r"[a-zA-Z0-9._-]+@[a-zA-Z0-9._-]+\.[a-zA-Z0-9_-]+").expect("valid email regex");
    static ref YEAR: Regex = Regex::new(r"(19|20)\d{2}").expect("valid year regex");
}

/// First email-looking token anywhere in the text.
pub fn extract_email(text: &str) -> String {
    EMAIL
        .find(text)
        .map_or_else(|| DEFAULT_EMAIL.to_string(), |m| m.as_str().to_string())
}

/// Name = first line cut to 30 characters, or the second line when that cut
/// reads as a "Resume"/"Curriculum Vitae" header.
pub fn extract_name(lines: &[String]) -> String {
    let Some(first) = lines.first().map(|l| truncate_chars(l, MAX_NAME_CHARS)) else {
        return DEFAULT_NAME.to_string();
    };

    let lower = first.to_lowercase();
    if !HEADER_NOISE.iter().any(|w| lower.contains(w)) {
        return first;
    }

    lines
        .get(1)
        .map_or_else(|| DEFAULT_NAME.to_string(), |l| truncate_chars(l, MAX_NAME_CHARS))
}

pub fn extract_bio(section: &[String]) -> String {
    let bio = if section.is_empty() {
        DEFAULT_BIO.to_string()
    } else {
        section.join(" ")
    };
    truncate_chars(&bio, MAX_BIO_CHARS)
}

/// Splits the skills section on commas, bullets, and pipes.
///
/// Tokens of 2..=29 characters survive (two-letter names like "Go" count);
/// at most 12 are kept in document order.
pub fn extract_skills(section: &[String]) -> Vec<String> {
    if section.is_empty() {
        return DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect();
    }

    section
        .join(",")
        .split([',', '•', '|'])
        .map(str::trim)
        .filter(|token| {
            let len = token.chars().count();
            (MIN_SKILL_CHARS..MAX_SKILL_CHARS).contains(&len)
        })
        .take(MAX_SKILLS)
        .map(String::from)
        .collect()
}

/// At most one education entry: institution and degree by position, year by pattern.
pub fn extract_education(section: &[String]) -> Vec<Education> {
    let Some(institution) = section.first() else {
        return vec![Education {
            institution: "University".to_string(),
            degree: "Bachelor's Degree".to_string(),
            year: "2020".to_string(),
        }];
    };

    let degree = section
        .get(1)
        .cloned()
        .unwrap_or_else(|| "Degree".to_string());
    let year = section
        .iter()
        .find(|l| YEAR.is_match(l))
        .cloned()
        .unwrap_or_else(|| "20xx".to_string());

    vec![Education {
        institution: institution.clone(),
        degree,
        year,
    }]
}
