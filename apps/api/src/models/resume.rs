use serde::{Deserialize, Serialize};

/// A single position pulled out of the experience section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

/// Display-ready output of the import pipeline.
///
/// Every field is populated: sections that yield nothing fall back to fixed
/// defaults, so the presentation layer never sees a half-filled record.
/// Field names serialize in camelCase (`socialLinks`) to match the portfolio
/// renderer's contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub social_links: Vec<SocialLink>,
    pub skills: Vec<String>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResumeRecord {
        ResumeRecord {
            name: "Jane Doe".to_string(),
            title: "Engineer".to_string(),
            bio: "Builds things.".to_string(),
            email: "jane@example.com".to_string(),
            location: None,
            social_links: vec![SocialLink {
                platform: "GitHub".to_string(),
                url: "#".to_string(),
            }],
            skills: vec!["Rust".to_string()],
            experience: vec![],
            education: vec![],
            projects: None,
        }
    }

    #[test]
    fn test_serializes_social_links_in_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("socialLinks").is_some());
        assert!(json.get("social_links").is_none());
        assert_eq!(json["socialLinks"][0]["platform"], "GitHub");
    }

    #[test]
    fn test_absent_optional_fields_are_omitted() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("location").is_none());
        assert!(json.get("projects").is_none());
    }

    #[test]
    fn test_deserializes_without_optional_fields() {
        let json = r##"{
            "name": "A", "title": "B", "bio": "C", "email": "d@e.io",
            "socialLinks": [], "skills": [], "experience": [], "education": []
        }"##;
        let record: ResumeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.location, None);
        assert_eq!(record.projects, None);
    }
}
