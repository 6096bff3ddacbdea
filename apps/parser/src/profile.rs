use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Education fields. The three lists are independent: the i-th date is not
/// claimed to belong to the i-th institution or degree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationRecord {
    #[serde(rename = "education-dates")]
    pub dates: Vec<String>,
    #[serde(rename = "school-college")]
    pub institutions: Vec<String>,
    #[serde(rename = "education-degrees")]
    pub degrees: Vec<String>,
}

impl EducationRecord {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() && self.institutions.is_empty() && self.degrees.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceRecord {
    pub role: String,
    pub company: String,
    pub duration: String,
    pub details: String,
}

/// Best-effort structured result for one resume.
///
/// Deliberately permissive: several name candidates may be present and
/// experience records are neither merged nor deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(rename = "name")]
    pub names: BTreeSet<String>,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub skills: BTreeSet<String>,
    pub education: EducationRecord,
    pub experience: Vec<ExperienceRecord>,
}

impl CandidateProfile {
    /// True when every extractor came back empty; callers fall back to manual entry.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
            && self.emails.is_empty()
            && self.phones.is_empty()
            && self.skills.is_empty()
            && self.education.is_empty()
            && self.experience.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_to_flat_object_keys() {
        let profile = CandidateProfile {
            names: ["Jane Doe".to_string()].into_iter().collect(),
            emails: vec!["jane@example.com".to_string()],
            phones: vec!["+15551234567".to_string()],
            skills: ["Rust".to_string()].into_iter().collect(),
            education: EducationRecord {
                dates: vec!["2016-2020".to_string()],
                institutions: vec!["MIT College".to_string()],
                degrees: vec!["Bachelor".to_string()],
            },
            experience: vec![ExperienceRecord {
                role: "Engineer".to_string(),
                company: "Acme".to_string(),
                duration: "2020 - Present".to_string(),
                details: "Shipped things".to_string(),
            }],
        };

        assert_eq!(
            profile.to_json(),
            json!({
                "name": ["Jane Doe"],
                "emails": ["jane@example.com"],
                "phones": ["+15551234567"],
                "skills": ["Rust"],
                "education": {
                    "education-dates": ["2016-2020"],
                    "school-college": ["MIT College"],
                    "education-degrees": ["Bachelor"]
                },
                "experience": [{
                    "role": "Engineer",
                    "company": "Acme",
                    "duration": "2020 - Present",
                    "details": "Shipped things"
                }]
            })
        );
    }

    #[test]
    fn test_default_profile_is_empty_but_serializable() {
        let profile = CandidateProfile::default();
        assert!(profile.is_empty());
        let value = profile.to_json();
        assert_eq!(value["name"], json!([]));
        assert_eq!(value["education"]["school-college"], json!([]));
    }

    #[test]
    fn test_round_trips_through_json() {
        let raw = r#"{"name":["A"],"emails":[],"phones":[],"skills":["Go"],
            "education":{"education-dates":[],"school-college":[],"education-degrees":[]},
            "experience":[]}"#;
        let profile: CandidateProfile = serde_json::from_str(raw).unwrap();
        assert!(profile.skills.contains("Go"));
        assert!(!profile.is_empty());
    }
}
