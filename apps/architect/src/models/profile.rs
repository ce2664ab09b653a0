use serde::{Deserialize, Serialize};

/// Profile facts typed into the form. Free-form, unvalidated, never persisted.
/// Missing fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileData {
    pub name: String,
    pub email: String,
    pub linkedin: String,
    pub github: String,
    pub leetcode: String,
    /// Problems solved, as typed ("500+").
    pub solved: String,
    pub internships: String,
    pub experience: String,
    pub achievements: String,
}

impl ProfileData {
    /// Sets a field by its form name. Returns `false` for names that are not profile fields.
    pub fn set(&mut self, field: &str, value: String) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "email" => &mut self.email,
            "linkedin" => &mut self.linkedin,
            "github" => &mut self.github,
            "leetcode" => &mut self.leetcode,
            "solved" => &mut self.solved,
            "internships" => &mut self.internships,
            "experience" => &mut self.experience,
            "achievements" => &mut self.achievements,
            _ => return false,
        };
        *slot = value;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_known_fields() {
        let mut profile = ProfileData::default();
        assert!(profile.set("name", "Jane Doe".to_string()));
        assert!(profile.set("solved", "300+".to_string()));
        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.solved, "300+");
    }

    #[test]
    fn test_set_unknown_field_is_ignored() {
        let mut profile = ProfileData::default();
        assert!(!profile.set("api_key", "secret".to_string()));
        assert_eq!(profile, ProfileData::default());
    }

    #[test]
    fn test_missing_json_fields_default_to_empty() {
        let profile: ProfileData = serde_json::from_str(r#"{"name": "Jane Doe"}"#).unwrap();
        assert_eq!(profile.name, "Jane Doe");
        assert!(profile.email.is_empty());
        assert!(profile.achievements.is_empty());
    }
}
