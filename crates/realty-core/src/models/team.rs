use serde::{Deserialize, Serialize};

use super::required_text;
use crate::RealtyResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub description: String,
    /// Portrait URL; uploads happen elsewhere
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMemberDraft {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl TeamMemberDraft {
    pub fn validate(self) -> RealtyResult<Self> {
        Ok(Self {
            name: required_text(&self.name, "name", "Name is required.")?,
            role: required_text(&self.role, "role", "Role is required.")?,
            description: self.description.trim().to_string(),
            image: self
                .image
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
        })
    }
}

impl From<&TeamMember> for TeamMemberDraft {
    fn from(m: &TeamMember) -> Self {
        Self {
            name: m.name.clone(),
            role: m.role.clone(),
            description: m.description.clone(),
            image: m.image.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_image_dropped() {
        let draft = TeamMemberDraft {
            name: " Meera Iyer ".into(),
            role: "Sales Head".into(),
            description: String::new(),
            image: Some("  ".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(draft.name, "Meera Iyer");
        assert_eq!(draft.image, None);
    }

    #[test]
    fn test_role_required() {
        let draft = TeamMemberDraft {
            name: "Meera".into(),
            role: String::new(),
            description: String::new(),
            image: None,
        };
        assert!(draft.validate().is_err());
    }
}
