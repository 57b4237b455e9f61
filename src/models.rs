use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder used whenever a project has no image of its own.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1555099962-4199c345e5dd?auto=format&fit=crop&q=80&w=1000";

/// Profile image shown until one is uploaded.
pub const DEFAULT_PROFILE_IMAGE: &str = "/profile.jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectCategory {
    #[default]
    #[serde(rename = "Web System")]
    WebSystem,
    #[serde(rename = "Institutional")]
    Institutional,
    #[serde(rename = "Dashboard")]
    Dashboard,
    #[serde(rename = "App")]
    App,
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 4] = [
        ProjectCategory::WebSystem,
        ProjectCategory::Institutional,
        ProjectCategory::Dashboard,
        ProjectCategory::App,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProjectCategory::WebSystem => "Web System",
            ProjectCategory::Institutional => "Institutional",
            ProjectCategory::Dashboard => "Dashboard",
            ProjectCategory::App => "App",
        }
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ProjectCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ProjectCategory::ALL
            .into_iter()
            .find(|category| {
                category.label().eq_ignore_ascii_case(wanted)
                    || format!("{category:?}").eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| anyhow::anyhow!("Unknown project category: {}", s))
    }
}

/// Everything a project carries besides its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContent {
    pub title: String,
    pub short_description: String,
    #[serde(default)]
    pub full_description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(rename = "type", default)]
    pub category: ProjectCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(flatten)]
    pub content: ProjectContent,
}

impl Project {
    pub fn new(id: impl Into<String>, content: ProjectContent) -> Self {
        Self {
            id: id.into(),
            content,
        }
    }

    /// Image to display, falling back to the placeholder when none is set.
    pub fn display_image(&self) -> &str {
        if self.content.image_url.trim().is_empty() {
            PLACEHOLDER_IMAGE_URL
        } else {
            &self.content.image_url
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub name: String,
    pub role: String,
    /// Digits only: country code, area code, number.
    pub whatsapp_number: String,
    pub email: String,
    pub location: String,
}

/// Shallow patch applied on top of the current contact record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    pub name: Option<String>,
    pub role: Option<String>,
    pub whatsapp_number: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
}

impl ContactUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.role.is_none()
            && self.whatsapp_number.is_none()
            && self.email.is_none()
            && self.location.is_none()
    }
}

impl ContactInfo {
    pub fn merged(&self, update: &ContactUpdate) -> ContactInfo {
        ContactInfo {
            name: update.name.clone().unwrap_or_else(|| self.name.clone()),
            role: update.role.clone().unwrap_or_else(|| self.role.clone()),
            whatsapp_number: update
                .whatsapp_number
                .clone()
                .unwrap_or_else(|| self.whatsapp_number.clone()),
            email: update.email.clone().unwrap_or_else(|| self.email.clone()),
            location: update
                .location
                .clone()
                .unwrap_or_else(|| self.location.clone()),
        }
    }
}

/// The three logical records kept in sync with the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Projects,
    Contact,
    ProfileImage,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [
        RecordKind::Projects,
        RecordKind::Contact,
        RecordKind::ProfileImage,
    ];

    /// Path of the record in the remote database.
    pub fn remote_path(self) -> &'static str {
        match self {
            RecordKind::Projects => "projects",
            RecordKind::Contact => "portfolio/contactInfo",
            RecordKind::ProfileImage => "portfolio/profileImage",
        }
    }

    /// Key of the mirrored copy in the local fallback store.
    pub fn local_key(self) -> &'static str {
        match self {
            RecordKind::Projects => "portfolio_projects",
            RecordKind::Contact => "portfolio_contact",
            RecordKind::ProfileImage => "portfolio_image",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Projects => f.write_str("projects"),
            RecordKind::Contact => f.write_str("contact info"),
            RecordKind::ProfileImage => f.write_str("profile image"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ContactInfo {
        ContactInfo {
            name: "Rafael Costa".to_string(),
            role: "Developer".to_string(),
            whatsapp_number: "5521999999999".to_string(),
            email: "contact@example.com".to_string(),
            location: "São Paulo, SP".to_string(),
        }
    }

    #[test]
    fn merge_only_touches_given_fields() {
        let update = ContactUpdate {
            location: Some("Rio de Janeiro".to_string()),
            ..Default::default()
        };
        let merged = contact().merged(&update);
        assert_eq!(merged.location, "Rio de Janeiro");
        assert_eq!(merged.whatsapp_number, "5521999999999");
        assert_eq!(merged.name, "Rafael Costa");
        assert_eq!(merged.email, "contact@example.com");
    }

    #[test]
    fn project_serializes_with_camel_case_field_names() {
        let project = Project::new(
            "p1",
            ProjectContent {
                title: "ERP".to_string(),
                short_description: "Short".to_string(),
                full_description: "Full".to_string(),
                technologies: vec!["Rust".to_string()],
                image_url: String::new(),
                category: ProjectCategory::Dashboard,
            },
        );
        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["id"], "p1");
        assert_eq!(value["shortDescription"], "Short");
        assert_eq!(value["type"], "Dashboard");
        assert_eq!(project.display_image(), PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn category_parses_labels_and_variant_names() {
        assert_eq!(
            "web system".parse::<ProjectCategory>().unwrap(),
            ProjectCategory::WebSystem
        );
        assert_eq!(
            "WebSystem".parse::<ProjectCategory>().unwrap(),
            ProjectCategory::WebSystem
        );
        assert!("Mobile".parse::<ProjectCategory>().is_err());
    }
}
