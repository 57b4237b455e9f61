//! Staged admin form state and the rules that turn it into store mutations.
use std::path::{Path, PathBuf};

use base64::{Engine, engine::general_purpose::STANDARD};
use thiserror::Error;
use tokio::fs as async_fs;

use crate::models::{
    ContactInfo, ContactUpdate, PLACEHOLDER_IMAGE_URL, Project, ProjectCategory, ProjectContent,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Project title is required")]
    MissingTitle,
    #[error("Project short description is required")]
    MissingShortDescription,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectSubmission {
    Create(ProjectContent),
    Update(Project),
}

/// Create/edit form for a single project.
///
/// With a staged id the form edits that project, otherwise it creates a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    editing_id: Option<String>,
    pub title: String,
    pub short_description: String,
    pub full_description: String,
    /// Comma-separated, as typed.
    pub technologies: String,
    pub image_url: String,
    pub category: ProjectCategory,
}

impl ProjectForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an existing project for editing.
    pub fn edit(&mut self, project: &Project) {
        let content = &project.content;
        *self = Self {
            editing_id: Some(project.id.clone()),
            title: content.title.clone(),
            short_description: content.short_description.clone(),
            full_description: content.full_description.clone(),
            technologies: content.technologies.join(", "),
            image_url: content.image_url.clone(),
            category: content.category,
        };
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn submit(&self) -> Result<ProjectSubmission, FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::MissingTitle);
        }
        if self.short_description.trim().is_empty() {
            return Err(FormError::MissingShortDescription);
        }

        let full_description = if self.full_description.trim().is_empty() {
            self.short_description.clone()
        } else {
            self.full_description.clone()
        };
        let image_url = if self.image_url.trim().is_empty() {
            PLACEHOLDER_IMAGE_URL.to_string()
        } else {
            self.image_url.trim().to_string()
        };
        let content = ProjectContent {
            title: self.title.clone(),
            short_description: self.short_description.clone(),
            full_description,
            technologies: split_technologies(&self.technologies),
            image_url,
            category: self.category,
        };

        Ok(match &self.editing_id {
            Some(id) => ProjectSubmission::Update(Project::new(id.clone(), content)),
            None => ProjectSubmission::Create(content),
        })
    }
}

pub fn split_technologies(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Contact editor. Only fields that differ from the loaded record end up in the update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    loaded: ContactInfo,
    pub name: String,
    pub role: String,
    pub whatsapp_number: String,
    pub email: String,
    pub location: String,
}

impl ContactForm {
    pub fn from_contact(contact: &ContactInfo) -> Self {
        Self {
            loaded: contact.clone(),
            name: contact.name.clone(),
            role: contact.role.clone(),
            whatsapp_number: contact.whatsapp_number.clone(),
            email: contact.email.clone(),
            location: contact.location.clone(),
        }
    }

    pub fn changes(&self) -> ContactUpdate {
        fn changed(edited: &str, loaded: &str) -> Option<String> {
            (edited != loaded).then(|| edited.to_string())
        }
        ContactUpdate {
            name: changed(&self.name, &self.loaded.name),
            role: changed(&self.role, &self.loaded.role),
            whatsapp_number: changed(&self.whatsapp_number, &self.loaded.whatsapp_number),
            email: changed(&self.email, &self.loaded.email),
            location: changed(&self.location, &self.loaded.location),
        }
    }

    pub fn is_dirty(&self) -> bool {
        !self.changes().is_empty()
    }

    /// The loaded record with the edits applied.
    pub fn edited(&self) -> ContactInfo {
        self.loaded.merged(&self.changes())
    }
}

#[derive(Error, Debug)]
pub enum ImageInputError {
    #[error("Image URL is empty")]
    EmptyUrl,
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not a recognised image", path.display())]
    NotAnImage { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileImageInput {
    Url(String),
    File(PathBuf),
}

impl ProfileImageInput {
    /// The value to store: the pasted URL, or the file inlined as a `data:` URI.
    pub async fn resolve(&self) -> Result<String, ImageInputError> {
        match self {
            ProfileImageInput::Url(url) => {
                let url = url.trim();
                if url.is_empty() {
                    return Err(ImageInputError::EmptyUrl);
                }
                Ok(url.to_string())
            }
            ProfileImageInput::File(path) => {
                let bytes = async_fs::read(path).await.map_err(|source| ImageInputError::Read {
                    path: path.clone(),
                    source,
                })?;
                image_data_uri(path, &bytes)
            }
        }
    }
}

pub fn image_data_uri(path: &Path, bytes: &[u8]) -> Result<String, ImageInputError> {
    let format = image::guess_format(bytes).map_err(|_| ImageInputError::NotAnImage {
        path: path.to_path_buf(),
    })?;
    Ok(format!(
        "data:{};base64,{}",
        format.to_mime_type(),
        STANDARD.encode(bytes)
    ))
}
