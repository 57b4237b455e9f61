use std::future::Future;

use crate::models::{ContactInfo, Project};

/// Browser-style local storage: string keys, string values, plus typed accessors for the
/// three mirrored portfolio records.
///
/// Typed loads return `Ok(None)` when nothing was saved and an error when the saved text
/// does not parse.
pub trait FallbackRepository {
    fn get_item(&self, key: &str) -> impl Future<Output = anyhow::Result<Option<String>>> + Send;
    fn set_item(&self, key: &str, value: &str) -> impl Future<Output = anyhow::Result<()>> + Send;
    fn remove_item(&self, key: &str) -> impl Future<Output = anyhow::Result<()>> + Send;

    fn load_projects(&self) -> impl Future<Output = anyhow::Result<Option<Vec<Project>>>> + Send;
    fn save_projects(&self, projects: &[Project]) -> impl Future<Output = anyhow::Result<()>> + Send;
    fn load_contact(&self) -> impl Future<Output = anyhow::Result<Option<ContactInfo>>> + Send;
    fn save_contact(&self, contact: &ContactInfo) -> impl Future<Output = anyhow::Result<()>> + Send;
    fn load_profile_image(&self) -> impl Future<Output = anyhow::Result<Option<String>>> + Send;
    fn save_profile_image(&self, url: &str) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Remove every mirrored portfolio record.
    fn clear(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}
