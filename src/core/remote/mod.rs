//! Sync client for the hosted realtime database.
//!
//! Each record kind maps to one path in the remote database:
//!
//! - `projects/{id}` holds a project plus `createdAt`/`updatedAt` server timestamps
//! - `portfolio/contactInfo` holds the contact record plus `updatedAt`
//! - `portfolio/profileImage` holds `{ url, updatedAt }`
//!
//! Every call can fail on its own. Nothing here caches or retries; the state store one
//! layer up decides what a failure means.
mod error;
mod feed;
mod firebase;
mod memory;
mod seed;
mod sse;

use std::future::Future;

pub use error::RemoteError;
pub use feed::{RemoteChange, RemoteFeed};
pub use firebase::FirebaseClient;
pub use memory::{MemoryRemote, StoredProject};
pub use seed::{SeedReport, clear_projects, seed_defaults};

use crate::{
    config::RemoteConfig,
    models::{ContactInfo, Project, ProjectContent, RecordKind},
};

pub trait RemoteStore: Send + Sync + 'static {
    /// `false` when remote sync is switched off by configuration.
    fn is_enabled(&self) -> bool {
        true
    }

    fn fetch_projects(&self) -> impl Future<Output = Result<Vec<Project>, RemoteError>> + Send;
    /// Store a new project and return the identifier the remote assigned to it.
    fn create_project(
        &self,
        content: &ProjectContent,
    ) -> impl Future<Output = Result<String, RemoteError>> + Send;
    fn replace_project(
        &self,
        id: &str,
        content: &ProjectContent,
    ) -> impl Future<Output = Result<(), RemoteError>> + Send;
    /// Deleting an id that does not exist succeeds.
    fn delete_project(&self, id: &str) -> impl Future<Output = Result<(), RemoteError>> + Send;

    fn fetch_contact(&self) -> impl Future<Output = Result<Option<ContactInfo>, RemoteError>> + Send;
    fn write_contact(
        &self,
        contact: &ContactInfo,
    ) -> impl Future<Output = Result<(), RemoteError>> + Send;

    fn fetch_profile_image(&self) -> impl Future<Output = Result<Option<String>, RemoteError>> + Send;
    fn write_profile_image(&self, url: &str) -> impl Future<Output = Result<(), RemoteError>> + Send;

    /// Start receiving full snapshots of `kind` whenever it changes remotely. The current
    /// value is delivered first.
    fn subscribe(
        &self,
        kind: RecordKind,
    ) -> impl Future<Output = Result<RemoteFeed, RemoteError>> + Send;
}

/// The remote store picked from configuration.
#[derive(Debug, Clone)]
pub enum RemoteBackend {
    Firebase(FirebaseClient),
    Disabled,
}

impl RemoteBackend {
    pub fn from_config(config: &RemoteConfig) -> Result<Self, RemoteError> {
        if !config.is_configured() {
            return Ok(RemoteBackend::Disabled);
        }
        Ok(RemoteBackend::Firebase(FirebaseClient::new(config)?))
    }
}

impl RemoteStore for RemoteBackend {
    fn is_enabled(&self) -> bool {
        matches!(self, RemoteBackend::Firebase(_))
    }

    async fn fetch_projects(&self) -> Result<Vec<Project>, RemoteError> {
        match self {
            RemoteBackend::Firebase(client) => client.fetch_projects().await,
            RemoteBackend::Disabled => Err(RemoteError::Unconfigured),
        }
    }

    async fn create_project(&self, content: &ProjectContent) -> Result<String, RemoteError> {
        match self {
            RemoteBackend::Firebase(client) => client.create_project(content).await,
            RemoteBackend::Disabled => Err(RemoteError::Unconfigured),
        }
    }

    async fn replace_project(&self, id: &str, content: &ProjectContent) -> Result<(), RemoteError> {
        match self {
            RemoteBackend::Firebase(client) => client.replace_project(id, content).await,
            RemoteBackend::Disabled => Err(RemoteError::Unconfigured),
        }
    }

    async fn delete_project(&self, id: &str) -> Result<(), RemoteError> {
        match self {
            RemoteBackend::Firebase(client) => client.delete_project(id).await,
            RemoteBackend::Disabled => Err(RemoteError::Unconfigured),
        }
    }

    async fn fetch_contact(&self) -> Result<Option<ContactInfo>, RemoteError> {
        match self {
            RemoteBackend::Firebase(client) => client.fetch_contact().await,
            RemoteBackend::Disabled => Err(RemoteError::Unconfigured),
        }
    }

    async fn write_contact(&self, contact: &ContactInfo) -> Result<(), RemoteError> {
        match self {
            RemoteBackend::Firebase(client) => client.write_contact(contact).await,
            RemoteBackend::Disabled => Err(RemoteError::Unconfigured),
        }
    }

    async fn fetch_profile_image(&self) -> Result<Option<String>, RemoteError> {
        match self {
            RemoteBackend::Firebase(client) => client.fetch_profile_image().await,
            RemoteBackend::Disabled => Err(RemoteError::Unconfigured),
        }
    }

    async fn write_profile_image(&self, url: &str) -> Result<(), RemoteError> {
        match self {
            RemoteBackend::Firebase(client) => client.write_profile_image(url).await,
            RemoteBackend::Disabled => Err(RemoteError::Unconfigured),
        }
    }

    async fn subscribe(&self, kind: RecordKind) -> Result<RemoteFeed, RemoteError> {
        match self {
            RemoteBackend::Firebase(client) => client.subscribe(kind).await,
            RemoteBackend::Disabled => Err(RemoteError::Unconfigured),
        }
    }
}
