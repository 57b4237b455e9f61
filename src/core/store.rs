//! # Portfolio state store
//!
//! Holds the profile image, contact record and project list in a `watch` channel so any
//! number of readers can borrow the current snapshot or await the next one.
//!
//! Every record is loaded remote first, then from the local fallback store, then from the
//! compiled-in defaults. Mutations follow the same order on the way out:
//!
//! 1. the in-memory snapshot is updated right away
//! 2. the remote store is written
//! 3. the local fallback store is written, whatever the remote outcome was
//!
//! A failed remote write is never rolled back. It comes back to the caller as
//! [`Persistence::LocalOnly`] and is recorded as [`SyncStatus::Degraded`] in the snapshot.
use std::sync::Arc;

use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{
    db::{FallbackRepository, LocalStore},
    remote::{RemoteChange, RemoteError, RemoteFeed, RemoteStore},
};
use crate::{
    defaults::{default_contact, default_profile_image, default_projects},
    models::{ContactInfo, ContactUpdate, Project, ProjectContent, RecordKind},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// Remote sync is not configured.
    Offline,
    Live,
    Degraded { last_error: String },
}

impl SyncStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SyncStatus::Offline => "Offline (local storage only)",
            SyncStatus::Live => "Synced",
            SyncStatus::Degraded { .. } => "Out of sync (saved locally)",
        }
    }
}

/// Where a mutation ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    Remote,
    LocalOnly { reason: String },
}

impl Persistence {
    pub fn is_remote(&self) -> bool {
        matches!(self, Persistence::Remote)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSnapshot {
    pub profile_image: String,
    pub contact: ContactInfo,
    pub projects: Vec<Project>,
    pub sync: SyncStatus,
    /// Bumped by every reset. Views rebuild from scratch when it changes.
    pub generation: u64,
}

impl PortfolioSnapshot {
    fn defaults(sync: SyncStatus, generation: u64) -> Self {
        Self {
            profile_image: default_profile_image(),
            contact: default_contact(),
            projects: default_projects(),
            sync,
            generation,
        }
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}

/// Read-only handle on the portfolio state.
#[derive(Debug, Clone)]
pub struct PortfolioReader {
    receiver: watch::Receiver<PortfolioSnapshot>,
}

impl PortfolioReader {
    pub fn snapshot(&self) -> PortfolioSnapshot {
        self.receiver.borrow().clone()
    }

    /// Wait for the next published snapshot. Fails once the store is gone.
    pub async fn changed(&mut self) -> anyhow::Result<PortfolioSnapshot> {
        self.receiver.changed().await?;
        Ok(self.receiver.borrow_and_update().clone())
    }
}

/// Keeps the store subscribed to remote pushes. Dropping it releases every subscription.
#[derive(Debug)]
pub struct LiveSync {
    tasks: Vec<(RecordKind, JoinHandle<()>)>,
}

impl LiveSync {
    pub fn kinds(&self) -> Vec<RecordKind> {
        self.tasks.iter().map(|(kind, _)| *kind).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Drop for LiveSync {
    fn drop(&mut self) {
        for (kind, task) in &self.tasks {
            debug!("Releasing live {kind} subscription");
            task.abort();
        }
    }
}

#[derive(Debug)]
pub struct PortfolioStore<R> {
    remote: R,
    local: LocalStore,
    state: Arc<watch::Sender<PortfolioSnapshot>>,
}

impl<R: RemoteStore> PortfolioStore<R> {
    pub async fn open(remote: R, local: LocalStore) -> Self {
        let mut sync = if remote.is_enabled() {
            SyncStatus::Live
        } else {
            SyncStatus::Offline
        };

        let remote_projects = remote
            .fetch_projects()
            .await
            .map(|projects| Some(projects).filter(|p| !p.is_empty()));
        let projects = match remote_value(RecordKind::Projects, remote_projects, &mut sync) {
            Some(projects) => projects,
            None => local_value(RecordKind::Projects, local.load_projects().await)
                .unwrap_or_else(default_projects),
        };

        let contact = match remote_value(RecordKind::Contact, remote.fetch_contact().await, &mut sync) {
            Some(contact) => contact,
            None => local_value(RecordKind::Contact, local.load_contact().await)
                .unwrap_or_else(default_contact),
        };

        let remote_image = remote.fetch_profile_image().await;
        let profile_image = match remote_value(RecordKind::ProfileImage, remote_image, &mut sync) {
            Some(url) => url,
            None => local_value(RecordKind::ProfileImage, local.load_profile_image().await)
                .unwrap_or_else(default_profile_image),
        };

        info!(
            projects = projects.len(),
            sync = sync.label(),
            "Portfolio state loaded"
        );
        let (state, _) = watch::channel(PortfolioSnapshot {
            profile_image,
            contact,
            projects,
            sync,
            generation: 0,
        });
        Self {
            remote,
            local,
            state: Arc::new(state),
        }
    }

    pub fn reader(&self) -> PortfolioReader {
        PortfolioReader {
            receiver: self.state.subscribe(),
        }
    }

    pub fn snapshot(&self) -> PortfolioSnapshot {
        self.state.borrow().clone()
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn local(&self) -> &LocalStore {
        &self.local
    }

    /// Subscribe to remote pushes for every record kind.
    ///
    /// Kinds that cannot be subscribed are logged and skipped; the returned guard holds
    /// whatever succeeded.
    pub async fn watch(&self) -> LiveSync {
        let mut tasks = Vec::new();
        for kind in RecordKind::ALL {
            match self.remote.subscribe(kind).await {
                Ok(feed) => {
                    let state = Arc::clone(&self.state);
                    let local = self.local.clone();
                    tasks.push((kind, tokio::spawn(mirror_feed(feed, state, local))));
                }
                Err(e) if e.is_unconfigured() => {
                    debug!("Remote store not configured, no live {kind} updates");
                }
                Err(e) => {
                    warn!("Failed to subscribe to live {kind} updates: {e}");
                    self.record_sync(Err(&e));
                }
            }
        }
        LiveSync { tasks }
    }

    pub async fn set_profile_image(&self, url: &str) -> Persistence {
        self.state.send_modify(|s| s.profile_image = url.to_string());
        let outcome = self.remote.write_profile_image(url).await;
        self.mirror_local(RecordKind::ProfileImage, self.local.save_profile_image(url).await);
        self.settle(RecordKind::ProfileImage, outcome)
    }

    /// Shallow-merge `update` into the current contact record and write the result.
    pub async fn set_contact_info(&self, update: &ContactUpdate) -> Persistence {
        let mut merged = None;
        self.state.send_modify(|s| {
            s.contact = s.contact.merged(update);
            merged = Some(s.contact.clone());
        });
        let contact = merged.unwrap_or_else(|| self.state.borrow().contact.clone());

        let outcome = self.remote.write_contact(&contact).await;
        self.mirror_local(RecordKind::Contact, self.local.save_contact(&contact).await);
        self.settle(RecordKind::Contact, outcome)
    }

    /// Insert a new project at the front of the list.
    ///
    /// The project shows up under a client-generated id right away; that id is swapped for
    /// the remote one once the remote write succeeds.
    pub async fn add_project(&self, content: ProjectContent) -> (Project, Persistence) {
        let client_id = Uuid::new_v4().to_string();
        let mut project = Project::new(client_id.clone(), content);
        self.state
            .send_modify(|s| s.projects.insert(0, project.clone()));

        let outcome = self.remote.create_project(&project.content).await;
        if let Ok(remote_id) = &outcome {
            project.id = remote_id.clone();
            self.state.send_modify(|s| {
                if let Some(p) = s.projects.iter_mut().find(|p| p.id == client_id) {
                    p.id = remote_id.clone();
                }
            });
        }

        self.save_projects().await;
        let persistence = self.settle(RecordKind::Projects, outcome.map(|_| ()));
        (project, persistence)
    }

    /// Replace the project with the same id. An unknown id leaves the list unchanged.
    pub async fn update_project(&self, project: Project) -> Persistence {
        self.state.send_modify(|s| {
            if let Some(existing) = s.projects.iter_mut().find(|p| p.id == project.id) {
                *existing = project.clone();
            }
        });
        let outcome = self
            .remote
            .replace_project(&project.id, &project.content)
            .await;
        self.save_projects().await;
        self.settle(RecordKind::Projects, outcome)
    }

    /// Remove the project with `id`. Removing an unknown id is a no-op.
    pub async fn delete_project(&self, id: &str) -> Persistence {
        self.state.send_modify(|s| s.projects.retain(|p| p.id != id));
        let outcome = self.remote.delete_project(id).await;
        self.save_projects().await;
        self.settle(RecordKind::Projects, outcome)
    }

    /// Wipe the local fallback store and return to the compiled-in content.
    ///
    /// The remote store is left as it is. Readers see a new `generation`.
    pub async fn reset_to_defaults(&self) -> anyhow::Result<()> {
        self.local.clear().await?;
        let sync = if self.remote.is_enabled() {
            SyncStatus::Live
        } else {
            SyncStatus::Offline
        };
        self.state.send_modify(|s| {
            *s = PortfolioSnapshot::defaults(sync, s.generation + 1);
        });
        info!(
            generation = self.state.borrow().generation,
            "Portfolio reset to defaults"
        );
        Ok(())
    }

    async fn save_projects(&self) {
        let projects = self.state.borrow().projects.clone();
        self.mirror_local(RecordKind::Projects, self.local.save_projects(&projects).await);
    }

    fn mirror_local(&self, kind: RecordKind, result: anyhow::Result<()>) {
        if let Err(e) = result {
            warn!("Failed to write {kind} to local store: {e:#}");
        }
    }

    fn settle<T>(&self, kind: RecordKind, outcome: Result<T, RemoteError>) -> Persistence {
        match outcome {
            Ok(_) => {
                self.record_sync(Ok(()));
                Persistence::Remote
            }
            Err(e) => {
                if e.is_unconfigured() {
                    debug!("Saved {kind} locally, remote store not configured");
                } else {
                    warn!("Failed to save {kind} remotely, kept locally: {e}");
                }
                self.record_sync(Err(&e));
                Persistence::LocalOnly {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn record_sync(&self, outcome: Result<(), &RemoteError>) {
        let status = match outcome {
            Ok(()) => SyncStatus::Live,
            Err(e) if e.is_unconfigured() => SyncStatus::Offline,
            Err(e) => SyncStatus::Degraded {
                last_error: e.to_string(),
            },
        };
        self.state.send_if_modified(|s| {
            if s.sync == status {
                return false;
            }
            s.sync = status;
            true
        });
    }
}

fn remote_value<T>(
    kind: RecordKind,
    result: Result<Option<T>, RemoteError>,
    sync: &mut SyncStatus,
) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(e) if e.is_unconfigured() => None,
        Err(e) => {
            warn!("Failed to load {kind} from remote store, falling back: {e}");
            *sync = SyncStatus::Degraded {
                last_error: e.to_string(),
            };
            None
        }
    }
}

fn local_value<T>(kind: RecordKind, result: anyhow::Result<Option<T>>) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!("Ignoring unreadable local {kind}: {e:#}");
            None
        }
    }
}

async fn mirror_feed(
    mut feed: RemoteFeed,
    state: Arc<watch::Sender<PortfolioSnapshot>>,
    local: LocalStore,
) {
    let mut initial = true;
    while let Some(change) = feed.next().await {
        apply_change(&state, &local, change, initial).await;
        initial = false;
    }
    debug!("Live {} feed ended", feed.kind());
}

/// Replace one record wholesale with a pushed value and mirror it locally.
///
/// The `initial` value a feed delivers on subscribe follows the open rules: an empty
/// project list counts as absent. Later project pushes replace the list even when empty.
/// A missing singleton never replaces the current value.
async fn apply_change(
    state: &watch::Sender<PortfolioSnapshot>,
    local: &LocalStore,
    change: RemoteChange,
    initial: bool,
) {
    let kind = change.kind();
    let saved = match change {
        RemoteChange::Projects(projects) if !(initial && projects.is_empty()) => {
            state.send_modify(|s| {
                s.projects = projects.clone();
                s.sync = SyncStatus::Live;
            });
            local.save_projects(&projects).await
        }
        RemoteChange::Contact(Some(contact)) => {
            state.send_modify(|s| {
                s.contact = contact.clone();
                s.sync = SyncStatus::Live;
            });
            local.save_contact(&contact).await
        }
        RemoteChange::ProfileImage(Some(url)) => {
            state.send_modify(|s| {
                s.profile_image = url.clone();
                s.sync = SyncStatus::Live;
            });
            local.save_profile_image(&url).await
        }
        _ => {
            debug!("Remote {kind} is empty, keeping current value");
            return;
        }
    };
    match saved {
        Ok(()) => debug!("Applied remote {kind} push"),
        Err(e) => warn!("Failed to mirror remote {kind} push locally: {e:#}"),
    }
}
