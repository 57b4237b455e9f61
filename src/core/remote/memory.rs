use std::{
    collections::BTreeMap,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};

use time::OffsetDateTime;
use tokio::sync::broadcast;

use super::{RemoteChange, RemoteError, RemoteFeed, RemoteStore};
use crate::models::{ContactInfo, Project, ProjectContent, RecordKind};

/// A project as held by the in-memory remote, with its server-side timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredProject {
    pub content: ProjectContent,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Default)]
struct MemoryData {
    projects: BTreeMap<String, StoredProject>,
    contact: Option<(ContactInfo, i64)>,
    profile_image: Option<(String, i64)>,
}

#[derive(Debug)]
struct MemoryInner {
    data: Mutex<MemoryData>,
    reachable: AtomicBool,
    next_push: AtomicU64,
    changes: broadcast::Sender<RecordKind>,
}

/// In-process stand-in for the realtime database with the same contract: generated push
/// ids, server timestamps, live notifications. It can be switched unreachable to exercise
/// the fallback paths.
#[derive(Debug, Clone)]
pub struct MemoryRemote {
    inner: Arc<MemoryInner>,
}

impl Default for MemoryRemote {
    fn default() -> Self {
        Self::new()
    }
}

fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

impl MemoryRemote {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(64);
        Self {
            inner: Arc::new(MemoryInner {
                data: Mutex::new(MemoryData::default()),
                reachable: AtomicBool::new(true),
                next_push: AtomicU64::new(1),
                changes,
            }),
        }
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.inner.reachable.store(reachable, Ordering::SeqCst);
    }

    pub fn stored_project(&self, id: &str) -> Option<StoredProject> {
        self.data().projects.get(id).cloned()
    }

    pub fn contact_updated_at(&self) -> Option<i64> {
        self.data().contact.as_ref().map(|(_, updated_at)| *updated_at)
    }

    /// Number of live subscriptions currently attached.
    pub fn listener_count(&self) -> usize {
        self.inner.changes.receiver_count()
    }

    fn data(&self) -> MutexGuard<'_, MemoryData> {
        self.inner.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_reachable(&self) -> Result<(), RemoteError> {
        if self.inner.reachable.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(RemoteError::Unreachable(
                "in-memory remote switched offline".to_string(),
            ))
        }
    }

    fn notify(&self, kind: RecordKind) {
        // No receivers just means nobody is subscribed.
        let _ = self.inner.changes.send(kind);
    }

    fn snapshot(&self, kind: RecordKind) -> RemoteChange {
        let data = self.data();
        match kind {
            RecordKind::Projects => RemoteChange::Projects(
                data.projects
                    .iter()
                    .map(|(id, stored)| Project::new(id.clone(), stored.content.clone()))
                    .collect(),
            ),
            RecordKind::Contact => {
                RemoteChange::Contact(data.contact.as_ref().map(|(contact, _)| contact.clone()))
            }
            RecordKind::ProfileImage => RemoteChange::ProfileImage(
                data.profile_image.as_ref().map(|(url, _)| url.clone()),
            ),
        }
    }
}

impl RemoteStore for MemoryRemote {
    async fn fetch_projects(&self) -> Result<Vec<Project>, RemoteError> {
        self.ensure_reachable()?;
        match self.snapshot(RecordKind::Projects) {
            RemoteChange::Projects(projects) => Ok(projects),
            _ => Ok(Vec::new()),
        }
    }

    async fn create_project(&self, content: &ProjectContent) -> Result<String, RemoteError> {
        self.ensure_reachable()?;
        // Zero-padded so key order matches insertion order, like push ids.
        let id = format!("-M{:012}", self.inner.next_push.fetch_add(1, Ordering::SeqCst));
        let now = now_millis();
        self.data().projects.insert(
            id.clone(),
            StoredProject {
                content: content.clone(),
                created_at: now,
                updated_at: now,
            },
        );
        self.notify(RecordKind::Projects);
        Ok(id)
    }

    async fn replace_project(&self, id: &str, content: &ProjectContent) -> Result<(), RemoteError> {
        self.ensure_reachable()?;
        {
            let mut data = self.data();
            let stored = data
                .projects
                .get_mut(id)
                .ok_or_else(|| RemoteError::NotFound(id.to_string()))?;
            stored.content = content.clone();
            stored.updated_at = now_millis();
        }
        self.notify(RecordKind::Projects);
        Ok(())
    }

    async fn delete_project(&self, id: &str) -> Result<(), RemoteError> {
        self.ensure_reachable()?;
        let removed = self.data().projects.remove(id).is_some();
        if removed {
            self.notify(RecordKind::Projects);
        }
        Ok(())
    }

    async fn fetch_contact(&self) -> Result<Option<ContactInfo>, RemoteError> {
        self.ensure_reachable()?;
        Ok(self.data().contact.as_ref().map(|(contact, _)| contact.clone()))
    }

    async fn write_contact(&self, contact: &ContactInfo) -> Result<(), RemoteError> {
        self.ensure_reachable()?;
        self.data().contact = Some((contact.clone(), now_millis()));
        self.notify(RecordKind::Contact);
        Ok(())
    }

    async fn fetch_profile_image(&self) -> Result<Option<String>, RemoteError> {
        self.ensure_reachable()?;
        Ok(self.data().profile_image.as_ref().map(|(url, _)| url.clone()))
    }

    async fn write_profile_image(&self, url: &str) -> Result<(), RemoteError> {
        self.ensure_reachable()?;
        self.data().profile_image = Some((url.to_string(), now_millis()));
        self.notify(RecordKind::ProfileImage);
        Ok(())
    }

    async fn subscribe(&self, kind: RecordKind) -> Result<RemoteFeed, RemoteError> {
        self.ensure_reachable()?;
        let mut changes = self.inner.changes.subscribe();
        let remote = self.clone();
        Ok(RemoteFeed::spawn(kind, move |sender| async move {
            if sender.send(remote.snapshot(kind)).await.is_err() {
                return;
            }
            loop {
                match changes.recv().await {
                    Ok(changed) if changed != kind => continue,
                    Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {
                        if sender.send(remote.snapshot(kind)).await.is_err() {
                            return;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => return,
                }
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_projects;

    #[tokio::test]
    async fn push_ids_keep_insertion_order() -> anyhow::Result<()> {
        let remote = MemoryRemote::new();
        let projects = default_projects();
        let first = remote.create_project(&projects[0].content).await?;
        let second = remote.create_project(&projects[1].content).await?;
        assert!(first < second);

        let fetched = remote.fetch_projects().await?;
        assert_eq!(fetched[0].id, first);
        assert_eq!(fetched[1].id, second);

        let stored = remote.stored_project(&first).unwrap();
        assert!(stored.created_at > 0);
        assert_eq!(stored.created_at, stored.updated_at);
        Ok(())
    }

    #[tokio::test]
    async fn replace_unknown_id_fails_and_delete_missing_succeeds() -> anyhow::Result<()> {
        let remote = MemoryRemote::new();
        let content = default_projects()[0].content.clone();
        let result = remote.replace_project("nope", &content).await;
        assert!(matches!(result, Err(RemoteError::NotFound(_))));
        remote.delete_project("nope").await?;
        remote.delete_project("nope").await?;
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_remote_fails_every_call() {
        let remote = MemoryRemote::new();
        remote.set_reachable(false);
        assert!(remote.fetch_projects().await.is_err());
        assert!(remote.fetch_contact().await.is_err());
        assert!(remote.write_profile_image("x").await.is_err());
        assert!(remote.subscribe(RecordKind::Projects).await.is_err());
    }
}
