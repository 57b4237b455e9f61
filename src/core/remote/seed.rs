use tracing::{info, warn};

use super::{RemoteError, RemoteStore};
use crate::defaults::{default_contact, default_profile_image, default_projects};

/// Outcome of pushing the compiled-in content to the remote store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub projects_added: usize,
    pub projects_failed: usize,
    pub contact_written: bool,
    pub profile_written: bool,
}

impl SeedReport {
    pub fn is_complete(&self) -> bool {
        self.projects_failed == 0 && self.contact_written && self.profile_written
    }
}

/// Push the default projects, contact record and profile image to the remote store.
///
/// Each item is attempted independently; failures are logged and counted, never returned.
pub async fn seed_defaults<R: RemoteStore>(remote: &R) -> SeedReport {
    let mut report = SeedReport::default();

    for project in default_projects() {
        match remote.create_project(&project.content).await {
            Ok(id) => {
                info!(id = %id, title = %project.content.title, "Seeded project");
                report.projects_added += 1;
            }
            Err(e) => {
                warn!("Failed to seed project {}: {e}", project.content.title);
                report.projects_failed += 1;
            }
        }
    }

    match remote.write_contact(&default_contact()).await {
        Ok(()) => report.contact_written = true,
        Err(e) => warn!("Failed to seed contact info: {e}"),
    }
    match remote.write_profile_image(&default_profile_image()).await {
        Ok(()) => report.profile_written = true,
        Err(e) => warn!("Failed to seed profile image: {e}"),
    }

    info!(?report, "Remote seeding finished");
    report
}

/// Delete every project stored remotely. Returns how many were removed.
pub async fn clear_projects<R: RemoteStore>(remote: &R) -> Result<usize, RemoteError> {
    let projects = remote.fetch_projects().await?;
    for project in &projects {
        remote.delete_project(&project.id).await?;
    }
    info!("Cleared {} remote projects", projects.len());
    Ok(projects.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::remote::MemoryRemote;

    #[tokio::test]
    async fn seeding_then_clearing_empties_the_remote() -> anyhow::Result<()> {
        let remote = MemoryRemote::new();
        let report = seed_defaults(&remote).await;
        assert!(report.is_complete());
        assert_eq!(report.projects_added, default_projects().len());
        assert_eq!(remote.fetch_contact().await?, Some(default_contact()));

        let removed = clear_projects(&remote).await?;
        assert_eq!(removed, default_projects().len());
        assert!(remote.fetch_projects().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn seeding_an_unreachable_remote_reports_failures() {
        let remote = MemoryRemote::new();
        remote.set_reachable(false);
        let report = seed_defaults(&remote).await;
        assert_eq!(report.projects_added, 0);
        assert_eq!(report.projects_failed, default_projects().len());
        assert!(!report.is_complete());
    }
}
