mod fallback;
mod state;

use std::{path::Path, sync::Arc};

use anyhow::Context;
use state::LocalState;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

pub use fallback::FallbackRepository;

use crate::models::{ContactInfo, Project, RecordKind};

/// SQLite-backed mirror of the portfolio records, used when the remote store cannot be
/// reached. Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct LocalStore {
    state: Arc<LocalState>,
}

impl LocalStore {
    pub async fn new<P: AsRef<Path>>(db_file: P) -> anyhow::Result<Self> {
        Ok(Self {
            state: Arc::new(LocalState::new(db_file).await?),
        })
    }

    pub fn path(&self) -> &Path {
        self.state.db_file()
    }

    /// Flush and close the underlying database. Later calls on any clone fail.
    pub async fn close(&self) -> anyhow::Result<()> {
        self.state.close().await
    }
}

impl FallbackRepository for LocalStore {
    async fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        let mut conn = self.state.conn().await?;
        let value = sqlx::query_scalar::<_, String>(
            r#"SELECT value FROM local_storage WHERE key = $1"#,
        )
        .bind(key)
        .fetch_optional(&mut **conn)
        .await?;
        Ok(value)
    }

    async fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut conn = self.state.conn().await?;
        let updated_at = OffsetDateTime::now_utc().format(&Rfc3339)?;
        sqlx::query(
            r#"INSERT INTO local_storage (key, value, updated_at) VALUES ($1, $2, $3)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = EXCLUDED.updated_at"#,
        )
        .bind(key)
        .bind(value)
        .bind(updated_at)
        .execute(&mut **conn)
        .await?;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        let mut conn = self.state.conn().await?;
        sqlx::query(r#"DELETE FROM local_storage WHERE key = $1"#)
            .bind(key)
            .execute(&mut **conn)
            .await?;
        Ok(())
    }

    async fn load_projects(&self) -> anyhow::Result<Option<Vec<Project>>> {
        let key = RecordKind::Projects.local_key();
        match self.get_item(key).await? {
            Some(raw) => {
                let projects = serde_json::from_str(&raw)
                    .with_context(|| format!("Malformed {key} entry in local store"))?;
                Ok(Some(projects))
            }
            None => Ok(None),
        }
    }

    async fn save_projects(&self, projects: &[Project]) -> anyhow::Result<()> {
        let raw = serde_json::to_string(projects)?;
        self.set_item(RecordKind::Projects.local_key(), &raw).await
    }

    async fn load_contact(&self) -> anyhow::Result<Option<ContactInfo>> {
        let key = RecordKind::Contact.local_key();
        match self.get_item(key).await? {
            Some(raw) => {
                let contact = serde_json::from_str(&raw)
                    .with_context(|| format!("Malformed {key} entry in local store"))?;
                Ok(Some(contact))
            }
            None => Ok(None),
        }
    }

    async fn save_contact(&self, contact: &ContactInfo) -> anyhow::Result<()> {
        let raw = serde_json::to_string(contact)?;
        self.set_item(RecordKind::Contact.local_key(), &raw).await
    }

    async fn load_profile_image(&self) -> anyhow::Result<Option<String>> {
        // Stored as the bare URL, not JSON.
        Ok(self
            .get_item(RecordKind::ProfileImage.local_key())
            .await?
            .filter(|url| !url.is_empty()))
    }

    async fn save_profile_image(&self, url: &str) -> anyhow::Result<()> {
        self.set_item(RecordKind::ProfileImage.local_key(), url).await
    }

    async fn clear(&self) -> anyhow::Result<()> {
        let mut conn = self.state.conn().await?;
        let mut tx = conn.begin_transaction().await?;
        for kind in RecordKind::ALL {
            sqlx::query(r#"DELETE FROM local_storage WHERE key = $1"#)
                .bind(kind.local_key())
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
