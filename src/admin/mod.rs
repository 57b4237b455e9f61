//! Admin tools: the access gate and the write capability it hands out.
mod forms;
mod gate;

use std::sync::Arc;

use tracing::info;

pub use forms::{
    ContactForm, FormError, ImageInputError, ProfileImageInput, ProjectForm, ProjectSubmission,
    image_data_uri, split_technologies,
};
pub use gate::{ADMIN_PASSWORD, ADMIN_USERNAME, AccessGate, GateError};

use crate::{
    core::{
        remote::RemoteStore,
        store::{Persistence, PortfolioReader, PortfolioStore},
    },
    models::Project,
};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this project?";
pub const RESET_PROMPT: &str =
    "This will erase every saved setting (projects and contact) and restore the defaults. Continue?";

/// Write access to the portfolio, only obtainable through [`AccessGate::login`].
#[derive(Debug)]
pub struct AdminSession<R> {
    store: Arc<PortfolioStore<R>>,
}

impl<R> Clone for AdminSession<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<R: RemoteStore> AdminSession<R> {
    fn new(store: Arc<PortfolioStore<R>>) -> Self {
        Self { store }
    }

    pub fn reader(&self) -> PortfolioReader {
        self.store.reader()
    }

    /// Validate the form, create or update the project, then clear the form.
    pub async fn submit_project(
        &self,
        form: &mut ProjectForm,
    ) -> Result<(Project, Persistence), FormError> {
        let submitted = match form.submit()? {
            ProjectSubmission::Create(content) => {
                let (project, persistence) = self.store.add_project(content).await;
                info!(id = %project.id, "Project added");
                (project, persistence)
            }
            ProjectSubmission::Update(project) => {
                let persistence = self.store.update_project(project.clone()).await;
                info!(id = %project.id, "Project updated");
                (project, persistence)
            }
        };
        form.clear();
        Ok(submitted)
    }

    /// Delete `id` once `confirm` agrees. A form that was editing it is cleared.
    ///
    /// Returns `None` when the confirmation was declined.
    pub async fn delete_project<F>(
        &self,
        form: &mut ProjectForm,
        id: &str,
        confirm: F,
    ) -> Option<Persistence>
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(DELETE_PROMPT) {
            return None;
        }
        let persistence = self.store.delete_project(id).await;
        if form.editing_id() == Some(id) {
            form.clear();
        }
        info!(id, "Project deleted");
        Some(persistence)
    }

    /// Restore the compiled-in content once `confirm` agrees. Returns whether it ran.
    pub async fn reset<F>(&self, confirm: F) -> anyhow::Result<bool>
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(RESET_PROMPT) {
            return Ok(false);
        }
        self.store.reset_to_defaults().await?;
        Ok(true)
    }

    /// Write the changed contact fields. `None` when nothing changed.
    pub async fn set_contact(&self, form: &ContactForm) -> Option<Persistence> {
        let update = form.changes();
        if update.is_empty() {
            return None;
        }
        Some(self.store.set_contact_info(&update).await)
    }

    pub async fn set_profile_image(
        &self,
        input: &ProfileImageInput,
    ) -> Result<Persistence, ImageInputError> {
        let url = input.resolve().await?;
        Ok(self.store.set_profile_image(&url).await)
    }
}
