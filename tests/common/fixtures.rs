use std::{sync::Arc, time::Duration};

use devfolio::{
    AccessGate, AdminSession, LocalStore, PortfolioReader, PortfolioSnapshot, PortfolioStore,
    ProjectCategory, ProjectContent,
    admin::{ADMIN_PASSWORD, ADMIN_USERNAME},
    core::remote::MemoryRemote,
};
use image::{ImageBuffer, Rgb};
use tempfile::{NamedTempFile, TempDir};

/// Creates a 16x16 red PNG and returns the temp file.
/// The file will be automatically cleaned up when dropped.
pub fn create_test_image() -> NamedTempFile {
    let img = ImageBuffer::from_fn(16, 16, |_, _| Rgb([255u8, 0u8, 0u8]));
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("Failed to create temp image file");
    img.save_with_format(file.path(), image::ImageFormat::Png)
        .expect("Failed to save test image");
    file
}

/// Creates a LocalStore in a fresh temp directory.
/// Returns both the store and the temp directory (which must be kept alive).
pub async fn create_test_local() -> (LocalStore, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let local = LocalStore::new(dir.path().join("test.db"))
        .await
        .expect("Failed to create local store");
    (local, dir)
}

/// Opens a portfolio on top of `remote` and an empty local store.
pub async fn open_test_portfolio(remote: MemoryRemote) -> (PortfolioStore<MemoryRemote>, TempDir) {
    let (local, dir) = create_test_local().await;
    (PortfolioStore::open(remote, local).await, dir)
}

/// Logs in with the admin literals on a freshly opened portfolio.
pub async fn open_admin_session(
    remote: MemoryRemote,
) -> (AdminSession<MemoryRemote>, Arc<PortfolioStore<MemoryRemote>>, TempDir) {
    let (store, dir) = open_test_portfolio(remote).await;
    let store = Arc::new(store);
    let session = AccessGate
        .login(Arc::clone(&store), ADMIN_USERNAME, ADMIN_PASSWORD)
        .expect("Admin literals must be accepted");
    (session, store, dir)
}

/// Creates project content with the given title and test data
pub fn make_test_content(title: &str) -> ProjectContent {
    ProjectContent {
        title: title.to_string(),
        short_description: format!("{title} in one line"),
        full_description: format!("{title} described at length"),
        technologies: vec!["Rust".to_string(), "SQLite".to_string()],
        image_url: "https://example.com/cover.png".to_string(),
        category: ProjectCategory::Dashboard,
    }
}

/// Waits until a published snapshot satisfies `done`, failing after two seconds.
pub async fn wait_for<F>(reader: &mut PortfolioReader, mut done: F) -> anyhow::Result<PortfolioSnapshot>
where
    F: FnMut(&PortfolioSnapshot) -> bool,
{
    let current = reader.snapshot();
    if done(&current) {
        return Ok(current);
    }
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            match reader.changed().await {
                Ok(snapshot) if done(&snapshot) => return Ok(snapshot),
                Ok(_) => continue,
                Err(e) => return Err(e),
            }
        }
    })
    .await?
}

/// Lets spawned tasks run for a moment.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}
