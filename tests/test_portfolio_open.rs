//! Integration tests for loading the portfolio state.
//!
//! Tests cover:
//! - Remote, then local, then default precedence per record
//! - Empty remote project lists
//! - Unreachable and unconfigured remotes
//! - Unreadable local values

mod common;

use common::*;

#[tokio::test]
async fn test_empty_everything_opens_on_defaults() -> anyhow::Result<()> {
    let (store, _temp_dir) = open_test_portfolio(MemoryRemote::new()).await;

    let snapshot = store.snapshot();
    assert_eq!(snapshot.projects, default_projects());
    assert_eq!(snapshot.contact, default_contact());
    assert_eq!(snapshot.profile_image, default_profile_image());
    assert_eq!(snapshot.sync, SyncStatus::Live);
    assert_eq!(snapshot.generation, 0);

    Ok(())
}

#[tokio::test]
async fn test_remote_values_win_over_local() -> anyhow::Result<()> {
    let remote = MemoryRemote::new();
    let remote_id = remote.create_project(&make_test_content("Remote")).await?;
    let remote_contact = ContactInfo {
        name: "Remote Name".to_string(),
        ..default_contact()
    };
    remote.write_contact(&remote_contact).await?;
    remote.write_profile_image("https://example.com/remote.jpg").await?;

    let (local, _temp_dir) = create_test_local().await;
    local
        .save_projects(&[Project::new("local", make_test_content("Local"))])
        .await?;
    local
        .save_contact(&ContactInfo {
            name: "Local Name".to_string(),
            ..default_contact()
        })
        .await?;
    local.save_profile_image("https://example.com/local.jpg").await?;

    let store = PortfolioStore::open(remote, local).await;
    let snapshot = store.snapshot();
    assert_eq!(snapshot.projects.len(), 1);
    assert_eq!(snapshot.projects[0].id, remote_id);
    assert_eq!(snapshot.contact, remote_contact);
    assert_eq!(snapshot.profile_image, "https://example.com/remote.jpg");

    Ok(())
}

#[tokio::test]
async fn test_each_record_falls_back_on_its_own() -> anyhow::Result<()> {
    // Remote only has the contact record.
    let remote = MemoryRemote::new();
    let remote_contact = ContactInfo {
        role: "Remote Role".to_string(),
        ..default_contact()
    };
    remote.write_contact(&remote_contact).await?;

    // Local only has the projects.
    let (local, _temp_dir) = create_test_local().await;
    let local_projects = vec![Project::new("local", make_test_content("Local"))];
    local.save_projects(&local_projects).await?;

    let store = PortfolioStore::open(remote, local).await;
    let snapshot = store.snapshot();
    assert_eq!(snapshot.projects, local_projects);
    assert_eq!(snapshot.contact, remote_contact);
    assert_eq!(snapshot.profile_image, default_profile_image());

    Ok(())
}

#[tokio::test]
async fn test_empty_remote_project_list_counts_as_absent() -> anyhow::Result<()> {
    let remote = MemoryRemote::new();
    let id = remote.create_project(&make_test_content("Gone")).await?;
    remote.delete_project(&id).await?;
    assert!(remote.fetch_projects().await?.is_empty());

    let (store, _temp_dir) = open_test_portfolio(remote).await;
    assert_eq!(store.snapshot().projects, default_projects());

    Ok(())
}

#[tokio::test]
async fn test_unreachable_remote_uses_local_and_degrades() -> anyhow::Result<()> {
    let remote = MemoryRemote::new();
    remote.set_reachable(false);

    let (local, _temp_dir) = create_test_local().await;
    let local_projects = vec![Project::new("local", make_test_content("Local"))];
    local.save_projects(&local_projects).await?;

    let store = PortfolioStore::open(remote, local).await;
    let snapshot = store.snapshot();
    assert_eq!(snapshot.projects, local_projects);
    assert_eq!(snapshot.contact, default_contact());
    assert!(matches!(snapshot.sync, SyncStatus::Degraded { .. }));

    Ok(())
}

#[tokio::test]
async fn test_disabled_remote_is_offline() -> anyhow::Result<()> {
    let (local, _temp_dir) = create_test_local().await;
    let store = PortfolioStore::open(RemoteBackend::Disabled, local).await;

    let snapshot = store.snapshot();
    assert_eq!(snapshot.sync, SyncStatus::Offline);
    assert_eq!(snapshot.projects, default_projects());

    let live = store.watch().await;
    assert!(live.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_unreadable_local_value_falls_back_to_default() -> anyhow::Result<()> {
    let (local, _temp_dir) = create_test_local().await;
    local.set_item("portfolio_contact", "{broken").await?;
    local.set_item("portfolio_projects", "[]").await?;

    let store = PortfolioStore::open(RemoteBackend::Disabled, local).await;
    let snapshot = store.snapshot();
    assert_eq!(snapshot.contact, default_contact());
    // A saved empty list is still a saved list.
    assert!(snapshot.projects.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_open_portfolio_from_config() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let data_path = dir.path().join("portfolio.db");
    let data = data_path.to_string_lossy().to_string();
    let config = devfolio::Config::from_lookup(|key| match key {
        "DEVFOLIO_DATA" => Some(data.clone()),
        _ => None,
    })?;

    let store = devfolio::open_portfolio(&config).await?;
    assert!(!store.remote().is_enabled());
    assert_eq!(store.snapshot().sync, SyncStatus::Offline);
    assert_eq!(store.local().path(), data_path.as_path());

    Ok(())
}
