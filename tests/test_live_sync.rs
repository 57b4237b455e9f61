//! Integration tests for live remote updates.
//!
//! Tests cover:
//! - Pushed records replacing local state and being mirrored
//! - Empty initial pushes being ignored, later empty pushes being applied
//! - Releasing subscriptions when the guard is dropped

mod common;

use common::*;

#[tokio::test]
async fn test_pushed_contact_is_applied_and_mirrored() -> anyhow::Result<()> {
    let remote = MemoryRemote::new();
    let (store, _temp_dir) = open_test_portfolio(remote.clone()).await;
    let live = store.watch().await;
    assert_eq!(live.kinds().len(), 3);

    let mut reader = store.reader();
    let pushed = ContactInfo {
        name: "Pushed Name".to_string(),
        ..default_contact()
    };
    // Another client writing straight to the remote.
    remote.write_contact(&pushed).await?;

    let snapshot = wait_for(&mut reader, |s| s.contact == pushed).await?;
    assert_eq!(snapshot.sync, SyncStatus::Live);
    settle().await;
    assert_eq!(store.local().load_contact().await?, Some(pushed));

    Ok(())
}

#[tokio::test]
async fn test_pushed_projects_replace_the_list() -> anyhow::Result<()> {
    let remote = MemoryRemote::new();
    let (store, _temp_dir) = open_test_portfolio(remote.clone()).await;
    let _live = store.watch().await;

    let mut reader = store.reader();
    let id = remote.create_project(&make_test_content("From elsewhere")).await?;

    let snapshot = wait_for(&mut reader, |s| s.projects.len() == 1).await?;
    assert_eq!(snapshot.projects[0].id, id);
    settle().await;
    let saved = store.local().load_projects().await?.unwrap();
    assert_eq!(saved.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_empty_initial_push_keeps_defaults() -> anyhow::Result<()> {
    let (store, _temp_dir) = open_test_portfolio(MemoryRemote::new()).await;
    let _live = store.watch().await;
    settle().await;

    let snapshot = store.snapshot();
    assert_eq!(snapshot.projects, default_projects());
    assert_eq!(snapshot.contact, default_contact());
    assert_eq!(store.local().load_projects().await?, None);

    Ok(())
}

#[tokio::test]
async fn test_remote_delete_of_last_project_empties_the_list() -> anyhow::Result<()> {
    let remote = MemoryRemote::new();
    let id = remote.create_project(&make_test_content("Only one")).await?;
    let (store, _temp_dir) = open_test_portfolio(remote.clone()).await;
    let _live = store.watch().await;
    assert_eq!(store.snapshot().projects.len(), 1);

    let mut reader = store.reader();
    remote.delete_project(&id).await?;

    let snapshot = wait_for(&mut reader, |s| s.projects.is_empty()).await?;
    assert!(snapshot.project(&id).is_none());
    settle().await;
    assert_eq!(store.local().load_projects().await?, Some(Vec::new()));

    Ok(())
}

#[tokio::test]
async fn test_clearing_remote_projects_reaches_watchers() -> anyhow::Result<()> {
    let remote = MemoryRemote::new();
    remote.create_project(&make_test_content("First")).await?;
    remote.create_project(&make_test_content("Second")).await?;
    let (store, _temp_dir) = open_test_portfolio(remote.clone()).await;
    let _live = store.watch().await;

    let mut reader = store.reader();
    let removed = devfolio::core::remote::clear_projects(&remote).await?;
    assert_eq!(removed, 2);

    wait_for(&mut reader, |s| s.projects.is_empty()).await?;

    Ok(())
}

#[tokio::test]
async fn test_dropping_guard_stops_updates() -> anyhow::Result<()> {
    let remote = MemoryRemote::new();
    let (store, _temp_dir) = open_test_portfolio(remote.clone()).await;

    let live = store.watch().await;
    settle().await;
    assert_eq!(remote.listener_count(), 3);

    drop(live);
    settle().await;
    assert_eq!(remote.listener_count(), 0);

    remote.write_profile_image("https://example.com/late.jpg").await?;
    settle().await;
    assert_eq!(store.snapshot().profile_image, default_profile_image());

    Ok(())
}

#[tokio::test]
async fn test_unreachable_remote_subscribes_nothing() -> anyhow::Result<()> {
    let remote = MemoryRemote::new();
    let (store, _temp_dir) = open_test_portfolio(remote.clone()).await;
    remote.set_reachable(false);

    let live = store.watch().await;

    assert!(live.is_empty());
    assert!(matches!(store.snapshot().sync, SyncStatus::Degraded { .. }));

    Ok(())
}
