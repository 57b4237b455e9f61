//! Integration tests for the admin tools.
//!
//! Tests cover:
//! - The access gate
//! - Submitting the project form for create and edit
//! - Confirmed and declined deletes and resets
//! - Contact and profile image editing

mod common;

use std::sync::Arc;

use common::*;
use devfolio::admin::{
    ContactForm, DELETE_PROMPT, FormError, GateError, ImageInputError, ProfileImageInput,
    ProjectForm, RESET_PROMPT,
};

#[tokio::test]
async fn test_wrong_credentials_give_no_session() -> anyhow::Result<()> {
    let (store, _temp_dir) = open_test_portfolio(MemoryRemote::new()).await;
    let store = Arc::new(store);

    let result = AccessGate.login(Arc::clone(&store), ADMIN_USERNAME, "wrong");
    assert_eq!(result.err(), Some(GateError::InvalidCredentials));

    let session = AccessGate.login(store, ADMIN_USERNAME, ADMIN_PASSWORD);
    assert!(session.is_ok());

    Ok(())
}

#[tokio::test]
async fn test_submit_creates_then_clears_form() -> anyhow::Result<()> {
    let remote = MemoryRemote::new();
    let (session, store, _temp_dir) = open_admin_session(remote.clone()).await;

    let mut form = ProjectForm::new();
    form.title = "Fleet Tracker".to_string();
    form.short_description = "Live vehicle positions".to_string();
    form.technologies = "Rust, Tokio, ".to_string();
    form.category = ProjectCategory::App;

    let (project, persistence) = session.submit_project(&mut form).await?;

    assert_eq!(persistence, Persistence::Remote);
    assert_eq!(project.content.technologies, vec!["Rust", "Tokio"]);
    assert_eq!(project.content.full_description, "Live vehicle positions");
    assert_eq!(store.snapshot().projects[0], project);
    assert_eq!(form, ProjectForm::new());

    Ok(())
}

#[tokio::test]
async fn test_submit_without_title_writes_nothing() -> anyhow::Result<()> {
    let (session, store, _temp_dir) = open_admin_session(MemoryRemote::new()).await;
    let before = store.snapshot();

    let mut form = ProjectForm::new();
    form.short_description = "No title".to_string();
    let result = session.submit_project(&mut form).await;

    assert_eq!(result.err(), Some(FormError::MissingTitle));
    assert_eq!(store.snapshot(), before);
    // The form keeps its input for correction.
    assert_eq!(form.short_description, "No title");

    Ok(())
}

#[tokio::test]
async fn test_editing_keeps_the_project_id() -> anyhow::Result<()> {
    let (session, store, _temp_dir) = open_admin_session(MemoryRemote::new()).await;
    let mut form = ProjectForm::new();
    form.title = "Draft".to_string();
    form.short_description = "First take".to_string();
    let (created, _) = session.submit_project(&mut form).await?;

    form.edit(&created);
    assert_eq!(form.editing_id(), Some(created.id.as_str()));
    form.title = "Final".to_string();
    let (updated, persistence) = session.submit_project(&mut form).await?;

    assert_eq!(persistence, Persistence::Remote);
    assert_eq!(updated.id, created.id);
    assert_eq!(store.snapshot().project(&created.id).unwrap().content.title, "Final");
    assert_eq!(form.editing_id(), None);

    Ok(())
}

#[tokio::test]
async fn test_declined_delete_keeps_project() -> anyhow::Result<()> {
    let (session, store, _temp_dir) = open_admin_session(MemoryRemote::new()).await;
    let mut form = ProjectForm::new();

    let mut asked = None;
    let outcome = session
        .delete_project(&mut form, "1", |prompt| {
            asked = Some(prompt.to_string());
            false
        })
        .await;

    assert_eq!(outcome, None);
    assert_eq!(asked.as_deref(), Some(DELETE_PROMPT));
    assert!(store.snapshot().project("1").is_some());

    Ok(())
}

#[tokio::test]
async fn test_deleting_the_edited_project_clears_form() -> anyhow::Result<()> {
    let (session, store, _temp_dir) = open_admin_session(MemoryRemote::new()).await;
    let snapshot = store.snapshot();
    let target = snapshot.project("2").unwrap();
    let mut form = ProjectForm::new();
    form.edit(target);

    let outcome = session.delete_project(&mut form, "2", |_| true).await;

    assert!(outcome.is_some());
    assert!(store.snapshot().project("2").is_none());
    assert_eq!(form.editing_id(), None);
    assert!(form.title.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_reset_needs_confirmation() -> anyhow::Result<()> {
    let (session, store, _temp_dir) = open_admin_session(MemoryRemote::new()).await;
    store.set_profile_image("https://example.com/me.jpg").await;
    let mut contact = ContactForm::from_contact(&store.snapshot().contact);
    contact.role = "Data Engineer".to_string();
    session.set_contact(&contact).await;

    let mut asked = None;
    let ran = session
        .reset(|prompt| {
            asked = Some(prompt.to_string());
            false
        })
        .await?;
    assert!(!ran);
    assert_eq!(asked.as_deref(), Some(RESET_PROMPT));
    assert_eq!(store.snapshot().generation, 0);

    assert!(session.reset(|_| true).await?);
    let snapshot = store.snapshot();
    assert_eq!(snapshot.generation, 1);
    assert_eq!(snapshot.profile_image, default_profile_image());
    assert_eq!(snapshot.contact, default_contact());
    assert_eq!(store.local().load_contact().await?, None);

    Ok(())
}

#[tokio::test]
async fn test_contact_form_sends_only_changes() -> anyhow::Result<()> {
    let remote = MemoryRemote::new();
    let (session, store, _temp_dir) = open_admin_session(remote.clone()).await;

    let untouched = ContactForm::from_contact(&store.snapshot().contact);
    assert_eq!(session.set_contact(&untouched).await, None);
    assert_eq!(remote.fetch_contact().await?, None);

    let mut form = untouched.clone();
    form.location = "Recife, PE".to_string();
    let persistence = session.set_contact(&form).await;

    assert_eq!(persistence, Some(Persistence::Remote));
    assert_eq!(store.snapshot().contact, form.edited());
    assert_eq!(store.snapshot().contact.name, default_contact().name);

    Ok(())
}

#[tokio::test]
async fn test_profile_image_from_file_is_inlined() -> anyhow::Result<()> {
    let (session, store, _temp_dir) = open_admin_session(MemoryRemote::new()).await;
    let image = create_test_image();

    let input = ProfileImageInput::File(image.path().to_path_buf());
    session.set_profile_image(&input).await?;

    assert!(store.snapshot().profile_image.starts_with("data:image/png;base64,"));

    Ok(())
}

#[tokio::test]
async fn test_bad_image_inputs_are_rejected() -> anyhow::Result<()> {
    let (session, store, _temp_dir) = open_admin_session(MemoryRemote::new()).await;
    let before = store.snapshot().profile_image;

    let empty = session
        .set_profile_image(&ProfileImageInput::Url("   ".to_string()))
        .await;
    assert!(matches!(empty, Err(ImageInputError::EmptyUrl)));

    let text = tempfile::NamedTempFile::new()?;
    std::fs::write(text.path(), b"definitely not an image")?;
    let not_image = session
        .set_profile_image(&ProfileImageInput::File(text.path().to_path_buf()))
        .await;
    assert!(matches!(not_image, Err(ImageInputError::NotAnImage { .. })));

    assert_eq!(store.snapshot().profile_image, before);

    Ok(())
}
