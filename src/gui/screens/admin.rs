use std::path::PathBuf;

use iced::{
    Element, Length, Task,
    widget::{Column, button, column, pick_list, row, text, text_input},
};
use rfd::{AsyncFileDialog, AsyncMessageDialog, MessageButtons, MessageDialogResult, MessageLevel};

use crate::{
    admin::{
        AdminSession, ContactForm, DELETE_PROMPT, ProfileImageInput, ProjectForm, RESET_PROMPT,
    },
    core::{
        remote::RemoteBackend,
        store::{Persistence, PortfolioSnapshot},
    },
    gui::{
        AppState,
        screens::{Screen, ScreenMessage},
        widgets::{layout, nav_item, sync_badge},
    },
    models::ProjectCategory,
    site,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Profile,
    Projects,
}

#[derive(Debug, Clone)]
pub struct AdminScreen {
    tab: AdminTab,
    form: ProjectForm,
    contact: ContactForm,
    image_url: String,
    notice: Option<String>,
}

#[derive(Debug, Clone)]
pub enum AdminMessage {
    Tab(AdminTab),
    ImageUrl(String),
    ApplyImageUrl,
    PickImage,
    ImagePicked(Option<PathBuf>),
    ContactName(String),
    ContactRole(String),
    ContactWhatsapp(String),
    ContactEmail(String),
    ContactLocation(String),
    SaveContact,
    ContactSaved(String),
    Title(String),
    ShortDescription(String),
    FullDescription(String),
    Technologies(String),
    ProjectImage(String),
    Category(ProjectCategory),
    Submit,
    Edit(String),
    CancelEdit,
    Delete(String),
    DeleteConfirmed(String),
    Reset,
    ResetConfirmed,
    Done(String),
    Dismissed,
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    Close,
}

type Msg = ScreenMessage<AdminScreen>;

fn screen(message: AdminMessage) -> Msg {
    ScreenMessage::ScreenMessage(message)
}

fn outcome(what: &str, persistence: &Persistence) -> String {
    match persistence {
        Persistence::Remote => format!("{what} saved."),
        Persistence::LocalOnly { reason } => format!("{what} saved locally only: {reason}"),
    }
}

async fn confirm(prompt: &'static str) -> bool {
    let answer = AsyncMessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title("Confirm")
        .set_description(prompt)
        .set_buttons(MessageButtons::YesNo)
        .show()
        .await;
    matches!(answer, MessageDialogResult::Yes)
}

fn field<'a>(
    label: &'a str,
    value: &'a str,
    on_input: fn(String) -> AdminMessage,
) -> Element<'a, Msg> {
    column![
        text(label).size(14),
        text_input(label, value).on_input(move |v| screen(on_input(v))),
    ]
    .spacing(4)
    .into()
}

impl AdminScreen {
    pub fn new(snapshot: &PortfolioSnapshot) -> Self {
        Self {
            tab: AdminTab::default(),
            form: ProjectForm::new(),
            contact: ContactForm::from_contact(&snapshot.contact),
            image_url: String::new(),
            notice: None,
        }
    }

    /// Pick up remote changes to the contact record unless the admin is editing it.
    pub fn refresh(&mut self, snapshot: &PortfolioSnapshot) {
        if !self.contact.is_dirty() {
            self.contact = ContactForm::from_contact(&snapshot.contact);
        }
    }

    fn profile_tab<'a>(&'a self, snapshot: &'a PortfolioSnapshot) -> Element<'a, Msg> {
        column![
            text("Profile image").size(22),
            text(site::profile_image_summary(&snapshot.profile_image)),
            row![
                text_input("https://... (image URL)", &self.image_url)
                    .on_input(|v| screen(AdminMessage::ImageUrl(v)))
                    .on_submit(screen(AdminMessage::ApplyImageUrl)),
                button("Use URL").on_press(screen(AdminMessage::ApplyImageUrl)),
                button("Upload image").on_press(screen(AdminMessage::PickImage)),
            ]
            .spacing(8),
            text("Contact information").size(22),
            field("Name", &self.contact.name, AdminMessage::ContactName),
            field("Role", &self.contact.role, AdminMessage::ContactRole),
            field(
                "WhatsApp number (international format, digits only)",
                &self.contact.whatsapp_number,
                AdminMessage::ContactWhatsapp
            ),
            field("Email", &self.contact.email, AdminMessage::ContactEmail),
            field("Location", &self.contact.location, AdminMessage::ContactLocation),
            button("Save contact")
                .on_press_maybe(self.contact.is_dirty().then(|| screen(AdminMessage::SaveContact))),
        ]
        .spacing(12)
        .into()
    }

    fn projects_tab<'a>(&'a self, snapshot: &'a PortfolioSnapshot) -> Element<'a, Msg> {
        let editing = self.form.editing_id().is_some();
        let mut actions = row![
            button(if editing { "Save changes" } else { "Add project" })
                .on_press(screen(AdminMessage::Submit))
        ]
        .spacing(8);
        if editing {
            actions = actions.push(button("Cancel").on_press(screen(AdminMessage::CancelEdit)));
        }

        let list = snapshot.projects.iter().map(|project| {
            row![
                text(format!("{} ({})", project.content.title, project.content.category))
                    .width(Length::Fill),
                button("Edit").on_press(screen(AdminMessage::Edit(project.id.clone()))),
                button("Delete").on_press(screen(AdminMessage::Delete(project.id.clone()))),
            ]
            .spacing(8)
            .into()
        });

        column![
            text(if editing { "Edit project" } else { "New project" }).size(22),
            field("Title", &self.form.title, AdminMessage::Title),
            field(
                "Short description",
                &self.form.short_description,
                AdminMessage::ShortDescription
            ),
            field(
                "Full description",
                &self.form.full_description,
                AdminMessage::FullDescription
            ),
            field(
                "Technologies (comma separated)",
                &self.form.technologies,
                AdminMessage::Technologies
            ),
            field("Image URL", &self.form.image_url, AdminMessage::ProjectImage),
            pick_list(ProjectCategory::ALL, Some(self.form.category), |c| {
                screen(AdminMessage::Category(c))
            }),
            actions,
            text(format!("Projects ({})", snapshot.projects.len())).size(22),
            Column::with_children(list).spacing(6),
            button("Restore defaults").on_press(screen(AdminMessage::Reset)),
        ]
        .spacing(12)
        .into()
    }

    fn session(state: &AppState) -> Option<AdminSession<RemoteBackend>> {
        state.session.clone()
    }
}

impl Screen for AdminScreen {
    type Message = AdminMessage;
    type ParentMessage = ParentMessage;

    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let Some(snapshot) = &state.snapshot else {
            return text("Loading portfolio...").into();
        };

        let mut sidebar = column![
            text("Developer Area").size(24),
            nav_item(
                "Profile & Contact",
                self.tab == AdminTab::Profile,
                screen(AdminMessage::Tab(AdminTab::Profile)),
            ),
            nav_item(
                "Manage Projects",
                self.tab == AdminTab::Projects,
                screen(AdminMessage::Tab(AdminTab::Projects)),
            ),
            button("Back to site").on_press(ScreenMessage::ParentMessage(ParentMessage::Close)),
            sync_badge(&snapshot.sync),
        ]
        .spacing(12);
        if let Some(notice) = &self.notice {
            sidebar = sidebar.push(
                column![
                    text(notice.as_str()).size(14),
                    button("Dismiss").on_press(screen(AdminMessage::Dismissed)),
                ]
                .spacing(4),
            );
        }

        let main = match self.tab {
            AdminTab::Profile => self.profile_tab(snapshot),
            AdminTab::Projects => self.projects_tab(snapshot),
        };
        layout(sidebar, main)
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            AdminMessage::Tab(tab) => self.tab = tab,
            AdminMessage::ImageUrl(value) => self.image_url = value,
            AdminMessage::ContactName(value) => self.contact.name = value,
            AdminMessage::ContactRole(value) => self.contact.role = value,
            AdminMessage::ContactWhatsapp(value) => self.contact.whatsapp_number = value,
            AdminMessage::ContactEmail(value) => self.contact.email = value,
            AdminMessage::ContactLocation(value) => self.contact.location = value,
            AdminMessage::Title(value) => self.form.title = value,
            AdminMessage::ShortDescription(value) => self.form.short_description = value,
            AdminMessage::FullDescription(value) => self.form.full_description = value,
            AdminMessage::Technologies(value) => self.form.technologies = value,
            AdminMessage::ProjectImage(value) => self.form.image_url = value,
            AdminMessage::Category(category) => self.form.category = category,
            AdminMessage::CancelEdit => self.form.clear(),
            AdminMessage::Dismissed => self.notice = None,
            AdminMessage::Done(notice) => self.notice = Some(notice),
            AdminMessage::ContactSaved(notice) => {
                self.contact = ContactForm::from_contact(&self.contact.edited());
                self.notice = Some(notice);
            }
            AdminMessage::Edit(id) => {
                if let Some(project) = state.snapshot.as_ref().and_then(|s| s.project(&id)) {
                    self.form.edit(project);
                    self.tab = AdminTab::Projects;
                }
            }
            AdminMessage::ApplyImageUrl => {
                let Some(session) = Self::session(state) else {
                    return Task::none();
                };
                let input = ProfileImageInput::Url(std::mem::take(&mut self.image_url));
                return Task::perform(
                    async move { session.set_profile_image(&input).await },
                    |result| {
                        screen(AdminMessage::Done(match result {
                            Ok(persistence) => outcome("Profile image", &persistence),
                            Err(e) => e.to_string(),
                        }))
                    },
                );
            }
            AdminMessage::PickImage => {
                return Task::perform(
                    AsyncFileDialog::new()
                        .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp"])
                        .pick_file(),
                    |handle| {
                        screen(AdminMessage::ImagePicked(
                            handle.map(|h| h.path().to_path_buf()),
                        ))
                    },
                );
            }
            AdminMessage::ImagePicked(None) => {}
            AdminMessage::ImagePicked(Some(path)) => {
                let Some(session) = Self::session(state) else {
                    return Task::none();
                };
                let input = ProfileImageInput::File(path);
                return Task::perform(
                    async move { session.set_profile_image(&input).await },
                    |result| {
                        screen(AdminMessage::Done(match result {
                            Ok(persistence) => outcome("Profile image", &persistence),
                            Err(e) => e.to_string(),
                        }))
                    },
                );
            }
            AdminMessage::SaveContact => {
                let Some(session) = Self::session(state) else {
                    return Task::none();
                };
                let form = self.contact.clone();
                return Task::perform(
                    async move { session.set_contact(&form).await },
                    |result| match result {
                        Some(persistence) => {
                            screen(AdminMessage::ContactSaved(outcome("Contact", &persistence)))
                        }
                        None => screen(AdminMessage::Done("Nothing to save.".to_string())),
                    },
                );
            }
            AdminMessage::Submit => {
                if let Err(e) = self.form.submit() {
                    self.notice = Some(e.to_string());
                    return Task::none();
                }
                let Some(session) = Self::session(state) else {
                    return Task::none();
                };
                let mut form = std::mem::take(&mut self.form);
                return Task::perform(
                    async move { session.submit_project(&mut form).await },
                    |result| {
                        screen(AdminMessage::Done(match result {
                            Ok((project, persistence)) => outcome(
                                &format!("Project \"{}\"", project.content.title),
                                &persistence,
                            ),
                            Err(e) => e.to_string(),
                        }))
                    },
                );
            }
            AdminMessage::Delete(id) => {
                return Task::perform(confirm(DELETE_PROMPT), move |yes| {
                    if yes {
                        screen(AdminMessage::DeleteConfirmed(id.clone()))
                    } else {
                        screen(AdminMessage::Dismissed)
                    }
                });
            }
            AdminMessage::DeleteConfirmed(id) => {
                let Some(session) = Self::session(state) else {
                    return Task::none();
                };
                if self.form.editing_id() == Some(id.as_str()) {
                    self.form.clear();
                }
                let mut form = self.form.clone();
                return Task::perform(
                    async move { session.delete_project(&mut form, &id, |_| true).await },
                    |result| {
                        screen(AdminMessage::Done(match result {
                            Some(persistence) => outcome("Deletion", &persistence),
                            None => "Deletion cancelled.".to_string(),
                        }))
                    },
                );
            }
            AdminMessage::Reset => {
                return Task::perform(confirm(RESET_PROMPT), |yes| {
                    if yes {
                        screen(AdminMessage::ResetConfirmed)
                    } else {
                        screen(AdminMessage::Dismissed)
                    }
                });
            }
            AdminMessage::ResetConfirmed => {
                let Some(session) = Self::session(state) else {
                    return Task::none();
                };
                return Task::perform(
                    async move { session.reset(|_| true).await.map_err(|e| format!("{e:#}")) },
                    |result| {
                        screen(AdminMessage::Done(match result {
                            Ok(_) => "Portfolio restored to defaults.".to_string(),
                            Err(e) => e,
                        }))
                    },
                );
            }
        }
        Task::none()
    }
}
