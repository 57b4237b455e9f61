use iced::{
    Element, Length, Task,
    widget::{Column, button, column, container, row, text},
};

use crate::{
    core::store::PortfolioSnapshot,
    gui::{
        AppState,
        screens::{Screen, ScreenMessage},
        widgets::{Section, layout, nav_item, sync_badge},
    },
    models::Project,
    site,
};

#[derive(Debug, Clone, Default)]
pub struct PortfolioScreen {
    section: Section,
    selected: Option<String>,
}

#[derive(Debug, Clone)]
pub enum PortfolioMessage {
    GoTo(Section),
    ShowProject(String),
    CloseProject,
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    OpenAdmin,
}

type Msg = ScreenMessage<PortfolioScreen>;

fn hero(snapshot: &PortfolioSnapshot) -> Element<'_, Msg> {
    let links = site::contact_links(&snapshot.contact);
    column![
        text(snapshot.contact.role.as_str()).size(14),
        text(snapshot.contact.name.as_str()).size(40),
        text("Systems & Web").size(28),
        text(format!(
            "Photo: {}",
            site::profile_image_summary(&snapshot.profile_image)
        )),
        text(format!("Talk on WhatsApp: {}", links.whatsapp)),
        button("See projects").on_press(ScreenMessage::ScreenMessage(PortfolioMessage::GoTo(
            Section::Portfolio
        ))),
    ]
    .spacing(12)
    .into()
}

fn gallery(projects: &[Project]) -> Element<'_, Msg> {
    let cards = projects.iter().map(|project| {
        button(text(site::render_card(project)))
            .on_press(ScreenMessage::ScreenMessage(PortfolioMessage::ShowProject(
                project.id.clone(),
            )))
            .width(Length::Fill)
            .into()
    });
    column![
        text("Featured Projects").size(32),
        Column::with_children(cards).spacing(10),
    ]
    .spacing(16)
    .into()
}

fn detail(project: &Project) -> Element<'_, Msg> {
    column![
        button("Back").on_press(ScreenMessage::ScreenMessage(PortfolioMessage::CloseProject)),
        text(site::render_project_detail(project)),
    ]
    .spacing(16)
    .into()
}

impl Screen for PortfolioScreen {
    type Message = PortfolioMessage;
    type ParentMessage = ParentMessage;

    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let Some(snapshot) = &state.snapshot else {
            return text("Loading portfolio...").into();
        };

        let nav = Section::ALL.into_iter().map(|section| {
            nav_item(
                section.label(),
                section == self.section,
                ScreenMessage::ScreenMessage(PortfolioMessage::GoTo(section)),
            )
        });
        let sidebar = column![
            text("Portfolio").size(24),
            Column::with_children(nav).spacing(4),
            button("Admin").on_press(ScreenMessage::ParentMessage(ParentMessage::OpenAdmin)),
            sync_badge(&snapshot.sync),
        ]
        .spacing(12);

        let selected = self
            .selected
            .as_deref()
            .and_then(|id| snapshot.project(id));
        let main: Element<'a, Msg> = match (self.section, selected) {
            (Section::Portfolio, Some(project)) => detail(project),
            (Section::Portfolio, None) => gallery(&snapshot.projects),
            (Section::Hero, _) => hero(snapshot),
            (Section::About, _) => text(site::render_about()).into(),
            (Section::Skills, _) => text(site::render_skills()).into(),
            (Section::Contact, _) => column![
                text(site::render_contact(&snapshot.contact)),
                text(site::render_footer(&snapshot.contact)).size(12),
            ]
            .into(),
        };

        layout(sidebar, row![container(main).width(Length::Fill)])
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            PortfolioMessage::GoTo(section) => {
                self.section = section;
                self.selected = None;
            }
            PortfolioMessage::ShowProject(id) => {
                self.section = Section::Portfolio;
                self.selected = Some(id);
            }
            PortfolioMessage::CloseProject => self.selected = None,
        }
        Task::none()
    }
}
