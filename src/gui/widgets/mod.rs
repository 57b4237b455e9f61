use iced::{
    Color, Element, Length, Theme, border,
    widget::{button, column, container, container::Style, row, scrollable, text},
};
use iced_widget::container::bordered_box;

use crate::{core::store::SyncStatus, site::NAV_LINKS};

/// Public page sections, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Hero,
    About,
    Skills,
    Portfolio,
    Contact,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Hero,
        Section::About,
        Section::Skills,
        Section::Portfolio,
        Section::Contact,
    ];

    fn index(self) -> usize {
        match self {
            Section::Hero => 0,
            Section::About => 1,
            Section::Skills => 2,
            Section::Portfolio => 3,
            Section::Contact => 4,
        }
    }

    pub fn label(self) -> &'static str {
        NAV_LINKS[self.index()].0
    }

    pub fn anchor(self) -> &'static str {
        NAV_LINKS[self.index()].1
    }
}

fn highlight(active: bool) -> impl Fn(&Theme) -> Style {
    move |theme: &Theme| {
        let style = bordered_box(theme).border(border::width(if active { 3 } else { 1 }));
        if active {
            let mut rgba = theme.palette().background.into_rgba8();
            rgba[0] /= 2;
            rgba[1] /= 2;
            rgba[2] /= 2;
            style.background(Color::from_rgb8(rgba[0], rgba[1], rgba[2]))
        } else {
            style.background(theme.palette().background)
        }
    }
}

pub fn nav_item<'a, Message>(label: &'a str, active: bool, on_press: Message) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    container(button(text(label)).on_press(on_press).width(Length::Fill))
        .style(highlight(active))
        .padding(4)
        .width(Length::Fill)
        .into()
}

pub fn sync_badge<'a, Message: 'a>(sync: &SyncStatus) -> Element<'a, Message> {
    let color = match sync {
        SyncStatus::Live => Color::from_rgb8(0x22, 0xc5, 0x5e),
        SyncStatus::Offline => Color::from_rgb8(0x94, 0xa3, 0xb8),
        SyncStatus::Degraded { .. } => Color::from_rgb8(0xea, 0xb3, 0x08),
    };
    let detail = match sync {
        SyncStatus::Degraded { last_error } => last_error.clone(),
        SyncStatus::Live => "Remote store connected".to_string(),
        SyncStatus::Offline => "Using local storage".to_string(),
    };
    column![text(sync.label()).color(color), text(detail).size(12)]
        .spacing(2)
        .into()
}

pub fn layout<'a, Message>(
    sidebar: impl Into<Element<'a, Message>>,
    main_content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message>
where
    Message: 'a,
{
    container(row![
        container(sidebar.into())
            .padding(10)
            .height(Length::Fill)
            .width(Length::FillPortion(1)),
        container(scrollable(container(main_content.into()).padding(20)))
            .width(Length::FillPortion(4)),
    ])
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .into()
}
