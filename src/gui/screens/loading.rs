use std::convert::Infallible;

use iced::{
    Alignment::Center,
    Element, Length, Task,
    widget::{button, column, container, text},
};

use crate::gui::{
    AppState,
    screens::{Screen, ScreenMessage},
};

#[derive(Debug, Clone, Default)]
pub struct LoadingScreen {
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    Retry,
}

impl LoadingScreen {
    pub fn failed(error: String) -> Self {
        Self { error: Some(error) }
    }
}

impl Screen for LoadingScreen {
    type Message = Infallible;
    type ParentMessage = ParentMessage;

    fn view<'a>(&'a self, _state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let content = match &self.error {
            None => column![text("Loading portfolio...")],
            Some(error) => column![
                text("Could not open the portfolio").size(24),
                text(error.as_str()),
                button("Retry").on_press(ScreenMessage::ParentMessage(ParentMessage::Retry)),
            ]
            .spacing(20)
            .align_x(Center),
        };
        container(content)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {}
    }
}
