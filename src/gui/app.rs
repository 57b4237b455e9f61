use iced::{Element, Task};

use super::{
    AppState, Message,
    screens::{Screen, ScreenData, ScreenMessage, loading::LoadingScreen},
    state::LoadedPortfolio,
};
use crate::config::Config;

pub struct DevfolioApp {
    screen: ScreenData,
    state: AppState,
}

impl DevfolioApp {
    fn boot(config: Config) -> (Self, Task<Message>) {
        let open = Task::perform(LoadedPortfolio::open(config.clone()), Message::Loaded);
        (
            Self {
                screen: ScreenData::Loading(LoadingScreen::default()),
                state: AppState::new(config),
            },
            open,
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        self.screen
            .update(message, &mut self.state)
            .map(|message| match message {
                ScreenMessage::ScreenMessage(message) => message,
                ScreenMessage::ParentMessage(never) => match never {},
            })
    }

    fn view(&self) -> Element<'_, Message> {
        self.screen
            .view(&self.state)
            .map(|message| match message {
                ScreenMessage::ScreenMessage(message) => message,
                ScreenMessage::ParentMessage(never) => match never {},
            })
    }

    pub fn run(config: Config) -> iced::Result {
        iced::application(
            move || Self::boot(config.clone()),
            Self::update,
            Self::view,
        )
        .title("Devfolio")
        .run()
    }
}
