pub mod admin;
pub mod loading;
pub mod login;
pub mod portfolio;

use futures::stream;
use iced::{Element, Task};
use tracing::{error, info};

use crate::gui::{AppState, Message, state::LoadedPortfolio};

#[derive(Debug, Clone)]
pub enum ScreenMessage<S: Screen> {
    ScreenMessage(S::Message),
    ParentMessage(S::ParentMessage),
}

pub trait Screen: Sized {
    type Message: std::fmt::Debug + Clone;
    type ParentMessage: std::fmt::Debug + Clone;
    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, ScreenMessage<Self>>;
    fn update(&mut self, message: Self::Message, state: &mut AppState)
    -> Task<ScreenMessage<Self>>;
}

#[derive(Debug, Clone)]
pub enum ScreenData {
    Loading(loading::LoadingScreen),
    Portfolio(portfolio::PortfolioScreen),
    Login(login::LoginScreen),
    Admin(admin::AdminScreen),
}

fn change_screen(screen: ScreenData) -> Task<ScreenMessage<ScreenData>> {
    Task::done(ScreenMessage::ScreenMessage(Message::ChangeScreen(screen)))
}

impl Screen for ScreenData {
    type Message = Message;
    type ParentMessage = std::convert::Infallible;

    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        match self {
            ScreenData::Loading(screen) => screen.view(state).map(Message::Loading),
            ScreenData::Portfolio(screen) => screen.view(state).map(Message::Portfolio),
            ScreenData::Login(screen) => screen.view(state).map(Message::Login),
            ScreenData::Admin(screen) => screen.view(state).map(Message::Admin),
        }
        .map(ScreenMessage::ScreenMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match (self, message) {
            (x, Message::ChangeScreen(screen)) => {
                *x = screen;
                Task::none()
            }
            (x, Message::Loaded(Ok(loaded))) => {
                let snapshot = loaded.store.snapshot();
                info!(sync = snapshot.sync.label(), "Portfolio opened");
                let updates = stream::unfold(loaded.store.reader(), |mut reader| async move {
                    let snapshot = reader.changed().await.ok()?;
                    Some((snapshot, reader))
                });
                state.snapshot = Some(snapshot);
                state.portfolio = Some(loaded);
                *x = ScreenData::Portfolio(portfolio::PortfolioScreen::default());
                Task::run(updates, |snapshot| {
                    ScreenMessage::ScreenMessage(Message::Snapshot(snapshot))
                })
            }
            (x, Message::Loaded(Err(e))) => {
                error!("Failed to open portfolio: {e}");
                *x = ScreenData::Loading(loading::LoadingScreen::failed(e));
                Task::none()
            }
            (x, Message::Snapshot(snapshot)) => {
                let reloaded = state
                    .snapshot
                    .as_ref()
                    .is_some_and(|current| current.generation != snapshot.generation);
                if reloaded {
                    // Same as a fresh page load: back to the public page, logged out.
                    state.session = None;
                    *x = ScreenData::Portfolio(portfolio::PortfolioScreen::default());
                } else if let ScreenData::Admin(screen) = x {
                    screen.refresh(&snapshot);
                }
                state.snapshot = Some(snapshot);
                Task::none()
            }
            (ScreenData::Loading(page), Message::Loading(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => page
                    .update(msg, state)
                    .map(Message::Loading)
                    .map(ScreenMessage::ScreenMessage),
                ScreenMessage::ParentMessage(loading::ParentMessage::Retry) => {
                    *page = loading::LoadingScreen::default();
                    Task::perform(LoadedPortfolio::open(state.config.clone()), |result| {
                        ScreenMessage::ScreenMessage(Message::Loaded(result))
                    })
                }
            },
            (ScreenData::Portfolio(page), Message::Portfolio(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => page
                    .update(msg, state)
                    .map(Message::Portfolio)
                    .map(ScreenMessage::ScreenMessage),
                ScreenMessage::ParentMessage(portfolio::ParentMessage::OpenAdmin) => {
                    match (&state.session, &state.snapshot) {
                        (Some(_), Some(snapshot)) => change_screen(ScreenData::Admin(
                            admin::AdminScreen::new(snapshot),
                        )),
                        _ => change_screen(ScreenData::Login(login::LoginScreen::default())),
                    }
                }
            },
            (ScreenData::Login(page), Message::Login(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => page
                    .update(msg, state)
                    .map(Message::Login)
                    .map(ScreenMessage::ScreenMessage),
                ScreenMessage::ParentMessage(login::ParentMessage::Authenticated) => {
                    match &state.snapshot {
                        Some(snapshot) => {
                            change_screen(ScreenData::Admin(admin::AdminScreen::new(snapshot)))
                        }
                        None => Task::none(),
                    }
                }
                ScreenMessage::ParentMessage(login::ParentMessage::Cancelled) => {
                    change_screen(ScreenData::Portfolio(portfolio::PortfolioScreen::default()))
                }
            },
            (ScreenData::Admin(page), Message::Admin(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => page
                    .update(msg, state)
                    .map(Message::Admin)
                    .map(ScreenMessage::ScreenMessage),
                ScreenMessage::ParentMessage(admin::ParentMessage::Close) => {
                    change_screen(ScreenData::Portfolio(portfolio::PortfolioScreen::default()))
                }
            },
            _ => Task::none(),
        }
    }
}
