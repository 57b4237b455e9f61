use iced::{
    Alignment::Center,
    Color, Element, Length, Task,
    widget::{button, column, container, row, text, text_input},
};

use crate::{
    admin::AccessGate,
    gui::{
        AppState,
        screens::{Screen, ScreenMessage},
    },
};

#[derive(Debug, Clone, Default)]
pub struct LoginScreen {
    username: String,
    password: String,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum LoginMessage {
    Username(String),
    Password(String),
    Submit,
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    Authenticated,
    Cancelled,
}

impl Screen for LoginScreen {
    type Message = LoginMessage;
    type ParentMessage = ParentMessage;

    fn view<'a>(&'a self, _state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let mut form = column![text("Restricted Access").size(28)].spacing(16);
        if let Some(error) = &self.error {
            form = form.push(text(error.as_str()).color(Color::from_rgb8(0xdc, 0x26, 0x26)));
        }
        form = form
            .push(
                text_input("Username", &self.username)
                    .on_input(|value| ScreenMessage::ScreenMessage(LoginMessage::Username(value)))
                    .on_submit(ScreenMessage::ScreenMessage(LoginMessage::Submit)),
            )
            .push(
                text_input("Password", &self.password)
                    .secure(true)
                    .on_input(|value| ScreenMessage::ScreenMessage(LoginMessage::Password(value)))
                    .on_submit(ScreenMessage::ScreenMessage(LoginMessage::Submit)),
            )
            .push(
                row![
                    button("Enter").on_press(ScreenMessage::ScreenMessage(LoginMessage::Submit)),
                    button("Cancel")
                        .on_press(ScreenMessage::ParentMessage(ParentMessage::Cancelled)),
                ]
                .spacing(12),
            );

        container(form.width(360).align_x(Center))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            LoginMessage::Username(value) => self.username = value,
            LoginMessage::Password(value) => self.password = value,
            LoginMessage::Submit => {
                let Some(portfolio) = &state.portfolio else {
                    return Task::none();
                };
                self.error = None;
                match AccessGate.login(portfolio.store.clone(), &self.username, &self.password) {
                    Ok(session) => {
                        state.session = Some(session);
                        self.username.clear();
                        self.password.clear();
                        return Task::done(ScreenMessage::ParentMessage(
                            ParentMessage::Authenticated,
                        ));
                    }
                    Err(e) => self.error = Some(e.to_string()),
                }
            }
        }
        Task::none()
    }
}
