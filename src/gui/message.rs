use crate::{
    core::store::PortfolioSnapshot,
    gui::{
        screens::{
            ScreenData, ScreenMessage, admin::AdminScreen, loading::LoadingScreen,
            login::LoginScreen, portfolio::PortfolioScreen,
        },
        state::LoadedPortfolio,
    },
};

#[derive(Debug, Clone)]
pub enum Message {
    Loading(ScreenMessage<LoadingScreen>),
    Portfolio(ScreenMessage<PortfolioScreen>),
    Login(ScreenMessage<LoginScreen>),
    Admin(ScreenMessage<AdminScreen>),
    ChangeScreen(ScreenData),
    Loaded(Result<LoadedPortfolio, String>),
    Snapshot(PortfolioSnapshot),
}
