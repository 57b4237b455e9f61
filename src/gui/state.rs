use std::sync::Arc;

use crate::{
    admin::AdminSession,
    config::Config,
    core::{
        open_portfolio,
        remote::RemoteBackend,
        store::{LiveSync, PortfolioSnapshot, PortfolioStore},
    },
};

/// An opened portfolio together with its live subscriptions.
#[derive(Debug, Clone)]
pub struct LoadedPortfolio {
    pub store: Arc<PortfolioStore<RemoteBackend>>,
    pub live: Arc<LiveSync>,
}

impl LoadedPortfolio {
    pub async fn open(config: Config) -> Result<Self, String> {
        let store = open_portfolio(&config)
            .await
            .map_err(|e| format!("{e:#}"))?;
        let store = Arc::new(store);
        let live = Arc::new(store.watch().await);
        Ok(Self { store, live })
    }
}

#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub portfolio: Option<LoadedPortfolio>,
    pub snapshot: Option<PortfolioSnapshot>,
    /// Present while the admin is logged in. Dropped on reset, like a page reload.
    pub session: Option<AdminSession<RemoteBackend>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            portfolio: None,
            snapshot: None,
            session: None,
        }
    }
}
