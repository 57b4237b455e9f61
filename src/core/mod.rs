pub mod db;
pub mod remote;
pub mod store;

use anyhow::Context;

use crate::config::Config;
use db::LocalStore;
use remote::RemoteBackend;
use store::PortfolioStore;

/// Open the local store, pick the remote backend from `config` and load the portfolio.
pub async fn open_portfolio(config: &Config) -> anyhow::Result<PortfolioStore<RemoteBackend>> {
    let local = LocalStore::new(&config.data_path).await?;
    let remote = RemoteBackend::from_config(&config.remote)
        .context("Failed to set up remote store client")?;
    Ok(PortfolioStore::open(remote, local).await)
}
