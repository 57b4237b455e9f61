pub mod admin;
pub mod config;
pub mod core;
pub mod defaults;
pub mod models;
pub mod site;

pub use admin::{AccessGate, AdminSession};
pub use config::{Config, RemoteConfig};
pub use crate::core::{
    db::{FallbackRepository, LocalStore},
    open_portfolio,
    remote::{RemoteBackend, RemoteStore},
    store::{Persistence, PortfolioReader, PortfolioSnapshot, PortfolioStore, SyncStatus},
};
pub use models::{ContactInfo, ContactUpdate, Project, ProjectCategory, ProjectContent};

#[cfg(feature = "gui")]
pub mod gui;
