mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from devfolio for tests
pub use devfolio::{
    AccessGate, AdminSession, ContactInfo, ContactUpdate, FallbackRepository, LocalStore,
    Persistence, PortfolioReader, PortfolioSnapshot, PortfolioStore, Project, ProjectCategory,
    ProjectContent, RemoteBackend, RemoteStore, SyncStatus,
    admin::{ADMIN_PASSWORD, ADMIN_USERNAME},
    core::remote::MemoryRemote,
    defaults::{default_contact, default_profile_image, default_projects},
};
