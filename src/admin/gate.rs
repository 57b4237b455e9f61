use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use super::AdminSession;
use crate::core::{remote::RemoteStore, store::PortfolioStore};

pub const ADMIN_USERNAME: &str = "Admin";
pub const ADMIN_PASSWORD: &str = "portfolio-admin";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    /// The message is shown inline under the login form as is.
    #[error("Invalid credentials. Try again.")]
    InvalidCredentials,
}

/// Literal username/password check in front of the admin tools.
///
/// This only hides the editing surface. There is no hashing, no rate limit and no token;
/// a session lasts exactly as long as the [`AdminSession`] value.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessGate;

impl AccessGate {
    pub fn check(&self, username: &str, password: &str) -> Result<(), GateError> {
        if username == ADMIN_USERNAME && password == ADMIN_PASSWORD {
            Ok(())
        } else {
            warn!(username, "Rejected admin login");
            Err(GateError::InvalidCredentials)
        }
    }

    pub fn login<R: RemoteStore>(
        &self,
        store: Arc<PortfolioStore<R>>,
        username: &str,
        password: &str,
    ) -> Result<AdminSession<R>, GateError> {
        self.check(username, password)?;
        info!("Admin session opened");
        Ok(AdminSession::new(store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_exact_literals_pass() {
        let gate = AccessGate;
        assert!(gate.check(ADMIN_USERNAME, ADMIN_PASSWORD).is_ok());
        assert_eq!(
            gate.check("admin", ADMIN_PASSWORD),
            Err(GateError::InvalidCredentials)
        );
        assert_eq!(
            gate.check(ADMIN_USERNAME, "portfolio-admin "),
            Err(GateError::InvalidCredentials)
        );
        assert_eq!(gate.check("", ""), Err(GateError::InvalidCredentials));
    }

    #[test]
    fn rejection_message_is_user_facing() {
        assert_eq!(
            GateError::InvalidCredentials.to_string(),
            "Invalid credentials. Try again."
        );
    }
}
