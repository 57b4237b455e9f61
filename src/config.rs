use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use tracing::{debug, info, warn};

const DEFAULT_DATA_PATH: &str = "devfolio.db";
const DEFAULT_TIMEOUT_MS: &str = "10000";

/// Connection parameters for the hosted realtime database.
///
/// Only `project_id` and `database_url` decide whether remote sync is enabled; the other
/// fields are carried for parity with the web client configuration.
#[derive(Clone, Default)]
pub struct RemoteConfig {
    pub api_key: Option<String>,
    pub auth_domain: Option<String>,
    pub project_id: Option<String>,
    pub database_url: Option<String>,
    pub storage_bucket: Option<String>,
    pub messaging_sender_id: Option<String>,
    pub app_id: Option<String>,
    /// Token appended as `auth=` to REST calls when the database rules require it.
    pub auth_token: Option<String>,
    pub timeout: Duration,
}

impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("project_id", &self.project_id)
            .field("database_url", &self.database_url)
            .field("auth_domain", &self.auth_domain)
            .field("storage_bucket", &self.storage_bucket)
            .field("messaging_sender_id", &self.messaging_sender_id)
            .field("app_id", &self.app_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<set>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl RemoteConfig {
    pub fn is_configured(&self) -> bool {
        self.project_id.is_some() && self.database_url.is_some()
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let timeout_ms: u64 = parse_or_default("DEVFOLIO_TIMEOUT_MS", get("DEVFOLIO_TIMEOUT_MS"), DEFAULT_TIMEOUT_MS)?;

        let config = Self {
            api_key: get("FIREBASE_API_KEY"),
            auth_domain: get("FIREBASE_AUTH_DOMAIN"),
            project_id: get("FIREBASE_PROJECT_ID"),
            database_url: get("FIREBASE_DATABASE_URL")
                .map(|url| url.trim_end_matches('/').to_string()),
            storage_bucket: get("FIREBASE_STORAGE_BUCKET"),
            messaging_sender_id: get("FIREBASE_MESSAGING_SENDER_ID"),
            app_id: get("FIREBASE_APP_ID"),
            auth_token: get("FIREBASE_AUTH_TOKEN"),
            timeout: Duration::from_millis(timeout_ms),
        };

        if config.is_configured() {
            debug!(?config, "Remote store configured");
        } else {
            info!("Remote store not configured, running on defaults and local storage only");
        }
        Ok(config)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub remote: RemoteConfig,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_path = lookup("DEVFOLIO_DATA")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| {
                info!("DEVFOLIO_DATA not set, using default: {DEFAULT_DATA_PATH}");
                DEFAULT_DATA_PATH.to_string()
            });
        Ok(Self {
            data_path: PathBuf::from(data_path),
            remote: RemoteConfig::from_lookup(lookup)?,
        })
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        debug!("Environment variable {key} not found");
    })
}

fn parse_or_default<T: FromStr>(key: &str, value: Option<String>, default: &str) -> anyhow::Result<T>
where
    T::Err: Display,
{
    value
        .unwrap_or_else(|| default.to_string())
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            anyhow::anyhow!("Invalid {key} value: {e}")
        })
}
