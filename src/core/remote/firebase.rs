//! # Realtime Database REST client
//!
//! Talks to `{databaseURL}/{path}.json` over plain HTTPS.
//!
//! - reads are `GET`, a missing path answers `null`
//! - new projects are `POST`ed, the answer carries the generated push id as `name`
//! - project edits are `PATCH`ed so `createdAt` survives, singletons are `PUT`
//! - timestamps are written as the `{".sv": "timestamp"}` placeholder and resolved server-side
//!
//! Live updates use the streaming variant of `GET` (`Accept: text/event-stream`). Rather
//! than replaying `put`/`patch` deltas locally, every data event triggers a fresh read of
//! the whole record, so subscribers always receive full snapshots.
use std::collections::BTreeMap;

use futures::StreamExt;
use reqwest::{
    Client, Method, RequestBuilder, Response,
    header::{ACCEPT, CACHE_CONTROL},
};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::{
    RemoteChange, RemoteError, RemoteFeed, RemoteStore,
    sse::SseParser,
};
use crate::{
    config::RemoteConfig,
    models::{ContactInfo, Project, ProjectContent, RecordKind},
};

#[derive(Deserialize)]
struct PushResponse {
    name: String,
}

#[derive(Deserialize)]
struct ProfileImageRecord {
    #[serde(default)]
    url: String,
}

fn server_timestamp() -> Value {
    json!({ ".sv": "timestamp" })
}

#[derive(Debug, Clone)]
pub struct FirebaseClient {
    http: Client,
    database_url: String,
    auth_token: Option<String>,
    timeout: std::time::Duration,
}

impl FirebaseClient {
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let database_url = config
            .database_url
            .clone()
            .ok_or(RemoteError::Unconfigured)?;
        let http = Client::builder().connect_timeout(config.timeout).build()?;
        info!(
            project_id = config.project_id.as_deref().unwrap_or_default(),
            database_url = %database_url,
            "Realtime database client ready"
        );
        Ok(Self {
            http,
            database_url,
            auth_token: config.auth_token.clone(),
            timeout: config.timeout,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}.json", self.database_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.auth_token {
            Some(token) => builder.query(&[("auth", token.as_str())]),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, RemoteError> {
        let response = builder.timeout(self.timeout).send().await?;
        check_status(response).await
    }

    async fn read<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, RemoteError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice::<Option<T>>(&bytes)?)
    }

    async fn write(&self, method: Method, path: &str, body: &Value) -> Result<Response, RemoteError> {
        self.send(self.request(method, path).json(body)).await
    }

    async fn project_exists(&self, id: &str) -> Result<bool, RemoteError> {
        let path = project_path(id);
        let response = self
            .send(self.request(Method::GET, &path).query(&[("shallow", "true")]))
            .await?;
        let value: Value = serde_json::from_slice(&response.bytes().await?)?;
        Ok(!value.is_null())
    }

    async fn read_change(&self, kind: RecordKind) -> Result<RemoteChange, RemoteError> {
        Ok(match kind {
            RecordKind::Projects => RemoteChange::Projects(self.fetch_projects().await?),
            RecordKind::Contact => RemoteChange::Contact(self.fetch_contact().await?),
            RecordKind::ProfileImage => {
                RemoteChange::ProfileImage(self.fetch_profile_image().await?)
            }
        })
    }

    async fn pump_events(
        self,
        kind: RecordKind,
        response: Response,
        sender: mpsc::Sender<RemoteChange>,
    ) {
        let mut stream = response.bytes_stream();
        let mut parser = SseParser::default();

        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    warn!("Live {kind} {}", RemoteError::Stream(e.to_string()));
                    return;
                }
            };
            parser.push(&chunk);

            while let Some(event) = parser.next_event() {
                match event.event.as_str() {
                    "put" | "patch" => match self.read_change(kind).await {
                        Ok(change) => {
                            if sender.send(change).await.is_err() {
                                debug!("Live {kind} subscriber gone, closing stream");
                                return;
                            }
                        }
                        Err(e) => warn!("Failed to refresh {kind} after remote change: {e}"),
                    },
                    "keep-alive" => {}
                    "cancel" | "auth_revoked" => {
                        let reason = format!("remote sent {} {}", event.event, event.data);
                        warn!("Live {kind} {}", RemoteError::Stream(reason));
                        return;
                    }
                    other => debug!("Ignoring {other} event on live {kind} stream"),
                }
            }
        }
        debug!("Live {kind} stream closed by remote");
    }
}

fn project_path(id: &str) -> String {
    format!("{}/{}", RecordKind::Projects.remote_path(), id)
}

async fn check_status(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(RemoteError::Status { status, body })
}

fn stamped(content: &impl serde::Serialize, fields: &[&str]) -> Result<Value, RemoteError> {
    let mut body = serde_json::to_value(content)?;
    if let Value::Object(map) = &mut body {
        for field in fields {
            map.insert(field.to_string(), server_timestamp());
        }
    }
    Ok(body)
}

impl RemoteStore for FirebaseClient {
    async fn fetch_projects(&self) -> Result<Vec<Project>, RemoteError> {
        let records: Option<BTreeMap<String, ProjectContent>> =
            self.read(RecordKind::Projects.remote_path()).await?;
        Ok(records
            .unwrap_or_default()
            .into_iter()
            .map(|(id, content)| Project::new(id, content))
            .collect())
    }

    async fn create_project(&self, content: &ProjectContent) -> Result<String, RemoteError> {
        let body = stamped(content, &["createdAt", "updatedAt"])?;
        let response = self
            .write(Method::POST, RecordKind::Projects.remote_path(), &body)
            .await?;
        let push: PushResponse = serde_json::from_slice(&response.bytes().await?)?;
        debug!(id = %push.name, "Created remote project");
        Ok(push.name)
    }

    async fn replace_project(&self, id: &str, content: &ProjectContent) -> Result<(), RemoteError> {
        if !self.project_exists(id).await? {
            return Err(RemoteError::NotFound(id.to_string()));
        }
        let body = stamped(content, &["updatedAt"])?;
        self.write(Method::PATCH, &project_path(id), &body).await?;
        Ok(())
    }

    async fn delete_project(&self, id: &str) -> Result<(), RemoteError> {
        self.send(self.request(Method::DELETE, &project_path(id)))
            .await?;
        Ok(())
    }

    async fn fetch_contact(&self) -> Result<Option<ContactInfo>, RemoteError> {
        self.read(RecordKind::Contact.remote_path()).await
    }

    async fn write_contact(&self, contact: &ContactInfo) -> Result<(), RemoteError> {
        let body = stamped(contact, &["updatedAt"])?;
        self.write(Method::PUT, RecordKind::Contact.remote_path(), &body)
            .await?;
        Ok(())
    }

    async fn fetch_profile_image(&self) -> Result<Option<String>, RemoteError> {
        let record: Option<ProfileImageRecord> =
            self.read(RecordKind::ProfileImage.remote_path()).await?;
        Ok(record.map(|r| r.url).filter(|url| !url.is_empty()))
    }

    async fn write_profile_image(&self, url: &str) -> Result<(), RemoteError> {
        let body = json!({ "url": url, "updatedAt": server_timestamp() });
        self.write(Method::PUT, RecordKind::ProfileImage.remote_path(), &body)
            .await?;
        Ok(())
    }

    async fn subscribe(&self, kind: RecordKind) -> Result<RemoteFeed, RemoteError> {
        // No request timeout here: the stream stays open for as long as the feed lives.
        let response = self
            .request(Method::GET, kind.remote_path())
            .header(ACCEPT, "text/event-stream")
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await?;
        let response = check_status(response).await?;
        debug!("Subscribed to live {kind} updates");

        let client = self.clone();
        Ok(RemoteFeed::spawn(kind, move |sender| {
            client.pump_events(kind, response, sender)
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn config(url: Option<&str>) -> RemoteConfig {
        RemoteConfig {
            project_id: Some("demo".to_string()),
            database_url: url.map(str::to_string),
            auth_token: Some("secret".to_string()),
            timeout: Duration::from_secs(1),
            ..Default::default()
        }
    }

    #[test]
    fn builds_json_urls_under_the_database() {
        let client = FirebaseClient::new(&config(Some("https://demo.firebaseio.com"))).unwrap();
        assert_eq!(
            client.url(&project_path("abc")),
            "https://demo.firebaseio.com/projects/abc.json"
        );
        assert_eq!(
            client.url(RecordKind::Contact.remote_path()),
            "https://demo.firebaseio.com/portfolio/contactInfo.json"
        );
    }

    #[test]
    fn missing_database_url_is_unconfigured() {
        let result = FirebaseClient::new(&config(None));
        assert!(matches!(result, Err(RemoteError::Unconfigured)));
    }

    #[test]
    fn stamped_bodies_carry_server_timestamps() {
        let body = stamped(&crate::defaults::default_contact(), &["updatedAt"]).unwrap();
        assert_eq!(body["updatedAt"][".sv"], "timestamp");
        assert_eq!(body["whatsappNumber"], "5521999999999");
    }
}
