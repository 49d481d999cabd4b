//! Polinode REST client (reqwest, HTTP basic auth).
//!
//! ```text
//! GET  {base}/networks          → [{_id, name, ...}]
//! POST {base}/networks          ← {name, networkJSON, status, fileType, originalFileType, isDirected, description}
//! PUT  {base}/networks/{id}     ← {name, description, networkJSON}
//! ```

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use tracing::debug;

use super::{NetworkService, NetworkSummary, PublishRequest};
use crate::export::NetworkDocument;
use crate::{Error, Result};

pub const USERNAME_VAR: &str = "POLINODE_USERNAME";
pub const PASSWORD_VAR: &str = "POLINODE_PASSWORD";

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }

    /// Read `POLINODE_USERNAME` and `POLINODE_PASSWORD`.
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| {
            std::env::var(name)
                .ok()
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::InvalidConfig(format!("{name} is not set")))
        };
        Ok(Self::new(var(USERNAME_VAR)?, var(PASSWORD_VAR)?))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateBody<'a> {
    name: &'a str,
    #[serde(rename = "networkJSON")]
    network_json: &'a NetworkDocument,
    status: &'static str,
    file_type: &'static str,
    original_file_type: &'static str,
    is_directed: bool,
    description: &'a str,
}

#[derive(Serialize)]
struct UpdateBody<'a> {
    name: &'a str,
    description: &'a str,
    #[serde(rename = "networkJSON")]
    network_json: &'a NetworkDocument,
}

pub struct PolinodeClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl PolinodeClient {
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| Error::UploadConflict(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url, credentials })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn networks_url(&self) -> String {
        format!("{}/networks", self.base_url)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.basic_auth(&self.credentials.username, Some(&self.credentials.password))
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let resp = self.authed(builder)
            .send()
            .await
            .map_err(|e| Error::UploadConflict(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::UploadConflict(format!("Polinode returned {status}: {body}")));
        }
        Ok(resp)
    }

    async fn summary(resp: Response, fallback_id: &str, fallback_name: &str) -> Result<NetworkSummary> {
        let mut summary: NetworkSummary = resp.json()
            .await
            .map_err(|e| Error::UploadConflict(format!("unreadable Polinode response: {e}")))?;
        if summary.id.is_empty() {
            summary.id = fallback_id.to_string();
        }
        if summary.name.is_empty() {
            summary.name = fallback_name.to_string();
        }
        Ok(summary)
    }
}

#[async_trait]
impl NetworkService for PolinodeClient {
    async fn list_networks(&self) -> Result<Vec<NetworkSummary>> {
        let resp = self.send(self.client.get(self.networks_url())).await?;
        let networks: Vec<NetworkSummary> = resp.json()
            .await
            .map_err(|e| Error::UploadConflict(format!("unreadable network list: {e}")))?;
        debug!(count = networks.len(), "listed Polinode networks");
        Ok(networks)
    }

    async fn create_network(&self, request: &PublishRequest) -> Result<NetworkSummary> {
        let body = CreateBody {
            name: &request.name,
            network_json: &request.document,
            status: "Private",
            file_type: "JSON",
            original_file_type: "JSON",
            is_directed: request.directed,
            description: &request.description,
        };
        let resp = self.send(self.client.post(self.networks_url()).json(&body)).await?;
        Self::summary(resp, "", &request.name).await
    }

    async fn update_network(&self, id: &str, request: &PublishRequest) -> Result<NetworkSummary> {
        let body = UpdateBody {
            name: &request.name,
            description: &request.description,
            network_json: &request.document,
        };
        let url = format!("{}/{id}", self.networks_url());
        let resp = self.send(self.client.put(url).json(&body)).await?;
        Self::summary(resp, id, &request.name).await
    }
}
