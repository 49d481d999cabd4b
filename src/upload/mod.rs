//! # Network Publishing
//!
//! The contract between the pipeline and a network-visualization service.
//! [`publish`] replaces a network of the same name or creates a new one.
//!
//! ## Implementations
//!
//! | Service | Module | Description |
//! |---------|--------|-------------|
//! | `MemoryService` | `memory` | In-memory, for tests and dry runs |
//! | `PolinodeClient` | `polinode` | Polinode REST API over HTTPS |

pub mod memory;
#[cfg(feature = "upload")]
pub mod polinode;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::export::NetworkDocument;
use crate::Result;

pub use memory::MemoryService;
#[cfg(feature = "upload")]
pub use polinode::{Credentials, PolinodeClient};

/// A network as the service lists it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NetworkSummary {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Everything needed to create or replace one network.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishRequest {
    pub name: String,
    pub description: String,
    /// Only honoured on creation; updates keep the stored setting.
    pub directed: bool,
    pub document: NetworkDocument,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Created(NetworkSummary),
    Updated(NetworkSummary),
}

impl PublishOutcome {
    pub fn summary(&self) -> &NetworkSummary {
        match self {
            PublishOutcome::Created(s) | PublishOutcome::Updated(s) => s,
        }
    }
}

/// A remote store of named networks.
///
/// Every failure surfaces as [`crate::Error::UploadConflict`]; there are no
/// retries at this layer.
#[async_trait]
pub trait NetworkService: Send + Sync {
    async fn list_networks(&self) -> Result<Vec<NetworkSummary>>;

    /// Create a private network from `request`.
    async fn create_network(&self, request: &PublishRequest) -> Result<NetworkSummary>;

    /// Replace the name, description and body of network `id`.
    async fn update_network(&self, id: &str, request: &PublishRequest) -> Result<NetworkSummary>;
}

/// Update the network named `request.name` in place, or create it.
///
/// When several networks share the name, the last one listed is updated.
pub async fn publish<S: NetworkService + ?Sized>(
    service: &S,
    request: &PublishRequest,
) -> Result<PublishOutcome> {
    let networks = service.list_networks().await?;
    info!(count = networks.len(), "networks found on service");

    let named: Vec<&NetworkSummary> = networks.iter().filter(|n| n.name == request.name).collect();
    if named.len() > 1 {
        warn!(name = %request.name, count = named.len(), "several networks share this name");
    }
    if let Some(existing) = named.last() {
        let summary = service.update_network(&existing.id, request).await?;
        info!(name = %request.name, id = %existing.id, "network updated");
        Ok(PublishOutcome::Updated(summary))
    } else {
        let summary = service.create_network(request).await?;
        info!(name = %request.name, id = %summary.id, "network created");
        Ok(PublishOutcome::Created(summary))
    }
}
