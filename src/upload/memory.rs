//! In-memory network service.
//!
//! This is the reference implementation of `NetworkService`. Networks live
//! in a `Vec` behind an `RwLock`; ids are sequential.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{NetworkService, NetworkSummary, PublishRequest};
use crate::export::NetworkDocument;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct StoredNetwork {
    pub summary: NetworkSummary,
    pub description: String,
    pub directed: bool,
    pub document: NetworkDocument,
}

#[derive(Debug, Default)]
pub struct MemoryService {
    networks: RwLock<Vec<StoredNetwork>>,
    next_id: AtomicU64,
    failure: Option<String>,
}

impl MemoryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A service whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self { failure: Some(message.into()), ..Self::default() }
    }

    pub fn networks(&self) -> Vec<StoredNetwork> {
        self.networks.read().clone()
    }

    pub fn get(&self, id: &str) -> Option<StoredNetwork> {
        self.networks.read().iter().find(|n| n.summary.id == id).cloned()
    }

    fn check(&self) -> Result<()> {
        match &self.failure {
            Some(message) => Err(Error::UploadConflict(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl NetworkService for MemoryService {
    async fn list_networks(&self) -> Result<Vec<NetworkSummary>> {
        self.check()?;
        Ok(self.networks.read().iter().map(|n| n.summary.clone()).collect())
    }

    async fn create_network(&self, request: &PublishRequest) -> Result<NetworkSummary> {
        self.check()?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let summary = NetworkSummary { id: format!("net-{id}"), name: request.name.clone() };
        self.networks.write().push(StoredNetwork {
            summary: summary.clone(),
            description: request.description.clone(),
            directed: request.directed,
            document: request.document.clone(),
        });
        Ok(summary)
    }

    async fn update_network(&self, id: &str, request: &PublishRequest) -> Result<NetworkSummary> {
        self.check()?;
        let mut networks = self.networks.write();
        let stored = networks.iter_mut()
            .find(|n| n.summary.id == id)
            .ok_or_else(|| Error::UploadConflict(format!("404 network {id} not found")))?;
        stored.summary.name = request.name.clone();
        stored.description = request.description.clone();
        stored.document = request.document.clone();
        Ok(stored.summary.clone())
    }
}
