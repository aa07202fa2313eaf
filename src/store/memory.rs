// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! In-process store keeping records in insertion order.

use crate::error::StoreError;
use crate::store::{ConnectionCatalog, OutpostDefaults, OutpostFilter, OutpostStore};
use crate::types::{Outpost, OutpostSpec, ServiceConnectionKind, ServiceConnectionRef};
use async_trait::async_trait;
use kube::api::ObjectMeta;
use kube::ResourceExt;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

#[derive(Default)]
struct Records {
    outposts: Vec<Outpost>,
    connections: Vec<ServiceConnectionRef>,
    generation: u64,
}

impl Records {
    fn next_version(&mut self) -> String {
        self.generation += 1;
        self.generation.to_string()
    }
}

/// Store backed by process memory.
///
/// All operations take one lock, so `upsert` is atomic across tasks sharing the store.
pub struct MemoryStore {
    namespace: String,
    records: Mutex<Records>,
}

impl MemoryStore {
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            records: Mutex::new(Records::default()),
        }
    }

    /// Insert an outpost under the given object name, assigning it a fresh primary key
    pub async fn insert_outpost(&self, name: &str, spec: OutpostSpec) -> Result<Outpost, StoreError> {
        let mut records = self.records.lock().await;
        if records.outposts.iter().any(|o| o.name_any() == name) {
            return Err(StoreError::Conflict(format!("outpost {} already exists", name)));
        }
        let outpost = self.build(&mut records, name, spec);
        records.outposts.push(outpost.clone());
        Ok(outpost)
    }

    /// Register a service connection; later connections sort after earlier ones
    pub async fn add_connection(&self, kind: ServiceConnectionKind, name: &str) {
        self.records.lock().await.connections.push(ServiceConnectionRef {
            kind,
            name: name.to_string(),
        });
    }

    /// Snapshot of all outposts
    pub async fn outposts(&self) -> Vec<Outpost> {
        self.records.lock().await.outposts.clone()
    }

    /// Outpost with the given primary key
    pub async fn get(&self, pk: &str) -> Option<Outpost> {
        self.records
            .lock()
            .await
            .outposts
            .iter()
            .find(|o| o.pk() == Some(pk))
            .cloned()
    }

    fn build(&self, records: &mut Records, name: &str, spec: OutpostSpec) -> Outpost {
        Outpost {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(self.namespace.clone()),
                uid: Some(Uuid::new_v4().to_string()),
                resource_version: Some(records.next_version()),
                ..Default::default()
            },
            spec,
        }
    }
}

#[async_trait]
impl OutpostStore for MemoryStore {
    async fn find_one(&self, filter: &OutpostFilter) -> Result<Option<Outpost>, StoreError> {
        let records = self.records.lock().await;
        Ok(records.outposts.iter().find(|o| filter.matches(o)).cloned())
    }

    async fn upsert(
        &self,
        managed: &str,
        defaults: &OutpostDefaults,
    ) -> Result<(Outpost, bool), StoreError> {
        let mut records = self.records.lock().await;

        if let Some(idx) = records.outposts.iter().position(|o| o.is_managed_by(managed)) {
            let changed = defaults.apply(&mut records.outposts[idx].spec);
            if changed {
                let version = records.next_version();
                records.outposts[idx].metadata.resource_version = Some(version);
            }
            return Ok((records.outposts[idx].clone(), false));
        }

        let name = Outpost::managed_object_name(managed);
        if records.outposts.iter().any(|o| o.name_any() == name) {
            return Err(StoreError::Conflict(format!(
                "outpost {} exists but is not managed by {}",
                name, managed
            )));
        }

        let outpost = self.build(&mut records, &name, defaults.to_spec(managed));
        debug!("Created outpost {}", outpost.describe());
        records.outposts.push(outpost.clone());
        Ok((outpost, true))
    }

    async fn save(&self, outpost: &Outpost) -> Result<(), StoreError> {
        let pk = outpost
            .pk()
            .ok_or_else(|| StoreError::MissingField("metadata.uid".to_string()))?;

        let mut records = self.records.lock().await;
        let version = records.next_version();
        let stored = records
            .outposts
            .iter_mut()
            .find(|o| o.pk() == Some(pk))
            .ok_or_else(|| StoreError::Conflict(format!("outpost {} no longer exists", pk)))?;

        stored.spec = outpost.spec.clone();
        stored.metadata.resource_version = Some(version);
        Ok(())
    }

    async fn delete_all(&self, filter: &OutpostFilter) -> Result<usize, StoreError> {
        let mut records = self.records.lock().await;
        let before = records.outposts.len();
        records.outposts.retain(|o| !filter.matches(o));
        Ok(before - records.outposts.len())
    }
}

#[async_trait]
impl ConnectionCatalog for MemoryStore {
    async fn first_of(
        &self,
        kind: ServiceConnectionKind,
    ) -> Result<Option<ServiceConnectionRef>, StoreError> {
        let records = self.records.lock().await;
        Ok(records.connections.iter().find(|c| c.kind == kind).cloned())
    }
}
