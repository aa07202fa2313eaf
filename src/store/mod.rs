// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Persistence interfaces for outposts and service connections.

pub mod kube_store;
pub mod memory;

pub use kube_store::KubeStore;
pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::types::{Outpost, OutpostSpec, OutpostType, ServiceConnectionKind, ServiceConnectionRef};
use async_trait::async_trait;

/// Field-equality filter over outposts; unset fields match anything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutpostFilter {
    pub name: Option<String>,
    pub managed: Option<String>,
}

impl OutpostFilter {
    /// Outposts carrying the given managed identifier
    pub fn managed(managed: &str) -> Self {
        Self {
            name: None,
            managed: Some(managed.to_string()),
        }
    }

    /// Unmanaged outposts with the given display name
    pub fn unmanaged_named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            managed: Some(String::new()),
        }
    }

    pub fn matches(&self, outpost: &Outpost) -> bool {
        self.name.as_ref().map_or(true, |n| *n == outpost.spec.name)
            && self.managed.as_ref().map_or(true, |m| *m == outpost.spec.managed)
    }
}

/// Fields written onto a managed outpost by `OutpostStore::upsert`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutpostDefaults {
    pub name: String,
    pub type_: OutpostType,
}

impl OutpostDefaults {
    /// Build the spec of a freshly created record
    pub fn to_spec(&self, managed: &str) -> OutpostSpec {
        OutpostSpec {
            name: self.name.clone(),
            type_: self.type_,
            managed: managed.to_string(),
            service_connection: None,
        }
    }

    /// Overwrite the defaulted fields, returning whether anything changed
    pub fn apply(&self, spec: &mut OutpostSpec) -> bool {
        let changed = spec.name != self.name || spec.type_ != self.type_;
        spec.name.clone_from(&self.name);
        spec.type_ = self.type_;
        changed
    }
}

/// Storage for outpost records.
///
/// `upsert` must be atomic with respect to other callers using the same
/// managed identifier: concurrent calls converge on one record and exactly
/// one of them observes `created == true`.
#[async_trait]
pub trait OutpostStore: Send + Sync {
    /// First outpost matching the filter, in the store's natural order
    async fn find_one(&self, filter: &OutpostFilter) -> Result<Option<Outpost>, StoreError>;

    /// Create the record keyed by `managed`, or match the existing one and
    /// update its defaulted fields. Returns the record and whether it was created.
    async fn upsert(
        &self,
        managed: &str,
        defaults: &OutpostDefaults,
    ) -> Result<(Outpost, bool), StoreError>;

    /// Persist the spec of an existing record
    async fn save(&self, outpost: &Outpost) -> Result<(), StoreError>;

    /// Delete every outpost matching the filter, returning how many were removed
    async fn delete_all(&self, filter: &OutpostFilter) -> Result<usize, StoreError>;
}

/// Read access to the service connections an outpost may be deployed through
#[async_trait]
pub trait ConnectionCatalog: Send + Sync {
    /// First connection of the given variant, in the store's natural order
    async fn first_of(
        &self,
        kind: ServiceConnectionKind,
    ) -> Result<Option<ServiceConnectionRef>, StoreError>;

    async fn exists_any(&self, kind: ServiceConnectionKind) -> Result<bool, StoreError> {
        Ok(self.first_of(kind).await?.is_some())
    }
}
