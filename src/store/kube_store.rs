// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Store backed by custom resources in one namespace of the cluster.

use crate::error::StoreError;
use crate::store::{ConnectionCatalog, OutpostDefaults, OutpostFilter, OutpostStore};
use crate::types::{
    DockerServiceConnection, KubernetesServiceConnection, Outpost, ServiceConnectionKind,
    ServiceConnectionRef,
};
use async_trait::async_trait;
use futures::future::try_join_all;
use k8s_openapi::NamespaceResourceScope;
use kube::{
    api::{DeleteParams, ListParams, PostParams},
    Api, Client, Resource, ResourceExt,
};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use tracing::{debug, info, instrument};

pub struct KubeStore {
    client: Client,
    namespace: String,
}

impl KubeStore {
    pub fn new(client: Client, namespace: &str) -> Self {
        Self {
            client,
            namespace: namespace.to_string(),
        }
    }

    fn outposts(&self) -> Api<Outpost> {
        Api::namespaced(self.client.clone(), &self.namespace)
    }

    async fn list_outposts(&self) -> Result<Vec<Outpost>, StoreError> {
        Ok(self.outposts().list(&ListParams::default()).await?.items)
    }

    /// Write the defaulted fields onto a matched record if they drifted
    async fn apply_defaults(
        &self,
        mut outpost: Outpost,
        defaults: &OutpostDefaults,
    ) -> Result<Outpost, StoreError> {
        if !defaults.apply(&mut outpost.spec) {
            return Ok(outpost);
        }
        info!("Restoring defaults on outpost {}", outpost.describe());
        Ok(self
            .outposts()
            .replace(&outpost.name_any(), &PostParams::default(), &outpost)
            .await?)
    }

    async fn first_name<K>(&self) -> Result<Option<String>, StoreError>
    where
        K: Resource<Scope = NamespaceResourceScope> + Clone + DeserializeOwned + Debug,
        <K as Resource>::DynamicType: Default,
    {
        let api: Api<K> = Api::namespaced(self.client.clone(), &self.namespace);
        let list = api.list(&ListParams::default().limit(1)).await?;
        Ok(list.items.first().map(|c| c.name_any()))
    }
}

#[async_trait]
impl OutpostStore for KubeStore {
    #[instrument(skip(self), fields(namespace = %self.namespace))]
    async fn find_one(&self, filter: &OutpostFilter) -> Result<Option<Outpost>, StoreError> {
        Ok(self
            .list_outposts()
            .await?
            .into_iter()
            .find(|o| filter.matches(o)))
    }

    #[instrument(skip(self, defaults), fields(namespace = %self.namespace))]
    async fn upsert(
        &self,
        managed: &str,
        defaults: &OutpostDefaults,
    ) -> Result<(Outpost, bool), StoreError> {
        // A record promoted from an unmanaged one keeps its original object name
        if let Some(existing) = self
            .list_outposts()
            .await?
            .into_iter()
            .find(|o| o.is_managed_by(managed))
        {
            return Ok((self.apply_defaults(existing, defaults).await?, false));
        }

        let name = Outpost::managed_object_name(managed);
        let outpost = Outpost::new(&name, defaults.to_spec(managed));

        match self.outposts().create(&PostParams::default(), &outpost).await {
            Ok(created) => {
                info!("Created outpost {}", created.describe());
                Ok((created, true))
            }
            Err(kube::Error::Api(err)) if err.code == 409 => {
                debug!("Outpost {} created concurrently, matching it", name);
                let existing = self.outposts().get(&name).await?;
                if !existing.is_managed_by(managed) {
                    return Err(StoreError::Conflict(format!(
                        "outpost {} exists but is not managed by {}",
                        name, managed
                    )));
                }
                Ok((self.apply_defaults(existing, defaults).await?, false))
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, outpost), fields(outpost = %outpost.name_any()))]
    async fn save(&self, outpost: &Outpost) -> Result<(), StoreError> {
        self.outposts()
            .replace(&outpost.name_any(), &PostParams::default(), outpost)
            .await?;
        Ok(())
    }

    #[instrument(skip(self), fields(namespace = %self.namespace))]
    async fn delete_all(&self, filter: &OutpostFilter) -> Result<usize, StoreError> {
        let api = self.outposts();
        let names: Vec<String> = self
            .list_outposts()
            .await?
            .into_iter()
            .filter(|o| filter.matches(o))
            .map(|o| o.name_any())
            .collect();

        let deleted = try_join_all(names.iter().map(|name| {
            let api = api.clone();
            async move {
                match api.delete(name, &DeleteParams::default()).await {
                    Ok(_) => {
                        info!("Deleted outpost {}", name);
                        Ok(true)
                    }
                    Err(kube::Error::Api(err)) if err.code == 404 => {
                        debug!("Outpost {} already deleted", name);
                        Ok(false)
                    }
                    Err(e) => Err(StoreError::from(e)),
                }
            }
        }))
        .await?;

        Ok(deleted.into_iter().filter(|d| *d).count())
    }
}

#[async_trait]
impl ConnectionCatalog for KubeStore {
    #[instrument(skip(self), fields(namespace = %self.namespace))]
    async fn first_of(
        &self,
        kind: ServiceConnectionKind,
    ) -> Result<Option<ServiceConnectionRef>, StoreError> {
        let name = match kind {
            ServiceConnectionKind::Kubernetes => self.first_name::<KubernetesServiceConnection>().await?,
            ServiceConnectionKind::Docker => self.first_name::<DockerServiceConnection>().await?,
        };
        Ok(name.map(|name| ServiceConnectionRef { kind, name }))
    }
}
