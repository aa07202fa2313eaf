// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Embedded outpost reconciler - keeps the managed embedded outpost in line with
//! the `outposts.disable_embedded_outpost` flag.

use crate::config::ConfigProvider;
use crate::constants::config::DISABLE_EMBEDDED_OUTPOST;
use crate::constants::{MANAGED_OUTPOST, MANAGED_OUTPOST_NAME};
use crate::error::{Result, StoreError};
use crate::store::{ConnectionCatalog, OutpostDefaults, OutpostFilter, OutpostStore};
use crate::types::{OutpostType, ServiceConnectionKind, ServiceConnectionRef};
use anyhow::Context;
use futures::{Stream, StreamExt};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// What a single reconciliation pass did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// An unmanaged outpost with the embedded name was tagged as managed
    Migrated { pk: String },
    /// The managed outpost was created, with the connection picked for it
    Created {
        pk: String,
        service_connection: Option<ServiceConnectionRef>,
    },
    /// The managed outpost already existed
    Unchanged { pk: String },
    /// The flag is disabled and this many managed outposts were removed
    Deleted { count: usize },
}

pub struct EmbeddedOutpostReconciler {
    store: Arc<dyn OutpostStore>,
    catalog: Arc<dyn ConnectionCatalog>,
    config: Arc<dyn ConfigProvider>,
}

impl EmbeddedOutpostReconciler {
    pub fn new(
        store: Arc<dyn OutpostStore>,
        catalog: Arc<dyn ConnectionCatalog>,
        config: Arc<dyn ConfigProvider>,
    ) -> Self {
        Self {
            store,
            catalog,
            config,
        }
    }

    /// Run one reconciliation pass.
    ///
    /// Performs at most one of migrate, create or delete. Store errors are
    /// returned as-is; steps completed before the failure are not rolled back.
    #[instrument(skip(self))]
    pub async fn reconcile(&self) -> Result<ReconcileOutcome> {
        if self.config.get_bool(DISABLE_EMBEDDED_OUTPOST, false)? {
            let count = self
                .store
                .delete_all(&OutpostFilter::managed(MANAGED_OUTPOST))
                .await?;
            if count > 0 {
                info!("Embedded outpost disabled, removed {} managed outpost(s)", count);
            } else {
                debug!("Embedded outpost disabled, nothing to remove");
            }
            return Ok(ReconcileOutcome::Deleted { count });
        }

        if let Some(mut legacy) = self
            .store
            .find_one(&OutpostFilter::unmanaged_named(MANAGED_OUTPOST_NAME))
            .await?
        {
            legacy.spec.managed = MANAGED_OUTPOST.to_string();
            self.store.save(&legacy).await?;
            info!("Migrated legacy outpost {} to managed", legacy.describe());
            return Ok(ReconcileOutcome::Migrated {
                pk: legacy.pk().unwrap_or_default().to_string(),
            });
        }

        let defaults = OutpostDefaults {
            name: MANAGED_OUTPOST_NAME.to_string(),
            type_: OutpostType::Proxy,
        };
        let (mut outpost, created) = self.store.upsert(MANAGED_OUTPOST, &defaults).await?;
        let pk = outpost.pk().unwrap_or_default().to_string();

        // Only a fresh record gets a default connection; existing ones keep whatever was configured
        if !created {
            debug!("Embedded outpost {} already exists", outpost.describe());
            return Ok(ReconcileOutcome::Unchanged { pk });
        }

        let service_connection = self.default_connection().await?;
        if let Some(connection) = &service_connection {
            outpost.spec.service_connection = Some(connection.clone());
            self.store.save(&outpost).await?;
        }

        info!(
            "Created embedded outpost {} with service connection {}",
            outpost.describe(),
            service_connection
                .as_ref()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "none".to_string())
        );
        Ok(ReconcileOutcome::Created {
            pk,
            service_connection,
        })
    }

    /// First connection of the most preferred variant that has any
    async fn default_connection(&self) -> std::result::Result<Option<ServiceConnectionRef>, StoreError> {
        for kind in ServiceConnectionKind::PREFERENCE {
            if self.catalog.exists_any(kind).await? {
                return self.catalog.first_of(kind).await;
            }
        }
        Ok(None)
    }

    /// Reconcile once, then again on every trigger until the stream ends.
    ///
    /// A failing first pass is returned so startup aborts; later failures are
    /// logged and left for the next trigger.
    pub async fn run<S>(self, mut triggers: S) -> anyhow::Result<()>
    where
        S: Stream<Item = ()> + Unpin,
    {
        let outcome = self
            .reconcile()
            .await
            .context("Initial embedded outpost reconciliation failed")?;
        info!("Initial reconciliation complete: {:?}", outcome);

        while triggers.next().await.is_some() {
            match self.reconcile().await {
                Ok(outcome) => debug!("Reconciled embedded outpost: {:?}", outcome),
                Err(e) => error!("Reconciliation error: {}", e),
            }
        }

        Ok(())
    }
}
