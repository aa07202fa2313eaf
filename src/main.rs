// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::Client;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use outpost_reconciler::config::{Config, EnvConfig};
use outpost_reconciler::constants::OPERATOR_NAME;
use outpost_reconciler::kubernetes::{
    combine, interval_ticks, outpost_changes, wait_for_outpost_crds,
};
use outpost_reconciler::metrics;
use outpost_reconciler::reconcilers::EmbeddedOutpostReconciler;
use outpost_reconciler::store::KubeStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting {}", OPERATOR_NAME);

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: namespace={}, interval={:?}, watch={}",
        config.namespace, config.reconcile_interval, config.watch_outposts
    );

    if let Some(addr) = config.metrics_addr {
        metrics::install_exporter(addr)?;
    }

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    if config.wait_for_crds {
        info!("Waiting for Outpost CRDs to become available...");
        wait_for_outpost_crds(&client).await?;
    }

    let store = Arc::new(KubeStore::new(client.clone(), &config.namespace));
    let reconciler = EmbeddedOutpostReconciler::new(store.clone(), store, Arc::new(EnvConfig));

    let mut triggers = Vec::new();
    if let Some(period) = config.reconcile_interval {
        triggers.push(interval_ticks(period));
    }
    if config.watch_outposts {
        triggers.push(outpost_changes(client, &config.namespace));
    }

    reconciler.run(combine(triggers)).await?;

    info!("No reconciliation triggers left, exiting");
    Ok(())
}
