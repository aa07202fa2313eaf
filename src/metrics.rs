// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Outpost gauges.
//!
//! Public surface for callers that track outpost connections: build an
//! `OutpostMetrics` over a `PrometheusSink` once `install_exporter` has run.
//! The reconciler itself neither writes nor reads these gauges; the binary
//! only installs the exporter and registers their help text.

use crate::constants::metrics::{OUTPOSTS_CONNECTED, OUTPOSTS_LAST_UPDATE};
use metrics::{describe_gauge, gauge, Label};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Destination for labelled gauge values
pub trait GaugeSink: Send + Sync {
    fn set_gauge(&self, name: &'static str, labels: &[(&'static str, String)], value: f64);
}

/// Forwards gauges to the global `metrics` recorder
#[derive(Debug, Clone, Default)]
pub struct PrometheusSink;

impl GaugeSink for PrometheusSink {
    fn set_gauge(&self, name: &'static str, labels: &[(&'static str, String)], value: f64) {
        let labels: Vec<Label> = labels
            .iter()
            .map(|(k, v)| Label::new(*k, v.clone()))
            .collect();
        gauge!(name, labels).set(value);
    }
}

/// Register help text for the outpost gauges with the global recorder
pub fn describe() {
    describe_gauge!(OUTPOSTS_CONNECTED, "Currently connected outposts");
    describe_gauge!(OUTPOSTS_LAST_UPDATE, "Last update from any outpost");
}

/// Install the Prometheus recorder and serve it on `addr`
pub fn install_exporter(addr: SocketAddr) -> anyhow::Result<()> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    describe();
    info!("Serving metrics on {}", addr);
    Ok(())
}

/// Typed writers for the outpost gauges
#[derive(Clone)]
pub struct OutpostMetrics {
    sink: Arc<dyn GaugeSink>,
}

impl OutpostMetrics {
    pub fn new(sink: Arc<dyn GaugeSink>) -> Self {
        Self { sink }
    }

    /// Number of connected instances of an outpost, alongside how many are expected
    pub fn set_connected(&self, tenant: &str, outpost: &str, uid: &str, expected: u32, value: f64) {
        self.sink.set_gauge(
            OUTPOSTS_CONNECTED,
            &[
                ("tenant", tenant.to_string()),
                ("outpost", outpost.to_string()),
                ("uid", uid.to_string()),
                ("expected", expected.to_string()),
            ],
            value,
        );
    }

    /// Unix timestamp of the last update received from an outpost instance
    pub fn set_last_update(&self, tenant: &str, outpost: &str, uid: &str, version: &str, timestamp: f64) {
        self.sink.set_gauge(
            OUTPOSTS_LAST_UPDATE,
            &[
                ("tenant", tenant.to_string()),
                ("outpost", outpost.to_string()),
                ("uid", uid.to_string()),
                ("version", version.to_string()),
            ],
            timestamp,
        );
    }
}
