// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Streams that trigger reconciliation passes after startup.

use crate::types::Outpost;
use futures::future::ready;
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use kube::{Api, Client};
use kube_runtime::watcher::{self, Event};
use std::time::Duration;
use tokio::time::{interval_at, Instant};
use tracing::{debug, warn};

/// Yields once per changed or deleted outpost in the namespace
pub fn outpost_changes(client: Client, namespace: &str) -> BoxStream<'static, ()> {
    let outposts: Api<Outpost> = Api::namespaced(client, namespace);

    watcher::watcher(outposts, watcher::Config::default())
        .filter_map(|event| {
            ready(match event {
                Ok(Event::Apply(o)) | Ok(Event::Delete(o)) => {
                    debug!("Outpost {} changed", o.describe());
                    Some(())
                }
                Ok(_) => None,
                Err(e) => {
                    warn!("Outpost watch error: {}", e);
                    None
                }
            })
        })
        .boxed()
}

/// Yields every `period`, starting one period from now
pub fn interval_ticks(period: Duration) -> BoxStream<'static, ()> {
    let ticker = interval_at(Instant::now() + period, period);
    stream::unfold(ticker, |mut ticker| async move {
        ticker.tick().await;
        Some(((), ticker))
    })
    .boxed()
}

/// Combine the configured triggers; ends immediately when none are configured
pub fn combine(triggers: Vec<BoxStream<'static, ()>>) -> BoxStream<'static, ()> {
    stream::select_all(triggers).boxed()
}
