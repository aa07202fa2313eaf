// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::CustomResourceExt;
use outpost_reconciler::types::{DockerServiceConnection, KubernetesServiceConnection, Outpost};

/// Print the CRDs as a multi-document YAML stream
fn main() -> Result<()> {
    let documents = [
        serde_yaml::to_string(&Outpost::crd())?,
        serde_yaml::to_string(&KubernetesServiceConnection::crd())?,
        serde_yaml::to_string(&DockerServiceConnection::crd())?,
    ];
    for doc in documents {
        println!("---\n{}", doc.trim_end());
    }
    Ok(())
}
