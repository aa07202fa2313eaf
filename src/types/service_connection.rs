// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[kube(
    group = "goauthentik.io",
    version = "v1",
    kind = "KubernetesServiceConnection"
)]
#[kube(namespaced)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesServiceConnectionSpec {
    /// Use the cluster the operator runs in
    #[serde(default)]
    pub local: bool,
    /// Secret holding the kubeconfig for a remote cluster
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubeconfig_secret: Option<String>,
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,
}

fn default_verify_ssl() -> bool {
    true
}

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[kube(group = "goauthentik.io", version = "v1", kind = "DockerServiceConnection")]
#[kube(namespaced)]
#[serde(rename_all = "camelCase")]
pub struct DockerServiceConnectionSpec {
    #[serde(default)]
    pub local: bool,
    /// Docker endpoint, e.g. unix:///var/run/docker.sock
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_verification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_authentication: Option<String>,
}

/// Service connection variants, each stored as its own resource kind
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ServiceConnectionKind {
    Kubernetes,
    Docker,
}

impl ServiceConnectionKind {
    /// Order in which variants are tried when picking a default connection
    pub const PREFERENCE: [ServiceConnectionKind; 2] =
        [ServiceConnectionKind::Kubernetes, ServiceConnectionKind::Docker];
}

impl fmt::Display for ServiceConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceConnectionKind::Kubernetes => f.write_str("kubernetes"),
            ServiceConnectionKind::Docker => f.write_str("docker"),
        }
    }
}

/// Non-owning reference from an outpost to a service connection
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, schemars::JsonSchema)]
pub struct ServiceConnectionRef {
    pub kind: ServiceConnectionKind,
    pub name: String,
}

impl fmt::Display for ServiceConnectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}
