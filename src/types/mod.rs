// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Custom resources managed or read by the reconciler.

pub mod outpost;
pub mod service_connection;

pub use outpost::{Outpost, OutpostSpec, OutpostType};
pub use service_connection::{
    DockerServiceConnection, DockerServiceConnectionSpec, KubernetesServiceConnection,
    KubernetesServiceConnectionSpec, ServiceConnectionKind, ServiceConnectionRef,
};
