// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::service_connection::ServiceConnectionRef;
use kube::{CustomResource, ResourceExt};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[kube(group = "goauthentik.io", version = "v1", kind = "Outpost")]
#[kube(namespaced)]
#[kube(derive = "PartialEq")]
#[serde(rename_all = "camelCase")]
pub struct OutpostSpec {
    /// Display name
    pub name: String,
    #[serde(rename = "type")]
    pub type_: OutpostType,
    /// Empty when the outpost is not under automatic management
    #[serde(default)]
    pub managed: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_connection: Option<ServiceConnectionRef>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutpostType {
    #[default]
    Proxy,
    Ldap,
    Radius,
    Rac,
}

impl fmt::Display for OutpostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutpostType::Proxy => "proxy",
            OutpostType::Ldap => "ldap",
            OutpostType::Radius => "radius",
            OutpostType::Rac => "rac",
        };
        f.write_str(s)
    }
}

impl Outpost {
    /// Primary key of the record, assigned by the store on creation
    pub fn pk(&self) -> Option<&str> {
        self.metadata.uid.as_deref()
    }

    /// Check if the outpost is owned by some reconciler
    pub fn is_managed(&self) -> bool {
        !self.spec.managed.is_empty()
    }

    /// Check if the outpost carries the given managed identifier
    pub fn is_managed_by(&self, managed: &str) -> bool {
        !managed.is_empty() && self.spec.managed == managed
    }

    /// Object name under which a record keyed by `managed` is created.
    ///
    /// Two callers creating the same managed record collide on this name,
    /// so the API server rejects the second create instead of storing a duplicate.
    pub fn managed_object_name(managed: &str) -> String {
        let mut name = String::with_capacity(managed.len());
        for c in managed.chars() {
            if c.is_ascii_alphanumeric() {
                name.push(c.to_ascii_lowercase());
            } else if !name.is_empty() && !name.ends_with('-') {
                name.push('-');
            }
        }
        name.truncate(253);
        name.trim_end_matches('-').to_string()
    }

    /// Short description used in log output
    pub fn describe(&self) -> String {
        let owner = if self.is_managed() {
            self.spec.managed.as_str()
        } else {
            "unmanaged"
        };
        format!(
            "{} ({}, pk={}, {})",
            self.spec.name,
            self.name_any(),
            self.pk().unwrap_or("-"),
            owner
        )
    }
}
