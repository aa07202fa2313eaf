// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::config::ENV_PREFIX;
use crate::error::ConfigError;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace holding the tenant's outposts and service connections
    pub namespace: String,
    /// Re-run reconciliation on this interval after the startup pass
    pub reconcile_interval: Option<Duration>,
    /// Re-run reconciliation whenever an outpost changes
    pub watch_outposts: bool,
    /// Wait for the custom resource definitions before the first pass
    pub wait_for_crds: bool,
    /// Address for the Prometheus exporter, disabled when unset
    pub metrics_addr: Option<SocketAddr>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let namespace = env::var("OUTPOST_NAMESPACE").unwrap_or_else(|_| "authentik".to_string());

        let reconcile_interval = match env::var("RECONCILE_INTERVAL_SECS") {
            Ok(v) => {
                let secs: u64 = v
                    .parse()
                    .with_context(|| format!("RECONCILE_INTERVAL_SECS is not a number: {}", v))?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        let watch_outposts = env_flag("WATCH_OUTPOSTS", true)?;
        let wait_for_crds = env_flag("WAIT_FOR_CRDS", true)?;

        let metrics_addr = env::var("METRICS_ADDR")
            .ok()
            .map(|v| {
                v.parse()
                    .with_context(|| format!("METRICS_ADDR is not a socket address: {}", v))
            })
            .transpose()?;

        Ok(Config {
            namespace,
            reconcile_interval,
            watch_outposts,
            wait_for_crds,
            metrics_addr,
        })
    }
}

fn env_flag(var: &str, default: bool) -> Result<bool> {
    match env::var(var) {
        Ok(v) => Ok(parse_bool(var, &v)?),
        Err(_) => Ok(default),
    }
}

/// Source of feature flags consumed by the reconciler
pub trait ConfigProvider: Send + Sync {
    /// Read a boolean option, falling back to `default` when it is not set
    fn get_bool(&self, key: &str, default: bool) -> std::result::Result<bool, ConfigError>;
}

/// Reads options from `AUTHENTIK_`-prefixed environment variables.
///
/// Dotted keys map to double underscores: `outposts.disable_embedded_outpost`
/// is read from `AUTHENTIK_OUTPOSTS__DISABLE_EMBEDDED_OUTPOST`.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig;

impl EnvConfig {
    pub fn env_var_name(key: &str) -> String {
        format!("{}_{}", ENV_PREFIX, key.replace('.', "__").to_uppercase())
    }
}

impl ConfigProvider for EnvConfig {
    fn get_bool(&self, key: &str, default: bool) -> std::result::Result<bool, ConfigError> {
        match env::var(Self::env_var_name(key)) {
            Ok(v) if v.trim().is_empty() => Ok(default),
            Ok(v) => parse_bool(key, &v),
            Err(env::VarError::NotPresent) => Ok(default),
            Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: "value is not valid unicode".to_string(),
            }),
        }
    }
}

/// Fixed set of options, for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    values: HashMap<String, bool>,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bool(mut self, key: &str, value: bool) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }
}

impl ConfigProvider for StaticConfig {
    fn get_bool(&self, key: &str, default: bool) -> std::result::Result<bool, ConfigError> {
        Ok(self.values.get(key).copied().unwrap_or(default))
    }
}

pub fn parse_bool(key: &str, value: &str) -> std::result::Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
