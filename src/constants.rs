// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Managed identifier carried by the embedded outpost record
pub const MANAGED_OUTPOST: &str = "goauthentik.io/outposts/embedded";

/// Display name of the embedded outpost
pub const MANAGED_OUTPOST_NAME: &str = "authentik Embedded Outpost";

/// The operator name used as field manager and in log output
pub const OPERATOR_NAME: &str = "outpost-reconciler";

/// Custom resource API group and version for outposts and service connections
pub mod api {
    pub const GROUP: &str = "goauthentik.io";
    pub const VERSION: &str = "v1";
}

/// Configuration keys read through a `ConfigProvider`
pub mod config {
    /// When true, the embedded outpost is removed instead of ensured
    pub const DISABLE_EMBEDDED_OUTPOST: &str = "outposts.disable_embedded_outpost";
    /// Prefix for environment variables backing configuration keys
    pub const ENV_PREFIX: &str = "AUTHENTIK";
}

/// CRD polling configuration
pub mod crd {
    /// Initial polling interval in seconds when waiting for CRD
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 60;
}

/// Prometheus metric names
pub mod metrics {
    pub const OUTPOSTS_CONNECTED: &str = "authentik_outposts_connected";
    pub const OUTPOSTS_LAST_UPDATE: &str = "authentik_outposts_last_update";
}
