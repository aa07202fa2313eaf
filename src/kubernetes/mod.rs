// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for CRD discovery and reconciliation triggers.

pub mod crd;
pub mod triggers;

pub use crd::wait_for_outpost_crds;
pub use triggers::{combine, interval_ticks, outpost_changes};
