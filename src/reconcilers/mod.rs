// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Reconcilers that converge stored resources on configured state.

pub mod embedded_outpost;

pub use embedded_outpost::{EmbeddedOutpostReconciler, ReconcileOutcome};
