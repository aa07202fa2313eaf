// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

/// Failures raised by the persistence layer backing outposts and service connections
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Serialization failed: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Conflicting write: {0}")]
    Conflict(String),

    #[error("Record is missing field: {0}")]
    MissingField(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Failures reading a configuration value
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid boolean for {key}: {value:?}")]
    InvalidBool { key: String, value: String },

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
