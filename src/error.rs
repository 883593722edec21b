// Copyright 2026, The simple-operator Authors
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimpleError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to set owner reference: {0}")]
    OwnerReferenceError(String),

    #[error("Object {object} is already controlled by {owner}")]
    AlreadyOwned { object: String, owner: String },

    #[error("Invalid object: {0}")]
    InvalidObject(String),

    #[error("Object {0} has no namespace")]
    MissingNamespace(String),

    #[error("Reconciliation timed out after {0:?}")]
    Timeout(Duration),
}

impl SimpleError {
    /// HTTP status code of the underlying API error, if any
    pub fn api_code(&self) -> Option<u16> {
        match self {
            SimpleError::KubeError(kube::Error::Api(resp)) => Some(resp.code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SimpleError>;
