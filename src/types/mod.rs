// Copyright 2026, The simple-operator Authors
// SPDX-License-Identifier: Apache-2.0

//! Custom resource types watched by the operator.

pub mod simple;

pub use simple::{Simple, SimpleSpec};

use kube::CustomResourceExt;

/// Render the CRD manifests for all custom resources as YAML
pub fn generate_crds() -> Result<Vec<String>, serde_yaml::Error> {
    Ok(vec![serde_yaml::to_string(&Simple::crd())?])
}
