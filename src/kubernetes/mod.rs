// Copyright 2026, The simple-operator Authors
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for CRD discovery, owner references, and create-or-update.

pub mod apply;
pub mod crd;
pub mod owner;

pub use apply::{create_or_update, OperationResult};
pub use crd::wait_for_simple_crd;
pub use owner::{controller_of, set_controller_reference};
