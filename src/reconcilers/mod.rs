// Copyright 2026, The simple-operator Authors
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes reconcilers that react to watch events.

pub mod simple;

pub use simple::SimpleReconciler;
