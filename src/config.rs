// Copyright 2026, The simple-operator Authors
// SPDX-License-Identifier: Apache-2.0
use crate::constants::defaults;
use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Namespace to watch; `None` watches all namespaces
    pub watch_namespace: Option<String>,
    /// Delay before a failed reconciliation is retried
    pub error_requeue: Duration,
    /// Deadline for a single reconciliation
    pub reconcile_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            watch_namespace: None,
            error_requeue: Duration::from_secs(defaults::ERROR_REQUEUE_SECS),
            reconcile_timeout: Duration::from_secs(defaults::RECONCILE_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let watch_namespace = lookup("WATCH_NAMESPACE").filter(|ns| !ns.trim().is_empty());

        let error_requeue = secs_var(&lookup, "ERROR_REQUEUE_SECS", defaults::ERROR_REQUEUE_SECS)?;
        let reconcile_timeout = secs_var(
            &lookup,
            "RECONCILE_TIMEOUT_SECS",
            defaults::RECONCILE_TIMEOUT_SECS,
        )?;

        Ok(Config {
            watch_namespace,
            error_requeue,
            reconcile_timeout,
        })
    }
}

fn secs_var(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Result<Duration> {
    let secs = match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{} must be a number of seconds, got '{}'", key, value))?,
        None => default,
    };
    Ok(Duration::from_secs(secs))
}
