// Copyright 2026, The simple-operator Authors
// SPDX-License-Identifier: Apache-2.0

//! CRD availability checking utilities

use crate::constants::crd::{POLL_INTERVAL_SECS, POLL_MAX_INTERVAL_SECS};
use crate::error::Result;
use crate::types::Simple;
use kube::{core::GroupVersionKind, discovery::Discovery, Client, Resource};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Block until the API server serves the Simple kind, polling discovery with
/// a doubling delay capped at POLL_MAX_INTERVAL_SECS.
pub async fn wait_for_simple_crd(client: &Client) -> Result<()> {
    let gvk = simple_gvk();
    let mut delay = Duration::from_secs(POLL_INTERVAL_SECS);

    loop {
        match is_served(client, &gvk).await {
            Ok(true) => {
                info!(group = %gvk.group, version = %gvk.version, "Simple CRD is served");
                return Ok(());
            }
            Ok(false) => info!(retry_in = ?delay, "Simple CRD not served yet"),
            Err(e) => warn!(retry_in = ?delay, "Discovery of Simple CRD failed: {}", e),
        }
        sleep(delay).await;
        delay = next_delay(delay);
    }
}

fn simple_gvk() -> GroupVersionKind {
    GroupVersionKind::gvk(&Simple::group(&()), &Simple::version(&()), &Simple::kind(&()))
}

fn next_delay(delay: Duration) -> Duration {
    (delay * 2).min(Duration::from_secs(POLL_MAX_INTERVAL_SECS))
}

async fn is_served(client: &Client, gvk: &GroupVersionKind) -> Result<bool> {
    let discovery = Discovery::new(client.clone())
        .filter(&[gvk.group.as_str()])
        .run()
        .await?;
    Ok(discovery.resolve_gvk(gvk).is_some())
}
