// Copyright 2026, The simple-operator Authors
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::Client;
use tracing::info;
use tracing_subscriber::EnvFilter;

use simple_operator::config::Config;
use simple_operator::kubernetes::wait_for_simple_crd;
use simple_operator::reconcilers::SimpleReconciler;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing, RUST_LOG overrides the default filter
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,kube=warn")),
        )
        .init();

    info!("Starting Simple operator");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: watch_namespace={}, error_requeue={:?}, reconcile_timeout={:?}",
        config.watch_namespace.as_deref().unwrap_or("<all>"),
        config.error_requeue,
        config.reconcile_timeout
    );

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    info!("Waiting for Simple CRD to become available...");
    wait_for_simple_crd(&client).await?;

    // Runs until SIGINT or SIGTERM
    SimpleReconciler::new(client, config).run().await?;

    info!("Simple operator stopped");
    Ok(())
}
