// Copyright 2026, The simple-operator Authors
// SPDX-License-Identifier: Apache-2.0

//! Simple reconciler - keeps the owned ConfigMap of every Simple in sync with its spec.

use crate::config::Config;
use crate::error::{Result, SimpleError};
use crate::kubernetes::{controller_of, create_or_update, set_controller_reference};
use crate::types::Simple;
use futures::StreamExt;
use k8s_openapi::api::core::v1::ConfigMap;
use k8s_openapi::NamespaceResourceScope;
use kube::{
    api::ObjectMeta,
    runtime::{controller::Action, reflector::ObjectRef, Controller},
    Api, Client, Resource, ResourceExt,
};
use kube_runtime::watcher::Config as WatcherConfig;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

pub struct SimpleReconciler {
    client: Client,
    config: Config,
}

impl SimpleReconciler {
    pub fn new(client: Client, config: Config) -> Self {
        Self { client, config }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let simples: Api<Simple> = self.api();
        let config_maps: Api<ConfigMap> = self.api();
        let context = Arc::new(self);

        Controller::new(simples, WatcherConfig::default())
            .watches(config_maps, WatcherConfig::default(), |cm| {
                controller_of::<Simple, _>(&cm)
            })
            .shutdown_on_signal()
            .run(reconcile, error_policy, context)
            .for_each(|res| async move {
                match res {
                    Ok(o) => debug!("Reconciled simple: {:?}", o),
                    Err(e) => warn!("Reconciliation error: {:?}", e),
                }
            })
            .await;

        info!("Simple controller stopped");
        Ok(())
    }

    fn api<K>(&self) -> Api<K>
    where
        K: Resource<Scope = NamespaceResourceScope> + Clone + DeserializeOwned + Debug,
        K::DynamicType: Default,
    {
        match &self.config.watch_namespace {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::all(self.client.clone()),
        }
    }

    /// Converge the ConfigMap owned by the Simple `namespace/name`.
    ///
    /// The Simple is re-read rather than taken from the watch cache. A missing
    /// Simple means it was deleted; its ConfigMap is left to garbage collection.
    #[instrument(skip(self))]
    pub async fn reconcile_simple(&self, namespace: &str, name: &str) -> Result<Action> {
        let simples: Api<Simple> = Api::namespaced(self.client.clone(), namespace);

        let Some(simple) = simples.get_opt(name).await? else {
            debug!("Simple no longer exists, nothing to do");
            return Ok(Action::await_change());
        };

        info!(foo = %simple.spec.foo, "Reconciling Simple");

        let config_maps: Api<ConfigMap> = Api::namespaced(self.client.clone(), namespace);
        let key = ConfigMap {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(namespace.to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let data = simple.spec.config_data();

        let result = create_or_update(&config_maps, key, |cm| {
            // An empty map is stored as an absent field by the API server
            cm.data = (!data.is_empty()).then_some(data);
            if let Err(e) = set_controller_reference(&simple, &mut cm.metadata) {
                error!("Failed to set controller reference: {}", e);
                return Err(e);
            }
            Ok(())
        })
        .await
        .inspect_err(|e| warn!("Failed to reconcile ConfigMap: {}", e))?;

        info!("ConfigMap {}", result);

        Ok(Action::await_change())
    }
}

async fn reconcile(simple: Arc<Simple>, ctx: Arc<SimpleReconciler>) -> Result<Action> {
    let name = simple.name_any();
    let namespace = simple
        .namespace()
        .ok_or_else(|| SimpleError::MissingNamespace(name.clone()))?;

    let deadline = ctx.config.reconcile_timeout;
    tokio::time::timeout(deadline, ctx.reconcile_simple(&namespace, &name))
        .await
        .map_err(|_| SimpleError::Timeout(deadline))?
}

fn error_policy(simple: Arc<Simple>, error: &SimpleError, ctx: Arc<SimpleReconciler>) -> Action {
    error!(
        "Reconciliation error for {}: {}",
        ObjectRef::from_obj(simple.as_ref()),
        error
    );
    Action::requeue(ctx.config.error_requeue)
}
