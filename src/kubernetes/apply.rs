// Copyright 2026, The simple-operator Authors
// SPDX-License-Identifier: Apache-2.0

//! Fetch-or-create, mutate, then persist

use crate::constants::OPERATOR_NAME;
use crate::error::{Result, SimpleError};
use kube::{api::PostParams, Api, Resource, ResourceExt};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::{self, Debug};
use tracing::{debug, instrument};

/// Outcome of [`create_or_update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationResult {
    Created,
    Updated,
    Unchanged,
}

impl fmt::Display for OperationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OperationResult::Created => "created",
            OperationResult::Updated => "updated",
            OperationResult::Unchanged => "unchanged",
        };
        f.write_str(s)
    }
}

/// Bring the object identified by `key` to the state produced by `mutate`.
///
/// The live object is read first. When it is missing, `key` is used as the
/// starting point and created after mutation. When it exists, `mutate` runs on
/// a copy and the result is written back only if it differs. The write carries
/// the resourceVersion that was read, so a concurrent modification surfaces as
/// a 409 Conflict instead of being overwritten.
///
/// `mutate` must leave name and namespace untouched.
#[instrument(skip(api, key, mutate), fields(name = ?key.meta().name))]
pub async fn create_or_update<K, F>(api: &Api<K>, key: K, mutate: F) -> Result<OperationResult>
where
    K: Resource + Clone + PartialEq + Serialize + DeserializeOwned + Debug,
    F: FnOnce(&mut K) -> Result<()>,
{
    let name = key
        .meta()
        .name
        .clone()
        .ok_or_else(|| SimpleError::InvalidObject("key object has no name".to_string()))?;

    let post_params = PostParams {
        field_manager: Some(OPERATOR_NAME.to_string()),
        ..Default::default()
    };

    match api.get_opt(&name).await? {
        None => {
            let mut object = key;
            mutate_checked(&mut object, mutate)?;
            api.create(&post_params, &object).await?;
            debug!("Created {}", name);
            Ok(OperationResult::Created)
        }
        Some(existing) => {
            let mut object = existing.clone();
            mutate_checked(&mut object, mutate)?;
            if object == existing {
                debug!("{} is up to date", name);
                return Ok(OperationResult::Unchanged);
            }
            api.replace(&name, &post_params, &object).await?;
            debug!("Updated {}", name);
            Ok(OperationResult::Updated)
        }
    }
}

fn mutate_checked<K, F>(object: &mut K, mutate: F) -> Result<()>
where
    K: Resource,
    F: FnOnce(&mut K) -> Result<()>,
{
    let name = object.name_any();
    let namespace = object.namespace();

    mutate(object)?;

    if object.name_any() != name || object.namespace() != namespace {
        return Err(SimpleError::InvalidObject(format!(
            "mutation changed the identity of {} to {}",
            name,
            object.name_any()
        )));
    }
    Ok(())
}
