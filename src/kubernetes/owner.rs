// Copyright 2026, The simple-operator Authors
// SPDX-License-Identifier: Apache-2.0

//! Controller owner references between a custom resource and its children

use crate::error::{Result, SimpleError};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::{
    api::ObjectMeta,
    runtime::reflector::ObjectRef,
    Resource, ResourceExt,
};

/// Set `owner` as the controller of `object`.
///
/// Existing references to the same owner (same group, kind and name) are
/// refreshed in place, so a recreated owner with a new uid takes over. Fails
/// when the owner has no uid yet, lives in another namespace, or when the
/// object is already controlled by a different owner.
pub fn set_controller_reference<O>(owner: &O, object: &mut ObjectMeta) -> Result<()>
where
    O: Resource<DynamicType = ()>,
{
    let owner_ref = owner
        .controller_owner_ref(&())
        .map(|r| OwnerReference {
            block_owner_deletion: Some(true),
            ..r
        })
        .ok_or_else(|| {
            SimpleError::OwnerReferenceError(format!(
                "{} {} has no uid",
                O::kind(&()),
                owner.name_any()
            ))
        })?;

    if let Some(owner_ns) = owner.meta().namespace.as_deref() {
        if object.namespace.as_deref() != Some(owner_ns) {
            return Err(SimpleError::OwnerReferenceError(format!(
                "cross-namespace owner reference from {:?} to {}/{} is not allowed",
                object.namespace,
                owner_ns,
                owner.name_any()
            )));
        }
    }

    let refs = object.owner_references.get_or_insert_with(Vec::new);

    if let Some(current) = refs
        .iter()
        .find(|r| r.controller == Some(true) && !same_owner(r, &owner_ref))
    {
        return Err(SimpleError::AlreadyOwned {
            object: object.name.clone().unwrap_or_default(),
            owner: format!("{} {}", current.kind, current.name),
        });
    }

    match refs.iter_mut().find(|r| same_owner(r, &owner_ref)) {
        Some(existing) => *existing = owner_ref,
        None => refs.push(owner_ref),
    }

    Ok(())
}

/// Resolve the controlling owner of `object` when it is of kind `O`.
///
/// Used to map child changes back to the parent that must be reconciled.
pub fn controller_of<O, C>(object: &C) -> Option<ObjectRef<O>>
where
    O: Resource<DynamicType = ()>,
    C: Resource,
{
    let owner = object
        .owner_references()
        .iter()
        .find(|r| r.controller == Some(true))?;

    if owner.kind != O::kind(&()) || api_group(&owner.api_version) != O::group(&()) {
        return None;
    }

    let parent = ObjectRef::new(&owner.name);
    Some(match object.meta().namespace.as_deref() {
        Some(ns) => parent.within(ns),
        None => parent,
    })
}

fn same_owner(a: &OwnerReference, b: &OwnerReference) -> bool {
    a.kind == b.kind && a.name == b.name && api_group(&a.api_version) == api_group(&b.api_version)
}

fn api_group(api_version: &str) -> &str {
    api_version
        .split_once('/')
        .map(|(group, _)| group)
        .unwrap_or("")
}
