// Copyright 2026, The simple-operator Authors
// SPDX-License-Identifier: Apache-2.0
use crate::constants::config_map::{CONFIG_KEY, SETTING_PREFIX};
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[kube(group = "simple.atlas.fis.dev", version = "v1alpha1", kind = "Simple")]
#[kube(namespaced)]
#[serde(rename_all = "camelCase")]
pub struct SimpleSpec {
    /// Value rendered into the owned ConfigMap; empty means no setting
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub foo: String,
}

impl SimpleSpec {
    /// Desired ConfigMap data for this spec.
    ///
    /// An empty `foo` yields an empty map, anything else a single
    /// `something.conf` entry.
    pub fn config_data(&self) -> BTreeMap<String, String> {
        let mut data = BTreeMap::new();
        if !self.foo.is_empty() {
            data.insert(
                CONFIG_KEY.to_string(),
                format!("{}{}", SETTING_PREFIX, self.foo),
            );
        }
        data
    }
}
