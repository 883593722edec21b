// Copyright 2026, The simple-operator Authors
// SPDX-License-Identifier: Apache-2.0

/// The operator name, used as field manager on writes
pub const OPERATOR_NAME: &str = "simple-operator";

/// ConfigMap keys written by the operator
pub mod config_map {
    /// Key holding the rendered setting derived from `spec.foo`
    pub const CONFIG_KEY: &str = "something.conf";
    /// Prefix of the rendered setting value
    pub const SETTING_PREFIX: &str = "setting = ";
}

/// Runtime defaults, overridable through the environment
pub mod defaults {
    pub const ERROR_REQUEUE_SECS: u64 = 60;
    pub const RECONCILE_TIMEOUT_SECS: u64 = 30;
}

/// CRD polling configuration
pub mod crd {
    /// Initial polling interval in seconds when waiting for CRD
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 60;
}
