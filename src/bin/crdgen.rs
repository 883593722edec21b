// Copyright 2026, The simple-operator Authors
// SPDX-License-Identifier: Apache-2.0

//! Prints the Simple CustomResourceDefinition as YAML.
//!
//! Usage: cargo run --bin crdgen > deploy/crd.yaml

use simple_operator::types::generate_crds;

fn main() -> anyhow::Result<()> {
    for crd in generate_crds()? {
        println!("---");
        print!("{}", crd);
    }
    Ok(())
}
