// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use serde::Deserialize;
use serde_json::{Map, Value};

/// One entry of `/api/bindings`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BindingData {
    /// Source exchange; empty for the default exchange.
    #[serde(default)]
    pub source: String,
    pub vhost: String,
    pub destination: String,
    /// `queue` or `exchange`.
    pub destination_type: String,
    #[serde(default)]
    pub routing_key: String,
    #[serde(default, deserialize_with = "super::lenient_map")]
    pub arguments: Map<String, Value>,
}
