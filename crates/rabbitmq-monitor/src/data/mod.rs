// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Management API object shapes and their collectors.

mod binding;
mod exchange;
mod overview;
mod queue;

pub use binding::BindingData;
pub use exchange::{ExchangeData, EXCHANGE_METRICS};
pub use overview::OverviewData;
pub use queue::{QueueData, QUEUE_METRICS};

use crate::binding::{BindingKey, BindingStats};
use crate::consts::EntityKind;
use crate::entity::Entity;
use crate::metrics::{MetricAttribute, MetricSet};

/// A broker object reported as one entity.
pub trait BrokerObject {
    fn kind(&self) -> EntityKind;

    /// Raw name as reported by the broker (may be empty for the default exchange).
    fn name(&self) -> &str;

    fn vhost(&self) -> &str;

    /// Write this object's inventory records.
    fn collect_inventory(&self, entity: &Entity, stats: &BindingStats);

    /// Build this object's metric set.
    fn collect_metrics(&self, attributes: Vec<MetricAttribute>) -> MetricSet;

    /// Key of this object in the binding graph.
    fn binding_key(&self) -> BindingKey {
        BindingKey::new(self.vhost(), self.kind(), self.name())
    }
}

/// Accept an argument map reported as an object, `null`, or an empty list.
pub(crate) fn lenient_map<'de, D>(deserializer: D) -> Result<serde_json::Map<String, serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    use serde_json::Value;

    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Default::default()),
        Value::Array(items) if items.is_empty() => Ok(Default::default()),
        other => Err(serde::de::Error::custom(format!(
            "expected an argument map, found {}",
            other
        ))),
    }
}
