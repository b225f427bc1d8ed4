// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Entities and the per-cycle entity registry.
//!
//! An [`Integration`] owns every entity reported in one collection cycle,
//! keyed by `(namespace, name)`. Lookups are idempotent: asking for the same
//! coordinates twice, from any thread, yields the same `Arc<Entity>`.

use crate::inventory::Inventory;
use crate::metrics::MetricSet;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::{Mutex, MutexGuard};
use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;

/// Entity registry errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntityError {
    #[error("entity name and namespace are required (namespace={namespace:?}, name={name:?})")]
    MissingIdentity { namespace: String, name: String },

    #[error("entity name {0:?} contains control characters")]
    InvalidName(String),
}

/// A monitored broker object with its inventory and metric sets.
#[derive(Debug)]
pub struct Entity {
    namespace: String,
    name: String,
    inventory: Mutex<Inventory>,
    metrics: Mutex<Vec<MetricSet>>,
}

impl Entity {
    /// Create a detached entity. Use [`Integration::entity`] for registered ones.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            inventory: Mutex::new(Inventory::new()),
            metrics: Mutex::new(Vec::new()),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lock the inventory.
    pub fn inventory(&self) -> MutexGuard<'_, Inventory> {
        self.inventory.lock()
    }

    /// Attach a metric set.
    pub fn add_metric_set(&self, set: MetricSet) {
        self.metrics.lock().push(set);
    }

    /// Lock the metric sets.
    pub fn metric_sets(&self) -> MutexGuard<'_, Vec<MetricSet>> {
        self.metrics.lock()
    }

    /// Render this entity's payload block.
    pub fn to_json(&self) -> Value {
        let metrics: Vec<Value> = self.metrics.lock().iter().map(MetricSet::to_json).collect();
        let inventory = serde_json::to_value(&*self.inventory.lock()).unwrap_or(Value::Null);
        json!({
            "entity": {
                "name": self.name,
                "type": self.namespace,
                "id_attributes": [],
            },
            "metrics": metrics,
            "inventory": inventory,
            "events": [],
        })
    }
}

/// Registry of the entities reported in one collection cycle.
#[derive(Debug)]
pub struct Integration {
    name: String,
    version: String,
    entities: DashMap<(String, String), Arc<Entity>>,
    // creation order, for stable output
    order: Mutex<Vec<Arc<Entity>>>,
}

impl Integration {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            entities: DashMap::new(),
            order: Mutex::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Get or create the entity at `(namespace, name)`.
    pub fn entity(&self, namespace: &str, name: &str) -> Result<Arc<Entity>, EntityError> {
        if namespace.is_empty() || name.is_empty() {
            return Err(EntityError::MissingIdentity {
                namespace: namespace.to_string(),
                name: name.to_string(),
            });
        }
        if name.chars().any(char::is_control) {
            return Err(EntityError::InvalidName(name.to_string()));
        }

        match self.entities.entry((namespace.to_string(), name.to_string())) {
            Entry::Occupied(existing) => Ok(existing.get().clone()),
            Entry::Vacant(slot) => {
                let entity = Arc::new(Entity::new(namespace, name));
                self.order.lock().push(entity.clone());
                slot.insert(entity.clone());
                Ok(entity)
            }
        }
    }

    /// Look up an already registered entity.
    pub fn find(&self, namespace: &str, name: &str) -> Option<Arc<Entity>> {
        self.entities
            .get(&(namespace.to_string(), name.to_string()))
            .map(|e| Arc::clone(e.value()))
    }

    /// Registered entities in creation order.
    pub fn entities(&self) -> Vec<Arc<Entity>> {
        self.order.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Render the integration payload.
    pub fn to_payload(&self) -> Value {
        let data: Vec<Value> = self.order.lock().iter().map(|e| e.to_json()).collect();
        json!({
            "name": self.name,
            "protocol_version": "3",
            "integration_version": self.version,
            "data": data,
        })
    }
}
