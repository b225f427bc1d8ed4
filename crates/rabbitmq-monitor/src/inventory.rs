// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Inventory store and projection helpers.
//!
//! Inventory is a path-keyed snapshot of an entity's configuration. Each
//! record lives under `"<prefix>/<key>"` and holds a small field map: scalar
//! items use the single field `"value"`, composite items (argument maps) use
//! one field per argument.
//!
//! Projection never fails. Keys the store rejects are dropped, and absent
//! bindings simply produce no record.

use crate::binding::{join_keys, BindingKey, BindingStats};
use crate::consts::MAX_INVENTORY_KEY_LEN;
use crate::entity::Entity;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// Field map of one inventory record.
pub type InventoryItem = BTreeMap<String, Value>;

/// Inventory store errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("inventory key of {len} characters exceeds the {max} character limit")]
    KeyTooLong { len: usize, max: usize },
}

/// Path-keyed inventory of one entity.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Inventory {
    items: BTreeMap<String, InventoryItem>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `field` of the record at `key`, creating the record if needed.
    pub fn set_item(
        &mut self,
        key: &str,
        field: &str,
        value: impl Into<Value>,
    ) -> Result<(), InventoryError> {
        let len = key.chars().count();
        if len > MAX_INVENTORY_KEY_LEN {
            return Err(InventoryError::KeyTooLong {
                len,
                max: MAX_INVENTORY_KEY_LEN,
            });
        }
        self.items
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.into());
        Ok(())
    }

    pub fn item(&self, key: &str) -> Option<&InventoryItem> {
        self.items.get(key)
    }

    pub fn items(&self) -> &BTreeMap<String, InventoryItem> {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn item_path(prefix: &str, key: &str) -> String {
    format!("{}/{}", prefix, key)
}

/// Booleans are stored as 0/1.
fn normalize(value: Value) -> Value {
    match value {
        Value::Bool(b) => Value::from(i64::from(b)),
        other => other,
    }
}

fn store(entity: &Entity, path: &str, field: &str, value: Value) {
    if let Err(e) = entity.inventory().set_item(path, field, value) {
        tracing::trace!("Dropping inventory item for {}: {}", entity.name(), e);
    }
}

/// Store a scalar under `prefix/key`.
pub fn set_inventory_item(entity: &Entity, prefix: &str, key: &str, value: impl Into<Value>) {
    let path = item_path(prefix, key);
    store(entity, &path, "value", normalize(value.into()));
}

/// Store a decoded JSON map as one composite record under `prefix/key`.
///
/// Arrays are not representable as inventory values and are stored as their
/// compact JSON text. Other values pass through unchanged.
pub fn set_inventory_map(entity: &Entity, prefix: &str, key: &str, map: &Map<String, Value>) {
    let path = item_path(prefix, key);
    for (field, value) in map {
        let value = match value {
            Value::Array(_) => match serde_json::to_string(value) {
                Ok(s) => Value::String(s),
                Err(e) => {
                    tracing::trace!("Skipping argument {} of {}: {}", field, entity.name(), e);
                    continue;
                }
            },
            other => other.clone(),
        };
        store(entity, &path, field, value);
    }
}

/// Store the binding edges of `key` as `prefix/bindings.source` and
/// `prefix/bindings.destination`.
///
/// A direction with no edges gets no record at all.
pub fn set_inventory_bindings(entity: &Entity, prefix: &str, key: &BindingKey, stats: &BindingStats) {
    let Some(binding) = stats.get(key) else {
        return;
    };
    if !binding.source.is_empty() {
        set_inventory_item(entity, prefix, "bindings.source", join_keys(&binding.source));
    }
    if !binding.destination.is_empty() {
        set_inventory_item(
            entity,
            prefix,
            "bindings.destination",
            join_keys(&binding.destination),
        );
    }
}
