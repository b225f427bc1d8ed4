// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Binding graph.
//!
//! The management API reports bindings as a flat list of
//! `source exchange -> destination` edges. [`BindingStats::build`] folds that
//! list into an index keyed by entity so each queue or exchange can look up
//! what routes into it and what it routes into.
//!
//! ```text
//! [BindingData] --> BindingStats { BindingKey -> Binding { source, destination } }
//! ```

use crate::consts::{EntityKind, DEFAULT_EXCHANGE_NAME};
use crate::data::BindingData;
use std::collections::HashMap;
use std::fmt;

/// Identifies a broker entity inside the binding graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindingKey {
    pub vhost: String,
    pub entity_type: EntityKind,
    pub entity_name: String,
}

impl BindingKey {
    pub fn new(vhost: impl Into<String>, entity_type: EntityKind, name: impl Into<String>) -> Self {
        Self {
            vhost: vhost.into(),
            entity_type,
            entity_name: name.into(),
        }
    }
}

impl fmt::Display for BindingKey {
    /// Renders as `<kind>:<vhost>/<name>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.entity_name.is_empty() && self.entity_type == EntityKind::Exchange {
            DEFAULT_EXCHANGE_NAME
        } else {
            &self.entity_name
        };
        write!(f, "{}:{}/{}", self.entity_type, self.vhost, name)
    }
}

/// Edges attached to one [`BindingKey`], in broker order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Binding {
    /// Entities routing messages into this key.
    pub source: Vec<BindingKey>,
    /// Entities this key routes messages into.
    pub destination: Vec<BindingKey>,
}

/// Binding graph for one collection cycle. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct BindingStats {
    bindings: HashMap<BindingKey, Binding>,
}

impl BindingStats {
    /// Build the graph in one pass over the raw bindings.
    ///
    /// Repeated edges are kept as repeated entries. Bindings with an
    /// unrecognised destination type are skipped.
    pub fn build(raw: &[BindingData]) -> Self {
        let mut stats = Self::default();

        for binding in raw {
            let Some(dest_type) = EntityKind::parse(&binding.destination_type) else {
                tracing::debug!(
                    "Skipping binding {} -> {} with destination type {:?}",
                    binding.source,
                    binding.destination,
                    binding.destination_type
                );
                continue;
            };

            let source = BindingKey::new(&binding.vhost, EntityKind::Exchange, &binding.source);
            let destination = BindingKey::new(&binding.vhost, dest_type, &binding.destination);
            stats.add_edge(source, destination);
        }

        tracing::debug!(
            "Built binding graph: {} edges, {} entities",
            raw.len(),
            stats.len()
        );
        stats
    }

    /// Record a single `source -> destination` edge.
    pub fn add_edge(&mut self, source: BindingKey, destination: BindingKey) {
        self.bindings
            .entry(source.clone())
            .or_default()
            .destination
            .push(destination.clone());
        self.bindings
            .entry(destination)
            .or_default()
            .source
            .push(source);
    }

    /// Look up the edges of `key`. `None` means the entity has no bindings.
    pub fn get(&self, key: &BindingKey) -> Option<&Binding> {
        self.bindings.get(key)
    }

    /// Number of entities with at least one edge.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl FromIterator<(BindingKey, Binding)> for BindingStats {
    fn from_iter<I: IntoIterator<Item = (BindingKey, Binding)>>(iter: I) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}

/// Join keys as `", "`-separated `<kind>:<vhost>/<name>` entries.
pub fn join_keys(keys: &[BindingKey]) -> String {
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
