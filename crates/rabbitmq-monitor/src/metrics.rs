// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Metric sets and declarative metric extraction.
//!
//! Each broker object type declares a static table of [`MetricSpec`]s: the
//! dotted path of a value in the management API JSON, the reported metric
//! name and how the value is sourced. [`MetricSet::extract`] walks the table
//! against one object's JSON and records whatever is present.
//!
//! Rates are taken as the broker reports them (`*_details.rate`); no state
//! is kept between cycles.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Key/value attribute attached to every metric set of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricAttribute {
    pub key: String,
    pub value: String,
}

impl MetricAttribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// How a metric value is sourced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    /// Numeric value reported as-is.
    Gauge,
    /// String value reported as-is.
    Attribute,
}

/// One row of a metric table.
#[derive(Debug, Clone, Copy)]
pub struct MetricSpec {
    /// Dotted path into the object JSON, e.g. `message_stats.publish_details.rate`.
    pub source: &'static str,
    /// Reported metric name.
    pub name: &'static str,
    pub source_type: SourceType,
}

impl MetricSpec {
    pub const fn gauge(source: &'static str, name: &'static str) -> Self {
        Self {
            source,
            name,
            source_type: SourceType::Gauge,
        }
    }

    pub const fn attribute(source: &'static str, name: &'static str) -> Self {
        Self {
            source,
            name,
            source_type: SourceType::Attribute,
        }
    }
}

/// A metric value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

/// One sample of metrics for an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSet {
    event_type: String,
    attributes: Vec<MetricAttribute>,
    values: BTreeMap<String, MetricValue>,
}

impl MetricSet {
    pub fn new(event_type: impl Into<String>, attributes: Vec<MetricAttribute>) -> Self {
        Self {
            event_type: event_type.into(),
            attributes,
            values: BTreeMap::new(),
        }
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn attributes(&self) -> &[MetricAttribute] {
        &self.attributes
    }

    pub fn set(&mut self, name: impl Into<String>, value: MetricValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Record every value of `table` found in `source`.
    ///
    /// Missing paths, nulls and values of the wrong type are skipped.
    pub fn extract(&mut self, source: &Map<String, Value>, table: &[MetricSpec]) {
        for spec in table {
            let Some(raw) = resolve_path(source, spec.source) else {
                continue;
            };
            let value = match (spec.source_type, raw) {
                (SourceType::Gauge, Value::Number(n)) => n.as_f64().map(MetricValue::Number),
                (SourceType::Attribute, Value::String(s)) => Some(MetricValue::Text(s.clone())),
                (SourceType::Attribute, Value::Number(n)) => Some(MetricValue::Text(n.to_string())),
                _ => None,
            };
            match value {
                Some(v) => self.set(spec.name, v),
                None => tracing::trace!("Skipping metric {}: unexpected value {}", spec.name, raw),
            }
        }
    }

    /// Flat JSON rendering: `event_type`, attributes, then values.
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();
        out.insert("event_type".into(), Value::String(self.event_type.clone()));
        for attr in &self.attributes {
            out.insert(attr.key.clone(), Value::String(attr.value.clone()));
        }
        for (name, value) in &self.values {
            let v = match value {
                MetricValue::Number(n) => serde_json::Number::from_f64(*n)
                    .map(Value::Number)
                    .unwrap_or(Value::Null),
                MetricValue::Text(s) => Value::String(s.clone()),
            };
            out.insert(name.clone(), v);
        }
        Value::Object(out)
    }
}

/// Resolve a dotted path, e.g. `"message_stats.ack"`.
fn resolve_path<'a>(json: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let mut current = json.get(parts.next()?)?;
    for part in parts {
        current = current.get(part)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}
