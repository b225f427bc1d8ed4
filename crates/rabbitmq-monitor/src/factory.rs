// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Entity naming and filtering.
//!
//! [`EntityFactory::create`] turns a raw broker object name into a registered
//! [`Entity`] plus the metric attributes that identify it. Objects excluded
//! by the configured filters yield `Ok(None)`: filtering is not an error.

use crate::config::{ConfigError, FilterConfig};
use crate::consts::{EntityKind, DEFAULT_EXCHANGE_NAME};
use crate::entity::{Entity, EntityError, Integration};
use crate::metrics::MetricAttribute;
use regex::Regex;
use std::sync::Arc;

/// A registered entity and its metric attributes.
pub type CreatedEntity = (Arc<Entity>, Vec<MetricAttribute>);

/// Name lists plus regexes for one dimension. Empty means "accept all".
#[derive(Debug, Clone, Default)]
struct NameMatcher {
    names: Vec<String>,
    patterns: Vec<Regex>,
}

impl NameMatcher {
    fn compile(names: &[String], patterns: &[String]) -> Result<Self, ConfigError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p)
                    .map_err(|e| ConfigError::Invalid(format!("invalid regex {:?}: {}", p, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            names: names.to_vec(),
            patterns,
        })
    }

    fn is_empty(&self) -> bool {
        self.names.is_empty() && self.patterns.is_empty()
    }

    fn accepts(&self, name: &str) -> bool {
        self.is_empty()
            || self.names.iter().any(|n| n == name)
            || self.patterns.iter().any(|re| re.is_match(name))
    }
}

/// Compiled form of [`FilterConfig`].
#[derive(Debug, Clone, Default)]
pub struct EntityFilter {
    queues: NameMatcher,
    exchanges: NameMatcher,
    vhosts: NameMatcher,
}

impl EntityFilter {
    pub fn from_config(config: &FilterConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            queues: NameMatcher::compile(&config.queues, &config.queues_regexes)?,
            exchanges: NameMatcher::compile(&config.exchanges, &config.exchanges_regexes)?,
            vhosts: NameMatcher::compile(&config.vhosts, &config.vhosts_regexes)?,
        })
    }

    /// Check whether an object should be reported.
    pub fn accepts(&self, kind: EntityKind, vhost: &str, name: &str) -> bool {
        if !self.vhosts.accepts(vhost) {
            return false;
        }
        match kind {
            EntityKind::Queue => self.queues.accepts(name),
            EntityKind::Exchange => self.exchanges.accepts(name),
        }
    }
}

/// `vhost/name`, without doubling the separator for the root vhost `/`.
pub fn namespaced_name(vhost: &str, name: &str) -> String {
    if vhost.ends_with('/') {
        format!("{}{}", vhost, name)
    } else {
        format!("{}/{}", vhost, name)
    }
}

/// Creates entities for broker objects.
#[derive(Debug, Clone)]
pub struct EntityFactory {
    filter: Arc<EntityFilter>,
    cluster_name: Option<String>,
}

impl EntityFactory {
    pub fn new(filter: Arc<EntityFilter>, cluster_name: Option<String>) -> Self {
        Self {
            filter,
            cluster_name: cluster_name.filter(|c| !c.is_empty()),
        }
    }

    pub fn cluster_name(&self) -> Option<&str> {
        self.cluster_name.as_deref()
    }

    /// Create (or fetch) the entity for a broker object.
    ///
    /// Returns `Ok(None)` when the object is filtered out.
    pub fn create(
        &self,
        integration: &Integration,
        raw_name: &str,
        kind: EntityKind,
        vhost: &str,
    ) -> Result<Option<CreatedEntity>, EntityError> {
        let name = if raw_name.is_empty() {
            DEFAULT_EXCHANGE_NAME
        } else {
            raw_name
        };
        let namespaced = namespaced_name(vhost, name);

        if !self.filter.accepts(kind, vhost, name) {
            tracing::debug!("Skipping {} {}: filtered", kind, namespaced);
            return Ok(None);
        }

        let entity = integration.entity(kind.as_str(), &namespaced)?;

        let mut attributes = vec![
            MetricAttribute::new("displayName", namespaced.clone()),
            MetricAttribute::new("entityName", format!("{}:{}", kind, namespaced)),
        ];
        if let Some(cluster) = &self.cluster_name {
            attributes.push(MetricAttribute::new("clusterName", cluster.clone()));
        }

        Ok(Some((entity, attributes)))
    }
}
