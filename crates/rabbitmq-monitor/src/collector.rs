// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Collection cycle.
//!
//! One cycle fetches broker state, builds the binding graph once, then
//! reports every queue and exchange as an entity:
//!
//! ```text
//! ManagementApi --> BindingStats::build --> EntityFactory::create --> collect_inventory / collect_metrics
//! ```
//!
//! A fetch failure aborts the cycle. An entity that cannot be created is
//! logged and skipped; the remaining objects are still reported.

use crate::binding::BindingStats;
use crate::client::{ApiError, ManagementApi};
use crate::config::{AgentConfig, ConfigError};
use crate::consts::INTEGRATION_NAME;
use crate::data::BrokerObject;
use crate::entity::Integration;
use crate::factory::{EntityFactory, EntityFilter};
use std::sync::Arc;
use thiserror::Error;

/// Agent errors.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Management API error: {0}")]
    Api(#[from] ApiError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-cycle counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleSummary {
    pub reported: usize,
    pub filtered: usize,
    pub failed: usize,
}

/// Runs collection cycles against a management API.
#[derive(Debug)]
pub struct Collector {
    config: AgentConfig,
    filter: Arc<EntityFilter>,
}

impl Collector {
    pub fn new(config: AgentConfig) -> Result<Self, AgentError> {
        config.validate()?;
        let filter = Arc::new(EntityFilter::from_config(&config.filters)?);
        Ok(Self { config, filter })
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Run one collection cycle.
    pub fn run(&self, api: &dyn ManagementApi) -> Result<(Integration, CycleSummary), AgentError> {
        let overview = api.overview()?;
        let bindings = api.bindings()?;
        let queues = api.queues()?;
        let exchanges = api.exchanges()?;
        tracing::info!(
            "Fetched {} queues, {} exchanges, {} bindings",
            queues.len(),
            exchanges.len(),
            bindings.len()
        );

        let stats = BindingStats::build(&bindings);

        let cluster_name = self
            .config
            .cluster_name
            .clone()
            .or(overview.cluster_name);
        let factory = EntityFactory::new(self.filter.clone(), cluster_name);
        let integration = Integration::new(INTEGRATION_NAME, env!("CARGO_PKG_VERSION"));

        let mut summary = CycleSummary::default();
        for queue in &queues {
            self.collect_object(&factory, &integration, queue, &stats, &mut summary);
        }
        for exchange in &exchanges {
            self.collect_object(&factory, &integration, exchange, &stats, &mut summary);
        }

        tracing::info!(
            "Cycle complete: {} reported, {} filtered, {} failed",
            summary.reported,
            summary.filtered,
            summary.failed
        );
        Ok((integration, summary))
    }

    fn collect_object<T: BrokerObject>(
        &self,
        factory: &EntityFactory,
        integration: &Integration,
        object: &T,
        stats: &BindingStats,
        summary: &mut CycleSummary,
    ) {
        let created = factory.create(integration, object.name(), object.kind(), object.vhost());
        let (entity, attributes) = match created {
            Ok(Some(created)) => created,
            Ok(None) => {
                summary.filtered += 1;
                return;
            }
            Err(e) => {
                tracing::warn!(
                    "Cannot create {} entity for {}/{}: {}",
                    object.kind(),
                    object.vhost(),
                    object.name(),
                    e
                );
                summary.failed += 1;
                return;
            }
        };

        if self.config.mode.inventory() {
            object.collect_inventory(&entity, stats);
        }
        if self.config.mode.metrics() {
            entity.add_metric_set(object.collect_metrics(attributes));
        }
        summary.reported += 1;
    }
}

/// Render the payload as JSON text.
pub fn render_payload(integration: &Integration, pretty: bool) -> Result<String, AgentError> {
    let payload = integration.to_payload();
    let out = if pretty {
        serde_json::to_string_pretty(&payload)?
    } else {
        serde_json::to_string(&payload)?
    };
    Ok(out)
}
