// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! RabbitMQ Monitoring Plugin
//!
//! Queries the RabbitMQ management API and republishes the broker topology
//! as entities, inventory records and metric sets.
//!
//! # Overview
//!
//! ```text
//! /api/bindings  --> BindingStats (one pass, read-only)
//! /api/queues    --+
//!                  +--> EntityFactory --> Entity --> inventory + metrics --> payload
//! /api/exchanges --+
//! ```
//!
//! - [`binding`]: binding graph keyed by `(vhost, kind, name)`
//! - [`factory`]: entity naming, allow-list filtering, metric attributes
//! - [`inventory`]: path-keyed inventory records and projection helpers
//! - [`data`]: queue and exchange collectors
//! - [`collector`]: one collection cycle end to end

pub mod binding;
pub mod client;
pub mod collector;
pub mod config;
pub mod consts;
pub mod data;
pub mod entity;
pub mod factory;
pub mod inventory;
pub mod metrics;

pub use binding::{Binding, BindingKey, BindingStats};
pub use client::{ApiClient, ApiError, ManagementApi};
pub use collector::{render_payload, AgentError, Collector, CycleSummary};
pub use config::{AgentConfig, CollectMode, ConfigError, FilterConfig};
pub use consts::EntityKind;
pub use entity::{Entity, EntityError, Integration};
pub use factory::{EntityFactory, EntityFilter};
pub use inventory::{Inventory, InventoryError};
pub use metrics::{MetricAttribute, MetricSet, MetricValue};
