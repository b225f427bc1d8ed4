// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::BrokerObject;
use crate::binding::BindingStats;
use crate::consts::EntityKind;
use crate::entity::Entity;
use crate::inventory::{set_inventory_bindings, set_inventory_item, set_inventory_map};
use crate::metrics::{MetricAttribute, MetricSet, MetricSpec};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Metrics reported for every exchange.
pub const EXCHANGE_METRICS: &[MetricSpec] = &[
    MetricSpec::gauge("message_stats.publish_in", "exchange.messagesPublishedPerChannel"),
    MetricSpec::gauge(
        "message_stats.publish_in_details.rate",
        "exchange.messagesPublishedPerChannelPerSecond",
    ),
    MetricSpec::gauge("message_stats.publish_out", "exchange.messagesPublishedQueue"),
    MetricSpec::gauge(
        "message_stats.publish_out_details.rate",
        "exchange.messagesPublishedQueuePerSecond",
    ),
];

/// One entry of `/api/exchanges`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ExchangeData {
    /// Empty for the default exchange.
    #[serde(default)]
    pub name: String,
    pub vhost: String,
    #[serde(rename = "type", default)]
    pub exchange_type: String,
    #[serde(default)]
    pub durable: bool,
    #[serde(default)]
    pub auto_delete: bool,
    #[serde(default, deserialize_with = "super::lenient_map")]
    pub arguments: Map<String, Value>,
    /// Everything else, including `message_stats`.
    #[serde(flatten)]
    pub stats: Map<String, Value>,
}

impl BrokerObject for ExchangeData {
    fn kind(&self) -> EntityKind {
        EntityKind::Exchange
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn vhost(&self) -> &str {
        &self.vhost
    }

    fn collect_inventory(&self, entity: &Entity, stats: &BindingStats) {
        let prefix = self.kind().as_str();
        set_inventory_item(entity, prefix, "type", self.exchange_type.as_str());
        set_inventory_item(entity, prefix, "durable", self.durable);
        set_inventory_item(entity, prefix, "auto_delete", self.auto_delete);
        set_inventory_map(entity, prefix, "arguments", &self.arguments);
        set_inventory_bindings(entity, prefix, &self.binding_key(), stats);
    }

    fn collect_metrics(&self, attributes: Vec<MetricAttribute>) -> MetricSet {
        let mut set = MetricSet::new("RabbitmqExchangeSample", attributes);
        set.extract(&self.stats, EXCHANGE_METRICS);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{Binding, BindingKey};
    use crate::metrics::MetricValue;
    use serde_json::json;

    fn test_args() -> Map<String, Value> {
        json!({
            "string": "test-string",
            "number": 123.456,
            "boolean": true,
            "array": ["sub-string", 654.321, false, ["sub-array", 987]]
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn test_collect_inventory_exchange() {
        let data = ExchangeData {
            name: "exchange1".into(),
            vhost: "vhost1".into(),
            exchange_type: "test-type".into(),
            durable: true,
            auto_delete: false,
            arguments: test_args(),
            stats: Map::new(),
        };
        let key = |kind, name: &str| BindingKey::new("vhost1", kind, name);
        let stats: BindingStats = [(
            key(EntityKind::Exchange, "exchange1"),
            Binding {
                source: vec![
                    key(EntityKind::Exchange, "exchange2"),
                    key(EntityKind::Exchange, "exchange3"),
                ],
                destination: vec![
                    key(EntityKind::Queue, "queue2"),
                    key(EntityKind::Exchange, "exchange4"),
                ],
            },
        )]
        .into_iter()
        .collect();

        let e = Entity::new("exchange", "vhost1/exchange1");
        data.collect_inventory(&e, &stats);
        let inv = e.inventory();

        assert_eq!(
            inv.item("exchange/bindings.source").unwrap()["value"],
            json!("exchange:vhost1/exchange2, exchange:vhost1/exchange3")
        );
        assert_eq!(
            inv.item("exchange/bindings.destination").unwrap()["value"],
            json!("queue:vhost1/queue2, exchange:vhost1/exchange4")
        );
        assert_eq!(inv.item("exchange/type").unwrap()["value"], json!("test-type"));
        assert_eq!(inv.item("exchange/durable").unwrap()["value"], json!(1));
        assert_eq!(inv.item("exchange/auto_delete").unwrap()["value"], json!(0));

        let args = inv.item("exchange/arguments").expect("arguments record");
        let expected = test_args();
        assert_eq!(args.len(), expected.len());
        for (k, v) in &expected {
            if k == "array" {
                assert_eq!(
                    args[k.as_str()],
                    json!(r#"["sub-string",654.321,false,["sub-array",987]]"#)
                );
            } else {
                assert_eq!(&args[k.as_str()], v);
            }
        }
        assert_eq!(inv.len(), 6);
    }

    #[test]
    fn test_deserialize_exchange() {
        let data: ExchangeData = serde_json::from_value(json!({
            "name": "",
            "vhost": "/",
            "type": "direct",
            "durable": true,
            "auto_delete": false,
            "internal": false,
            "arguments": {},
            "message_stats": {
                "publish_in": 10,
                "publish_in_details": { "rate": 0.5 },
                "publish_out": 8,
                "publish_out_details": { "rate": 0.4 }
            }
        }))
        .unwrap();

        assert_eq!(data.name, "");
        assert_eq!(data.exchange_type, "direct");
        assert!(data.arguments.is_empty());

        let set = data.collect_metrics(vec![]);
        assert_eq!(set.event_type(), "RabbitmqExchangeSample");
        assert_eq!(set.len(), 4);
        assert_eq!(
            set.get("exchange.messagesPublishedQueuePerSecond"),
            Some(&MetricValue::Number(0.4))
        );
    }

    #[test]
    fn test_exchange_without_message_stats_has_no_metrics() {
        let data: ExchangeData = serde_json::from_value(json!({
            "name": "amq.topic",
            "vhost": "/",
            "type": "topic",
            "arguments": []
        }))
        .unwrap();
        assert!(data.collect_metrics(vec![]).is_empty());
    }
}
