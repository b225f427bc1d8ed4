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

/// Metrics reported for every queue.
pub const QUEUE_METRICS: &[MetricSpec] = &[
    MetricSpec::gauge("consumers", "queue.consumers"),
    MetricSpec::gauge(
        "consumer_utilisation",
        "queue.consumerMessageUtilizationPerSecond",
    ),
    MetricSpec::gauge("memory", "queue.erlangBytesConsumedInBytes"),
    MetricSpec::gauge("messages", "queue.totalMessages"),
    MetricSpec::gauge("messages_details.rate", "queue.totalMessagesPerSecond"),
    MetricSpec::gauge("messages_ready", "queue.messagesReadyDeliveryClients"),
    MetricSpec::gauge(
        "messages_ready_details.rate",
        "queue.messagesReadyDeliveryClientsPerSecond",
    ),
    MetricSpec::gauge(
        "messages_unacknowledged",
        "queue.messagesReadyUnacknowledged",
    ),
    MetricSpec::gauge(
        "messages_unacknowledged_details.rate",
        "queue.messagesReadyUnacknowledgedPerSecond",
    ),
    MetricSpec::gauge("message_stats.ack", "queue.messagesAcked"),
    MetricSpec::gauge(
        "message_stats.ack_details.rate",
        "queue.messagesAckedPerSecond",
    ),
    MetricSpec::gauge("message_stats.deliver_get", "queue.messagesDeliveredAckMode"),
    MetricSpec::gauge(
        "message_stats.deliver_get_details.rate",
        "queue.messagesDeliveredAckModePerSecond",
    ),
    MetricSpec::gauge("message_stats.publish", "queue.messagesPublished"),
    MetricSpec::gauge(
        "message_stats.publish_details.rate",
        "queue.messagesPublishedPerSecond",
    ),
    MetricSpec::gauge("message_stats.redeliver", "queue.messagesRedeliverGet"),
    MetricSpec::gauge(
        "message_stats.redeliver_details.rate",
        "queue.messagesRedeliverGetPerSecond",
    ),
    MetricSpec::attribute("state", "queue.state"),
];

/// One entry of `/api/queues`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct QueueData {
    pub name: String,
    pub vhost: String,
    #[serde(default)]
    pub durable: bool,
    #[serde(default)]
    pub auto_delete: bool,
    #[serde(default)]
    pub exclusive: bool,
    #[serde(default, deserialize_with = "super::lenient_map")]
    pub arguments: Map<String, Value>,
    /// Everything else: counters, `*_details`, `message_stats`, `state`.
    #[serde(flatten)]
    pub stats: Map<String, Value>,
}

impl BrokerObject for QueueData {
    fn kind(&self) -> EntityKind {
        EntityKind::Queue
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn vhost(&self) -> &str {
        &self.vhost
    }

    fn collect_inventory(&self, entity: &Entity, stats: &BindingStats) {
        let prefix = self.kind().as_str();
        set_inventory_item(entity, prefix, "exclusive", self.exclusive);
        set_inventory_item(entity, prefix, "durable", self.durable);
        set_inventory_item(entity, prefix, "auto_delete", self.auto_delete);
        set_inventory_map(entity, prefix, "arguments", &self.arguments);
        set_inventory_bindings(entity, prefix, &self.binding_key(), stats);
    }

    fn collect_metrics(&self, attributes: Vec<MetricAttribute>) -> MetricSet {
        let mut set = MetricSet::new("RabbitmqQueueSample", attributes);
        set.extract(&self.stats, QUEUE_METRICS);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{Binding, BindingKey};
    use crate::metrics::MetricValue;
    use serde_json::json;

    #[test]
    fn test_collect_inventory_queue() {
        let data = QueueData {
            name: "queue1".into(),
            vhost: "vhost1".into(),
            durable: false,
            auto_delete: true,
            exclusive: true,
            arguments: json!({ "x-max-length": 1000, "x-dead-letter-exchange": "dlx" })
                .as_object()
                .cloned()
                .unwrap(),
            stats: Map::new(),
        };
        let stats: BindingStats = [(
            BindingKey::new("vhost1", EntityKind::Queue, "queue1"),
            Binding {
                source: vec![
                    BindingKey::new("vhost1", EntityKind::Exchange, "exchange1"),
                    BindingKey::new("vhost1", EntityKind::Exchange, "exchange2"),
                ],
                destination: vec![],
            },
        )]
        .into_iter()
        .collect();

        let e = Entity::new("queue", "vhost1/queue1");
        data.collect_inventory(&e, &stats);
        let inv = e.inventory();

        assert_eq!(
            inv.item("queue/bindings.source").unwrap()["value"],
            json!("exchange:vhost1/exchange1, exchange:vhost1/exchange2")
        );
        assert!(inv.item("queue/bindings.destination").is_none());
        assert_eq!(inv.item("queue/exclusive").unwrap()["value"], json!(1));
        assert_eq!(inv.item("queue/durable").unwrap()["value"], json!(0));
        assert_eq!(inv.item("queue/auto_delete").unwrap()["value"], json!(1));

        let args = inv.item("queue/arguments").unwrap();
        assert_eq!(args.len(), 2);
        assert_eq!(args["x-max-length"], json!(1000));
        assert_eq!(args["x-dead-letter-exchange"], json!("dlx"));
    }

    #[test]
    fn test_queue_without_bindings_has_no_binding_records() {
        let data: QueueData = serde_json::from_value(json!({
            "name": "lonely",
            "vhost": "/",
            "durable": true
        }))
        .unwrap();

        let e = Entity::new("queue", "/lonely");
        data.collect_inventory(&e, &BindingStats::default());
        let inv = e.inventory();

        assert!(inv.item("queue/bindings.source").is_none());
        assert!(inv.item("queue/bindings.destination").is_none());
        assert!(inv.item("queue/arguments").is_none());
        assert_eq!(inv.len(), 3);
    }

    #[test]
    fn test_collect_metrics_queue() {
        let data: QueueData = serde_json::from_value(json!({
            "name": "orders",
            "vhost": "/",
            "durable": true,
            "arguments": null,
            "consumers": 2,
            "memory": 34_000,
            "messages": 12,
            "messages_details": { "rate": 0.2 },
            "state": "running",
            "message_stats": {
                "publish": 100,
                "publish_details": { "rate": 1.25 },
                "ack": 88
            }
        }))
        .unwrap();

        let attrs = vec![MetricAttribute::new("displayName", "/orders")];
        let set = data.collect_metrics(attrs.clone());

        assert_eq!(set.event_type(), "RabbitmqQueueSample");
        assert_eq!(set.attributes(), attrs.as_slice());
        assert_eq!(set.get("queue.consumers"), Some(&MetricValue::Number(2.0)));
        assert_eq!(set.get("queue.totalMessages"), Some(&MetricValue::Number(12.0)));
        assert_eq!(
            set.get("queue.messagesPublishedPerSecond"),
            Some(&MetricValue::Number(1.25))
        );
        assert_eq!(set.get("queue.messagesAcked"), Some(&MetricValue::Number(88.0)));
        assert_eq!(set.get("queue.state"), Some(&MetricValue::Text("running".into())));
        assert!(set.get("queue.messagesRedeliverGet").is_none());
        assert_eq!(set.len(), 8);
    }
}
