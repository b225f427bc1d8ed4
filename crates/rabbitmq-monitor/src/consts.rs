// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shared names and limits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name reported for the broker's nameless default exchange.
pub const DEFAULT_EXCHANGE_NAME: &str = "amq.default";

/// Longest inventory key the upstream inventory store accepts.
pub const MAX_INVENTORY_KEY_LEN: usize = 375;

/// Integration name reported in the payload.
pub const INTEGRATION_NAME: &str = "com.naskel.rabbitmq";

/// Broker object kinds that become entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Queue,
    Exchange,
}

impl EntityKind {
    /// Namespace string, also used as the inventory prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queue => "queue",
            Self::Exchange => "exchange",
        }
    }

    /// Parse a management API `destination_type` value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "queue" => Some(Self::Queue),
            "exchange" => Some(Self::Exchange),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_roundtrip() {
        assert_eq!(EntityKind::parse("queue"), Some(EntityKind::Queue));
        assert_eq!(EntityKind::parse("exchange"), Some(EntityKind::Exchange));
        assert_eq!(EntityKind::parse("stream"), None);
        assert_eq!(EntityKind::Exchange.to_string(), "exchange");
    }
}
