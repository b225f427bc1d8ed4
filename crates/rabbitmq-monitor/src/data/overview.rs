// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use serde::Deserialize;

/// The parts of `/api/overview` this plugin reads.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct OverviewData {
    #[serde(default)]
    pub cluster_name: Option<String>,
    #[serde(default)]
    pub rabbitmq_version: Option<String>,
    #[serde(default)]
    pub management_version: Option<String>,
}
