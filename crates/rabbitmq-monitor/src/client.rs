// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Management API client (HTTP + JSON).

use crate::config::ApiConfig;
use crate::data::{BindingData, ExchangeData, OverviewData, QueueData};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Management API errors.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },
}

/// Source of broker state for one collection cycle.
pub trait ManagementApi {
    fn overview(&self) -> Result<OverviewData, ApiError>;
    fn queues(&self) -> Result<Vec<QueueData>, ApiError>;
    fn exchanges(&self) -> Result<Vec<ExchangeData>, ApiError>;
    fn bindings(&self) -> Result<Vec<BindingData>, ApiError>;
}

/// Blocking client for the RabbitMQ management plugin.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    username: String,
    password: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.insecure_skip_verify)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `endpoint` and decode the JSON body.
    fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!("GET {}", url);

        let resp = self
            .http
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(resp.json()?)
    }
}

impl ManagementApi for ApiClient {
    fn overview(&self) -> Result<OverviewData, ApiError> {
        self.get_json("/api/overview")
    }

    fn queues(&self) -> Result<Vec<QueueData>, ApiError> {
        self.get_json("/api/queues")
    }

    fn exchanges(&self) -> Result<Vec<ExchangeData>, ApiError> {
        self.get_json("/api/exchanges")
    }

    fn bindings(&self) -> Result<Vec<BindingData>, ApiError> {
        self.get_json("/api/bindings")
    }
}
