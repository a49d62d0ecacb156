//! Configuration resource: fetches the full configuration of one cluster
//! from the console backend.

mod parse;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::http::{self, HttpEndpoint};
use crate::model::RawClusterConfiguration;

pub use parse::parse_configuration;

/// Header the backend inspects to serve demo configurations.
pub const DEMO_MODE_HEADER: &str = "IgniteDemoMode";

/// Source of raw cluster configurations.
#[async_trait]
pub trait ConfigurationSource: Send + Sync {
    async fn fetch(&self, cluster_id: &str, demo: bool) -> Result<RawClusterConfiguration>;
}

/// Fetches `GET {server}/api/v1/configuration/{cluster_id}` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpConfigurationSource {
    endpoint: HttpEndpoint,
}

impl HttpConfigurationSource {
    pub fn new(endpoint: HttpEndpoint) -> Self {
        Self { endpoint }
    }

    /// Request path for a cluster's configuration.
    pub fn path_for(cluster_id: &str) -> String {
        format!("/api/v1/configuration/{}", cluster_id)
    }
}

#[async_trait]
impl ConfigurationSource for HttpConfigurationSource {
    async fn fetch(&self, cluster_id: &str, demo: bool) -> Result<RawClusterConfiguration> {
        let endpoint = self.endpoint.clone();
        let path = Self::path_for(cluster_id);
        tracing::debug!(path = %path, demo, "fetching cluster configuration");

        let response = tokio::task::spawn_blocking(move || {
            let headers: &[(&str, &str)] = if demo {
                &[(DEMO_MODE_HEADER, "true")]
            } else {
                &[]
            };
            http::get(&endpoint, &path, headers)
        })
        .await
        .context("configuration fetch task failed")??;

        parse_configuration(response.status, &response.body)
    }
}
