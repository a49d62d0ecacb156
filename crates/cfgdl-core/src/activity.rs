//! Activity (analytics) log. Posts are best-effort: callers never wait on
//! them for correctness and never abort on their failure.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;

use crate::http::{self, HttpEndpoint};
use crate::model::ActivityEvent;

/// Action recorded when a project archive download starts.
pub const DOWNLOAD_ACTION: &str = "/configuration/download";

/// Backend path receiving activity events.
pub const ACTIVITIES_PATH: &str = "/api/v1/activities/page";

#[async_trait]
pub trait ActivityLog: Send + Sync {
    async fn post(&self, event: ActivityEvent) -> Result<()>;
}

/// Posts activity events to the console backend.
#[derive(Debug, Clone)]
pub struct HttpActivityLog {
    endpoint: HttpEndpoint,
}

impl HttpActivityLog {
    pub fn new(endpoint: HttpEndpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl ActivityLog for HttpActivityLog {
    async fn post(&self, event: ActivityEvent) -> Result<()> {
        let endpoint = self.endpoint.clone();
        let body = serde_json::to_vec(&event)?;
        let response = tokio::task::spawn_blocking(move || {
            http::post_json(&endpoint, ACTIVITIES_PATH, &[], &body)
        })
        .await
        .context("activity post task failed")??;
        if !response.is_success() {
            bail!("activity post returned HTTP {}", response.status);
        }
        Ok(())
    }
}

/// Records events in the application log only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingActivityLog;

#[async_trait]
impl ActivityLog for TracingActivityLog {
    async fn post(&self, event: ActivityEvent) -> Result<()> {
        tracing::info!(action = %event.action, "activity");
        Ok(())
    }
}
