//! Download orchestrator.
//!
//! Fetches a cluster's configuration, asks the archive builder for the
//! project files and saves them as `<escaped name>-project.zip`. The steps run
//! strictly in order; the first failure skips the rest and is reported once.

mod error;

use serde_json::Map;
use std::path::PathBuf;
use std::sync::Arc;

use crate::activity::{ActivityLog, DOWNLOAD_ACTION};
use crate::archive::ArchiveBuilder;
use crate::messages::ErrorReporter;
use crate::model::{ActivityEvent, ArchiveRequest, ClusterRef, Session};
use crate::naming;
use crate::populate::populate;
use crate::resource::ConfigurationSource;
use crate::storage::FileSaver;
use crate::version::VersionSource;

pub use error::{DownloadError, FAILURE_PREFIX};

/// Outcome of a successful download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArchive {
    pub file_name: String,
    pub path: PathBuf,
    pub bytes: usize,
}

/// Collaborators of the download pipeline, injected at construction.
#[derive(Clone)]
pub struct ConfigurationDownload {
    configuration: Arc<dyn ConfigurationSource>,
    zipper: Arc<dyn ArchiveBuilder>,
    activities: Arc<dyn ActivityLog>,
    messages: Arc<dyn ErrorReporter>,
    saver: Arc<dyn FileSaver>,
    version: Arc<dyn VersionSource>,
}

impl ConfigurationDownload {
    pub fn new(
        configuration: Arc<dyn ConfigurationSource>,
        zipper: Arc<dyn ArchiveBuilder>,
        activities: Arc<dyn ActivityLog>,
        messages: Arc<dyn ErrorReporter>,
        saver: Arc<dyn FileSaver>,
        version: Arc<dyn VersionSource>,
    ) -> Self {
        Self {
            configuration,
            zipper,
            activities,
            messages,
            saver,
            version,
        }
    }

    /// Downloads the project archive for `cluster`.
    ///
    /// Never fails: any error is shown through the error reporter as
    /// `Failed to generate project files. {message}` and the call completes.
    pub async fn download_cluster_configuration(&self, cluster: &ClusterRef, session: &Session) {
        if let Err(e) = self
            .try_download_cluster_configuration(cluster, session)
            .await
        {
            tracing::warn!(cluster_id = %cluster.id, error = %e, "project download failed");
            self.messages.show_error(&e.user_message());
        }
    }

    /// Same pipeline as [`Self::download_cluster_configuration`], returning the
    /// failure instead of reporting it.
    pub async fn try_download_cluster_configuration(
        &self,
        cluster: &ClusterRef,
        session: &Session,
    ) -> Result<SavedArchive, DownloadError> {
        self.post_activity();

        let raw = self
            .configuration
            .fetch(&cluster.id, session.demo_mode)
            .await
            .map_err(DownloadError::Fetch)?;
        let mut set = populate(raw);

        let found = set
            .take_cluster(&cluster.id)
            .ok_or_else(|| DownloadError::NotFound {
                name: cluster.name.clone(),
            })?;
        tracing::debug!(cluster_id = %cluster.id, "cluster configuration loaded");

        let request = ArchiveRequest {
            cluster: found,
            data: Map::new(),
            demo_mode: session.demo_mode,
            target_version: self.version.current(),
        };
        let bytes = self
            .zipper
            .build(request)
            .await
            .map_err(DownloadError::Build)?;

        let file_name = naming::name_file(cluster);
        let len = bytes.len();
        let path = self
            .saver
            .save(bytes, &file_name)
            .await
            .map_err(DownloadError::Save)?;
        tracing::info!(path = %path.display(), bytes = len, "project archive saved");

        Ok(SavedArchive {
            file_name,
            path,
            bytes: len,
        })
    }

    /// File name the archive of `cluster` is saved under.
    pub fn name_file(&self, cluster: &ClusterRef) -> String {
        naming::name_file(cluster)
    }

    fn post_activity(&self) {
        let activities = Arc::clone(&self.activities);
        tokio::spawn(async move {
            if let Err(e) = activities.post(ActivityEvent::new(DOWNLOAD_ACTION)).await {
                tracing::warn!(error = %e, "failed to post download activity");
            }
        });
    }
}
