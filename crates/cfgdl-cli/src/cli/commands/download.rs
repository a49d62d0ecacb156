//! `cfgdl download <cluster-id> --name <name>` – fetch and save a project archive.

use anyhow::Result;
use cfgdl_core::activity::{ActivityLog, HttpActivityLog, TracingActivityLog};
use cfgdl_core::archive::ProjectZipper;
use cfgdl_core::config::{self, CfgdlConfig};
use cfgdl_core::http::HttpEndpoint;
use cfgdl_core::messages::{ConsoleReporter, ErrorReporter};
use cfgdl_core::resource::HttpConfigurationSource;
use cfgdl_core::storage::DirectorySaver;
use cfgdl_core::version::VersionTracker;
use cfgdl_core::{ClusterRef, ConfigurationDownload, Session};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Arguments of the download command after parsing.
#[derive(Debug, Clone)]
pub struct DownloadArgs {
    pub cluster_id: String,
    pub name: String,
    pub demo: bool,
    pub target_version: Option<String>,
    pub download_dir: Option<PathBuf>,
    pub server: Option<String>,
}

/// Console reporter that remembers whether anything was reported.
#[derive(Debug, Default)]
struct StatusReporter {
    failed: AtomicBool,
}

impl ErrorReporter for StatusReporter {
    fn show_error(&self, message: &str) {
        self.failed.store(true, Ordering::Relaxed);
        ConsoleReporter.show_error(message);
    }
}

pub async fn run_download(args: DownloadArgs) -> Result<ExitCode> {
    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);

    let download_dir = match args.download_dir.clone().or_else(|| cfg.download_dir.clone()) {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let reporter = Arc::new(StatusReporter::default());
    let download = build_download(&cfg, &args, download_dir.clone(), reporter.clone());

    let cluster = ClusterRef::new(args.cluster_id, args.name);
    let session = Session {
        demo_mode: args.demo || cfg.demo_mode,
    };
    if !download_succeeded(&download, &reporter, &cluster, &session).await {
        return Ok(ExitCode::FAILURE);
    }
    println!(
        "Saved {}",
        download_dir.join(download.name_file(&cluster)).display()
    );
    Ok(ExitCode::SUCCESS)
}

/// Runs the download; false when a failure was reported.
async fn download_succeeded(
    download: &ConfigurationDownload,
    reporter: &StatusReporter,
    cluster: &ClusterRef,
    session: &Session,
) -> bool {
    download
        .download_cluster_configuration(cluster, session)
        .await;
    !reporter.failed.load(Ordering::Relaxed)
}

fn build_download(
    cfg: &CfgdlConfig,
    args: &DownloadArgs,
    download_dir: PathBuf,
    reporter: Arc<dyn ErrorReporter>,
) -> ConfigurationDownload {
    let server = args.server.as_deref().unwrap_or(&cfg.server_url);
    let endpoint = HttpEndpoint::new(server, cfg.api_token.clone(), cfg.timeout());

    let activities: Arc<dyn ActivityLog> = if cfg.activities_enabled {
        Arc::new(HttpActivityLog::new(endpoint.clone()))
    } else {
        Arc::new(TracingActivityLog)
    };
    let version = args
        .target_version
        .clone()
        .unwrap_or_else(|| cfg.target_version_or_default().to_string());

    ConfigurationDownload::new(
        Arc::new(HttpConfigurationSource::new(endpoint)),
        Arc::new(ProjectZipper),
        activities,
        reporter,
        Arc::new(DirectorySaver::new(download_dir)),
        Arc::new(VersionTracker::new(version)),
    )
}
