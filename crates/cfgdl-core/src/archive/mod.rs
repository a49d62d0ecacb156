//! Project archive generation.
//!
//! `ProjectZipper` turns a normalized cluster into a zip of project files
//! laid out under a root folder named after the cluster.

mod files;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::model::ArchiveRequest;
use crate::naming::escape_file_name;

pub use files::{project_files, ProjectFile};

/// Builds the downloadable bundle for one cluster.
#[async_trait]
pub trait ArchiveBuilder: Send + Sync {
    async fn build(&self, request: ArchiveRequest) -> Result<Vec<u8>>;
}

/// Zips the generated project files.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectZipper;

#[async_trait]
impl ArchiveBuilder for ProjectZipper {
    async fn build(&self, request: ArchiveRequest) -> Result<Vec<u8>> {
        tokio::task::spawn_blocking(move || zip_project(&request))
            .await
            .context("archive task failed")?
    }
}

/// Synchronous body of [`ProjectZipper::build`].
pub fn zip_project(request: &ArchiveRequest) -> Result<Vec<u8>> {
    let name = match request.cluster.name() {
        Some(n) if !n.trim().is_empty() => n,
        _ => bail!("cluster has no name"),
    };
    let root = escape_file_name(name);
    let files = project_files(name, request)?;

    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for file in &files {
        let path = format!("{}/{}", root, file.path);
        zip.start_file(path.as_str(), options)
            .with_context(|| format!("failed to add {}", path))?;
        zip.write_all(&file.contents)?;
    }
    let bytes = zip.finish().context("failed to finish archive")?.into_inner();

    tracing::debug!(
        cluster = name,
        files = files.len(),
        bytes = bytes.len(),
        "built project archive"
    );
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClusterConfiguration;
    use serde_json::{json, Map};
    use std::io::Read;

    fn request(cluster: serde_json::Value, demo: bool) -> ArchiveRequest {
        ArchiveRequest {
            cluster: ClusterConfiguration::new(cluster),
            data: Map::new(),
            demo_mode: demo,
            target_version: "2.7.0".to_string(),
        }
    }

    fn read_entry(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut out = String::new();
        file.read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn archive_contains_project_layout() {
        let bytes = zip_project(&request(json!({"_id": "c1", "name": "My cluster"}), false)).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let mut names: Vec<&str> = archive.file_names().collect();
        names.sort_unstable();
        assert_eq!(
            names,
            vec![
                "My_cluster/Dockerfile",
                "My_cluster/README.txt",
                "My_cluster/pom.xml",
                "My_cluster/src/main/resources/My_cluster-cluster.json",
                "My_cluster/src/main/resources/project.properties",
            ]
        );
    }

    #[test]
    fn cluster_json_round_trips_configuration() {
        let cluster = json!({"_id": "c1", "name": "prod", "caches": [{"_id": "k1"}]});
        let bytes = zip_project(&request(cluster.clone(), false)).unwrap();
        let text = read_entry(&bytes, "prod/src/main/resources/prod-cluster.json");
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, cluster);
    }

    #[test]
    fn target_version_flows_into_pom_and_dockerfile() {
        let bytes = zip_project(&request(json!({"_id": "c1", "name": "prod"}), false)).unwrap();
        assert!(read_entry(&bytes, "prod/pom.xml").contains("<version>2.7.0</version>"));
        assert!(read_entry(&bytes, "prod/Dockerfile").contains("apacheignite/ignite:2.7.0"));
    }

    #[test]
    fn unnamed_cluster_is_rejected() {
        let err = zip_project(&request(json!({"_id": "c1"}), false)).unwrap_err();
        assert_eq!(err.to_string(), "cluster has no name");
        assert!(zip_project(&request(json!({"_id": "c1", "name": " "}), false)).is_err());
    }

    #[tokio::test]
    async fn async_build_matches_sync() {
        let req = request(json!({"_id": "c1", "name": "prod"}), true);
        let bytes = ProjectZipper.build(req).await.unwrap();
        assert!(read_entry(&bytes, "prod/src/main/resources/project.properties")
            .contains("demo.mode=true"));
    }
}
