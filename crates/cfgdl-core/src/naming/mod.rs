//! Project archive naming.
//!
//! The saved archive is named after the cluster, with characters that are
//! unsafe in file names on common platforms replaced.

mod escape;

pub use escape::{escape_file_name, FORBIDDEN_CHARS};

use crate::model::ClusterRef;

/// Suffix appended to every project archive name.
pub const PROJECT_SUFFIX: &str = "-project.zip";

/// File name for the project archive of `cluster`.
///
/// # Examples
///
/// - `"prod"` → `"prod-project.zip"`
/// - `"My cluster.v2"` → `"My_cluster-v2-project.zip"`
pub fn name_file(cluster: &ClusterRef) -> String {
    project_file_name(&cluster.name)
}

/// Same as [`name_file`] for a bare display name.
pub fn project_file_name(name: &str) -> String {
    format!("{}{}", escape_file_name(name), PROJECT_SUFFIX)
}
