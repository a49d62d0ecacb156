//! Data carried through a single download: the cluster the user picked,
//! the configuration payload, and the normalized configuration set.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding the identifier of every configuration record.
pub const ID_FIELD: &str = "_id";

/// The cluster selected by the caller. Read only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

impl ClusterRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Ambient session state read by the download pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    pub demo_mode: bool,
}

/// A normalized cluster record. The content is opaque to the pipeline apart
/// from its `_id` and `name` fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterConfiguration(Value);

impl ClusterConfiguration {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn id(&self) -> Option<&str> {
        record_id(&self.0)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// Payload of the configuration resource for one cluster, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawClusterConfiguration {
    pub cluster: Value,
    #[serde(default)]
    pub caches: Vec<Value>,
    #[serde(default)]
    pub models: Vec<Value>,
    #[serde(default)]
    pub igfss: Vec<Value>,
}

/// Normalized configuration: references between records are resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurationSet {
    pub clusters: Vec<ClusterConfiguration>,
    pub caches: Vec<Value>,
    pub models: Vec<Value>,
    pub igfss: Vec<Value>,
}

impl ConfigurationSet {
    /// Returns the cluster whose id equals `id` exactly.
    pub fn find_cluster(&self, id: &str) -> Option<&ClusterConfiguration> {
        self.clusters.iter().find(|c| c.id() == Some(id))
    }

    /// Removes and returns the cluster whose id equals `id` exactly.
    pub fn take_cluster(&mut self, id: &str) -> Option<ClusterConfiguration> {
        let idx = self.clusters.iter().position(|c| c.id() == Some(id))?;
        Some(self.clusters.swap_remove(idx))
    }
}

/// Input of the archive builder.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveRequest {
    pub cluster: ClusterConfiguration,
    /// Auxiliary data; the download pipeline always sends an empty object.
    pub data: Map<String, Value>,
    pub demo_mode: bool,
    pub target_version: String,
}

/// Event recorded in the activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub action: String,
}

impl ActivityEvent {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
        }
    }
}

pub(crate) fn record_id(value: &Value) -> Option<&str> {
    value.get(ID_FIELD).and_then(Value::as_str)
}
